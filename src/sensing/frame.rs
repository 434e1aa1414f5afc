use std::path::PathBuf;
use std::process::Command;

use anyhow::{bail, Context, Result};

/// Source of single encoded webcam frames.
pub trait FrameSource: Send + Sync {
    /// Grab one frame, encoded as PNG bytes.
    fn grab(&self) -> Result<Vec<u8>>;
}

#[cfg(target_os = "macos")]
const INPUT_FORMAT: &str = "avfoundation";
#[cfg(target_os = "windows")]
const INPUT_FORMAT: &str = "dshow";
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const INPUT_FORMAT: &str = "v4l2";

#[cfg(target_os = "macos")]
const DEFAULT_DEVICE: &str = "0";
#[cfg(target_os = "windows")]
const DEFAULT_DEVICE: &str = "video=Integrated Camera";
#[cfg(not(any(target_os = "macos", target_os = "windows")))]
const DEFAULT_DEVICE: &str = "/dev/video0";

/// Grabs webcam frames by running the external transcoder once per sample.
/// One process per frame is slow next to a held capture handle, but it keeps
/// the camera free between samples and needs no capture bindings.
pub struct FfmpegFrameSource {
    ffmpeg: PathBuf,
    device: String,
}

impl FfmpegFrameSource {
    pub fn new(ffmpeg: PathBuf, device: Option<String>) -> Self {
        Self {
            ffmpeg,
            device: device.unwrap_or_else(|| DEFAULT_DEVICE.to_string()),
        }
    }

    pub fn device(&self) -> &str {
        &self.device
    }
}

impl FrameSource for FfmpegFrameSource {
    fn grab(&self) -> Result<Vec<u8>> {
        let output = Command::new(&self.ffmpeg)
            .args(["-hide_banner", "-loglevel", "error", "-f", INPUT_FORMAT, "-i"])
            .arg(&self.device)
            .args(["-frames:v", "1", "-f", "image2pipe", "-vcodec", "png", "-"])
            .output()
            .with_context(|| format!("failed to run {}", self.ffmpeg.display()))?;

        if !output.status.success() {
            bail!(
                "frame grab from {} failed: {}",
                self.device,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        if output.stdout.is_empty() {
            bail!("frame grab from {} produced no image data", self.device);
        }

        Ok(output.stdout)
    }
}
