use std::path::Path;
use std::process::Command;

use log::info;

use super::TranscriptionError;

/// Extract a lecture's audio track as 16 kHz mono PCM WAV, the input format
/// the speech-to-text engine expects.
pub fn extract_audio(
    ffmpeg: &Path,
    video: &Path,
    wav_out: &Path,
) -> Result<(), TranscriptionError> {
    info!(
        "extracting audio from {} to {}",
        video.display(),
        wav_out.display()
    );

    let output = Command::new(ffmpeg)
        .arg("-i")
        .arg(video)
        .args(["-vn", "-acodec", "pcm_s16le", "-ar", "16000", "-ac", "1", "-y"])
        .arg(wav_out)
        .output()
        .map_err(|err| TranscriptionError::io("running ffmpeg", err))?;

    if !output.status.success() {
        return Err(TranscriptionError::AudioExtraction(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }

    Ok(())
}
