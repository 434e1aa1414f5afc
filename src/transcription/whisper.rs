use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use log::{info, warn};
use serde::Deserialize;
use uuid::Uuid;

use super::{Transcriber, TranscriptionError};
use crate::models::TranscriptSegment;

/// Adapter for a local whisper.cpp CLI binary invoked with JSON output.
pub struct WhisperAdapter {
    bin_path: PathBuf,
    model_path: PathBuf,
    language: String,
}

impl WhisperAdapter {
    pub fn new(
        bin_path: PathBuf,
        model_path: PathBuf,
        language: impl Into<String>,
    ) -> Result<Self, TranscriptionError> {
        if !model_path.exists() {
            return Err(TranscriptionError::ModelNotFound(model_path));
        }
        info!(
            "whisper adapter ready: bin={}, model={}",
            bin_path.display(),
            model_path.display()
        );
        Ok(Self {
            bin_path,
            model_path,
            language: language.into(),
        })
    }
}

impl Transcriber for WhisperAdapter {
    fn transcribe(&self, audio: &Path) -> Result<Vec<TranscriptSegment>, TranscriptionError> {
        let out_prefix = std::env::temp_dir().join(format!("lectern-whisper-{}", Uuid::new_v4()));

        let output = Command::new(&self.bin_path)
            .arg("-m")
            .arg(&self.model_path)
            .arg("-f")
            .arg(audio)
            .args(["-l", &self.language, "-oj", "-of"])
            .arg(&out_prefix)
            .output()
            .map_err(|err| TranscriptionError::io("running whisper", err))?;

        if !output.status.success() {
            return Err(TranscriptionError::EngineFailed(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        let json_path = out_prefix.with_extension("json");
        let contents = fs::read_to_string(&json_path)
            .map_err(|err| TranscriptionError::io("reading whisper output", err))?;
        let _ = fs::remove_file(&json_path);

        segments_from_whisper_json(&contents)
    }

    fn name(&self) -> &str {
        "whisper.cpp"
    }
}

#[derive(Deserialize)]
struct WhisperOutput {
    transcription: Vec<WhisperUtterance>,
}

#[derive(Deserialize)]
struct WhisperUtterance {
    offsets: WhisperOffsets,
    text: String,
}

/// whisper.cpp reports offsets in milliseconds from audio start.
#[derive(Deserialize)]
struct WhisperOffsets {
    from: u64,
    to: u64,
}

pub(crate) fn segments_from_whisper_json(
    contents: &str,
) -> Result<Vec<TranscriptSegment>, TranscriptionError> {
    let parsed: WhisperOutput = serde_json::from_str(contents)
        .map_err(|err| TranscriptionError::MalformedOutput(err.to_string()))?;

    let mut segments = Vec::with_capacity(parsed.transcription.len());
    let mut dropped = 0usize;
    for utterance in parsed.transcription {
        let text = utterance.text.trim();
        if text.is_empty() {
            dropped += 1;
            continue;
        }
        segments.push(TranscriptSegment::new(
            utterance.offsets.from as f64 / 1000.0,
            utterance.offsets.to as f64 / 1000.0,
            text,
        ));
    }
    if dropped > 0 {
        warn!("dropped {dropped} empty transcription segment(s)");
    }

    // whisper.cpp emits segments in order, but cheap to keep the downstream
    // sortedness contract explicit.
    segments.sort_by(|a, b| a.start().total_cmp(&b.start()));
    Ok(segments)
}
