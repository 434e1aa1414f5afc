pub mod audio;
pub mod whisper;

pub use audio::extract_audio;
pub use whisper::WhisperAdapter;

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::models::TranscriptSegment;

/// Speech-to-text seam. The engine itself is an external collaborator; an
/// adapter turns its output into ordered transcript segments.
pub trait Transcriber: Send + Sync {
    fn transcribe(&self, audio: &Path) -> Result<Vec<TranscriptSegment>, TranscriptionError>;

    /// Engine name for logs.
    fn name(&self) -> &str;
}

#[derive(Debug, Error)]
pub enum TranscriptionError {
    #[error("{0} not found; install it or set its path in the settings file")]
    BinaryNotFound(String),

    #[error("model file not found at {0}")]
    ModelNotFound(PathBuf),

    #[error("audio extraction failed: {0}")]
    AudioExtraction(String),

    #[error("transcriber exited with an error: {0}")]
    EngineFailed(String),

    #[error("malformed transcriber output: {0}")]
    MalformedOutput(String),

    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl TranscriptionError {
    pub(crate) fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }
}

/// Resolve an external tool: an explicitly configured path wins, otherwise
/// the first match on PATH.
pub fn resolve_binary(
    configured: Option<&Path>,
    name: &str,
) -> Result<PathBuf, TranscriptionError> {
    if let Some(path) = configured {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        return Err(TranscriptionError::BinaryNotFound(format!(
            "{} (configured as {})",
            name,
            path.display()
        )));
    }
    which::which(name).map_err(|_| TranscriptionError::BinaryNotFound(name.to_string()))
}
