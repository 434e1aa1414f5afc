use std::fs;
use std::path::PathBuf;
use std::process::Command;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttentionState {
    Attentive,
    Distracted,
}

impl AttentionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttentionState::Attentive => "attentive",
            AttentionState::Distracted => "distracted",
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "attentive" => Some(AttentionState::Attentive),
            "distracted" => Some(AttentionState::Distracted),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Classification {
    pub state: AttentionState,
    pub confidence: Option<f32>,
}

/// Frame classifier seam. The model and its weights are an external
/// collaborator; an implementation only has to label one frame.
pub trait AttentionClassifier: Send + Sync {
    fn classify(&self, frame_png: &[u8]) -> Result<Classification>;

    fn name(&self) -> &str;
}

/// Runs an external classifier command with the frame path appended as its
/// final argument. Expected stdout: one line, `<label> [confidence]`, where
/// the label is `attentive` or `distracted` (case-insensitive).
pub struct CommandClassifier {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandClassifier {
    pub fn new(program: PathBuf, args: Vec<String>) -> Self {
        Self { program, args }
    }
}

impl AttentionClassifier for CommandClassifier {
    fn classify(&self, frame_png: &[u8]) -> Result<Classification> {
        let frame_path = std::env::temp_dir().join(format!("lectern-frame-{}.png", Uuid::new_v4()));
        fs::write(&frame_path, frame_png)
            .with_context(|| format!("failed to stage frame at {}", frame_path.display()))?;

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(&frame_path)
            .output()
            .with_context(|| format!("failed to run classifier {}", self.program.display()));
        let _ = fs::remove_file(&frame_path);
        let output = output?;

        if !output.status.success() {
            bail!(
                "classifier {} failed: {}",
                self.program.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let line = stdout
            .lines()
            .find(|line| !line.trim().is_empty())
            .context("classifier produced no output")?;

        let mut parts = line.split_whitespace();
        let label = parts.next().context("classifier output missing label")?;
        let confidence = parts.next().and_then(|token| token.parse::<f32>().ok());

        let state = AttentionState::from_label(label).with_context(|| {
            format!("classifier returned unknown label '{label}'; expected 'attentive' or 'distracted'")
        })?;

        Ok(Classification { state, confidence })
    }

    fn name(&self) -> &str {
        "external command"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!(
            AttentionState::from_label("Distracted"),
            Some(AttentionState::Distracted)
        );
        assert_eq!(
            AttentionState::from_label("ATTENTIVE"),
            Some(AttentionState::Attentive)
        );
        assert_eq!(AttentionState::from_label("bored"), None);
    }
}
