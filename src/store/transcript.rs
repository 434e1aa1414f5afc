use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::alignment::algorithm::validate_segments;
use crate::models::TranscriptSegment;

/// Load the canonical transcript JSON: an array of `{start, end, text}`
/// objects, seconds from lecture start, in non-decreasing start order.
pub fn load_transcript(path: &Path) -> Result<Vec<TranscriptSegment>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read transcript {}", path.display()))?;
    let segments: Vec<TranscriptSegment> = serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse transcript {}", path.display()))?;
    validate_segments(&segments)
        .with_context(|| format!("invalid transcript {}", path.display()))?;
    Ok(segments)
}

pub fn save_transcript(path: &Path, segments: &[TranscriptSegment]) -> Result<()> {
    let serialized = serde_json::to_string_pretty(segments)?;
    fs::write(path, serialized)
        .with_context(|| format!("failed to write transcript {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use uuid::Uuid;

    fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("lectern-transcript-{}.json", Uuid::new_v4()))
    }

    #[test]
    fn loads_start_end_text_entries() {
        let path = temp_path();
        fs::write(
            &path,
            r#"[{"start": 0.0, "end": 10.0, "text": "intro"},
               {"start": 10.0, "end": 25.0, "text": "body"}]"#,
        )
        .unwrap();
        let segments = load_transcript(&path).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].start(), 10.0);
        assert_eq!(segments[1].text, "body");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn save_then_load_preserves_segments() {
        let path = temp_path();
        let segments = vec![
            TranscriptSegment::new(0.0, 4.5, "hello"),
            TranscriptSegment::new(4.5, 9.0, "world"),
        ];
        save_transcript(&path, &segments).unwrap();
        assert_eq!(load_transcript(&path).unwrap(), segments);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn out_of_order_transcript_is_rejected() {
        let path = temp_path();
        fs::write(
            &path,
            r#"[{"start": 10.0, "end": 25.0, "text": "b"},
               {"start": 0.0, "end": 10.0, "text": "a"}]"#,
        )
        .unwrap();
        assert!(load_transcript(&path).is_err());
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_keys_are_rejected() {
        let path = temp_path();
        fs::write(&path, r#"[{"start": 0.0, "text": "no end"}]"#).unwrap();
        assert!(load_transcript(&path).is_err());
        fs::remove_file(&path).unwrap();
    }
}
