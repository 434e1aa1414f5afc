use crate::models::AnalysisEntry;
use crate::report::format_clock;

/// Human-readable report: one line per aligned record.
pub fn render(entries: &[AnalysisEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let clock = format_clock(entry.distraction_timestamp);
        match &entry.transcription {
            Some(text) => {
                out.push_str(&format!("At {clock}, inattentive during: {}\n", text.trim()));
            }
            None => {
                out.push_str(&format!(
                    "At {clock}, inattentive (no matching transcript segment)\n"
                ));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{record::to_entries, AlignedRecord, TranscriptSegment};

    #[test]
    fn renders_one_line_per_record() {
        let records = vec![
            AlignedRecord {
                timestamp: 65.0,
                segment: Some(TranscriptSegment::new(60.0, 70.0, " the midterm is Friday")),
            },
            AlignedRecord {
                timestamp: 200.0,
                segment: None,
            },
        ];
        let rendered = render(&to_entries(&records));
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "At 1:05, inattentive during: the midterm is Friday");
        assert_eq!(lines[1], "At 3:20, inattentive (no matching transcript segment)");
    }

    #[test]
    fn empty_records_render_empty_report() {
        assert!(render(&[]).is_empty());
    }
}
