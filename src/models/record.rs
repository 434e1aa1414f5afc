use serde::{Deserialize, Serialize};

use super::segment::TranscriptSegment;

/// One distraction event paired with the transcript segment active at that
/// moment. `segment: None` is the explicit unmatched outcome, not an error.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedRecord {
    /// Elapsed seconds since sampling start.
    pub timestamp: f64,
    pub segment: Option<TranscriptSegment>,
}

impl AlignedRecord {
    pub fn is_matched(&self) -> bool {
        self.segment.is_some()
    }
}

/// Flat wire form of an [`AlignedRecord`], matching the key names of the
/// analysis JSON file. Unmatched events serialize with null fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisEntry {
    pub distraction_timestamp: f64,
    pub transcription: Option<String>,
    pub segment_start: Option<f64>,
    pub segment_end: Option<f64>,
}

impl From<&AlignedRecord> for AnalysisEntry {
    fn from(record: &AlignedRecord) -> Self {
        match &record.segment {
            Some(segment) => Self {
                distraction_timestamp: record.timestamp,
                transcription: Some(segment.text.clone()),
                segment_start: Some(segment.start()),
                segment_end: Some(segment.end()),
            },
            None => Self {
                distraction_timestamp: record.timestamp,
                transcription: None,
                segment_start: None,
                segment_end: None,
            },
        }
    }
}

impl AnalysisEntry {
    pub fn is_matched(&self) -> bool {
        self.transcription.is_some()
    }
}

pub fn to_entries(records: &[AlignedRecord]) -> Vec<AnalysisEntry> {
    records.iter().map(AnalysisEntry::from).collect()
}
