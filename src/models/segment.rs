use serde::{Deserialize, Serialize};

/// A half-open span `[start, end)` of elapsed seconds, measured from the
/// common zero point (sampling / lecture start).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeInterval {
    pub start: f64,
    pub end: f64,
}

impl TimeInterval {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Half-open containment: a timestamp equal to `end` belongs to the
    /// next interval, not this one.
    pub fn contains(&self, t: f64) -> bool {
        self.start <= t && t < self.end
    }

    pub fn duration_secs(&self) -> f64 {
        self.end - self.start
    }
}

/// A time-bounded span of transcribed speech.
///
/// Serializes as the flat `{start, end, text}` object used by the
/// transcript JSON files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    #[serde(flatten)]
    pub interval: TimeInterval,
    pub text: String,
}

impl TranscriptSegment {
    pub fn new(start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            interval: TimeInterval::new(start, end),
            text: text.into(),
        }
    }

    pub fn start(&self) -> f64 {
        self.interval.start
    }

    pub fn end(&self) -> f64 {
        self.interval.end
    }
}
