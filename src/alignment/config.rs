/// Configuration for the distraction/transcript alignment pass.
#[derive(Debug, Clone)]
pub struct AlignmentConfig {
    /// Minimum gap between kept distraction events. The sampler can log one
    /// event per frame while the state stays distracted, so anything closer
    /// than this is treated as the same distraction.
    pub min_event_gap_secs: f64,

    /// Bucket width for the word-count fallback when the transcript has no
    /// per-segment timestamps.
    pub bucket_seconds: f64,
}

impl Default for AlignmentConfig {
    fn default() -> Self {
        Self {
            min_event_gap_secs: 5.0,
            bucket_seconds: 60.0,
        }
    }
}
