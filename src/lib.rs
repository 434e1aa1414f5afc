pub mod alignment;
pub mod models;
pub mod report;
pub mod sensing;
pub mod settings;
pub mod store;
pub mod transcription;

pub use alignment::{align_events, bucket_transcript, debounce, find_segment, AlignmentConfig};
pub use models::{AlignedRecord, AnalysisEntry, Session, TimeInterval, TranscriptSegment};
