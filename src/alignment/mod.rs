pub mod algorithm;
pub mod bucketing;
pub mod config;
pub mod debounce;

pub use algorithm::{align_events, find_segment};
pub use bucketing::bucket_transcript;
pub use config::AlignmentConfig;
pub use debounce::debounce;
