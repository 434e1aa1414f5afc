pub mod timestamps;
pub mod transcript;

pub use timestamps::{read_timestamps, TimestampLog};
pub use transcript::{load_transcript, save_transcript};
