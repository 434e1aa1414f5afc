pub mod classifier;
pub mod controller;
pub mod frame;
mod loop_worker;
pub mod phash;

pub use classifier::{AttentionClassifier, AttentionState, Classification, CommandClassifier};
pub use controller::SamplerController;
pub use frame::{FfmpegFrameSource, FrameSource};
pub use loop_worker::SamplerOptions;
