use std::sync::Arc;

use anyhow::{Context, Result};
use image_hasher::ImageHash;
use log::{debug, error, info, warn};
use tokio::time::{Duration, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::classifier::{AttentionClassifier, AttentionState};
use super::frame::FrameSource;
use super::phash;
use crate::store::TimestampLog;

#[derive(Debug, Clone)]
pub struct SamplerOptions {
    pub interval: Duration,
    pub capture_timeout: Duration,
    /// Hamming distance below which a frame counts as unchanged and the
    /// previous classification is reused. Zero disables the gate.
    pub frame_change_threshold: u32,
}

impl Default for SamplerOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            capture_timeout: Duration::from_secs(10),
            frame_change_threshold: 8,
        }
    }
}

/// The sampling loop: one task owning the frame source, classifier handle,
/// and timestamp log. Every distracted classification appends the elapsed
/// seconds since loop start to the store; debouncing near-duplicates is the
/// aligner's job, not the sampler's.
pub(crate) async fn sampling_loop(
    session_id: String,
    source: Arc<dyn FrameSource>,
    classifier: Arc<dyn AttentionClassifier>,
    mut event_log: TimestampLog,
    options: SamplerOptions,
    cancel_token: CancellationToken,
) -> u64 {
    let started = Instant::now();
    let mut ticker = tokio::time::interval(options.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut last_hash: Option<ImageHash> = None;
    let mut last_state: Option<AttentionState> = None;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let elapsed = started.elapsed().as_secs_f64();
                let sample = perform_sample(
                    &source,
                    &classifier,
                    &mut last_hash,
                    &mut last_state,
                    options.frame_change_threshold,
                );

                match tokio::time::timeout(options.capture_timeout, sample).await {
                    Ok(Ok(AttentionState::Distracted)) => {
                        info!("inattentive at {elapsed:.2}s (session {session_id})");
                        if let Err(err) = event_log.append(elapsed) {
                            error!("failed to log distraction event: {err:?}");
                        }
                    }
                    Ok(Ok(AttentionState::Attentive)) => {}
                    Ok(Err(err)) => error!("sample failed for session {session_id}: {err:?}"),
                    Err(_) => warn!(
                        "sample timed out (> {:?}) in session {session_id}",
                        options.capture_timeout
                    ),
                }
            }
            _ = cancel_token.cancelled() => {
                info!("sampling loop for session {session_id} shutting down");
                break;
            }
        }
    }

    event_log.written()
}

async fn perform_sample(
    source: &Arc<dyn FrameSource>,
    classifier: &Arc<dyn AttentionClassifier>,
    last_hash: &mut Option<ImageHash>,
    last_state: &mut Option<AttentionState>,
    frame_change_threshold: u32,
) -> Result<AttentionState> {
    let frame = tokio::task::spawn_blocking({
        let source = Arc::clone(source);
        move || source.grab()
    })
    .await
    .context("frame grab worker join failed")??;
    let frame = Arc::new(frame);

    let hash = tokio::task::spawn_blocking({
        let frame = Arc::clone(&frame);
        move || phash::frame_hash(&frame)
    })
    .await
    .context("frame hash worker join failed")??;

    // Static scene: keep the previous verdict instead of paying for another
    // classifier invocation.
    if let (Some(prev_hash), Some(prev_state)) = (last_hash.as_ref(), *last_state) {
        if frame_change_threshold > 0
            && phash::hamming_distance(&hash, prev_hash) < frame_change_threshold
        {
            debug!("frame unchanged, reusing {} classification", prev_state.as_str());
            *last_hash = Some(hash);
            return Ok(prev_state);
        }
    }

    let classification = tokio::task::spawn_blocking({
        let frame = Arc::clone(&frame);
        let classifier = Arc::clone(classifier);
        move || classifier.classify(&frame)
    })
    .await
    .context("classifier worker join failed")??;

    debug!(
        "classified frame as {} (confidence {:?})",
        classification.state.as_str(),
        classification.confidence
    );

    *last_hash = Some(hash);
    *last_state = Some(classification.state);
    Ok(classification.state)
}
