use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use log::info;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::classifier::AttentionClassifier;
use super::frame::FrameSource;
use super::loop_worker::{sampling_loop, SamplerOptions};
use crate::models::{Session, SessionStatus};
use crate::store::TimestampLog;

/// Owns the lifecycle of one attention-sampling session: a spawned loop
/// task, its cancellation token, and the session record.
pub struct SamplerController {
    handle: Option<JoinHandle<u64>>,
    cancel_token: Option<CancellationToken>,
    session: Option<Session>,
}

impl SamplerController {
    pub fn new() -> Self {
        Self {
            handle: None,
            cancel_token: None,
            session: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    pub fn start_sampling(
        &mut self,
        source: Arc<dyn FrameSource>,
        classifier: Arc<dyn AttentionClassifier>,
        event_log: TimestampLog,
        options: SamplerOptions,
    ) -> Result<Session> {
        if self.handle.is_some() {
            bail!("sampling already active");
        }

        let session = Session::begin(Utc::now());
        info!(
            "starting sampling session {} (interval {:?}, log {})",
            session.id,
            options.interval,
            event_log.path().display()
        );

        let cancel_token = CancellationToken::new();
        let handle = tokio::spawn(sampling_loop(
            session.id.clone(),
            source,
            classifier,
            event_log,
            options,
            cancel_token.clone(),
        ));

        self.handle = Some(handle);
        self.cancel_token = Some(cancel_token);
        self.session = Some(session.clone());
        Ok(session)
    }

    /// Normal end of a session.
    pub async fn stop_sampling(&mut self) -> Result<Session> {
        self.shutdown(SessionStatus::Completed).await
    }

    /// User abort: the session still drains cleanly, but is recorded as
    /// cancelled.
    pub async fn cancel_sampling(&mut self) -> Result<Session> {
        self.shutdown(SessionStatus::Cancelled).await
    }

    async fn shutdown(&mut self, status: SessionStatus) -> Result<Session> {
        let Some(token) = self.cancel_token.take() else {
            bail!("no active sampling session");
        };
        token.cancel();

        let handle = self.handle.take().context("sampler task handle missing")?;
        let events_logged = handle.await.context("sampling task failed to join")?;

        let mut session = self.session.take().context("sampler session missing")?;
        session.finish(status, events_logged, Utc::now());
        info!(
            "session {} {} with {} event(s) logged",
            session.id,
            session.status.as_str().to_ascii_lowercase(),
            events_logged
        );
        Ok(session)
    }
}

impl Default for SamplerController {
    fn default() -> Self {
        Self::new()
    }
}
