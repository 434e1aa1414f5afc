use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    Completed,
    Cancelled,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Running => "Running",
            SessionStatus::Completed => "Completed",
            SessionStatus::Cancelled => "Cancelled",
        }
    }
}

/// One attention-sampling run. The controller owns the lifecycle; event data
/// lives in the timestamp store, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub started_at: DateTime<Utc>,
    pub stopped_at: Option<DateTime<Utc>>,
    pub status: SessionStatus,
    pub events_logged: u64,
}

impl Session {
    pub fn begin(started_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            started_at,
            stopped_at: None,
            status: SessionStatus::Running,
            events_logged: 0,
        }
    }

    pub fn finish(&mut self, status: SessionStatus, events_logged: u64, stopped_at: DateTime<Utc>) {
        self.status = status;
        self.events_logged = events_logged;
        self.stopped_at = Some(stopped_at);
    }
}
