//! Status types for the halaqa API

use chrono::{DateTime, Utc};
use halaqa_util::SessionId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a session set by an instructor or admin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminStatus {
    #[default]
    Active,
    Inactive,
    Full,
    Cancelled,
    #[serde(alias = "in-progress")]
    InProgress,
    Ended,
}

impl AdminStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminStatus::Active => "active",
            AdminStatus::Inactive => "inactive",
            AdminStatus::Full => "full",
            AdminStatus::Cancelled => "cancelled",
            AdminStatus::InProgress => "in_progress",
            AdminStatus::Ended => "ended",
        }
    }
}

impl fmt::Display for AdminStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Meeting lifecycle as reported by the video provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStatus {
    #[default]
    Scheduled,
    Started,
    Ended,
}

/// Clock-derived (or overridden) status of a session card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Cancelled,
    Upcoming,
    Ready,
    Live,
    Ended,
}

impl StatusKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusKind::Cancelled => "cancelled",
            StatusKind::Upcoming => "upcoming",
            StatusKind::Ready => "ready",
            StatusKind::Live => "live",
            StatusKind::Ended => "ended",
        }
    }

    /// Badge text shown on a session card
    pub fn label(&self) -> &'static str {
        match self {
            StatusKind::Cancelled => "Cancelled",
            StatusKind::Upcoming => "Upcoming",
            StatusKind::Ready => "Starting Soon",
            StatusKind::Live => "Live",
            StatusKind::Ended => "Ended",
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of evaluating a session at one instant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingStatus {
    pub status: StatusKind,
    pub message: String,
    pub can_join: bool,
}

impl MeetingStatus {
    pub fn new(status: StatusKind, message: impl Into<String>, can_join: bool) -> Self {
        Self {
            status,
            message: message.into(),
            can_join,
        }
    }
}

/// One session card, ready for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub title: String,
    pub instructor: String,
    pub start_time: DateTime<Utc>,
    pub duration_minutes: u32,
    pub admin_status: AdminStatus,
    #[serde(flatten)]
    pub status: MeetingStatus,
    /// Present only while joining is permitted
    pub join_url: Option<String>,
}

/// All session cards evaluated at the same instant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub evaluated_at: DateTime<Utc>,
    pub sessions: Vec<SessionView>,
}
