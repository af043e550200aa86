//! Validated schedule structures

use crate::schema::{RawConfig, RawEngineConfig, RawMeeting, RawSession};
use crate::validation::{
    DEFAULT_JOIN_WINDOW_MINUTES, DEFAULT_LINK_LEAD_MINUTES, ValidationError, parse_admin_status,
    parse_duration_minutes, parse_lifecycle, threshold_minutes,
};
use chrono::{DateTime, Utc};
use halaqa_api::{AdminStatus, LifecycleStatus};
use halaqa_util::{MeetingId, SessionId};

/// Validated schedule ready for use by the status engine
#[derive(Debug, Clone, Default)]
pub struct Schedule {
    /// Engine thresholds
    pub engine: EngineConfig,

    /// Validated sessions, in file order
    pub sessions: Vec<SessionSpec>,
}

impl Schedule {
    /// Convert from raw config. Call [`crate::validate_config`] first; this
    /// only reports the first problem it trips over.
    pub fn from_raw(raw: RawConfig) -> Result<Self, ValidationError> {
        let engine = EngineConfig::from_raw(&raw.engine)?;
        let sessions = raw
            .sessions
            .into_iter()
            .map(SessionSpec::from_raw)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { engine, sessions })
    }
}

/// Engine thresholds, in whole minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// How long before start joining is permitted
    pub join_window_minutes: u32,
    /// How long before start the link generation job runs
    pub link_lead_minutes: u32,
}

impl EngineConfig {
    fn from_raw(raw: &RawEngineConfig) -> Result<Self, ValidationError> {
        Ok(Self {
            join_window_minutes: threshold_minutes(
                "join_window_minutes",
                raw.join_window_minutes,
                DEFAULT_JOIN_WINDOW_MINUTES,
            )?,
            link_lead_minutes: threshold_minutes(
                "link_lead_minutes",
                raw.link_lead_minutes,
                DEFAULT_LINK_LEAD_MINUTES,
            )?,
        })
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            join_window_minutes: DEFAULT_JOIN_WINDOW_MINUTES,
            link_lead_minutes: DEFAULT_LINK_LEAD_MINUTES,
        }
    }
}

/// Validated session definition
#[derive(Debug, Clone)]
pub struct SessionSpec {
    pub id: SessionId,
    pub title: String,
    pub instructor: String,
    pub admin_status: AdminStatus,
    pub start_time: DateTime<Utc>,
    pub duration_minutes: u32,
    pub meeting: Option<MeetingSpec>,
}

impl SessionSpec {
    fn from_raw(raw: RawSession) -> Result<Self, ValidationError> {
        let admin_status = match &raw.status {
            Some(s) => parse_admin_status(s).map_err(|message| ValidationError::SessionError {
                session_id: raw.id.clone(),
                message,
            })?,
            None => AdminStatus::default(),
        };

        let start_time = halaqa_util::parse_instant(&raw.start_time).ok_or_else(|| {
            ValidationError::InvalidStartTime {
                session_id: raw.id.clone(),
                value: raw.start_time.clone(),
            }
        })?;

        let duration_minutes = parse_duration_minutes(raw.duration_minutes).map_err(|_| {
            ValidationError::NonPositiveDuration {
                session_id: raw.id.clone(),
                value: raw.duration_minutes,
            }
        })?;

        let meeting = raw
            .meeting
            .map(|m| MeetingSpec::from_raw(m, &raw.id))
            .transpose()?;

        Ok(Self {
            id: SessionId::new(raw.id),
            title: raw.title,
            instructor: raw.instructor,
            admin_status,
            start_time,
            duration_minutes,
            meeting,
        })
    }
}

/// Validated meeting details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingSpec {
    pub meeting_id: Option<MeetingId>,
    pub lifecycle: LifecycleStatus,
    pub ready: bool,
    pub join_url: Option<String>,
}

impl MeetingSpec {
    fn from_raw(raw: RawMeeting, session_id: &str) -> Result<Self, ValidationError> {
        let lifecycle = match &raw.lifecycle {
            Some(s) => parse_lifecycle(s).map_err(|message| ValidationError::SessionError {
                session_id: session_id.to_string(),
                message,
            })?,
            None => LifecycleStatus::default(),
        };

        Ok(Self {
            meeting_id: raw.meeting_id.map(MeetingId::new),
            lifecycle,
            ready: raw.ready,
            join_url: raw.join_url,
        })
    }
}
