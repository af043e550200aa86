//! Configuration validation

use crate::schema::{RawConfig, RawEngineConfig, RawMeeting, RawSession};
use halaqa_api::{AdminStatus, LifecycleStatus};
use std::collections::HashSet;
use thiserror::Error;

/// Validation error
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Session '{session_id}': {message}")]
    SessionError { session_id: String, message: String },

    #[error("Duplicate session ID: {0}")]
    DuplicateSessionId(String),

    #[error("Session '{session_id}': invalid start_time '{value}'")]
    InvalidStartTime { session_id: String, value: String },

    #[error("Session '{session_id}': duration_minutes must be positive, got {value}")]
    NonPositiveDuration { session_id: String, value: i64 },

    #[error("Engine config error: {0}")]
    EngineError(String),
}

/// Validate a raw configuration
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = validate_engine(&config.engine);

    let mut seen_ids = HashSet::new();
    for session in &config.sessions {
        if !seen_ids.insert(&session.id) {
            errors.push(ValidationError::DuplicateSessionId(session.id.clone()));
        }
    }

    for session in &config.sessions {
        errors.extend(validate_session(session));
    }

    errors
}

fn validate_engine(engine: &RawEngineConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let join = threshold_minutes(
        "join_window_minutes",
        engine.join_window_minutes,
        DEFAULT_JOIN_WINDOW_MINUTES,
    );
    let lead = threshold_minutes(
        "link_lead_minutes",
        engine.link_lead_minutes,
        DEFAULT_LINK_LEAD_MINUTES,
    );

    // Links must exist before students are allowed to join
    if let (Ok(join), Ok(lead)) = (&join, &lead)
        && lead < join
    {
        errors.push(ValidationError::EngineError(format!(
            "link_lead_minutes ({}) must not be shorter than join_window_minutes ({})",
            lead, join
        )));
    }

    errors.extend(join.err());
    errors.extend(lead.err());
    errors
}

/// Check an optional engine threshold, falling back to `default` when unset
pub fn threshold_minutes(
    name: &str,
    value: Option<i64>,
    default: u32,
) -> Result<u32, ValidationError> {
    let Some(value) = value else {
        return Ok(default);
    };

    parse_duration_minutes(value).map_err(|problem| {
        ValidationError::EngineError(match problem {
            DurationProblem::NonPositive => format!("{} must be positive, got {}", name, value),
            DurationProblem::TooLarge => {
                format!("{} must be at most {}, got {}", name, u32::MAX, value)
            }
        })
    })
}

fn validate_session(session: &RawSession) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if session.id.trim().is_empty() {
        errors.push(ValidationError::SessionError {
            session_id: session.id.clone(),
            message: "id cannot be empty".into(),
        });
    }

    if session.title.trim().is_empty() {
        errors.push(ValidationError::SessionError {
            session_id: session.id.clone(),
            message: "title cannot be empty".into(),
        });
    }

    if let Some(status) = &session.status
        && let Err(e) = parse_admin_status(status)
    {
        errors.push(ValidationError::SessionError {
            session_id: session.id.clone(),
            message: e,
        });
    }

    if halaqa_util::parse_instant(&session.start_time).is_none() {
        errors.push(ValidationError::InvalidStartTime {
            session_id: session.id.clone(),
            value: session.start_time.clone(),
        });
    }

    if let Err(e) = parse_duration_minutes(session.duration_minutes) {
        errors.push(match e {
            DurationProblem::NonPositive => ValidationError::NonPositiveDuration {
                session_id: session.id.clone(),
                value: session.duration_minutes,
            },
            DurationProblem::TooLarge => ValidationError::SessionError {
                session_id: session.id.clone(),
                message: format!("duration_minutes {} is too large", session.duration_minutes),
            },
        });
    }

    if let Some(meeting) = &session.meeting {
        errors.extend(validate_meeting(meeting, &session.id));
    }

    errors
}

fn validate_meeting(meeting: &RawMeeting, session_id: &str) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(lifecycle) = &meeting.lifecycle
        && let Err(e) = parse_lifecycle(lifecycle)
    {
        errors.push(ValidationError::SessionError {
            session_id: session_id.to_string(),
            message: e,
        });
    }

    if let Some(url) = &meeting.join_url
        && !(url.starts_with("https://") || url.starts_with("http://"))
    {
        errors.push(ValidationError::SessionError {
            session_id: session_id.to_string(),
            message: format!("join_url '{}' is not an http(s) link", url),
        });
    }

    errors
}

/// Default join window in minutes
pub const DEFAULT_JOIN_WINDOW_MINUTES: u32 = 10;

/// Default link generation lead in minutes
pub const DEFAULT_LINK_LEAD_MINUTES: u32 = 120;

/// Why a duration was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationProblem {
    NonPositive,
    TooLarge,
}

/// Check a configured duration and narrow it to `u32` minutes
pub fn parse_duration_minutes(value: i64) -> Result<u32, DurationProblem> {
    if value <= 0 {
        return Err(DurationProblem::NonPositive);
    }
    u32::try_from(value).map_err(|_| DurationProblem::TooLarge)
}

/// Parse an administrative status name
pub fn parse_admin_status(s: &str) -> Result<AdminStatus, String> {
    match s.trim().to_lowercase().as_str() {
        "active" => Ok(AdminStatus::Active),
        "inactive" => Ok(AdminStatus::Inactive),
        "full" => Ok(AdminStatus::Full),
        "cancelled" | "canceled" => Ok(AdminStatus::Cancelled),
        "in_progress" | "in-progress" => Ok(AdminStatus::InProgress),
        "ended" => Ok(AdminStatus::Ended),
        other => Err(format!("Unknown session status: {}", other)),
    }
}

/// Parse a meeting lifecycle name
pub fn parse_lifecycle(s: &str) -> Result<LifecycleStatus, String> {
    match s.trim().to_lowercase().as_str() {
        "scheduled" => Ok(LifecycleStatus::Scheduled),
        "started" => Ok(LifecycleStatus::Started),
        "ended" => Ok(LifecycleStatus::Ended),
        other => Err(format!("Unknown meeting lifecycle: {}", other)),
    }
}
