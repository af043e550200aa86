//! Raw configuration schema (as parsed from TOML)

use serde::{Deserialize, Serialize};

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// Status engine thresholds
    #[serde(default)]
    pub engine: RawEngineConfig,

    /// Scheduled class sessions
    #[serde(default)]
    pub sessions: Vec<RawSession>,
}

/// Engine thresholds
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawEngineConfig {
    /// Minutes before start when joining opens (default: 10)
    pub join_window_minutes: Option<i64>,

    /// Minutes before start when meeting links get generated (default: 120)
    pub link_lead_minutes: Option<i64>,
}

/// Raw session definition
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawSession {
    /// Unique stable ID
    pub id: String,

    /// Display title
    pub title: String,

    /// Instructor display name
    #[serde(default)]
    pub instructor: String,

    /// Administrative status: "active", "inactive", "full", "cancelled",
    /// "in_progress" or "ended"
    pub status: Option<String>,

    /// Scheduled start (RFC 3339, or `YYYY-MM-DD HH:MM:SS` local time)
    pub start_time: String,

    /// Length of the session in minutes
    pub duration_minutes: i64,

    /// Meeting details, once links have been generated
    #[serde(default)]
    pub meeting: Option<RawMeeting>,
}

/// Raw meeting details
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawMeeting {
    /// Provider-assigned meeting ID
    pub meeting_id: Option<String>,

    /// Lifecycle: "scheduled", "started" or "ended"
    pub lifecycle: Option<String>,

    /// Whether join links have been generated
    #[serde(default)]
    pub ready: bool,

    /// Join link handed to students
    pub join_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_session_with_meeting() {
        let toml_str = r#"
            config_version = 1

            [[sessions]]
            id = "tajweed-101"
            title = "Tajweed Basics"
            instructor = "Ustadh Karim"
            status = "active"
            start_time = "2026-10-17T18:00:00Z"
            duration_minutes = 60

            [sessions.meeting]
            meeting_id = "84512"
            lifecycle = "started"
            ready = true
            join_url = "https://meet.example/j/84512"
        "#;

        let config: RawConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.sessions.len(), 1);
        let meeting = config.sessions[0].meeting.as_ref().unwrap();
        assert!(meeting.ready);
        assert_eq!(meeting.lifecycle.as_deref(), Some("started"));
    }

    #[test]
    fn parse_engine_thresholds() {
        let toml_str = r#"
            config_version = 1

            [engine]
            join_window_minutes = 5
            link_lead_minutes = 60
        "#;

        let config: RawConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.engine.join_window_minutes, Some(5));
        assert_eq!(config.engine.link_lead_minutes, Some(60));
        assert!(config.sessions.is_empty());
    }
}
