//! Meetings and the sessions that own them

use chrono::{DateTime, Utc};
use halaqa_api::{AdminStatus, LifecycleStatus};
use halaqa_config::{MeetingSpec, SessionSpec};
use halaqa_util::{MeetingId, SessionId};
use thiserror::Error;

/// Reasons a meeting cannot be constructed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeetingError {
    #[error("Meeting duration must be positive")]
    NonPositiveDuration,

    #[error("Meeting starting at {start} with {minutes} min runs past the supported time range")]
    EndOutOfRange { start: DateTime<Utc>, minutes: u32 },
}

/// A scheduled video meeting for one session
///
/// Fields are private so a `Meeting` with a zero duration cannot exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Meeting {
    meeting_id: Option<MeetingId>,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    duration_minutes: u32,
    lifecycle: LifecycleStatus,
    is_ready: bool,
    join_url: Option<String>,
}

impl Meeting {
    /// Create a scheduled, not yet ready meeting
    pub fn new(start_time: DateTime<Utc>, duration_minutes: u32) -> Result<Self, MeetingError> {
        let end_time = end_of(start_time, duration_minutes)?;

        Ok(Self {
            meeting_id: None,
            start_time,
            end_time,
            duration_minutes,
            lifecycle: LifecycleStatus::Scheduled,
            is_ready: false,
            join_url: None,
        })
    }

    pub fn with_meeting_id(mut self, meeting_id: MeetingId) -> Self {
        self.meeting_id = Some(meeting_id);
        self
    }

    pub fn with_lifecycle(mut self, lifecycle: LifecycleStatus) -> Self {
        self.lifecycle = lifecycle;
        self
    }

    /// Mark join credentials as generated
    pub fn ready(mut self, join_url: Option<String>) -> Self {
        self.is_ready = true;
        self.join_url = join_url;
        self
    }

    pub fn meeting_id(&self) -> Option<&MeetingId> {
        self.meeting_id.as_ref()
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    /// First instant at which the meeting is over
    pub fn end_time(&self) -> DateTime<Utc> {
        self.end_time
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn lifecycle(&self) -> LifecycleStatus {
        self.lifecycle
    }

    pub fn is_ready(&self) -> bool {
        self.is_ready
    }

    pub fn join_url(&self) -> Option<&str> {
        self.join_url.as_deref()
    }
}

fn end_of(start: DateTime<Utc>, minutes: u32) -> Result<DateTime<Utc>, MeetingError> {
    if minutes == 0 {
        return Err(MeetingError::NonPositiveDuration);
    }
    start
        .checked_add_signed(chrono::Duration::minutes(i64::from(minutes)))
        .ok_or(MeetingError::EndOutOfRange { start, minutes })
}

/// Meeting of a session, if one has been generated
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MeetingSlot {
    #[default]
    NoMeeting,
    Scheduled(Meeting),
}

impl MeetingSlot {
    pub fn meeting(&self) -> Option<&Meeting> {
        match self {
            MeetingSlot::NoMeeting => None,
            MeetingSlot::Scheduled(m) => Some(m),
        }
    }

    pub fn meeting_mut(&mut self) -> Option<&mut Meeting> {
        match self {
            MeetingSlot::NoMeeting => None,
            MeetingSlot::Scheduled(m) => Some(m),
        }
    }
}

impl From<Option<Meeting>> for MeetingSlot {
    fn from(meeting: Option<Meeting>) -> Self {
        meeting.map_or(MeetingSlot::NoMeeting, MeetingSlot::Scheduled)
    }
}

/// A class session and its meeting
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub title: String,
    pub instructor: String,
    pub admin_status: AdminStatus,
    start_time: DateTime<Utc>,
    duration_minutes: u32,
    pub meeting: MeetingSlot,
}

impl Session {
    /// Create an active session with no meeting yet
    pub fn new(
        id: SessionId,
        title: impl Into<String>,
        start_time: DateTime<Utc>,
        duration_minutes: u32,
    ) -> Result<Self, MeetingError> {
        end_of(start_time, duration_minutes)?;

        Ok(Self {
            id,
            title: title.into(),
            instructor: String::new(),
            admin_status: AdminStatus::Active,
            start_time,
            duration_minutes,
            meeting: MeetingSlot::NoMeeting,
        })
    }

    pub fn with_instructor(mut self, instructor: impl Into<String>) -> Self {
        self.instructor = instructor.into();
        self
    }

    pub fn with_admin_status(mut self, status: AdminStatus) -> Self {
        self.admin_status = status;
        self
    }

    pub fn with_meeting(mut self, meeting: Meeting) -> Self {
        self.meeting = MeetingSlot::Scheduled(meeting);
        self
    }

    /// Build from a validated schedule entry
    pub fn from_spec(spec: &SessionSpec) -> Result<Self, MeetingError> {
        let meeting = spec
            .meeting
            .as_ref()
            .map(|m| meeting_from_spec(m, spec.start_time, spec.duration_minutes))
            .transpose()?;

        let mut session = Session::new(
            spec.id.clone(),
            spec.title.clone(),
            spec.start_time,
            spec.duration_minutes,
        )?
        .with_instructor(spec.instructor.clone())
        .with_admin_status(spec.admin_status);
        session.meeting = meeting.into();

        Ok(session)
    }

    /// Scheduled start. Matches the meeting's start once one exists.
    pub fn start_time(&self) -> DateTime<Utc> {
        self.meeting
            .meeting()
            .map_or(self.start_time, Meeting::start_time)
    }

    pub fn duration_minutes(&self) -> u32 {
        self.meeting
            .meeting()
            .map_or(self.duration_minutes, Meeting::duration_minutes)
    }

    /// First instant at which the session is over
    pub fn end_time(&self) -> DateTime<Utc> {
        // Range was checked in `new`
        self.meeting.meeting().map_or_else(
            || self.start_time + chrono::Duration::minutes(i64::from(self.duration_minutes)),
            Meeting::end_time,
        )
    }
}

fn meeting_from_spec(
    spec: &MeetingSpec,
    start_time: DateTime<Utc>,
    duration_minutes: u32,
) -> Result<Meeting, MeetingError> {
    let mut meeting = Meeting::new(start_time, duration_minutes)?.with_lifecycle(spec.lifecycle);
    if let Some(id) = &spec.meeting_id {
        meeting = meeting.with_meeting_id(id.clone());
    }
    if spec.ready {
        meeting = meeting.ready(spec.join_url.clone());
    }
    Ok(meeting)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 18, 0, 0).unwrap()
    }

    #[test]
    fn test_meeting_creation() {
        let meeting = Meeting::new(start(), 60).unwrap();

        assert_eq!(meeting.lifecycle(), LifecycleStatus::Scheduled);
        assert!(!meeting.is_ready());
        assert_eq!(meeting.end_time(), start() + chrono::Duration::minutes(60));
    }

    #[test]
    fn test_zero_duration_rejected() {
        assert_eq!(
            Meeting::new(start(), 0),
            Err(MeetingError::NonPositiveDuration)
        );
        assert!(Session::new(SessionId::new("s"), "S", start(), 0).is_err());
    }

    #[test]
    fn test_end_out_of_range_rejected() {
        let result = Meeting::new(DateTime::<Utc>::MAX_UTC, 1);
        assert!(matches!(result, Err(MeetingError::EndOutOfRange { .. })));
    }

    #[test]
    fn test_ready_sets_join_url() {
        let meeting = Meeting::new(start(), 45)
            .unwrap()
            .ready(Some("https://meet.invalid/j/1".into()));

        assert!(meeting.is_ready());
        assert_eq!(meeting.join_url(), Some("https://meet.invalid/j/1"));
    }

    #[test]
    fn test_session_from_spec() {
        let spec = SessionSpec {
            id: SessionId::new("tajweed-101"),
            title: "Tajweed Basics".into(),
            instructor: "Ustadh Karim".into(),
            admin_status: AdminStatus::Full,
            start_time: start(),
            duration_minutes: 60,
            meeting: Some(MeetingSpec {
                meeting_id: Some(MeetingId::new("84512")),
                lifecycle: LifecycleStatus::Started,
                ready: true,
                join_url: Some("https://meet.invalid/j/84512".into()),
            }),
        };

        let session = Session::from_spec(&spec).unwrap();
        assert_eq!(session.admin_status, AdminStatus::Full);
        let meeting = session.meeting.meeting().unwrap();
        assert_eq!(meeting.lifecycle(), LifecycleStatus::Started);
        assert_eq!(meeting.meeting_id().map(MeetingId::as_str), Some("84512"));
        assert_eq!(session.end_time(), start() + chrono::Duration::minutes(60));
    }

    #[test]
    fn test_slot_from_option() {
        assert_eq!(MeetingSlot::from(None), MeetingSlot::NoMeeting);
        let meeting = Meeting::new(start(), 30).unwrap();
        assert!(MeetingSlot::from(Some(meeting)).meeting().is_some());
    }
}
