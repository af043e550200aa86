//! Events emitted by the session board

use chrono::{DateTime, Utc};
use halaqa_api::StatusKind;
use halaqa_util::{MeetingId, SessionId};

/// Events emitted by the board on each tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreEvent {
    /// A session card changed status (or was evaluated for the first time)
    StatusChanged {
        session_id: SessionId,
        from: Option<StatusKind>,
        to: StatusKind,
        can_join: bool,
        message: String,
    },

    /// Meeting links should be generated for this session now
    LinkGenerationDue {
        session_id: SessionId,
        start_time: DateTime<Utc>,
    },

    /// A provisioned meeting was attached to a session
    MeetingAttached {
        session_id: SessionId,
        meeting_id: MeetingId,
    },
}
