//! Link generation planning
//!
//! Meeting links are generated by an external provider a fixed lead time
//! before each session starts. Planning is pure; provisioning goes
//! through the [`MeetingProvider`] contract.

use chrono::{DateTime, Utc};
use halaqa_api::{AdminStatus, LifecycleStatus};
use halaqa_provider_api::{MeetingProvider, MeetingRequest, ProviderResult, ProvisionedMeeting};
use halaqa_util::SessionId;
use tracing::{info, warn};

use crate::{MeetingSlot, Session, StatusPolicy};

/// When the link generation job for a session starting at `start` runs
pub fn link_generation_due_at(start: DateTime<Utc>, lead: chrono::Duration) -> DateTime<Utc> {
    start.checked_sub_signed(lead).unwrap_or(DateTime::<Utc>::MIN_UTC)
}

/// Whether a session still lacks usable join links
pub fn needs_link(session: &Session) -> bool {
    if matches!(
        session.admin_status,
        AdminStatus::Cancelled | AdminStatus::Ended
    ) {
        return false;
    }

    match &session.meeting {
        MeetingSlot::NoMeeting => true,
        MeetingSlot::Scheduled(m) => !m.is_ready() && m.lifecycle() != LifecycleStatus::Ended,
    }
}

/// Whether the link job for `session` should run at `now`
pub fn is_link_generation_due(now: DateTime<Utc>, session: &Session, policy: &StatusPolicy) -> bool {
    needs_link(session)
        && now >= link_generation_due_at(session.start_time(), policy.link_lead)
        && now < session.end_time()
}

/// Sessions whose link job is due at `now`, in schedule order
pub fn plan_link_generation(
    now: DateTime<Utc>,
    sessions: &[Session],
    policy: &StatusPolicy,
) -> Vec<SessionId> {
    sessions
        .iter()
        .filter(|s| is_link_generation_due(now, s, policy))
        .map(|s| s.id.clone())
        .collect()
}

impl Session {
    /// Request sent to the meeting provider for this session
    pub fn meeting_request(&self) -> MeetingRequest {
        MeetingRequest {
            session_id: self.id.clone(),
            topic: self.title.clone(),
            instructor: self.instructor.clone(),
            start_time: self.start_time(),
            duration_minutes: self.duration_minutes(),
        }
    }
}

/// Ask the provider for links for one session
pub async fn provision_meeting(
    provider: &dyn MeetingProvider,
    session: &Session,
) -> ProviderResult<ProvisionedMeeting> {
    let request = session.meeting_request();

    match provider.create_meeting(&request).await {
        Ok(meeting) => {
            info!(
                session_id = %session.id,
                meeting_id = %meeting.meeting_id,
                "Meeting links generated"
            );
            Ok(meeting)
        }
        Err(e) => {
            warn!(session_id = %session.id, error = %e, "Meeting link generation failed");
            Err(e)
        }
    }
}
