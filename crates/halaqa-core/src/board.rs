//! Session board
//!
//! Holds the schedule and re-runs the status engine for every session each
//! time the caller ticks it. The board never reads the clock.

use chrono::{DateTime, Utc};
use halaqa_api::{AdminStatus, BoardSnapshot, LifecycleStatus, SessionView, StatusKind};
use halaqa_config::Schedule;
use halaqa_provider_api::ProvisionedMeeting;
use halaqa_util::{HalaqaError, SessionId};
use tracing::{debug, info};

use crate::{
    CoreEvent, Meeting, MeetingError, MeetingSlot, Session, StatusEngine, StatusPolicy,
    is_link_generation_due,
};

#[derive(Debug)]
struct TrackedSession {
    session: Session,
    last_status: Option<StatusKind>,
    link_requested: bool,
}

/// All sessions on display, with the last status reported for each
#[derive(Debug)]
pub struct StatusBoard {
    engine: StatusEngine,
    sessions: Vec<TrackedSession>,
}

impl StatusBoard {
    pub fn new(engine: StatusEngine, sessions: Vec<Session>) -> Self {
        info!(session_count = sessions.len(), "Status board initialized");

        Self {
            engine,
            sessions: sessions
                .into_iter()
                .map(|session| TrackedSession {
                    session,
                    last_status: None,
                    link_requested: false,
                })
                .collect(),
        }
    }

    /// Build a board from a validated schedule
    pub fn from_schedule(schedule: &Schedule) -> Result<Self, MeetingError> {
        let sessions = schedule
            .sessions
            .iter()
            .map(Session::from_spec)
            .collect::<Result<Vec<_>, _>>()?;

        let engine = StatusEngine::new(StatusPolicy::from(&schedule.engine));
        Ok(Self::new(engine, sessions))
    }

    pub fn engine(&self) -> &StatusEngine {
        &self.engine
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn sessions(&self) -> impl Iterator<Item = &Session> {
        self.sessions.iter().map(|t| &t.session)
    }

    pub fn get(&self, id: &SessionId) -> Option<&Session> {
        self.sessions
            .iter()
            .find(|t| &t.session.id == id)
            .map(|t| &t.session)
    }

    fn tracked_mut(&mut self, id: &SessionId) -> halaqa_util::Result<&mut TrackedSession> {
        self.sessions
            .iter_mut()
            .find(|t| &t.session.id == id)
            .ok_or_else(|| HalaqaError::SessionNotFound(id.clone()))
    }

    /// Evaluate every session at `now`.
    ///
    /// Emits `StatusChanged` on first evaluation and on every change of
    /// status kind, and `LinkGenerationDue` once per pending link job.
    pub fn tick(&mut self, now: DateTime<Utc>) -> Vec<CoreEvent> {
        let mut events = Vec::new();
        let policy = *self.engine.policy();

        for tracked in &mut self.sessions {
            let session = &tracked.session;
            let status = self
                .engine
                .evaluate(now, session.admin_status, &session.meeting);

            if tracked.last_status != Some(status.status) {
                debug!(
                    session_id = %session.id,
                    from = ?tracked.last_status,
                    to = %status.status,
                    "Session status changed"
                );

                events.push(CoreEvent::StatusChanged {
                    session_id: session.id.clone(),
                    from: tracked.last_status,
                    to: status.status,
                    can_join: status.can_join,
                    message: status.message,
                });
                tracked.last_status = Some(status.status);
            }

            if !tracked.link_requested && is_link_generation_due(now, session, &policy) {
                info!(
                    session_id = %session.id,
                    start_time = %session.start_time(),
                    "Link generation due"
                );

                events.push(CoreEvent::LinkGenerationDue {
                    session_id: session.id.clone(),
                    start_time: session.start_time(),
                });
                tracked.link_requested = true;
            }
        }

        events
    }

    /// Install links returned by the provider
    pub fn attach_meeting(
        &mut self,
        id: &SessionId,
        provisioned: ProvisionedMeeting,
    ) -> halaqa_util::Result<CoreEvent> {
        let tracked = self.tracked_mut(id)?;
        let session = &mut tracked.session;

        let lifecycle = session
            .meeting
            .meeting()
            .map_or(LifecycleStatus::Scheduled, Meeting::lifecycle);

        let meeting = Meeting::new(session.start_time(), session.duration_minutes())
            .map_err(|e| HalaqaError::validation(e.to_string()))?
            .with_meeting_id(provisioned.meeting_id.clone())
            .with_lifecycle(lifecycle)
            .ready(Some(provisioned.join_url));

        session.meeting = MeetingSlot::Scheduled(meeting);
        tracked.link_requested = false;

        info!(
            session_id = %id,
            meeting_id = %provisioned.meeting_id,
            "Meeting attached"
        );

        Ok(CoreEvent::MeetingAttached {
            session_id: id.clone(),
            meeting_id: provisioned.meeting_id,
        })
    }

    /// Make a failed link job eligible again on the next tick
    pub fn release_link_job(&mut self, id: &SessionId) -> halaqa_util::Result<()> {
        self.tracked_mut(id)?.link_requested = false;
        Ok(())
    }

    /// Apply an instructor/admin status change
    pub fn set_admin_status(
        &mut self,
        id: &SessionId,
        status: AdminStatus,
    ) -> halaqa_util::Result<()> {
        let tracked = self.tracked_mut(id)?;
        info!(session_id = %id, from = %tracked.session.admin_status, to = %status, "Admin status set");
        tracked.session.admin_status = status;
        Ok(())
    }

    /// Apply a lifecycle change reported by the meeting provider
    pub fn set_lifecycle(
        &mut self,
        id: &SessionId,
        lifecycle: LifecycleStatus,
    ) -> halaqa_util::Result<()> {
        let tracked = self.tracked_mut(id)?;
        let meeting = tracked.session.meeting.meeting_mut().ok_or_else(|| {
            HalaqaError::validation(format!("session {} has no meeting", id))
        })?;

        *meeting = meeting.clone().with_lifecycle(lifecycle);
        Ok(())
    }

    /// Status cards for every session at `now`. Does not change what
    /// `tick` considers already reported.
    pub fn snapshot(&self, now: DateTime<Utc>) -> BoardSnapshot {
        let sessions = self
            .sessions
            .iter()
            .map(|t| {
                let session = &t.session;
                let status = self
                    .engine
                    .evaluate(now, session.admin_status, &session.meeting);
                let join_url = if status.can_join {
                    session
                        .meeting
                        .meeting()
                        .and_then(Meeting::join_url)
                        .map(str::to_string)
                } else {
                    None
                };

                SessionView {
                    session_id: session.id.clone(),
                    title: session.title.clone(),
                    instructor: session.instructor.clone(),
                    start_time: session.start_time(),
                    duration_minutes: session.duration_minutes(),
                    admin_status: session.admin_status,
                    status,
                    join_url,
                }
            })
            .collect();

        BoardSnapshot {
            evaluated_at: now,
            sessions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use halaqa_util::MeetingId;

    fn t() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 18, 0, 0).unwrap()
    }

    fn make_board() -> StatusBoard {
        let with_link = Session::new(SessionId::new("tajweed"), "Tajweed Basics", t(), 60)
            .unwrap()
            .with_meeting(
                Meeting::new(t(), 60)
                    .unwrap()
                    .ready(Some("https://meet.invalid/j/1".into())),
            );
        let without_link =
            Session::new(SessionId::new("hifz"), "Hifz Circle", t() + Duration::hours(3), 45)
                .unwrap();

        StatusBoard::new(StatusEngine::default(), vec![with_link, without_link])
    }

    fn provisioned(id: &str) -> ProvisionedMeeting {
        ProvisionedMeeting {
            meeting_id: MeetingId::new(id),
            join_url: format!("https://meet.invalid/j/{}", id),
            start_url: format!("https://meet.invalid/s/{}", id),
        }
    }

    fn status_changes(events: &[CoreEvent]) -> Vec<(SessionId, StatusKind)> {
        events
            .iter()
            .filter_map(|e| match e {
                CoreEvent::StatusChanged { session_id, to, .. } => {
                    Some((session_id.clone(), *to))
                }
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_first_tick_reports_every_session() {
        let mut board = make_board();
        let events = board.tick(t() - Duration::hours(4));

        assert_eq!(
            status_changes(&events),
            vec![
                (SessionId::new("tajweed"), StatusKind::Upcoming),
                (SessionId::new("hifz"), StatusKind::Upcoming),
            ]
        );
    }

    #[test]
    fn test_unchanged_status_is_silent() {
        let mut board = make_board();
        board.tick(t() - Duration::hours(4));

        let events = board.tick(t() - Duration::hours(4) + Duration::seconds(1));
        assert!(events.is_empty());
    }

    #[test]
    fn test_transition_emits_once() {
        let mut board = make_board();
        board.tick(t() - Duration::minutes(11));

        let events = board.tick(t() - Duration::minutes(10));
        assert_eq!(
            status_changes(&events),
            vec![(SessionId::new("tajweed"), StatusKind::Ready)]
        );
        match &events[0] {
            CoreEvent::StatusChanged { from, can_join, .. } => {
                assert_eq!(*from, Some(StatusKind::Upcoming));
                assert!(*can_join);
            }
            other => panic!("unexpected event {:?}", other),
        }

        assert!(board.tick(t() - Duration::minutes(9)).is_empty());
    }

    #[test]
    fn test_link_generation_due_once() {
        let mut board = make_board();
        // hifz starts at t + 3h, so its link job is due from t + 1h
        let due = t() + Duration::hours(1);

        let events = board.tick(due - Duration::seconds(1));
        assert!(!events
            .iter()
            .any(|e| matches!(e, CoreEvent::LinkGenerationDue { .. })));

        let events = board.tick(due);
        assert!(events.contains(&CoreEvent::LinkGenerationDue {
            session_id: SessionId::new("hifz"),
            start_time: t() + Duration::hours(3),
        }));

        let events = board.tick(due + Duration::seconds(1));
        assert!(!events
            .iter()
            .any(|e| matches!(e, CoreEvent::LinkGenerationDue { .. })));
    }

    #[test]
    fn test_release_link_job_retries() {
        let mut board = make_board();
        let hifz = SessionId::new("hifz");
        let due = t() + Duration::hours(1);
        board.tick(due);

        board.release_link_job(&hifz).unwrap();
        let events = board.tick(due + Duration::seconds(1));
        assert!(events
            .iter()
            .any(|e| matches!(e, CoreEvent::LinkGenerationDue { .. })));
    }

    #[test]
    fn test_attach_meeting_makes_session_joinable() {
        let mut board = make_board();
        let hifz = SessionId::new("hifz");
        let start = t() + Duration::hours(3);

        let before = board.snapshot(start - Duration::minutes(5));
        assert!(!before.sessions[1].status.can_join);

        let event = board.attach_meeting(&hifz, provisioned("77")).unwrap();
        assert_eq!(
            event,
            CoreEvent::MeetingAttached {
                session_id: hifz.clone(),
                meeting_id: MeetingId::new("77"),
            }
        );

        let after = board.snapshot(start - Duration::minutes(5));
        let card = &after.sessions[1];
        assert_eq!(card.status.status, StatusKind::Ready);
        assert_eq!(card.join_url.as_deref(), Some("https://meet.invalid/j/77"));
        assert!(board.get(&hifz).unwrap().meeting.meeting().unwrap().is_ready());
    }

    #[test]
    fn test_attach_unknown_session() {
        let mut board = make_board();
        let result = board.attach_meeting(&SessionId::new("nope"), provisioned("1"));
        assert!(matches!(result, Err(HalaqaError::SessionNotFound(_))));
    }

    #[test]
    fn test_admin_cancellation_overrides() {
        let mut board = make_board();
        let tajweed = SessionId::new("tajweed");
        board.tick(t() + Duration::minutes(5));

        board.set_admin_status(&tajweed, AdminStatus::Cancelled).unwrap();
        let events = board.tick(t() + Duration::minutes(6));
        assert_eq!(
            status_changes(&events),
            vec![(tajweed, StatusKind::Cancelled)]
        );
    }

    #[test]
    fn test_lifecycle_ended_overrides() {
        let mut board = make_board();
        let tajweed = SessionId::new("tajweed");

        board.set_lifecycle(&tajweed, LifecycleStatus::Ended).unwrap();
        let snapshot = board.snapshot(t() + Duration::minutes(5));
        assert_eq!(snapshot.sessions[0].status.status, StatusKind::Ended);
        assert_eq!(snapshot.sessions[0].status.message, "Session Ended");

        // hifz has no meeting to end
        assert!(board.set_lifecycle(&SessionId::new("hifz"), LifecycleStatus::Ended).is_err());
    }

    #[test]
    fn test_snapshot_hides_join_url_until_joinable() {
        let board = make_board();

        let early = board.snapshot(t() - Duration::hours(1));
        assert_eq!(early.sessions[0].join_url, None);

        let live = board.snapshot(t() + Duration::minutes(1));
        assert_eq!(
            live.sessions[0].join_url.as_deref(),
            Some("https://meet.invalid/j/1")
        );
        assert_eq!(live.evaluated_at, t() + Duration::minutes(1));
    }

    #[test]
    fn test_from_schedule() {
        let schedule = halaqa_config::parse_config(
            r#"
            config_version = 1

            [engine]
            join_window_minutes = 15

            [[sessions]]
            id = "arabic-1"
            title = "Quranic Arabic"
            start_time = "2026-10-17T18:00:00Z"
            duration_minutes = 90

            [sessions.meeting]
            ready = true
            "#,
        )
        .unwrap();

        let board = StatusBoard::from_schedule(&schedule).unwrap();
        assert_eq!(board.len(), 1);
        assert_eq!(board.engine().policy().join_window, Duration::minutes(15));

        let snapshot = board.snapshot(t() - Duration::minutes(14));
        assert_eq!(snapshot.sessions[0].status.status, StatusKind::Ready);
    }
}
