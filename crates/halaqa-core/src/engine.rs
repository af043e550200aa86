//! Meeting status engine
//!
//! Maps (now, administrative status, meeting) to the status triple shown on
//! a session card. Rules are checked in order and the first match wins:
//!
//! | status    | when                                   | can join |
//! |-----------|----------------------------------------|----------|
//! | cancelled | admin status is cancelled              | no       |
//! | ended     | meeting lifecycle is ended             | no       |
//! | upcoming  | no meeting yet                         | no       |
//! | upcoming  | now < start - join window              | no       |
//! | ready     | start - join window <= now < start     | yes      |
//! | live      | start <= now < end                     | yes      |
//! | ended     | now >= end                             | no       |
//!
//! Windows are closed-open, so a boundary instant belongs to the later
//! state. `now` is trusted as given.

use chrono::{DateTime, Utc};
use halaqa_api::{AdminStatus, LifecycleStatus, MeetingStatus, StatusKind};
use halaqa_config::EngineConfig;

use crate::{Meeting, MeetingSlot};

const MINUTE_MS: i64 = 60 * 1000;
const HOUR_MS: i64 = 60 * MINUTE_MS;

/// Thresholds used by the engine and the link planner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusPolicy {
    /// How long before start joining opens
    pub join_window: chrono::Duration,
    /// How long before start meeting links get generated
    pub link_lead: chrono::Duration,
}

impl Default for StatusPolicy {
    fn default() -> Self {
        Self {
            join_window: chrono::Duration::minutes(10),
            link_lead: chrono::Duration::minutes(120),
        }
    }
}

impl From<&EngineConfig> for StatusPolicy {
    fn from(config: &EngineConfig) -> Self {
        Self {
            join_window: chrono::Duration::minutes(i64::from(config.join_window_minutes)),
            link_lead: chrono::Duration::minutes(i64::from(config.link_lead_minutes)),
        }
    }
}

/// Compute the status of a session with the default thresholds
pub fn compute_meeting_status(
    now: DateTime<Utc>,
    admin_status: AdminStatus,
    meeting: &MeetingSlot,
) -> MeetingStatus {
    StatusEngine::default().evaluate(now, admin_status, meeting)
}

/// The status engine, holding its thresholds
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusEngine {
    policy: StatusPolicy,
}

impl StatusEngine {
    pub fn new(policy: StatusPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &StatusPolicy {
        &self.policy
    }

    /// Evaluate one session at `now`. Pure; reads its inputs only.
    pub fn evaluate(
        &self,
        now: DateTime<Utc>,
        admin_status: AdminStatus,
        meeting: &MeetingSlot,
    ) -> MeetingStatus {
        if admin_status == AdminStatus::Cancelled {
            return MeetingStatus::new(StatusKind::Cancelled, "Session Cancelled", false);
        }

        let meeting = match meeting {
            MeetingSlot::NoMeeting => {
                return MeetingStatus::new(
                    StatusKind::Upcoming,
                    "Meeting details will be available 1 hour before session",
                    false,
                );
            }
            MeetingSlot::Scheduled(m) => m,
        };

        if meeting.lifecycle() == LifecycleStatus::Ended {
            return MeetingStatus::new(StatusKind::Ended, "Session Ended", false);
        }

        self.evaluate_clock(now, meeting)
    }

    fn evaluate_clock(&self, now: DateTime<Utc>, meeting: &Meeting) -> MeetingStatus {
        let start = meeting.start_time();

        if now < start {
            let until_start = (start - now).num_milliseconds();
            let join_opens = start.checked_sub_signed(self.policy.join_window);

            if join_opens.is_some_and(|opens| now < opens) {
                let hours = ceil_div(until_start, HOUR_MS);
                return MeetingStatus::new(
                    StatusKind::Upcoming,
                    format!("Starts in {}", plural(hours, "hour")),
                    false,
                );
            }

            let minutes = ceil_div(until_start, MINUTE_MS);
            return MeetingStatus::new(
                StatusKind::Ready,
                format!("Starting in {} — You can join now", plural(minutes, "minute")),
                true,
            );
        }

        if now < meeting.end_time() {
            let elapsed = (now - start).num_milliseconds() / MINUTE_MS;
            return MeetingStatus::new(
                StatusKind::Live,
                format!("Live now ({} min elapsed)", elapsed),
                true,
            );
        }

        MeetingStatus::new(StatusKind::Ended, "Session ended", false)
    }
}

/// Ceiling division for a positive numerator
fn ceil_div(n: i64, d: i64) -> i64 {
    (n + d - 1) / d
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {}", unit)
    } else {
        format!("{} {}s", n, unit)
    }
}
