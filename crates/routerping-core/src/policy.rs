use crate::types::Status;
use chrono::{DateTime, Duration};
use chrono_tz::Tz;
use serde::Serialize;

/// Why a notification is (or is not) sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyReason {
    /// Back to healthy after being degraded or unreachable.
    Recovered,
    /// Answering, but not with 200.
    Degraded,
    BecameUnreachable,
    /// Still unreachable on a new calendar day.
    DailyReminder,
    /// Status unchanged; nothing to say.
    Unchanged,
}

impl NotifyReason {
    pub fn as_str(self) -> &'static str {
        match self {
            NotifyReason::Recovered => "recovered",
            NotifyReason::Degraded => "degraded",
            NotifyReason::BecameUnreachable => "became_unreachable",
            NotifyReason::DailyReminder => "daily_reminder",
            NotifyReason::Unchanged => "unchanged",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub notify: bool,
    pub reason: NotifyReason,
    /// Start of the interval to add to the elapsed time. `None` restarts the
    /// clock at zero.
    pub elapsed_base: Option<DateTime<Tz>>,
}

impl Decision {
    pub fn changed(&self) -> bool {
        !matches!(
            self.reason,
            NotifyReason::DailyReminder | NotifyReason::Unchanged
        )
    }

    /// Time since the previous record, when the status held.
    pub fn since_last_change(&self, now: DateTime<Tz>) -> Option<Duration> {
        self.elapsed_base.map(|base| now - base)
    }
}

/// Decide whether this cycle notifies and whether the elapsed clock restarts.
///
/// Any change of status is announced. A status that stays `Unreachable` is
/// re-announced once per calendar day in the configured zone. Without a
/// previous record the state is taken to have been `Healthy`, so a first
/// healthy probe is not a change and stays quiet.
pub fn evaluate(
    previous: Status,
    current: Status,
    previous_timestamp: Option<DateTime<Tz>>,
    now: DateTime<Tz>,
) -> Decision {
    if previous != current {
        let reason = match current {
            Status::Healthy => NotifyReason::Recovered,
            Status::Degraded => NotifyReason::Degraded,
            Status::Unreachable => NotifyReason::BecameUnreachable,
        };
        return Decision {
            notify: true,
            reason,
            elapsed_base: None,
        };
    }

    let reminder = current == Status::Unreachable
        && previous_timestamp.is_some_and(|ts| ts.date_naive() != now.date_naive());

    Decision {
        notify: reminder,
        reason: if reminder {
            NotifyReason::DailyReminder
        } else {
            NotifyReason::Unchanged
        },
        elapsed_base: previous_timestamp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::Europe::Berlin;

    fn at(d: u32, h: u32) -> DateTime<Tz> {
        Berlin.with_ymd_and_hms(2024, 4, d, h, 0, 0).unwrap()
    }

    #[test]
    fn recovery_always_notifies() {
        for prev in [Status::Degraded, Status::Unreachable] {
            let d = evaluate(prev, Status::Healthy, Some(at(1, 10)), at(1, 11));
            assert!(d.notify);
            assert_eq!(d.reason, NotifyReason::Recovered);
            assert_eq!(d.elapsed_base, None);
        }
    }

    #[test]
    fn leaving_healthy_notifies() {
        let d = evaluate(Status::Healthy, Status::Degraded, Some(at(1, 10)), at(1, 11));
        assert!(d.notify);
        assert_eq!(d.reason, NotifyReason::Degraded);
        assert!(d.changed());

        let d = evaluate(Status::Healthy, Status::Unreachable, Some(at(1, 10)), at(1, 11));
        assert!(d.notify);
        assert_eq!(d.reason, NotifyReason::BecameUnreachable);
    }

    #[test]
    fn degraded_to_unreachable_notifies_same_day() {
        let d = evaluate(Status::Degraded, Status::Unreachable, Some(at(1, 10)), at(1, 11));
        assert!(d.notify);
        assert_eq!(d.reason, NotifyReason::BecameUnreachable);
        assert_eq!(d.elapsed_base, None);
    }

    #[test]
    fn unreachable_to_degraded_notifies() {
        let d = evaluate(Status::Unreachable, Status::Degraded, Some(at(1, 10)), at(1, 11));
        assert!(d.notify);
        assert_eq!(d.reason, NotifyReason::Degraded);
    }

    #[test]
    fn bootstrap_healthy_is_quiet() {
        let d = evaluate(Status::Healthy, Status::Healthy, None, at(1, 11));
        assert!(!d.notify);
        assert_eq!(d.reason, NotifyReason::Unchanged);
        assert_eq!(d.since_last_change(at(1, 11)), None);
    }

    #[test]
    fn bootstrap_unreachable_notifies() {
        let d = evaluate(Status::Healthy, Status::Unreachable, None, at(1, 11));
        assert!(d.notify);
        assert_eq!(d.reason, NotifyReason::BecameUnreachable);
    }

    #[test]
    fn stable_states_are_quiet_and_accumulate() {
        for status in [Status::Healthy, Status::Degraded] {
            let d = evaluate(status, status, Some(at(1, 10)), at(2, 11));
            assert!(!d.notify);
            assert!(!d.changed());
            assert_eq!(d.since_last_change(at(2, 11)), Some(Duration::hours(25)));
        }
    }

    #[test]
    fn unreachable_reminds_once_per_day() {
        let same_day = evaluate(
            Status::Unreachable,
            Status::Unreachable,
            Some(at(1, 10)),
            at(1, 23),
        );
        assert!(!same_day.notify);
        assert_eq!(same_day.elapsed_base, Some(at(1, 10)));

        let next_day = evaluate(
            Status::Unreachable,
            Status::Unreachable,
            Some(at(1, 23)),
            at(2, 0),
        );
        assert!(next_day.notify);
        assert_eq!(next_day.reason, NotifyReason::DailyReminder);
        assert!(!next_day.changed());
        assert_eq!(next_day.since_last_change(at(2, 0)), Some(Duration::hours(1)));
    }

    #[test]
    fn reminder_uses_local_dates() {
        // 23:30 and 00:30 Berlin time straddle local midnight but share a UTC date.
        let prev = Berlin.with_ymd_and_hms(2024, 1, 10, 23, 30, 0).unwrap();
        let now = Berlin.with_ymd_and_hms(2024, 1, 11, 0, 30, 0).unwrap();
        assert_eq!(
            prev.naive_utc().date(),
            now.naive_utc().date()
        );
        let d = evaluate(Status::Unreachable, Status::Unreachable, Some(prev), now);
        assert!(d.notify);
    }
}
