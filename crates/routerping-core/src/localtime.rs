//! Turning the offset-less timestamps of the log back into instants.
//!
//! Log timestamps are local civil time in the configured zone. Once a year the
//! "fall back" transition repeats an hour, so a timestamp inside that hour maps
//! to two instants. The previous record always precedes the current run, which
//! is what [`resolve_previous`] relies on to pick one.

use crate::error::{PingError, Result};
use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

/// Outcome of mapping a local civil time onto the zone's timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Localized {
    Exact(DateTime<Tz>),
    /// The time occurs twice; `earlier` is the first occurrence.
    Ambiguous {
        earlier: DateTime<Tz>,
        later: DateTime<Tz>,
    },
    /// The time falls in a spring-forward gap.
    Nonexistent,
}

pub fn localize(tz: Tz, naive: NaiveDateTime) -> Localized {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Localized::Exact(dt),
        LocalResult::Ambiguous(earlier, later) => Localized::Ambiguous { earlier, later },
        LocalResult::None => Localized::Nonexistent,
    }
}

/// Resolve the timestamp of the previous record relative to `now`.
///
/// In the repeated hour, `now` is the later anchor and the previous record is
/// taken as the earlier occurrence. If even the earlier occurrence lies after
/// `now`, the ordering the choice depends on is broken and the timestamp cannot
/// be trusted.
pub fn resolve_previous(tz: Tz, naive: NaiveDateTime, now: DateTime<Tz>) -> Result<DateTime<Tz>> {
    match localize(tz, naive) {
        Localized::Exact(dt) => Ok(dt),
        Localized::Ambiguous { earlier, later } => {
            if earlier > now {
                return Err(PingError::AmbiguousTime {
                    naive: naive.to_string(),
                    tz: tz.name().to_string(),
                    reason: format!("both occurrences are after the current time {now}"),
                });
            }
            tracing::debug!(
                %naive,
                resolved = %earlier,
                skipped = %later,
                "resolved ambiguous timestamp to its first occurrence"
            );
            Ok(earlier)
        }
        Localized::Nonexistent => Err(PingError::NonexistentLocalTime {
            naive: naive.to_string(),
            tz: tz.name().to_string(),
        }),
    }
}
