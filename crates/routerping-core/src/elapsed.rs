//! Elapsed-time-in-state: the token embedded in each log line and the
//! accumulator that carries it from one cycle to the next.

use crate::error::{PingError, Result};
use chrono::Duration;
use regex::Regex;
use std::sync::OnceLock;

static ELAPSED_RE: OnceLock<Regex> = OnceLock::new();

fn elapsed_re() -> &'static Regex {
    ELAPSED_RE.get_or_init(|| {
        Regex::new(
            r"^(?:(?P<days>\d+) days?)?\s*(?:(?P<h>\d+):(?P<m>\d{2}):(?P<s>\d{2})(?:\.\d+)?)?$",
        )
        .unwrap()
    })
}

/// Render a duration as `<N> days HH:MM:SS`.
///
/// Sub-second precision is dropped and negative durations render as zero.
pub fn format_elapsed(elapsed: Duration) -> String {
    let total = elapsed.num_seconds().max(0);
    let days = total / 86_400;
    let rem = total % 86_400;
    format!(
        "{days} days {:02}:{:02}:{:02}",
        rem / 3_600,
        (rem % 3_600) / 60,
        rem % 60
    )
}

/// Parse the token written by [`format_elapsed`].
///
/// Also accepts `1 day ...`, a fractional seconds suffix, a bare `HH:MM:SS`
/// and a bare `<N> days`.
pub fn parse_elapsed(text: &str) -> Result<Duration> {
    let trimmed = text.trim();
    let invalid = || PingError::InvalidDuration(trimmed.to_string());

    let caps = elapsed_re().captures(trimmed).ok_or_else(invalid)?;
    if caps.name("days").is_none() && caps.name("h").is_none() {
        return Err(invalid());
    }

    let field = |name: &str| -> Result<i64> {
        match caps.name(name) {
            Some(m) => m.as_str().parse::<i64>().map_err(|_| invalid()),
            None => Ok(0),
        }
    };
    let (days, hours, minutes, seconds) = (field("days")?, field("h")?, field("m")?, field("s")?);
    if minutes >= 60 || seconds >= 60 {
        return Err(invalid());
    }

    days.checked_mul(86_400)
        .and_then(|d| d.checked_add(hours.checked_mul(3_600)?))
        .and_then(|d| d.checked_add(minutes * 60 + seconds))
        .and_then(Duration::try_seconds)
        .ok_or_else(invalid)
}

/// New cumulative time in the current status.
///
/// `since_last_change` is `None` when the status just changed (or there is no
/// previous record); the clock then restarts at zero. Otherwise the whole
/// seconds of `since_last_change` are added. Polls that flap and recover
/// between two probes are invisible here.
pub fn accumulate(previous: Duration, since_last_change: Option<Duration>) -> Duration {
    match since_last_change {
        None => Duration::zero(),
        Some(delta) => {
            let whole = Duration::seconds(delta.num_seconds().max(0));
            previous + whole
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_days_and_clock() {
        assert_eq!(format_elapsed(Duration::zero()), "0 days 00:00:00");
        assert_eq!(format_elapsed(Duration::seconds(3_600)), "0 days 01:00:00");
        assert_eq!(
            format_elapsed(Duration::seconds(86_400 + 3_600 + 61)),
            "1 days 01:01:01"
        );
    }

    #[test]
    fn format_drops_subsecond_and_negative() {
        assert_eq!(
            format_elapsed(Duration::milliseconds(5_999)),
            "0 days 00:00:05"
        );
        assert_eq!(format_elapsed(Duration::seconds(-30)), "0 days 00:00:00");
    }

    #[test]
    fn parses_written_token() {
        let d = Duration::seconds(3 * 86_400 + 7_384);
        assert_eq!(parse_elapsed(&format_elapsed(d)).unwrap(), d);
    }

    #[test]
    fn parses_variants() {
        assert_eq!(
            parse_elapsed("1 day 00:00:10").unwrap(),
            Duration::seconds(86_410)
        );
        assert_eq!(
            parse_elapsed("0 days 00:00:05.250000").unwrap(),
            Duration::seconds(5)
        );
        assert_eq!(parse_elapsed("02:00:00").unwrap(), Duration::seconds(7_200));
        assert_eq!(parse_elapsed("2 days").unwrap(), Duration::seconds(172_800));
        assert_eq!(
            parse_elapsed("  0 days 00:01:00\n").unwrap(),
            Duration::seconds(60)
        );
    }

    #[test]
    fn rejects_prose() {
        assert!(parse_elapsed("").is_err());
        assert!(parse_elapsed("a while").is_err());
        assert!(parse_elapsed("0 days 00:61:00").is_err());
        assert!(parse_elapsed("Status code 200").is_err());
    }

    #[test]
    fn accumulate_resets_without_base() {
        assert_eq!(
            accumulate(Duration::seconds(500), None),
            Duration::zero()
        );
    }

    #[test]
    fn accumulate_truncates_to_whole_seconds() {
        let total = accumulate(Duration::seconds(60), Some(Duration::milliseconds(299_900)));
        assert_eq!(total, Duration::seconds(359));
    }

    #[test]
    fn accumulate_counts_full_days() {
        let total = accumulate(
            Duration::seconds(3_600),
            Some(Duration::seconds(86_400)),
        );
        assert_eq!(total, Duration::seconds(90_000));
    }

    #[test]
    fn accumulate_ignores_backwards_clock() {
        let total = accumulate(Duration::seconds(120), Some(Duration::seconds(-30)));
        assert_eq!(total, Duration::seconds(120));
    }
}
