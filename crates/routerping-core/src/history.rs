use crate::error::Result;
use crate::io::last_line;
use crate::record::{RecordLine, StateRecord};
use crate::types::Status;
use chrono::{DateTime, Duration};
use chrono_tz::Tz;
use std::path::Path;

/// What the next cycle needs to know about the last recorded observation.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviousState {
    /// `None` when no record exists yet.
    pub timestamp: Option<DateTime<Tz>>,
    pub status: Status,
    pub elapsed: Duration,
}

impl PreviousState {
    /// State assumed before the first record is written.
    pub fn bootstrap() -> Self {
        Self {
            timestamp: None,
            status: Status::Healthy,
            elapsed: Duration::zero(),
        }
    }

    pub fn is_bootstrap(&self) -> bool {
        self.timestamp.is_none()
    }
}

impl From<StateRecord> for PreviousState {
    fn from(record: StateRecord) -> Self {
        Self {
            timestamp: Some(record.timestamp),
            status: record.status,
            elapsed: record.elapsed,
        }
    }
}

/// Read the last record of the log at `path`.
///
/// Returns the full record, or `None` for a missing or empty log. A last line
/// that cannot be parsed is an error; no state is guessed from it.
pub fn read_last_record(path: &Path, tz: Tz, now: DateTime<Tz>) -> Result<Option<StateRecord>> {
    let Some(line) = last_line(path)? else {
        tracing::debug!(log = %path.display(), "no previous record");
        return Ok(None);
    };
    let record = RecordLine::parse(&line)?.localize(tz, now)?;
    Ok(Some(record))
}

/// Previous timestamp, status and elapsed time, or the bootstrap state.
pub fn read_previous(path: &Path, tz: Tz, now: DateTime<Tz>) -> Result<PreviousState> {
    Ok(read_last_record(path, tz, now)?
        .map(PreviousState::from)
        .unwrap_or_else(PreviousState::bootstrap))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PingError;
    use chrono::{TimeZone, Utc};
    use chrono_tz::America::New_York;
    use tempfile::TempDir;

    fn now() -> DateTime<Tz> {
        New_York.with_ymd_and_hms(2024, 6, 2, 8, 0, 0).unwrap()
    }

    #[test]
    fn absent_log_is_bootstrap() {
        let dir = TempDir::new().unwrap();
        let prev = read_previous(&dir.path().join("router.log"), New_York, now()).unwrap();
        assert_eq!(prev, PreviousState::bootstrap());
        assert!(prev.is_bootstrap());
        assert_eq!(prev.status, Status::Healthy);
        assert_eq!(prev.elapsed, Duration::zero());
    }

    #[test]
    fn empty_log_is_bootstrap() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("router.log");
        std::fs::write(&path, "").unwrap();
        assert_eq!(
            read_previous(&path, New_York, now()).unwrap(),
            PreviousState::bootstrap()
        );
    }

    #[test]
    fn reads_only_the_last_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("router.log");
        std::fs::write(
            &path,
            "garbage that is never read\n\
             2024-06-01 23:00:00,000 | ERROR | Router address 10.0.0.1 is unreachable! | 0 days 01:00:00\n",
        )
        .unwrap();
        let prev = read_previous(&path, New_York, now()).unwrap();
        assert_eq!(prev.status, Status::Unreachable);
        assert_eq!(prev.elapsed, Duration::seconds(3_600));
        assert_eq!(
            prev.timestamp,
            Some(New_York.with_ymd_and_hms(2024, 6, 1, 23, 0, 0).unwrap())
        );
    }

    #[test]
    fn malformed_last_line_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("router.log");
        std::fs::write(
            &path,
            "2024-06-01 23:00:00,000 | INFO | Status code 200 | 0 days 00:00:00\nnot a record\n",
        )
        .unwrap();
        let err = read_previous(&path, New_York, now()).unwrap_err();
        assert!(matches!(err, PingError::MalformedRecord { .. }));
    }

    #[test]
    fn ambiguous_last_timestamp_resolves_to_first_occurrence() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("router.log");
        std::fs::write(
            &path,
            "2024-11-03 01:40:00,000 | INFO | Status code 200 | 0 days 02:00:00\n",
        )
        .unwrap();
        // 01:10 EST, i.e. the second pass through the repeated hour.
        let now = Utc
            .with_ymd_and_hms(2024, 11, 3, 6, 10, 0)
            .unwrap()
            .with_timezone(&New_York);
        let prev = read_previous(&path, New_York, now).unwrap();
        let ts = prev.timestamp.unwrap();
        assert!(ts < now);
        assert_eq!((now - ts).num_minutes(), 30);
    }
}
