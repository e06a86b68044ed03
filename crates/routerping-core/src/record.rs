use crate::elapsed::{format_elapsed, parse_elapsed};
use crate::error::{PingError, Result};
use crate::localtime::resolve_previous;
use crate::types::Status;
use chrono::{DateTime, Duration, NaiveDateTime};
use chrono_tz::Tz;

pub const FIELD_SEPARATOR: &str = " | ";

/// Timestamp layout written into each line (local civil time, no offset).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

// ---------------------------------------------------------------------------
// StateRecord
// ---------------------------------------------------------------------------

/// One observation of the router, as appended to the log.
#[derive(Debug, Clone, PartialEq)]
pub struct StateRecord {
    pub timestamp: DateTime<Tz>,
    pub status: Status,
    pub elapsed: Duration,
    pub message: String,
}

impl StateRecord {
    /// Render as `<timestamp> | <LEVEL> | <message> | <elapsed>`.
    pub fn to_line(&self) -> String {
        [
            self.timestamp.naive_local().format(TIMESTAMP_FORMAT).to_string(),
            self.status.level().to_string(),
            sanitize_message(&self.message),
            format_elapsed(self.elapsed),
        ]
        .join(FIELD_SEPARATOR)
    }
}

/// Strip characters that would break the field layout of a log line.
pub fn sanitize_message(message: &str) -> String {
    message
        .replace('|', "/")
        .replace(['\r', '\n'], " ")
        .trim()
        .to_string()
}

// ---------------------------------------------------------------------------
// RecordLine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum LineTimestamp {
    /// Local civil time in the configured zone; may be ambiguous.
    Naive(NaiveDateTime),
    /// Carries its own UTC offset.
    Offset(DateTime<chrono::FixedOffset>),
}

/// A parsed log line whose timestamp has not been placed in a zone yet.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordLine {
    pub timestamp: LineTimestamp,
    pub status: Status,
    pub message: String,
    pub elapsed: Duration,
}

impl RecordLine {
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let malformed = |reason: &str| PingError::MalformedRecord {
            line: line.to_string(),
            reason: reason.to_string(),
        };

        let mut head = line.splitn(3, FIELD_SEPARATOR);
        let (Some(ts), Some(level), Some(rest)) = (head.next(), head.next(), head.next()) else {
            return Err(malformed("expected 4 fields separated by ' | '"));
        };
        let Some((message, elapsed)) = rest.rsplit_once(FIELD_SEPARATOR) else {
            return Err(malformed("missing elapsed-time field"));
        };

        Ok(Self {
            timestamp: parse_timestamp(ts)?,
            status: Status::from_level(level.trim())?,
            message: message.to_string(),
            elapsed: parse_elapsed(elapsed)?,
        })
    }

    /// Place the timestamp in `tz`, resolving fall-back ambiguity against `now`.
    pub fn localize(self, tz: Tz, now: DateTime<Tz>) -> Result<StateRecord> {
        let timestamp = match self.timestamp {
            LineTimestamp::Naive(naive) => resolve_previous(tz, naive, now)?,
            LineTimestamp::Offset(dt) => dt.with_timezone(&tz),
        };
        Ok(StateRecord {
            timestamp,
            status: self.status,
            elapsed: self.elapsed,
            message: self.message,
        })
    }
}

fn parse_timestamp(text: &str) -> Result<LineTimestamp> {
    let text = text.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(LineTimestamp::Offset(dt));
    }
    for format in [TIMESTAMP_FORMAT, "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(LineTimestamp::Naive(naive));
        }
    }
    Err(PingError::InvalidTimestamp(text.to_string()))
}
