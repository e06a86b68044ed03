use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Reachability of the monitored router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Answered with HTTP 200. Also the assumed state before any record exists.
    #[default]
    Healthy,
    /// Answered, but not with HTTP 200.
    Degraded,
    /// Did not answer in time.
    Unreachable,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Healthy => "healthy",
            Status::Degraded => "degraded",
            Status::Unreachable => "unreachable",
        }
    }

    /// Level name written into the log line for this status.
    pub fn level(self) -> &'static str {
        match self {
            Status::Healthy => "INFO",
            Status::Degraded => "WARNING",
            Status::Unreachable => "ERROR",
        }
    }

    pub fn from_level(level: &str) -> crate::Result<Self> {
        match level {
            "INFO" => Ok(Status::Healthy),
            "WARNING" => Ok(Status::Degraded),
            "ERROR" => Ok(Status::Unreachable),
            _ => Err(crate::error::PingError::InvalidLevel(level.to_string())),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Status {
    type Err = crate::error::PingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "healthy" => Ok(Status::Healthy),
            "degraded" => Ok(Status::Degraded),
            "unreachable" => Ok(Status::Unreachable),
            _ => Err(crate::error::PingError::InvalidConfig(format!(
                "unknown status '{s}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// ProbeOutcome
// ---------------------------------------------------------------------------

/// Result of a single HTTP probe against the router.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProbeOutcome {
    /// A 2xx response.
    Success { code: u16 },
    /// Any other HTTP response.
    FailureStatus { code: u16 },
    /// No response within the configured timeout.
    Timeout,
    /// The request failed before any response (DNS, refused, reset).
    ConnectionError { reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_roundtrip() {
        for status in [Status::Healthy, Status::Degraded, Status::Unreachable] {
            assert_eq!(Status::from_level(status.level()).unwrap(), status);
        }
    }

    #[test]
    fn unknown_level_is_rejected() {
        assert!(Status::from_level("DEBUG").is_err());
        assert!(Status::from_level("info").is_err());
    }

    #[test]
    fn status_from_str() {
        assert_eq!("degraded".parse::<Status>().unwrap(), Status::Degraded);
        assert!("offline".parse::<Status>().is_err());
    }

    #[test]
    fn default_status_is_healthy() {
        assert_eq!(Status::default(), Status::Healthy);
    }
}
