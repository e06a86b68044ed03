use crate::error::{PingError, Result};
use crate::types::{ProbeOutcome, Status};

/// Maps a probe outcome to a [`Status`].
///
/// Failures other than a timeout (DNS, refused connection, reset) are not
/// timeouts but did not produce an HTTP answer either; `network_errors` decides
/// which status they count as. A failed connection is never healthy, so
/// `network_errors` is `Degraded` or `Unreachable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classifier {
    network_errors: Status,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            network_errors: Status::Unreachable,
        }
    }
}

impl Classifier {
    pub fn new(network_errors: Status) -> Result<Self> {
        if network_errors == Status::Healthy {
            return Err(PingError::InvalidConfig(
                "network_errors must be 'degraded' or 'unreachable', not 'healthy'".to_string(),
            ));
        }
        Ok(Self { network_errors })
    }

    pub fn classify(&self, outcome: &ProbeOutcome) -> Status {
        match outcome {
            ProbeOutcome::Success { code: 200 } => Status::Healthy,
            ProbeOutcome::Success { .. } | ProbeOutcome::FailureStatus { .. } => Status::Degraded,
            ProbeOutcome::Timeout => Status::Unreachable,
            ProbeOutcome::ConnectionError { .. } => self.network_errors,
        }
    }
}
