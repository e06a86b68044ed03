use crate::error::Result;
use crate::types::ProbeOutcome;
use std::error::Error as StdError;
use std::time::Duration;

/// Source of one probe outcome per cycle.
pub trait Probe {
    fn probe(&self, address: &str) -> ProbeOutcome;
}

/// `GET http://<address>` with a single timeout and no retries.
pub struct HttpProbe {
    client: reqwest::blocking::Client,
}

impl HttpProbe {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Probe for HttpProbe {
    fn probe(&self, address: &str) -> ProbeOutcome {
        let url = probe_url(address);
        match self.client.get(&url).send() {
            Ok(resp) => {
                let code = resp.status().as_u16();
                if resp.status().is_success() {
                    ProbeOutcome::Success { code }
                } else {
                    ProbeOutcome::FailureStatus { code }
                }
            }
            Err(e) if e.is_timeout() => ProbeOutcome::Timeout,
            Err(e) => {
                tracing::debug!(url = %url, error = %e, "probe failed without a response");
                ProbeOutcome::ConnectionError {
                    reason: root_cause(&e),
                }
            }
        }
    }
}

/// Addresses without a scheme are probed over plain HTTP.
pub fn probe_url(address: &str) -> String {
    if address.contains("://") {
        address.to_string()
    } else {
        format!("http://{address}")
    }
}

fn root_cause(err: &(dyn StdError + 'static)) -> String {
    let mut cause = err;
    while let Some(next) = cause.source() {
        cause = next;
    }
    cause.to_string()
}
