use crate::error::{PingError, Result};
use chrono::DateTime;
use chrono_tz::Tz;
use reqwest::header::ACCEPT;
use std::time::Duration;

/// Delivery of a pre-formatted message. One attempt, no retries.
pub trait Notifier {
    fn notify(&self, text: &str) -> Result<()>;
}

/// Posts `{"text": ...}` to an incoming-webhook URL (Slack style).
pub struct WebhookNotifier {
    url: String,
    client: reqwest::blocking::Client,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

impl Notifier for WebhookNotifier {
    fn notify(&self, text: &str) -> Result<()> {
        let resp = self
            .client
            .post(&self.url)
            .header(ACCEPT, "text/plain")
            .json(&serde_json::json!({ "text": text }))
            .send()?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            return Err(PingError::Notify(format!("{status}: {}", body.trim())));
        }
        Ok(())
    }
}

/// `"2024-05-01 02:05PM": `<message>`` with the datestamp in the configured zone.
pub fn format_notification(now: DateTime<Tz>, message: &str) -> String {
    format!("\"{}\": `{}`", now.format("%Y-%m-%d %I:%M%p"), message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mockito::Matcher;

    #[test]
    fn notification_text_layout() {
        let now = chrono_tz::America::Denver
            .with_ymd_and_hms(2024, 5, 1, 14, 5, 0)
            .unwrap();
        assert_eq!(
            format_notification(now, "Router address 10.0.0.1 is unreachable! | 0 days 00:00:00"),
            "\"2024-05-01 02:05PM\": `Router address 10.0.0.1 is unreachable! | 0 days 00:00:00`"
        );
    }

    #[test]
    fn posts_json_text() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/services/T0/B0/X")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(serde_json::json!({ "text": "hello" })))
            .with_status(200)
            .with_body("ok")
            .create();

        let notifier =
            WebhookNotifier::new(format!("{}/services/T0/B0/X", server.url()), Duration::from_secs(2))
                .unwrap();
        notifier.notify("hello").unwrap();
        mock.assert();
    }

    #[test]
    fn rejected_delivery_is_an_error() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/hook")
            .with_status(404)
            .with_body("no_team")
            .create();

        let notifier =
            WebhookNotifier::new(format!("{}/hook", server.url()), Duration::from_secs(2)).unwrap();
        let err = notifier.notify("hello").unwrap_err();
        assert!(matches!(err, PingError::Notify(ref msg) if msg.contains("no_team")));
    }
}
