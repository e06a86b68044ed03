use crate::classifier::Classifier;
use crate::elapsed::{accumulate, format_elapsed};
use crate::error::Result;
use crate::history::{read_previous, PreviousState};
use crate::io::append_line;
use crate::notify::{format_notification, Notifier};
use crate::policy::{evaluate, Decision};
use crate::probe::Probe;
use crate::record::{sanitize_message, StateRecord};
use crate::types::{ProbeOutcome, Status};
use chrono::DateTime;
use chrono_tz::Tz;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// CycleContext
// ---------------------------------------------------------------------------

/// Everything one run needs to know about its target.
#[derive(Debug, Clone)]
pub struct CycleContext {
    pub address: String,
    pub tz: Tz,
    pub log_path: PathBuf,
    pub classifier: Classifier,
}

// ---------------------------------------------------------------------------
// CycleResult (output)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CycleResult {
    pub previous: PreviousState,
    pub outcome: ProbeOutcome,
    pub decision: Decision,
    /// The record appended to the log.
    pub record: StateRecord,
    /// Status message followed by the elapsed token; the text that is notified.
    pub message: String,
    /// Whether a notification was handed off and accepted.
    pub delivered: bool,
}

impl CycleResult {
    pub fn notify(&self) -> bool {
        self.decision.notify
    }
}

// ---------------------------------------------------------------------------
// run_cycle
// ---------------------------------------------------------------------------

/// Probe once, record the result, and notify if the policy asks for it.
///
/// Errors reading the previous record abort the run before anything is
/// written. A failed notification is logged and does not fail the run; the
/// appended record stands.
pub fn run_cycle(
    ctx: &CycleContext,
    probe: &dyn Probe,
    notifier: Option<&dyn Notifier>,
    now: DateTime<Tz>,
) -> Result<CycleResult> {
    let previous = read_previous(&ctx.log_path, ctx.tz, now)?;
    if previous.is_bootstrap() {
        tracing::debug!(log = %ctx.log_path.display(), "starting new log");
    }

    let outcome = probe.probe(&ctx.address);
    let status = ctx.classifier.classify(&outcome);
    let decision = evaluate(previous.status, status, previous.timestamp, now);

    let since = decision.since_last_change(now);
    if since.is_some_and(|d| d < chrono::Duration::zero()) {
        tracing::warn!(
            previous = ?previous.timestamp,
            %now,
            "previous record is in the future; elapsed time not advanced"
        );
    }
    let elapsed = accumulate(previous.elapsed, since);

    let record = StateRecord {
        timestamp: now,
        status,
        elapsed,
        message: status_message(&ctx.address, &outcome, status, previous.status),
    };
    append_line(&ctx.log_path, &record.to_line())?;

    let message = format!("{} | {}", record.message, format_elapsed(elapsed));
    tracing::info!(
        address = %ctx.address,
        status = %status,
        previous = %previous.status,
        elapsed = %format_elapsed(elapsed),
        notify = decision.notify,
        reason = decision.reason.as_str(),
        "cycle recorded"
    );

    let delivered = if decision.notify {
        deliver(notifier, &format_notification(now, &message))
    } else {
        false
    };

    Ok(CycleResult {
        previous,
        outcome,
        decision,
        record,
        message,
        delivered,
    })
}

fn deliver(notifier: Option<&dyn Notifier>, text: &str) -> bool {
    let Some(notifier) = notifier else {
        tracing::info!(text, "no webhook configured; notification not sent");
        return false;
    };
    match notifier.notify(text) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "notification delivery failed");
            false
        }
    }
}

/// Human-readable part of the record, without the elapsed token.
pub fn status_message(address: &str, outcome: &ProbeOutcome, status: Status, previous: Status) -> String {
    let text = match outcome {
        ProbeOutcome::Success { code } | ProbeOutcome::FailureStatus { code } => {
            if status == Status::Healthy && previous != Status::Healthy {
                format!("Status code {code}: Router address {address} is now reachable!")
            } else {
                format!("Status code {code}")
            }
        }
        ProbeOutcome::Timeout => format!("Router address {address} is unreachable!"),
        ProbeOutcome::ConnectionError { reason } => match status {
            Status::Unreachable => format!("Router address {address} is unreachable! ({reason})"),
            _ => format!("Router address {address} could not be reached ({reason})"),
        },
    };
    sanitize_message(&text)
}
