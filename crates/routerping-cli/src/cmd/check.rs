use super::load_context;
use crate::output::print_json;
use anyhow::Context;
use chrono::Utc;
use routerping_core::cycle::run_cycle;
use routerping_core::elapsed::format_elapsed;
use routerping_core::notify::{Notifier, WebhookNotifier};
use routerping_core::probe::HttpProbe;
use std::path::Path;

pub fn run(config_path: &Path, address: Option<&str>, json: bool) -> anyhow::Result<()> {
    let (config, ctx) = load_context(config_path, address)?;
    let timeout = config.probe_timeout().context("invalid ping_timeout")?;

    let probe = HttpProbe::new(timeout).context("failed to build HTTP client")?;
    let webhook = match config.webhook_url() {
        Some(url) => Some(WebhookNotifier::new(url, timeout).context("failed to build webhook client")?),
        None => None,
    };
    let notifier = webhook.as_ref().map(|w| w as &dyn Notifier);

    let now = Utc::now().with_timezone(&ctx.tz);
    let result = run_cycle(&ctx, &probe, notifier, now)
        .with_context(|| format!("check of {} failed", ctx.address))?;

    if json {
        #[derive(serde::Serialize)]
        struct CheckOutput<'a> {
            address: &'a str,
            log: String,
            timestamp: String,
            previous_status: routerping_core::types::Status,
            status: routerping_core::types::Status,
            outcome: &'a routerping_core::types::ProbeOutcome,
            elapsed: String,
            elapsed_seconds: i64,
            message: &'a str,
            changed: bool,
            notify: bool,
            reason: &'static str,
            delivered: bool,
        }

        print_json(&CheckOutput {
            address: &ctx.address,
            log: ctx.log_path.display().to_string(),
            timestamp: result.record.timestamp.to_rfc3339(),
            previous_status: result.previous.status,
            status: result.record.status,
            outcome: &result.outcome,
            elapsed: format_elapsed(result.record.elapsed),
            elapsed_seconds: result.record.elapsed.num_seconds(),
            message: &result.message,
            changed: result.decision.changed(),
            notify: result.notify(),
            reason: result.decision.reason.as_str(),
            delivered: result.delivered,
        })?;
    } else {
        println!("{}", result.record.to_line());
        if result.notify() && !result.delivered {
            eprintln!("warning: notification was not delivered");
        }
    }

    Ok(())
}
