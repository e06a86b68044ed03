use super::load_context;
use crate::output::{print_fields, print_json};
use anyhow::Context;
use chrono::Utc;
use routerping_core::elapsed::format_elapsed;
use routerping_core::history::read_last_record;
use std::path::Path;

pub fn run(config_path: &Path, address: Option<&str>, json: bool) -> anyhow::Result<()> {
    let (_config, ctx) = load_context(config_path, address)?;
    let now = Utc::now().with_timezone(&ctx.tz);

    let last = read_last_record(&ctx.log_path, ctx.tz, now)
        .with_context(|| format!("failed to read {}", ctx.log_path.display()))?;

    if json {
        let value = match &last {
            Some(r) => serde_json::json!({
                "address": ctx.address,
                "log": ctx.log_path.display().to_string(),
                "recorded": true,
                "timestamp": r.timestamp.to_rfc3339(),
                "status": r.status,
                "elapsed": format_elapsed(r.elapsed),
                "elapsed_seconds": r.elapsed.num_seconds(),
                "message": r.message,
            }),
            None => serde_json::json!({
                "address": ctx.address,
                "log": ctx.log_path.display().to_string(),
                "recorded": false,
                "status": routerping_core::types::Status::default(),
                "elapsed_seconds": 0,
            }),
        };
        print_json(&value)?;
        return Ok(());
    }

    match last {
        None => println!(
            "No records yet for {} ({}). Assuming healthy.",
            ctx.address,
            ctx.log_path.display()
        ),
        Some(r) => print_fields(&[
            ("Address", ctx.address.clone()),
            ("Status", r.status.to_string()),
            ("Since", format_elapsed(r.elapsed)),
            ("Last check", r.timestamp.format("%Y-%m-%d %H:%M:%S %Z").to_string()),
            ("Message", r.message),
            ("Log", ctx.log_path.display().to_string()),
        ]),
    }

    Ok(())
}
