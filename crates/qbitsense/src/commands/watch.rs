//! Continuous polling until Ctrl-C.
//!
//! Every cycle that touches the sensor set prints the full (or filtered)
//! reading list again. With `json-compact` that is one JSON array per
//! line, suitable for piping.

use qbitsense_core::Poller;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::cli::{GlobalOpts, OutputFormat, WatchArgs};
use crate::commands::{connect, filter_readings, select_kinds};
use crate::config::Resolved;
use crate::error::CliError;
use crate::output;

pub async fn handle(args: WatchArgs, resolved: Resolved, global: &GlobalOpts) -> Result<(), CliError> {
    let kinds = select_kinds(&args.sensor)?;
    let period = args.interval.unwrap_or(resolved.client.poll_interval);
    let color = output::should_color(&global.color);

    let fetcher = connect(&resolved).await?;
    let poller = Poller::new(fetcher, &resolved.client.identity);
    let mut updates = poller.subscribe();

    let cancel = CancellationToken::new();
    let task = poller.spawn(period, cancel.clone());
    info!(
        interval = %humantime::format_duration(period),
        "watching {}", resolved.client.url
    );

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let set = updates.borrow_and_update().clone();
                if matches!(global.output, OutputFormat::Table) && !global.quiet {
                    eprintln!("{}", output::status_line(&set, color));
                }
                let readings = filter_readings(set.readings(), &kinds);
                let out = output::render_readings(&global.output, &readings)?;
                output::print_output(&out, global.quiet);
            }
        }
    }

    cancel.cancel();
    if let Err(e) = task.await {
        warn!(error = %e, "poll task ended abnormally");
    }
    poller.fetcher().disconnect().await;
    Ok(())
}
