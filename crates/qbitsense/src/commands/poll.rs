//! One-shot poll.

use qbitsense_core::Poller;
use tracing::debug;

use crate::cli::{GlobalOpts, PollArgs};
use crate::commands::{connect, filter_readings, select_kinds};
use crate::config::Resolved;
use crate::error::CliError;
use crate::output;

pub async fn handle(args: PollArgs, resolved: Resolved, global: &GlobalOpts) -> Result<(), CliError> {
    let kinds = select_kinds(&args.sensor)?;

    let fetcher = connect(&resolved).await?;
    let poller = Poller::new(fetcher, &resolved.client.identity);

    let outcome = poller.poll_once().await;
    poller.fetcher().disconnect().await;
    let metrics = outcome.into_result()?;
    debug!(?metrics, "poll complete");

    let readings = filter_readings(poller.sensors().readings(), &kinds);
    let out = output::render_readings(&global.output, &readings)?;
    output::print_output(&out, global.quiet);
    Ok(())
}
