//! Connection test: log in, read versions, log out.

use serde::Serialize;

use crate::cli::GlobalOpts;
use crate::commands::connect;
use crate::config::Resolved;
use crate::error::CliError;
use crate::output;

#[derive(Debug, Serialize)]
struct CheckReport {
    profile: String,
    url: String,
    app_version: String,
    api_version: String,
}

pub async fn handle(resolved: Resolved, global: &GlobalOpts) -> Result<(), CliError> {
    let fetcher = connect(&resolved).await?;
    let versions = fetcher.versions().await;
    fetcher.disconnect().await;
    let (app_version, api_version) = versions?;

    let report = CheckReport {
        profile: resolved.profile_name,
        url: resolved.client.url.to_string(),
        app_version,
        api_version,
    };

    let out = output::render_single(
        &global.output,
        &report,
        |r| {
            format!(
                "Connected to qBittorrent {} (Web API {})\n  Profile: {}\n  URL:     {}",
                r.app_version, r.api_version, r.profile, r.url
            )
        },
        |r| {
            format!(
                "profile={}\nurl={}\napp_version={}\napi_version={}",
                r.profile, r.url, r.app_version, r.api_version
            )
        },
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
