//! Flag-aware profile resolution.
//!
//! `qbitsense-config` turns a stored profile into a `ClientConfig`; this
//! module layers the global CLI flags on top. Flags beat the profile,
//! the profile beats `[defaults]`.

use qbitsense_config::{Config, Profile, config_path, load_config, profile_to_client_config};
use qbitsense_core::ClientConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// A ready-to-use client configuration and the profile it came from.
#[derive(Debug)]
pub struct Resolved {
    pub profile_name: String,
    pub client: ClientConfig,
}

/// Apply `--url`, `--username`, `--insecure` and `--timeout` to a profile.
pub fn apply_overrides(mut profile: Profile, global: &GlobalOpts) -> Profile {
    if let Some(ref url) = global.url {
        profile.url.clone_from(url);
    }
    if let Some(ref username) = global.username {
        profile.username = Some(username.clone());
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
    profile
}

/// Build a `ClientConfig` from the config file, the active profile and
/// CLI overrides.
pub fn resolve(global: &GlobalOpts) -> Result<Resolved, CliError> {
    let cfg = load_config()?;
    resolve_from(&cfg, global)
}

pub fn resolve_from(cfg: &Config, global: &GlobalOpts) -> Result<Resolved, CliError> {
    let profile_name = cfg.active_profile_name(global.profile.as_deref());

    let base = match cfg.profile(&profile_name) {
        Ok(profile) => profile.clone(),
        // An explicitly requested profile must exist.
        Err(e) if global.profile.is_some() => return Err(e.into()),
        // Otherwise the flags alone may describe the connection.
        Err(_) if global.url.is_some() => Profile::default(),
        Err(_) => {
            return Err(CliError::NoConfig {
                path: config_path().display().to_string(),
            });
        }
    };

    let profile = apply_overrides(base, global);
    let client = profile_to_client_config(&profile, &profile_name, &cfg.defaults)?;

    Ok(Resolved {
        profile_name,
        client,
    })
}
