//! Config subcommand handlers.

use dialoguer::{Input, Select};

use qbitsense_config::{self as config, Config, Profile};
use qbitsense_core::config::DEFAULT_NAME;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

const REDACTED: &str = "********";

// ── Helpers ─────────────────────────────────────────────────────────

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Copy of the config with every plaintext password masked.
fn redacted(cfg: &Config) -> Config {
    let mut cfg = cfg.clone();
    for profile in cfg.profiles.values_mut() {
        if profile.password.is_some() {
            profile.password = Some(REDACTED.into());
        }
    }
    cfg
}

fn prompt_password(profile_name: &str) -> Result<String, CliError> {
    let pass = rpassword::prompt_password(format!("Password for '{profile_name}': "))
        .map_err(prompt_err)?;
    if pass.is_empty() {
        return Err(CliError::Validation {
            field: "password".into(),
            reason: "password cannot be empty".into(),
        });
    }
    Ok(pass)
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(),

        ConfigCommand::Show => {
            let cfg = redacted(&config::load_config()?);
            let out = output::render_single(
                &global.output,
                &cfg,
                |c| toml::to_string_pretty(c).unwrap_or_else(|e| format!("{e}")),
                |c| toml::to_string(c).unwrap_or_else(|e| format!("{e}")),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load_config()?;
            let active = cfg.active_profile_name(global.profile.as_deref());
            let names = cfg.profile_names();
            let out = if names.is_empty() {
                String::new()
            } else {
                names
                    .iter()
                    .map(|name| {
                        let marker = if *name == active { "* " } else { "  " };
                        format!("{marker}{name}")
                    })
                    .collect::<Vec<_>>()
                    .join("\n")
            };
            if out.is_empty() && !global.quiet {
                eprintln!("No profiles configured. Run: qbitsense config init");
            }
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::SetPassword => {
            let cfg = config::load_config()?;
            let profile_name = cfg.active_profile_name(global.profile.as_deref());
            let pass = prompt_password(&profile_name)?;
            config::store_password(&profile_name, &pass)?;
            eprintln!("✓ Password for '{profile_name}' stored in system keyring");
            Ok(())
        }
    }
}

// ── Init: interactive wizard ────────────────────────────────────────

fn init() -> Result<(), CliError> {
    let config_path = config::config_path();
    eprintln!("qbitsense configuration wizard");
    eprintln!("   Config path: {}\n", config_path.display());

    // Keep any existing profiles.
    let mut cfg = config::load_config()?;

    // 1. Profile name
    let profile_name: String = Input::new()
        .with_prompt("Profile name")
        .default("default".into())
        .interact_text()
        .map_err(prompt_err)?;

    // 2. Web UI URL
    let url: String = Input::new()
        .with_prompt("Web UI URL")
        .default("http://localhost:8080".into())
        .validate_with(|input: &String| {
            config::parse_url(input)
                .map(|_| ())
                .map_err(|e| e.to_string())
        })
        .interact_text()
        .map_err(prompt_err)?;

    // 3. Credentials
    let username: String = Input::new()
        .with_prompt("Username")
        .default("admin".into())
        .interact_text()
        .map_err(prompt_err)?;

    let pass = prompt_password(&profile_name)?;

    let store_choices = &[
        "Store password in system keyring (recommended)",
        "Save to config file (plaintext)",
    ];
    let store_selection = Select::new()
        .with_prompt("Where to store the password?")
        .items(store_choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    let password = if store_selection == 0 {
        config::store_password(&profile_name, &pass)?;
        eprintln!("   ✓ Password stored in system keyring");
        None
    } else {
        Some(pass)
    };

    // 4. Instance name
    let name: String = Input::new()
        .with_prompt("Instance name (sensor name prefix)")
        .default(DEFAULT_NAME.into())
        .interact_text()
        .map_err(prompt_err)?;

    // 5. Build profile and config
    let profile = Profile {
        url,
        username: Some(username),
        password,
        name: (name != DEFAULT_NAME).then_some(name),
        ..Profile::default()
    };

    cfg.profiles.insert(profile_name.clone(), profile);
    cfg.default_profile = Some(profile_name.clone());

    // 6. Write config
    let written = config::save_config(&cfg)?;

    eprintln!("\n✓ Configuration written to {}", written.display());
    eprintln!("  Active profile: {profile_name}");
    eprintln!("\n  Test it: qbitsense check");

    Ok(())
}
