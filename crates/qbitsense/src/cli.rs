//! Clap derive structures for the `qbitsense` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// qbitsense -- torrent activity sensors from a qBittorrent Web UI
#[derive(Debug, Parser)]
#[command(
    name = "qbitsense",
    version,
    about = "Report qBittorrent activity as home-automation sensors",
    long_about = "Polls the qBittorrent Web API and derives nine sensor values:\n\
        transfer status, download/upload speed, torrent counts by state,\n\
        overall download percentage and the highest remaining ETA.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Profile to use
    #[arg(long, short = 'p', env = "QBITSENSE_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Web UI URL (overrides profile)
    #[arg(long, short = 'u', env = "QBITSENSE_URL", global = true)]
    pub url: Option<String>,

    /// Web UI username (overrides profile)
    #[arg(long, env = "QBITSENSE_USERNAME", global = true, hide_env = true)]
    pub username: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "QBITSENSE_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "QBITSENSE_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "QBITSENSE_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain `key=value` lines (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Poll once and print all sensor values
    Poll(PollArgs),

    /// Poll continuously and print sensor values after every cycle
    #[command(alias = "w")]
    Watch(WatchArgs),

    /// Log in and report the qBittorrent and Web API versions
    Check,

    /// List the sensor catalogue (no connection needed)
    Sensors,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Poll / Watch ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PollArgs {
    /// Only print these sensors (by key, e.g. download_speed); repeatable
    #[arg(long, short = 's', value_name = "KEY")]
    pub sensor: Vec<String>,
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Time between polls, e.g. "30s" or "2m" (overrides profile)
    #[arg(long, short = 'i', value_parser = humantime::parse_duration)]
    pub interval: Option<Duration>,

    /// Only print these sensors (by key); repeatable
    #[arg(long, short = 's', value_name = "KEY")]
    pub sensor: Vec<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Interactive configuration wizard
    Init,

    /// Show the current configuration (passwords redacted)
    Show,

    /// Print the config file path
    Path,

    /// List configured profiles
    Profiles,

    /// Store a profile's password in the system keyring
    SetPassword,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
