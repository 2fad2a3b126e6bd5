//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits `key=value` lines.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use qbitsense_core::{SensorReading, SensorSet};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stderr().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}

/// One-line summary of a sensor set, for the `watch` header.
pub fn status_line(set: &SensorSet, color: bool) -> String {
    let stamp = set.last_updated.map_or_else(
        || "never".to_owned(),
        |t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    );
    let state = if set.available {
        "available"
    } else {
        "unavailable"
    };
    let state = match (color, set.available) {
        (false, _) => state.to_owned(),
        (true, true) => state.green().to_string(),
        (true, false) => state.red().to_string(),
    };
    format!("{} [{state}] last update: {stamp}", set.identity.name)
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// - `table`: uses the `Tabled` derive to build a pretty table
/// - `json` / `json-compact`: serializes the original data via serde
/// - `yaml`: serializes via serde_yaml
/// - `plain`: calls `line_fn` on each item to emit one line per item
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    line_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    Ok(match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            render_table(&rows)
        }
        OutputFormat::Json => serde_json::to_string_pretty(data)?,
        OutputFormat::JsonCompact => serde_json::to_string(data)?,
        OutputFormat::Yaml => serde_yaml::to_string(data)?,
        OutputFormat::Plain => data.iter().map(line_fn).collect::<Vec<_>>().join("\n"),
    })
}

/// Render a single serde-serializable item in the chosen format.
///
/// Table rendering uses a custom `detail_fn` that returns a pre-formatted
/// string, since single-item views don't use `Tabled` derive.
pub fn render_single<T>(
    format: &OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    plain_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
{
    Ok(match format {
        OutputFormat::Table => detail_fn(data),
        OutputFormat::Json => serde_json::to_string_pretty(data)?,
        OutputFormat::JsonCompact => serde_json::to_string(data)?,
        OutputFormat::Yaml => serde_yaml::to_string(data)?,
        OutputFormat::Plain => plain_fn(data),
    })
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

// ── Sensor readings ──────────────────────────────────────────────────

#[derive(Tabled)]
struct ReadingRow {
    #[tabled(rename = "Sensor")]
    name: String,
    #[tabled(rename = "Key")]
    key: &'static str,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Available")]
    available: &'static str,
}

/// Value with its unit, or `-` before the first successful poll.
pub fn value_with_unit(reading: &SensorReading) -> String {
    match (reading.value, reading.unit) {
        (None, _) => "-".into(),
        (Some(v), None) => v.to_string(),
        (Some(v), Some(unit)) => format!("{v} {unit}"),
    }
}

/// `key=value` with an empty value before the first successful poll.
pub fn plain_reading(reading: &SensorReading) -> String {
    let value = reading.value.map(|v| v.to_string()).unwrap_or_default();
    format!("{}={value}", reading.key)
}

pub fn render_readings(
    format: &OutputFormat,
    readings: &[SensorReading],
) -> Result<String, CliError> {
    render_list(
        format,
        readings,
        |r| ReadingRow {
            name: r.name.clone(),
            key: r.key,
            value: value_with_unit(r),
            available: if r.available { "yes" } else { "no" },
        },
        plain_reading,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use qbitsense_core::{CurrentStatus, DerivedMetrics, InstanceIdentity, SensorSet};

    use super::*;

    fn readings() -> Vec<SensorReading> {
        let mut set = SensorSet::new(&InstanceIdentity::default());
        set.apply(
            DerivedMetrics {
                current_status: CurrentStatus::Downloading,
                download_speed_kib_s: 0.05,
                upload_speed_kib_s: 0.0,
                total_count: 2,
                downloading_count: 1,
                seeding_count: 0,
                paused_count: 1,
                download_percent: 75.0,
                highest_eta_minutes: 15.0,
            },
            chrono::Utc::now(),
        );
        set.readings()
    }

    #[test]
    fn plain_is_key_value_lines() {
        let out = render_readings(&OutputFormat::Plain, &readings()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], "current_status=downloading");
        assert_eq!(lines[1], "download_speed=0.05");
        assert_eq!(lines[4], "highest_eta=15.0");
        assert_eq!(lines[8], "download_percent=75.0");
    }

    #[test]
    fn table_shows_units() {
        let out = render_readings(&OutputFormat::Table, &readings()).unwrap();
        assert!(out.contains("qBittorrent Down Speed"));
        assert!(out.contains("0.05 KiB/s"));
        assert!(out.contains("15.0 minutes"));
    }

    #[test]
    fn json_keeps_native_values() {
        let out = render_readings(&OutputFormat::JsonCompact, &readings()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[0]["value"], "downloading");
        assert_eq!(parsed[3]["value"], 2);
        assert_eq!(parsed[0]["unique_id"], "default-current_status");
    }

    #[test]
    fn unpolled_set_renders_placeholders() {
        let set = SensorSet::new(&InstanceIdentity::default());
        let out = render_readings(&OutputFormat::Plain, &set.readings()).unwrap();
        assert!(out.lines().all(|l| l.ends_with('=')));
        assert!(status_line(&set, false).contains("[unavailable] last update: never"));
    }
}
