//! Command handlers.

pub mod check;
pub mod config_cmd;
pub mod poll;
pub mod sensors;
pub mod watch;

use qbitsense_core::{QbitFetcher, SensorKind, SensorReading};

use crate::cli::{Command, GlobalOpts};
use crate::config::Resolved;
use crate::error::CliError;

/// Route a connection-requiring command to its handler.
pub async fn dispatch(cmd: Command, resolved: Resolved, global: &GlobalOpts) -> Result<(), CliError> {
    let profile = resolved.profile_name.clone();
    let result = match cmd {
        Command::Poll(args) => poll::handle(args, resolved, global).await,
        Command::Watch(args) => watch::handle(args, resolved, global).await,
        Command::Check => check::handle(resolved, global).await,
        // Offline commands are handled before dispatch
        Command::Sensors | Command::Config(_) | Command::Completions(_) => unreachable!(),
    };
    result.map_err(|e| e.for_profile(&profile))
}

/// Log in with the resolved profile.
pub(crate) async fn connect(resolved: &Resolved) -> Result<QbitFetcher, CliError> {
    Ok(QbitFetcher::connect(&resolved.client).await?)
}

/// Parse `--sensor` keys. An empty list selects every sensor.
pub(crate) fn select_kinds(keys: &[String]) -> Result<Vec<SensorKind>, CliError> {
    keys.iter()
        .map(|key| {
            key.parse::<SensorKind>().map_err(|_| CliError::NotFound {
                resource_type: "sensor".into(),
                identifier: key.clone(),
                list_command: "sensors".into(),
            })
        })
        .collect()
}

/// Keep readings whose kind was selected; all of them if none were.
pub(crate) fn filter_readings(readings: Vec<SensorReading>, kinds: &[SensorKind]) -> Vec<SensorReading> {
    if kinds.is_empty() {
        return readings;
    }
    readings
        .into_iter()
        .filter(|r| kinds.iter().any(|k| k.as_ref() == r.key))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use qbitsense_core::{InstanceIdentity, SensorSet};

    use super::*;

    #[test]
    fn sensor_keys_parse() {
        let kinds = select_kinds(&["download_speed".into(), "number_paused".into()]).unwrap();
        assert_eq!(kinds, vec![SensorKind::DownloadSpeed, SensorKind::PausedNumber]);
    }

    #[test]
    fn unknown_sensor_is_not_found() {
        let err = select_kinds(&["bogus".into()]).unwrap_err();
        assert!(matches!(err, CliError::NotFound { ref identifier, .. } if identifier == "bogus"));
    }

    #[test]
    fn filter_keeps_selected_in_catalogue_order() {
        let readings = SensorSet::new(&InstanceIdentity::default()).readings();
        let kept = filter_readings(readings, &[SensorKind::HighestEta, SensorKind::CurrentStatus]);
        let keys: Vec<&str> = kept.iter().map(|r| r.key).collect();
        assert_eq!(keys, vec!["current_status", "highest_eta"]);
    }

    #[test]
    fn empty_selection_keeps_all() {
        let readings = SensorSet::new(&InstanceIdentity::default()).readings();
        assert_eq!(filter_readings(readings, &[]).len(), 9);
    }
}
