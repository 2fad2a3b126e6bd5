//! Sensor catalogue listing.

use tabled::Tabled;

use qbitsense_core::{SENSOR_DESCRIPTIONS, SensorDescription};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct DescriptionRow {
    #[tabled(rename = "Key")]
    key: &'static str,
    #[tabled(rename = "Name")]
    name: &'static str,
    #[tabled(rename = "Unit")]
    unit: &'static str,
    #[tabled(rename = "Icon")]
    icon: &'static str,
    #[tabled(rename = "Device Class")]
    device_class: String,
    #[tabled(rename = "State Class")]
    state_class: String,
}

fn to_row(d: &SensorDescription) -> DescriptionRow {
    DescriptionRow {
        key: d.key(),
        name: d.name,
        unit: d.unit.unwrap_or("-"),
        icon: d.icon.unwrap_or("-"),
        device_class: d.device_class.map_or_else(|| "-".into(), |c| c.to_string()),
        state_class: d.state_class.map_or_else(|| "-".into(), |c| c.to_string()),
    }
}

pub fn handle(global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_list(&global.output, &SENSOR_DESCRIPTIONS, to_row, |d| {
        d.key().to_owned()
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}
