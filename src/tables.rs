use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    config::Configuration,
    core::battery::BatteryCapacityModel,
    quantity::current::Amperes,
    report::Report,
};

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table
}

#[must_use]
pub fn build_machines_table(report: &Report) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Compartment", "Machine", "Starting", "Running", "State"]);
    for compartment in &report.compartments {
        for machine in &compartment.machines {
            table.add_row(vec![
                Cell::new(compartment.name).add_attribute(Attribute::Dim),
                Cell::new(&machine.name),
                Cell::new(machine.starting_current)
                    .set_alignment(CellAlignment::Right)
                    .add_attribute(Attribute::Dim),
                Cell::new(machine.running_current).set_alignment(CellAlignment::Right),
                if machine.active {
                    Cell::new("on").fg(Color::Green)
                } else {
                    Cell::new("off").fg(Color::Red)
                },
            ]);
        }
        table.add_row(vec![
            Cell::new(compartment.name).add_attribute(Attribute::Bold),
            Cell::new("Total").add_attribute(Attribute::Bold),
            Cell::new(""),
            Cell::new(compartment.total_current)
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Bold),
            Cell::new(""),
        ]);
    }
    table
}

#[must_use]
pub fn build_summary_table(report: &Report) -> Table {
    let mut table = new_table();
    table.set_header(vec!["", ""]);
    table.add_row(vec![Cell::new("Dataset"), Cell::new(&report.revision)]);
    table.add_row(vec![Cell::new("Date"), Cell::new(report.date)]);
    table.add_row(vec![
        Cell::new("Regime"),
        Cell::new(format!("{} / {}", report.propulsion_regime, report.operating_regime)),
    ]);
    table.add_row(vec![
        Cell::new("Motor"),
        Cell::new(format!("{:?} at {}", report.motor, report.operating_rpm)),
    ]);
    table.add_row(vec![
        Cell::new("Motor current"),
        Cell::new(report.motor_current).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Auxiliary current"),
        Cell::new(report.auxiliary_current).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Total current").add_attribute(Attribute::Bold),
        Cell::new(report.total_current)
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Usable capacity"),
        Cell::new(report.usable_capacity).set_alignment(CellAlignment::Right),
    ]);
    table.add_row(vec![
        Cell::new("Endurance").add_attribute(Attribute::Bold),
        Cell::new(report.endurance)
            .set_alignment(CellAlignment::Right)
            .add_attribute(Attribute::Bold)
            .fg(if report.endurance.0 < 1.0 { Color::Red } else { Color::Reset }),
    ]);
    table.add_row(vec![
        Cell::new("Speed over ground"),
        Cell::new(report.speed_over_ground).set_alignment(CellAlignment::Right),
    ]);
    if let (Some(distance), Some(required_speed)) = (report.distance, report.required_speed) {
        table.add_row(vec![
            Cell::new(format!("Required speed for {distance}")),
            Cell::new(required_speed).set_alignment(CellAlignment::Right).fg(
                if required_speed > report.speed_over_ground { Color::Red } else { Color::Green },
            ),
        ]);
    }
    table
}

#[must_use]
pub fn build_catalogue_table(configuration: &Configuration) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Compartment", "Machine", "Starting", "Running"]);
    for (compartment, machines) in &configuration.compartments {
        for machine in machines {
            table.add_row(vec![
                Cell::new(compartment).add_attribute(Attribute::Dim),
                Cell::new(&machine.name),
                Cell::new(machine.starting_current)
                    .set_alignment(CellAlignment::Right)
                    .add_attribute(Attribute::Dim),
                Cell::new(machine.running_current).set_alignment(CellAlignment::Right),
            ]);
        }
    }
    table
}

#[must_use]
pub fn build_discharge_table(battery: &BatteryCapacityModel, probe: Option<Amperes>) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Rate", "Current", "Capacity", "Usable", "Initial", "Final"]);
    for point in battery.curve() {
        table.add_row(vec![
            Cell::new(format!("{} h", point.rate_hours)),
            Cell::new(point.current).set_alignment(CellAlignment::Right),
            Cell::new(point.capacity).set_alignment(CellAlignment::Right),
            Cell::new(point.capacity * battery.usable_fraction())
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Bold),
            Cell::new(point.initial_voltage.map_or_else(String::new, |voltage| voltage.to_string()))
                .add_attribute(Attribute::Dim),
            Cell::new(point.final_voltage.map_or_else(String::new, |voltage| voltage.to_string()))
                .add_attribute(Attribute::Dim),
        ]);
    }
    if let Some(current) = probe {
        table.add_row(vec![
            Cell::new("probe").fg(Color::DarkYellow),
            Cell::new(current).set_alignment(CellAlignment::Right).fg(Color::DarkYellow),
            Cell::new(battery.nominal_capacity_at(current)).set_alignment(CellAlignment::Right),
            Cell::new(battery.capacity_at(current))
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Bold)
                .fg(Color::DarkYellow),
            Cell::new(""),
            Cell::new(""),
        ]);
    }
    table
}
