mod battery;
mod dataset;
mod report;

use clap::{Parser, Subcommand};

pub use self::{
    battery::BatteryArgs,
    dataset::DatasetArgs,
    report::{OutputFormat, ReportArgs},
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: apply the regime and estimate the load, endurance and speed.
    #[clap(name = "report")]
    Report(Box<ReportArgs>),

    /// List the machines of every compartment.
    #[clap(name = "catalogue")]
    Catalogue(DatasetArgs),

    /// Show the battery discharge curve.
    #[clap(name = "battery")]
    Battery(BatteryArgs),
}
