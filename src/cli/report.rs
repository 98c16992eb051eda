use chrono::NaiveDate;
use clap::Parser;

use crate::{
    cli::DatasetArgs,
    core::{
        exclusion::{Clock, FixedClock, SystemClock},
        regime::{OperatingRegime, PropulsionRegime},
    },
    quantity::{distance::NauticalMiles, rotation::Rpm},
};

#[derive(Parser)]
pub struct ReportArgs {
    #[clap(flatten)]
    pub dataset: DatasetArgs,

    #[clap(
        long,
        env = "NARWHAL_PROPULSION_REGIME",
        default_value = "dsah",
        ignore_case = true
    )]
    pub propulsion_regime: PropulsionRegime,

    /// «Snorting», «Consuming», anything else lifts the exclusions.
    #[clap(long, env = "NARWHAL_OPERATING_REGIME", default_value = "snorting")]
    pub operating_regime: OperatingRegime,

    /// Operating RPM, defaults to the rated RPM of the motor.
    #[clap(long, env = "NARWHAL_RPM")]
    pub rpm: Option<Rpm>,

    /// Date for the parity rule, defaults to today.
    #[clap(long, env = "NARWHAL_DATE")]
    pub date: Option<NaiveDate>,

    /// Distance to cover, adds the required speed to the report.
    #[clap(long = "distance-nmi", env = "NARWHAL_DISTANCE_NMI")]
    pub distance: Option<NauticalMiles>,

    #[clap(long, env = "NARWHAL_FORMAT", default_value = "table")]
    pub format: OutputFormat,
}

impl ReportArgs {
    #[must_use]
    pub fn clock(&self) -> Box<dyn Clock> {
        match self.date {
            Some(date) => Box::new(FixedClock(date)),
            None => Box::new(SystemClock),
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}
