use clap::Parser;

use crate::{cli::DatasetArgs, quantity::current::Amperes};

#[derive(Parser)]
pub struct BatteryArgs {
    #[clap(flatten)]
    pub dataset: DatasetArgs,

    /// Also evaluate the usable capacity at this discharge current in amperes.
    #[clap(long = "current-amperes", env = "NARWHAL_CURRENT_AMPERES")]
    pub current: Option<Amperes>,
}
