use std::path::PathBuf;

use clap::Parser;

use crate::{config::Configuration, prelude::*};

#[derive(Parser)]
pub struct DatasetArgs {
    /// Vessel dataset in TOML, the embedded reference dataset is used when omitted.
    #[clap(long = "config", env = "NARWHAL_CONFIG")]
    pub path: Option<PathBuf>,
}

impl DatasetArgs {
    pub fn load(&self) -> Result<Configuration> {
        Configuration::load(self.path.as_deref())
    }
}
