use std::{
    convert::Infallible,
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::core::Error;

/// Propulsion order, selects the motor specification tables.
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Deserialize,
    Serialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum PropulsionRegime {
    /// Dead slow ahead.
    Dsah,

    /// Slow ahead.
    Sah,

    /// Half ahead.
    Hah,

    /// Full ahead.
    Fah,
}

impl PropulsionRegime {
    pub const ALL: [Self; 4] = [Self::Dsah, Self::Sah, Self::Hah, Self::Fah];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Dsah => "DSAH",
            Self::Sah => "SAH",
            Self::Hah => "HAH",
            Self::Fah => "FAH",
        }
    }
}

impl Display for PropulsionRegime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PropulsionRegime {
    type Err = Error;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|regime| regime.label().eq_ignore_ascii_case(label.trim()))
            .ok_or_else(|| Error::UnknownRegime(label.to_string()))
    }
}

/// Vessel operating condition, selects the exclusion policy and the motor variant.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OperatingRegime {
    /// Running the diesels at periscope depth: main motor, snorting exclusion table.
    Snorting,

    /// Running on the battery: eco motor, consuming exclusion table.
    Consuming,

    /// Everything is switched on and the motor is left as it is.
    Unrestricted,
}

impl OperatingRegime {
    /// Any label other than «Snorting» or «Consuming» means no restrictions.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.eq_ignore_ascii_case("snorting") {
            Self::Snorting
        } else if label.eq_ignore_ascii_case("consuming") {
            Self::Consuming
        } else {
            Self::Unrestricted
        }
    }
}

impl FromStr for OperatingRegime {
    type Err = Infallible;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_label(label))
    }
}

impl Display for OperatingRegime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Snorting => "Snorting",
            Self::Consuming => "Consuming",
            Self::Unrestricted => "Unrestricted",
        })
    }
}

/// Which current figure of a machine is asked for.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LoadRegime {
    Running,

    /// Never asked for by the estimates, which always use the running current.
    #[allow(dead_code)]
    Starting,
}
