//! Which machines are switched off in an operating regime.
//!
//! The set is the union of a manual per-compartment list and the day-parity rule:
//! machines whose name ends with a number are rested every other day, odd numbers
//! on odd days of the month and even numbers on even days.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    compartment::{Compartment, CompartmentName},
    regime::OperatingRegime,
};

/// Source of the current calendar date.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date.
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always the same date.
#[derive(Copy, Clone, Debug)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Manual exclusions of a single operating regime.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ExclusionList {
    /// Applies to compartments without their own list.
    #[serde(default)]
    pub default: Vec<String>,

    #[serde(default)]
    pub compartments: BTreeMap<CompartmentName, Vec<String>>,
}

impl ExclusionList {
    #[must_use]
    pub fn for_compartment(&self, name: CompartmentName) -> &[String] {
        self.compartments.get(&name).unwrap_or(&self.default)
    }
}

/// Manual exclusion table per operating regime.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ExclusionPolicy {
    #[serde(default)]
    pub snorting: ExclusionList,

    #[serde(default)]
    pub consuming: ExclusionList,
}

impl ExclusionPolicy {
    /// Manual exclusions, or `None` when the regime does not restrict anything.
    #[must_use]
    pub const fn manual(&self, regime: OperatingRegime) -> Option<&ExclusionList> {
        match regime {
            OperatingRegime::Snorting => Some(&self.snorting),
            OperatingRegime::Consuming => Some(&self.consuming),
            OperatingRegime::Unrestricted => None,
        }
    }

    /// Names of the machines to switch off in the compartment on the given date.
    #[must_use]
    pub fn exclusions(
        &self,
        regime: OperatingRegime,
        compartment: &Compartment,
        today: NaiveDate,
    ) -> BTreeSet<String> {
        let Some(manual) = self.manual(regime) else {
            return BTreeSet::new();
        };
        let is_odd_day = today.day() % 2 != 0;
        let rested = compartment
            .machines()
            .iter()
            .map(|machine| machine.name())
            .filter(|name| {
                trailing_number_is_odd(name).is_some_and(|is_odd| is_odd == is_odd_day)
            });
        manual
            .for_compartment(compartment.name())
            .iter()
            .map(String::as_str)
            .chain(rested)
            .map(ToString::to_string)
            .collect()
    }

    /// Compute and apply the exclusions, returning the number of switched-off machines.
    pub fn apply(
        &self,
        regime: OperatingRegime,
        compartment: &mut Compartment,
        today: NaiveDate,
    ) -> usize {
        let excluded = self.exclusions(regime, compartment, today);
        let n_excluded = compartment.apply_exclusions(&excluded);
        debug!(
            compartment = %compartment.name(),
            %regime,
            %today,
            n_excluded,
            n_active = compartment.active_count(),
            "applied exclusions",
        );
        n_excluded
    }
}

/// Parity of the number at the end of a machine name, like the `3` in «Lube Oil Pump 3».
///
/// Only the last digit matters, so the number may be arbitrarily long.
fn trailing_number_is_odd(name: &str) -> Option<bool> {
    let token = name.split_whitespace().next_back()?;
    let digits = token.strip_prefix(['+', '-']).unwrap_or(token);
    if digits.is_empty() || !digits.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }
    digits.bytes().next_back().map(|digit| (digit - b'0') % 2 != 0)
}
