use std::{
    collections::{BTreeSet, HashSet},
    fmt::{Display, Formatter},
};

use serde::{Deserialize, Serialize};

use crate::{
    core::{Error, Result, machine::Machine, regime::LoadRegime},
    quantity::current::Amperes,
};

/// Watertight compartments, from bow to stern.
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
)]
pub enum CompartmentName {
    #[serde(rename = "F/E")]
    ForwardEnd,

    #[serde(rename = "C/R")]
    ControlRoom,

    #[serde(rename = "Third")]
    Third,

    #[serde(rename = "E/R")]
    EngineRoom,

    #[serde(rename = "M/R")]
    MotorRoom,

    #[serde(rename = "A/E")]
    AftEnd,
}

impl CompartmentName {
    pub const ALL: [Self; 6] = [
        Self::ForwardEnd,
        Self::ControlRoom,
        Self::Third,
        Self::EngineRoom,
        Self::MotorRoom,
        Self::AftEnd,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::ForwardEnd => "F/E",
            Self::ControlRoom => "C/R",
            Self::Third => "Third",
            Self::EngineRoom => "E/R",
            Self::MotorRoom => "M/R",
            Self::AftEnd => "A/E",
        }
    }
}

impl Display for CompartmentName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Named group of machines.
///
/// The machine list is fixed at construction, only the machines' active flags change.
#[must_use]
#[derive(Clone, Debug)]
pub struct Compartment {
    name: CompartmentName,
    machines: Vec<Machine>,
}

impl Compartment {
    pub fn new(name: CompartmentName, machines: Vec<Machine>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(machines.len());
        if let Some(machine) = machines.iter().find(|machine| !seen.insert(machine.name())) {
            return Err(Error::InvalidConfiguration(format!(
                "duplicate machine `{}` in {name}",
                machine.name(),
            )));
        }
        Ok(Self { name, machines })
    }

    #[must_use]
    pub const fn name(&self) -> CompartmentName {
        self.name
    }

    #[must_use]
    pub fn machines(&self) -> &[Machine] {
        &self.machines
    }

    #[cfg(test)]
    #[must_use]
    pub fn machine(&self, name: &str) -> Option<&Machine> {
        self.machines.iter().find(|machine| machine.name() == name)
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.machines.iter().filter(|machine| machine.is_active()).count()
    }

    /// Sum of the machines' current draw, in the catalogue order.
    #[must_use]
    pub fn total_current(&self, regime: LoadRegime) -> Amperes {
        self.machines.iter().map(|machine| machine.current_draw(regime)).sum()
    }

    /// Switch off exactly the excluded machines and switch on all the others.
    ///
    /// Returns the number of switched-off machines.
    pub fn apply_exclusions(&mut self, excluded: &BTreeSet<String>) -> usize {
        for machine in &mut self.machines {
            let is_excluded = excluded.contains(machine.name());
            machine.set_active(!is_excluded);
        }
        self.machines.len() - self.active_count()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn forward_end() -> Result<Compartment> {
        Compartment::new(
            CompartmentName::ForwardEnd,
            vec![
                Machine::new("Battery Blower no 1", Amperes(10.6), Amperes(2.8)),
                Machine::new("Battery Blower no 2", Amperes(10.3), Amperes(2.9)),
                Machine::new("1B1", Amperes(5.0), Amperes(2.4)),
            ],
        )
    }

    fn excluded(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_total_current() -> Result {
        let compartment = forward_end()?;
        assert_abs_diff_eq!(compartment.total_current(LoadRegime::Running).0, 8.1, epsilon = 1e-9);
        assert_abs_diff_eq!(compartment.total_current(LoadRegime::Starting).0, 8.1, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn test_apply_exclusions_is_full_replace() -> Result {
        let mut compartment = forward_end()?;

        assert_eq!(compartment.apply_exclusions(&excluded(&["1B1", "Reserve Motor(P)"])), 1);
        assert!(!compartment.machine("1B1").unwrap().is_active());
        assert_abs_diff_eq!(compartment.total_current(LoadRegime::Running).0, 5.7, epsilon = 1e-9);

        assert_eq!(compartment.apply_exclusions(&excluded(&["Battery Blower no 2"])), 1);
        assert!(compartment.machine("1B1").unwrap().is_active());
        assert!(!compartment.machine("Battery Blower no 2").unwrap().is_active());

        assert_eq!(compartment.apply_exclusions(&BTreeSet::new()), 0);
        assert_eq!(compartment.active_count(), 3);
        Ok(())
    }

    #[test]
    fn test_apply_exclusions_is_idempotent() -> Result {
        let mut compartment = forward_end()?;
        let exclusions = excluded(&["1B1"]);
        compartment.apply_exclusions(&exclusions);
        let first = compartment.total_current(LoadRegime::Running);
        compartment.apply_exclusions(&exclusions);
        assert_eq!(compartment.total_current(LoadRegime::Running), first);
        Ok(())
    }

    #[test]
    fn test_duplicate_machine_names() {
        let result = Compartment::new(
            CompartmentName::ControlRoom,
            vec![
                Machine::new("15MBOO no 1", Amperes(9.5), Amperes(2.02)),
                Machine::new("15MBOO no 1", Amperes(9.0), Amperes(2.01)),
            ],
        );
        assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
    }
}
