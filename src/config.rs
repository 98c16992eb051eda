//! Static dataset: machinery catalogue, motor tables, battery curve and exclusion lists.

use std::{collections::BTreeMap, fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    core::{
        battery::{BatteryCapacityModel, DischargePoint},
        compartment::{Compartment, CompartmentName},
        exclusion::{Clock, ExclusionPolicy},
        machine::Machine,
        motor::{MotorModel, MotorTables},
        regime::PropulsionRegime,
        vessel::Vessel,
    },
    prelude::*,
    quantity::{current::Amperes, rotation::Rpm},
};

const REFERENCE: &str = include_str!("../data/reference.toml");

#[must_use]
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Configuration {
    /// Dataset version label, reported alongside the estimates.
    pub revision: String,

    pub battery: BatteryConfiguration,

    pub motors: MotorTables,

    #[serde(default)]
    pub exclusions: ExclusionPolicy,

    pub compartments: BTreeMap<CompartmentName, Vec<MachineSpec>>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct BatteryConfiguration {
    pub usable_fraction: f64,
    pub discharge: Vec<DischargePoint>,
}

/// Catalogue entry of a machine.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MachineSpec {
    pub name: String,
    pub starting_current: Amperes,
    pub running_current: Amperes,
}

impl Configuration {
    /// Dataset bundled with the binary.
    pub fn reference() -> Result<Self> {
        Self::from_toml(REFERENCE).context("failed to load the bundled reference dataset")
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        Self::from_toml(&contents).with_context(|| format!("failed to load `{}`", path.display()))
    }

    /// Bundled dataset, unless another file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let configuration = match path {
            Some(path) => Self::from_path(path)?,
            None => Self::reference()?,
        };
        info!(revision = configuration.revision.as_str(), "loaded the dataset");
        Ok(configuration)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let configuration: Self = toml::from_str(contents).context("failed to parse the dataset")?;
        configuration.validate()?;
        Ok(configuration)
    }

    fn validate(&self) -> Result {
        for name in CompartmentName::ALL {
            ensure!(self.compartments.contains_key(&name), "compartment `{name}` is missing");
        }
        for (name, machines) in &self.compartments {
            for machine in machines {
                ensure!(
                    machine.running_current.is_finite() && machine.running_current >= Amperes::ZERO,
                    "`{}` in `{name}`: running current must be non-negative",
                    machine.name,
                );
                ensure!(
                    machine.starting_current.is_finite()
                        && machine.starting_current >= Amperes::ZERO,
                    "`{}` in `{name}`: starting current must be non-negative",
                    machine.name,
                );
            }
        }
        self.compartments()?;
        self.battery_model().map(drop)?;
        for regime in self.motors.main.keys() {
            MotorModel::main(*regime, &self.motors)
                .with_context(|| format!("invalid main motor table for {regime}"))?;
        }
        for regime in self.motors.eco.keys() {
            MotorModel::eco(*regime, &self.motors)
                .with_context(|| format!("invalid eco motor table for {regime}"))?;
        }
        Ok(())
    }

    /// Fresh compartments with every machine switched on.
    pub fn compartments(&self) -> Result<Vec<Compartment>> {
        self.compartments
            .iter()
            .map(|(name, specs)| {
                let machines = specs
                    .iter()
                    .map(|spec| {
                        Machine::new(spec.name.clone(), spec.starting_current, spec.running_current)
                    })
                    .collect();
                Compartment::new(*name, machines).map_err(Error::from)
            })
            .collect()
    }

    pub fn battery_model(&self) -> Result<BatteryCapacityModel> {
        BatteryCapacityModel::builder()
            .curve(self.battery.discharge.clone())
            .usable_fraction(self.battery.usable_fraction)
            .build()
            .context("invalid battery discharge curve")
    }

    /// Vessel running the main motor with every machine switched on.
    pub fn vessel(
        &self,
        propulsion_regime: PropulsionRegime,
        operating_rpm: Option<Rpm>,
        clock: Box<dyn Clock>,
    ) -> Result<Vessel> {
        Ok(Vessel::builder()
            .compartments(self.compartments()?)
            .battery(self.battery_model()?)
            .motor_tables(self.motors.clone())
            .exclusion_policy(self.exclusions.clone())
            .propulsion_regime(propulsion_regime)
            .maybe_operating_rpm(operating_rpm)
            .clock(clock)
            .build()?)
    }
}
