use chrono::NaiveDate;
use serde::Serialize;
use tracing::instrument;

use crate::{
    core::{
        Result,
        compartment::CompartmentName,
        motor::MotorKind,
        regime::{LoadRegime, OperatingRegime, PropulsionRegime},
        vessel::Vessel,
    },
    quantity::{
        charge::AmpereHours,
        current::Amperes,
        distance::NauticalMiles,
        rotation::Rpm,
        speed::Knots,
        time::Hours,
    },
};

/// Snapshot of the vessel's electrical state and the derived estimates.
#[must_use]
#[derive(Debug, Serialize)]
pub struct Report {
    pub revision: String,
    pub date: NaiveDate,
    pub propulsion_regime: PropulsionRegime,
    pub operating_regime: OperatingRegime,
    pub motor: MotorKind,
    pub operating_rpm: Rpm,
    pub motor_current: Amperes,
    pub compartments: Vec<CompartmentReport>,
    pub auxiliary_current: Amperes,
    pub total_current: Amperes,
    pub usable_capacity: AmpereHours,
    pub endurance: Hours,
    pub speed_over_ground: Knots,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<NauticalMiles>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_speed: Option<Knots>,
}

#[derive(Debug, Serialize)]
pub struct CompartmentReport {
    pub name: CompartmentName,
    pub machines: Vec<MachineStatus>,
    pub total_current: Amperes,
}

#[derive(Debug, Serialize)]
pub struct MachineStatus {
    pub name: String,
    pub starting_current: Amperes,
    pub running_current: Amperes,
    pub active: bool,
}

impl Report {
    #[instrument(skip_all)]
    pub fn try_from_vessel(
        vessel: &Vessel,
        revision: &str,
        distance: Option<NauticalMiles>,
    ) -> Result<Self> {
        let compartments = vessel
            .compartments()
            .iter()
            .map(|compartment| CompartmentReport {
                name: compartment.name(),
                machines: compartment
                    .machines()
                    .iter()
                    .map(|machine| MachineStatus {
                        name: machine.name().to_string(),
                        starting_current: machine.starting_current(),
                        running_current: machine.running_current(),
                        active: machine.is_active(),
                    })
                    .collect(),
                total_current: compartment.total_current(LoadRegime::Running),
            })
            .collect();
        let total_current = vessel.total_current()?;
        Ok(Self {
            revision: revision.to_string(),
            date: vessel.today(),
            propulsion_regime: vessel.motor().regime(),
            operating_regime: vessel.operating_regime(),
            motor: vessel.motor().kind(),
            operating_rpm: vessel.operating_rpm(),
            motor_current: vessel.motor_current()?,
            compartments,
            auxiliary_current: vessel.auxiliary_current(),
            total_current,
            usable_capacity: vessel.battery().capacity_at(total_current),
            endurance: vessel.endurance()?,
            speed_over_ground: vessel.speed_over_ground(),
            distance,
            required_speed: distance.map(|distance| vessel.required_speed(distance)).transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{config::Configuration, core::exclusion::FixedClock};

    #[test]
    fn test_report() -> anyhow::Result<()> {
        let configuration = Configuration::reference()?;
        let date = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        let mut vessel = configuration.vessel(
            PropulsionRegime::Dsah,
            Some(Rpm(170.0)),
            Box::new(FixedClock(date)),
        )?;
        vessel.set_regime(OperatingRegime::Snorting)?;

        let report =
            Report::try_from_vessel(&vessel, &configuration.revision, Some(NauticalMiles(40.0)))?;
        assert_eq!(report.date, date);
        assert_eq!(report.motor, MotorKind::Main);
        assert_eq!(report.compartments.len(), 6);
        assert_eq!(report.compartments[1].name, CompartmentName::ControlRoom);
        assert_eq!(report.compartments[1].machines.len(), 25);
        assert_abs_diff_eq!(report.motor_current.0, 712.5);
        assert_abs_diff_eq!(
            report.compartments.iter().map(|compartment| compartment.total_current.0).sum::<f64>(),
            report.auxiliary_current.0,
            epsilon = 1e-9,
        );
        assert_abs_diff_eq!(
            report.usable_capacity.0 / report.total_current.0,
            report.endurance.0,
            epsilon = 1e-12,
        );
        assert!(report.required_speed.is_some());
        Ok(())
    }

    #[test]
    fn test_report_json() -> anyhow::Result<()> {
        let configuration = Configuration::reference()?;
        let date = NaiveDate::from_ymd_opt(2024, 5, 18).unwrap();
        let mut vessel =
            configuration.vessel(PropulsionRegime::Fah, None, Box::new(FixedClock(date)))?;
        vessel.set_regime(OperatingRegime::Consuming)?;

        let report = Report::try_from_vessel(&vessel, &configuration.revision, None)?;
        let json = serde_json::to_value(&report)?;
        assert_eq!(json["propulsion_regime"], "FAH");
        assert_eq!(json["operating_regime"], "consuming");
        assert_eq!(json["motor"], "Eco");
        assert_eq!(json["operating_rpm"], 150.0);
        assert_eq!(json["compartments"][0]["name"], "F/E");
        assert!(json.get("required_speed").is_none());
        Ok(())
    }
}
