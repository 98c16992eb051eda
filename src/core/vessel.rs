use bon::bon;
use chrono::NaiveDate;
use tracing::{info, instrument};

use crate::{
    core::{
        Error,
        Result,
        battery::BatteryCapacityModel,
        compartment::{Compartment, CompartmentName},
        exclusion::{Clock, ExclusionPolicy, SystemClock},
        motor::{MotorModel, MotorTables},
        regime::{LoadRegime, OperatingRegime, PropulsionRegime},
    },
    quantity::{
        current::Amperes,
        distance::NauticalMiles,
        rotation::Rpm,
        speed::Knots,
        time::Hours,
    },
};

/// The whole boat: compartments, propulsion motor and battery.
///
/// Regime changes take `&mut self`, the estimates take `&self`,
/// so exclusions can never change halfway through an estimate.
pub struct Vessel {
    /// Bow to stern.
    compartments: Vec<Compartment>,

    motor: MotorModel,
    battery: BatteryCapacityModel,
    motor_tables: MotorTables,
    exclusion_policy: ExclusionPolicy,
    clock: Box<dyn Clock>,

    propulsion_regime: PropulsionRegime,
    operating_regime: OperatingRegime,
    operating_rpm: Rpm,
}

#[bon]
impl Vessel {
    /// Build a vessel running the main motor with every machine switched on.
    ///
    /// The operating RPM defaults to the main motor's rated RPM.
    #[builder]
    pub fn new(
        compartments: Vec<Compartment>,
        battery: BatteryCapacityModel,
        motor_tables: MotorTables,
        exclusion_policy: ExclusionPolicy,
        propulsion_regime: PropulsionRegime,
        operating_rpm: Option<Rpm>,
        clock: Option<Box<dyn Clock>>,
    ) -> Result<Self> {
        let mut compartments = compartments;
        compartments.sort_by_key(Compartment::name);
        let names = compartments.iter().map(Compartment::name).collect::<Vec<_>>();
        if names != CompartmentName::ALL {
            return Err(Error::InvalidConfiguration(format!(
                "expected compartments {:?}, got {names:?}",
                CompartmentName::ALL,
            )));
        }
        let motor = MotorModel::main(propulsion_regime, &motor_tables)?;
        let operating_rpm = operating_rpm.unwrap_or_else(|| motor.rated_rpm());
        validate_rpm(operating_rpm)?;
        Ok(Self {
            compartments,
            motor,
            battery,
            motor_tables,
            exclusion_policy,
            clock: clock.unwrap_or_else(|| Box::new(SystemClock)),
            propulsion_regime,
            operating_regime: OperatingRegime::Unrestricted,
            operating_rpm,
        })
    }
}

impl Vessel {
    #[must_use]
    pub fn compartments(&self) -> &[Compartment] {
        &self.compartments
    }

    #[cfg(test)]
    #[must_use]
    pub fn compartment(&self, name: CompartmentName) -> Option<&Compartment> {
        self.compartments.iter().find(|compartment| compartment.name() == name)
    }

    #[must_use]
    pub const fn motor(&self) -> &MotorModel {
        &self.motor
    }

    #[must_use]
    pub const fn battery(&self) -> &BatteryCapacityModel {
        &self.battery
    }

    #[must_use]
    pub const fn operating_regime(&self) -> OperatingRegime {
        self.operating_regime
    }

    #[must_use]
    pub const fn operating_rpm(&self) -> Rpm {
        self.operating_rpm
    }

    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn set_operating_rpm(&mut self, rpm: Rpm) -> Result {
        validate_rpm(rpm)?;
        self.operating_rpm = rpm;
        Ok(())
    }

    /// Switch the operating regime: re-apply the exclusions and pick the motor.
    ///
    /// Consuming runs the eco motor and takes over its RPM. Unrestricted switches
    /// every machine on and keeps the current motor.
    #[instrument(skip(self))]
    pub fn set_regime(&mut self, regime: OperatingRegime) -> Result {
        let motor = match regime {
            OperatingRegime::Snorting => {
                Some(MotorModel::main(self.propulsion_regime, &self.motor_tables)?)
            }
            OperatingRegime::Consuming => {
                Some(MotorModel::eco(self.propulsion_regime, &self.motor_tables)?)
            }
            OperatingRegime::Unrestricted => None,
        };

        let today = self.clock.today();
        let n_excluded: usize = self
            .compartments
            .iter_mut()
            .map(|compartment| self.exclusion_policy.apply(regime, compartment, today))
            .sum();

        if let Some(motor) = motor {
            if let MotorModel::Eco { rpm, .. } = motor {
                self.operating_rpm = rpm;
            }
            self.motor = motor;
        }
        self.operating_regime = regime;

        info!(
            %today,
            n_excluded,
            motor = ?self.motor.kind(),
            operating_rpm = ?self.operating_rpm,
            "switched the regime",
        );
        Ok(())
    }

    pub fn motor_current(&self) -> Result<Amperes> {
        self.motor.current(self.operating_rpm)
    }

    /// Current drawn by every switched-on machine.
    #[must_use]
    pub fn auxiliary_current(&self) -> Amperes {
        self.compartments
            .iter()
            .map(|compartment| compartment.total_current(LoadRegime::Running))
            .sum()
    }

    pub fn total_current(&self) -> Result<Amperes> {
        Ok(self.motor_current()? + self.auxiliary_current())
    }

    pub fn endurance(&self) -> Result<Hours> {
        self.battery.endurance(self.total_current()?)
    }

    #[must_use]
    pub fn speed_over_ground(&self) -> Knots {
        Knots::from(self.operating_rpm)
    }

    /// Average speed needed to cover the distance before the usable capacity runs out.
    pub fn required_speed(&self, distance: NauticalMiles) -> Result<Knots> {
        if !distance.is_finite() || distance < NauticalMiles::ZERO {
            return Err(Error::InvalidInput(format!(
                "distance must be non-negative, got {distance:?}",
            )));
        }
        let endurance = self.endurance()?;
        if endurance <= Hours::ZERO {
            return Err(Error::InvalidInput("no usable battery capacity left".to_string()));
        }
        Ok(distance / endurance)
    }
}

fn validate_rpm(rpm: Rpm) -> Result {
    if rpm.is_finite() && rpm > Rpm::ZERO {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!("operating RPM must be positive, got {rpm:?}")))
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::{config::Configuration, core::exclusion::FixedClock};

    const ODD_DAY: u32 = 17;
    const EVEN_DAY: u32 = 18;

    fn vessel(
        regime: PropulsionRegime,
        rpm: Option<Rpm>,
        day: u32,
    ) -> anyhow::Result<Vessel> {
        let date = NaiveDate::from_ymd_opt(2024, 5, day).unwrap();
        Configuration::reference()?.vessel(regime, rpm, Box::new(FixedClock(date)))
    }

    #[test]
    fn test_defaults_to_rated_rpm() -> anyhow::Result<()> {
        let vessel = vessel(PropulsionRegime::Sah, None, ODD_DAY)?;
        assert_eq!(vessel.operating_rpm(), Rpm(200.0));
        assert_eq!(vessel.operating_regime(), OperatingRegime::Unrestricted);
        assert!(vessel.compartments().iter().all(|compartment| {
            compartment.active_count() == compartment.machines().len()
        }));
        Ok(())
    }

    #[test]
    fn test_unrestricted_total_current() -> anyhow::Result<()> {
        let vessel = vessel(PropulsionRegime::Dsah, None, ODD_DAY)?;
        assert_abs_diff_eq!(vessel.auxiliary_current().0, 2339.51, epsilon = 1e-9);
        assert_abs_diff_eq!(vessel.total_current()?.0, 2939.51, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn test_snorting_end_to_end() -> anyhow::Result<()> {
        let mut vessel = vessel(PropulsionRegime::Dsah, Some(Rpm(170.0)), ODD_DAY)?;
        vessel.set_regime(OperatingRegime::Snorting)?;

        assert_abs_diff_eq!(vessel.motor_current()?.0, 712.5);
        assert_abs_diff_eq!(vessel.auxiliary_current().0, 1280.46, epsilon = 1e-9);
        assert_abs_diff_eq!(vessel.total_current()?.0, 1992.96, epsilon = 1e-9);
        assert_abs_diff_eq!(vessel.endurance()?.0, 4.004_563_896, epsilon = 1e-6);
        assert_abs_diff_eq!(vessel.speed_over_ground().0, 2.9, epsilon = 1e-12);

        let forward_end = vessel.compartment(CompartmentName::ForwardEnd).unwrap();
        assert!(!forward_end.machine("1B1").unwrap().is_active());
        assert!(!forward_end.machine("Battery Blower no 1").unwrap().is_active());
        assert!(forward_end.machine("Battery Blower no 2").unwrap().is_active());
        Ok(())
    }

    #[test]
    fn test_snorting_even_day() -> anyhow::Result<()> {
        let mut vessel = vessel(PropulsionRegime::Dsah, Some(Rpm(170.0)), EVEN_DAY)?;
        vessel.set_regime(OperatingRegime::Snorting)?;
        assert_abs_diff_eq!(vessel.auxiliary_current().0, 1315.37, epsilon = 1e-9);

        let motor_room = vessel.compartment(CompartmentName::MotorRoom).unwrap();
        assert!(motor_room.machine("Lube Oil Pump 3").unwrap().is_active());
        assert!(!motor_room.machine("Lube Oil Pump 4").unwrap().is_active());
        Ok(())
    }

    #[test]
    fn test_consuming_switches_to_eco_motor() -> anyhow::Result<()> {
        let mut vessel = vessel(PropulsionRegime::Dsah, Some(Rpm(170.0)), EVEN_DAY)?;
        vessel.set_regime(OperatingRegime::Consuming)?;

        assert_eq!(vessel.operating_rpm(), Rpm(80.0));
        assert_eq!(vessel.motor_current()?, Amperes(150.0));
        assert_abs_diff_eq!(vessel.total_current()?.0, 1947.9, epsilon = 1e-9);
        assert_abs_diff_eq!(vessel.speed_over_ground().0, 1.1, epsilon = 1e-12);

        let aft_end = vessel.compartment(CompartmentName::AftEnd).unwrap();
        assert!(!aft_end.machine("Reserve Motor(P)").unwrap().is_active());
        assert!(aft_end.machine("Reserve Motor(S)").unwrap().is_active());
        Ok(())
    }

    #[test]
    fn test_unrestricted_clears_exclusions_and_keeps_motor() -> anyhow::Result<()> {
        let mut vessel = vessel(PropulsionRegime::Hah, None, ODD_DAY)?;
        vessel.set_regime(OperatingRegime::Consuming)?;
        vessel.set_regime(OperatingRegime::Unrestricted)?;

        assert_abs_diff_eq!(vessel.auxiliary_current().0, 2339.51, epsilon = 1e-9);
        assert_eq!(vessel.motor_current()?, Amperes(350.0));
        assert_eq!(vessel.operating_rpm(), Rpm(125.0));
        Ok(())
    }

    #[test]
    fn test_snorting_after_consuming_is_out_of_range() -> anyhow::Result<()> {
        let mut vessel = vessel(PropulsionRegime::Dsah, None, ODD_DAY)?;
        vessel.set_regime(OperatingRegime::Consuming)?;
        vessel.set_regime(OperatingRegime::Snorting)?;
        assert!(matches!(vessel.total_current(), Err(Error::OutOfInterpolationRange { .. })));
        assert!(matches!(vessel.endurance(), Err(Error::OutOfInterpolationRange { .. })));

        vessel.set_operating_rpm(Rpm(140.0))?;
        assert_eq!(vessel.motor_current()?, Amperes(600.0));
        Ok(())
    }

    #[test]
    fn test_failed_regime_change_leaves_vessel_untouched() -> anyhow::Result<()> {
        let mut configuration = Configuration::reference()?;
        configuration.motors.eco.remove(&PropulsionRegime::Dsah);
        let date = NaiveDate::from_ymd_opt(2024, 5, ODD_DAY).unwrap();
        let mut vessel =
            configuration.vessel(PropulsionRegime::Dsah, None, Box::new(FixedClock(date)))?;

        let error = vessel.set_regime(OperatingRegime::Consuming).unwrap_err();
        assert_eq!(error, Error::UnknownRegime("DSAH".to_string()));
        assert_eq!(vessel.operating_regime(), OperatingRegime::Unrestricted);
        assert_eq!(vessel.operating_rpm(), Rpm(140.0));
        assert_abs_diff_eq!(vessel.auxiliary_current().0, 2339.51, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn test_required_speed() -> anyhow::Result<()> {
        let mut vessel = vessel(PropulsionRegime::Dsah, Some(Rpm(170.0)), ODD_DAY)?;
        vessel.set_regime(OperatingRegime::Snorting)?;
        let endurance = vessel.endurance()?;
        assert_abs_diff_eq!(
            vessel.required_speed(NauticalMiles(40.0))?.0,
            40.0 / endurance.0,
            epsilon = 1e-12,
        );
        assert!(matches!(
            vessel.required_speed(NauticalMiles(-1.0)),
            Err(Error::InvalidInput(_)),
        ));
        Ok(())
    }

    #[test]
    fn test_operating_rpm_after_snorting() -> anyhow::Result<()> {
        let mut vessel = vessel(PropulsionRegime::Dsah, None, ODD_DAY)?;
        vessel.set_regime(OperatingRegime::Snorting)?;
        assert_eq!(vessel.operating_rpm(), Rpm(140.0));

        vessel.set_operating_rpm(Rpm(170.0))?;
        assert_abs_diff_eq!(vessel.total_current()?.0, 1992.96, epsilon = 1e-9);
        assert_abs_diff_eq!(vessel.speed_over_ground().0, 2.9, epsilon = 1e-12);
        Ok(())
    }

    #[test]
    fn test_invalid_rpm() -> anyhow::Result<()> {
        assert!(vessel(PropulsionRegime::Dsah, Some(Rpm(0.0)), ODD_DAY).is_err());
        let mut vessel = vessel(PropulsionRegime::Dsah, None, ODD_DAY)?;
        assert!(matches!(vessel.set_operating_rpm(Rpm(-10.0)), Err(Error::InvalidInput(_))));
        Ok(())
    }
}
