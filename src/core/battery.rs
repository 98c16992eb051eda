use bon::bon;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    core::{Error, Result, linear::line_through},
    quantity::{charge::AmpereHours, current::Amperes, time::Hours, voltage::Volts},
};

/// Single row of the battery discharge datasheet.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct DischargePoint {
    /// Discharge duration the row is rated for, in hours.
    pub rate_hours: u32,

    pub current: Amperes,

    pub capacity: AmpereHours,

    /// Cell voltage at the start of the discharge.
    pub initial_voltage: Option<Volts>,

    /// Cell voltage at which the discharge is considered complete.
    pub final_voltage: Option<Volts>,
}

/// Usable battery capacity as a function of the discharge current.
#[must_use]
#[derive(Clone, Debug)]
pub struct BatteryCapacityModel {
    /// Datasheet rows, sorted by the discharge current.
    curve: Vec<DischargePoint>,

    currents: Vec<Amperes>,
    capacities: Vec<AmpereHours>,

    /// Share of the nominal capacity which may be used before recharging, `(0.0, 1.0]`.
    usable_fraction: f64,
}

#[bon]
impl BatteryCapacityModel {
    #[builder]
    pub fn new(curve: Vec<DischargePoint>, usable_fraction: f64) -> Result<Self> {
        if !(usable_fraction > 0.0 && usable_fraction <= 1.0) {
            return Err(Error::InvalidConfiguration(format!(
                "usable fraction must be within (0, 1], got {usable_fraction}",
            )));
        }
        if curve.len() < 2 {
            return Err(Error::InvalidConfiguration(format!(
                "discharge curve needs at least 2 points, got {}",
                curve.len(),
            )));
        }
        for point in &curve {
            if point.rate_hours == 0 {
                return Err(Error::InvalidConfiguration(
                    "discharge rate must be a positive number of hours".to_string(),
                ));
            }
            if !point.current.is_finite() || point.current <= Amperes::ZERO {
                return Err(Error::InvalidConfiguration(format!(
                    "discharge current must be positive, got {:?}",
                    point.current,
                )));
            }
            if !point.capacity.is_finite() || point.capacity <= AmpereHours::ZERO {
                return Err(Error::InvalidConfiguration(format!(
                    "capacity must be positive, got {:?}",
                    point.capacity,
                )));
            }
        }
        let curve = curve.into_iter().sorted_by_key(|point| point.current).collect_vec();
        if let Some((point, _)) =
            curve.iter().tuple_windows().find(|(lo, hi)| lo.current == hi.current)
        {
            return Err(Error::InvalidConfiguration(format!(
                "duplicate discharge current {:?}",
                point.current,
            )));
        }
        let (currents, capacities) =
            curve.iter().map(|point| (point.current, point.capacity)).unzip();
        Ok(Self { curve, currents, capacities, usable_fraction })
    }
}

impl BatteryCapacityModel {
    #[must_use]
    pub fn curve(&self) -> &[DischargePoint] {
        &self.curve
    }

    #[must_use]
    pub const fn usable_fraction(&self) -> f64 {
        self.usable_fraction
    }

    /// Nominal capacity at the discharge current.
    ///
    /// Interpolated within the datasheet, extrapolated along the first or last segment outside.
    #[must_use]
    pub fn nominal_capacity_at(&self, current: Amperes) -> AmpereHours {
        if let Some(index) = self.currents.iter().position(|tabulated| *tabulated == current) {
            return self.capacities[index];
        }
        let n_points = self.currents.len();
        let segment = match self.currents.partition_point(|tabulated| *tabulated < current) {
            0 => 0,
            index if index >= n_points => n_points - 2,
            index => index - 1,
        };
        AmpereHours(line_through(
            (self.currents[segment].0, self.capacities[segment].0),
            (self.currents[segment + 1].0, self.capacities[segment + 1].0),
            current.0,
        ))
    }

    /// Usable capacity at the discharge current.
    ///
    /// Unlike the plain extrapolation of [`Self::nominal_capacity_at`], the result is floored
    /// at zero: far above the last datasheet row the line goes negative, and the endurance
    /// then comes out as zero hours.
    #[must_use]
    pub fn capacity_at(&self, current: Amperes) -> AmpereHours {
        let capacity = self.nominal_capacity_at(current) * self.usable_fraction;
        if capacity < AmpereHours::ZERO {
            warn!(?current, ?capacity, "extrapolated capacity is negative, flooring at zero");
            return AmpereHours::ZERO;
        }
        capacity
    }

    /// How long the battery sustains the current draw within the usable capacity.
    pub fn endurance(&self, draw: Amperes) -> Result<Hours> {
        if !draw.is_finite() || draw <= Amperes::ZERO {
            return Err(Error::InvalidInput(format!("current draw must be positive, got {draw:?}")));
        }
        let capacity = self.capacity_at(draw);
        let endurance = capacity / draw;
        debug!(?draw, ?capacity, ?endurance, "estimated endurance");
        Ok(endurance)
    }
}
