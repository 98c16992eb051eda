use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
    core::{
        Error,
        Result,
        curve::{MotorCurve, MotorSpecPoint},
        regime::PropulsionRegime,
    },
    quantity::{current::Amperes, rotation::Rpm},
};

/// Fixed operating point of the eco motor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct EcoSpec {
    pub current: Amperes,
    pub rpm: Rpm,
}

/// Per-regime motor specification tables.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct MotorTables {
    #[serde(default)]
    pub main: BTreeMap<PropulsionRegime, Vec<MotorSpecPoint>>,

    #[serde(default)]
    pub eco: BTreeMap<PropulsionRegime, EcoSpec>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub enum MotorKind {
    Main,
    Eco,
}

/// Propulsion motor currently driving the shaft.
#[derive(Clone, Debug)]
pub enum MotorModel {
    /// Main motor: current depends on the shaft RPM.
    Main { regime: PropulsionRegime, curve: MotorCurve },

    /// Eco motor: fixed current and RPM per regime.
    Eco { regime: PropulsionRegime, current: Amperes, rpm: Rpm },
}

impl MotorModel {
    pub fn main(regime: PropulsionRegime, tables: &MotorTables) -> Result<Self> {
        let points = tables
            .main
            .get(&regime)
            .ok_or_else(|| Error::UnknownRegime(regime.to_string()))?;
        Ok(Self::Main { regime, curve: MotorCurve::new(points.iter().copied())? })
    }

    pub fn eco(regime: PropulsionRegime, tables: &MotorTables) -> Result<Self> {
        let spec = tables.eco.get(&regime).ok_or_else(|| Error::UnknownRegime(regime.to_string()))?;
        if !spec.current.is_finite() || spec.current < Amperes::ZERO {
            return Err(Error::InvalidConfiguration(format!(
                "{regime} eco motor current must be non-negative, got {:?}",
                spec.current,
            )));
        }
        if !spec.rpm.is_finite() || spec.rpm <= Rpm::ZERO {
            return Err(Error::InvalidConfiguration(format!(
                "{regime} eco motor RPM must be positive, got {:?}",
                spec.rpm,
            )));
        }
        Ok(Self::Eco { regime, current: spec.current, rpm: spec.rpm })
    }

    /// Current draw at the given shaft speed.
    ///
    /// The eco motor ignores `rpm` and always draws its fixed current.
    pub fn current(&self, rpm: Rpm) -> Result<Amperes> {
        match self {
            Self::Main { curve, .. } => curve.current_at(rpm),
            Self::Eco { current, .. } => Ok(*current),
        }
    }

    /// Main motor: base RPM of the regime table. Eco motor: its fixed RPM.
    #[must_use]
    pub fn rated_rpm(&self) -> Rpm {
        match self {
            Self::Main { curve, .. } => curve.rated_rpm(),
            Self::Eco { rpm, .. } => *rpm,
        }
    }

    #[must_use]
    pub const fn regime(&self) -> PropulsionRegime {
        match self {
            Self::Main { regime, .. } | Self::Eco { regime, .. } => *regime,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> MotorKind {
        match self {
            Self::Main { .. } => MotorKind::Main,
            Self::Eco { .. } => MotorKind::Eco,
        }
    }
}
