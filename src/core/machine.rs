use serde::Serialize;

use crate::{core::regime::LoadRegime, quantity::current::Amperes};

/// Single electrical consumer.
#[must_use]
#[derive(Clone, Debug, Serialize)]
pub struct Machine {
    name: String,

    /// Inrush current, kept from the catalogue but not used in any estimate.
    starting_current: Amperes,

    running_current: Amperes,

    active: bool,
}

impl Machine {
    pub fn new(name: impl Into<String>, starting_current: Amperes, running_current: Amperes) -> Self {
        Self { name: name.into(), starting_current, running_current, active: true }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn starting_current(&self) -> Amperes {
        self.starting_current
    }

    #[must_use]
    pub const fn running_current(&self) -> Amperes {
        self.running_current
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    pub const fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Current drawn by the machine, zero when it is switched off.
    ///
    /// Both regimes yield the running current: the starting branch has never been wired up.
    #[must_use]
    pub const fn current_draw(&self, regime: LoadRegime) -> Amperes {
        if !self.active {
            return Amperes::ZERO;
        }
        match regime {
            LoadRegime::Running | LoadRegime::Starting => self.running_current,
        }
    }
}
