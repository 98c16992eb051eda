use std::ops::Div;

use crate::quantity::{speed::Knots, time::Hours};

quantity!(NauticalMiles, via: f64, suffix: "nmi", precision: 1);

impl Div<Hours> for NauticalMiles {
    type Output = Knots;

    fn div(self, hours: Hours) -> Self::Output {
        Knots(self.0 / hours.0)
    }
}
