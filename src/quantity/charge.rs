use std::ops::Div;

use crate::quantity::{current::Amperes, time::Hours};

quantity!(AmpereHours, via: f64, suffix: "Ah", precision: 0);

impl Div<Amperes> for AmpereHours {
    type Output = Hours;

    fn div(self, current: Amperes) -> Self::Output {
        Hours(self.0 / current.0)
    }
}
