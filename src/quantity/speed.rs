use crate::quantity::rotation::Rpm;

quantity!(Knots, via: f64, suffix: "kn", precision: 2);

impl From<Rpm> for Knots {
    /// Shaft speed to speed over ground: 50 rpm per knot with a half-knot slip offset.
    fn from(rpm: Rpm) -> Self {
        Self(rpm.0 / 50.0 - 0.5)
    }
}
