use crate::quantity::rotation::Rpm;

pub type Result<T = (), E = Error> = std::result::Result<T, E>;

/// Failures of the load and endurance calculations.
///
/// None of them is transient: the caller has to fix the input and call again.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("unknown regime: `{0}`")]
    UnknownRegime(String),

    #[error("{rpm:?} is out of interpolation range {min:?}..={max:?}")]
    OutOfInterpolationRange { rpm: Rpm, min: Rpm, max: Rpm },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}
