//! Load aggregation, interpolation and endurance estimates.

pub mod battery;
pub mod compartment;
pub mod curve;
mod error;
pub mod exclusion;
mod linear;
pub mod machine;
pub mod motor;
pub mod regime;
pub mod vessel;

pub use self::error::{Error, Result};
