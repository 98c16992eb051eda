#[macro_use]
pub mod macros;

pub mod charge;
pub mod current;
pub mod distance;
pub mod rotation;
pub mod speed;
pub mod time;
pub mod voltage;
