//! Domain models for the Green Flags climate dashboard

mod advisory;
mod forecast;
mod reading;

pub use advisory::*;
pub use forecast::*;
pub use reading::*;
