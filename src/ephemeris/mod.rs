//! Lunar position pipeline: calendar date to right ascension and declination

pub mod calculator;
pub mod orbit;

pub use calculator::*;
pub use orbit::*;
