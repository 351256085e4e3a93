pub mod coordinates;
pub mod elements;

pub use coordinates::*;
pub use elements::*;
