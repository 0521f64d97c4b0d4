pub mod location_set;

pub use location_set::*;
