pub mod ecef;
pub mod geodesy;
pub mod local;
pub mod precision;
pub mod vec;

pub use ecef::*;
pub use geodesy::*;
pub use local::*;
pub use precision::*;
pub use vec::*;
