pub mod effects;
pub mod frame;

pub use effects::*;
pub use frame::*;
