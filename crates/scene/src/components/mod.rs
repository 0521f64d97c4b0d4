pub mod billboard;
pub mod bounds;
pub mod color;
pub mod drawable3d;
pub mod ellipse;
pub mod label;
pub mod properties;
pub mod transform;

pub use billboard::*;
pub use bounds::*;
pub use color::*;
pub use drawable3d::*;
pub use ellipse::*;
pub use label::*;
pub use properties::*;
pub use transform::*;
