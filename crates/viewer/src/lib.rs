//! Location viewer: per-user location markers on a globe, with radius rings
//! around the selected location.
//!
//! State transitions are pure (`state`), rendering is a pure function of state
//! (`view`), and everything the globe engine must do is either a scene
//! description or a queued effect dispatched by `LocationViewer::flush`.

pub mod component;
pub mod config;
pub mod engine;
pub mod error;
pub mod state;
pub mod view;

pub use component::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use state::*;
pub use view::*;
