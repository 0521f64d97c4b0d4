//! Headless globe engine: applies viewer scene descriptions to a scene
//! `World`, flies a geodetic camera and resolves screen clicks to markers.

pub mod camera;
pub mod engine;
pub mod viewport;

pub use camera::FlightCamera;
pub use engine::{LOCATION_KEY_PROPERTY, WorldEngine};
pub use viewport::Viewport;
