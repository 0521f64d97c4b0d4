use std::fmt;

use foundation::math::Geodetic;

use crate::config::AccessToken;
use crate::view::SceneDescription;

/// Imperative camera flight request. Fire-and-forget: a newer command
/// retargets the camera from wherever it currently is.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FlyTo {
    pub longitude: f64,
    pub latitude: f64,
    /// Height above the surface (meters).
    pub altitude_m: f64,
    pub duration_s: f64,
}

impl FlyTo {
    pub fn destination(&self) -> Geodetic {
        Geodetic::from_degrees(self.longitude, self.latitude, self.altitude_m)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    CredentialRejected { reason: String },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::CredentialRejected { reason } => {
                write!(f, "engine rejected access credential: {reason}")
            }
        }
    }
}

impl std::error::Error for EngineError {}

/// Boundary to the globe rendering engine.
///
/// The engine owns frame scheduling, camera animation, picking and geodesy;
/// the viewer only hands it declarative scenes and fly commands.
pub trait GlobeEngine {
    fn configure(&mut self, token: &AccessToken) -> Result<(), EngineError>;

    /// Make the engine's scene match `scene`. Implementations may diff.
    fn apply_scene(&mut self, scene: &SceneDescription);

    fn fly_to(&mut self, command: FlyTo);
}
