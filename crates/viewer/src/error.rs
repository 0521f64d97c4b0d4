use std::fmt;

use formats::LocationKey;

/// Rejected user actions. State is left untouched whenever one is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerError {
    /// Rendering is suppressed because the engine has no usable credential.
    NotReady,
    UnknownUserKey { user: String },
    /// The key is not part of the currently displayed set.
    UnknownLocation { key: LocationKey },
}

impl fmt::Display for ViewerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewerError::NotReady => write!(f, "viewer is not ready: missing access credential"),
            ViewerError::UnknownUserKey { user } => write!(f, "unknown user key: {user}"),
            ViewerError::UnknownLocation { key } => {
                write!(f, "location {key} is not in the active set")
            }
        }
    }
}

impl std::error::Error for ViewerError {}
