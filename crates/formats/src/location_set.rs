use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Dataset shipped with the viewer.
pub const BUNDLED_LOCATIONS_JSON: &str = include_str!("../../../assets/locations.json");

/// Identifier of a location, unique within one user's set.
///
/// Authored either as a JSON string or an integer; both normalize to text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawKey", into = "String")]
pub struct LocationKey(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawKey {
    Text(String),
    Int(i64),
}

impl From<RawKey> for LocationKey {
    fn from(raw: RawKey) -> Self {
        match raw {
            RawKey::Text(s) => LocationKey(s),
            RawKey::Int(n) => LocationKey(n.to_string()),
        }
    }
}

impl From<LocationKey> for String {
    fn from(key: LocationKey) -> Self {
        key.0
    }
}

impl LocationKey {
    pub fn new(key: impl Into<String>) -> Self {
        LocationKey(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub key: LocationKey,
    pub name: String,
    /// Degrees east.
    pub longitude: f64,
    /// Degrees north.
    pub latitude: f64,
    /// Ring radii in meters.
    pub large_radius: f64,
    pub medium_radius: f64,
    pub short_radius: f64,
}

impl Location {
    /// `[large, medium, short]`, outermost first.
    pub fn radii(&self) -> [f64; 3] {
        [self.large_radius, self.medium_radius, self.short_radius]
    }

    /// Rings are meant to nest; this is not enforced at load time.
    pub fn radii_descending(&self) -> bool {
        self.large_radius >= self.medium_radius && self.medium_radius >= self.short_radius
    }

    /// First suspicious value in the record, if any.
    ///
    /// Anomalies never fail a load: the record is kept as authored and the
    /// rendering engine decides what to make of it.
    pub fn anomaly(&self) -> Option<&'static str> {
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Some("longitude outside [-180, 180]");
        }
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Some("latitude outside [-90, 90]");
        }
        if self.radii().iter().any(|r| !r.is_finite() || *r < 0.0) {
            return Some("radius is negative or not finite");
        }
        if !self.radii_descending() {
            return Some("ring radii are not nested large >= medium >= short");
        }
        None
    }
}

#[derive(Debug)]
pub enum LocationSetError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    DuplicateKey {
        user: String,
        key: LocationKey,
    },
}

impl fmt::Display for LocationSetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationSetError::Io(err) => write!(f, "I/O error: {err}"),
            LocationSetError::Parse(err) => write!(f, "location set parse error: {err}"),
            LocationSetError::DuplicateKey { user, key } => {
                write!(f, "duplicate location key {key} for {user}")
            }
        }
    }
}

impl std::error::Error for LocationSetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LocationSetError::Io(err) => Some(err),
            LocationSetError::Parse(err) => Some(err),
            _ => None,
        }
    }
}

/// Immutable mapping from user key to that user's ordered locations.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationSet {
    users: BTreeMap<String, Vec<Location>>,
    content_hash: String,
}

impl LocationSet {
    pub fn bundled() -> Result<Self, LocationSetError> {
        Self::from_json_str(BUNDLED_LOCATIONS_JSON)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LocationSetError> {
        let bytes = fs::read(path.as_ref()).map_err(LocationSetError::Io)?;
        Self::from_json_slice(&bytes)
    }

    pub fn from_json_str(payload: &str) -> Result<Self, LocationSetError> {
        Self::from_json_slice(payload.as_bytes())
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, LocationSetError> {
        let users: BTreeMap<String, Vec<Location>> =
            serde_json::from_slice(bytes).map_err(LocationSetError::Parse)?;
        for (user, locations) in &users {
            check_unique_keys(user, locations)?;
        }
        Ok(Self {
            users,
            content_hash: blake3::hash(bytes).to_hex().to_string(),
        })
    }

    pub fn get(&self, user: &str) -> Option<&[Location]> {
        self.users.get(user).map(Vec::as_slice)
    }

    pub fn contains_user(&self, user: &str) -> bool {
        self.users.contains_key(user)
    }

    /// User keys in ascending order.
    pub fn user_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.users.keys().map(String::as_str)
    }

    pub fn location_count(&self) -> usize {
        self.users.values().map(Vec::len).sum()
    }

    /// Every record with an anomaly, as `(user, location, reason)`.
    pub fn anomalies(&self) -> Vec<(&str, &Location, &'static str)> {
        self.users
            .iter()
            .flat_map(|(user, locations)| {
                locations
                    .iter()
                    .filter_map(move |l| l.anomaly().map(|reason| (user.as_str(), l, reason)))
            })
            .collect()
    }

    /// blake3 hex digest of the raw payload.
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }
}

fn check_unique_keys(user: &str, locations: &[Location]) -> Result<(), LocationSetError> {
    let mut seen = HashSet::new();
    for location in locations {
        if !seen.insert(&location.key) {
            return Err(LocationSetError::DuplicateKey {
                user: user.to_string(),
                key: location.key.clone(),
            });
        }
    }
    Ok(())
}
