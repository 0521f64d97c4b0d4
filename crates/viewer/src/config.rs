use std::env;
use std::fmt;

use scene::components::Color;

/// Environment variable holding the globe engine access token.
pub const ACCESS_TOKEN_ENV: &str = "GLOBE_ACCESS_TOKEN";

pub const DEFAULT_USER: &str = "user1";
pub const DEFAULT_MARKER_ICON: &str = "assets/svg/drop-pin.svg";

/// Credential for the globe engine. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Blank input counts as no token at all.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(AccessToken(raw))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessToken(<{} chars>)", self.0.len())
    }
}

/// One entry of the user picker.
#[derive(Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub key: String,
    pub label: String,
}

impl UserProfile {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FlyConfig {
    /// Height above the ellipsoid at the end of a flight (meters).
    pub altitude_m: f64,
    pub duration_s: f64,
}

impl Default for FlyConfig {
    fn default() -> Self {
        Self {
            altitude_m: 3000.0,
            duration_s: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    pub icon: String,
    pub scale: f32,
    pub font: String,
    pub text_fill: Color,
    pub text_outline: Color,
    pub text_outline_width: f32,
    /// Screen offset of the name label; negative y is above the icon.
    pub label_offset_px: [f32; 2],
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            icon: DEFAULT_MARKER_ICON.to_string(),
            scale: 0.2,
            font: "14pt sans-serif".to_string(),
            text_fill: Color::BLACK,
            text_outline: Color::WHITE,
            text_outline_width: 2.0,
            label_offset_px: [0.0, -40.0],
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RingStyle {
    pub fill: Color,
    pub outline: Color,
}

/// Outer, middle and inner ring styles; opacity grows toward the center.
pub fn default_ring_styles() -> [RingStyle; 3] {
    [
        RingStyle {
            fill: Color::GREEN.with_alpha(0.2),
            outline: Color::GREEN,
        },
        RingStyle {
            fill: Color::YELLOW.with_alpha(0.3),
            outline: Color::YELLOW,
        },
        RingStyle {
            fill: Color::RED.with_alpha(0.5),
            outline: Color::RED,
        },
    ]
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub access_token: Option<AccessToken>,
    pub default_user: String,
    pub profiles: Vec<UserProfile>,
    pub fly: FlyConfig,
    pub marker: MarkerStyle,
    pub rings: [RingStyle; 3],
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            access_token: None,
            default_user: DEFAULT_USER.to_string(),
            profiles: vec![
                UserProfile::new("user1", "User 1"),
                UserProfile::new("user2", "User 2"),
                UserProfile::new("user3", "User 3"),
            ],
            fly: FlyConfig::default(),
            marker: MarkerStyle::default(),
            rings: default_ring_styles(),
        }
    }
}

impl ViewerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from any variable source; unset or unparsable values
    /// fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let fly = FlyConfig {
            altitude_m: lookup_f64(
                &lookup,
                "GLOBE_FLY_ALTITUDE_M",
                defaults.fly.altitude_m,
                |v| v > 0.0,
            ),
            // Zero is allowed: the camera jumps instead of flying.
            duration_s: lookup_f64(
                &lookup,
                "GLOBE_FLY_DURATION_S",
                defaults.fly.duration_s,
                |v| v >= 0.0,
            ),
        };
        let marker = MarkerStyle {
            icon: lookup("GLOBE_MARKER_ICON").unwrap_or(defaults.marker.icon),
            ..defaults.marker
        };

        Self {
            access_token: lookup(ACCESS_TOKEN_ENV).and_then(AccessToken::new),
            default_user: lookup("GLOBE_DEFAULT_USER").unwrap_or(defaults.default_user),
            fly,
            marker,
            ..Self::default()
        }
    }

    pub fn with_access_token(mut self, token: Option<AccessToken>) -> Self {
        self.access_token = token;
        self
    }
}

/// Parses `name` as a finite number accepted by `valid`, else `default`.
fn lookup_f64<F, V>(lookup: &F, name: &str, default: f64, valid: V) -> f64
where
    F: Fn(&str) -> Option<String>,
    V: Fn(f64) -> bool,
{
    lookup(name)
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite() && valid(*v))
        .unwrap_or(default)
}
