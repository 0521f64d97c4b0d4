//! Geodetic flight camera.
//!
//! The camera hangs above a point on the ellipsoid and looks straight down.
//! Flights interpolate longitude/latitude along the shorter way around and
//! altitude in log space, eased with smoothstep.

use foundation::math::{EnuBasis, Geodetic, Vec3, WGS84_A, geodetic_to_ecef};
use scene::picking::Ray;

use crate::viewport::Viewport;

/// Lowest height above the ellipsoid the camera may reach (meters).
const MIN_ALTITUDE_M: f64 = 1.0;

/// Highest height above the ellipsoid (meters).
const MAX_ALTITUDE_M: f64 = WGS84_A * 20.0;

#[derive(Debug, Copy, Clone, PartialEq)]
struct Flight {
    from: Geodetic,
    to: Geodetic,
    elapsed_s: f64,
    duration_s: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlightCamera {
    position: Geodetic,
    flight: Option<Flight>,
}

impl Default for FlightCamera {
    fn default() -> Self {
        // Looking at Africa from two Earth radii up.
        Self {
            position: Geodetic::from_degrees(20.0, 5.0, 2.0 * WGS84_A),
            flight: None,
        }
    }
}

impl FlightCamera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(position: Geodetic) -> Self {
        Self {
            position: clamp_altitude(position),
            flight: None,
        }
    }

    /// Current camera position; `alt_m` is height above the ellipsoid.
    pub fn position(&self) -> Geodetic {
        self.position
    }

    pub fn is_flying(&self) -> bool {
        self.flight.is_some()
    }

    pub fn destination(&self) -> Option<Geodetic> {
        self.flight.map(|f| f.to)
    }

    /// Starts a flight from the current pose. An in-progress flight is
    /// abandoned where it is; non-positive durations jump immediately.
    pub fn fly_to(&mut self, destination: Geodetic, duration_s: f64) {
        let to = clamp_altitude(destination);
        if duration_s.is_nan() || duration_s <= 0.0 {
            self.position = to;
            self.flight = None;
            return;
        }
        self.flight = Some(Flight {
            from: self.position,
            to,
            elapsed_s: 0.0,
            duration_s,
        });
    }

    pub fn update(&mut self, dt_s: f64) {
        let Some(mut flight) = self.flight else {
            return;
        };

        flight.elapsed_s += dt_s.max(0.0);
        if flight.elapsed_s >= flight.duration_s {
            self.position = flight.to;
            self.flight = None;
            return;
        }

        let s = smoothstep(flight.elapsed_s / flight.duration_s);
        self.position = interpolate(flight.from, flight.to, s);
        self.flight = Some(flight);
    }

    pub fn eye(&self) -> Vec3 {
        geodetic_to_ecef(self.position).to_vec3()
    }

    /// World-space ray through pixel `(x_px, y_px)`; `(0, 0)` is the top-left.
    pub fn screen_ray(&self, viewport: &Viewport, x_px: f64, y_px: f64) -> Ray {
        let basis = EnuBasis::at(self.position);
        let tan_half = (0.5 * viewport.fov_y_rad).tan();
        let ndc_x = 2.0 * x_px / viewport.width_px - 1.0;
        let ndc_y = 1.0 - 2.0 * y_px / viewport.height_px;

        let dir = -basis.up
            + basis.east.scale(ndc_x * tan_half * viewport.aspect())
            + basis.north.scale(ndc_y * tan_half);
        Ray::new(self.eye(), dir)
    }

    /// Pixel position of a world-space point; `None` when it lies behind the
    /// camera plane. Inverse of `screen_ray`.
    pub fn project(&self, viewport: &Viewport, point: Vec3) -> Option<(f64, f64)> {
        let basis = EnuBasis::at(self.position);
        let d = point - self.eye();
        let depth = -d.dot(basis.up);
        if depth <= 0.0 {
            return None;
        }
        let tan_half = (0.5 * viewport.fov_y_rad).tan();
        let ndc_x = d.dot(basis.east) / (depth * tan_half * viewport.aspect());
        let ndc_y = d.dot(basis.north) / (depth * tan_half);
        Some((
            (ndc_x + 1.0) * 0.5 * viewport.width_px,
            (1.0 - ndc_y) * 0.5 * viewport.height_px,
        ))
    }

    /// Ground distance covered by one pixel at the view center.
    pub fn meters_per_pixel(&self, viewport: &Viewport) -> f64 {
        let tan_half = (0.5 * viewport.fov_y_rad).tan();
        2.0 * self.position.alt_m * tan_half / viewport.height_px
    }
}

fn clamp_altitude(geo: Geodetic) -> Geodetic {
    geo.with_alt(geo.alt_m.clamp(MIN_ALTITUDE_M, MAX_ALTITUDE_M))
}

fn smoothstep(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

fn interpolate(from: Geodetic, to: Geodetic, s: f64) -> Geodetic {
    let dlon = (to.lon_deg() - from.lon_deg() + 180.0).rem_euclid(360.0) - 180.0;
    let lon = from.lon_deg() + dlon * s;
    let lon = (lon + 180.0).rem_euclid(360.0) - 180.0;
    let lat = from.lat_deg() + (to.lat_deg() - from.lat_deg()) * s;
    let alt = (from.alt_m.ln() + (to.alt_m.ln() - from.alt_m.ln()) * s).exp();
    Geodetic::from_degrees(lon, lat, alt)
}
