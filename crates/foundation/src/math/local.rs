use super::{Geodetic, Vec3};

/// Unit east, north and up axes of the tangent frame at `origin`, in ECEF.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EnuBasis {
    pub east: Vec3,
    pub north: Vec3,
    pub up: Vec3,
}

impl EnuBasis {
    pub fn at(origin: Geodetic) -> Self {
        let sin_lat = origin.lat_rad.sin();
        let cos_lat = origin.lat_rad.cos();
        let sin_lon = origin.lon_rad.sin();
        let cos_lon = origin.lon_rad.cos();

        Self {
            east: Vec3::new(-sin_lon, cos_lon, 0.0),
            north: Vec3::new(-sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat),
            up: Vec3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat),
        }
    }
}
