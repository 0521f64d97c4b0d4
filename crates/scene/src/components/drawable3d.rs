use foundation::math::{WGS84_A, WGS84_B};

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Shape3D {
    Ellipsoid { semi_major: f64, semi_minor: f64 },
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Drawable3D {
    pub shape: Shape3D,
}

impl Drawable3D {
    pub fn wgs84_globe() -> Self {
        Self {
            shape: Shape3D::Ellipsoid {
                semi_major: WGS84_A,
                semi_minor: WGS84_B,
            },
        }
    }
}
