use foundation::math::{Geodetic, Vec3, geodetic_to_ecef};

/// World-space (ECEF, meters) placement.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub position: Vec3,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
        }
    }

    pub fn translate(position: Vec3) -> Self {
        Self { position }
    }

    pub fn at_geodetic(geo: Geodetic) -> Self {
        Self::translate(geodetic_to_ecef(geo).to_vec3())
    }
}

#[cfg(test)]
mod tests {
    use super::Transform;
    use foundation::math::{Geodetic, Vec3, WGS84_A};

    #[test]
    fn identity_is_origin() {
        assert_eq!(Transform::identity().position, Vec3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn geodetic_placement_is_on_surface() {
        let t = Transform::at_geodetic(Geodetic::from_degrees(0.0, 0.0, 0.0));
        assert!((t.position.x - WGS84_A).abs() < 1e-6);
    }
}
