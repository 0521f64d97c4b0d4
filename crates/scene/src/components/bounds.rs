use foundation::bounds::Aabb3;
use foundation::math::Vec3;

/// World-space pick volume. Entities without bounds are never picked.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ComponentBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl ComponentBounds {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn around(center: Vec3, half_extent: f64) -> Self {
        let aabb = Aabb3::around(center.as_array(), half_extent);
        Self::new(
            Vec3::new(aabb.min[0], aabb.min[1], aabb.min[2]),
            Vec3::new(aabb.max[0], aabb.max[1], aabb.max[2]),
        )
    }

    pub fn contains(&self, point: Vec3) -> bool {
        self.to_aabb().contains(point.as_array())
    }

    pub fn to_aabb(&self) -> Aabb3 {
        Aabb3::new(self.min.as_array(), self.max.as_array())
    }
}
