/// Axis-aligned bounding box in world space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb3 {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl Aabb3 {
    pub fn new(min: [f64; 3], max: [f64; 3]) -> Self {
        Aabb3 { min, max }
    }

    /// Cube of side `2 * half_extent` centered on `center`.
    pub fn around(center: [f64; 3], half_extent: f64) -> Self {
        let h = half_extent.abs();
        Aabb3 {
            min: [center[0] - h, center[1] - h, center[2] - h],
            max: [center[0] + h, center[1] + h, center[2] + h],
        }
    }

    pub fn contains(&self, point: [f64; 3]) -> bool {
        (0..3).all(|axis| point[axis] >= self.min[axis] && point[axis] <= self.max[axis])
    }
}
