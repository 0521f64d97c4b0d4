use super::Color;

/// Flat ellipse on the ellipsoid surface, centered on the entity position.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ellipse {
    /// Height above the ellipsoid (meters).
    pub height: f64,
    pub semi_major_axis: f64,
    pub semi_minor_axis: f64,
    pub material: Color,
    pub outline: bool,
    pub outline_color: Color,
}

impl Ellipse {
    /// Ground-level circle with an outline.
    pub fn disk(radius_m: f64, fill: Color, outline_color: Color) -> Self {
        Self {
            height: 0.0,
            semi_major_axis: radius_m,
            semi_minor_axis: radius_m,
            material: fill,
            outline: true,
            outline_color,
        }
    }

    pub fn is_circle(&self) -> bool {
        self.semi_major_axis == self.semi_minor_axis
    }
}
