/// Pixel size and vertical field of view of the render target.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    pub width_px: f64,
    pub height_px: f64,
    pub fov_y_rad: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

impl Viewport {
    pub fn new(width_px: f64, height_px: f64) -> Self {
        Self {
            width_px: width_px.max(1.0),
            height_px: height_px.max(1.0),
            fov_y_rad: 60f64.to_radians(),
        }
    }

    pub fn aspect(&self) -> f64 {
        self.width_px / self.height_px
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width_px * 0.5, self.height_px * 0.5)
    }
}
