/// Linear RGBA color, components in `0.0..=1.0`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Color(pub [f32; 4]);

impl Color {
    pub const BLACK: Color = Color([0.0, 0.0, 0.0, 1.0]);
    pub const WHITE: Color = Color([1.0, 1.0, 1.0, 1.0]);
    pub const RED: Color = Color([1.0, 0.0, 0.0, 1.0]);
    pub const GREEN: Color = Color([0.0, 0.5, 0.0, 1.0]);
    pub const YELLOW: Color = Color([1.0, 1.0, 0.0, 1.0]);

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Color([r, g, b, a])
    }

    pub const fn with_alpha(self, alpha: f32) -> Self {
        let [r, g, b, _] = self.0;
        Color([r, g, b, alpha])
    }

    pub const fn alpha(self) -> f32 {
        self.0[3]
    }
}

#[cfg(test)]
mod tests {
    use super::Color;

    #[test]
    fn with_alpha_keeps_rgb() {
        let c = Color::YELLOW.with_alpha(0.3);
        assert_eq!(c.0, [1.0, 1.0, 0.0, 0.3]);
        assert_eq!(Color::YELLOW.alpha(), 1.0);
    }
}
