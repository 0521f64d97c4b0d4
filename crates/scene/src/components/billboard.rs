/// Anchor of a screen-space image relative to its world position.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum VerticalOrigin {
    #[default]
    Center,
    Bottom,
    Top,
}

/// How a graphic's height is interpreted against terrain.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum HeightReference {
    #[default]
    None,
    ClampToGround,
    RelativeToGround,
}

/// Screen-aligned image drawn at an entity's position.
#[derive(Debug, Clone, PartialEq)]
pub struct Billboard {
    pub image: String,
    pub scale: f32,
    pub vertical_origin: VerticalOrigin,
    pub height_reference: HeightReference,
}

impl Billboard {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            scale: 1.0,
            vertical_origin: VerticalOrigin::default(),
            height_reference: HeightReference::default(),
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Pin-style anchoring: bottom-center, clamped to the ground.
    pub fn pinned(mut self) -> Self {
        self.vertical_origin = VerticalOrigin::Bottom;
        self.height_reference = HeightReference::ClampToGround;
        self
    }
}
