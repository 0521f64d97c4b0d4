use super::Color;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum LabelStyle {
    #[default]
    Fill,
    Outline,
    FillAndOutline,
}

/// Text drawn in screen space at an entity's position.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub font: String,
    pub fill_color: Color,
    pub outline_color: Color,
    pub outline_width: f32,
    pub style: LabelStyle,
    /// Screen-space offset in pixels; negative y moves the label up.
    pub pixel_offset: [f32; 2],
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: "14pt sans-serif".to_string(),
            fill_color: Color::WHITE,
            outline_color: Color::BLACK,
            outline_width: 1.0,
            style: LabelStyle::Fill,
            pixel_offset: [0.0, 0.0],
        }
    }
}
