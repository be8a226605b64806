// Simple color struct: u8 channels plus a fractional alpha, serialized
// into the rgba() string form the 2d canvas API takes for fill/stroke styles

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8, a: f64) -> Color {
        Color { r, g, b, a }
    }

    pub fn with_alpha(&self, a: f64) -> Color {
        Color { a, ..*self }
    }

    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}
