//! Drawing abstraction. Coordinates are screen pixels: top-left origin,
//! y down. Callers subtract the camera offset before drawing.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Blend toward `other` by `t` in `[0, 1]`. Stands in for alpha on
    /// surfaces that cannot do transparency.
    pub fn mix(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Color::rgb(lerp(self.r, other.r), lerp(self.g, other.g), lerp(self.b, other.b))
    }

    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 128, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const GOLD: Color = Color::rgb(255, 215, 0);
    pub const SKY: Color = Color::rgb(135, 206, 235);
}

pub trait Surface {
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color);

    /// Filled axis-aligned ellipse centred on `(cx, cy)`.
    fn fill_ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32, color: Color);

    /// Text anchored at its horizontal centre, `y` is the baseline row.
    fn text(&mut self, cx: f32, y: f32, text: &str, color: Color);
}
