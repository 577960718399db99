/// Opaque RGB color, components conventionally in [0.0, 1.0].
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl Color {
    pub const fn new(red: f32, green: f32, blue: f32) -> Self {
        Color { red, green, blue }
    }

    pub const MAGENTA: Color = Color::new(1.0, 0.0, 1.0);
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.red, self.green, self.blue)
    }
}
