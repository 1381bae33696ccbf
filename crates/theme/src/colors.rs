/// Normalised RGBA colour (each channel in `[0.0, 1.0]`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self { r: 1.0,   g: 1.0,   b: 1.0,   a: 1.0 }; // #ffffff
    pub const GRAY:  Self = Self { r: 0.2,   g: 0.2,   b: 0.2,   a: 1.0 }; // #333333
    pub const BLUE:  Self = Self { r: 0.0,   g: 0.0,   b: 1.0,   a: 1.0 }; // #0000ff
    pub const RED:   Self = Self { r: 1.0,   g: 0.0,   b: 0.0,   a: 1.0 }; // #ff0000

    /// Parse a CSS-style hex color string (`#RRGGBB` or `#RRGGBBAA`).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }

        let byte = |s: &str| -> Option<u8> { u8::from_str_radix(s, 16).ok() };

        match hex.len() {
            6 => Some(Self {
                r: byte(&hex[0..2])? as f32 / 255.0,
                g: byte(&hex[2..4])? as f32 / 255.0,
                b: byte(&hex[4..6])? as f32 / 255.0,
                a: 1.0,
            }),
            8 => Some(Self {
                r: byte(&hex[0..2])? as f32 / 255.0,
                g: byte(&hex[2..4])? as f32 / 255.0,
                b: byte(&hex[4..6])? as f32 / 255.0,
                a: byte(&hex[6..8])? as f32 / 255.0,
            }),
            _ => None,
        }
    }

    /// `#rrggbb` form for SVG `fill` / `stroke` attributes.  Alpha is
    /// emitted separately through [`Color::opacity`].
    pub fn to_hex(self) -> String {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", channel(self.r), channel(self.g), channel(self.b))
    }

    #[inline]
    pub fn opacity(self) -> f32 {
        self.a
    }
}
