#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    const fn hex_char_to_u8(c: u8) -> u8 {
        match c {
            b'0'..=b'9' => c - b'0',
            b'a'..=b'f' => c - b'a' + 10,
            b'A'..=b'F' => c - b'A' + 10,
            _ => 0,
        }
    }

    const fn hex_pair_to_u8(high: u8, low: u8) -> u8 {
        (Self::hex_char_to_u8(high) << 4) | Self::hex_char_to_u8(low)
    }

    /// Const-context constructor for the palette below. Expects exactly "RRGGBB".
    const fn hex(hex: &str) -> Self {
        let bytes = hex.as_bytes();
        Self {
            r: Self::hex_pair_to_u8(bytes[0], bytes[1]),
            g: Self::hex_pair_to_u8(bytes[2], bytes[3]),
            b: Self::hex_pair_to_u8(bytes[4], bytes[5]),
        }
    }

    pub fn to_crossterm_color(&self) -> crossterm::style::Color {
        crossterm::style::Color::Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }

    /// Packs as 0x00RRGGBB, the layout minifb expects.
    pub fn to_u32(&self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Blend toward `end` by `alpha` / 255.
    pub fn blend(&self, end: &Color, alpha: u8) -> Color {
        let mix = |a: u8, b: u8| -> u8 {
            let a = a as u32;
            let b = b as u32;
            let t = alpha as u32;
            ((a * (255 - t) + b * t + 127) / 255) as u8
        };
        Color {
            r: mix(self.r, end.r),
            g: mix(self.g, end.g),
            b: mix(self.b, end.b),
        }
    }
}

// Predefined colors
impl Color {
    pub const BLACK: Color = Color::hex("000000");
    pub const GRAY: Color = Color::hex("808080");
    pub const WHITE: Color = Color::hex("FFFFFF");
    pub const RED: Color = Color::hex("FF0000");
    pub const GREEN: Color = Color::hex("00FF00");
    pub const BLUE: Color = Color::hex("0000FF");
}

impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn const_palette_decodes_hex() {
        assert_eq!(Color::GRAY, Color::new(0x80, 0x80, 0x80));
        assert_eq!(Color::BLUE, Color::new(0, 0, 0xFF));
        assert_eq!(Color::hex("a0B1c2"), Color::new(0xA0, 0xB1, 0xC2));
    }

    #[test]
    fn packs_for_minifb() {
        assert_eq!(Color::new(0x12, 0x34, 0x56).to_u32(), 0x0012_3456);
        assert_eq!(Color::WHITE.to_u32(), 0x00FF_FFFF);
    }

    #[test]
    fn blend_endpoints() {
        assert_eq!(Color::BLACK.blend(&Color::WHITE, 0), Color::BLACK);
        assert_eq!(Color::BLACK.blend(&Color::WHITE, 255), Color::WHITE);
        assert_eq!(Color::BLACK.blend(&Color::WHITE, 128), Color::new(128, 128, 128));
    }
}
