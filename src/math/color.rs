//! RGBA color type with alpha-weighted blending

use log::warn;
use rand::Rng;

use super::MathError;

/// An RGBA color with channels in the 0.0 to 1.0 range; defaults to opaque white
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    /// Red channel
    pub r: f64,
    /// Green channel
    pub g: f64,
    /// Blue channel
    pub b: f64,
    /// Alpha channel
    pub a: f64,
}

impl Default for Color {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }
}

impl Color {
    /// Create a color from its channels
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque color from RGB channels
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Create a gray with the given alpha
    pub const fn gray(scalar: f64, a: f64) -> Self {
        Self::new(scalar, scalar, scalar, a)
    }

    /// Set the RGB channels to `scalar` and the alpha channel to `a`
    pub fn set_gray(&mut self, scalar: f64, a: f64) {
        *self = Self::gray(scalar, a);
    }

    /// Create a color from a hex value.
    ///
    /// Values above `0xffffff` are read as 8-digit RGBA hex, anything else
    /// as 6-digit RGB with full alpha.
    pub fn from_hex(hex: u32) -> Self {
        if hex > 0xff_ff_ff {
            Self::from_hex_rgba(hex)
        } else {
            Self::new(
                f64::from(hex >> 16 & 255) / 255.0,
                f64::from(hex >> 8 & 255) / 255.0,
                f64::from(hex & 255) / 255.0,
                1.0,
            )
        }
    }

    /// Create a color from an 8-digit RGBA hex value
    pub fn from_hex_rgba(hex: u32) -> Self {
        Self::new(
            f64::from(hex >> 24 & 255) / 255.0,
            f64::from(hex >> 16 & 255) / 255.0,
            f64::from(hex >> 8 & 255) / 255.0,
            f64::from(hex & 255) / 255.0,
        )
    }

    /// Look up a CSS color keyword such as `"cornflowerblue"`
    pub fn from_name(name: &str) -> Option<Self> {
        keyword_hex(name).map(Self::from_hex)
    }

    /// Set this color from a CSS keyword. An unknown name logs a warning
    /// and leaves the color unchanged rather than failing the call.
    pub fn set_name(&mut self, name: &str) {
        match Self::from_name(name) {
            Some(color) => *self = color,
            None => warn!("Color: unknown color name '{name}', color left unchanged"),
        }
    }

    /// Pack the channels into an 8-digit RGBA hex value
    pub fn to_hex(&self) -> u32 {
        ((self.r * 255.0) as u32) << 24
            ^ ((self.g * 255.0) as u32) << 16
            ^ ((self.b * 255.0) as u32) << 8
            ^ (self.a * 255.0) as u32
    }

    /// Get a channel by index (0 = r, 1 = g, 2 = b, 3 = a)
    pub fn component(&self, index: usize) -> Result<f64, MathError> {
        match index {
            0 => Ok(self.r),
            1 => Ok(self.g),
            2 => Ok(self.b),
            3 => Ok(self.a),
            _ => Err(MathError::IndexOutOfRange { index, limit: 4 }),
        }
    }

    /// Set a channel by index (0 = r, 1 = g, 2 = b, 3 = a)
    pub fn set_component(&mut self, index: usize, value: f64) -> Result<(), MathError> {
        match index {
            0 => self.r = value,
            1 => self.g = value,
            2 => self.b = value,
            3 => self.a = value,
            _ => return Err(MathError::IndexOutOfRange { index, limit: 4 }),
        }
        Ok(())
    }

    /// Add `v`'s alpha-weighted RGB to this color; alpha is untouched
    pub fn add(&self, v: &Self) -> Self {
        Self::new(
            self.r + v.r * v.a,
            self.g + v.g * v.a,
            self.b + v.b * v.a,
            self.a,
        )
    }

    /// Sum of two alpha-weighted colors; alpha comes from `a`
    pub fn add_colors(a: &Self, b: &Self) -> Self {
        Self::new(
            a.r * a.a + b.r * b.a,
            a.g * a.a + b.g * b.a,
            a.b * a.a + b.b * b.a,
            a.a,
        )
    }

    /// Subtract `v`'s alpha-weighted RGB from this color; alpha is untouched
    pub fn sub(&self, v: &Self) -> Self {
        Self::new(
            self.r - v.r * v.a,
            self.g - v.g * v.a,
            self.b - v.b * v.a,
            self.a,
        )
    }

    /// Add a scalar to the RGB channels
    pub fn add_scalar(&self, s: f64) -> Self {
        Self::new(self.r + s, self.g + s, self.b + s, self.a)
    }

    /// Component-wise RGB product with another color
    pub fn multiply(&self, color: &Self) -> Self {
        Self::new(self.r * color.r, self.g * color.g, self.b * color.b, self.a)
    }

    /// Multiply the RGB channels by a scalar
    pub fn multiply_scalar(&self, s: f64) -> Self {
        Self::new(self.r * s, self.g * s, self.b * s, self.a)
    }

    /// Linear interpolation of all four channels towards `v`
    pub fn lerp(&self, v: &Self, alpha: f64) -> Self {
        Self::new(
            self.r + (v.r - self.r) * alpha,
            self.g + (v.g - self.g) * alpha,
            self.b + (v.b - self.b) * alpha,
            self.a + (v.a - self.a) * alpha,
        )
    }

    /// Linear interpolation between two colors
    pub fn lerp_colors(v1: &Self, v2: &Self, alpha: f64) -> Self {
        v1.lerp(v2, alpha)
    }

    /// Create a color with channels uniformly sampled from [0, 1)
    pub fn random() -> Self {
        let mut rng = rand::rng();
        Self::new(rng.random(), rng.random(), rng.random(), rng.random())
    }

    /// Channels as an `[r, g, b, a]` array
    pub fn to_array(self) -> [f64; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create a color from an `[r, g, b, a]` array
    pub fn from_array(array: [f64; 4]) -> Self {
        Self::new(array[0], array[1], array[2], array[3])
    }
}

/// CSS color keyword table
fn keyword_hex(name: &str) -> Option<u32> {
    let hex = match name {
        "aliceblue" => 0xF0F8FF,
        "antiquewhite" => 0xFAEBD7,
        "aqua" => 0x00FFFF,
        "aquamarine" => 0x7FFFD4,
        "azure" => 0xF0FFFF,
        "beige" => 0xF5F5DC,
        "bisque" => 0xFFE4C4,
        "black" => 0x000000,
        "blanchedalmond" => 0xFFEBCD,
        "blue" => 0x0000FF,
        "blueviolet" => 0x8A2BE2,
        "brown" => 0xA52A2A,
        "burlywood" => 0xDEB887,
        "cadetblue" => 0x5F9EA0,
        "chartreuse" => 0x7FFF00,
        "chocolate" => 0xD2691E,
        "coral" => 0xFF7F50,
        "cornflowerblue" => 0x6495ED,
        "cornsilk" => 0xFFF8DC,
        "crimson" => 0xDC143C,
        "cyan" => 0x00FFFF,
        "darkblue" => 0x00008B,
        "darkcyan" => 0x008B8B,
        "darkgoldenrod" => 0xB8860B,
        "darkgray" => 0xA9A9A9,
        "darkgreen" => 0x006400,
        "darkgrey" => 0xA9A9A9,
        "darkkhaki" => 0xBDB76B,
        "darkmagenta" => 0x8B008B,
        "darkolivegreen" => 0x556B2F,
        "darkorange" => 0xFF8C00,
        "darkorchid" => 0x9932CC,
        "darkred" => 0x8B0000,
        "darksalmon" => 0xE9967A,
        "darkseagreen" => 0x8FBC8F,
        "darkslateblue" => 0x483D8B,
        "darkslategray" => 0x2F4F4F,
        "darkslategrey" => 0x2F4F4F,
        "darkturquoise" => 0x00CED1,
        "darkviolet" => 0x9400D3,
        "deeppink" => 0xFF1493,
        "deepskyblue" => 0x00BFFF,
        "dimgray" => 0x696969,
        "dimgrey" => 0x696969,
        "dodgerblue" => 0x1E90FF,
        "firebrick" => 0xB22222,
        "floralwhite" => 0xFFFAF0,
        "forestgreen" => 0x228B22,
        "fuchsia" => 0xFF00FF,
        "gainsboro" => 0xDCDCDC,
        "ghostwhite" => 0xF8F8FF,
        "gold" => 0xFFD700,
        "goldenrod" => 0xDAA520,
        "gray" => 0x808080,
        "green" => 0x008000,
        "greenyellow" => 0xADFF2F,
        "grey" => 0x808080,
        "honeydew" => 0xF0FFF0,
        "hotpink" => 0xFF69B4,
        "indianred" => 0xCD5C5C,
        "indigo" => 0x4B0082,
        "ivory" => 0xFFFFF0,
        "khaki" => 0xF0E68C,
        "lavender" => 0xE6E6FA,
        "lavenderblush" => 0xFFF0F5,
        "lawngreen" => 0x7CFC00,
        "lemonchiffon" => 0xFFFACD,
        "lightblue" => 0xADD8E6,
        "lightcoral" => 0xF08080,
        "lightcyan" => 0xE0FFFF,
        "lightgoldenrodyellow" => 0xFAFAD2,
        "lightgray" => 0xD3D3D3,
        "lightgreen" => 0x90EE90,
        "lightgrey" => 0xD3D3D3,
        "lightpink" => 0xFFB6C1,
        "lightsalmon" => 0xFFA07A,
        "lightseagreen" => 0x20B2AA,
        "lightskyblue" => 0x87CEFA,
        "lightslategray" => 0x778899,
        "lightslategrey" => 0x778899,
        "lightsteelblue" => 0xB0C4DE,
        "lightyellow" => 0xFFFFE0,
        "lime" => 0x00FF00,
        "limegreen" => 0x32CD32,
        "linen" => 0xFAF0E6,
        "magenta" => 0xFF00FF,
        "maroon" => 0x800000,
        "mediumaquamarine" => 0x66CDAA,
        "mediumblue" => 0x0000CD,
        "mediumorchid" => 0xBA55D3,
        "mediumpurple" => 0x9370DB,
        "mediumseagreen" => 0x3CB371,
        "mediumslateblue" => 0x7B68EE,
        "mediumspringgreen" => 0x00FA9A,
        "mediumturquoise" => 0x48D1CC,
        "mediumvioletred" => 0xC71585,
        "midnightblue" => 0x191970,
        "mintcream" => 0xF5FFFA,
        "mistyrose" => 0xFFE4E1,
        "moccasin" => 0xFFE4B5,
        "navajowhite" => 0xFFDEAD,
        "navy" => 0x000080,
        "oldlace" => 0xFDF5E6,
        "olive" => 0x808000,
        "olivedrab" => 0x6B8E23,
        "orange" => 0xFFA500,
        "orangered" => 0xFF4500,
        "orchid" => 0xDA70D6,
        "palegoldenrod" => 0xEEE8AA,
        "palegreen" => 0x98FB98,
        "paleturquoise" => 0xAFEEEE,
        "palevioletred" => 0xDB7093,
        "papayawhip" => 0xFFEFD5,
        "peachpuff" => 0xFFDAB9,
        "peru" => 0xCD853F,
        "pink" => 0xFFC0CB,
        "plum" => 0xDDA0DD,
        "powderblue" => 0xB0E0E6,
        "purple" => 0x800080,
        "rebeccapurple" => 0x663399,
        "red" => 0xFF0000,
        "rosybrown" => 0xBC8F8F,
        "royalblue" => 0x4169E1,
        "saddlebrown" => 0x8B4513,
        "salmon" => 0xFA8072,
        "sandybrown" => 0xF4A460,
        "seagreen" => 0x2E8B57,
        "seashell" => 0xFFF5EE,
        "sienna" => 0xA0522D,
        "silver" => 0xC0C0C0,
        "skyblue" => 0x87CEEB,
        "slateblue" => 0x6A5ACD,
        "slategray" => 0x708090,
        "slategrey" => 0x708090,
        "snow" => 0xFFFAFA,
        "springgreen" => 0x00FF7F,
        "steelblue" => 0x4682B4,
        "tan" => 0xD2B48C,
        "teal" => 0x008080,
        "thistle" => 0xD8BFD8,
        "tomato" => 0xFF6347,
        "turquoise" => 0x40E0D0,
        "violet" => 0xEE82EE,
        "wheat" => 0xF5DEB3,
        "white" => 0xFFFFFF,
        "whitesmoke" => 0xF5F5F5,
        "yellow" => 0xFFFF00,
        "yellowgreen" => 0x9ACD32,
        _ => return None,
    };
    Some(hex)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_is_opaque_white() {
        let c = Color::default();
        assert_eq!(c.to_array(), [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_hex_round_trip() {
        let c = Color::from_hex(0xFF8000);
        assert_relative_eq!(c.r, 1.0);
        assert_relative_eq!(c.g, 128.0 / 255.0);
        assert_relative_eq!(c.b, 0.0);
        assert_relative_eq!(c.a, 1.0);
        assert_eq!(c.to_hex(), 0xFF8000FF);
    }

    #[test]
    fn test_rgba_hex_is_detected() {
        let c = Color::from_hex(0x11223344);
        assert_relative_eq!(c.r, 17.0 / 255.0);
        assert_relative_eq!(c.a, 68.0 / 255.0);
        assert_eq!(c.to_hex(), 0x11223344);
    }

    #[test]
    fn test_keyword_lookup() {
        let c = Color::from_name("cornflowerblue").unwrap();
        assert_eq!(c.to_hex(), 0x6495EDFF);
        assert!(Color::from_name("notacolor").is_none());
    }

    #[test]
    fn test_unknown_name_is_a_no_op() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut c = Color::from_hex(0x123456);
        let before = c;
        c.set_name("definitely-not-css");
        assert_eq!(c, before);

        c.set_name("red");
        assert_eq!(c.to_hex(), 0xFF0000FF);
    }

    #[test]
    fn test_alpha_weighted_add() {
        let base = Color::new(0.5, 0.5, 0.5, 1.0);
        let overlay = Color::new(1.0, 0.0, 0.0, 0.5);
        let sum = base.add(&overlay);
        assert_relative_eq!(sum.r, 1.0);
        assert_relative_eq!(sum.g, 0.5);
        // alpha is not accumulated
        assert_relative_eq!(sum.a, 1.0);
    }

    #[test]
    fn test_lerp_covers_alpha() {
        let a = Color::new(0.0, 0.0, 0.0, 0.0);
        let b = Color::new(1.0, 1.0, 1.0, 1.0);
        let mid = a.lerp(&b, 0.5);
        assert_eq!(mid.to_array(), [0.5, 0.5, 0.5, 0.5]);
    }

    #[test]
    fn test_component_index_bounds() {
        let c = Color::default();
        assert_eq!(c.component(3), Ok(1.0));
        assert_eq!(
            c.component(4),
            Err(MathError::IndexOutOfRange { index: 4, limit: 4 })
        );
    }
}
