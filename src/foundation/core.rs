use serde::{Deserialize, Serialize};

use crate::foundation::error::{SpotgridError, SpotgridResult};

pub use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// 4:5 portrait feed format.
    pub const PORTRAIT_4_5: Canvas = Canvas {
        width: 1080,
        height: 1350,
    };

    /// 9:16 vertical short-video format.
    pub const VERTICAL_9_16: Canvas = Canvas {
        width: 1080,
        height: 1920,
    };

    /// Full-canvas rectangle anchored at the origin.
    pub fn bounds(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::PORTRAIT_4_5
    }
}

/// Opaque sRGB color.
///
/// Deserializes from `"#RRGGBB"`, `"#RGB"` or `[r, g, b]`; serializes as `"#RRGGBB"`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Pure white.
    pub const WHITE: Rgb8 = Rgb8::new(0xFF, 0xFF, 0xFF);
    /// Pure black.
    pub const BLACK: Rgb8 = Rgb8::new(0x00, 0x00, 0x00);
    /// Pure red, used for the answer highlight.
    pub const RED: Rgb8 = Rgb8::new(0xFF, 0x00, 0x00);

    /// Construct a color from channel values.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` or `#RGB` (the leading `#` is optional).
    pub fn parse_hex(s: &str) -> SpotgridResult<Self> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        fn hex_byte(pair: &str) -> SpotgridResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| SpotgridError::config(format!("invalid hex byte \"{pair}\"")))
        }

        if !s.is_ascii() {
            return Err(SpotgridError::config("hex color must be ascii"));
        }

        match s.len() {
            6 => Ok(Self::new(
                hex_byte(&s[0..2])?,
                hex_byte(&s[2..4])?,
                hex_byte(&s[4..6])?,
            )),
            3 => {
                let nibble = |i: usize| hex_byte(&s[i..i + 1]).map(|v| v * 17);
                Ok(Self::new(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            _ => Err(SpotgridError::config(
                "hex color must be #RRGGBB or #RGB (case-insensitive)",
            )),
        }
    }

    /// Format as lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Arr([u8; 3]),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => Self::parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::Arr([r, g, b]) => Ok(Self::new(r, g, b)),
        }
    }
}
