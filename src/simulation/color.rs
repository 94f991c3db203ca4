//! RGB color used for the swarm's target and smoothed display color.
//!
//! Components are linear floats, nominally in `0..=1`. Deserializes from
//! either a hex string (`"#44aaff"`, `"44aaff"`) or a `[r, g, b]` array.

use std::str::FromStr;

use serde::Deserialize;

use crate::configuration::config::ConfigError;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(try_from = "ColorRepr")]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Linear interpolation toward `target` by `alpha` (0 = self, 1 = target).
    pub fn lerp(&self, target: &Rgb, alpha: f64) -> Rgb {
        Rgb {
            r: self.r + (target.r - self.r) * alpha,
            g: self.g + (target.g - self.g) * alpha,
            b: self.b + (target.b - self.b) * alpha,
        }
    }

    /// Euclidean distance in RGB space.
    pub fn distance(&self, other: &Rgb) -> f64 {
        let dr = self.r - other.r;
        let dg = self.g - other.g;
        let db = self.b - other.b;
        (dr * dr + dg * dg + db * db).sqrt()
    }

    pub fn from_hex(s: &str) -> Result<Rgb, ConfigError> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ConfigError::InvalidColor(s.to_string()));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map(|c| c as f64 / 255.0)
                .map_err(|_| ConfigError::InvalidColor(s.to_string()))
        };

        Ok(Rgb::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl FromStr for Rgb {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgb::from_hex(s)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Hex(String),
    Components([f64; 3]),
}

impl TryFrom<ColorRepr> for Rgb {
    type Error = ConfigError;

    fn try_from(repr: ColorRepr) -> Result<Self, Self::Error> {
        match repr {
            ColorRepr::Hex(s) => Rgb::from_hex(&s),
            ColorRepr::Components([r, g, b]) => Ok(Rgb::new(r, g, b)),
        }
    }
}
