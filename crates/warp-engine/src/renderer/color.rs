use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// 8-bit RGB with a float alpha, serialised as a `#rrggbb` / `#rrggbbaa` string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    /// Amber used for the dust and cluster layer.
    pub const GOLD: Rgba = Rgba::rgb(251, 191, 36);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Rgba { r, g, b, a: 1.0 }
    }

    /// Same colour with alpha replaced, clamped into [0, 1]. NaN becomes 0.
    pub fn with_alpha(self, a: f32) -> Self {
        Rgba {
            a: clamp_unit(a),
            ..self
        }
    }

    /// Multiply alpha by `factor`, clamped into [0, 1].
    pub fn fade(self, factor: f32) -> Self {
        self.with_alpha(self.a * factor)
    }

    /// CSS `rgba(...)` form for Canvas 2D style strings.
    pub fn to_css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, clamp_unit(self.a))
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> Result<Self, ConfigError> {
        let bad = || ConfigError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(bad)?;
        if !hex.is_ascii() {
            return Err(bad());
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
        match hex.len() {
            3 => {
                let nib = |i: usize| {
                    u8::from_str_radix(&hex[i..i + 1], 16)
                        .map(|v| v * 17)
                        .map_err(|_| bad())
                };
                Ok(Rgba::rgb(nib(0)?, nib(1)?, nib(2)?))
            }
            6 => Ok(Rgba::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Ok(Rgba::rgb(byte(0)?, byte(2)?, byte(4)?).with_alpha(byte(6)? as f32 / 255.0)),
            _ => Err(bad()),
        }
    }
}

/// Clamp into [0, 1]; anything non-finite counts as fully transparent.
pub fn clamp_unit(v: f32) -> f32 {
    if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a < 1.0 {
            write!(f, "{:02x}", (clamp_unit(self.a) * 255.0).round() as u8)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Rgba {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgba::from_hex(&value)
    }
}

impl From<Rgba> for String {
    fn from(c: Rgba) -> String {
        c.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_forms() {
        assert_eq!(Rgba::from_hex("#fbbf24").unwrap(), Rgba::GOLD);
        assert_eq!(Rgba::from_hex("#fff").unwrap(), Rgba::WHITE);
        let translucent = Rgba::from_hex("#00000080").unwrap();
        assert!((translucent.a - 128.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_garbage() {
        assert!(Rgba::from_hex("fbbf24").is_err());
        assert!(Rgba::from_hex("#zzzzzz").is_err());
        assert!(Rgba::from_hex("#12345").is_err());
    }

    #[test]
    fn alpha_is_clamped() {
        assert_eq!(Rgba::WHITE.with_alpha(1.7).a, 1.0);
        assert_eq!(Rgba::WHITE.with_alpha(-0.2).a, 0.0);
        assert_eq!(Rgba::WHITE.with_alpha(f32::NAN).a, 0.0);
        assert_eq!(Rgba::GOLD.with_alpha(0.5).fade(0.4).a, 0.2);
    }

    #[test]
    fn css_string() {
        assert_eq!(Rgba::GOLD.with_alpha(0.5).to_css(), "rgba(251, 191, 36, 0.5)");
    }

    #[test]
    fn serde_uses_hex_strings() {
        let json = serde_json::to_string(&Rgba::GOLD).unwrap();
        assert_eq!(json, "\"#fbbf24\"");
        let back: Rgba = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Rgba::GOLD);
    }
}
