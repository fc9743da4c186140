//! Colour parsing
//!
//! Scene colours are authored as `#rrggbb` sRGB strings and converted to
//! linear RGB for lighting.

use glam::Vec3;

use crate::config::ConfigError;

/// Parse `#rrggbb` into sRGB components in `[0, 1]`.
pub fn parse_hex_color(text: &str) -> Result<Vec3, ConfigError> {
    let invalid = || ConfigError::InvalidColor(text.to_owned());
    let hex = text.strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }

    let channel = |range: std::ops::Range<usize>| -> Result<f32, ConfigError> {
        u8::from_str_radix(&hex[range], 16)
            .map(|value| value as f32 / 255.0)
            .map_err(|_| invalid())
    };
    Ok(Vec3::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Convert sRGB components to linear RGB.
pub fn srgb_to_linear(srgb: Vec3) -> Vec3 {
    let convert = |c: f32| {
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    Vec3::new(convert(srgb.x), convert(srgb.y), convert(srgb.z))
}

/// Parse `#rrggbb` straight into linear RGB.
pub fn parse_linear_color(text: &str) -> Result<Vec3, ConfigError> {
    parse_hex_color(text).map(srgb_to_linear)
}
