use image::Rgba;

use crate::error::{BoothError, BoothResult};

/// Preset background swatches offered on the edit screen. The first entry is
/// the initial selection.
pub const DEFAULT_BACKGROUND_COLORS: &[&str] = &[
    "#FF6B9D", "#FFFFFF", "#000000", "#FFC947", "#4ECDC4", "#667EEA", "#2ED573", "#FF4757",
];

/// Parse a `#RRGGBB` or `#RGB` hex color into an opaque RGBA pixel.
pub fn parse_hex_color(s: &str) -> BoothResult<Rgba<u8>> {
    let hex = s
        .strip_prefix('#')
        .ok_or_else(|| BoothError::invalid_color(format!("'{s}' is missing '#' prefix")))?;

    if !hex.is_ascii() {
        return Err(BoothError::invalid_color(format!("'{s}' has non-hex digits")));
    }

    let channels: [u8; 3] = match hex.len() {
        6 => {
            let mut out = [0u8; 3];
            for (i, chunk) in out.iter_mut().enumerate() {
                *chunk = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
                    .map_err(|_| BoothError::invalid_color(format!("'{s}' has non-hex digits")))?;
            }
            out
        }
        3 => {
            let mut out = [0u8; 3];
            for (i, chunk) in out.iter_mut().enumerate() {
                let nibble = u8::from_str_radix(&hex[i..i + 1], 16)
                    .map_err(|_| BoothError::invalid_color(format!("'{s}' has non-hex digits")))?;
                *chunk = nibble * 0x11;
            }
            out
        }
        n => {
            return Err(BoothError::invalid_color(format!(
                "'{s}' has {n} hex digits, expected 3 or 6"
            )));
        }
    };

    Ok(Rgba([channels[0], channels[1], channels[2], 255]))
}
