//! `#RRGGBB` color parsing.

use crate::error::{Error, Result};

/// Alpha byte appended to every parsed color
const OPAQUE: u32 = 0xFF;

/// Parses `#RRGGBB` (hex digits in either case) into `0xRRGGBBFF`.
///
/// Any other form, including `#RGB`, `#RRGGBBAA` and named colors, fails
/// with [`Error::InvalidColor`].
pub fn parse_color(color: &str) -> Result<u32> {
    rgba(color).ok_or_else(|| Error::invalid_color("color", color))
}

pub(crate) fn rgba(color: &str) -> Option<u32> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let rgb = u32::from_str_radix(hex, 16).ok()?;
    Some((rgb << 8) | OPAQUE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("#FF0000").unwrap(), 0xFF0000FF);
        assert_eq!(parse_color("#ff00ff").unwrap(), 0xFF00FFFF);
        assert_eq!(parse_color("#000000").unwrap(), 0x000000FF);
        assert_eq!(parse_color("#aBcDeF").unwrap(), 0xABCDEFFF);
    }

    #[test]
    fn test_rejects_other_forms() {
        for bad in ["red", "#fff", "#ff00ff00", "ff00ff", "#gg0000", "#+f0000", " #ff0000", ""] {
            let err = parse_color(bad).unwrap_err();
            assert!(
                matches!(err, Error::InvalidColor { ref color, .. } if color == bad),
                "{bad:?} should be rejected"
            );
        }
    }
}
