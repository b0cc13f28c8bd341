//! Brand-color helpers for text rendered over dark or brand-colored fills.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Luminance floor below which a color is considered unreadable over the
/// banner backgrounds this engine produces. A fixed heuristic, not a WCAG
/// contrast computation.
pub const READABLE_LUMINANCE_FLOOR: f64 = 0.35;

const LIGHTEN_BLEND: f64 = 0.6;

pub fn parse_hex(text: &str) -> Option<Rgb> {
    let hex = text.trim().strip_prefix('#')?;
    let (r, g, b) = match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1].repeat(2), 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2].repeat(2), 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3].repeat(2), 16).ok()?;
            (r, g, b)
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            (r, g, b)
        }
        _ => return None,
    };
    Some(Rgb { r, g, b })
}

pub fn to_hex(rgb: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b)
}

/// Rec. 601 luma over 0-255 channels, normalized to 0-1.
pub fn relative_luminance(rgb: Rgb) -> f64 {
    (0.299 * rgb.r as f64 + 0.587 * rgb.g as f64 + 0.114 * rgb.b as f64) / 255.0
}

/// Guarantees a minimum visibility floor for price/brand text.
///
/// Colors at or above [`READABLE_LUMINANCE_FLOOR`] pass through unchanged
/// (byte-for-byte, so callers can compare against their catalog value).
/// Darker colors get each channel blended 60% of the way toward white.
/// Unparseable input passes through untouched.
pub fn ensure_readable(hex: &str) -> String {
    let Some(rgb) = parse_hex(hex) else {
        return hex.to_string();
    };
    if relative_luminance(rgb) >= READABLE_LUMINANCE_FLOOR {
        return hex.to_string();
    }

    let lift = |c: u8| -> u8 {
        let v = c as f64 + (255.0 - c as f64) * LIGHTEN_BLEND;
        v.round().clamp(0.0, 255.0) as u8
    };
    to_hex(Rgb {
        r: lift(rgb.r),
        g: lift(rgb.g),
        b: lift(rgb.b),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_black_is_lifted_strictly_lighter() {
        let out = ensure_readable("#050505");
        assert_ne!(out, "#050505");
        let rgb = parse_hex(&out).unwrap();
        assert!(relative_luminance(rgb) > relative_luminance(Rgb { r: 5, g: 5, b: 5 }));
    }

    #[test]
    fn white_passes_through_byte_identical() {
        assert_eq!(ensure_readable("#FFFFFF"), "#FFFFFF");
    }

    #[test]
    fn boundary_luminance_is_not_touched() {
        // #5a5a5a has luminance 90/255 ≈ 0.353, just above the floor.
        assert_eq!(ensure_readable("#5a5a5a"), "#5a5a5a");
    }

    #[test]
    fn short_hex_form_is_accepted() {
        assert_eq!(parse_hex("#fff"), Some(Rgb { r: 255, g: 255, b: 255 }));
        let out = ensure_readable("#000");
        assert_eq!(out, "#999999");
    }

    #[test]
    fn unparseable_input_passes_through() {
        assert_eq!(ensure_readable("tomato"), "tomato");
    }
}
