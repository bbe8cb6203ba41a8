use palette::Srgb;

/// Render `#rrggbbaa` in lowercase. `alpha` is in `0.0..=1.0`.
pub fn to_hex(r: u8, g: u8, b: u8, alpha: f64) -> String {
    let a = (alpha * 255.0).round() as u32;
    let mut a_hex = format!("{a:02x}");
    a_hex.truncate(2);
    format!("#{r:02x}{g:02x}{b:02x}{a_hex}")
}

/// Palette swatches are always rendered fully opaque.
pub fn to_hex_opaque(color: Srgb<u8>) -> String {
    to_hex(color.red, color.green, color.blue, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_and_lowercases() {
        assert_eq!(to_hex(10, 10, 10, 1.0), "#0a0a0aff");
        assert_eq!(to_hex(200, 50, 50, 1.0), "#c83232ff");
        assert_eq!(to_hex(0, 0, 0, 0.0), "#00000000");
        assert_eq!(to_hex(255, 171, 205, 0.5), "#ffabcd80");
    }

    #[test]
    fn opaque_swatches_are_nine_chars() {
        for &(r, g, b) in &[(0, 0, 0), (1, 2, 3), (255, 255, 255), (16, 15, 160)] {
            let hex = to_hex_opaque(Srgb::new(r, g, b));
            assert_eq!(hex.len(), 9);
            assert!(hex.starts_with('#'));
            assert!(hex.ends_with("ff"));
            assert!(hex[1..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }

    #[test]
    fn oversized_alpha_is_cut_to_two_digits() {
        // 255 * 255 = 0xfe01
        assert_eq!(to_hex(0, 0, 0, 255.0), "#000000fe");
    }
}
