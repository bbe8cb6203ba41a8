use palette::Lab;
use palette::white_point::D65;

/// L\*a\*b\* triple as produced by [`rgb_to_lab`].
pub type LabColor = Lab<D65, f64>;

// D65 reference white.
const XN: f64 = 0.95047;
const YN: f64 = 1.0;
const ZN: f64 = 1.08883;

const LAB_EPSILON: f64 = 0.008856;

#[inline]
fn srgb_to_linear(channel: u8) -> f64 {
    let c = channel as f64 / 255.0;
    if c > 0.04045 {
        ((c + 0.055) / 1.055).powf(2.4)
    } else {
        c / 12.92
    }
}

#[inline]
fn lab_f(t: f64) -> f64 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

/// Convert an 8-bit sRGB triple to CIE L\*a\*b\* (D65).
///
/// Gamma expansion, then the linear RGB → XYZ matrix, then the XYZ → Lab
/// nonlinearity, with the four-digit matrix coefficients (not palette's
/// `IntoColor` path).
pub fn rgb_to_lab(r: u8, g: u8, b: u8) -> LabColor {
    let r = srgb_to_linear(r);
    let g = srgb_to_linear(g);
    let b = srgb_to_linear(b);

    let x = (r * 0.4124 + g * 0.3576 + b * 0.1805) / XN;
    let y = (r * 0.2126 + g * 0.7152 + b * 0.0722) / YN;
    let z = (r * 0.0193 + g * 0.1192 + b * 0.9505) / ZN;

    let fx = lab_f(x);
    let fy = lab_f(y);
    let fz = lab_f(z);

    Lab::new(116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz))
}

/// Hue in whole degrees, saturation and value as percentages with two decimals.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsv {
    pub hue: u16,
    pub saturation: f64,
    pub value: f64,
}

#[inline]
fn round_percent(n: f64) -> f64 {
    (n * 100.0).round() / 100.0
}

/// Convert an 8-bit RGB triple to HSV.
///
/// Greys (zero channel spread) get hue and saturation 0.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> Hsv {
    let r = r as f64 / 255.0;
    let g = g as f64 / 255.0;
    let b = b as f64 / 255.0;

    let v = r.max(g).max(b);
    let diff = v - r.min(g).min(b);

    let (mut h, s) = if diff == 0.0 {
        (0.0, 0.0)
    } else {
        let diffc = |c: f64| (v - c) / 6.0 / diff + 0.5;
        let (rr, gg, bb) = (diffc(r), diffc(g), diffc(b));

        let h = if r == v {
            bb - gg
        } else if g == v {
            1.0 / 3.0 + rr - bb
        } else {
            2.0 / 3.0 + gg - rr
        };
        (h, diff / v)
    };

    if h < 0.0 {
        h += 1.0;
    } else if h > 1.0 {
        h -= 1.0;
    }

    Hsv {
        hue: (h * 360.0).round() as u16,
        saturation: round_percent(s * 100.0),
        value: round_percent(v * 100.0),
    }
}

/// Perceptual difference between two Lab colors (CIE76 with the CIE94-style
/// chroma and hue weighting, `kL = kC = kH = 1`).
///
/// The weights are taken from `reference`'s chroma, so the result is only
/// symmetric when both colors share the same chroma.
///
/// | ΔE      | perception                          |
/// |---------|-------------------------------------|
/// | < 1     | not perceptible                     |
/// | 1 – 2   | perceptible through close look      |
/// | 2 – 10  | perceptible at a glance             |
/// | 11 – 49 | more similar than opposite          |
/// | 100     | complete opposite                   |
pub fn delta_e(reference: &LabColor, other: &LabColor) -> f64 {
    let delta_l = reference.l - other.l;
    let delta_a = reference.a - other.a;
    let delta_b = reference.b - other.b;

    let c1 = (reference.a * reference.a + reference.b * reference.b).sqrt();
    let c2 = (other.a * other.a + other.b * other.b).sqrt();
    let delta_c = c1 - c2;

    // Cancellation can push these below zero.
    let delta_h_sq = delta_a * delta_a + delta_b * delta_b - delta_c * delta_c;
    let delta_h = if delta_h_sq < 0.0 { 0.0 } else { delta_h_sq.sqrt() };

    let sc = 1.0 + 0.045 * c1;
    let sh = 1.0 + 0.015 * c1;

    let dl = delta_l;
    let dc = delta_c / sc;
    let dh = delta_h / sh;

    let sum = dl * dl + dc * dc + dh * dh;
    if sum < 0.0 { 0.0 } else { sum.sqrt() }
}
