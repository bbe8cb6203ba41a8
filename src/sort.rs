use palette::Srgb;

use crate::color_space::rgb_to_hsv;

/// Bucket width multiplier for the step sort.
const REPETITIONS: f64 = 8.0;

/// Coarsened `(hue, luminance, value)` ordering key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortKey {
    pub hue: u32,
    pub luminance: u32,
    pub value: u32,
}

/// Square root of a weighted sum of the raw 0–255 channels.
#[inline]
fn luminance(r: u8, g: u8, b: u8) -> f64 {
    (0.241 * r as f64 + 0.691 * g as f64 + 0.068 * b as f64).sqrt()
}

pub fn sort_key(color: Srgb<u8>) -> SortKey {
    let (r, g, b) = (color.red, color.green, color.blue);
    let hsv = rgb_to_hsv(r, g, b);
    SortKey {
        hue: (hsv.hue as f64 * REPETITIONS).floor() as u32,
        luminance: (luminance(r, g, b) * REPETITIONS).floor() as u32,
        value: (hsv.value * REPETITIONS).floor() as u32,
    }
}

/// Step sort: three stable passes, by value, then luminance, then hue.
///
/// The result is grouped by hue first; colors whose keys collide keep the
/// order they came in with.
pub fn order(colors: Vec<Srgb<u8>>) -> Vec<Srgb<u8>> {
    let mut keyed: Vec<(SortKey, Srgb<u8>)> = colors.into_iter().map(|c| (sort_key(c), c)).collect();

    keyed.sort_by_key(|(key, _)| key.value);
    keyed.sort_by_key(|(key, _)| key.luminance);
    keyed.sort_by_key(|(key, _)| key.hue);

    keyed.into_iter().map(|(_, c)| c).collect()
}
