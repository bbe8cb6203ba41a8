use log::{debug, trace};
use palette::Srgb;

use crate::color_space::{LabColor, delta_e, rgb_to_lab};
use crate::error::{PaletteError, Result};

/// What happened to a single pixel fed to [`PaletteAccumulator::push`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Admission {
    /// Alpha at or below the opacity floor.
    Transparent,
    /// Equal to, or within the threshold of, an already accepted color.
    Duplicate,
    Accepted,
    /// A new color arrived while the palette was full. Scanning is over.
    Overflowed,
}

/// Collects the distinct colors of a pixel stream in first-encounter order.
///
/// Every candidate is compared against every accepted color, so the first
/// of two mutually similar colors always wins.
#[derive(Debug)]
pub struct PaletteAccumulator {
    threshold: f64,
    min_alpha: u8,
    max_colors: usize,
    colors: Vec<Srgb<u8>>,
    // Lab of each entry in `colors`, same index. Empty when `threshold` is 0.
    labs: Vec<LabColor>,
    overflowed: bool,
}

impl PaletteAccumulator {
    pub fn new(threshold: f64, min_alpha: u8, max_colors: usize) -> Self {
        Self {
            threshold,
            min_alpha,
            max_colors,
            colors: Vec::new(),
            labs: Vec::new(),
            overflowed: false,
        }
    }

    /// Offer one RGBA pixel. Once [`Admission::Overflowed`] has been returned
    /// every further pixel is ignored with the same answer.
    pub fn push(&mut self, [r, g, b, a]: [u8; 4]) -> Admission {
        if self.overflowed {
            return Admission::Overflowed;
        }
        if a <= self.min_alpha {
            return Admission::Transparent;
        }

        let candidate = Srgb::new(r, g, b);
        if self.colors.contains(&candidate) {
            return Admission::Duplicate;
        }

        // A threshold of 0 means exact matches only; no Lab is kept then.
        let lab = if self.threshold != 0.0 {
            let lab = rgb_to_lab(r, g, b);
            if self
                .labs
                .iter()
                .any(|accepted| delta_e(accepted, &lab) <= self.threshold)
            {
                return Admission::Duplicate;
            }
            Some(lab)
        } else {
            None
        };

        if self.colors.len() >= self.max_colors {
            self.overflowed = true;
            return Admission::Overflowed;
        }

        trace!("accepted #{:02x}{:02x}{:02x} as color {}", r, g, b, self.colors.len());
        self.colors.push(candidate);
        self.labs.extend(lab);
        Admission::Accepted
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// Accepted colors in encounter order, plus the overflow flag.
    pub fn finish(self) -> (Vec<Srgb<u8>>, bool) {
        (self.colors, self.overflowed)
    }
}

/// Scan a flat RGBA buffer in raster order and return its distinct colors in
/// first-encounter order, and whether the palette was cut off at `max_colors`.
///
/// Fails before reading anything if `pixels.len()` is not a multiple of 4.
pub fn extract(
    pixels: &[u8],
    threshold: f64,
    min_alpha: u8,
    max_colors: usize,
) -> Result<(Vec<Srgb<u8>>, bool)> {
    if pixels.len() % 4 != 0 {
        return Err(PaletteError::MisalignedBuffer { len: pixels.len() });
    }

    let mut acc = PaletteAccumulator::new(threshold, min_alpha, max_colors);
    let mut scanned = 0usize;
    for chunk in pixels.chunks_exact(4) {
        scanned += 1;
        if acc.push([chunk[0], chunk[1], chunk[2], chunk[3]]) == Admission::Overflowed {
            break;
        }
    }

    debug!(
        "scanned {} of {} pixels, kept {} colors (overflowed: {})",
        scanned,
        pixels.len() / 4,
        acc.len(),
        acc.overflowed()
    );
    Ok(acc.finish())
}
