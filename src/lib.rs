use wasm_bindgen::prelude::*;
use js_sys::{Array, Object, Reflect};
use log::debug;
use palette::Srgb;

pub mod accumulator;
pub mod color_space;
pub mod error;
pub mod hex;
pub mod request;
pub mod sort;

pub use accumulator::{Admission, PaletteAccumulator};
pub use color_space::{Hsv, LabColor, delta_e, rgb_to_hsv, rgb_to_lab};
pub use error::{PaletteError, Result};
pub use hex::{to_hex, to_hex_opaque};
pub use request::{RequestToken, RequestTracker};
pub use sort::{SortKey, sort_key};

// ------------------------------------------------------------
// Options and result
// ------------------------------------------------------------

/// Knobs for a single extraction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaletteOptions {
    /// Largest ΔE at which a new color counts as a duplicate of an accepted
    /// one. `0.0` keeps every byte-distinct color.
    pub threshold: f64,
    /// Pixels with alpha at or below this are ignored.
    pub min_alpha: u8,
    /// Palette size cap.
    pub max_colors: usize,
}

impl Default for PaletteOptions {
    fn default() -> Self {
        Self {
            threshold: 1.0,
            min_alpha: 10,
            max_colors: 30,
        }
    }
}

impl PaletteOptions {
    pub fn new(threshold: f64, min_alpha: u8, max_colors: usize) -> Result<Self> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(PaletteError::InvalidThreshold(threshold));
        }
        Ok(Self {
            threshold,
            min_alpha,
            max_colors,
        })
    }

    /// Like [`PaletteOptions::new`], for callers that hand over signed
    /// integers (JavaScript numbers, CLI input).
    pub fn from_signed(threshold: f64, min_alpha: i64, max_colors: i64) -> Result<Self> {
        let min_alpha = u8::try_from(min_alpha).map_err(|_| PaletteError::MinAlphaOutOfRange(min_alpha))?;
        let max_colors = usize::try_from(max_colors).map_err(|_| PaletteError::NegativeMax(max_colors))?;
        Self::new(threshold, min_alpha, max_colors)
    }
}

/// Sorted palette of an image.
#[derive(Clone, Debug, PartialEq)]
pub struct PaletteResult {
    pub colors: Vec<Srgb<u8>>,
    /// The image holds more distinct colors than `max_colors`.
    pub overflowed: bool,
    /// Number of colors kept.
    pub count: usize,
}

impl PaletteResult {
    pub fn hex_codes(&self) -> Vec<String> {
        self.colors.iter().map(|&c| to_hex_opaque(c)).collect()
    }
}

// ------------------------------------------------------------
// Extraction
// ------------------------------------------------------------

/// Extract the sorted, de-duplicated palette of a flat RGBA8 buffer
/// (row-major, `4 × width × height` bytes).
pub fn extract_palette(pixels: &[u8], options: &PaletteOptions) -> Result<PaletteResult> {
    let (unique, overflowed) = accumulator::extract(
        pixels,
        options.threshold,
        options.min_alpha,
        options.max_colors,
    )?;
    let colors = sort::order(unique);
    let count = colors.len();
    Ok(PaletteResult {
        colors,
        overflowed,
        count,
    })
}

/// Decode an encoded image (PNG, GIF, …) and extract its palette.
pub fn extract_palette_bytes(input: &[u8], options: &PaletteOptions) -> Result<PaletteResult> {
    let img = image::load_from_memory(input)?;
    debug!("decoded {}x{} image", img.width(), img.height());
    let raw = img.to_rgba8().into_raw();
    extract_palette(&raw, options)
}

// ------------------------------------------------------------
// JavaScript bindings
// ------------------------------------------------------------

fn js_options(threshold: f64, min_alpha: i32, max: i32) -> std::result::Result<PaletteOptions, JsValue> {
    PaletteOptions::from_signed(threshold, min_alpha as i64, max as i64)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn to_js_object(result: &PaletteResult) -> std::result::Result<Object, JsValue> {
    let colors_js = Array::new();
    for hex in result.hex_codes() {
        colors_js.push(&JsValue::from_str(&hex));
    }

    let out = Object::new();
    Reflect::set(&out, &JsValue::from_str("colors"), &colors_js)?;
    Reflect::set(&out, &JsValue::from_str("overflowed"), &JsValue::from_bool(result.overflowed))?;
    Reflect::set(&out, &JsValue::from_str("count"), &JsValue::from_f64(result.count as f64))?;
    Ok(out)
}

/// Extract the palette of raw RGBA pixels (e.g. `ImageData.data`).
///
/// Returns `{ colors: string[], overflowed: boolean, count: number }` where
/// `colors` are `#rrggbbaa` codes in display order.
#[wasm_bindgen(js_name = extractPalette)]
pub fn extract_palette_js(
    pixels: &[u8],
    threshold: f64,
    min_alpha: i32,
    max: i32,
) -> std::result::Result<Object, JsValue> {
    let options = js_options(threshold, min_alpha, max)?;
    let result = extract_palette(pixels, &options).map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_js_object(&result)
}

/// Same as `extractPalette`, but takes the bytes of an encoded image file.
#[wasm_bindgen(js_name = extractPaletteFromImage)]
pub fn extract_palette_from_image_js(
    input: Vec<u8>,
    threshold: f64,
    min_alpha: i32,
    max: i32,
) -> std::result::Result<Object, JsValue> {
    let options = js_options(threshold, min_alpha, max)?;
    let result = extract_palette_bytes(&input, &options).map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_js_object(&result)
}

/// Tracks which image selection is current so the UI can drop results of
/// decodes that were overtaken by a newer one.
#[wasm_bindgen]
#[derive(Debug, Default)]
pub struct PaletteSession {
    tracker: RequestTracker,
}

#[wasm_bindgen]
impl PaletteSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request for a new input and return its token.
    pub fn begin(&self) -> u64 {
        self.tracker.begin().id()
    }

    #[wasm_bindgen(js_name = isCurrent)]
    pub fn is_current(&self, token: u64) -> bool {
        self.tracker.is_current(RequestToken::from_id(token))
    }
}
