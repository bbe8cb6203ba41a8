use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaletteError {
    /// The pixel buffer does not hold a whole number of RGBA quadruplets.
    #[error("pixel buffer length {len} is not a multiple of 4")]
    MisalignedBuffer { len: usize },
    #[error("maximum palette size must not be negative (got {0})")]
    NegativeMax(i64),
    #[error("minimum alpha must be within 0..=255 (got {0})")]
    MinAlphaOutOfRange(i64),
    #[error("similarity threshold must be a finite, non-negative number (got {0})")]
    InvalidThreshold(f64),
    #[error("unable to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, PaletteError>;
