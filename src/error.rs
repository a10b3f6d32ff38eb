use std::collections::TryReserveError;
use thiserror::Error;

/// Errors raised by the conversion pipelines.
///
/// A conversion aborts at the first error; partially written output files
/// are left on disk and must be overwritten on retry.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("failed to decode input image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("failed to encode output image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("audio container I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("buffer allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    #[error("input image has zero width or height")]
    EmptyImage,

    #[error("image of {width}x{height} pixels does not fit in a WAV data chunk")]
    ImageTooLarge { width: u32, height: u32 },

    #[error("pixel buffer size mismatch: expected {expected} bytes, got {got}")]
    BufferSize { expected: usize, got: usize },

    #[error("sample rate must be positive")]
    InvalidSampleRate,

    #[error("file does not carry RIFF/WAVE tags")]
    InvalidContainer,
}
