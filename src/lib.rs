//! pixelwav: bidirectional image ↔ PCM audio converter.
//!
//! Forward direction: decode an image, map each pixel's grayscale intensity
//! to a signed 16-bit amplitude, and write the samples as a mono PCM WAV
//! whose image dimensions ride in a non-standard trailer right after the
//! header. Reverse direction: read such a file back and reconstruct a
//! grayscale PNG by inverting the mapping.
//!
//! The order in which samples reach the output stream is selectable: a
//! contiguous array, a singly-linked list, a stack or a queue. All four
//! produce the same on-disk stream; see [`ordering`] for the bookkeeping
//! differences.

pub mod convert;
pub mod error;
pub mod intensity;
pub mod ordering;
pub mod pixels;
pub mod progress;
pub mod wav;

pub use convert::{AudioInfo, ConversionRequest, audio_to_image, image_to_audio, read_audio_info};
pub use error::ConvertError;
pub use ordering::OrderingMode;
pub use pixels::{PixelBuffer, read_image, write_grayscale};
pub use wav::WavHeader;
