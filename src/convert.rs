//! Forward (image → audio) and reverse (audio → image) pipelines.
//!
//! Both directions run synchronously on the calling thread, report coarse
//! progress through the supplied callback, and abort on the first error
//! without cleaning up partially written output.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt};
use log::{debug, info};

use crate::error::ConvertError;
use crate::intensity;
use crate::ordering::{OrderingMode, Sequencer};
use crate::pixels;
use crate::progress::Meter;
use crate::wav::{self, WavHeader};

/// Per-conversion settings.
///
/// Passed explicitly into the pipelines so conversions stay independent and
/// reentrant; there is no process-wide configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionRequest {
    pub sample_rate: u32,
    pub mode: OrderingMode,
}

impl Default for ConversionRequest {
    fn default() -> Self {
        Self {
            sample_rate: 44_100,
            mode: OrderingMode::Array,
        }
    }
}

/// Header and image dimensions recovered from a produced audio file.
#[derive(Debug, Clone, Copy)]
pub struct AudioInfo {
    pub header: WavHeader,
    pub width: u32,
    pub height: u32,
}

/// Convert an image file into a mono PCM WAV carrying the image dimensions
/// in the trailer after the header.
///
/// One sample is written per pixel in scan order regardless of the ordering
/// mode. `progress` receives clamped fractions at coarse intervals and a
/// final 1.0.
pub fn image_to_audio(
    input: &Path,
    output: &Path,
    request: &ConversionRequest,
    progress: &mut dyn FnMut(f64),
) -> Result<(), ConvertError> {
    if request.sample_rate == 0 {
        return Err(ConvertError::InvalidSampleRate);
    }

    let buffer = pixels::read_image(input)?;
    let count = buffer.pixel_count();
    // The PCM payload plus the header remainder must fit the u32 RIFF size.
    if count as u64 * 2 + (wav::HEADER_LEN - 8) > u32::MAX as u64 {
        return Err(ConvertError::ImageTooLarge {
            width: buffer.width,
            height: buffer.height,
        });
    }

    let mut sequencer = Sequencer::with_mode(request.mode, count)?;
    let mut meter = Meter::new(count, progress);
    for i in 0..count {
        let (r, g, b) = buffer.rgb(i);
        sequencer.append(intensity::sample_of(intensity::intensity_of(r, g, b)));
        meter.tick();
    }
    debug!("mapped {} pixels in {:?} mode", count, request.mode);

    let mut out = BufWriter::new(File::create(output)?);
    let header = WavHeader::pcm_mono(count as u32, request.sample_rate);
    header.write_to(&mut out)?;
    wav::write_dimensions(&mut out, buffer.width, buffer.height)?;
    sequencer.drain_to(&mut out)?;
    out.flush()?;
    meter.finish();

    info!(
        "converted {} ({}x{}) to {} at {} Hz",
        input.display(),
        buffer.width,
        buffer.height,
        output.display(),
        request.sample_rate
    );
    Ok(())
}

/// Reconstruct a grayscale PNG from an audio file produced by
/// [`image_to_audio`].
///
/// The declared data size yields the sample count; the dimensions come from
/// the trailer read directly after the header. Third-party WAV files lacking
/// the trailer will be misread.
pub fn audio_to_image(
    input: &Path,
    output: &Path,
    progress: &mut dyn FnMut(f64),
) -> Result<(), ConvertError> {
    let mut reader = BufReader::new(File::open(input)?);
    let header = WavHeader::read_from(&mut reader)?;
    let count = header.sample_count() as usize;
    let (width, height) = wav::read_dimensions(&mut reader)?;
    debug!(
        "read header: {} samples at {} Hz, image {}x{}",
        count, header.sample_rate, width, height
    );

    let mut samples = Vec::new();
    samples.try_reserve_exact(count)?;
    for _ in 0..count {
        samples.push(reader.read_i16::<LittleEndian>()?);
    }

    let mut intensities = Vec::new();
    intensities.try_reserve_exact(count)?;
    let mut meter = Meter::new(count, progress);
    for &sample in &samples {
        intensities.push(intensity::intensity_from(sample));
        meter.tick();
    }

    pixels::write_grayscale(output, width, height, intensities)?;
    meter.finish();

    info!(
        "reconstructed {}x{} grayscale image at {}",
        width,
        height,
        output.display()
    );
    Ok(())
}

/// Read back a produced audio file's header and trailer for display.
///
/// This is the one path that insists on RIFF/WAVE tags, since its output is
/// meant for humans.
pub fn read_audio_info(path: &Path) -> Result<AudioInfo, ConvertError> {
    let mut reader = BufReader::new(File::open(path)?);
    let header = WavHeader::read_from(&mut reader)?;
    if !header.has_riff_tags() {
        return Err(ConvertError::InvalidContainer);
    }
    let (width, height) = wav::read_dimensions(&mut reader)?;
    Ok(AudioInfo {
        header,
        width,
        height,
    })
}
