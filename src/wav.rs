//! WAV container header and dimension trailer I/O.
//!
//! The container is a fixed 44-byte mono PCM WAV header followed by a
//! non-standard trailer: width and height as two little-endian u32 values
//! sitting between the header and the PCM payload. `riff_size` and
//! `data_size` count only the PCM payload, so a reader must consume the two
//! trailer fields right after the header instead of trusting the declared
//! layout. A conformant WAV reader would misinterpret the trailer as the
//! first four samples; the layout is required for round-trip compatibility
//! with previously produced files.

use std::fmt;
use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use num_enum::TryFromPrimitive;

/// Serialized header length in bytes.
pub const HEADER_LEN: u64 = 44;

/// Serialized width/height trailer length in bytes.
pub const TRAILER_LEN: u64 = 8;

/// Known `fmt ` chunk format tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u16)]
pub enum FormatTag {
    Pcm = 1,
    IeeeFloat = 3,
    ALaw = 6,
    MuLaw = 7,
}

/// Fixed-size mono PCM WAV header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    pub riff: [u8; 4],
    pub riff_size: u32,
    pub wave: [u8; 4],
    pub fmt: [u8; 4],
    pub fmt_size: u32,
    pub format_tag: u16,
    pub channels: u16,
    pub sample_rate: u32,
    pub byte_rate: u32,
    pub block_align: u16,
    pub bits_per_sample: u16,
    pub data: [u8; 4],
    pub data_size: u32,
}

impl WavHeader {
    /// Build a 16-bit mono PCM header for `sample_count` samples.
    ///
    /// `riff_size` counts the header minus the 8-byte RIFF preamble plus
    /// the PCM payload; the dimension trailer is excluded from both sizes.
    pub fn pcm_mono(sample_count: u32, sample_rate: u32) -> Self {
        let data_size = sample_count * 2;
        Self {
            riff: *b"RIFF",
            riff_size: data_size + HEADER_LEN as u32 - 8,
            wave: *b"WAVE",
            fmt: *b"fmt ",
            fmt_size: 16,
            format_tag: FormatTag::Pcm as u16,
            channels: 1,
            sample_rate,
            byte_rate: sample_rate * 2,
            block_align: 2,
            bits_per_sample: 16,
            data: *b"data",
            data_size,
        }
    }

    /// Number of 16-bit samples declared by the data chunk.
    pub fn sample_count(&self) -> u32 {
        self.data_size / 2
    }

    /// Tag check for callers that surface header fields to a human; the
    /// raw read path does not validate.
    pub fn has_riff_tags(&self) -> bool {
        &self.riff == b"RIFF" && &self.wave == b"WAVE"
    }

    /// Raw fixed-size read. Short input fails with `UnexpectedEof`; field
    /// values are taken as-is.
    pub fn read_from<R: Read>(r: &mut R) -> io::Result<Self> {
        let mut riff = [0u8; 4];
        r.read_exact(&mut riff)?;
        let riff_size = r.read_u32::<LittleEndian>()?;
        let mut wave = [0u8; 4];
        r.read_exact(&mut wave)?;
        let mut fmt = [0u8; 4];
        r.read_exact(&mut fmt)?;
        let fmt_size = r.read_u32::<LittleEndian>()?;
        let format_tag = r.read_u16::<LittleEndian>()?;
        let channels = r.read_u16::<LittleEndian>()?;
        let sample_rate = r.read_u32::<LittleEndian>()?;
        let byte_rate = r.read_u32::<LittleEndian>()?;
        let block_align = r.read_u16::<LittleEndian>()?;
        let bits_per_sample = r.read_u16::<LittleEndian>()?;
        let mut data = [0u8; 4];
        r.read_exact(&mut data)?;
        let data_size = r.read_u32::<LittleEndian>()?;
        Ok(Self {
            riff,
            riff_size,
            wave,
            fmt,
            fmt_size,
            format_tag,
            channels,
            sample_rate,
            byte_rate,
            block_align,
            bits_per_sample,
            data,
            data_size,
        })
    }

    /// Serialize the fixed 44 bytes.
    pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.riff)?;
        w.write_u32::<LittleEndian>(self.riff_size)?;
        w.write_all(&self.wave)?;
        w.write_all(&self.fmt)?;
        w.write_u32::<LittleEndian>(self.fmt_size)?;
        w.write_u16::<LittleEndian>(self.format_tag)?;
        w.write_u16::<LittleEndian>(self.channels)?;
        w.write_u32::<LittleEndian>(self.sample_rate)?;
        w.write_u32::<LittleEndian>(self.byte_rate)?;
        w.write_u16::<LittleEndian>(self.block_align)?;
        w.write_u16::<LittleEndian>(self.bits_per_sample)?;
        w.write_all(&self.data)?;
        w.write_u32::<LittleEndian>(self.data_size)
    }
}

impl fmt::Display for WavHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let format_name = match FormatTag::try_from(self.format_tag) {
            Ok(FormatTag::Pcm) => "PCM",
            Ok(FormatTag::IeeeFloat) => "IEEE float",
            Ok(FormatTag::ALaw) => "A-law",
            Ok(FormatTag::MuLaw) => "mu-law",
            Err(_) => "unknown",
        };
        writeln!(f, "Chunk ID:        {}", String::from_utf8_lossy(&self.riff))?;
        writeln!(f, "File size:       {} bytes", self.riff_size as u64 + 8)?;
        writeln!(f, "Format:          {}", String::from_utf8_lossy(&self.wave))?;
        writeln!(f, "Subchunk1 ID:    {}", String::from_utf8_lossy(&self.fmt))?;
        writeln!(f, "Subchunk1 size:  {}", self.fmt_size)?;
        writeln!(f, "Audio format:    {} ({})", self.format_tag, format_name)?;
        writeln!(f, "Channels:        {}", self.channels)?;
        writeln!(f, "Sample rate:     {} Hz", self.sample_rate)?;
        writeln!(f, "Byte rate:       {} bytes/sec", self.byte_rate)?;
        writeln!(f, "Block align:     {} bytes", self.block_align)?;
        writeln!(f, "Bits per sample: {}", self.bits_per_sample)?;
        writeln!(f, "Subchunk2 ID:    {}", String::from_utf8_lossy(&self.data))?;
        write!(f, "Data size:       {} bytes", self.data_size)
    }
}

/// Write the width/height trailer that immediately follows the header.
pub fn write_dimensions<W: Write>(w: &mut W, width: u32, height: u32) -> io::Result<()> {
    w.write_u32::<LittleEndian>(width)?;
    w.write_u32::<LittleEndian>(height)
}

/// Read the width/height trailer.
pub fn read_dimensions<R: Read>(r: &mut R) -> io::Result<(u32, u32)> {
    let width = r.read_u32::<LittleEndian>()?;
    let height = r.read_u32::<LittleEndian>()?;
    Ok((width, height))
}
