//! pixelwav CLI - image to PCM audio converter.
//!
//! Turns an image into a mono 16-bit WAV by mapping pixel brightness to
//! amplitude, and turns such a WAV back into a grayscale PNG.

use clap::{Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::path::PathBuf;

use pixelwav::{ConversionRequest, OrderingMode};

/// Bidirectional image to PCM audio converter
#[derive(Parser)]
#[command(name = "pixelwav")]
#[command(version)]
#[command(about = "Convert images to PCM audio and back", long_about = None)]
#[command(after_help = "EXAMPLES:
    pixelwav encode -i photo.png -o photo.wav
    pixelwav encode -i photo.png -o photo.wav --sample-rate 22050 --mode queue
    pixelwav decode -i photo.wav -o restored.png
    pixelwav info -i photo.wav

The WAV output carries the image dimensions in a non-standard trailer after
the header; only files produced by this tool decode back losslessly.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert an image to a mono 16-bit PCM WAV
    ///
    /// Each pixel becomes one sample: brightness 0 maps to the most
    /// negative amplitude, mid-gray to silence, white to the most positive.
    #[command(visible_alias = "e")]
    Encode {
        /// Input image file (PNG, or anything with a decodable format)
        #[arg(short, long, help = "Path to the input image file")]
        input: PathBuf,

        /// Output WAV file
        #[arg(short, long, help = "Path for the output audio file")]
        output: PathBuf,

        /// Sample rate written into the WAV header
        #[arg(short = 'r', long, default_value = "44100")]
        sample_rate: u32,

        /// Sample sequencing structure used between mapping and writing
        #[arg(short, long, default_value = "array", value_enum)]
        mode: Mode,
    },

    /// Reconstruct a grayscale PNG from a WAV produced by `encode`
    #[command(visible_alias = "d")]
    Decode {
        /// Input WAV file (must carry the dimension trailer)
        #[arg(short, long, help = "Path to the input audio file")]
        input: PathBuf,

        /// Output PNG file
        #[arg(short, long, help = "Path for the reconstructed image")]
        output: PathBuf,
    },

    /// Display the WAV header fields and embedded image dimensions
    #[command(visible_alias = "i")]
    Info {
        /// Input WAV file
        #[arg(short, long, help = "Path to the audio file to inspect")]
        input: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Mode {
    /// Contiguous buffer, written in one pass
    Array,
    /// Singly-linked list appended at the tail
    List,
    /// Stack, re-reversed before writing
    Stack,
    /// Queue with tracked head and tail
    Queue,
}

impl From<Mode> for OrderingMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Array => OrderingMode::Array,
            Mode::List => OrderingMode::List,
            Mode::Stack => OrderingMode::Stack,
            Mode::Queue => OrderingMode::Queue,
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Encode {
            input,
            output,
            sample_rate,
            mode,
        } => encode(&input, &output, sample_rate, mode),
        Commands::Decode { input, output } => decode(&input, &output),
        Commands::Info { input } => info(&input),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn encode(
    input: &PathBuf,
    output: &PathBuf,
    sample_rate: u32,
    mode: Mode,
) -> Result<(), Box<dyn std::error::Error>> {
    let request = ConversionRequest {
        sample_rate,
        mode: mode.into(),
    };
    pixelwav::image_to_audio(input, output, &request, &mut print_progress)?;
    eprintln!();

    let info = pixelwav::read_audio_info(output)?;
    println!(
        "✓ Encoded {}x{} image to {:?} ({} samples at {} Hz, {:?} mode)",
        info.width,
        info.height,
        output,
        info.header.sample_count(),
        info.header.sample_rate,
        mode
    );
    println!();
    println!("{}", info.header);
    Ok(())
}

fn decode(input: &PathBuf, output: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    pixelwav::audio_to_image(input, output, &mut print_progress)?;
    eprintln!();

    println!("✓ Reconstructed image written to {:?}", output);
    Ok(())
}

fn info(input: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let info = pixelwav::read_audio_info(input)?;
    println!("File: {:?}", input);
    println!("Embedded image: {}x{}", info.width, info.height);
    println!();
    println!("{}", info.header);
    Ok(())
}

fn print_progress(fraction: f64) {
    eprint!("\r{:6.2}%", fraction * 100.0);
    let _ = std::io::stderr().flush();
}
