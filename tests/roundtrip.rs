// End-to-end conversion tests through real files: image → WAV → image.
//
// The WAV layout under test is the crate's own: 44-byte PCM header, an
// 8-byte width/height trailer, then one little-endian i16 sample per pixel.

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use tempfile::TempDir;

use pixelwav::{ConversionRequest, ConvertError, OrderingMode, intensity, wav};

fn write_rgba_png(dir: &Path, name: &str, width: u32, height: u32, pixel: impl Fn(u32, u32) -> [u8; 4]) -> PathBuf {
    let img = RgbaImage::from_fn(width, height, |x, y| Rgba(pixel(x, y)));
    let path = dir.join(name);
    img.save(&path).expect("write test image");
    path
}

fn convert_forward(input: &Path, output: &Path, request: &ConversionRequest) {
    let mut progress = |_f: f64| {};
    pixelwav::image_to_audio(input, output, request, &mut progress).expect("forward conversion");
}

#[test]
fn test_two_by_two_known_colors_round_trip() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_rgba_png(dir.path(), "in.png", 2, 2, |x, y| match (x, y) {
        (0, 0) => [255, 0, 0, 255],
        (1, 0) => [0, 255, 0, 255],
        (0, 1) => [0, 0, 255, 255],
        _ => [255, 255, 255, 255],
    });
    let audio = dir.path().join("out.wav");
    let restored = dir.path().join("restored.png");

    convert_forward(&input, &audio, &ConversionRequest::default());
    let mut progress = |_f: f64| {};
    pixelwav::audio_to_image(&audio, &restored, &mut progress).expect("reverse conversion");

    let img = image::open(&restored).expect("open restored");
    let gray = img.into_luma8();
    assert_eq!(gray.dimensions(), (2, 2));

    // Output follows the forward/inverse formula, not the source colors:
    // each primary averages to (255+0+0)/3 == 85.
    let expected = |r: u8, g: u8, b: u8| {
        intensity::intensity_from(intensity::sample_of(intensity::intensity_of(r, g, b)))
    };
    assert_eq!(gray.get_pixel(0, 0).0[0], expected(255, 0, 0));
    assert_eq!(gray.get_pixel(1, 0).0[0], expected(0, 255, 0));
    assert_eq!(gray.get_pixel(0, 1).0[0], expected(0, 0, 255));
    assert_eq!(gray.get_pixel(1, 1).0[0], expected(255, 255, 255));
    assert_eq!(gray.get_pixel(0, 0).0[0], 85);
    assert_eq!(gray.get_pixel(1, 1).0[0], 255);
}

#[test]
fn test_trailer_recovers_dimensions_and_sample_count() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_rgba_png(dir.path(), "in.png", 10, 5, |x, y| {
        let v = (x * 20 + y * 3) as u8;
        [v, v, v, 255]
    });
    let audio = dir.path().join("out.wav");
    convert_forward(&input, &audio, &ConversionRequest::default());

    let bytes = fs::read(&audio).expect("read wav");
    assert_eq!(bytes.len() as u64, wav::HEADER_LEN + wav::TRAILER_LEN + 50 * 2);
    assert_eq!(&bytes[44..48], &10u32.to_le_bytes());
    assert_eq!(&bytes[48..52], &5u32.to_le_bytes());

    let info = pixelwav::read_audio_info(&audio).expect("info");
    assert_eq!((info.width, info.height), (10, 5));
    assert_eq!(info.header.sample_count(), 50);
    assert_eq!(info.header.data_size, 100);
}

#[test]
fn test_all_ordering_modes_produce_identical_files() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_rgba_png(dir.path(), "in.png", 16, 9, |x, y| {
        [(x * 16) as u8, (y * 28) as u8, ((x + y) * 9) as u8, 255]
    });

    let mut outputs = Vec::new();
    for mode in [
        OrderingMode::Array,
        OrderingMode::List,
        OrderingMode::Stack,
        OrderingMode::Queue,
    ] {
        let audio = dir.path().join(format!("{:?}.wav", mode));
        let request = ConversionRequest {
            mode,
            ..Default::default()
        };
        convert_forward(&input, &audio, &request);
        outputs.push(fs::read(&audio).expect("read wav"));
    }

    for other in &outputs[1..] {
        assert_eq!(&outputs[0], other, "ordering modes diverged on disk");
    }
}

#[test]
fn test_missing_input_is_decode_error_and_creates_no_output() {
    let dir = TempDir::new().expect("tempdir");
    let output = dir.path().join("out.wav");
    let mut progress = |_f: f64| {};
    let err = pixelwav::image_to_audio(
        Path::new("does/not/exist.png"),
        &output,
        &ConversionRequest::default(),
        &mut progress,
    )
    .unwrap_err();
    assert!(matches!(err, ConvertError::Decode(_)));
    assert!(!output.exists());
}

#[test]
fn test_progress_is_monotonic_and_ends_at_one_both_directions() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_rgba_png(dir.path(), "in.png", 30, 20, |x, _| {
        [(x * 8) as u8, 0, 0, 255]
    });
    let audio = dir.path().join("out.wav");
    let restored = dir.path().join("restored.png");

    let mut forward_reports = Vec::new();
    let mut sink = |f: f64| forward_reports.push(f);
    pixelwav::image_to_audio(&input, &audio, &ConversionRequest::default(), &mut sink)
        .expect("forward");

    let mut reverse_reports = Vec::new();
    let mut sink = |f: f64| reverse_reports.push(f);
    pixelwav::audio_to_image(&audio, &restored, &mut sink).expect("reverse");

    for reports in [&forward_reports, &reverse_reports] {
        assert!(!reports.is_empty());
        assert!(reports.windows(2).all(|w| w[0] <= w[1]));
        assert!(reports.iter().all(|f| (0.0..=1.0).contains(f)));
        assert_eq!(*reports.last().expect("final report"), 1.0);
    }
}

#[test]
fn test_gradient_matches_mapping_formula_per_pixel() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_rgba_png(dir.path(), "in.png", 64, 4, |x, y| {
        let v = (x * 4 + y) as u8;
        [v, v.wrapping_add(1), v.wrapping_add(2), 255]
    });
    let audio = dir.path().join("out.wav");
    let restored = dir.path().join("restored.png");

    convert_forward(&input, &audio, &ConversionRequest::default());
    let mut progress = |_f: f64| {};
    pixelwav::audio_to_image(&audio, &restored, &mut progress).expect("reverse");

    let source = image::open(&input).expect("open source").into_rgba8();
    let gray = image::open(&restored).expect("open restored").into_luma8();
    for (x, y, pixel) in source.enumerate_pixels() {
        let [r, g, b, _] = pixel.0;
        let expected =
            intensity::intensity_from(intensity::sample_of(intensity::intensity_of(r, g, b)));
        assert_eq!(
            gray.get_pixel(x, y).0[0],
            expected,
            "pixel ({}, {}) diverged from the mapping formula",
            x,
            y
        );
    }
}

#[test]
fn test_truncated_audio_fails_with_io_error() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_rgba_png(dir.path(), "in.png", 8, 8, |x, y| {
        [(x * 30) as u8, (y * 30) as u8, 0, 255]
    });
    let audio = dir.path().join("out.wav");
    convert_forward(&input, &audio, &ConversionRequest::default());

    let mut bytes = fs::read(&audio).expect("read wav");
    bytes.truncate(bytes.len() - 40);
    fs::write(&audio, &bytes).expect("truncate");

    let restored = dir.path().join("restored.png");
    let mut progress = |_f: f64| {};
    let err = pixelwav::audio_to_image(&audio, &restored, &mut progress).unwrap_err();
    assert!(matches!(err, ConvertError::Io(_)));
}

#[test]
fn test_selected_sample_rate_lands_in_header() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_rgba_png(dir.path(), "in.png", 4, 4, |_, _| [128, 128, 128, 255]);
    let audio = dir.path().join("out.wav");
    let request = ConversionRequest {
        sample_rate: 22_050,
        ..Default::default()
    };
    convert_forward(&input, &audio, &request);

    let info = pixelwav::read_audio_info(&audio).expect("info");
    assert_eq!(info.header.sample_rate, 22_050);
    assert_eq!(info.header.byte_rate, 44_100);
}

#[test]
fn test_zero_sample_rate_is_rejected() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_rgba_png(dir.path(), "in.png", 2, 2, |_, _| [0, 0, 0, 255]);
    let audio = dir.path().join("out.wav");
    let request = ConversionRequest {
        sample_rate: 0,
        ..Default::default()
    };
    let mut progress = |_f: f64| {};
    let err = pixelwav::image_to_audio(&input, &audio, &request, &mut progress).unwrap_err();
    assert!(matches!(err, ConvertError::InvalidSampleRate));
    assert!(!audio.exists());
}

#[test]
fn test_info_rejects_non_riff_files() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("not.wav");
    fs::write(&path, vec![0u8; 64]).expect("write");
    let err = pixelwav::read_audio_info(&path).unwrap_err();
    assert!(matches!(err, ConvertError::InvalidContainer));
}
