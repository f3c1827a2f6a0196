use imgbuf::io::{CodecOptions, FileCodec};
use imgbuf::prelude::*;

fn gradient() -> ImageBuffer4 {
    let mut image = ImageBuffer4::from_pixels(vec![Pixel4::default(); 8 * 6], 8, 6).unwrap();
    for y in 0..6 {
        for (x, px) in image.row_mut(y).unwrap().iter_mut().enumerate() {
            *px = Pixel4::new([(x * 30) as u8, (y * 40) as u8, 90, 255]);
        }
    }
    image
}

#[test]
fn extension_picks_encoder() {
    let dir = tempfile::tempdir().unwrap();
    let image = gradient();

    for (name, format) in [
        ("out.png", Format::Png),
        ("out.jpg", Format::Jpeg),
        ("out.jpeg", Format::Jpeg),
        ("out.bmp", Format::Bmp),
    ] {
        let path = dir.path().join(name);
        image.write(&path).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(Format::from_bytes(&bytes), format, "{name}");
    }
}

#[test]
fn unknown_extension_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let err = gradient().write(dir.path().join("out.xyz")).unwrap_err();
    assert!(err.is_codec_error());
    assert!(!dir.path().join("out.xyz").exists());
}

#[test]
fn empty_image_is_not_written() {
    let dir = tempfile::tempdir().unwrap();
    let empty = ImageBuffer3::from_raw(Vec::new(), 0, 0).unwrap();

    for name in ["empty.png", "empty.jpg", "empty.bmp"] {
        assert!(empty.write(dir.path().join(name)).is_err(), "{name}");
    }
}

#[test]
fn write_as_overrides_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("image.dat");
    gradient().write_as(&path, Format::Bmp).unwrap();

    assert_eq!(Format::detect(&path).unwrap(), Format::Bmp);
    assert_eq!(ImageBuffer4::open(&path), gradient());
}

#[test]
fn lossless_roundtrips_are_exact() {
    let dir = tempfile::tempdir().unwrap();
    let original = gradient();

    for name in ["rt.png", "rt.bmp"] {
        let path = dir.path().join(name);
        original.write(&path).unwrap();
        let loaded = ImageBuffer4::try_open(&path).unwrap();
        assert_eq!(loaded, original, "{name}");
        assert_eq!(loaded.source_channels(), 4);
    }
}

#[test]
fn jpeg_roundtrip_is_close() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rt.jpg");
    let codec = FileCodec::with_options(CodecOptions::default().with_jpeg_quality(100));

    let mut flat = ImageBuffer3::from_pixels(vec![Pixel3::default(); 16 * 16], 16, 16).unwrap();
    flat.fill(Pixel3::new([100, 150, 200])).unwrap();
    flat.write_with(&codec, &path, Format::Jpeg).unwrap();

    let loaded = ImageBuffer3::open_with(&codec, &path).unwrap();
    assert_eq!(loaded.dimensions(), (16, 16));
    for (a, b) in loaded.as_bytes().unwrap().iter().zip(flat.as_bytes().unwrap()) {
        assert!((*a as i32 - *b as i32).abs() <= 3, "{a} vs {b}");
    }
}
