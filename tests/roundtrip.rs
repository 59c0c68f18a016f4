use std::path::PathBuf;

use bmpgrid::*;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Per-process scratch path so parallel test binaries don't collide.
fn scratch(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("bmpgrid-{}-{name}", std::process::id()))
}

fn rgb(image: &Image, x: u32, y: u32) -> (u8, u8, u8) {
    (
        image.colour(x, y, Channel::Red).unwrap(),
        image.colour(x, y, Channel::Green).unwrap(),
        image.colour(x, y, Channel::Blue).unwrap(),
    )
}

fn set_rgb(image: &mut Image, x: u32, y: u32, (r, g, b): (i32, i32, i32)) {
    image.set_colour(x, y, Channel::Red, r).unwrap();
    image.set_colour(x, y, Channel::Green, g).unwrap();
    image.set_colour(x, y, Channel::Blue, b).unwrap();
}

#[test]
fn four_colour_24bit_file_roundtrip() {
    init_logger();
    let mut image = Image::new();
    image.set_size(2, 2).unwrap();
    set_rgb(&mut image, 0, 0, (255, 0, 0));
    set_rgb(&mut image, 1, 0, (0, 255, 0));
    set_rgb(&mut image, 0, 1, (0, 0, 255));
    set_rgb(&mut image, 1, 1, (255, 255, 0));

    let path = scratch("four_colour.bmp");
    image.export(&path).unwrap();
    let reopened = Image::from_path(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(reopened.bit_depth(), BitDepth::Bpp24);
    assert_eq!((reopened.width(), reopened.height()), (2, 2));
    assert_eq!(rgb(&reopened, 0, 0), (255, 0, 0));
    assert_eq!(rgb(&reopened, 1, 0), (0, 255, 0));
    assert_eq!(rgb(&reopened, 0, 1), (0, 0, 255));
    assert_eq!(rgb(&reopened, 1, 1), (255, 255, 0));
    for (x, y) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
        assert_eq!(reopened.colour(x, y, Channel::Alpha).unwrap(), 255);
    }
}

#[test]
fn one_pixel_32bit_bytes() {
    let mut image = Image::new();
    image.set_bit_depth(32).unwrap();
    image.set_size(1, 1).unwrap();
    image.set_colour(0, 0, Channel::Red, 10).unwrap();
    image.set_colour(0, 0, Channel::Green, 20).unwrap();
    image.set_colour(0, 0, Channel::Blue, 30).unwrap();
    image.set_colour(0, 0, Channel::Alpha, 40).unwrap();

    let encoded = image.encode(Unstoppable).unwrap();
    assert_eq!(encoded.len(), 74);
    assert_eq!(u32::from_le_bytes(encoded[10..14].try_into().unwrap()), 70);
    assert_eq!(&encoded[70..], &[40, 30, 20, 10]);

    let decoded = Image::from_bytes(&encoded).unwrap();
    assert_eq!(decoded, image);
}

#[test]
fn rgba_32bit_file_roundtrip() {
    let mut image = Image::new();
    image.set_bit_depth(32).unwrap();
    image.set_size(3, 2).unwrap();
    for y in 0..2 {
        for x in 0..3 {
            let v = (x * 40 + y * 90) as i32;
            set_rgb(&mut image, x, y, (v, 255 - v, v / 2));
            image.set_colour(x, y, Channel::Alpha, 200 - v).unwrap();
        }
    }

    let path = scratch("rgba.BMP");
    image.export(&path).unwrap();
    let reopened = Image::from_path(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(reopened.bit_depth(), BitDepth::Bpp32);
    assert_eq!(reopened, image);
}

#[test]
fn alpha_is_lost_on_24bit_roundtrip() {
    let mut image = Image::new();
    image.set_bit_depth(32).unwrap();
    image.set_size(2, 1).unwrap();
    image.set_colour(0, 0, Channel::Alpha, 9).unwrap();
    image.set_grey(1, 0, 50).unwrap();
    image.set_bit_depth(24).unwrap();

    let decoded = Image::from_bytes(&image.encode(Unstoppable).unwrap()).unwrap();
    assert_eq!(decoded.colour(0, 0, Channel::Alpha).unwrap(), 255);
    assert_eq!(rgb(&decoded, 1, 0), (50, 50, 50));
}

#[test]
fn extension_is_appended_on_export_and_open() {
    let mut image = Image::new();
    image.set_size(1, 1).unwrap();
    image.set_grey(0, 0, 12).unwrap();

    let stem = scratch("no_extension");
    image.export(&stem).unwrap();
    let written = stem.with_file_name(format!(
        "{}.bmp",
        stem.file_name().unwrap().to_string_lossy()
    ));
    assert!(written.exists());

    let reopened = Image::from_path(&stem).unwrap();
    std::fs::remove_file(&written).unwrap();
    assert_eq!(rgb(&reopened, 0, 0), (12, 12, 12));
}

#[test]
fn export_replaces_existing_file() {
    let path = scratch("replace.bmp");
    std::fs::write(&path, vec![0xAB; 4096]).unwrap();

    let mut image = Image::new();
    image.set_size(1, 1).unwrap();
    image.export(&path).unwrap();
    let len = std::fs::metadata(&path).unwrap().len();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(len, 58);
}

#[test]
fn uninitialized_export_writes_nothing() {
    let path = scratch("never_written.bmp");
    let image = Image::new();
    assert!(matches!(image.export(&path), Err(BmpError::NotInitialized)));
    assert!(!path.exists());
}

#[test]
fn reopen_is_a_no_op() {
    init_logger();
    let mut first = Image::new();
    first.set_size(2, 2).unwrap();
    let path_a = scratch("reopen_a.bmp");
    first.export(&path_a).unwrap();

    let mut second = Image::new();
    second.set_size(5, 1).unwrap();
    let path_b = scratch("reopen_b.bmp");
    second.export(&path_b).unwrap();

    let mut image = Image::from_path(&path_a).unwrap();
    image.open(&path_b).unwrap();
    assert_eq!((image.width(), image.height()), (2, 2));

    image.close();
    image.open(&path_b).unwrap();
    assert_eq!((image.width(), image.height()), (5, 1));

    std::fs::remove_file(&path_a).unwrap();
    std::fs::remove_file(&path_b).unwrap();
}

#[test]
fn open_missing_file_is_io_error() {
    let mut image = Image::new();
    let err = image.open(scratch("does_not_exist")).unwrap_err();
    assert!(matches!(err, BmpError::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound));
    assert!(!image.is_initialized());
}

#[test]
fn failed_decode_leaves_image_uninitialized() {
    let path = scratch("truncated.bmp");
    let mut image = Image::new();
    image.set_size(4, 4).unwrap();
    let mut data = image.encode(Unstoppable).unwrap();
    data.truncate(60);
    std::fs::write(&path, &data).unwrap();

    let mut target = Image::new();
    let result = target.open(&path);
    std::fs::remove_file(&path).unwrap();
    assert!(matches!(result, Err(BmpError::UnexpectedEof)));
    assert!(!target.is_initialized());
}

#[test]
fn limits_reject_large() {
    let mut image = Image::new();
    image.set_size(4, 4).unwrap();
    let encoded = image.encode(Unstoppable).unwrap();

    let limits = Limits {
        max_pixels: Some(15),
        ..Default::default()
    };
    let result = DecodeRequest::new(&encoded).with_limits(&limits).decode(Unstoppable);
    match result.unwrap_err() {
        BmpError::LimitExceeded(_) => {}
        other => panic!("expected LimitExceeded, got {other:?}"),
    }

    let path = scratch("limits.bmp");
    image.export(&path).unwrap();
    let mut target = Image::new();
    let result = target.open_with_limits(&path, &limits);
    std::fs::remove_file(&path).unwrap();
    assert!(matches!(result, Err(BmpError::LimitExceeded(_))));
}

#[test]
fn image_info_probe() {
    let mut image = Image::new();
    image.set_bit_depth(32).unwrap();
    image.set_size(7, 3).unwrap();
    let encoded = image.encode(Unstoppable).unwrap();

    let info = ImageInfo::from_bytes(&encoded).unwrap();
    assert_eq!(info.width, 7);
    assert_eq!(info.height, 3);
    assert_eq!(info.bit_depth, BitDepth::Bpp32);
}
