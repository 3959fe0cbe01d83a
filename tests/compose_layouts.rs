use std::io::Cursor;

use boothstrip::{
    compose_decoded, layout_by_id, parse_hex_color, render_photos, BoothError, CapturedPhoto,
    GridKind, Layout,
};
use image::{Rgba, RgbaImage};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn png_photo(w: u32, h: u32, px: [u8; 4]) -> CapturedPhoto {
    let img = RgbaImage::from_pixel(w, h, Rgba(px));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    CapturedPhoto::from_bytes(buf)
}

#[test]
fn single_shot_strip_end_to_end() {
    init_tracing();
    let layout = layout_by_id("strip-1").unwrap();
    let photos = vec![png_photo(500, 500, [40, 60, 80, 255])];

    let surface = render_photos(&photos, &layout, "#FFFFFF").unwrap();
    assert_eq!(surface.dimensions(), (580, 660));

    // White margin, photo in its cell at native resolution.
    assert_eq!(*surface.get_pixel(5, 5), Rgba([255, 255, 255, 255]));
    assert_eq!(*surface.get_pixel(40, 40), Rgba([40, 60, 80, 255]));
    assert_eq!(*surface.get_pixel(539, 539), Rgba([40, 60, 80, 255]));
    assert_eq!(*surface.get_pixel(540, 40), Rgba([255, 255, 255, 255]));
}

#[test]
fn classic_strip_dimensions_follow_the_formula() {
    init_tracing();
    let layout = layout_by_id("strip-3").unwrap();
    let photos: Vec<_> = (0..3).map(|_| png_photo(320, 240, [1, 1, 1, 255])).collect();

    let surface = render_photos(&photos, &layout, "#000000").unwrap();
    assert_eq!(
        surface.dimensions(),
        (320 + 80, 3 * 240 + 2 * 20 + 110)
    );
}

#[test]
fn six_grid_places_row_major_cells() {
    let layout = layout_by_id("grid-6").unwrap();
    let photos: Vec<_> = (0..6u8)
        .map(|i| png_photo(100, 80, [i * 30 + 10, 0, 0, 255]))
        .collect();

    let surface = render_photos(&photos, &layout, "#FFFFFF").unwrap();
    assert_eq!(surface.dimensions(), (2 * 100 + 100, 3 * 80 + 150));

    for i in 0..6u32 {
        let col = i % 2;
        let row = i / 2;
        let x = 40 + col * 120;
        let y = 40 + row * 100;
        assert_eq!(
            surface.get_pixel(x, y)[0],
            (i as u8) * 30 + 10,
            "photo {i} origin"
        );
    }
}

#[test]
fn grid_rejects_wrong_photo_count_without_drawing() {
    let layout = layout_by_id("grid-6").unwrap();
    let photos: Vec<_> = (0..5).map(|_| png_photo(50, 50, [0, 0, 0, 255])).collect();

    let err = render_photos(&photos, &layout, "#FFFFFF").unwrap_err();
    assert!(matches!(
        err,
        BoothError::PhotoCountMismatch {
            expected: 6,
            actual: 5
        }
    ));
}

#[test]
fn empty_input_and_bad_color_are_rejected_before_decode() {
    let layout = layout_by_id("strip-1").unwrap();
    assert!(matches!(
        render_photos(&[], &layout, "#FFFFFF"),
        Err(BoothError::EmptyInput)
    ));

    // The photo bytes are garbage, but the invalid color fails first.
    let photos = vec![CapturedPhoto::from_bytes(vec![0xAB; 16])];
    assert!(matches!(
        render_photos(&photos, &layout, "not-a-color"),
        Err(BoothError::InvalidColor(_))
    ));
}

#[test]
fn unknown_layout_id_is_unsupported() {
    assert!(matches!(
        layout_by_id("diagonal-9"),
        Err(BoothError::UnsupportedLayout(_))
    ));
    assert!(matches!(
        "diagonal".parse::<GridKind>(),
        Err(BoothError::UnsupportedLayout(_))
    ));
}

#[test]
fn same_inputs_render_identically() {
    let layout = layout_by_id("strip-2").unwrap();
    let photos: Vec<_> = (0..2).map(|_| png_photo(64, 48, [200, 100, 50, 255])).collect();

    let a = render_photos(&photos, &layout, "#4ECDC4").unwrap();
    let b = render_photos(&photos, &layout, "#4ECDC4").unwrap();
    assert_eq!(a.as_raw(), b.as_raw());
}

#[test]
fn background_change_only_touches_background_pixels() {
    let layout = layout_by_id("strip-1").unwrap();
    let photos = vec![png_photo(60, 60, [7, 8, 9, 255])];

    let white = render_photos(&photos, &layout, "#FFFFFF").unwrap();
    let black = render_photos(&photos, &layout, "#000000").unwrap();

    // Margin differs, photo cell does not.
    assert_ne!(white.get_pixel(2, 2), black.get_pixel(2, 2));
    assert_eq!(
        white.get_pixel(40 + 30, 40 + 30),
        black.get_pixel(40 + 30, 40 + 30)
    );
}

#[test]
fn shorthand_hex_background_fills_expanded_color() {
    let layout = Layout::new("one", 1, GridKind::VerticalStrip);
    let images = vec![RgbaImage::from_pixel(30, 30, Rgba([0, 0, 0, 255]))];
    let surface = compose_decoded(&images, &layout, parse_hex_color("#F0A").unwrap()).unwrap();
    assert_eq!(*surface.get_pixel(0, 0), Rgba([255, 0, 170, 255]));
}
