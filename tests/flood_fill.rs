use coloring_book::flood_fill::{FillOutcome, FillRejection, FloodFill};
use coloring_book::outline::OutlineMask;
use coloring_book::pixels::{INK, PAPER, PixelBuffer};
use image::{Rgba, RgbaImage};

const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

// 500x500 paper with a one pixel black frame around a 40x50 white room
// (x 100..140, y 100..150), i.e. exactly 2000 enclosed pixels.
fn framed_art() -> RgbaImage {
    let mut art = RgbaImage::from_pixel(500, 500, PAPER);
    for x in 99..=140 {
        art.put_pixel(x, 99, INK);
        art.put_pixel(x, 150, INK);
    }
    for y in 99..=150 {
        art.put_pixel(99, y, INK);
        art.put_pixel(140, y, INK);
    }
    art
}

fn setup() -> (PixelBuffer, OutlineMask) {
    let mask = OutlineMask::from_art(&framed_art(), 500, 500, 50);
    (mask.to_buffer(), mask)
}

#[test]
fn test_fill_enclosed_region_exactly() {
    let (mut buffer, mask) = setup();
    let mut engine = FloodFill::new(10_000);

    let outcome = engine.run(&mut buffer, &mask, (120, 120), RED);

    assert_eq!(
        outcome,
        FillOutcome::Filled {
            changed: 2000,
            truncated: false
        }
    );
    assert_eq!(buffer.count(RED), 2000);
    // The frame and the outside are untouched
    assert_eq!(buffer.pixel(99, 120), Some(INK));
    assert_eq!(buffer.pixel(98, 120), Some(PAPER));
    assert_eq!(buffer.pixel(141, 151), Some(PAPER));
}

#[test]
fn test_fill_on_boundary_is_rejected() {
    let (mut buffer, mask) = setup();
    let before = buffer.clone();
    let mut engine = FloodFill::new(10_000);

    let outcome = engine.run(&mut buffer, &mask, (99, 120), RED);

    assert_eq!(outcome, FillOutcome::Rejected(FillRejection::OnBoundary));
    assert_eq!(buffer, before);
}

#[test]
fn test_fill_with_same_color_is_rejected() {
    let (mut buffer, mask) = setup();
    let mut engine = FloodFill::new(10_000);
    engine.run(&mut buffer, &mask, (120, 120), RED);
    let before = buffer.clone();

    let outcome = engine.run(&mut buffer, &mask, (110, 110), RED);

    assert_eq!(outcome, FillOutcome::Rejected(FillRejection::SameColor));
    assert_eq!(buffer, before);
}

#[test]
fn test_fill_outside_buffer_is_rejected() {
    let (mut buffer, mask) = setup();
    let mut engine = FloodFill::new(10_000);

    let outcome = engine.run(&mut buffer, &mask, (500, 10), RED);

    assert_eq!(outcome, FillOutcome::Rejected(FillRejection::OutOfBounds));
}

#[test]
fn test_fill_stops_at_cap() {
    let (mut buffer, mask) = setup();
    let mut engine = FloodFill::new(10_000);

    // The outside region is far larger than the cap
    let outcome = engine.run(&mut buffer, &mask, (10, 10), RED);

    match outcome {
        FillOutcome::Filled { changed, truncated } => {
            assert!(truncated);
            assert!(changed <= 10_000);
            assert_eq!(buffer.count(RED) as u64, changed);
        }
        other => panic!("expected a truncated fill, got {:?}", other),
    }
    // The enclosed room was never reached
    assert_eq!(buffer.pixel(120, 120), Some(PAPER));
}

#[test]
fn test_fill_does_not_leak_diagonally() {
    // A diagonal line of ink is enough to stop a 4-connected fill
    let mut art = RgbaImage::from_pixel(20, 20, PAPER);
    for i in 0..20 {
        art.put_pixel(i, i, INK);
    }
    let mask = OutlineMask::from_art(&art, 20, 20, 50);
    let mut buffer = mask.to_buffer();

    let outcome = FloodFill::new(10_000).run(&mut buffer, &mask, (15, 2), RED);

    // Strictly above the diagonal: 19 + 18 + ... + 1 pixels
    assert_eq!(outcome.changed(), 190);
    assert_eq!(buffer.pixel(2, 15), Some(PAPER));
}

#[test]
fn test_fill_writes_opaque_pixels() {
    let (mut buffer, mask) = setup();
    let translucent = Rgba([0, 128, 0, 40]);

    FloodFill::new(10_000).run(&mut buffer, &mask, (120, 120), translucent);

    assert_eq!(buffer.pixel(120, 120), Some(Rgba([0, 128, 0, 255])));
}
