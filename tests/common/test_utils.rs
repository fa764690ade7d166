use hexagon_ngin::Colour;
use image::{Rgba, RgbaImage};

/// Largest per-channel difference tolerated after the sRGB round trip.
pub(crate) const TOLERANCE: u8 = 1;

pub(crate) fn expected_pixel(colour: Colour) -> Rgba<u8> {
    Rgba(colour.to_rgba8())
}

pub(crate) fn assert_pixel(image: &RgbaImage, x: u32, y: u32, colour: Colour) {
    let actual = image.get_pixel(x, y);
    let expected = expected_pixel(colour);
    let close = actual
        .0
        .iter()
        .zip(expected.0.iter())
        .all(|(a, e)| a.abs_diff(*e) <= TOLERANCE);
    assert!(
        close,
        "pixel mismatch at ({}, {}): expected {:?}, got {:?}",
        x, y, expected, actual
    );
}

/// Window pixel a clip-space position lands on after dividing by `w`.
pub(crate) fn to_pixel(position: [f32; 2], w: f32, width: u32, height: u32) -> (u32, u32) {
    let ndc_x = position[0] / w;
    let ndc_y = position[1] / w;
    let x = (ndc_x + 1.0) / 2.0 * width as f32;
    // NDC y points up, image rows go down
    let y = (1.0 - ndc_y) / 2.0 * height as f32;
    (x as u32, y as u32)
}
