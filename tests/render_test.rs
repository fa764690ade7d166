use std::time::Duration;

use hexagon_ngin::{
    context::choose_surface_format,
    pipelines::hexagon::FillUniform,
    render::{SurfaceErrorAction, surface_error_action},
    snapshot::{padded_bytes_per_row, snapshot_blocking, unpad_rows},
    timing::FrameStats,
    Colour, Settings,
};
use wgpu::{SurfaceError, TextureFormat};

#[test]
fn lost_or_outdated_surfaces_are_reconfigured() {
    assert_eq!(surface_error_action(&SurfaceError::Lost), SurfaceErrorAction::Reconfigure);
    assert_eq!(surface_error_action(&SurfaceError::Outdated), SurfaceErrorAction::Reconfigure);
}

#[test]
fn timeouts_skip_the_frame_and_oom_is_fatal() {
    assert_eq!(surface_error_action(&SurfaceError::Timeout), SurfaceErrorAction::SkipFrame);
    assert_eq!(surface_error_action(&SurfaceError::Other), SurfaceErrorAction::SkipFrame);
    assert_eq!(surface_error_action(&SurfaceError::OutOfMemory), SurfaceErrorAction::Fatal);
}

#[test]
fn srgb_surface_formats_are_preferred() {
    let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Bgra8UnormSrgb];
    assert_eq!(choose_surface_format(&formats), Some(TextureFormat::Bgra8UnormSrgb));
    assert_eq!(
        choose_surface_format(&[TextureFormat::Rgba16Float]),
        Some(TextureFormat::Rgba16Float)
    );
    assert_eq!(choose_surface_format(&[]), None);
}

#[test]
fn fill_uniform_matches_the_wgsl_layout() {
    assert_eq!(std::mem::size_of::<FillUniform>(), 32);
    let uniform = FillUniform::new(Colour::rgb(0.5, 0.5, 0.5), 1.2, TextureFormat::Rgba8Unorm);
    assert_eq!(uniform.colour, [0.5, 0.5, 0.5, 1.0]);
    assert_eq!(uniform.clip_w, 1.2);
}

#[test]
fn readback_rows_are_padded_to_256_bytes() {
    assert_eq!(padded_bytes_per_row(64), Some(256));
    assert_eq!(padded_bytes_per_row(65), Some(512));
    assert_eq!(padded_bytes_per_row(800), Some(3328));
}

#[test]
fn rows_too_wide_for_u32_have_no_padded_size() {
    assert_eq!(padded_bytes_per_row(u32::MAX / 4 + 1), None);
    // fits unpadded, overflows once rounded up to the alignment
    assert_eq!(padded_bytes_per_row(u32::MAX / 4), None);
    assert_eq!(padded_bytes_per_row(u32::MAX / 4 - 63), Some(u32::MAX - 255));
}

#[test]
fn snapshot_rejects_widths_without_a_readback_size() {
    let settings = Settings {
        width: u32::MAX,
        ..Settings::default()
    };
    let err = snapshot_blocking(&settings).unwrap_err();
    assert!(err.to_string().contains("too large"), "{err}");
}

#[test]
fn unpadding_drops_the_row_tail() {
    let (width, height) = (2, 2);
    let bytes_per_row = padded_bytes_per_row(width).unwrap();
    let padded = bytes_per_row as usize;
    let mut data = vec![0xff; padded * height as usize];
    data[..8].copy_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);
    data[padded..padded + 8].copy_from_slice(&[9, 10, 11, 12, 13, 14, 15, 16]);
    assert_eq!(unpad_rows(&data, bytes_per_row, width, height), (1..=16).collect::<Vec<u8>>());
}

#[test]
fn frame_stats_report_once_per_second() {
    let mut stats = FrameStats::default();
    for _ in 0..59 {
        assert_eq!(stats.record(Duration::from_millis(16)), None);
    }
    let fps = stats.record(Duration::from_millis(56)).expect("a full second passed");
    assert!((fps - 60.0).abs() < 1e-9, "got {fps}");
    assert_eq!(stats.record(Duration::from_millis(16)), None);
}
