use tilewalk::renderer::utils::{letterbox_viewport, Viewport};
use tilewalk::window::*;

#[test]
fn new_config_has_equal_physical_and_logical_size() {
    let cfg = WindowConfig::new(1024, 768, WindowMode::Windowed);
    assert_eq!(cfg.physical_width,  1024);
    assert_eq!(cfg.physical_height, 768);
    assert_eq!(cfg.logical_width,   1024);
    assert_eq!(cfg.logical_height,  768);
    assert_eq!(cfg.mode, WindowMode::Windowed);
}

#[test]
fn resize_keeps_the_logical_size() {
    let cfg = WindowConfig::new(1024, 768, WindowMode::Borderless).resized(1920, 1080);
    assert_eq!((cfg.physical_width, cfg.physical_height), (1920, 1080));
    assert_eq!((cfg.logical_width, cfg.logical_height), (1024, 768));
    assert_eq!(cfg.mode, WindowMode::Borderless);
}

#[test]
fn aspect_ratio_4x3() {
    let cfg = WindowConfig::new(1024, 768, WindowMode::Windowed);
    let ratio = cfg.aspect_ratio();
    assert!((ratio - 4.0 / 3.0).abs() < 1e-5, "expected 4/3, got {ratio}");
}

#[test]
fn aspect_ratio_zero_height_returns_zero() {
    let cfg = WindowConfig {
        physical_width: 0, physical_height: 0,
        logical_width: 1920, logical_height: 0,
        mode: WindowMode::Windowed,
    };
    assert_eq!(cfg.aspect_ratio(), 0.0);
}

#[test]
fn tall_window_gets_bars_top_and_bottom() {
    // 1024×768 in 1024×1024 → scale 1, 128 px bars above and below.
    let cfg = WindowConfig::new(1024, 768, WindowMode::Windowed).resized(1024, 1024);
    let v = letterbox_viewport(&cfg);
    assert_eq!(v, Viewport { x: 0.0, y: 128.0, width: 1024.0, height: 768.0 });
}

#[test]
fn half_size_window_scales_down() {
    let cfg = WindowConfig::new(1024, 768, WindowMode::Windowed).resized(512, 384);
    let v = letterbox_viewport(&cfg);
    assert_eq!(v, Viewport { x: 0.0, y: 0.0, width: 512.0, height: 384.0 });
}
