//! Conversions between winit window geometry and wry bounds.

use pagehost_common::Appearance;
use winit::dpi::PhysicalSize;
use winit::window::Theme;

/// Bounds covering the whole client area of a window of `size` pixels.
pub fn full_window_bounds(size: PhysicalSize<u32>, scale_factor: f64) -> wry::Rect {
    let scale = if scale_factor > 0.0 { scale_factor } else { 1.0 };
    let width = f64::from(size.width) / scale;
    let height = f64::from(size.height) / scale;
    wry::Rect {
        position: wry::dpi::Position::Logical(wry::dpi::LogicalPosition::new(0.0, 0.0)),
        size: wry::dpi::Size::Logical(wry::dpi::LogicalSize::new(width, height)),
    }
}

/// Map the OS window theme to a host appearance. Unknown means light.
pub fn appearance_of(theme: Option<Theme>) -> Appearance {
    match theme {
        Some(Theme::Dark) => Appearance::Dark,
        Some(Theme::Light) | None => Appearance::Light,
    }
}
