use serde::{Deserialize, Serialize};

use crate::geometry::hit_testing::HIT_RADIUS;
use crate::geometry::Bounds;
use crate::shape::{Color, MAX_THICKNESS, MIN_THICKNESS};

pub const MIN_ZOOM: f32 = 0.05;
pub const MAX_ZOOM: f32 = 25.0;

/// Colors of the handle markers drawn over a selected shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerPalette {
    pub center: Color,
    pub vertex: Color,
    pub midpoint: Color,
}

impl Default for MarkerPalette {
    fn default() -> Self {
        Self {
            center: Color::DARK_ORANGE,
            vertex: Color::DARK_RED,
            midpoint: Color::CADET_BLUE,
        }
    }
}

/// User-adjustable editor configuration.
///
/// Persisted with the app; missing fields fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub width: u32,
    pub height: u32,
    pub hit_radius: f64,
    pub thickness: u32,
    pub zoom: f32,
    pub antialiasing: bool,
    pub color: Color,
    pub markers: MarkerPalette,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            width: 600,
            height: 400,
            hit_radius: HIT_RADIUS,
            thickness: MIN_THICKNESS,
            zoom: 1.0,
            antialiasing: false,
            color: Color::BLACK,
            markers: MarkerPalette::default(),
        }
    }
}

impl EditorSettings {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.width.max(1), self.height.max(1))
    }

    pub fn set_zoom(&mut self, zoom: f32) {
        self.zoom = if zoom.is_finite() {
            zoom.clamp(MIN_ZOOM, MAX_ZOOM)
        } else {
            1.0
        };
    }

    /// Scroll-wheel zoom: one 120-unit notch changes the scale by 0.1.
    pub fn zoom_by_wheel(&mut self, wheel_delta: f32) {
        self.set_zoom(self.zoom + wheel_delta / (10.0 * 120.0));
    }

    pub fn set_thickness(&mut self, thickness: u32) {
        self.thickness = thickness.clamp(MIN_THICKNESS, MAX_THICKNESS);
    }

    pub fn adjust_thickness(&mut self, notches: i32) {
        let next = (self.thickness as i64 + i64::from(notches)).max(0) as u32;
        self.set_thickness(next);
    }
}
