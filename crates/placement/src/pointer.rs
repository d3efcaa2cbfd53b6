use serde::{Deserialize, Serialize};

use crate::Millis;

/// Converts pointer positions into timeline time.
///
/// Device and layout details (scroll offsets, nested containers, DPI) live
/// behind this trait so the placement engine only ever sees milliseconds.
pub trait TimeMapper {
    /// Timeline time under the pointer at horizontal position `pointer_x`.
    fn time_at(&self, pointer_x: f64) -> Millis;

    /// Length of `px` screen pixels in milliseconds, for pixel snap thresholds.
    fn span_to_ms(&self, px: f64) -> Millis;
}

/// Linear mapping for a horizontally scrolling timeline view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportMapper {
    /// Screen x of time zero before scrolling.
    pub origin_px: f64,
    /// Horizontal scroll offset in pixels.
    pub scroll_px: f64,
    /// Zoom level.
    pub px_per_ms: f64,
}

impl ViewportMapper {
    const MIN_ZOOM: f64 = 1e-6;

    pub fn new(origin_px: f64, scroll_px: f64, px_per_ms: f64) -> Self {
        Self {
            origin_px,
            scroll_px,
            px_per_ms,
        }
    }

    fn zoom(&self) -> f64 {
        if self.px_per_ms.is_finite() {
            self.px_per_ms.max(Self::MIN_ZOOM)
        } else {
            Self::MIN_ZOOM
        }
    }

    /// Screen x of `time`, the inverse of [`TimeMapper::time_at`].
    pub fn x_at(&self, time: Millis) -> f64 {
        self.origin_px - self.scroll_px + time as f64 * self.zoom()
    }
}

impl Default for ViewportMapper {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.1)
    }
}

impl TimeMapper for ViewportMapper {
    fn time_at(&self, pointer_x: f64) -> Millis {
        let ms = (pointer_x - self.origin_px + self.scroll_px) / self.zoom();
        if ms.is_finite() {
            ms.round() as Millis
        } else {
            0
        }
    }

    fn span_to_ms(&self, px: f64) -> Millis {
        let ms = (px / self.zoom()).ceil();
        if ms.is_finite() {
            ms as Millis
        } else {
            0
        }
    }
}
