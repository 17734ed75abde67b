//! Window geometry and monitor-bounds validation.
//!
//! Physical-pixel coordinates throughout. A persisted geometry is only worth
//! restoring when it lies fully inside some connected display; a widget
//! restored onto a disconnected monitor would be unreachable.

use serde::{Deserialize, Serialize};

/// Outer position and inner size of the widget window, in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetGeometry {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// One connected display's rectangle, in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorBounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl MonitorBounds {
    /// Whether the geometry lies fully inside this display.
    pub fn contains(&self, geometry: &WidgetGeometry) -> bool {
        let right = i64::from(self.x) + i64::from(self.width);
        let bottom = i64::from(self.y) + i64::from(self.height);
        let geo_right = i64::from(geometry.x) + i64::from(geometry.width);
        let geo_bottom = i64::from(geometry.y) + i64::from(geometry.height);

        geometry.x >= self.x && geo_right <= right && geometry.y >= self.y && geo_bottom <= bottom
    }
}

impl WidgetGeometry {
    /// Whether this geometry lies fully inside at least one of the given
    /// displays.
    pub fn fits_any(&self, monitors: &[MonitorBounds]) -> bool {
        monitors.iter().any(|monitor| monitor.contains(self))
    }
}
