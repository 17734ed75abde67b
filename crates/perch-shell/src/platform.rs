//! Collaborator traits for the host desktop shell.
//!
//! The widget core never talks to the windowing system directly. The
//! embedding shell (tray, chrome, notification window) implements these
//! traits and forwards move/resize events into the session's channel.

use perch_core::PerchResult;
use perch_domain::{MonitorBounds, WidgetGeometry};

/// Shows the native break notification. Fire-and-forget from the session's
/// point of view; a failure is logged and the timer still stops.
pub trait BreakNotifier: Send + Sync {
    fn show_break_notification(&self, message: &str) -> PerchResult<()>;
}

/// Terminates the application.
pub trait AppController: Send + Sync {
    fn exit(&self);
}

/// Enumerates the connected displays.
pub trait DisplayEnumerator: Send + Sync {
    fn monitors(&self) -> PerchResult<Vec<MonitorBounds>>;
}

/// Read/write access to the widget window's placement.
pub trait WindowHandle: Send + Sync {
    /// Outer position of the window, in physical pixels.
    fn outer_position(&self) -> PerchResult<(i32, i32)>;

    /// Inner size of the window, in physical pixels.
    fn inner_size(&self) -> PerchResult<(u32, u32)>;

    /// Move and resize the window in one step.
    fn apply_geometry(&self, geometry: &WidgetGeometry) -> PerchResult<()>;
}

/// A move or resize reported by the host shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    Moved { x: i32, y: i32 },
    Resized { width: u32, height: u32 },
}
