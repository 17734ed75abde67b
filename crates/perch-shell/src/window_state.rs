//! Window geometry persistence.
//!
//! Restores the saved placement at startup and writes it back, debounced,
//! as the user drags or resizes the widget. Restoration goes through an
//! explicit phase machine: `Loading` while the saved record is read,
//! `SettlingPlacement` while the host window manager finishes initial
//! placement, `Ready` once user-driven events can be trusted. Writes are
//! gated strictly on `Ready` so the programmatic placement is never
//! persisted as if the user had dragged the window there.

use crate::debounce::TrailingDebounce;
use crate::platform::{DisplayEnumerator, WindowEvent, WindowHandle};
use perch_domain::WidgetGeometry;
use perch_persistence::{read_optional, write_value, KeyValueStore, WIDGET_STATE_KEY};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupPhase {
    Loading,
    SettlingPlacement,
    Ready,
}

pub struct WindowStateService {
    store: Arc<dyn KeyValueStore>,
    window: Arc<dyn WindowHandle>,
    displays: Arc<dyn DisplayEnumerator>,
    settle_delay: Duration,
    phase: StartupPhase,
    debounce: TrailingDebounce,
}

impl WindowStateService {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        window: Arc<dyn WindowHandle>,
        displays: Arc<dyn DisplayEnumerator>,
        settle_delay: Duration,
        debounce_delay: Duration,
    ) -> Self {
        Self {
            store,
            window,
            displays,
            settle_delay,
            phase: StartupPhase::Loading,
            debounce: TrailingDebounce::new(debounce_delay),
        }
    }

    pub fn phase(&self) -> StartupPhase {
        self.phase
    }

    /// Restore the persisted placement, then mark the service ready.
    ///
    /// The saved geometry is applied only when it lies fully inside some
    /// connected display; a record pointing at a disconnected monitor is
    /// ignored and the host's default placement stands.
    pub async fn restore(&mut self) {
        let saved: Option<WidgetGeometry> = read_optional(self.store.as_ref(), WIDGET_STATE_KEY).await;

        self.phase = StartupPhase::SettlingPlacement;
        tokio::time::sleep(self.settle_delay).await;

        match saved {
            Some(geometry) => match self.displays.monitors() {
                Ok(monitors) if geometry.fits_any(&monitors) => {
                    match self.window.apply_geometry(&geometry) {
                        Ok(()) => tracing::info!(?geometry, "restored window placement"),
                        Err(e) => tracing::warn!(error = %e, "failed to apply saved placement"),
                    }
                }
                Ok(_) => {
                    tracing::info!(
                        ?geometry,
                        "saved placement is outside every display, keeping default"
                    );
                }
                Err(e) => {
                    tracing::warn!(error = %e, "could not enumerate displays, keeping default");
                }
            },
            None => tracing::debug!("no saved window placement"),
        }

        // Second settle: the placement we just applied raises move/resize
        // events of its own.
        tokio::time::sleep(self.settle_delay).await;
        self.phase = StartupPhase::Ready;
        tracing::debug!("window state service ready");
    }

    /// Feed one host move/resize event into the debouncer. Events arriving
    /// before `Ready` are dropped.
    pub fn handle_event(&mut self, event: WindowEvent) {
        if self.phase != StartupPhase::Ready {
            tracing::debug!(?event, "ignoring window event before ready");
            return;
        }
        self.debounce.poke();
    }

    /// Wait until a burst of window events has gone quiet.
    pub async fn persist_due(&mut self) -> Option<()> {
        self.debounce.fired().await
    }

    /// Write the window's current outer position and inner size.
    pub async fn persist_now(&self) {
        let (x, y) = match self.window.outer_position() {
            Ok(position) => position,
            Err(e) => {
                tracing::warn!(error = %e, "could not read window position");
                return;
            }
        };
        let (width, height) = match self.window.inner_size() {
            Ok(size) => size,
            Err(e) => {
                tracing::warn!(error = %e, "could not read window size");
                return;
            }
        };

        let geometry = WidgetGeometry {
            x,
            y,
            width,
            height,
        };
        match write_value(self.store.as_ref(), WIDGET_STATE_KEY, &geometry).await {
            Ok(()) => tracing::debug!(?geometry, "persisted window placement"),
            Err(e) => tracing::warn!(error = %e, "failed to persist window placement"),
        }
    }

    /// Drop the pending debounce timer, if any.
    pub fn shutdown(&mut self) {
        self.debounce.cancel();
    }
}
