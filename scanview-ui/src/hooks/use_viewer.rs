//! Reactive wrapper around a [`ViewerSession`] bound to one canvas.
//!
//! The session owns the transform; this handle owns the decoded image and
//! paints every [`Redraw`] the session hands back.

use crate::api::ClientError;
use crate::rendering::{clear_canvas, client_to_surface, paint_image, resize_canvas};
use leptos::html::Canvas;
use leptos::*;
use scanview_core::{
    GestureEvent, PixelSize, Redraw, SurfacePoint, ViewerConfig, ViewerError, ViewerSession,
};
use web_sys::HtmlImageElement;

/// Image currently shown in the viewer.
#[derive(Clone, Debug, PartialEq)]
pub struct LoadedImage {
    pub url: String,
    pub size: PixelSize,
}

impl LoadedImage {
    /// Dimensions label, e.g. `2480×3508 px`.
    pub fn dimensions_label(&self) -> String {
        format!("{}×{} px", self.size.width, self.size.height)
    }
}

/// Issues a ticket per image request; only the latest ticket may be shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadTracker {
    latest: u64,
}

impl LoadTracker {
    /// Start a new request, superseding every earlier ticket.
    pub fn begin(&mut self) -> u64 {
        self.latest = self.latest.wrapping_add(1);
        self.latest
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        ticket == self.latest
    }
}

#[derive(Clone, Copy)]
pub struct ViewerHandle {
    session: StoredValue<ViewerSession>,
    element: StoredValue<Option<HtmlImageElement>>,
    loads: StoredValue<LoadTracker>,
    canvas_ref: NodeRef<Canvas>,
    loaded: RwSignal<Option<LoadedImage>>,
    dragging: RwSignal<bool>,
}

pub fn use_viewer(config: ViewerConfig) -> ViewerHandle {
    let session = ViewerSession::new(config, config.min_surface()).unwrap_or_else(|e| {
        log::warn!("{}, using defaults", e);
        ViewerSession::default()
    });
    ViewerHandle {
        session: store_value(session),
        element: store_value(None),
        loads: store_value(LoadTracker::default()),
        canvas_ref: create_node_ref::<Canvas>(),
        loaded: create_rw_signal(None),
        dragging: create_rw_signal(false),
    }
}

impl ViewerHandle {
    pub fn canvas_ref(&self) -> NodeRef<Canvas> {
        self.canvas_ref
    }

    pub fn loaded(&self) -> Signal<Option<LoadedImage>> {
        self.loaded.into()
    }

    pub fn is_dragging(&self) -> Signal<bool> {
        self.dragging.into()
    }

    /// Ticket for an image request about to start. Completions carrying an
    /// older ticket are dropped by [`show`](Self::show).
    pub fn begin_load(&self) -> u64 {
        self.loads
            .try_update_value(LoadTracker::begin)
            .unwrap_or_default()
    }

    pub fn is_current_load(&self, ticket: u64) -> bool {
        self.loads.with_value(|l| l.is_current(ticket))
    }

    /// Show a decoded image, fitted to the surface.
    ///
    /// Returns `Ok(false)` without touching the viewer when a newer request
    /// (or a [`clear`](Self::clear)) superseded `ticket`.
    pub fn show(
        &self,
        ticket: u64,
        url: &str,
        element: HtmlImageElement,
    ) -> Result<bool, ClientError> {
        if !self.is_current_load(ticket) {
            log::debug!("Dropping stale image {}", url);
            return Ok(false);
        }
        let size = PixelSize::new(element.natural_width(), element.natural_height());
        let redraw = self
            .session
            .try_update_value(|s| s.set_image(size))
            .ok_or(ViewerError::NoImage)??;

        self.element.set_value(Some(element));
        self.loaded.set(Some(LoadedImage {
            url: url.to_string(),
            size,
        }));
        self.dragging.set(false);
        self.paint(redraw);
        Ok(true)
    }

    /// Drop the current image and blank the canvas.
    pub fn clear(&self) {
        self.loads.update_value(|l| {
            l.begin();
        });
        self.session.update_value(|s| s.clear_image());
        self.element.set_value(None);
        self.loaded.set(None);
        self.dragging.set(false);

        if let Some(canvas) = self.canvas_ref.get_untracked() {
            if let Err(e) = clear_canvas(&canvas) {
                log::warn!("Failed to clear canvas: {:?}", e);
            }
        }
    }

    pub fn fit(&self) {
        match self.session.try_update_value(|s| s.fit()) {
            Some(Ok(redraw)) => self.paint(redraw),
            Some(Err(e)) => log::debug!("Fit skipped: {}", e),
            None => {}
        }
    }

    pub fn zoom_in(&self) {
        self.apply(|s| s.zoom_in());
    }

    pub fn zoom_out(&self) {
        self.apply(|s| s.zoom_out());
    }

    /// Feed one input event through the gesture state machine.
    pub fn dispatch(&self, event: GestureEvent) {
        self.apply(|s| s.handle(event));
        let dragging = self.session.with_value(|s| s.is_dragging());
        if self.dragging.get_untracked() != dragging {
            self.dragging.set(dragging);
        }
    }

    /// Surface point of a client-space position on the bound canvas.
    pub fn surface_point(&self, client_x: f64, client_y: f64) -> Option<SurfacePoint> {
        let canvas = self.canvas_ref.get_untracked()?;
        Some(client_to_surface(&canvas, client_x, client_y))
    }

    /// Resize the surface to the container, never below the configured minimum.
    pub fn resize(&self, container: PixelSize) {
        let Some(canvas) = self.canvas_ref.get_untracked() else {
            return;
        };
        let size = container.at_least(self.session.with_value(|s| s.config().min_surface()));
        let cleared = resize_canvas(&canvas, size);

        match self.session.try_update_value(|s| s.set_surface(size)) {
            Some(Ok(Some(redraw))) => self.paint(redraw),
            Some(Ok(None)) if cleared => self.repaint(),
            Some(Err(e)) => log::warn!("Ignoring resize: {}", e),
            _ => {}
        }
    }

    /// Paint the current transform again, e.g. after the canvas was cleared.
    pub fn repaint(&self) {
        let (transform, has_image) = self
            .session
            .with_value(|s| (s.transform(), s.image().is_some()));
        if has_image {
            self.paint(Redraw { transform });
        }
    }

    fn apply(&self, f: impl FnOnce(&mut ViewerSession) -> Option<Redraw>) {
        if let Some(redraw) = self.session.try_update_value(f).flatten() {
            self.paint(redraw);
        }
    }

    fn paint(&self, redraw: Redraw) {
        let Some(canvas) = self.canvas_ref.get_untracked() else {
            return;
        };
        self.element.with_value(|element| {
            let Some(element) = element else {
                return;
            };
            if let Err(e) = paint_image(&canvas, element, &redraw.transform) {
                log::warn!("Failed to paint image: {:?}", e);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimensions_label_uses_pixels() {
        let image = LoadedImage {
            url: "/api/download/a.jpg".into(),
            size: PixelSize::new(2480, 3508),
        };
        assert_eq!(image.dimensions_label(), "2480×3508 px");
    }

    #[test]
    fn later_request_supersedes_earlier() {
        let mut loads = LoadTracker::default();
        let scan = loads.begin();
        let history = loads.begin();

        // The scan result arriving last must not replace the history view
        assert!(!loads.is_current(scan));
        assert!(loads.is_current(history));
    }

    #[test]
    fn begin_without_completion_invalidates_pending() {
        let mut loads = LoadTracker::default();
        let pending = loads.begin();
        loads.begin();
        assert!(!loads.is_current(pending));
        assert!(!loads.is_current(0));
    }
}
