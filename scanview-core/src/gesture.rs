//! Pointer, touch and wheel gesture handling.
//!
//! [`transition`] is the pure state machine: given the current snapshot and one
//! input event it returns the next gesture state and the transform fields to
//! write. [`GestureController`] owns a [`ViewportStateStore`], applies those
//! transitions and reports a [`Redraw`] whenever the transform was written.
//!
//! ```text
//!            pointerdown / touchstart(1)
//!   Idle ───────────────────────────────▶ Dragging ──┐ pointermove / touchmove(1)
//!    ▲                                      │  ◀─────┘   offset = base + travel
//!    └──────────────────────────────────────┘
//!      pointerup / pointerleave / touchend / touchcancel
//! ```
//!
//! Wheel events zoom around the cursor in either state.

use crate::{
    DragAnchor, GestureState, SurfacePoint, ViewTransform, ViewerConfig, ViewerError,
    ViewportSnapshot, ViewportStateStore, ViewportUpdate, ZoomDirection,
};

/// Contact points reported by a touch event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TouchContacts {
    /// Exactly one finger, at this point.
    One(SurfacePoint),
    /// Any other count (zero or multi-touch). Never acted on.
    Other(u32),
}

/// Input event with coordinates already converted to surface-center space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    Wheel { delta_y: f64, at: SurfacePoint },
    PointerDown(SurfacePoint),
    PointerMove(SurfacePoint),
    PointerUp,
    PointerLeave,
    TouchStart(TouchContacts),
    TouchMove(TouchContacts),
    TouchEnd,
    TouchCancel,
}

/// Result of feeding one event to the state machine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    pub gesture: GestureState,
    pub update: ViewportUpdate,
}

impl Transition {
    fn unchanged(snapshot: &ViewportSnapshot) -> Self {
        Self {
            gesture: snapshot.gesture,
            update: ViewportUpdate::default(),
        }
    }

    fn to(gesture: GestureState) -> Self {
        Self {
            gesture,
            update: ViewportUpdate::gesture(gesture),
        }
    }

    /// True if nothing changes.
    pub fn is_noop(&self) -> bool {
        self.update == ViewportUpdate::default()
    }
}

/// Zoom one step around `anchor`, clamping the new scale.
pub fn zoom_step_at(
    transform: &ViewTransform,
    anchor: SurfacePoint,
    direction: ZoomDirection,
    config: &ViewerConfig,
) -> ViewTransform {
    let factor = ViewerConfig::step(config.wheel_zoom_factor, direction);
    let new_scale = config.clamp_scale(transform.scale * factor);
    transform.zoomed_at(anchor, new_scale)
}

/// Pure transition function of the gesture state machine.
pub fn transition(
    snapshot: &ViewportSnapshot,
    event: &GestureEvent,
    config: &ViewerConfig,
) -> Transition {
    match (*event, snapshot.gesture) {
        (GestureEvent::Wheel { delta_y, at }, _) => {
            let direction = ZoomDirection::from_wheel_delta(delta_y);
            let zoomed = zoom_step_at(&snapshot.transform, at, direction, config);
            Transition {
                gesture: snapshot.gesture,
                update: ViewportUpdate::transform(zoomed),
            }
        }

        (GestureEvent::PointerDown(at), GestureState::Idle)
        | (GestureEvent::TouchStart(TouchContacts::One(at)), GestureState::Idle) => {
            Transition::to(GestureState::Dragging(DragAnchor::new(
                at,
                &snapshot.transform,
            )))
        }

        (GestureEvent::PointerMove(at), GestureState::Dragging(anchor))
        | (GestureEvent::TouchMove(TouchContacts::One(at)), GestureState::Dragging(anchor)) => {
            let (offset_x, offset_y) = anchor.offset_for(at);
            Transition {
                gesture: snapshot.gesture,
                update: ViewportUpdate::offset(offset_x, offset_y),
            }
        }

        (
            GestureEvent::PointerUp
            | GestureEvent::PointerLeave
            | GestureEvent::TouchEnd
            | GestureEvent::TouchCancel,
            GestureState::Dragging(_),
        ) => Transition::to(GestureState::Idle),

        _ => Transition::unchanged(snapshot),
    }
}

/// Notification that the surface must be repainted with `transform`.
#[must_use = "a redraw request must be forwarded to the renderer"]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Redraw {
    pub transform: ViewTransform,
}

/// Owns the viewport store and is the only writer of the transform.
#[derive(Clone, Debug, Default)]
pub struct GestureController {
    store: ViewportStateStore,
    config: ViewerConfig,
}

impl GestureController {
    pub fn new(config: ViewerConfig, initial: ViewTransform) -> Result<Self, ViewerError> {
        config.validate()?;
        Ok(Self {
            store: ViewportStateStore::new(initial),
            config,
        })
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn snapshot(&self) -> ViewportSnapshot {
        self.store.read()
    }

    pub fn transform(&self) -> ViewTransform {
        self.store.read().transform
    }

    pub fn is_dragging(&self) -> bool {
        self.store.read().gesture.is_dragging()
    }

    /// Feed one input event. Returns a redraw request iff the transform changed.
    pub fn handle(&mut self, event: GestureEvent) -> Option<Redraw> {
        let next = transition(&self.store.read(), &event, &self.config);
        self.apply(next.update)
    }

    /// Button zoom in: one step around the image center, offset unchanged.
    pub fn zoom_in(&mut self) -> Redraw {
        self.zoom_centered(ZoomDirection::In)
    }

    /// Button zoom out: one step around the image center, offset unchanged.
    pub fn zoom_out(&mut self) -> Redraw {
        self.zoom_centered(ZoomDirection::Out)
    }

    fn zoom_centered(&mut self, direction: ZoomDirection) -> Redraw {
        let factor = ViewerConfig::step(self.config.button_zoom_factor, direction);
        let scale = self.config.clamp_scale(self.transform().scale * factor);
        log::debug!("Button zoom {:?} to scale {:.4}", direction, scale);
        self.commit(ViewportUpdate::scale(scale))
    }

    /// Replace the whole transform (fit or reset).
    pub fn set_transform(&mut self, transform: ViewTransform) -> Redraw {
        self.commit(ViewportUpdate::transform(transform))
    }

    /// Abandon any drag in progress.
    pub fn reset_gesture(&mut self) {
        self.store.reset();
    }

    fn apply(&mut self, update: ViewportUpdate) -> Option<Redraw> {
        if self.store.update(update) {
            Some(Redraw {
                transform: self.transform(),
            })
        } else {
            None
        }
    }

    fn commit(&mut self, update: ViewportUpdate) -> Redraw {
        self.store.update(update);
        Redraw {
            transform: self.transform(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn controller(scale: f64) -> GestureController {
        GestureController::new(ViewerConfig::default(), ViewTransform::centered(scale)).unwrap()
    }

    fn pt(x: f64, y: f64) -> SurfacePoint {
        SurfacePoint::new(x, y)
    }

    #[test]
    fn wheel_up_at_center_zooms_in_about_center() {
        let mut c = controller(0.5);
        let redraw = c.handle(GestureEvent::Wheel {
            delta_y: -1.0,
            at: SurfacePoint::CENTER,
        });

        let t = redraw.expect("wheel always redraws").transform;
        assert!((t.scale - 0.55).abs() < EPS);
        assert_eq!(t.offset_x, 0.0);
        assert_eq!(t.offset_y, 0.0);
    }

    #[test]
    fn wheel_down_zooms_out() {
        let mut c = controller(1.1);
        let t = c
            .handle(GestureEvent::Wheel {
                delta_y: 3.0,
                at: pt(40.0, 0.0),
            })
            .unwrap()
            .transform;
        assert!((t.scale - 1.0).abs() < EPS);
    }

    #[test]
    fn wheel_keeps_point_under_cursor() {
        let mut c = GestureController::new(
            ViewerConfig::default(),
            ViewTransform::new(0.8, -35.0, 12.0),
        )
        .unwrap();
        let cursor = pt(120.0, -60.0);
        let before = c.transform().surface_to_image(cursor);

        c.handle(GestureEvent::Wheel {
            delta_y: -1.0,
            at: cursor,
        })
        .unwrap();
        let after = c.transform().surface_to_image(cursor);

        assert!((before.0 - after.0).abs() < EPS);
        assert!((before.1 - after.1).abs() < EPS);
    }

    #[test]
    fn wheel_clamps_at_max_and_still_redraws() {
        let mut c = controller(5.0);
        let redraw = c.handle(GestureEvent::Wheel {
            delta_y: -1.0,
            at: pt(10.0, 10.0),
        });
        assert_eq!(redraw.unwrap().transform.scale, 5.0);
    }

    #[test]
    fn pointer_down_enters_dragging_without_redraw() {
        let mut c = controller(1.0);
        assert!(c.handle(GestureEvent::PointerDown(pt(1.0, 2.0))).is_none());
        assert!(c.is_dragging());

        let anchor = *c.snapshot().gesture.drag_anchor().unwrap();
        assert_eq!(anchor.start, pt(1.0, 2.0));
        assert_eq!((anchor.base_offset_x, anchor.base_offset_y), (0.0, 0.0));
    }

    #[test]
    fn pointer_move_while_idle_is_noop() {
        let mut c = controller(1.0);
        assert!(c.handle(GestureEvent::PointerMove(pt(50.0, 50.0))).is_none());
        assert_eq!(c.transform(), ViewTransform::centered(1.0));
        assert!(!c.is_dragging());
    }

    #[test]
    fn drag_then_leave_scenario() {
        let mut c = controller(1.0);
        c.handle(GestureEvent::PointerDown(pt(100.0, 100.0)));
        let t = c
            .handle(GestureEvent::PointerMove(pt(150.0, 130.0)))
            .unwrap()
            .transform;
        assert_eq!((t.offset_x, t.offset_y), (50.0, 30.0));

        assert!(c.handle(GestureEvent::PointerLeave).is_none());
        assert!(!c.is_dragging());
        assert_eq!((c.transform().offset_x, c.transform().offset_y), (50.0, 30.0));
    }

    #[test]
    fn second_pointer_down_keeps_original_anchor() {
        let mut c = controller(1.0);
        c.handle(GestureEvent::PointerDown(pt(0.0, 0.0)));
        c.handle(GestureEvent::PointerDown(pt(80.0, 80.0)));

        let anchor = c.snapshot().gesture.drag_anchor().copied().unwrap();
        assert_eq!(anchor.start, pt(0.0, 0.0));
    }

    #[test]
    fn single_touch_drags_like_pointer() {
        let mut c = controller(1.0);
        c.handle(GestureEvent::TouchStart(TouchContacts::One(pt(10.0, 10.0))));
        assert!(c.is_dragging());

        let t = c
            .handle(GestureEvent::TouchMove(TouchContacts::One(pt(-5.0, 40.0))))
            .unwrap()
            .transform;
        assert_eq!((t.offset_x, t.offset_y), (-15.0, 30.0));

        c.handle(GestureEvent::TouchEnd);
        assert!(!c.is_dragging());
    }

    #[test]
    fn multi_touch_is_ignored() {
        let mut c = controller(1.0);
        assert!(c
            .handle(GestureEvent::TouchStart(TouchContacts::Other(2)))
            .is_none());
        assert!(!c.is_dragging());

        c.handle(GestureEvent::TouchStart(TouchContacts::One(pt(0.0, 0.0))));
        assert!(c
            .handle(GestureEvent::TouchMove(TouchContacts::Other(2)))
            .is_none());
        assert!(c.is_dragging());
        assert_eq!(c.transform(), ViewTransform::centered(1.0));
    }

    #[test]
    fn touch_cancel_ends_drag() {
        let mut c = controller(1.0);
        c.handle(GestureEvent::TouchStart(TouchContacts::One(pt(0.0, 0.0))));
        c.handle(GestureEvent::TouchCancel);
        assert!(!c.is_dragging());
    }

    #[test]
    fn release_while_idle_is_noop() {
        let snapshot = ViewportSnapshot::default();
        let config = ViewerConfig::default();
        for event in [
            GestureEvent::PointerUp,
            GestureEvent::PointerLeave,
            GestureEvent::TouchEnd,
            GestureEvent::TouchCancel,
        ] {
            assert!(transition(&snapshot, &event, &config).is_noop());
        }
    }

    #[test]
    fn wheel_during_drag_keeps_dragging() {
        let mut c = controller(1.0);
        c.handle(GestureEvent::PointerDown(pt(0.0, 0.0)));
        c.handle(GestureEvent::Wheel {
            delta_y: -1.0,
            at: pt(30.0, 30.0),
        });
        assert!(c.is_dragging());
    }

    #[test]
    fn buttons_change_scale_only() {
        let mut c = GestureController::new(
            ViewerConfig::default(),
            ViewTransform::new(1.0, 25.0, -10.0),
        )
        .unwrap();

        let t = c.zoom_in().transform;
        assert!((t.scale - 1.1).abs() < EPS);
        assert_eq!((t.offset_x, t.offset_y), (25.0, -10.0));

        let t = c.zoom_out().transform;
        assert!((t.scale - 1.0).abs() < EPS);
        assert_eq!((t.offset_x, t.offset_y), (25.0, -10.0));
    }

    #[test]
    fn buttons_clamp_to_bounds() {
        let mut c = controller(0.1);
        assert_eq!(c.zoom_out().transform.scale, 0.1);

        let mut c = controller(4.9);
        assert_eq!(c.zoom_in().transform.scale, 5.0);
    }

    #[test]
    fn inverted_scale_bounds_rejected_at_construction() {
        let config = ViewerConfig {
            scale_min: 6.0,
            ..ViewerConfig::default()
        };
        let err = GestureController::new(config, ViewTransform::centered(1.0)).unwrap_err();
        assert!(matches!(err, ViewerError::InvalidConfig(_)));
    }
}
