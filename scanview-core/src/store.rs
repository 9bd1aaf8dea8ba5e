//! Single mutable source of truth for one viewer: the transform plus the
//! transient drag state.

use crate::{SurfacePoint, ViewTransform};

/// Where a drag started and what the offset was at that moment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragAnchor {
    pub start: SurfacePoint,
    pub base_offset_x: f64,
    pub base_offset_y: f64,
}

impl DragAnchor {
    pub fn new(start: SurfacePoint, transform: &ViewTransform) -> Self {
        Self {
            start,
            base_offset_x: transform.offset_x,
            base_offset_y: transform.offset_y,
        }
    }

    /// Offset for the pointer now at `current`: base plus total pointer travel.
    pub fn offset_for(&self, current: SurfacePoint) -> (f64, f64) {
        (
            self.base_offset_x + (current.x - self.start.x),
            self.base_offset_y + (current.y - self.start.y),
        )
    }
}

/// Gesture tracking state. The anchor exists exactly while dragging.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging(DragAnchor),
}

impl GestureState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, GestureState::Dragging(_))
    }

    pub fn drag_anchor(&self) -> Option<&DragAnchor> {
        match self {
            GestureState::Dragging(anchor) => Some(anchor),
            GestureState::Idle => None,
        }
    }
}

/// Consistent copy of the store's contents.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportSnapshot {
    pub transform: ViewTransform,
    pub gesture: GestureState,
}

/// Partial update: only `Some` fields are written.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportUpdate {
    pub scale: Option<f64>,
    pub offset_x: Option<f64>,
    pub offset_y: Option<f64>,
    pub gesture: Option<GestureState>,
}

impl ViewportUpdate {
    pub fn scale(scale: f64) -> Self {
        Self {
            scale: Some(scale),
            ..Self::default()
        }
    }

    pub fn offset(offset_x: f64, offset_y: f64) -> Self {
        Self {
            offset_x: Some(offset_x),
            offset_y: Some(offset_y),
            ..Self::default()
        }
    }

    pub fn gesture(gesture: GestureState) -> Self {
        Self {
            gesture: Some(gesture),
            ..Self::default()
        }
    }

    /// Update writing every transform field.
    pub fn transform(transform: ViewTransform) -> Self {
        Self {
            scale: Some(transform.scale),
            offset_x: Some(transform.offset_x),
            offset_y: Some(transform.offset_y),
            gesture: None,
        }
    }

    pub fn with_gesture(self, gesture: GestureState) -> Self {
        Self {
            gesture: Some(gesture),
            ..self
        }
    }

    /// True if any transform field is set (a redraw is due after applying it).
    pub fn touches_transform(&self) -> bool {
        self.scale.is_some() || self.offset_x.is_some() || self.offset_y.is_some()
    }
}

#[derive(Clone, Debug, Default)]
pub struct ViewportStateStore {
    state: ViewportSnapshot,
}

impl ViewportStateStore {
    pub fn new(transform: ViewTransform) -> Self {
        Self {
            state: ViewportSnapshot {
                transform,
                gesture: GestureState::Idle,
            },
        }
    }

    pub fn read(&self) -> ViewportSnapshot {
        self.state
    }

    /// Merge the supplied fields. Returns true if the transform was written.
    pub fn update(&mut self, update: ViewportUpdate) -> bool {
        let transform = &mut self.state.transform;
        if let Some(scale) = update.scale {
            transform.scale = scale;
        }
        if let Some(offset_x) = update.offset_x {
            transform.offset_x = offset_x;
        }
        if let Some(offset_y) = update.offset_y {
            transform.offset_y = offset_y;
        }
        if let Some(gesture) = update.gesture {
            self.state.gesture = gesture;
        }
        update.touches_transform()
    }

    /// Back to idle. The transform is left alone.
    pub fn reset(&mut self) {
        self.state.gesture = GestureState::Idle;
    }
}
