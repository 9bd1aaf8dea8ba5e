//! Canvas showing the current scan with wheel zoom and drag panning.
//!
//! Browser events are translated into [`GestureEvent`]s here; the gesture
//! state machine and the transform live in the core session.

use crate::hooks::ViewerHandle;
use leptos::html::Div;
use leptos::*;
use leptos_use::{use_element_size, UseElementSizeReturn};
use scanview_core::{GestureEvent, PixelSize, TouchContacts};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, EventTarget, PointerEvent, TouchEvent, WheelEvent};

type Listener = Closure<dyn FnMut(web_sys::Event)>;

/// Register a non-passive listener so handlers may call `prevent_default`.
fn listen<E, F>(
    target: &EventTarget,
    name: &'static str,
    mut handler: F,
) -> Result<Listener, JsValue>
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::wrap(Box::new(move |ev: web_sys::Event| {
        handler(ev.unchecked_into::<E>());
    }) as Box<dyn FnMut(web_sys::Event)>);

    let options = AddEventListenerOptions::new();
    options.set_passive(false);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        name,
        closure.as_ref().unchecked_ref(),
        &options,
    )?;
    Ok(closure)
}

fn touch_contacts(viewer: &ViewerHandle, ev: &TouchEvent) -> TouchContacts {
    let touches = ev.touches();
    if touches.length() == 1 {
        let point = touches
            .get(0)
            .and_then(|t| viewer.surface_point(t.client_x() as f64, t.client_y() as f64));
        if let Some(point) = point {
            return TouchContacts::One(point);
        }
    }
    TouchContacts::Other(touches.length())
}

/// Touch input arrives through touch events; skip the pointer events the
/// browser synthesizes for it.
fn is_touch(ev: &PointerEvent) -> bool {
    ev.pointer_type() == "touch"
}

fn attach_listeners(
    target: &EventTarget,
    viewer: ViewerHandle,
) -> Result<Vec<(&'static str, Listener)>, JsValue> {
    let pointer =
        move |ev: &PointerEvent| viewer.surface_point(ev.client_x() as f64, ev.client_y() as f64);

    Ok(vec![
        (
            "wheel",
            listen(target, "wheel", move |ev: WheelEvent| {
                ev.prevent_default();
                if let Some(at) = viewer.surface_point(ev.client_x() as f64, ev.client_y() as f64) {
                    viewer.dispatch(GestureEvent::Wheel {
                        delta_y: ev.delta_y(),
                        at,
                    });
                }
            })?,
        ),
        (
            "pointerdown",
            listen(target, "pointerdown", move |ev: PointerEvent| {
                if is_touch(&ev) {
                    return;
                }
                ev.prevent_default();
                if let Some(p) = pointer(&ev) {
                    viewer.dispatch(GestureEvent::PointerDown(p));
                }
            })?,
        ),
        (
            "pointermove",
            listen(target, "pointermove", move |ev: PointerEvent| {
                if is_touch(&ev) {
                    return;
                }
                if let Some(p) = pointer(&ev) {
                    viewer.dispatch(GestureEvent::PointerMove(p));
                }
            })?,
        ),
        (
            "pointerup",
            listen(target, "pointerup", move |ev: PointerEvent| {
                if !is_touch(&ev) {
                    viewer.dispatch(GestureEvent::PointerUp);
                }
            })?,
        ),
        (
            "pointerleave",
            listen(target, "pointerleave", move |ev: PointerEvent| {
                if !is_touch(&ev) {
                    viewer.dispatch(GestureEvent::PointerLeave);
                }
            })?,
        ),
        (
            "touchstart",
            listen(target, "touchstart", move |ev: TouchEvent| {
                ev.prevent_default();
                viewer.dispatch(GestureEvent::TouchStart(touch_contacts(&viewer, &ev)));
            })?,
        ),
        (
            "touchmove",
            listen(target, "touchmove", move |ev: TouchEvent| {
                ev.prevent_default();
                viewer.dispatch(GestureEvent::TouchMove(touch_contacts(&viewer, &ev)));
            })?,
        ),
        (
            "touchend",
            listen(target, "touchend", move |_: TouchEvent| {
                viewer.dispatch(GestureEvent::TouchEnd);
            })?,
        ),
        (
            "touchcancel",
            listen(target, "touchcancel", move |_: TouchEvent| {
                viewer.dispatch(GestureEvent::TouchCancel);
            })?,
        ),
    ])
}

#[component]
pub fn ViewerCanvas(viewer: ViewerHandle) -> impl IntoView {
    let container_ref = create_node_ref::<Div>();
    let canvas_ref = viewer.canvas_ref();
    let loaded = viewer.loaded();
    let dragging = viewer.is_dragging();

    let UseElementSizeReturn { width, height } = use_element_size(container_ref);

    // Keep the surface in step with the container
    create_effect(move |_| {
        if canvas_ref.get().is_none() {
            return;
        }
        let (w, h) = (width.get(), height.get());
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        viewer.resize(PixelSize::new(w.round() as u32, h.round() as u32));
    });

    // Wire input once the canvas is in the DOM
    create_effect(move |_| {
        let Some(canvas) = canvas_ref.get() else {
            return;
        };
        let target: EventTarget = canvas.unchecked_ref::<EventTarget>().clone();

        match attach_listeners(&target, viewer) {
            Ok(listeners) => on_cleanup(move || {
                for (name, listener) in &listeners {
                    let _ = target.remove_event_listener_with_callback(
                        name,
                        listener.as_ref().unchecked_ref(),
                    );
                }
            }),
            Err(e) => log::warn!("Failed to attach viewer listeners: {:?}", e),
        }
    });

    let visibility = move || {
        if loaded.with(Option::is_some) {
            "visible"
        } else {
            "hidden"
        }
    };
    let cursor = move || match (loaded.with(Option::is_some), dragging.get()) {
        (false, _) => "default",
        (true, false) => "grab",
        (true, true) => "grabbing",
    };

    view! {
        <div
            node_ref=container_ref
            class="viewer-container"
            style:position="relative"
            style:width="100%"
            style:height="70vh"
            style:overflow="hidden"
        >
            <canvas
                node_ref=canvas_ref
                class="block"
                style:position="absolute"
                style:top="0"
                style:left="0"
                style:touch-action="none"
                style:cursor=cursor
                style:visibility=visibility
            />
            <Show when=move || loaded.with(Option::is_none)>
                <div class="preview-placeholder">
                    <p>"No scan to show yet"</p>
                    <p class="text-muted small">"Pick a device and start a scan"</p>
                </div>
            </Show>
        </div>
    }
}
