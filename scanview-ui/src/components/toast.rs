//! Toast notification component for transient feedback.

use crate::hooks::ToastMessage;
use leptos::*;

/// Toast notification that appears briefly then fades out.
#[component]
pub fn Toast(
    /// Message to display (None = hidden)
    message: Signal<Option<ToastMessage>>,
) -> impl IntoView {
    // Keep the last text while fading out
    let (display, set_display) = create_signal(None::<ToastMessage>);

    create_effect(move |_| {
        if let Some(msg) = message.get() {
            set_display.set(Some(msg));
        }
    });

    view! {
        <div
            class=move || format!(
                "toast {} {}",
                display.with(|m| m.as_ref().map(|m| m.kind.class()).unwrap_or_default()),
                if message.with(Option::is_some) { "show" } else { "" }
            )
            role="status"
        >
            {move || display.with(|m| m.as_ref().map(|m| m.text.clone()).unwrap_or_default())}
        </div>
    }
}
