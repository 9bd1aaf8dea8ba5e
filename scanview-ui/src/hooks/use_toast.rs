use leptos::*;
use std::time::Duration;

/// How long a toast stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_millis(3000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

impl ToastKind {
    pub fn class(self) -> &'static str {
        match self {
            ToastKind::Info => "toast-info",
            ToastKind::Success => "toast-success",
            ToastKind::Error => "toast-error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ToastMessage {
    id: u64,
    pub kind: ToastKind,
    pub text: String,
}

/// Handle for showing transient notifications. Cheap to copy into closures.
#[derive(Clone, Copy)]
pub struct Toaster {
    current: RwSignal<Option<ToastMessage>>,
    next_id: StoredValue<u64>,
}

impl Toaster {
    pub fn message(&self) -> Signal<Option<ToastMessage>> {
        self.current.into()
    }

    /// Show `text`, replacing any visible toast, and hide it after
    /// [`TOAST_DURATION`] unless a newer one has taken its place.
    pub fn show(&self, kind: ToastKind, text: impl Into<String>) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id.wrapping_add(1));
        self.current.set(Some(ToastMessage {
            id,
            kind,
            text: text.into(),
        }));

        let current = self.current;
        set_timeout(
            move || {
                if current.with_untracked(|m| m.as_ref().map(|m| m.id)) == Some(id) {
                    current.set(None);
                }
            },
            TOAST_DURATION,
        );
    }

    pub fn info(&self, text: impl Into<String>) {
        self.show(ToastKind::Info, text);
    }

    pub fn success(&self, text: impl Into<String>) {
        self.show(ToastKind::Success, text);
    }

    pub fn error(&self, text: impl Into<String>) {
        self.show(ToastKind::Error, text);
    }
}

pub fn use_toast() -> Toaster {
    Toaster {
        current: create_rw_signal(None),
        next_id: store_value(0),
    }
}
