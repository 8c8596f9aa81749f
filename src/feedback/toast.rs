//! Toast model and the lazily created notification area.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

use std::fmt;

use crate::dom::MessageKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(pub u64);

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

/// Presentation class of a toast.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastStyle {
    Error,
    Success,
    Info,
}

impl ToastStyle {
    #[must_use]
    pub fn for_kind(kind: MessageKind) -> Self {
        match kind {
            MessageKind::Error | MessageKind::Danger => Self::Error,
            MessageKind::Victory | MessageKind::Success => Self::Success,
            MessageKind::Info => Self::Info,
        }
    }

    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Success => "success",
            Self::Info => "info",
        }
    }

    #[must_use]
    pub fn icon(self) -> &'static str {
        match self {
            Self::Error => "fa-exclamation-triangle",
            Self::Success => "fa-trophy",
            Self::Info => "fa-info-circle",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastPhase {
    Visible,
    Fading,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub text: String,
    pub style: ToastStyle,
    pub phase: ToastPhase,
}

/// Stack of live toasts, oldest first.
#[derive(Debug, Default)]
pub struct NotificationArea {
    toasts: Vec<Toast>,
    next_id: u64,
}

impl NotificationArea {
    pub fn push(&mut self, text: &str, style: ToastStyle) -> &Toast {
        self.next_id += 1;
        let toast = Toast { id: ToastId(self.next_id), text: text.to_owned(), style, phase: ToastPhase::Visible };
        self.toasts.push(toast);
        &self.toasts[self.toasts.len() - 1]
    }

    /// Mark a toast as fading. Returns `false` if it is already gone.
    pub fn start_fade(&mut self, id: ToastId) -> bool {
        match self.toasts.iter_mut().find(|t| t.id == id) {
            Some(toast) => {
                toast.phase = ToastPhase::Fading;
                true
            }
            None => false,
        }
    }

    /// Remove a toast. Returns `false` if it is already gone.
    pub fn remove(&mut self, id: ToastId) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    #[must_use]
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }
}
