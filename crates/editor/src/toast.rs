//! Transient notifications.

use serde::Serialize;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

/// Visible toasts, oldest first.
#[derive(Debug, Default)]
pub struct ToastQueue {
    next_id: u64,
    visible: Vec<Toast>,
}

impl ToastQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> Toast {
        self.next_id += 1;
        let toast = Toast {
            id: self.next_id,
            kind,
            message: message.into(),
        };
        self.visible.push(toast.clone());
        toast
    }

    /// Returns `false` if the toast was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.visible.len();
        self.visible.retain(|t| t.id != id);
        self.visible.len() != before
    }

    pub fn visible(&self) -> &[Toast] {
        &self.visible
    }

    pub fn clear(&mut self) {
        self.visible.clear();
    }
}
