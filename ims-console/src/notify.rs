//! Transient notifications (toasts)
//!
//! Pages push toasts here; the renderer drains and displays them.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

const MAX_PENDING: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

/// Shared toast queue
#[derive(Debug, Clone, Default)]
pub struct Notifier {
    queue: Arc<Mutex<VecDeque<Toast>>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn queue(&self) -> MutexGuard<'_, VecDeque<Toast>> {
        self.queue.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn push(&self, level: ToastLevel, message: String) {
        let mut queue = self.queue();
        if queue.len() == MAX_PENDING {
            queue.pop_front();
        }
        queue.push_back(Toast { level, message });
    }

    pub fn success(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(toast = %message, "success");
        self.push(ToastLevel::Success, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(toast = %message, "error");
        self.push(ToastLevel::Error, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        let message = message.into();
        tracing::debug!(toast = %message, "info");
        self.push(ToastLevel::Info, message);
    }

    /// Take every pending toast, oldest first
    pub fn drain(&self) -> Vec<Toast> {
        self.queue().drain(..).collect()
    }

    pub fn last(&self) -> Option<Toast> {
        self.queue().back().cloned()
    }

    pub fn len(&self) -> usize {
        self.queue().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue().is_empty()
    }
}
