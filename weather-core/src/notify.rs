//! Transient, auto-dismissing user notifications ("toasts").

use std::time::Duration;
use tokio::time::Instant;

/// How long a toast stays visible.
pub const TOAST_DURATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastPosition {
    TopCenter,
}

/// The only user-visible error channel of the widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToastKind {
    CityNotFound,
    FetchFailed,
    EmptyInput,
}

impl ToastKind {
    pub fn message(&self) -> &'static str {
        match self {
            ToastKind::CityNotFound => "City not found",
            ToastKind::FetchFailed => "Failed to fetch weather data",
            ToastKind::EmptyInput => "Please enter a city name",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub position: ToastPosition,
    pub expires_at: Instant,
}

impl Toast {
    pub fn message(&self) -> &'static str {
        self.kind.message()
    }
}

/// Queue of visible toasts, oldest first.
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    toasts: Vec<Toast>,
}

impl Notifications {
    pub fn push(&mut self, kind: ToastKind, now: Instant) {
        self.toasts.push(Toast {
            kind,
            position: ToastPosition::TopCenter,
            expires_at: now + TOAST_DURATION,
        });
    }

    /// Drop toasts whose display time has elapsed. Returns true if any were removed.
    pub fn dismiss_expired(&mut self, now: Instant) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.expires_at > now);
        self.toasts.len() != before
    }

    pub fn visible(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.last()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}
