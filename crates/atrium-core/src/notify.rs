//! User-facing notification seam.
//!
//! Sync failures and authorization-denial warnings surface to the user
//! through a toast-style notification collaborator. Delivery is
//! fire-and-forget; no return value is consumed.

use std::sync::Mutex;
use std::time::Duration;

/// Severity of a notification, mirrored onto the toast styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational message.
    Info,
    /// Non-fatal problem the user should know about.
    Warn,
    /// Failure of a user-initiated action.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warn => write!(f, "warn"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Visual severity.
    pub severity: Severity,
    /// Short headline.
    pub summary: String,
    /// Longer explanation shown under the headline.
    pub detail: String,
    /// How long the toast stays on screen.
    pub lifetime: Duration,
}

impl Notification {
    /// Default on-screen lifetime for warnings raised by this subsystem.
    pub const DEFAULT_LIFETIME: Duration = Duration::from_millis(6000);

    /// Build a warning with the default lifetime.
    pub fn warning(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warn,
            summary: summary.into(),
            detail: detail.into(),
            lifetime: Self::DEFAULT_LIFETIME,
        }
    }

    /// Build an error with the default lifetime.
    pub fn error(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            summary: summary.into(),
            detail: detail.into(),
            lifetime: Self::DEFAULT_LIFETIME,
        }
    }
}

/// Notification collaborator.
///
/// Implementations must not block the caller; the authorization subsystem
/// never awaits or inspects delivery.
pub trait Notifier: Send + Sync {
    /// Surface a notification to the user.
    fn notify(&self, notification: Notification);
}

// ============================================================================
// LogNotifier
// ============================================================================

/// Notifier that routes messages onto the `log` facade.
///
/// Used in headless contexts and as the default when the host portal has
/// not wired a toast service yet.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Info => {
                log::info!("{}: {}", notification.summary, notification.detail)
            }
            Severity::Warn => {
                log::warn!("{}: {}", notification.summary, notification.detail)
            }
            Severity::Error => {
                log::error!("{}: {}", notification.summary, notification.detail)
            }
        }
    }
}

// ============================================================================
// RecordingNotifier
// ============================================================================

/// Notifier that records every message for later inspection.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    recorded: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications received so far, in publish order.
    pub fn recorded(&self) -> Vec<Notification> {
        self.recorded.lock().expect("recorder lock poisoned").clone()
    }

    /// Number of notifications received so far.
    pub fn len(&self) -> usize {
        self.recorded.lock().expect("recorder lock poisoned").len()
    }

    /// `true` if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.recorded
            .lock()
            .expect("recorder lock poisoned")
            .push(notification);
    }
}

// ============================================================================
// Tests
// ============================================================================
