use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Warning,
    Success,
    Failure,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Warning => "warning",
            Self::Success => "success",
            Self::Failure => "failure",
        })
    }
}

/// A user-facing status message produced by one submit attempt.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NotificationEvent {
    Warning(String),
    Success(String),
    Failure(String),
}

impl NotificationEvent {
    pub fn kind(&self) -> NotificationKind {
        match self {
            Self::Warning(_) => NotificationKind::Warning,
            Self::Success(_) => NotificationKind::Success,
            Self::Failure(_) => NotificationKind::Failure,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Warning(text) | Self::Success(text) | Self::Failure(text) => text,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Self::Warning(text) | Self::Success(text) | Self::Failure(text) => text,
        }
    }
}

/// Screen corner or edge the notification stack is anchored to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationPosition {
    TopLeft,
    TopCenter,
    TopRight,
    BottomLeft,
    BottomCenter,
    #[default]
    BottomRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationOptions {
    pub position: NotificationPosition,
    /// Countdown that starts once the notification becomes visible.
    pub auto_close: Duration,
    /// Whether the user may close the notification before it expires.
    pub dismissible: bool,
    /// Whether hovering the notification suspends its countdown.
    pub pause_on_hover: bool,
}

/// How the contact form presents each notification kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotificationSettings {
    pub position: NotificationPosition,
    pub dismissible: bool,
    pub pause_on_hover: bool,
    pub warning_auto_close: Duration,
    pub success_auto_close: Duration,
    pub failure_auto_close: Duration,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            position: NotificationPosition::BottomRight,
            dismissible: true,
            pause_on_hover: true,
            warning_auto_close: Duration::from_secs(3),
            success_auto_close: Duration::from_secs(4),
            failure_auto_close: Duration::from_secs(6),
        }
    }
}

impl NotificationSettings {
    pub fn options_for(&self, kind: NotificationKind) -> NotificationOptions {
        let auto_close = match kind {
            NotificationKind::Warning => self.warning_auto_close,
            NotificationKind::Success => self.success_auto_close,
            NotificationKind::Failure => self.failure_auto_close,
        };

        NotificationOptions {
            position: self.position,
            auto_close,
            dismissible: self.dismissible,
            pause_on_hover: self.pause_on_hover,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NotificationId(pub u64);

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Render snapshot of a visible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveNotification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub text: String,
    pub position: NotificationPosition,
    pub auto_close: Duration,
    pub remaining: Duration,
    pub paused: bool,
}

impl ActiveNotification {
    /// Fraction of the countdown that is still left, between `0.0` and `1.0`.
    pub fn progress(&self) -> f64 {
        if self.auto_close.is_zero() {
            return 0.0;
        }
        (self.remaining.as_secs_f64() / self.auto_close.as_secs_f64()).clamp(0.0, 1.0)
    }
}
