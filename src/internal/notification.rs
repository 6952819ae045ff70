use std::time::{Duration, Instant};

/// Type of notification to display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationType {
    Info,
    Success,
    Error,
}

impl NotificationType {
    fn timeout(&self) -> Duration {
        match self {
            NotificationType::Info => Duration::from_secs(3),
            NotificationType::Success => Duration::from_secs(4),
            NotificationType::Error => Duration::from_secs(8),
        }
    }
}

/// A status-bar message that dismisses itself after a while.
#[derive(Debug, Clone)]
pub struct Notification {
    pub message: String,
    pub notification_type: NotificationType,
    pub timestamp: Instant,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Info)
    }

    /// Used for the comment confirmation.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, NotificationType::Error)
    }

    fn new(message: impl Into<String>, notification_type: NotificationType) -> Self {
        Self {
            message: message.into(),
            notification_type,
            timestamp: Instant::now(),
        }
    }

    pub fn should_dismiss(&self) -> bool {
        self.timestamp.elapsed() > self.notification_type.timeout()
    }

    pub fn remaining_time(&self) -> Duration {
        self.notification_type
            .timeout()
            .saturating_sub(self.timestamp.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_notification_is_visible() {
        let n = Notification::success("Komentar Anda berhasil dikirim!");
        assert!(!n.should_dismiss());
        assert!(n.remaining_time() <= Duration::from_secs(4));
    }

    #[test]
    fn test_old_notification_dismisses() {
        let mut n = Notification::info("x");
        n.timestamp = Instant::now() - Duration::from_secs(5);
        assert!(n.should_dismiss());
        assert_eq!(n.remaining_time(), Duration::ZERO);
    }
}
