use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub content: String,
    pub message_type: MessageType,
    pub created_at: Instant,
    pub auto_clear_duration: Duration,
}

impl StatusMessage {
    pub fn new(content: String, message_type: MessageType, duration: Duration) -> Self {
        Self {
            content,
            message_type,
            created_at: Instant::now(),
            auto_clear_duration: duration,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= self.auto_clear_duration
    }
}

/// The transient message shown on the left of the status bar.
///
/// Expiry is a wall-clock comparison made when the bar is drawn.
#[derive(Debug, Clone)]
pub struct StatusManager {
    current_message: Option<StatusMessage>,
    timeout: Duration,
}

impl StatusManager {
    pub fn new(timeout: Duration) -> Self {
        Self {
            current_message: None,
            timeout,
        }
    }

    pub fn set_info(&mut self, message: impl Into<String>) {
        self.set(message.into(), MessageType::Info);
    }

    pub fn set_success(&mut self, message: impl Into<String>) {
        self.set(message.into(), MessageType::Success);
    }

    pub fn set_warning(&mut self, message: impl Into<String>) {
        self.set(message.into(), MessageType::Warning);
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.set(message.into(), MessageType::Error);
    }

    fn set(&mut self, content: String, message_type: MessageType) {
        log::debug!("Status ({:?}): {}", message_type, content);
        self.current_message = Some(StatusMessage::new(content, message_type, self.timeout));
    }

    pub fn clear(&mut self) {
        self.current_message = None;
    }

    /// Drop the message once it has expired.
    pub fn update(&mut self) {
        if self
            .current_message
            .as_ref()
            .is_some_and(StatusMessage::is_expired)
        {
            self.current_message = None;
        }
    }

    /// The message if it has not expired yet.
    pub fn current(&self) -> Option<&StatusMessage> {
        self.current_message.as_ref().filter(|m| !m.is_expired())
    }

    pub fn has_message(&self) -> bool {
        self.current().is_some()
    }
}

impl Default for StatusManager {
    fn default() -> Self {
        Self::new(Duration::from_secs(3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_status_manager_creation() {
        let manager = StatusManager::default();
        assert!(!manager.has_message());
        assert!(manager.current().is_none());
    }

    #[test]
    fn test_message_types() {
        let mut manager = StatusManager::default();

        manager.set_info("Info message");
        let message = manager.current().unwrap();
        assert_eq!(message.message_type, MessageType::Info);
        assert_eq!(message.content, "Info message");

        manager.set_success("Success message");
        assert_eq!(manager.current().unwrap().message_type, MessageType::Success);

        manager.set_warning("Warning message");
        assert_eq!(manager.current().unwrap().message_type, MessageType::Warning);

        manager.set_error("Error message".to_string());
        assert_eq!(manager.current().unwrap().message_type, MessageType::Error);
    }

    #[test]
    fn test_expiry_uses_configured_timeout() {
        let message = StatusMessage::new(
            "Saved".to_string(),
            MessageType::Info,
            Duration::from_secs(3),
        );
        let start = message.created_at;
        assert!(!message.is_expired_at(start + Duration::from_secs(2)));
        assert!(message.is_expired_at(start + Duration::from_secs(3)));
    }

    #[test]
    fn test_clear() {
        let mut manager = StatusManager::default();
        manager.set_info("Test message");
        assert!(manager.has_message());

        manager.clear();
        assert!(!manager.has_message());
    }

    #[test]
    fn test_update_expired_message() {
        let mut manager = StatusManager::new(Duration::from_millis(1));
        manager.set_info("Test");

        thread::sleep(Duration::from_millis(10));

        assert!(manager.current().is_none());
        manager.update();
        assert!(!manager.has_message());
    }
}
