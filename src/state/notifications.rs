//! Toast notifications shown on top of either page.

use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A message a state transition wants the user to see.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    pub level: NoticeLevel,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NoticeLevel::Info,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NoticeLevel::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            level: NoticeLevel::Error,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: Uuid,
    pub notice: Notice,
    pub created_at: DateTime<Utc>,
}

/// Visible toasts, oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotificationQueue {
    items: Vec<Notification>,
}

impl NotificationQueue {
    pub fn push(&mut self, notice: Notice) -> Uuid {
        let id = Uuid::new_v4();
        self.items.push(Notification {
            id,
            notice,
            created_at: Utc::now(),
        });
        id
    }

    pub fn dismiss(&mut self, id: Uuid) {
        self.items.retain(|item| item.id != id);
    }

    pub fn items(&self) -> &[Notification] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_dismiss() {
        let mut queue = NotificationQueue::default();
        let first = queue.push(Notice::info("Frame 1 selected"));
        let second = queue.push(Notice::error("Please select a valid video file"));
        assert_eq!(queue.items().len(), 2);

        queue.dismiss(first);
        assert_eq!(queue.items().len(), 1);
        assert_eq!(queue.items()[0].id, second);
        assert_eq!(queue.items()[0].notice.level, NoticeLevel::Error);

        // Dismissing twice is harmless.
        queue.dismiss(first);
        assert_eq!(queue.items().len(), 1);
    }
}
