use std::collections::VecDeque;

/// Visual weight of a notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeTone {
    Success,
    Error,
}

/// A modal message the user has to acknowledge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub tone: NoticeTone,
    pub title: String,
    pub text: String,
}

impl Notification {
    fn new(tone: NoticeTone, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            tone,
            title: title.into(),
            text: text.into(),
        }
    }

    pub fn success(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(NoticeTone::Success, title, text)
    }

    pub fn error(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(NoticeTone::Error, title, text)
    }
}

/// Queue of notifications; only the front one is shown.
#[derive(Clone, Debug, Default)]
pub struct NotificationState {
    queue: VecDeque<Notification>,
}

impl NotificationState {
    pub fn push(&mut self, notification: Notification) {
        self.queue.push_back(notification);
    }

    pub fn front(&self) -> Option<&Notification> {
        self.queue.front()
    }

    pub fn dismiss(&mut self) -> Option<Notification> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
