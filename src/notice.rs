use std::time::{Duration, Instant};

/// How long the "no match type selected" popup stays up.
pub const POPUP_TTL: Duration = Duration::from_secs(3);
/// How long the "Copied!" message stays up.
pub const COPIED_TTL: Duration = Duration::from_secs(2);

/// A transient message with a single pending auto-dismiss deadline.
/// Showing it again replaces the deadline, so there is never more than one
/// pending dismissal.
#[derive(Debug, Clone, Default)]
pub struct Notice {
    text: String,
    deadline: Option<Instant>,
}

impl Notice {
    pub fn show(&mut self, text: &str, now: Instant, ttl: Duration) {
        text.clone_into(&mut self.text);
        self.deadline = Some(now + ttl);
    }

    #[must_use]
    pub fn is_visible(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|d| now < d)
    }

    /// Text while visible.
    #[must_use]
    pub fn text(&self, now: Instant) -> Option<&str> {
        self.is_visible(now).then_some(self.text.as_str())
    }

    pub fn dismiss(&mut self) {
        self.text.clear();
        self.deadline = None;
    }
}
