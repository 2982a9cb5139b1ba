//! Transient user notices
//!
//! Everything the list screens report to the admin (load failures, blocked
//! reorders, successful edits) lands here as a dismissible notice that
//! expires on its own.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
    pub created_at: Instant,
}

/// Ordered set of live notices
#[derive(Debug)]
pub struct NoticeBoard {
    ttl: Duration,
    next_id: u64,
    notices: Vec<Notice>,
}

impl NoticeBoard {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            next_id: 1,
            notices: Vec::new(),
        }
    }

    /// Raise a notice now; returns its id
    pub fn push(&mut self, kind: NoticeKind, message: impl Into<String>) -> u64 {
        self.push_at(kind, message, Instant::now())
    }

    pub fn push_at(&mut self, kind: NoticeKind, message: impl Into<String>, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.notices.push(Notice {
            id,
            kind,
            message: message.into(),
            created_at: now,
        });
        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(NoticeKind::Success, message)
    }

    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(NoticeKind::Error, message)
    }

    pub fn info(&mut self, message: impl Into<String>) -> u64 {
        self.push(NoticeKind::Info, message)
    }

    /// Drop expired notices and return the rest, oldest first
    pub fn active_at(&mut self, now: Instant) -> Vec<Notice> {
        let ttl = self.ttl;
        self.notices
            .retain(|n| now.saturating_duration_since(n.created_at) < ttl);
        self.notices.clone()
    }

    pub fn active(&mut self) -> Vec<Notice> {
        self.active_at(Instant::now())
    }

    /// Remove a notice before it expires. Returns false if it was already gone.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.notices.len();
        self.notices.retain(|n| n.id != id);
        self.notices.len() != before
    }

    pub fn clear(&mut self) {
        self.notices.clear();
    }
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new(Duration::from_secs(3))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notices_expire_after_ttl() {
        let mut board = NoticeBoard::new(Duration::from_secs(3));
        let t0 = Instant::now();

        board.push_at(NoticeKind::Error, "Failed to load cars", t0);
        board.push_at(NoticeKind::Info, "later", t0 + Duration::from_secs(2));

        assert_eq!(board.active_at(t0 + Duration::from_secs(1)).len(), 2);

        let live = board.active_at(t0 + Duration::from_secs(3));
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].message, "later");

        assert!(board.active_at(t0 + Duration::from_secs(10)).is_empty());
    }

    #[test]
    fn test_dismiss() {
        let mut board = NoticeBoard::default();
        let first = board.success("Car updated");
        let second = board.error("Failed to delete car");

        assert!(board.dismiss(first));
        assert!(!board.dismiss(first));

        let live = board.active();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].id, second);
        assert_eq!(live[0].kind, NoticeKind::Error);
    }

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let mut board = NoticeBoard::default();
        let ids: Vec<u64> = (0..3).map(|i| board.info(format!("n{i}"))).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        board.clear();
        assert_eq!(board.info("again"), 4);
    }
}
