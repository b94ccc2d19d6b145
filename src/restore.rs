use crate::snapshot::SnapshotRef;

/// Single-slot repaint scheduler for undo/redo.
///
/// Holds at most one pending snapshot; a newer request supersedes the
/// pending one, so only the most recently requested snapshot is ever
/// decoded and rendered. The cursor and the rendered surface therefore
/// always converge on the same target, however quickly undo/redo are
/// triggered.
pub struct RestoreQueue {
    pending: Option<SnapshotRef>,
    superseded: u64,
}

impl RestoreQueue {
    pub fn new() -> Self {
        Self {
            pending: None,
            superseded: 0,
        }
    }

    /// Schedules a repaint from `snapshot`, replacing any pending request.
    pub fn request(&mut self, snapshot: SnapshotRef) {
        if let Some(old) = self.pending.replace(snapshot) {
            self.superseded += 1;
            log::debug!("superseded pending repaint of snapshot {}", old.id());
        }
    }

    /// Hands out the latest request; the caller decodes and applies it.
    pub fn take(&mut self) -> Option<SnapshotRef> {
        self.pending.take()
    }

    /// Drops any pending request, e.g. when the surface is reset.
    pub fn clear(&mut self) {
        self.pending = None;
    }

    pub fn is_idle(&self) -> bool {
        self.pending.is_none()
    }

    /// Number of requests that were replaced before being rendered.
    pub fn superseded(&self) -> u64 {
        self.superseded
    }
}

impl Default for RestoreQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Snapshot;
    use egui::Color32;
    use std::sync::Arc;

    fn snapshot(color: Color32) -> SnapshotRef {
        Arc::new(Snapshot::encode([2, 2], &vec![color; 4]).unwrap())
    }

    #[test]
    fn latest_request_wins() {
        let mut queue = RestoreQueue::new();
        let first = snapshot(Color32::RED);
        let second = snapshot(Color32::BLUE);

        queue.request(first);
        queue.request(second.clone());

        let taken = queue.take().expect("a request is pending");
        assert_eq!(taken.id(), second.id());
        assert_eq!(queue.superseded(), 1);
        assert!(queue.is_idle());
    }

    #[test]
    fn take_empties_the_slot() {
        let mut queue = RestoreQueue::new();
        queue.request(snapshot(Color32::RED));
        assert!(queue.take().is_some());
        assert!(queue.take().is_none());
    }

    #[test]
    fn clear_discards_the_pending_request() {
        let mut queue = RestoreQueue::new();
        queue.request(snapshot(Color32::RED));
        queue.clear();
        assert!(queue.is_idle());
        assert_eq!(queue.superseded(), 0);
    }
}
