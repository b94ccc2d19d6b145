use crate::snapshot::SnapshotRef;

/// Ordered sequence of surface snapshots with a cursor marking the one
/// currently on screen.
///
/// Invariant: `cursor` is within `[-1, len - 1]` and is `-1` exactly when
/// the sequence is empty.
pub struct History {
    snapshots: Vec<SnapshotRef>,
    cursor: isize,
}

impl History {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self {
            snapshots: Vec::new(),
            cursor: -1,
        }
    }

    /// Appends a snapshot, discarding any redo branch past the cursor.
    pub fn push(&mut self, snapshot: SnapshotRef) {
        let keep = (self.cursor + 1) as usize;
        if keep < self.snapshots.len() {
            let discarded = self.snapshots.len() - keep;
            self.snapshots.truncate(keep);
            log::debug!("discarded {discarded} redo snapshot(s)");
        }
        self.snapshots.push(snapshot);
        self.cursor = self.snapshots.len() as isize - 1;
    }

    /// Moves the cursor one step back and returns the snapshot to display.
    /// No-op at the first entry or on an empty history.
    pub fn undo(&mut self) -> Option<&SnapshotRef> {
        if self.cursor <= 0 {
            return None;
        }
        self.cursor -= 1;
        self.snapshots.get(self.cursor as usize)
    }

    /// Moves the cursor one step forward and returns the snapshot to display.
    /// No-op at the last entry.
    pub fn redo(&mut self) -> Option<&SnapshotRef> {
        if self.cursor >= self.snapshots.len() as isize - 1 {
            return None;
        }
        self.cursor += 1;
        self.snapshots.get(self.cursor as usize)
    }

    /// Empties the sequence. The caller is responsible for blanking the surface.
    pub fn reset(&mut self) {
        self.snapshots.clear();
        self.cursor = -1;
    }

    /// Returns true if there is an earlier snapshot to go back to
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Returns true if there is a later snapshot to go forward to
    pub fn can_redo(&self) -> bool {
        self.cursor < self.snapshots.len() as isize - 1
    }

    /// The snapshot the cursor points at, if any.
    pub fn current(&self) -> Option<&SnapshotRef> {
        if self.cursor < 0 {
            return None;
        }
        self.snapshots.get(self.cursor as usize)
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn cursor(&self) -> isize {
        self.cursor
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
