//! Snapshot history for undo/redo.

use crate::color::HexColor;
use crate::stroke::{Dot, StrokeStore};
use serde::{Deserialize, Serialize};

/// Maximum number of snapshots kept in the undo history.
pub const MAX_UNDO_HISTORY: usize = 30;

/// Immutable capture of the drawing: all dots plus the background color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub strokes: Vec<Dot>,
    pub background_color: HexColor,
}

impl Snapshot {
    /// An empty canvas with the given background.
    pub fn blank(background_color: HexColor) -> Self {
        Self {
            strokes: Vec::new(),
            background_color,
        }
    }

    /// Copy the current store contents into a new snapshot.
    pub fn capture(strokes: &StrokeStore, background_color: HexColor) -> Self {
        Self {
            strokes: strokes.iter().copied().collect(),
            background_color,
        }
    }

    /// Replace the store contents with this snapshot's dots.
    pub fn restore_into(&self, store: &mut StrokeStore) {
        store.replace_with(self.strokes.iter().copied());
    }

    /// Serialize the snapshot to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserialize a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Linear undo/redo history.
///
/// The history is never empty: `current` always mirrors the live canvas and
/// `past` holds older snapshots, oldest first. Together they never exceed
/// `capacity` entries.
#[derive(Debug, Clone)]
pub struct HistoryManager {
    past: Vec<Snapshot>,
    current: Snapshot,
    redo_stack: Vec<Snapshot>,
    capacity: usize,
}

impl HistoryManager {
    /// Start a history whose floor entry is `initial`.
    pub fn new(initial: Snapshot) -> Self {
        Self::with_capacity(initial, MAX_UNDO_HISTORY)
    }

    /// Start a history with a custom capacity (at least one entry).
    pub fn with_capacity(initial: Snapshot, capacity: usize) -> Self {
        Self {
            past: Vec::new(),
            current: initial,
            redo_stack: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Record the live canvas as a new undo unit. Clears the redo stack.
    pub fn snapshot(&mut self, strokes: &StrokeStore, background_color: HexColor) {
        self.push(Snapshot::capture(strokes, background_color));
        self.redo_stack.clear();
    }

    /// Step back one snapshot.
    ///
    /// Returns the snapshot that is now current, or `None` if only the floor
    /// entry is left.
    pub fn undo(&mut self) -> Option<&Snapshot> {
        let previous = self.past.pop()?;
        let undone = std::mem::replace(&mut self.current, previous);
        self.redo_stack.push(undone);
        Some(&self.current)
    }

    /// Re-apply the most recently undone snapshot.
    ///
    /// Returns the snapshot that is now current, or `None` if there is
    /// nothing to redo.
    pub fn redo(&mut self) -> Option<&Snapshot> {
        let next = self.redo_stack.pop()?;
        self.push(next);
        Some(&self.current)
    }

    fn push(&mut self, snapshot: Snapshot) {
        let previous = std::mem::replace(&mut self.current, snapshot);
        self.past.push(previous);

        // Oldest entries go first
        let overflow = (self.past.len() + 1).saturating_sub(self.capacity);
        if overflow > 0 {
            self.past.drain(..overflow);
        }
    }

    /// The snapshot mirrored by the live canvas.
    pub fn current(&self) -> &Snapshot {
        &self.current
    }

    /// All history entries, oldest first, ending with the current one.
    pub fn snapshots(&self) -> impl Iterator<Item = &Snapshot> {
        self.past.iter().chain(std::iter::once(&self.current))
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of history entries, including the current one.
    pub fn len(&self) -> usize {
        self.past.len() + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
