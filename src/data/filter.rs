use std::fmt;

use super::model::Dataset;
use crate::labels::RowLabelStore;

// ---------------------------------------------------------------------------
// Filter predicate: which rows a labeling session visits
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FilterMode {
    #[default]
    All,
    WithLabels,
    WithoutLabels,
}

impl FilterMode {
    pub const ALL: [FilterMode; 3] = [
        FilterMode::All,
        FilterMode::WithLabels,
        FilterMode::WithoutLabels,
    ];

    /// Whether a row with `label_count` labels passes.
    pub fn accepts(self, label_count: usize) -> bool {
        match self {
            FilterMode::All => true,
            FilterMode::WithLabels => label_count > 0,
            FilterMode::WithoutLabels => label_count == 0,
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterMode::All => "All rows",
            FilterMode::WithLabels => "With labels",
            FilterMode::WithoutLabels => "Without labels",
        };
        f.write_str(name)
    }
}

/// Return indices of rows passing `mode`, in ascending row order.
///
/// This is a snapshot: callers recompute it when a session starts, not on
/// every label edit.
pub fn filtered_indices(dataset: &Dataset, store: &RowLabelStore, mode: FilterMode) -> Vec<usize> {
    (0..dataset.len())
        .filter(|&i| mode.accepts(store.get(i).map_or(0, |set| set.len())))
        .collect()
}

// ---------------------------------------------------------------------------
// Navigator – cursor over a filtered snapshot
// ---------------------------------------------------------------------------

/// Result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    /// The cursor moved to a valid filtered position.
    Moved,
    /// The walk went one past the last filtered row.
    Completed,
    /// Target out of range; nothing changed.
    Rejected,
}

/// Walks the filtered row indices one position at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    indices: Vec<usize>,
    cursor: usize,
    complete: bool,
}

impl Navigator {
    /// Start at position 0. An empty snapshot is complete from the outset.
    pub fn new(indices: Vec<usize>) -> Self {
        let complete = indices.is_empty();
        Self {
            indices,
            cursor: 0,
            complete,
        }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Position within the filtered sequence.
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Dataset row under the cursor; `None` once complete.
    pub fn current_row(&self) -> Option<usize> {
        if self.complete {
            return None;
        }
        self.indices.get(self.cursor).copied()
    }

    /// Jump to `target`. `target == len()` completes the walk.
    pub fn navigate(&mut self, target: usize) -> NavOutcome {
        if target < self.indices.len() {
            self.cursor = target;
            self.complete = false;
            NavOutcome::Moved
        } else if target == self.indices.len() {
            self.complete = true;
            NavOutcome::Completed
        } else {
            NavOutcome::Rejected
        }
    }

    pub fn next(&mut self) -> NavOutcome {
        if self.complete {
            return NavOutcome::Rejected;
        }
        self.navigate(self.cursor + 1)
    }

    /// Step back. From the completion view this returns to the last row.
    pub fn previous(&mut self) -> NavOutcome {
        if self.complete {
            return match self.indices.len() {
                0 => NavOutcome::Rejected,
                n => self.navigate(n - 1),
            };
        }
        match self.cursor.checked_sub(1) {
            Some(target) => self.navigate(target),
            None => NavOutcome::Rejected,
        }
    }

    pub fn has_previous(&self) -> bool {
        (self.complete && !self.indices.is_empty()) || self.cursor > 0
    }

    pub fn has_next(&self) -> bool {
        !self.complete
    }

    /// `(1-based position, total)` for a progress display.
    pub fn progress(&self) -> (usize, usize) {
        let total = self.indices.len();
        if self.complete {
            (total, total)
        } else {
            (self.cursor + 1, total)
        }
    }
}
