use serde::Serialize;

use crate::error::StoreError;

// ---------------------------------------------------------------------------
// LabelSet – ordered, duplicate-free labels of one row
// ---------------------------------------------------------------------------

/// Labels assigned to one row, in the order they were selected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LabelSet(Vec<String>);

impl LabelSet {
    /// Build from a sequence, keeping the first occurrence of each label.
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = LabelSet::default();
        for label in labels {
            set.insert(label.into());
        }
        set
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|l| l == label)
    }

    /// Append `label` unless already present. Returns whether it was added.
    pub fn insert(&mut self, label: String) -> bool {
        if self.contains(&label) {
            return false;
        }
        self.0.push(label);
        true
    }

    /// Remove `label`, keeping the order of the others. Returns whether it was present.
    pub fn remove(&mut self, label: &str) -> bool {
        match self.0.iter().position(|l| l == label) {
            Some(idx) => {
                self.0.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Remove if present, append otherwise. Returns `true` when the label is now set.
    pub fn toggle(&mut self, label: &str) -> bool {
        if self.remove(label) {
            false
        } else {
            self.0.push(label.to_string());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// JSON array text, e.g. `["urgent","bug"]`.
    pub fn to_json(&self) -> String {
        // a list of strings always serializes
        serde_json::to_string(self).unwrap_or_default()
    }
}

impl<'a> IntoIterator for &'a LabelSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// ---------------------------------------------------------------------------
// RowLabelStore – one LabelSet per dataset row
// ---------------------------------------------------------------------------

/// Owns the label sets of every row, keyed by row index.
#[derive(Debug, Clone, Default)]
pub struct RowLabelStore {
    rows: Vec<LabelSet>,
}

impl RowLabelStore {
    /// A store with `row_count` empty label sets.
    pub fn new(row_count: usize) -> Self {
        let mut store = Self::default();
        store.initialize(row_count);
        store
    }

    /// Discard everything and allocate `row_count` empty label sets.
    pub fn initialize(&mut self, row_count: usize) {
        self.rows = vec![LabelSet::default(); row_count];
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&LabelSet> {
        self.rows.get(row)
    }

    fn get_mut(&mut self, row: usize) -> Result<&mut LabelSet, StoreError> {
        let len = self.rows.len();
        self.rows
            .get_mut(row)
            .ok_or(StoreError::IndexOutOfRange { index: row, len })
    }

    /// Replace a row's labels wholesale; duplicates keep their first position.
    pub fn set_labels<I, S>(&mut self, row: usize, labels: I) -> Result<(), StoreError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.get_mut(row)? = LabelSet::from_labels(labels);
        Ok(())
    }

    /// Toggle one label on one row. Returns `true` when the label is now set.
    pub fn toggle(&mut self, row: usize, label: &str) -> Result<bool, StoreError> {
        let now_set = self.get_mut(row)?.toggle(label);
        log::debug!("row {row}: {} '{label}'", if now_set { "added" } else { "removed" });
        Ok(now_set)
    }

    /// Add one label to one row if missing. Returns whether it was added.
    pub fn add(&mut self, row: usize, label: &str) -> Result<bool, StoreError> {
        Ok(self.get_mut(row)?.insert(label.to_string()))
    }

    /// Remove one label from one row if present. Returns whether it was removed.
    pub fn remove(&mut self, row: usize, label: &str) -> Result<bool, StoreError> {
        Ok(self.get_mut(row)?.remove(label))
    }

    /// Strip `label` from every row. Returns how many rows changed.
    pub fn remove_label_everywhere(&mut self, label: &str) -> usize {
        self.rows
            .iter_mut()
            .map(|set| set.remove(label))
            .filter(|&removed| removed)
            .count()
    }

    /// Rows carrying at least one label.
    pub fn labeled_count(&self) -> usize {
        self.rows.iter().filter(|set| !set.is_empty()).count()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LabelSet> {
        self.rows.iter()
    }
}
