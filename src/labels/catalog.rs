// ---------------------------------------------------------------------------
// CustomLabelCatalog – labels the user defined by hand
// ---------------------------------------------------------------------------

/// User-defined labels, deduplicated and kept in insertion order.
///
/// Removing a label here does not touch any row; callers pair it with
/// [`super::RowLabelStore::remove_label_everywhere`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomLabelCatalog {
    labels: Vec<String>,
}

impl CustomLabelCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a label after trimming it. Returns the stored label when it is new,
    /// `None` when blank or already present.
    pub fn add(&mut self, label: &str) -> Option<&str> {
        let label = label.trim();
        if label.is_empty() || self.contains(label) {
            return None;
        }
        self.labels.push(label.to_string());
        self.labels.last().map(String::as_str)
    }

    /// Returns whether the label was present.
    pub fn remove(&mut self, label: &str) -> bool {
        let before = self.labels.len();
        self.labels.retain(|l| l != label);
        self.labels.len() != before
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.labels.iter()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_trims_and_dedups() {
        let mut catalog = CustomLabelCatalog::new();
        assert_eq!(catalog.add("  spam "), Some("spam"));
        assert_eq!(catalog.add("spam"), None);
        assert_eq!(catalog.add("   "), None);
        assert_eq!(catalog.add("ham"), Some("ham"));
        let labels: Vec<&String> = catalog.iter().collect();
        assert_eq!(labels, vec!["spam", "ham"]);
    }

    #[test]
    fn test_remove() {
        let mut catalog = CustomLabelCatalog::new();
        catalog.add("a");
        catalog.add("b");
        assert!(catalog.remove("a"));
        assert!(!catalog.remove("a"));
        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains("b"));
    }
}
