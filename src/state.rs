use std::path::{Path, PathBuf};

use crate::config::TaggerConfig;
use crate::data::export::{build_export_rows, export_to_path, ExportTable};
use crate::data::filter::{filtered_indices, FilterMode, NavOutcome, Navigator};
use crate::data::loader;
use crate::data::model::Dataset;
use crate::error::SessionError;
use crate::labels::{normalize_cell, CustomLabelCatalog, LabelDiscovery, LabelSet, RowLabelStore};

// ---------------------------------------------------------------------------
// Intents – everything the presentation layer can ask for
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SelectTextColumn(String),
    /// `None` clears the label column.
    SelectLabelColumn(Option<String>),
    /// Seed row labels from the label column and collect the distinct labels.
    AnalyzeLabels,
    AddCatalogLabel(String),
    /// Removes the label from the catalog and from every row.
    RemoveCatalogLabel(String),
    /// Takes effect at the next `StartClassification`.
    SetFilterMode(FilterMode),
    StartClassification,
    /// Toggle a label on the current row.
    ToggleLabel(String),
    /// In-session label entry; the label joins the catalog.
    AddSessionLabel(String),
    Navigate(usize),
    Next,
    Previous,
}

/// Coarse session phase for the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No dataset loaded.
    Empty,
    /// Dataset loaded, choosing columns and labels.
    Loaded,
    /// Walking rows; includes the completion view.
    Classifying,
}

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// The full labeling state, independent of rendering.
#[derive(Debug, Default)]
pub struct Session {
    config: TaggerConfig,

    /// File the dataset came from, if it came from disk.
    source: Option<PathBuf>,

    /// Loaded dataset (None until the user loads a file).
    dataset: Option<Dataset>,

    text_column: Option<String>,
    label_column: Option<String>,

    /// One label set per dataset row.
    store: RowLabelStore,

    catalog: CustomLabelCatalog,

    /// Distinct labels found in the label column, first-seen order.
    discovered: Vec<String>,

    filter_mode: FilterMode,

    /// Present while classifying.
    navigator: Option<Navigator>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TaggerConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    // -- ingestion / export -------------------------------------------------

    /// Load a file and start over with it. On failure nothing changes.
    pub fn open(&mut self, path: &Path) -> Result<(), SessionError> {
        let dataset = loader::load_file(path).map_err(|cause| SessionError::Input {
            path: path.to_path_buf(),
            cause,
        })?;
        log::info!(
            "Loaded {} rows with columns {:?} from {}",
            dataset.len(),
            dataset.headers,
            path.display()
        );
        self.replace_dataset(dataset);
        self.source = Some(path.to_path_buf());
        Ok(())
    }

    /// Install a freshly parsed dataset. Row labels, column choices and the
    /// active walk are reset; the custom label catalog is kept.
    pub fn replace_dataset(&mut self, dataset: Dataset) {
        self.store.initialize(dataset.len());
        self.dataset = Some(dataset);
        self.source = None;
        self.text_column = None;
        self.label_column = None;
        self.discovered.clear();
        self.navigator = None;
    }

    /// Full export table, covering every row.
    pub fn export_table(&self) -> Option<ExportTable> {
        let dataset = self.dataset.as_ref()?;
        Some(build_export_rows(dataset, &self.store, &self.config.export_column))
    }

    /// Write the labeled dataset to `path`. Returns the number of records.
    pub fn export(&self, path: &Path) -> Result<usize, SessionError> {
        let table = self
            .export_table()
            .ok_or_else(|| SessionError::precondition("Load a dataset before exporting"))?;
        export_to_path(&table, path).map_err(|cause| SessionError::Export {
            path: path.to_path_buf(),
            cause,
        })?;
        log::info!("Exported {} records to {}", table.records.len(), path.display());
        Ok(table.records.len())
    }

    // -- intents ------------------------------------------------------------

    /// Apply one user intent. A failing intent leaves the session unchanged.
    pub fn apply(&mut self, intent: Intent) -> Result<(), SessionError> {
        log::debug!("intent: {intent:?}");
        match intent {
            Intent::SelectTextColumn(column) => {
                self.require_column(&column)?;
                self.text_column = Some(column);
            }
            Intent::SelectLabelColumn(column) => {
                if let Some(col) = &column {
                    self.require_column(col)?;
                }
                self.label_column = column;
            }
            Intent::AnalyzeLabels => self.analyze_labels()?,
            Intent::AddCatalogLabel(label) | Intent::AddSessionLabel(label) => {
                if let Some(added) = self.catalog.add(&label) {
                    log::debug!("catalog: added '{added}'");
                }
            }
            Intent::RemoveCatalogLabel(label) => {
                if self.catalog.remove(&label) {
                    let rows = self.store.remove_label_everywhere(&label);
                    log::info!("Removed label '{label}' from the catalog and {rows} rows");
                }
            }
            Intent::SetFilterMode(mode) => self.filter_mode = mode,
            Intent::StartClassification => self.start_classification()?,
            Intent::ToggleLabel(label) => {
                let row = self
                    .current_row()
                    .ok_or_else(|| SessionError::precondition("No row is being labeled"))?;
                let label = label.trim();
                if label.is_empty() {
                    return Err(SessionError::precondition("Label must not be blank"));
                }
                self.store.toggle(row, label)?;
            }
            Intent::Navigate(target) => self.navigate_with(|nav| nav.navigate(target)),
            Intent::Next => self.navigate_with(Navigator::next),
            Intent::Previous => self.navigate_with(Navigator::previous),
        }
        Ok(())
    }

    fn require_dataset(&self) -> Result<&Dataset, SessionError> {
        self.dataset
            .as_ref()
            .ok_or_else(|| SessionError::precondition("Load a dataset first"))
    }

    fn require_column(&self, column: &str) -> Result<(), SessionError> {
        let dataset = self.require_dataset()?;
        if dataset.column_index(column).is_none() {
            return Err(SessionError::precondition(format!(
                "Unknown column '{column}'"
            )));
        }
        Ok(())
    }

    fn require_text_column(&self) -> Result<(), SessionError> {
        self.require_dataset()?;
        if self.text_column.is_none() {
            return Err(SessionError::precondition("Please select a text column"));
        }
        Ok(())
    }

    /// Re-seed every row from the label column (or clear them when no label
    /// column is chosen) and rebuild the discovered label list.
    fn analyze_labels(&mut self) -> Result<(), SessionError> {
        self.require_text_column()?;
        let Some(dataset) = self.dataset.as_ref() else {
            return Ok(());
        };

        let mut store = RowLabelStore::new(dataset.len());
        let mut discovery = LabelDiscovery::new();
        if let Some(column) = &self.label_column {
            for (row, cell) in dataset.column_values(column).enumerate() {
                let labels = normalize_cell(cell);
                discovery.observe(&labels);
                store.set_labels(row, labels)?;
            }
        }

        log::info!(
            "Analyzed label column {:?}: {} distinct labels on {} of {} rows",
            self.label_column,
            discovery.len(),
            store.labeled_count(),
            store.len()
        );
        self.store = store;
        self.discovered = discovery.into_labels();
        self.navigator = None;
        Ok(())
    }

    fn start_classification(&mut self) -> Result<(), SessionError> {
        self.require_text_column()?;
        let dataset = self.require_dataset()?;
        let indices = filtered_indices(dataset, &self.store, self.filter_mode);
        log::info!(
            "Starting classification: {} of {} rows ({})",
            indices.len(),
            dataset.len(),
            self.filter_mode
        );
        self.navigator = Some(Navigator::new(indices));
        Ok(())
    }

    fn navigate_with(&mut self, step: impl FnOnce(&mut Navigator) -> NavOutcome) {
        let Some(nav) = self.navigator.as_mut() else {
            return;
        };
        match step(nav) {
            NavOutcome::Moved => {}
            NavOutcome::Completed => log::info!("Classification complete"),
            NavOutcome::Rejected => log::debug!("navigation rejected at position {}", nav.position()),
        }
    }

    // -- queries ------------------------------------------------------------

    pub fn config(&self) -> &TaggerConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        match (&self.dataset, &self.navigator) {
            (None, _) => Phase::Empty,
            (Some(_), None) => Phase::Loaded,
            (Some(_), Some(_)) => Phase::Classifying,
        }
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn text_column(&self) -> Option<&str> {
        self.text_column.as_deref()
    }

    pub fn label_column(&self) -> Option<&str> {
        self.label_column.as_deref()
    }

    pub fn store(&self) -> &RowLabelStore {
        &self.store
    }

    pub fn catalog(&self) -> &CustomLabelCatalog {
        &self.catalog
    }

    pub fn discovered_labels(&self) -> &[String] {
        &self.discovered
    }

    /// Labels offered for toggling: discovered ones, then catalog-only ones.
    pub fn available_labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.discovered.iter().map(String::as_str).collect();
        for label in self.catalog.iter() {
            if !labels.contains(&label.as_str()) {
                labels.push(label);
            }
        }
        labels
    }

    pub fn filter_mode(&self) -> FilterMode {
        self.filter_mode
    }

    pub fn navigator(&self) -> Option<&Navigator> {
        self.navigator.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.navigator.as_ref().is_some_and(Navigator::is_complete)
    }

    /// Dataset row under the cursor.
    pub fn current_row(&self) -> Option<usize> {
        self.navigator.as_ref()?.current_row()
    }

    pub fn current_text(&self) -> Option<&str> {
        let dataset = self.dataset.as_ref()?;
        dataset.cell(self.current_row()?, self.text_column.as_deref()?)
    }

    pub fn current_labels(&self) -> Option<&LabelSet> {
        self.store.get(self.current_row()?)
    }

    /// How many rows carry each label: available labels first, then any
    /// other label still present on some row.
    pub fn label_summary(&self) -> Vec<(String, usize)> {
        let mut summary: Vec<(String, usize)> = self
            .available_labels()
            .into_iter()
            .map(|l| (l.to_string(), 0))
            .collect();
        for set in self.store.iter() {
            for label in set {
                match summary.iter_mut().find(|(l, _)| l == label) {
                    Some((_, count)) => *count += 1,
                    None => summary.push((label.clone(), 1)),
                }
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_with(rows: &[(&str, &str)]) -> Session {
        let dataset = Dataset::from_records(
            vec!["text".to_string(), "labels".to_string()],
            rows.iter()
                .map(|(t, l)| vec![t.to_string(), l.to_string()]),
        );
        let mut session = Session::new();
        session.replace_dataset(dataset);
        session
    }

    fn current(session: &Session) -> Vec<&str> {
        session
            .current_labels()
            .map(|set| set.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_phases() {
        let mut session = Session::new();
        assert_eq!(session.phase(), Phase::Empty);
        session.replace_dataset(Dataset::from_records(vec!["text".into()], vec![vec!["a".into()]]));
        assert_eq!(session.phase(), Phase::Loaded);
        session.apply(Intent::SelectTextColumn("text".into())).unwrap();
        session.apply(Intent::StartClassification).unwrap();
        assert_eq!(session.phase(), Phase::Classifying);
    }

    #[test]
    fn test_analyze_requires_text_column() {
        let mut session = session_with(&[("hello", "a")]);
        session.apply(Intent::SelectLabelColumn(Some("labels".into()))).unwrap();
        let err = session.apply(Intent::AnalyzeLabels).unwrap_err();
        assert!(matches!(err, SessionError::Precondition(_)));
        assert!(session.discovered_labels().is_empty());
        assert!(session.store().get(0).unwrap().is_empty());
    }

    #[test]
    fn test_start_requires_text_column() {
        let mut session = session_with(&[("hello", "")]);
        let err = session.apply(Intent::StartClassification).unwrap_err();
        assert!(matches!(err, SessionError::Precondition(_)));
        assert_eq!(session.phase(), Phase::Loaded);
    }

    #[test]
    fn test_unknown_column_rejected() {
        let mut session = session_with(&[("hello", "")]);
        assert!(session.apply(Intent::SelectTextColumn("nope".into())).is_err());
        assert_eq!(session.text_column(), None);
        assert!(Session::new().apply(Intent::SelectTextColumn("text".into())).is_err());
    }

    #[test]
    fn test_analyze_seeds_rows_and_discovers_labels() {
        let mut session = session_with(&[
            ("one", r#"["a", "b"]"#),
            ("two", "b, c"),
            ("three", ""),
            ("four", "['d','a']"),
        ]);
        session.apply(Intent::SelectTextColumn("text".into())).unwrap();
        session.apply(Intent::SelectLabelColumn(Some("labels".into()))).unwrap();
        session.apply(Intent::AnalyzeLabels).unwrap();

        assert_eq!(session.discovered_labels(), ["a", "b", "c", "d"]);
        assert_eq!(session.store().labeled_count(), 3);
        let row3: Vec<&String> = session.store().get(3).unwrap().iter().collect();
        assert_eq!(row3, vec!["d", "a"]);
    }

    #[test]
    fn test_toggle_and_navigation() {
        let mut session = session_with(&[("one", ""), ("two", "")]);
        session.apply(Intent::SelectTextColumn("text".into())).unwrap();
        assert!(session.apply(Intent::ToggleLabel("x".into())).is_err());

        session.apply(Intent::StartClassification).unwrap();
        assert_eq!(session.current_text(), Some("one"));
        session.apply(Intent::ToggleLabel("x".into())).unwrap();
        session.apply(Intent::ToggleLabel("y".into())).unwrap();
        assert_eq!(current(&session), vec!["x", "y"]);

        session.apply(Intent::Next).unwrap();
        assert_eq!(session.current_text(), Some("two"));
        assert!(current(&session).is_empty());

        session.apply(Intent::Navigate(9)).unwrap();
        assert_eq!(session.current_row(), Some(1));

        session.apply(Intent::Next).unwrap();
        assert!(session.is_complete());
        assert_eq!(session.current_text(), None);
        assert!(session.apply(Intent::ToggleLabel("x".into())).is_err());

        session.apply(Intent::Previous).unwrap();
        assert_eq!(session.current_row(), Some(1));
    }

    #[test]
    fn test_toggle_trims_and_rejects_blank_labels() {
        let mut session = session_with(&[("one", "")]);
        session.apply(Intent::SelectTextColumn("text".into())).unwrap();
        session.apply(Intent::StartClassification).unwrap();

        session.apply(Intent::ToggleLabel(" a ".into())).unwrap();
        assert!(matches!(
            session.apply(Intent::ToggleLabel("".into())),
            Err(SessionError::Precondition(_))
        ));
        assert!(session.apply(Intent::ToggleLabel("  \t".into())).is_err());
        assert_eq!(current(&session), vec!["a"]);

        // the padded spelling toggles the same label off
        session.apply(Intent::ToggleLabel("a  ".into())).unwrap();
        assert!(current(&session).is_empty());

        session.apply(Intent::ToggleLabel(" a ".into())).unwrap();
        let field = session.store().get(0).unwrap().to_json();
        assert_eq!(field, r#"["a"]"#);
        assert_eq!(normalize_cell(&field), vec!["a"]);
    }

    #[test]
    fn test_filter_snapshot_is_not_live() {
        let mut session = session_with(&[("one", ""), ("two", ""), ("three", "")]);
        session.apply(Intent::SelectTextColumn("text".into())).unwrap();
        session.apply(Intent::SetFilterMode(FilterMode::WithoutLabels)).unwrap();
        session.apply(Intent::StartClassification).unwrap();

        session.apply(Intent::ToggleLabel("done".into())).unwrap();
        assert_eq!(session.current_row(), Some(0));
        assert_eq!(session.navigator().unwrap().indices(), &[0, 1, 2]);

        session.apply(Intent::SetFilterMode(FilterMode::WithLabels)).unwrap();
        assert_eq!(session.navigator().unwrap().len(), 3);

        session.apply(Intent::StartClassification).unwrap();
        assert_eq!(session.navigator().unwrap().indices(), &[0]);
    }

    #[test]
    fn test_catalog_removal_cascades() {
        let mut session = session_with(&[("one", "keep"), ("two", "")]);
        session.apply(Intent::SelectTextColumn("text".into())).unwrap();
        session.apply(Intent::SelectLabelColumn(Some("labels".into()))).unwrap();
        session.apply(Intent::AnalyzeLabels).unwrap();
        session.apply(Intent::AddCatalogLabel(" spam ".into())).unwrap();
        session.apply(Intent::StartClassification).unwrap();
        session.apply(Intent::ToggleLabel("spam".into())).unwrap();
        session.apply(Intent::Next).unwrap();
        session.apply(Intent::ToggleLabel("spam".into())).unwrap();

        assert_eq!(session.available_labels(), vec!["keep", "spam"]);
        session.apply(Intent::RemoveCatalogLabel("spam".into())).unwrap();
        assert_eq!(session.available_labels(), vec!["keep"]);
        let row0: Vec<&String> = session.store().get(0).unwrap().iter().collect();
        assert_eq!(row0, vec!["keep"]);
        assert!(session.store().get(1).unwrap().is_empty());
    }

    #[test]
    fn test_session_label_joins_catalog() {
        let mut session = session_with(&[("one", "")]);
        session.apply(Intent::AddSessionLabel("  new  ".into())).unwrap();
        session.apply(Intent::AddSessionLabel("".into())).unwrap();
        assert_eq!(session.catalog().len(), 1);
        assert!(session.catalog().contains("new"));
    }

    #[test]
    fn test_label_summary_counts() {
        let mut session = session_with(&[("one", "a, b"), ("two", "b"), ("three", "")]);
        session.apply(Intent::SelectTextColumn("text".into())).unwrap();
        session.apply(Intent::SelectLabelColumn(Some("labels".into()))).unwrap();
        session.apply(Intent::AnalyzeLabels).unwrap();
        session.apply(Intent::AddCatalogLabel("c".into())).unwrap();
        assert_eq!(
            session.label_summary(),
            vec![("a".to_string(), 1), ("b".to_string(), 2), ("c".to_string(), 0)]
        );
    }

    #[test]
    fn test_replace_dataset_keeps_catalog_only() {
        let mut session = session_with(&[("one", "a")]);
        session.apply(Intent::SelectTextColumn("text".into())).unwrap();
        session.apply(Intent::AddCatalogLabel("custom".into())).unwrap();
        session.apply(Intent::StartClassification).unwrap();

        session.replace_dataset(Dataset::from_records(vec!["body".into()], vec![vec!["x".into()]]));
        assert_eq!(session.phase(), Phase::Loaded);
        assert_eq!(session.text_column(), None);
        assert!(session.catalog().contains("custom"));
        assert_eq!(session.store().len(), 1);
    }
}
