/// Session-wide settings. There is no config file: every session starts
/// from these defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggerConfig {
    /// Header of the column appended to exported files.
    pub export_column: String,
    /// File name suggested by the export dialog.
    pub export_file_name: String,
    /// Number of rows shown in the dataset preview before a session starts.
    pub preview_rows: usize,
}

impl Default for TaggerConfig {
    fn default() -> Self {
        Self {
            export_column: "classifications".to_string(),
            export_file_name: "classified_data.csv".to_string(),
            preview_rows: 20,
        }
    }
}
