use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use rusty_tagger::{FilterMode, Intent, Session};

use super::{commit_on_enter, label_chip};
use crate::app::{dispatch, Status, ViewState};

// ---------------------------------------------------------------------------
// Left side panel – columns, labels, filter
// ---------------------------------------------------------------------------

/// Render the left setup panel.
pub fn side_panel(ui: &mut Ui, session: &mut Session, view: &mut ViewState) {
    ui.heading("Setup");
    ui.separator();

    if session.dataset().is_none() {
        ui.label("No dataset loaded.");
        if ui.button("Open…").clicked() {
            open_file_dialog(session, view);
        }
        return;
    }
    let Some(dataset) = session.dataset() else {
        return;
    };

    // Clone what we need so we can mutate the session below.
    let headers = dataset.headers.clone();
    let row_count = dataset.len();
    let file_name = session
        .source()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "untitled".to_string());

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.label(format!("{file_name}: {row_count} rows"));
            ui.add_space(4.0);

            column_pickers(ui, session, view, &headers);

            if ui.button("Analyze labels").clicked() {
                dispatch(session, view, Intent::AnalyzeLabels);
            }
            ui.separator();

            discovered_labels(ui, session, view);
            ui.separator();

            catalog_editor(ui, session, view);
            ui.separator();

            ui.strong("Rows to visit");
            let current = session.filter_mode();
            for mode in FilterMode::ALL {
                if ui.radio(current == mode, mode.to_string()).clicked() {
                    dispatch(session, view, Intent::SetFilterMode(mode));
                }
            }
            ui.add_space(6.0);

            if ui.button(RichText::new("Start classification").strong()).clicked() {
                dispatch(session, view, Intent::StartClassification);
            }
        });
}

fn column_pickers(ui: &mut Ui, session: &mut Session, view: &mut ViewState, headers: &[String]) {
    ui.strong("Text column");
    let text_col = session.text_column().map(str::to_string);
    egui::ComboBox::from_id_salt("text_column")
        .selected_text(text_col.as_deref().unwrap_or("-- choose --"))
        .show_ui(ui, |ui: &mut Ui| {
            for col in headers {
                if ui
                    .selectable_label(text_col.as_deref() == Some(col.as_str()), col)
                    .clicked()
                {
                    dispatch(session, view, Intent::SelectTextColumn(col.clone()));
                }
            }
        });

    ui.strong("Label column (optional)");
    let label_col = session.label_column().map(str::to_string);
    egui::ComboBox::from_id_salt("label_column")
        .selected_text(label_col.as_deref().unwrap_or("-- None --"))
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(label_col.is_none(), "-- None --").clicked() {
                dispatch(session, view, Intent::SelectLabelColumn(None));
            }
            for col in headers {
                if ui
                    .selectable_label(label_col.as_deref() == Some(col.as_str()), col)
                    .clicked()
                {
                    dispatch(session, view, Intent::SelectLabelColumn(Some(col.clone())));
                }
            }
        });
    ui.add_space(4.0);
}

fn discovered_labels(ui: &mut Ui, session: &Session, view: &ViewState) {
    let found = session.discovered_labels();
    ui.strong(format!("Existing labels ({})", found.len()));
    if found.is_empty() {
        ui.weak("Choose a label column and analyze to import labels.");
        return;
    }
    let summary = session.label_summary();
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for label in found {
            let count = summary
                .iter()
                .find(|(l, _)| l == label)
                .map_or(0, |(_, c)| *c);
            let color = view.colors.color_for(label);
            ui.label(RichText::new(format!("{label} ({count})")).color(color));
        }
    });
}

fn catalog_editor(ui: &mut Ui, session: &mut Session, view: &mut ViewState) {
    ui.strong("Custom labels");
    if let Some(label) = commit_on_enter(ui, &mut view.setup_label, "type a label, Enter to add") {
        dispatch(session, view, Intent::AddCatalogLabel(label));
    }

    let custom: Vec<String> = session.catalog().iter().cloned().collect();
    if custom.is_empty() {
        return;
    }
    ui.weak("Click a label to remove it from the catalog and all rows.");
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for label in custom {
            let color = view.colors.color_for(&label);
            if label_chip(ui, &format!("{label} ×"), color, false).clicked() {
                dispatch(session, view, Intent::RemoveCatalogLabel(label));
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, session: &mut Session, view: &mut ViewState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(session, view);
                ui.close_menu();
            }
            let can_export = session.dataset().is_some();
            if ui.add_enabled(can_export, egui::Button::new("Export…")).clicked() {
                export_file_dialog(session, view);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = session.dataset() {
            ui.label(format!(
                "{} rows, {} labeled",
                ds.len(),
                session.store().labeled_count()
            ));
            ui.separator();
        }

        match &view.status {
            Some(Status::Error(msg)) => {
                ui.label(RichText::new(msg).color(Color32::RED));
            }
            Some(Status::Info(msg)) => {
                ui.label(msg);
            }
            None => {}
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(session: &mut Session, view: &mut ViewState) {
    let file = rfd::FileDialog::new()
        .set_title("Open dataset")
        .add_filter("Supported files", &["csv", "tsv", "txt", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv", "txt"])
        .add_filter("TSV", &["tsv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match session.open(&path) {
            Ok(()) => {
                let rows = session.dataset().map_or(0, |ds| ds.len());
                view.info(format!("Loaded {rows} rows"));
            }
            Err(e) => {
                log::error!("Failed to load file: {e}");
                view.error(format!("Error: {e}"));
            }
        }
    }
}

pub fn export_file_dialog(session: &Session, view: &mut ViewState) {
    let file = rfd::FileDialog::new()
        .set_title("Export labeled dataset")
        .set_file_name(&session.config().export_file_name)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        match session.export(&path) {
            Ok(n) => view.info(format!("Exported {n} rows to {}", path.display())),
            Err(e) => {
                log::error!("Export failed: {e}");
                view.error(format!("Error: {e}"));
            }
        }
    }
}
