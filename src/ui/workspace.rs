use eframe::egui::{self, Key, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use rusty_tagger::{Intent, Phase, Session};

use super::{commit_on_enter, label_chip};
use crate::app::{dispatch, ViewState};
use crate::ui::panels::export_file_dialog;

// ---------------------------------------------------------------------------
// Central panel – dataset preview or the labeling view
// ---------------------------------------------------------------------------

/// Render the central panel for the current phase.
pub fn central_panel(ui: &mut Ui, session: &mut Session, view: &mut ViewState) {
    match session.phase() {
        Phase::Empty => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a file to start labeling  (File → Open…)");
            });
        }
        Phase::Loaded => preview_table(ui, session),
        Phase::Classifying if session.is_complete() => completion_view(ui, session, view),
        Phase::Classifying => labeling_view(ui, session, view),
    }
}

/// Left/Right arrows step through rows unless a text field has focus.
pub fn handle_keys(ctx: &egui::Context, session: &mut Session, view: &mut ViewState) {
    if session.phase() != Phase::Classifying || ctx.wants_keyboard_input() {
        return;
    }
    let (next, prev) = ctx.input(|i| (i.key_pressed(Key::ArrowRight), i.key_pressed(Key::ArrowLeft)));
    if next {
        dispatch(session, view, Intent::Next);
    } else if prev {
        dispatch(session, view, Intent::Previous);
    }
}

fn preview_table(ui: &mut Ui, session: &Session) {
    let Some(dataset) = session.dataset() else {
        return;
    };
    let shown = dataset.len().min(session.config().preview_rows);
    ui.heading("Preview");
    ui.label(format!("First {shown} of {} rows", dataset.len()));
    ui.add_space(4.0);

    let text_idx = session.text_column().and_then(|c| dataset.column_index(c));
    let label_idx = session.label_column().and_then(|c| dataset.column_index(c));

    ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .columns(Column::auto().at_most(360.0).resizable(true).clip(true), dataset.headers.len())
            .header(20.0, |mut header| {
                for (i, name) in dataset.headers.iter().enumerate() {
                    header.col(|ui: &mut Ui| {
                        let mut text = RichText::new(name).strong();
                        if Some(i) == text_idx {
                            text = text.underline();
                        } else if Some(i) == label_idx {
                            text = text.italics();
                        }
                        ui.label(text);
                    });
                }
            })
            .body(|body| {
                body.rows(18.0, shown, |mut row| {
                    let cells = &dataset.rows[row.index()].cells;
                    for cell in cells {
                        row.col(|ui: &mut Ui| {
                            ui.label(cell);
                        });
                    }
                });
            });
    });
}

fn labeling_view(ui: &mut Ui, session: &mut Session, view: &mut ViewState) {
    let Some(nav) = session.navigator() else {
        return;
    };
    let (position, total) = nav.progress();
    let (has_prev, at_last) = (nav.has_previous(), position == total);
    let row = session.current_row().unwrap_or_default();
    let text = session.current_text().unwrap_or_default().to_string();
    let selected: Vec<String> = session
        .current_labels()
        .map(|set| set.iter().cloned().collect())
        .unwrap_or_default();
    let json = session
        .current_labels()
        .map(|set| set.to_json())
        .unwrap_or_else(|| "[]".to_string());
    let available: Vec<String> = session
        .available_labels()
        .into_iter()
        .map(str::to_string)
        .collect();

    ui.add(
        egui::ProgressBar::new(position as f32 / total.max(1) as f32)
            .text(format!("Item {position} of {total}  (row {})", row + 1)),
    );
    ui.add_space(8.0);

    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_width(ui.available_width());
        ScrollArea::vertical()
            .max_height(240.0)
            .show(ui, |ui: &mut Ui| {
                ui.label(RichText::new(text).size(16.0));
            });
    });
    ui.add_space(8.0);

    ui.strong("Selected");
    ui.horizontal_wrapped(|ui: &mut Ui| {
        if selected.is_empty() {
            ui.weak("none");
        }
        for label in &selected {
            let color = view.colors.color_for(label);
            if label_chip(ui, label, color, true).clicked() {
                dispatch(session, view, Intent::ToggleLabel(label.clone()));
            }
        }
    });
    ui.label(RichText::new(json).monospace().weak());
    ui.add_space(8.0);

    ui.strong("Labels");
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for label in &available {
            let color = view.colors.color_for(label);
            let is_selected = selected.contains(label);
            if label_chip(ui, label, color, is_selected).clicked() {
                dispatch(session, view, Intent::ToggleLabel(label.clone()));
            }
        }
    });
    if let Some(label) = commit_on_enter(ui, &mut view.session_label, "new label, Enter to add") {
        dispatch(session, view, Intent::AddSessionLabel(label));
    }
    ui.add_space(12.0);

    ui.horizontal(|ui: &mut Ui| {
        if ui.add_enabled(has_prev, egui::Button::new("◀ Prev")).clicked() {
            dispatch(session, view, Intent::Previous);
        }
        let next_text = if at_last { "Finish ▶" } else { "Next ▶" };
        if ui.button(next_text).clicked() {
            dispatch(session, view, Intent::Next);
        }
        if at_last && ui.button("Export…").clicked() {
            export_file_dialog(session, view);
        }
    });
}

fn completion_view(ui: &mut Ui, session: &mut Session, view: &mut ViewState) {
    let labeled = session.store().labeled_count();
    let total = session.store().len();
    ui.vertical_centered(|ui: &mut Ui| {
        ui.add_space(40.0);
        ui.heading("Classification complete!");
        ui.label(format!("{labeled} of {total} rows carry at least one label."));
        ui.add_space(12.0);
        ui.horizontal(|ui: &mut Ui| {
            if ui.button("◀ Back").clicked() {
                dispatch(session, view, Intent::Previous);
            }
            if ui.button("Export…").clicked() {
                export_file_dialog(session, view);
            }
        });
    });
}
