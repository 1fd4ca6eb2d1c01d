use eframe::egui;
use rusty_tagger::{Intent, Session};

use crate::color::LabelColors;
use crate::ui::{panels, workspace};

// ---------------------------------------------------------------------------
// View state – transient widget buffers only
// ---------------------------------------------------------------------------

/// Everything the UI keeps that is not labeling state.
#[derive(Debug, Default)]
pub struct ViewState {
    /// Label entry before a session starts.
    pub setup_label: String,
    /// Label entry while classifying.
    pub session_label: String,
    /// Status / error message shown in the top bar.
    pub status: Option<Status>,
    pub colors: LabelColors,
}

#[derive(Debug, Clone)]
pub enum Status {
    Info(String),
    Error(String),
}

impl ViewState {
    pub fn info(&mut self, msg: impl Into<String>) {
        self.status = Some(Status::Info(msg.into()));
    }

    pub fn error(&mut self, msg: impl Into<String>) {
        self.status = Some(Status::Error(msg.into()));
    }
}

/// Forward one intent to the session, surfacing failures in the status line.
pub fn dispatch(session: &mut Session, view: &mut ViewState, intent: Intent) {
    if let Err(e) = session.apply(intent) {
        log::warn!("{e}");
        view.error(e.to_string());
    }
}

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct TaggerApp {
    pub session: Session,
    pub view: ViewState,
}

impl eframe::App for TaggerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.view.colors.sync(&self.session.available_labels());
        workspace::handle_keys(ctx, &mut self.session, &mut self.view);

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.session, &mut self.view);
        });

        // ---- Left side panel: columns, labels, filter ----
        egui::SidePanel::left("setup_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.session, &mut self.view);
            });

        // ---- Central panel: preview or labeling view ----
        egui::CentralPanel::default().show(ctx, |ui| {
            workspace::central_panel(ui, &mut self.session, &mut self.view);
        });
    }
}
