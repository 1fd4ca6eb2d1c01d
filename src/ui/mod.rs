pub mod panels;
pub mod workspace;

use eframe::egui::{self, Color32, RichText, Ui};

/// A clickable label chip. Selected chips are filled with the label colour.
pub fn label_chip(ui: &mut Ui, label: &str, color: Color32, selected: bool) -> egui::Response {
    let (text, fill) = if selected {
        (RichText::new(label).color(Color32::WHITE).strong(), color)
    } else {
        (RichText::new(label).color(color), Color32::TRANSPARENT)
    };
    ui.add(
        egui::Button::new(text)
            .fill(fill)
            .stroke(egui::Stroke::new(1.0, color))
            .corner_radius(10),
    )
}

/// Single-line entry that yields its trimmed text when Enter is pressed.
pub fn commit_on_enter(ui: &mut Ui, buffer: &mut String, hint: &str) -> Option<String> {
    let response = ui.add(egui::TextEdit::singleline(buffer).hint_text(hint));
    let entered = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
    if !entered || buffer.trim().is_empty() {
        return None;
    }
    let text = buffer.trim().to_string();
    buffer.clear();
    response.request_focus();
    Some(text)
}
