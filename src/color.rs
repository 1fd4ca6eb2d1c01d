use std::collections::HashMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.55, 0.42);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Label chip colours
// ---------------------------------------------------------------------------

/// Maps each offered label to a distinct chip colour.
#[derive(Debug, Clone)]
pub struct LabelColors {
    labels: Vec<String>,
    mapping: HashMap<String, Color32>,
    default_color: Color32,
}

impl Default for LabelColors {
    fn default() -> Self {
        Self {
            labels: Vec::new(),
            mapping: HashMap::new(),
            default_color: Color32::GRAY,
        }
    }
}

impl LabelColors {
    /// Rebuild the mapping when the offered labels changed.
    pub fn sync(&mut self, labels: &[&str]) {
        if self.labels.iter().map(String::as_str).eq(labels.iter().copied()) {
            return;
        }
        let palette = generate_palette(labels.len());
        self.mapping = labels
            .iter()
            .zip(palette)
            .map(|(l, c)| (l.to_string(), c))
            .collect();
        self.labels = labels.iter().map(|l| l.to_string()).collect();
    }

    /// Labels not offered (e.g. removed from the catalog) fall back to grey.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_is_distinct() {
        let palette = generate_palette(6);
        assert_eq!(palette.len(), 6);
        for (i, a) in palette.iter().enumerate() {
            assert!(palette[i + 1..].iter().all(|b| a != b));
        }
        assert!(generate_palette(0).is_empty());
    }

    #[test]
    fn test_unknown_label_is_grey() {
        let mut colors = LabelColors::default();
        colors.sync(&["a", "b"]);
        assert_ne!(colors.color_for("a"), colors.color_for("b"));
        assert_eq!(colors.color_for("zzz"), Color32::GRAY);
        colors.sync(&["b"]);
        assert_eq!(colors.color_for("a"), Color32::GRAY);
    }
}
