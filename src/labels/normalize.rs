use std::collections::HashSet;

use serde_json::Value as JsonValue;

// ---------------------------------------------------------------------------
// Cell → label sequence
// ---------------------------------------------------------------------------

/// Parse one raw label-column cell into an ordered list of labels.
///
/// Interpretations, first match wins:
/// 1. valid JSON: a list maps element-wise, a scalar becomes one label
/// 2. `[...]` that is not JSON (`['a', 'b']`): split the interior on commas
///    and strip one leading and one trailing quote from each piece
/// 3. plain comma-separated text
///
/// Every label is trimmed and empties are dropped. This never fails.
pub fn normalize_cell(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    if let Ok(value) = serde_json::from_str::<JsonValue>(trimmed) {
        return match value {
            JsonValue::Array(items) => items.iter().filter_map(json_label).collect(),
            scalar => json_label(&scalar).into_iter().collect(),
        };
    }

    if trimmed.len() >= 2 && trimmed.starts_with('[') && trimmed.ends_with(']') {
        return trimmed[1..trimmed.len() - 1]
            .split(',')
            .map(|piece| strip_quotes(piece.trim()).trim())
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect();
    }

    trimmed
        .split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// String form of one decoded JSON value; `None` for blank text.
fn json_label(value: &JsonValue) -> Option<String> {
    let text = display_value(value);
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Plain-text rendering of a JSON value as a label.
///
/// `null` reads `null`, integral numbers drop the fraction (`1.0` -> `1`),
/// nested lists are comma-joined with null elements left blank, and objects
/// keep their compact JSON text.
fn display_value(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => "null".to_string(),
        JsonValue::Bool(b) => b.to_string(),
        JsonValue::Number(n) => display_number(n),
        JsonValue::String(s) => s.clone(),
        JsonValue::Array(items) => items
            .iter()
            .map(|item| match item {
                JsonValue::Null => String::new(),
                other => display_value(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        JsonValue::Object(_) => value.to_string(),
    }
}

fn display_number(n: &serde_json::Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }
    match n.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.fract() == 0.0 && f.abs() < 1e21 => format!("{f:.0}"),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

fn strip_quotes(piece: &str) -> &str {
    let piece = piece
        .strip_prefix(['\'', '"'])
        .unwrap_or(piece);
    piece.strip_suffix(['\'', '"']).unwrap_or(piece)
}

// ---------------------------------------------------------------------------
// Discovered labels across a column
// ---------------------------------------------------------------------------

/// Distinct labels found while normalizing a column, in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct LabelDiscovery {
    ordered: Vec<String>,
    seen: HashSet<String>,
}

impl LabelDiscovery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every label of one row.
    pub fn observe<'a, I>(&mut self, labels: I)
    where
        I: IntoIterator<Item = &'a String>,
    {
        for label in labels {
            if self.seen.insert(label.clone()) {
                self.ordered.push(label.clone());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    pub fn into_labels(self) -> Vec<String> {
        self.ordered
    }
}
