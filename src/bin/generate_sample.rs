use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len())]
    }
}

const SUBJECTS: &[&str] = &[
    "The checkout page",
    "My last invoice",
    "The mobile app",
    "Password reset",
    "The new dashboard",
    "Customer support",
    "Delivery tracking",
];

const PREDICATES: &[&str] = &[
    "keeps crashing on startup",
    "shows the wrong total",
    "is much faster since the update",
    "never sends the confirmation email",
    "was really helpful, thanks",
    "times out after a few seconds",
    "looks great, but the font is tiny",
];

const LABELS: &[&str] = &["bug", "billing", "praise", "urgent", "ui", "performance"];

/// Render a label list in one of the encodings found in real exports.
fn encode_labels(labels: &[&str], style: usize) -> String {
    match style {
        0 => serde_json::to_string(labels).unwrap_or_default(),
        1 => format!(
            "[{}]",
            labels
                .iter()
                .map(|l| format!("'{l}'"))
                .collect::<Vec<_>>()
                .join(", ")
        ),
        2 => labels.join(", "),
        _ => labels.first().map(|l| format!("\"{l}\"")).unwrap_or_default(),
    }
}

fn generate_rows(n: usize, rng: &mut SimpleRng) -> Vec<(i64, String, String)> {
    (0..n)
        .map(|i| {
            let text = format!("{} {}.", rng.pick(SUBJECTS), rng.pick(PREDICATES));
            // roughly a third of the rows stay unlabeled
            let labels = if rng.below(3) == 0 {
                String::new()
            } else {
                let count = 1 + rng.below(3);
                let mut chosen: Vec<&str> = Vec::new();
                while chosen.len() < count {
                    let label = *rng.pick(LABELS);
                    if !chosen.contains(&label) {
                        chosen.push(label);
                    }
                }
                encode_labels(&chosen, rng.below(4))
            };
            (i as i64, text, labels)
        })
        .collect()
}

fn write_csv(path: &Path, rows: &[(i64, String, String)]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path).context("creating CSV output")?;
    wtr.write_record(["id", "text", "labels"])?;
    for (id, text, labels) in rows {
        wtr.write_record([id.to_string().as_str(), text.as_str(), labels.as_str()])?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[(i64, String, String)]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("text", DataType::Utf8, false),
        Field::new("labels", DataType::Utf8, true),
    ]));
    let ids = Int64Array::from(rows.iter().map(|r| r.0).collect::<Vec<_>>());
    let texts = StringArray::from(rows.iter().map(|r| r.1.as_str()).collect::<Vec<_>>());
    let labels = StringArray::from(
        rows.iter()
            .map(|r| (!r.2.is_empty()).then_some(r.2.as_str()))
            .collect::<Vec<_>>(),
    );

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![Arc::new(ids), Arc::new(texts), Arc::new(labels)],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_texts.csv".to_string());
    let output_path = Path::new(&output);

    let mut rng = SimpleRng::new(42);
    let rows = generate_rows(60, &mut rng);

    match output_path.extension().and_then(|e| e.to_str()) {
        Some("parquet") | Some("pq") => write_parquet(output_path, &rows)?,
        _ => write_csv(output_path, &rows)?,
    }

    println!("Wrote {} texts to {output}", rows.len());
    Ok(())
}
