use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use parquet::arrow::ArrowWriter;

// Column layout shared with the viewer's loader.
#[allow(dead_code)]
#[path = "../data/model.rs"]
mod model;

use model::{BASELINE_INDEX, COMPARISON_INDEX, Level, PERCENT_CHANGE_COLUMN, YEAR_COLUMNS};

/// Line items: (Hauptkategorie, Subkategorie_1, Subkategorie_2, Produktgruppe,
/// Subprodukt, base amount). Repeated names exercise every label rule.
const LINE_ITEMS: [(&str, &str, &str, &str, &str, f64); 10] = [
    ("Bildung", "Schulen", "Schulen", "Grundschulen", "Schulbetrieb", 4_200_000.0),
    ("Bildung", "Schulen", "Gymnasien", "Gymnasien", "Schulbetrieb", 3_100_000.0),
    ("Bildung", "Bildung", "Volkshochschule", "Erwachsenenbildung", "Kurse", 650_000.0),
    ("Soziales", "Jugend", "Kitas", "Kindertagesstätten", "Kindertagesstätten", 5_800_000.0),
    ("Soziales", "Jugend", "Jugendzentren", "Jugendarbeit", "Offene Angebote", 420_000.0),
    ("Soziales", "Hilfe", "Hilfe", "Sozialhilfe", "Grundsicherung", 7_300_000.0),
    ("Kultur", "Museen", "Stadtmuseum", "Museen", "Ausstellungen", 380_000.0),
    ("Kultur", "Bibliotheken", "Stadtbibliothek", "Bibliotheken", "Medien", 240_000.0),
    ("Verwaltung", "Verwaltung", "Personal", "Zentrale Dienste", "Personalkosten", 9_900_000.0),
    ("Verwaltung", "IT", "Infrastruktur", "Zentrale Dienste", "Digitalisierung", 1_150_000.0),
];

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

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform value in `[low, high)`.
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }
}

/// Yearly amounts: a random walk of whole euros around the base amount.
fn yearly_values(base: f64, rng: &mut SimpleRng) -> Vec<f64> {
    let mut amount = base;
    YEAR_COLUMNS
        .iter()
        .map(|_| {
            amount *= 1.0 + rng.uniform(-0.06, 0.09);
            amount.round()
        })
        .collect()
}

fn write_csv(path: &Path, rows: &[(Vec<&str>, Vec<f64>, f64)]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV output")?;

    let mut header: Vec<&str> = Level::DISPLAY_ORDER.map(Level::column_name).to_vec();
    header.extend(YEAR_COLUMNS);
    header.push(PERCENT_CHANGE_COLUMN);
    writer.write_record(&header)?;

    for (categories, values, pct) in rows {
        let mut record: Vec<String> = categories.iter().map(|c| c.to_string()).collect();
        record.extend(values.iter().map(|v| format!("{v:.0}")));
        record.push(format!("{pct:.2}"));
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

fn build_batch(rows: &[(Vec<&str>, Vec<f64>, f64)]) -> Result<RecordBatch> {
    let mut fields = Vec::new();
    let mut columns: Vec<ArrayRef> = Vec::new();

    for (c, level) in Level::DISPLAY_ORDER.iter().enumerate() {
        fields.push(Field::new(level.column_name(), DataType::Utf8, false));
        let values: Vec<&str> = rows.iter().map(|(cats, _, _)| cats[c]).collect();
        columns.push(Arc::new(StringArray::from(values)));
    }
    for (y, name) in YEAR_COLUMNS.iter().enumerate() {
        fields.push(Field::new(*name, DataType::Float64, true));
        let values: Vec<f64> = rows.iter().map(|(_, vals, _)| vals[y]).collect();
        columns.push(Arc::new(Float64Array::from(values)));
    }
    fields.push(Field::new(PERCENT_CHANGE_COLUMN, DataType::Float64, true));
    columns.push(Arc::new(Float64Array::from(
        rows.iter().map(|(_, _, pct)| *pct).collect::<Vec<_>>(),
    )));

    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns).context("building record batch")
}

fn write_parquet(path: &Path, batch: &RecordBatch) -> Result<()> {
    let file = std::fs::File::create(path).context("creating parquet output")?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let rows: Vec<(Vec<&str>, Vec<f64>, f64)> = LINE_ITEMS
        .iter()
        .map(|&(h, s1, s2, pg, sp, base)| {
            let values = yearly_values(base, &mut rng);
            let baseline = values[BASELINE_INDEX];
            let pct = (values[COMPARISON_INDEX] - baseline) / baseline * 100.0;
            (vec![h, s1, s2, pg, sp], values, pct)
        })
        .collect();

    let out_dir = Path::new("data");
    std::fs::create_dir_all(out_dir).context("creating data directory")?;

    let csv_path = out_dir.join("1825.csv");
    write_csv(&csv_path, &rows)?;

    let batch = build_batch(&rows)?;
    let parquet_path = out_dir.join("1825.parquet");
    write_parquet(&parquet_path, &batch)?;

    println!("{}", pretty_format_batches(&[batch.slice(0, 3)])?);
    println!(
        "Wrote {} budget rows to {} and {}",
        rows.len(),
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}
