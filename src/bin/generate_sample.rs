use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use arrow::array::{ArrayRef, Float64Array, Int64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;

/// Write a synthetic dielectron dataset as CSV and Parquet
#[derive(Parser, Debug)]
struct Args {
    /// Directory the files are written to
    #[arg(default_value = ".")]
    out_dir: PathBuf,

    /// Number of collision events to simulate
    #[arg(long, default_value_t = 2000)]
    events: usize,

    /// Seed for the random generator
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// One electron of a pair.
struct Electron {
    e: f64,
    px: f64,
    py: f64,
    pz: f64,
    pt: f64,
    eta: f64,
    phi: f64,
    q: f64,
}

impl Electron {
    fn sample(rng: &mut SimpleRng, pt_scale: f64) -> Self {
        let pt = -pt_scale * rng.next_f64().max(1e-12).ln() + 2.0;
        let eta = rng.gauss(0.0, 1.2);
        let phi = (rng.next_f64() * 2.0 - 1.0) * std::f64::consts::PI;
        let q = if rng.next_f64() < 0.5 { -1.0 } else { 1.0 };
        Electron {
            e: pt * eta.cosh(),
            px: pt * phi.cos(),
            py: pt * phi.sin(),
            pz: pt * eta.sinh(),
            pt,
            eta,
            phi,
            q,
        }
    }
}

/// Invariant mass of a massless pair.
fn invariant_mass(a: &Electron, b: &Electron) -> f64 {
    let e = a.e + b.e;
    let (px, py, pz) = (a.px + b.px, a.py + b.py, a.pz + b.pz);
    (e * e - px * px - py * py - pz * pz).max(0.0).sqrt()
}

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

const FLOAT_COLUMNS: [&str; 17] = [
    "E1", "px1", "py1", "pz1", "pt1", "eta1", "phi1", "Q1", "E2", "px2", "py2", "pz2", "pt2",
    "eta2", "phi2", "Q2", "M",
];

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    let mut runs: Vec<i64> = Vec::with_capacity(args.events);
    let mut events: Vec<i64> = Vec::with_capacity(args.events);
    let mut floats: Vec<Vec<Option<f64>>> = vec![Vec::with_capacity(args.events); FLOAT_COLUMNS.len()];

    for i in 0..args.events {
        // Roughly one event in a hundred gets a hard, far-tail electron.
        let scale = if rng.next_f64() < 0.01 { 150.0 } else { 8.0 };
        let a = Electron::sample(&mut rng, scale);
        let b = Electron::sample(&mut rng, 8.0);
        let m = invariant_mass(&a, &b);

        let row = [
            a.e, a.px, a.py, a.pz, a.pt, a.eta, a.phi, a.q, b.e, b.px, b.py, b.pz, b.pt, b.eta,
            b.phi, b.q, m,
        ];
        for (col, value) in floats.iter_mut().zip(row) {
            col.push(Some(value));
        }
        runs.push(147115 + (i / 500) as i64);
        events.push(366_000_000 + i as i64);
    }

    // Blank out a sprinkling of cells so the loader has something to impute.
    for _ in 0..args.events / 200 {
        let col = (rng.next_u64() % FLOAT_COLUMNS.len() as u64) as usize;
        let row = (rng.next_u64() % args.events.max(1) as u64) as usize;
        if let Some(cell) = floats[col].get_mut(row) {
            *cell = None;
        }
    }

    // Repeat the first few events verbatim as duplicates.
    for row in 0..args.events.min(5) {
        runs.push(runs[row]);
        events.push(events[row]);
        for col in &mut floats {
            col.push(col[row]);
        }
    }

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    // Write CSV
    let csv_path = args.out_dir.join("dielectron.csv");
    let mut writer = csv::Writer::from_path(&csv_path).context("creating CSV file")?;
    let mut header = vec!["Run", "Event"];
    header.extend(FLOAT_COLUMNS);
    writer.write_record(&header)?;
    for row in 0..runs.len() {
        let mut record = vec![runs[row].to_string(), events[row].to_string()];
        record.extend(
            floats
                .iter()
                .map(|col| col[row].map(|v| format!("{v:.5}")).unwrap_or_default()),
        );
        writer.write_record(&record)?;
    }
    writer.flush()?;

    // Build Arrow arrays
    let mut fields = vec![
        Field::new("Run", DataType::Int64, false),
        Field::new("Event", DataType::Int64, false),
    ];
    let mut arrays: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from(runs.clone())),
        Arc::new(Int64Array::from(events.clone())),
    ];
    for (name, values) in FLOAT_COLUMNS.iter().zip(&floats) {
        fields.push(Field::new(*name, DataType::Float64, true));
        arrays.push(Arc::new(Float64Array::from(values.clone())));
    }
    let schema = Arc::new(Schema::new(fields));
    let batch = RecordBatch::try_new(schema.clone(), arrays).context("building record batch")?;

    // Write Parquet
    let parquet_path = args.out_dir.join("dielectron.parquet");
    let file = std::fs::File::create(&parquet_path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch)?;
    writer.close()?;

    println!(
        "Wrote {} rows to {} and {}",
        runs.len(),
        csv_path.display(),
        parquet_path.display()
    );
    Ok(())
}
