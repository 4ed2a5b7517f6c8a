//! Generate a deterministic sample drug-sales dataset as CSV, for trying
//! the pipeline without real data.

use anyhow::{Context, Result};
use chrono::NaiveDate;

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

/// One drug category: baseline volume, yearly growth, seasonal swing.
struct Category {
    name: &'static str,
    base: f64,
    trend: f64,
    seasonal: f64,
}

const CATEGORIES: &[Category] = &[
    Category { name: "M01AB", base: 4.2, trend: 0.010, seasonal: 0.6 },
    Category { name: "M01AE", base: 3.6, trend: 0.006, seasonal: 0.4 },
    Category { name: "N02BA", base: 3.1, trend: -0.004, seasonal: 0.3 },
    Category { name: "N02BE", base: 28.0, trend: 0.050, seasonal: 9.0 },
    Category { name: "N05B", base: 9.5, trend: -0.010, seasonal: 1.2 },
    Category { name: "R03", base: 5.8, trend: 0.012, seasonal: 2.4 },
];

const START_YEAR: i32 = 2014;
const YEARS: i32 = 6;

fn monthly_volume(cat: &Category, month_index: i32, rng: &mut SimpleRng) -> f64 {
    let season = (month_index as f64 / 12.0 * std::f64::consts::TAU).cos();
    let value = cat.base + cat.trend * month_index as f64 + cat.seasonal * season
        + rng.gauss(0.0, cat.base * 0.08);
    value.max(0.0)
}

fn main() -> Result<()> {
    env_logger::init();
    let mut rng = SimpleRng::new(42);

    let output_path = "sample_drug_sales.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    let mut header = vec!["date".to_string()];
    header.extend(CATEGORIES.iter().map(|c| c.name.to_string()));
    writer.write_record(&header)?;

    let mut rows = 0;
    for month_index in 0..(YEARS * 12) {
        let year = START_YEAR + month_index / 12;
        let month = (month_index % 12 + 1) as u32;
        let date = NaiveDate::from_ymd_opt(year, month, 1)
            .context("invalid generated date")?;

        let mut record = vec![date.format("%Y-%m-%d").to_string()];
        for cat in CATEGORIES {
            record.push(format!("{:.2}", monthly_volume(cat, month_index, &mut rng)));
        }
        writer.write_record(&record)?;
        rows += 1;
    }
    writer.flush()?;

    println!(
        "Wrote {rows} monthly rows ({} categories) to {output_path}",
        CATEGORIES.len()
    );
    Ok(())
}
