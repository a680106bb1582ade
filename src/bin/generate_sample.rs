use anyhow::{Context, Result};

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

/// `4560` → `"4,560"`, matching how the source agency formats dollar values.
fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if n < 0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn write_cropland(rng: &mut SimpleRng) -> Result<usize> {
    // (state, dollars per acre in 1975)
    let states = [
        ("KENTUCKY", 520.0),
        ("INDIANA", 760.0),
        ("OHIO", 700.0),
        ("TENNESSEE", 480.0),
    ];

    let mut writer =
        csv::Writer::from_path("data/Cropland Value.csv").context("creating cropland CSV")?;
    writer.write_record(["State", "Year", "Value"])?;

    let mut rows = 0usize;
    for (state, base) in states {
        for year in 1975..=2025 {
            let growth = 1.045f64.powi(year - 1975);
            let value = base * growth * rng.gauss(1.0, 0.03);

            // A few cells are withheld in real extracts; reproduce that so
            // the missing-value path is exercised end to end.
            let cell = if rng.next_f64() < 0.01 {
                "(D)".to_string()
            } else {
                group_thousands(value.round() as i64)
            };

            writer.write_record([state, &year.to_string(), &cell])?;
            rows += 1;
        }
    }
    writer.flush()?;
    Ok(rows)
}

fn write_crop_prices(rng: &mut SimpleRng) -> Result<usize> {
    // (commodity, dollars per bushel in 1975)
    let commodities = [("WHEAT", 3.55), ("CORN", 2.54), ("SOYBEANS", 4.92)];

    let mut writer =
        csv::Writer::from_path("data/Crop Prices.csv").context("creating crop prices CSV")?;
    writer.write_record(["Commodity", "Year", "Value"])?;

    let mut rows = 0usize;
    for (commodity, base) in commodities {
        for year in 1975..=2025 {
            let growth = 1.018f64.powi(year - 1975);
            let value = (base * growth * rng.gauss(1.0, 0.08)).max(0.5);
            writer.write_record([commodity, &year.to_string(), &format!("{value:.2}")])?;
            rows += 1;
        }
    }
    writer.flush()?;
    Ok(rows)
}

fn write_index(rng: &mut SimpleRng) -> Result<usize> {
    let mut writer =
        csv::Writer::from_path("data/Index Prices.csv").context("creating index CSV")?;
    writer.write_record(["Year", "Value"])?;

    let mut rows = 0usize;
    for year in 1975..=2025 {
        // Anchored at the 2011 base: exactly 100 that year, drifting around
        // a 2.6%/year trend elsewhere.
        let value = if year == 2011 {
            100.0
        } else {
            100.0 * 1.026f64.powi(year - 2011) * rng.gauss(1.0, 0.02)
        };
        writer.write_record([&year.to_string(), &format!("{value:.1}")])?;
        rows += 1;
    }
    writer.flush()?;
    Ok(rows)
}

fn main() -> Result<()> {
    std::fs::create_dir_all("data").context("creating data directory")?;

    let mut rng = SimpleRng::new(42);
    let cropland = write_cropland(&mut rng)?;
    let prices = write_crop_prices(&mut rng)?;
    let index = write_index(&mut rng)?;

    println!(
        "Wrote {cropland} cropland, {prices} crop price, and {index} index rows to data/"
    );
    Ok(())
}
