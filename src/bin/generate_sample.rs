use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};

use claims_dashboard::DashboardConfig;

const ROWS: usize = 2_000;

const INSURERS: &[(&str, f64)] = &[
    ("Geico", 0.28),
    ("StateFarm", 0.24),
    ("Progressive", 0.18),
    ("Allstate", 0.14),
    ("Liberty Mutual", 0.09),
    ("Nationwide", 0.07),
];
const STATES: &[&str] = &[
    "CA", "TX", "FL", "NY", "PA", "IL", "OH", "GA", "NC", "MI", "NJ", "VA", "WA", "AZ",
];
const INCIDENTS: &[(&str, f64)] = &[
    ("Collision", 0.45),
    ("Hit and run", 0.15),
    ("Theft", 0.12),
    ("Vandalism", 0.10),
    ("Hail", 0.08),
    ("Flood", 0.05),
    ("Fire", 0.05),
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

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Pick from `(value, weight)` pairs whose weights sum to ~1.
    fn weighted<'a>(&mut self, choices: &[(&'a str, f64)]) -> &'a str {
        let mut r = self.next_f64();
        for &(value, weight) in choices {
            if r < weight {
                return value;
            }
            r -= weight;
        }
        choices[choices.len() - 1].0
    }

    /// Log-normal sample, for right-skewed loss amounts.
    fn lognormal(&mut self, mu: f64, sigma: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        (mu + sigma * z).exp()
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::from_env().context("resolving configuration")?;
    let cols = &config.columns;
    let output_path = &config.data_path;
    if let Some(dir) = output_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating {}", dir.display()))?;
    }

    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;
    writer.write_record([
        "claim_id",
        cols.loss_date.as_str(),
        cols.insurer_name.as_str(),
        cols.insured_state.as_str(),
        cols.incident_type.as_str(),
        cols.injury_involved.as_str(),
        cols.lawsuit_filed.as_str(),
        cols.total_claimed_losses.as_str(),
        cols.total_insurance_payment.as_str(),
    ])?;

    let mut rng = SimpleRng::new(42);
    let first_day = NaiveDate::from_ymd_opt(2021, 1, 1).context("start date")?;
    let mut undated = 0;

    for id in 1..=ROWS {
        let incident = rng.weighted(INCIDENTS);
        let injury = incident == "Collision" && rng.chance(0.35) || rng.chance(0.05);
        let lawsuit = injury && rng.chance(0.4) || rng.chance(0.03);

        // Roughly 1% of rows carry a date the loader must coerce to null.
        let date = if rng.chance(0.01) {
            undated += 1;
            "unknown".to_string()
        } else {
            let offset = rng.below(4 * 365) as u64;
            first_day
                .checked_add_days(Days::new(offset))
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        };

        let severity = if injury { 9.8 } else { 8.6 };
        let claimed = (rng.lognormal(severity, 0.8) * 100.0).round() / 100.0;
        let paid_share = if rng.chance(0.12) { 0.0 } else { 0.45 + 0.5 * rng.next_f64() };
        let paid = (claimed * paid_share * 100.0).round() / 100.0;

        writer.write_record([
            id.to_string(),
            date,
            rng.weighted(INSURERS).to_string(),
            STATES[rng.below(STATES.len())].to_string(),
            incident.to_string(),
            yes_no(injury).to_string(),
            yes_no(lawsuit).to_string(),
            format!("{claimed:.2}"),
            format!("{paid:.2}"),
        ])?;
    }
    writer.flush()?;

    log::info!("{undated} rows were written with an unparseable date");
    println!("Wrote {ROWS} claims to {}", output_path.display());
    Ok(())
}
