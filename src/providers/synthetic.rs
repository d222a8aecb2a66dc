use crate::core::entity::AssetProfile;
use crate::core::metrics::MetricSource;
use crate::core::quote::QuoteSnapshot;
use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Uniformly random metrics in plausible ranges.
pub struct RandomMetricSource {
    rng: Mutex<StdRng>,
}

impl RandomMetricSource {
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible sequence, for tests and demos.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut rng)
    }
}

impl Default for RandomMetricSource {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricSource for RandomMetricSource {
    fn quote(&self) -> QuoteSnapshot {
        let last_updated = Utc::now();
        self.with_rng(|rng| QuoteSnapshot {
            price: rng.gen_range(0.0..10.0),
            volume_24h: rng.gen_range(10e6..15e6),
            volume_24h_reported: rng.gen_range(15e6..20e6),
            volume_7d: rng.gen_range(10e6..15e6) * 7.0,
            volume_7d_reported: rng.gen_range(15e6..20e6) * 7.0,
            volume_30d: rng.gen_range(10e6..15e6) * 30.0,
            volume_30d_reported: rng.gen_range(15e6..20e6) * 30.0,
            market_cap: rng.gen_range(10e7..40e7),
            market_cap_by_total_supply: rng.gen_range(10e7..40e7),
            percent_change_1h: rng.gen_range(-0.3..0.3),
            percent_change_24h: rng.gen_range(-0.3..0.3) * 24.0,
            percent_change_7d: rng.gen_range(-0.3..0.3) * 168.0,
            last_updated,
        })
    }

    fn asset_profile(&self) -> AssetProfile {
        let now = Utc::now();
        self.with_rng(|rng| AssetProfile {
            first_historical_data: now
                - Duration::seconds(rng.gen_range(1..=365 * SECONDS_PER_DAY)),
            last_historical_data: now - Duration::seconds(rng.gen_range(1..=SECONDS_PER_DAY)),
            num_market_pairs: rng.gen_range(4000..=9000),
            circulating_supply: f64::from(rng.gen_range(70..=80u32)) * 1e5,
            total_supply: f64::from(rng.gen_range(80..=90u32)) * 1e5,
            max_supply: f64::from(rng.gen_range(10..=40u32)) * 1e6,
            last_updated: now - Duration::seconds(rng.gen_range(1..=SECONDS_PER_DAY)),
        })
    }
}
