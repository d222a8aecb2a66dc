//! Quote snapshots and the derived conversion quote

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Synthetic market metrics attached to an asset or currency. A snapshot is
/// always replaced as a whole, never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteSnapshot {
    pub price: f64,
    pub volume_24h: f64,
    pub volume_24h_reported: f64,
    pub volume_7d: f64,
    pub volume_7d_reported: f64,
    pub volume_30d: f64,
    pub volume_30d_reported: f64,
    pub market_cap: f64,
    pub market_cap_by_total_supply: f64,
    pub percent_change_1h: f64,
    pub percent_change_24h: f64,
    pub percent_change_7d: f64,
    pub last_updated: DateTime<Utc>,
}

impl QuoteSnapshot {
    /// Expresses `source` in terms of `target`.
    ///
    /// Price is the plain ratio `target / source`; every other metric is
    /// `target + source / 2`. The timestamp is the target's.
    pub fn derived(source: &QuoteSnapshot, target: &QuoteSnapshot) -> QuoteSnapshot {
        let blend = |t: f64, s: f64| t + s / 2.0;

        QuoteSnapshot {
            price: target.price / source.price,
            volume_24h: blend(target.volume_24h, source.volume_24h),
            volume_24h_reported: blend(target.volume_24h_reported, source.volume_24h_reported),
            volume_7d: blend(target.volume_7d, source.volume_7d),
            volume_7d_reported: blend(target.volume_7d_reported, source.volume_7d_reported),
            volume_30d: blend(target.volume_30d, source.volume_30d),
            volume_30d_reported: blend(target.volume_30d_reported, source.volume_30d_reported),
            market_cap: blend(target.market_cap, source.market_cap),
            market_cap_by_total_supply: blend(
                target.market_cap_by_total_supply,
                source.market_cap_by_total_supply,
            ),
            percent_change_1h: blend(target.percent_change_1h, source.percent_change_1h),
            percent_change_24h: blend(target.percent_change_24h, source.percent_change_24h),
            percent_change_7d: blend(target.percent_change_7d, source.percent_change_7d),
            last_updated: target.last_updated,
        }
    }
}
