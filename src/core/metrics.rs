//! Synthetic metric generation abstraction

use crate::core::entity::AssetProfile;
use crate::core::quote::QuoteSnapshot;

/// Produces synthetic values on demand. Implementations need no input and
/// every call yields a fresh value.
pub trait MetricSource: Send + Sync {
    fn quote(&self) -> QuoteSnapshot;

    fn asset_profile(&self) -> AssetProfile;
}
