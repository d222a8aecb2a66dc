//! Read-only queries over the store

pub mod listing;
pub mod lookup;
pub mod projection;

pub use listing::list_assets;
pub use lookup::lookup_quotes;
pub use projection::{FieldSet, Projected};
