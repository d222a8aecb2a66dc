//! Tabular reference data abstraction

use crate::core::error::BuildError;
use std::collections::HashMap;

/// One loosely-typed record, column name to raw text.
pub type Row = HashMap<String, String>;

pub trait RowSource: Send + Sync {
    fn asset_rows(&self) -> Result<Vec<Row>, BuildError>;

    fn currency_rows(&self) -> Result<Vec<Row>, BuildError>;
}

/// Rows held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticRows {
    pub assets: Vec<Row>,
    pub currencies: Vec<Row>,
}

impl StaticRows {
    pub fn new(assets: Vec<Row>, currencies: Vec<Row>) -> Self {
        Self { assets, currencies }
    }
}

impl RowSource for StaticRows {
    fn asset_rows(&self) -> Result<Vec<Row>, BuildError> {
        Ok(self.assets.clone())
    }

    fn currency_rows(&self) -> Result<Vec<Row>, BuildError> {
        Ok(self.currencies.clone())
    }
}

/// Builds a row from column/value pairs.
pub fn row(pairs: &[(&str, &str)]) -> Row {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
