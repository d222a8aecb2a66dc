use crate::core::error::BuildError;
use crate::core::rows::{Row, RowSource};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads headered CSV files: one for assets (`map.csv`), one for fiat
/// currencies (`fiat.csv`).
#[derive(Debug, Clone)]
pub struct CsvRowSource {
    map_path: PathBuf,
    fiat_path: PathBuf,
}

impl CsvRowSource {
    pub fn new(map_path: impl Into<PathBuf>, fiat_path: impl Into<PathBuf>) -> Self {
        Self {
            map_path: map_path.into(),
            fiat_path: fiat_path.into(),
        }
    }
}

impl RowSource for CsvRowSource {
    fn asset_rows(&self) -> Result<Vec<Row>, BuildError> {
        read_rows("map", &self.map_path)
    }

    fn currency_rows(&self) -> Result<Vec<Row>, BuildError> {
        read_rows("fiat", &self.fiat_path)
    }
}

fn read_rows(name: &str, path: &Path) -> Result<Vec<Row>, BuildError> {
    debug!(name, path = %path.display(), "Reading rows");

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(|e| BuildError::Unreadable {
            name: name.to_string(),
            reason: format!("{}: {e}", path.display()),
        })?;

    let mut rows = Vec::new();
    for (index, record) in reader.deserialize::<Row>().enumerate() {
        let row = record.map_err(|e| {
            if e.is_io_error() {
                BuildError::Unreadable {
                    name: name.to_string(),
                    reason: format!("{}: {e}", path.display()),
                }
            } else {
                BuildError::Parse {
                    name: name.to_string(),
                    record: index as u64 + 1,
                    reason: e.to_string(),
                }
            }
        })?;
        rows.push(row);
    }

    debug!(name, count = rows.len(), "Read rows");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, file: &str, content: &str) -> PathBuf {
        let path = dir.path().join(file);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_reads_headered_rows_and_skips_blank_lines() {
        let dir = TempDir::new().unwrap();
        let map = write(
            &dir,
            "map.csv",
            "id,name,symbol,slug,is_active,rank,status,platform,token_address\n\
             1,Bitcoin,BTC,bitcoin,1,1,active,,\n\
             \n\
             825,Tether,USDT,tether,1,3,active,1027,0xdac1\n",
        );
        let fiat = write(&dir, "fiat.csv", "id,symbol,name\n2781,USD,United States Dollar\n");

        let source = CsvRowSource::new(map, fiat);
        let assets = source.asset_rows().unwrap();
        assert_eq!(assets.len(), 2);
        assert_eq!(assets[1]["symbol"], "USDT");
        assert_eq!(assets[1]["token_address"], "0xdac1");
        assert_eq!(assets[0]["platform"], "");

        let currencies = source.currency_rows().unwrap();
        assert_eq!(currencies[0]["name"], "United States Dollar");
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let source = CsvRowSource::new(dir.path().join("nope.csv"), dir.path().join("nope.csv"));

        let err = source.asset_rows().unwrap_err();
        assert!(matches!(err, BuildError::Unreadable { ref name, .. } if name == "map"));
    }

    #[test]
    fn test_ragged_record_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let fiat = write(&dir, "fiat.csv", "id,symbol,name\n2781,USD,United States Dollar\n2790,EUR\n");
        let source = CsvRowSource::new(dir.path().join("map.csv"), fiat);

        let err = source.currency_rows().unwrap_err();
        assert!(matches!(err, BuildError::Parse { record: 2, ref name, .. } if name == "fiat"));
    }
}
