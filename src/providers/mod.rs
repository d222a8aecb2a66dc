pub mod csv_rows;
pub mod synthetic;

// Re-export the default collaborators of the store
pub use csv_rows::CsvRowSource;
pub use synthetic::RandomMetricSource;
