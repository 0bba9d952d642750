// Pipeline storage: flat table sinks and the SQLite delivery store

pub mod csv_sink;
pub mod in_memory;
pub mod sqlite;

pub use csv_sink::{read_rows, CsvTableSink};
pub use in_memory::InMemoryTableSink;
pub use sqlite::CricketDb;
