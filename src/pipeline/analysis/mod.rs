// Pipeline analysis: the fixed query catalog and the runner that executes it

pub mod catalog;
pub mod runner;

pub use catalog::{select_queries, NamedQuery, QUERY_CATALOG};
pub use runner::{QueryRunner, ResultTable};
