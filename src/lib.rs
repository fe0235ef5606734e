pub mod backup;
pub mod clean;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod graph;
pub mod progress;
pub mod reporting;
pub mod scan;
pub mod scanners;
pub mod types;
