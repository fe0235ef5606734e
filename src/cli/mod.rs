// src/cli/mod.rs
//! CLI argument parsing and command dispatch.

pub mod args;
pub mod dispatch;

pub use args::Cli;
