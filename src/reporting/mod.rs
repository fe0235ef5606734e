// src/reporting/mod.rs
//! Report rendering and the on-disk report cache.

pub mod cache;
pub mod console;
pub mod json;
