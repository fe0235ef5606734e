// src/bin/codesweep.rs
use clap::Parser;
use codesweep_core::cli::{dispatch, Cli};
use std::process;

fn main() {
    let cli = Cli::parse();
    match dispatch::run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("ERROR: {e:#}");
            process::exit(1);
        }
    }
}
