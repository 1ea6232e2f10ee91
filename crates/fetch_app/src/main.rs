mod app;
mod cli;
mod config;
mod render;
mod runner;

use std::process::ExitCode;

use clap::Parser;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    match app::run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("fetch-console: {err:#}");
            ExitCode::FAILURE
        }
    }
}
