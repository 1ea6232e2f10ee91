//! Command-line interface for the fetch console.

use std::path::PathBuf;

use clap::Parser;

use crate::config::LogSetting;

/// Submit a query snippet to the extraction service and stream its progress.
#[derive(Parser, Debug)]
#[command(name = "fetch-console")]
pub(crate) struct Cli {
    /// File holding the query snippet (`-` reads stdin). Defaults to the
    /// built-in request template.
    #[arg(long, value_name = "PATH")]
    pub(crate) query_file: Option<PathBuf>,
    /// Fetch endpoint, overriding the config file.
    #[arg(long, value_name = "URL")]
    pub(crate) endpoint: Option<String>,
    /// Config file (RON). Defaults to `fetch_console.ron` when present.
    #[arg(long, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,
    /// Where diagnostic logs go.
    #[arg(long, value_enum)]
    pub(crate) log: Option<LogSetting>,
    /// Prints the request template and exits.
    #[arg(long)]
    pub(crate) print_template: bool,
}
