use std::path::PathBuf;

use clap::Parser;

/// pagehost: shows a bundled web page inside a native window and keeps it in
/// step with the desktop theme.
#[derive(Parser, Debug)]
#[command(name = "pagehost", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log filter directive override (e.g. `pagehost=debug`).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Directory holding the bundled page, overriding `page.assets_dir`.
    #[arg(long)]
    pub assets: Option<PathBuf>,
}

pub fn parse() -> Args {
    Args::parse()
}
