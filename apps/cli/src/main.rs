//! srcprint CLI — pretty-print source files into one document.
//!
//! Renders each input file with syntax highlighting under its own heading
//! and writes a single HTML (default) or LaTeX document.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli)
}
