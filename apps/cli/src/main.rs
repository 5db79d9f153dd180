//! tocgen CLI: keep a README's table of contents in sync with numbered
//! notebooks, Markdown files, and annotated scripts.
//!
//! Running `tocgen` with no arguments updates `README.md` in the current
//! directory.

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
