//! readme-indexer CLI — regenerate the notes list and article tables of a README.
//!
//! Both runs take no required arguments and work from the current directory.

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
