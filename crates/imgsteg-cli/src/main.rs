use std::io::IsTerminal;

use clap::Parser;
use imgsteg_core::StegoError;

use crate::cli::*;

mod cli;
mod commands;
mod display;

pub type CliResult<T> = Result<T, StegoError>;

fn main() -> CliResult<()> {
    env_logger::init();

    let args = CliArgs::parse();
    let interactive = std::io::stdout().is_terminal();

    match args.command {
        Commands::Hide(args) => args.run(interactive),
        Commands::Unveil(args) => args.run(interactive),
        Commands::UnveilRaw(args) => args.run(),
        Commands::Compare(args) => args.run(interactive),
    }
}
