//! Formgrid - inspect, check, and export saved form layouts.

mod cli;
mod commands;
mod logging;
mod render;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Args, Command};

fn main() -> Result<()> {
    let args = Args::parse();
    logging::setup_logging(args.verbose);

    match args.command {
        Command::Layout { file } => commands::layout(&file),
        Command::Check { file } => commands::check(&file),
        Command::Export {
            file,
            out,
            allow_invalid,
        } => commands::export(&file, &out, allow_invalid),
    }
}
