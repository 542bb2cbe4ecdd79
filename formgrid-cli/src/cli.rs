//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "formgrid", version, about = "Inspect and export form builder schemas")]
pub struct Args {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the row and grid section layout of a saved form.
    Layout {
        /// Saved form: `{schema, widths}` or a flat field list.
        file: PathBuf,
    },
    /// Report validation issues; exits non-zero if any are found.
    Check { file: PathBuf },
    /// Re-derive the width table and write `form-schema.json`.
    Export {
        file: PathBuf,
        /// Output directory.
        #[arg(short, long, default_value = ".")]
        out: PathBuf,
        /// Write the schema even if validation fails.
        #[arg(long)]
        allow_invalid: bool,
    },
}
