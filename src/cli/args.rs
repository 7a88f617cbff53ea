//! Defines the command-line arguments and subcommands for the Mute CLI.
//!
//! This module uses the `clap` crate with its "derive" feature to create a
//! declarative and type-safe argument parsing structure.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "mute",
    version,
    about = "Micro unit testing engine: run the built-in suite, interpret outputs, check gold files."
)]
pub struct MuteArgs {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace). Logs go to stderr.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// YAML configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the built-in suite and write the line protocol.
    Run {
        /// Write to this file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the tests of the built-in suite.
    List,
    /// Interpret a protocol output and summarise pass/fail per test.
    Summarize {
        /// The output to read; `-` reads stdin.
        #[arg(default_value = "-")]
        file: PathBuf,
        /// Print the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Compare recorded gold files with produced outputs.
    Gold {
        /// Record outputs as the new gold files instead of comparing.
        #[arg(long)]
        update: bool,
        /// Overrides the configured gold directory.
        #[arg(long)]
        gold_dir: Option<PathBuf>,
        /// Overrides the configured output directory.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
}
