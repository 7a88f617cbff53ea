//! The Mute Command-Line Interface.
//!
//! This module is the main entry point for all CLI commands and orchestrates
//! the core library functions.

use std::fs::{self, File};
use std::io::{self, BufWriter, Read};
use std::path::Path;
use std::process;

use clap::Parser;
use tracing::{error, info, warn, Level};

use crate::cli::args::{Command, MuteArgs};
use crate::config::RunnerConfig;
use crate::errors::{MuteError, Result};
use crate::gold;
use crate::output::{IoSink, StdoutSink};
use crate::registry::TestRegistry;
use crate::report::Report;
use crate::runner::{run_all_tests, RunSummary};
use crate::selftest;

pub mod args;
pub mod output;

/// The main entry point for the CLI.
pub fn run() {
    let args = MuteArgs::parse();
    init_logging(args.verbose);

    let code = match dispatch(args) {
        Ok(code) => code,
        Err(e) => {
            error!(kind = %e.error_type(), "command failed");
            eprintln!("{:?}", miette::Report::new(e));
            1
        }
    };
    process::exit(code);
}

/// Logs go to stderr so they never mix with the protocol on stdout.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .finish();
    // A second initialisation only happens in tests; keep the first.
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn dispatch(args: MuteArgs) -> Result<i32> {
    let mut config = RunnerConfig::load_or_default(args.config.as_deref())?;
    if args.no_color {
        config.use_colors = false;
    }

    match args.command {
        Command::Run { output } => handle_run(output.as_deref()),
        Command::List => handle_list(),
        Command::Summarize { file, json } => handle_summarize(&file, json, &config),
        Command::Gold {
            update,
            gold_dir,
            output_dir,
        } => {
            if let Some(dir) = gold_dir {
                config.gold_dir = dir;
            }
            if let Some(dir) = output_dir {
                config.output_dir = dir;
            }
            handle_gold(update, &config)
        }
    }
}

fn builtin_registry() -> Result<TestRegistry<'static>> {
    let mut registry = TestRegistry::new();
    selftest::register(&mut registry)?;
    Ok(registry)
}

/// Handles the `run` subcommand.
///
/// The exit code does not reflect check results; only `summarize` judges them.
fn handle_run(path: Option<&Path>) -> Result<i32> {
    let registry = builtin_registry()?;
    info!(tests = registry.len(), "running built-in suite");

    let summary = match path {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| MuteError::io("create", parent, e))?;
            }
            let file = File::create(path).map_err(|e| MuteError::io("create", path, e))?;
            let mut sink = IoSink::new(BufWriter::new(file));
            let summary = run_all_tests(&registry, &mut sink);
            finish_sink(&mut sink, path)?;
            summary
        }
        None => {
            let mut sink = StdoutSink::default();
            let summary = run_all_tests(&registry, &mut sink);
            finish_sink(&mut sink, Path::new("<stdout>"))?;
            summary
        }
    };
    log_rejections(&summary);
    Ok(0)
}

fn finish_sink<W: io::Write>(sink: &mut IoSink<W>, path: &Path) -> Result<()> {
    if let Some(e) = sink.take_error() {
        return Err(MuteError::io("write", path, e));
    }
    sink.flush().map_err(|e| MuteError::io("flush", path, e))
}

fn log_rejections(summary: &RunSummary) {
    for (name, reason) in &summary.rejected {
        warn!(test = %name, "{reason}");
    }
}

/// Handles the `list` subcommand.
fn handle_list() -> Result<i32> {
    let registry = builtin_registry()?;
    output::print_tests(registry.iter()).map_err(|e| MuteError::io("write", "<stdout>", e))?;
    Ok(0)
}

/// Handles the `summarize` subcommand. Exits 1 when any test failed.
fn handle_summarize(path: &Path, json: bool, config: &RunnerConfig) -> Result<i32> {
    let text = if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .map_err(|e| MuteError::io("read", "<stdin>", e))?;
        text
    } else {
        fs::read_to_string(path).map_err(|e| MuteError::io("read", path, e))?
    };

    let report = Report::parse(&text);
    if report.unrecognized > 0 {
        info!(lines = report.unrecognized, "ignored lines outside the protocol");
    }
    if json {
        output::print_json(&report)?;
    } else {
        output::print_report(&report, config.color_choice())
            .map_err(|e| MuteError::io("write", "<stdout>", e))?;
    }
    Ok(if report.is_success() { 0 } else { 1 })
}

/// Handles the `gold` subcommand. Exits 1 on any mismatch or missing output.
fn handle_gold(update: bool, config: &RunnerConfig) -> Result<i32> {
    if update {
        let recorded = gold::update(&config.output_dir, &config.gold_dir)?;
        for path in &recorded {
            println!("recorded {}", path.display());
        }
        return Ok(0);
    }

    let comparisons = gold::compare_dir(&config.gold_dir, &config.output_dir)?;
    let mut mismatches = 0;
    for comparison in &comparisons {
        output::print_gold(comparison, config.color_choice())
            .map_err(|e| MuteError::io("write", "<stdout>", e))?;
        if !comparison.is_match() {
            mismatches += 1;
        }
    }
    println!(
        "{} gold files checked, {} mismatched",
        comparisons.len(),
        mismatches
    );
    Ok(if mismatches == 0 { 0 } else { 1 })
}
