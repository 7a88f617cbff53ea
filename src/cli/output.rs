//! Handles all user-facing output for the CLI.
//!
//! This module is responsible for colorizing summaries, printing gold-file
//! diffs and emitting JSON. The line protocol itself is written by the
//! engine's own sinks; nothing here is parsed by other tools.

use std::io::{self, Write};

use difference::Difference;
use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::gold::{GoldComparison, GoldStatus};
use crate::registry::TestCase;
use crate::report::Report;

// ============================================================================
// CORE OUTPUT FUNCTIONS: User-facing CLI output utilities
// ============================================================================

/// Prints one line per test with its verdict, the failures, and totals.
pub fn print_report(report: &Report, choice: ColorChoice) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(choice);

    for test in &report.tests {
        let (verdict, color) = if test.is_success() {
            ("PASS", Color::Green)
        } else {
            ("FAIL", Color::Red)
        };
        stdout.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        write!(stdout, "{verdict}")?;
        stdout.reset()?;
        writeln!(
            stdout,
            ": {} [{}:{}] ({} runs, {} passed, {} failed)",
            test.label,
            test.source.file,
            test.source.line,
            test.runs,
            test.passed,
            test.failed()
        )?;

        if let Some(fatal) = &test.fatal {
            writeln!(stdout, "  fatal: {fatal}")?;
        }
        for failure in &test.failures {
            writeln!(
                stdout,
                "  {}:{}: expected {}",
                failure.source.file, failure.source.line, failure.expectation
            )?;
            if !failure.path.is_empty() {
                writeln!(stdout, "    in: {}", failure.path.join(" / "))?;
            }
            for detail in &failure.details {
                writeln!(stdout, "    {detail}")?;
            }
        }
    }

    writeln!(
        stdout,
        "\nSummary: {} tests, {} runs, {} passed, {} failed",
        report.tests.len(),
        report.runs(),
        report.passed(),
        report.failed()
    )?;
    if report.unbalanced > 0 {
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
        writeln!(stdout, "warning: {} unbalanced enter/leave lines", report.unbalanced)?;
        stdout.reset()?;
    }
    Ok(())
}

/// Prints a gold comparison, with a colored diff for mismatches.
pub fn print_gold(comparison: &GoldComparison, choice: ColorChoice) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(choice);
    writeln!(
        stdout,
        "Checking '{}' against gold file ...",
        comparison.output.display()
    )?;
    match &comparison.status {
        GoldStatus::Match => Ok(()),
        GoldStatus::Missing => {
            stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
            writeln!(stdout, "missing output for '{}'", comparison.gold.display())?;
            stdout.reset()
        }
        GoldStatus::Mismatch(diffs) => print_diff(&mut stdout, diffs),
    }
}

/// Lists test descriptors: location, kind/name and flags.
pub fn print_tests<'t>(tests: impl Iterator<Item = &'t dyn TestCase>) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    for test in tests {
        writeln!(
            stdout,
            "{}: {}{} {}",
            test.location(),
            test.kind(),
            test.name(),
            test.flags()
        )?;
    }
    Ok(())
}

pub fn print_json<T: Serialize>(value: &T) -> crate::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

// ============================================================================
// PRIVATE HELPERS
// ============================================================================

fn print_diff(stdout: &mut StandardStream, diffs: &[Difference]) -> io::Result<()> {
    for diff in diffs {
        match diff {
            Difference::Same(x) => {
                stdout.reset()?;
                for line in x.lines() {
                    writeln!(stdout, " {line}")?;
                }
            }
            Difference::Add(x) => {
                stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
                for line in x.lines() {
                    writeln!(stdout, "+{line}")?;
                }
            }
            Difference::Rem(x) => {
                stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
                for line in x.lines() {
                    writeln!(stdout, "-{line}")?;
                }
            }
        }
    }
    stdout.reset()
}
