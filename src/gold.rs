//! Gold-file comparison.
//!
//! A gold directory holds the recorded output of test binaries. Each gold
//! file is compared with the file of the same name in an output directory,
//! ignoring blank lines; `update` records new gold files from outputs.

use std::fs;
use std::path::{Path, PathBuf};

use difference::{Changeset, Difference};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::errors::{MuteError, Result};

/// Extension of the files `update` records.
pub const OUTPUT_EXTENSION: &str = "output";

#[derive(Debug)]
pub enum GoldStatus {
    Match,
    Mismatch(Vec<Difference>),
    /// No output was produced for this gold file.
    Missing,
}

#[derive(Debug)]
pub struct GoldComparison {
    pub gold: PathBuf,
    pub output: PathBuf,
    pub status: GoldStatus,
}

impl GoldComparison {
    pub fn is_match(&self) -> bool {
        matches!(self.status, GoldStatus::Match)
    }
}

/// Drops blank lines, like `diff -B`.
fn significant_lines(text: &str) -> String {
    text.lines()
        .filter(|l| !l.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Compares two texts; `None` when they agree on every non-blank line.
pub fn compare_text(expected: &str, actual: &str) -> Option<Vec<Difference>> {
    let changeset = Changeset::new(
        &significant_lines(expected),
        &significant_lines(actual),
        "\n",
    );
    if changeset.distance == 0 {
        None
    } else {
        Some(changeset.diffs)
    }
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| MuteError::io("read", path, e))
}

fn is_output_file(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_file()
        && entry
            .path()
            .extension()
            .map_or(false, |ext| ext == OUTPUT_EXTENSION)
}

/// Every `*.output` file under `dir`, sorted.
fn output_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry?;
        if is_output_file(&entry) {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

/// Compares every `*.output` file under `gold_dir` with the file at the same
/// relative path under `output_dir`.
///
/// Files are visited in sorted order so reports are stable. Other files in
/// the gold directory (READMEs, `.gitkeep`) are ignored.
pub fn compare_dir(gold_dir: &Path, output_dir: &Path) -> Result<Vec<GoldComparison>> {
    let gold_files = output_files(gold_dir)?;

    let mut comparisons = Vec::with_capacity(gold_files.len());
    for gold in gold_files {
        let relative = gold.strip_prefix(gold_dir).unwrap_or(&gold).to_path_buf();
        let output = output_dir.join(relative);
        debug!(gold = %gold.display(), output = %output.display(), "comparing");

        let status = if !output.is_file() {
            GoldStatus::Missing
        } else {
            match compare_text(&read(&gold)?, &read(&output)?) {
                None => GoldStatus::Match,
                Some(diffs) => GoldStatus::Mismatch(diffs),
            }
        };
        comparisons.push(GoldComparison {
            gold,
            output,
            status,
        });
    }
    Ok(comparisons)
}

/// Copies every `*.output` file under `output_dir` into `gold_dir`, keeping
/// its path relative to `output_dir` so `compare_dir` finds it again.
pub fn update(output_dir: &Path, gold_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(gold_dir).map_err(|e| MuteError::io("create", gold_dir, e))?;
    let mut recorded = Vec::new();
    for path in output_files(output_dir)? {
        let relative = path.strip_prefix(output_dir).unwrap_or(&path);
        let target = gold_dir.join(relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|e| MuteError::io("create", parent, e))?;
        }
        fs::copy(&path, &target).map_err(|e| MuteError::io("copy", &path, e))?;
        info!(gold = %target.display(), "recorded gold file");
        recorded.push(target);
    }
    Ok(recorded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_ignored() {
        assert!(compare_text("a\n\nb\n", "a\nb").is_none());
        assert!(compare_text("a\nb\n\n\n", "\na\n\nb\n").is_none());
    }

    #[test]
    fn changed_lines_are_reported() {
        let diffs = compare_text("a\nb\nc", "a\nx\nc").expect("texts differ");
        assert!(diffs
            .iter()
            .any(|d| matches!(d, Difference::Rem(s) if s == "b")));
        assert!(diffs
            .iter()
            .any(|d| matches!(d, Difference::Add(s) if s == "x")));
    }

    /// A scratch directory removed on drop.
    struct Scratch(PathBuf);

    impl Scratch {
        fn new(name: &str) -> Self {
            let dir = std::env::temp_dir().join(format!("mute-gold-{}-{name}", std::process::id()));
            let _ = fs::remove_dir_all(&dir);
            fs::create_dir_all(&dir).unwrap();
            Scratch(dir)
        }
    }

    impl Drop for Scratch {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.0);
        }
    }

    fn write(path: &Path, text: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }

    #[test]
    fn recorded_nested_outputs_match_their_sources() {
        let scratch = Scratch::new("nested");
        let out = scratch.0.join("out");
        let gold = scratch.0.join("gold");
        write(&out.join("sub/a.output"), "a.rs:1: enter: a\n");
        write(&out.join("b.output"), "b.rs:1: enter: b\n");

        let recorded = update(&out, &gold).unwrap();
        assert_eq!(recorded, [gold.join("b.output"), gold.join("sub/a.output")]);

        let comparisons = compare_dir(&gold, &out).unwrap();
        assert_eq!(comparisons.len(), 2);
        assert!(comparisons.iter().all(GoldComparison::is_match));
        assert_eq!(comparisons[1].output, out.join("sub/a.output"));
    }

    #[test]
    fn gold_without_output_is_missing() {
        let scratch = Scratch::new("missing");
        let out = scratch.0.join("out");
        let gold = scratch.0.join("gold");
        fs::create_dir_all(&out).unwrap();
        write(&gold.join("gone.output"), "x\n");

        let comparisons = compare_dir(&gold, &out).unwrap();
        assert_eq!(comparisons.len(), 1);
        assert!(matches!(comparisons[0].status, GoldStatus::Missing));
        assert!(!comparisons[0].is_match());
    }

    #[test]
    fn non_output_files_in_gold_dir_are_ignored() {
        let scratch = Scratch::new("stray");
        let out = scratch.0.join("out");
        let gold = scratch.0.join("gold");
        write(&out.join("a.output"), "x\n");
        write(&gold.join("a.output"), "x\n");
        write(&gold.join("README.md"), "recorded outputs\n");
        write(&gold.join(".gitkeep"), "");

        let comparisons = compare_dir(&gold, &out).unwrap();
        assert_eq!(comparisons.len(), 1);
        assert!(comparisons[0].is_match());
    }
}
