//! # Result interpreter
//!
//! The engine never decides whether a test passed; it only writes lines.
//! This module reads those lines back: [`parse_line`] recognises one protocol
//! line, and [`Report`] folds a whole output into per-test totals. A test is
//! identified by its top-level `enter:` line; consecutive runs of the same
//! test are merged into one entry.
//!
//! Lines that are not part of the protocol are counted, not rejected, so a
//! report can be built from output interleaved with other program output.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref EVENT_LINE: Regex =
        Regex::new(r"^(?P<file>.+?):(?P<line>\d+): (?P<tag>enter|leave|passed|failed|fatal): (?P<rest>.*)$")
            .expect("event line pattern is valid");
}

const DETAIL_INDENT: &str = "    ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceRef {
    pub file: String,
    pub line: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "lowercase")]
pub enum EventKind {
    Enter { label: String },
    Leave { label: String },
    Passed { expectation: String },
    Failed { expectation: String },
    Fatal { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub source: SourceRef,
    #[serde(flatten)]
    pub kind: EventKind,
}

/// Parses one protocol line; `None` for anything else (including detail lines).
pub fn parse_line(line: &str) -> Option<Event> {
    let caps = EVENT_LINE.captures(line)?;
    let source = SourceRef {
        file: caps["file"].to_string(),
        line: caps["line"].parse().ok()?,
    };
    let rest = caps["rest"].to_string();
    let kind = match &caps["tag"] {
        "enter" => EventKind::Enter { label: rest },
        "leave" => EventKind::Leave { label: rest },
        "passed" => EventKind::Passed { expectation: rest },
        "failed" => EventKind::Failed {
            expectation: rest.strip_prefix("expected ").unwrap_or(&rest).to_string(),
        },
        "fatal" => EventKind::Fatal { message: rest },
        _ => return None,
    };
    Some(Event { source, kind })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub source: SourceRef,
    pub expectation: String,
    /// Indented lines that followed the failure, without the indent.
    pub details: Vec<String>,
    /// Section labels from the test down to the failing check.
    pub path: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TestReport {
    pub label: String,
    pub source: SourceRef,
    pub runs: usize,
    pub passed: usize,
    pub failures: Vec<Failure>,
    pub fatal: Option<String>,
}

impl TestReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && self.fatal.is_none()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub tests: Vec<TestReport>,
    /// Non-empty lines that were neither events nor failure details.
    pub unrecognized: usize,
    /// Enter/leave lines that did not pair up.
    pub unbalanced: usize,
}

impl Report {
    pub fn parse(text: &str) -> Self {
        Self::from_lines(text.lines())
    }

    pub fn from_lines<'a, I>(lines: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut report = Report::default();
        // labels of the enter lines not yet left; stack[0] is the test
        let mut stack: Vec<String> = Vec::new();
        let mut last_was_failure = false;

        for line in lines {
            if line.trim().is_empty() {
                last_was_failure = false;
                continue;
            }
            if let Some(detail) = line.strip_prefix(DETAIL_INDENT) {
                match report.last_failure_mut() {
                    Some(failure) if last_was_failure => failure.details.push(detail.to_string()),
                    _ => report.unrecognized += 1,
                }
                continue;
            }
            let Some(event) = parse_line(line) else {
                report.unrecognized += 1;
                last_was_failure = false;
                continue;
            };
            last_was_failure = false;

            match event.kind {
                EventKind::Enter { label } => {
                    if stack.is_empty() {
                        report.begin_run(&label, event.source);
                    }
                    stack.push(label);
                }
                EventKind::Leave { label } => match stack.last() {
                    Some(open) if *open == label => {
                        stack.pop();
                    }
                    _ => report.unbalanced += 1,
                },
                EventKind::Passed { .. } => {
                    if let Some(test) = report.current_mut(&stack) {
                        test.passed += 1;
                    } else {
                        report.unrecognized += 1;
                    }
                }
                EventKind::Failed { expectation } => {
                    let path = stack.iter().skip(1).cloned().collect();
                    if let Some(test) = report.current_mut(&stack) {
                        test.failures.push(Failure {
                            source: event.source,
                            expectation,
                            details: Vec::new(),
                            path,
                        });
                        last_was_failure = true;
                    } else {
                        report.unrecognized += 1;
                    }
                }
                EventKind::Fatal { message } => {
                    if let Some(test) = report.current_mut(&stack) {
                        test.fatal.get_or_insert(message);
                    } else {
                        report.unrecognized += 1;
                    }
                }
            }
        }
        report.unbalanced += stack.len();
        report
    }

    pub fn passed(&self) -> usize {
        self.tests.iter().map(|t| t.passed).sum()
    }

    pub fn failed(&self) -> usize {
        self.tests.iter().map(TestReport::failed).sum()
    }

    pub fn runs(&self) -> usize {
        self.tests.iter().map(|t| t.runs).sum()
    }

    pub fn is_success(&self) -> bool {
        self.tests.iter().all(TestReport::is_success)
    }

    fn begin_run(&mut self, label: &str, source: SourceRef) {
        match self.tests.last_mut() {
            Some(test) if test.label == label && test.source == source => test.runs += 1,
            _ => self.tests.push(TestReport {
                label: label.to_string(),
                source,
                runs: 1,
                passed: 0,
                failures: Vec::new(),
                fatal: None,
            }),
        }
    }

    fn current_mut(&mut self, stack: &[String]) -> Option<&mut TestReport> {
        if stack.is_empty() {
            return None;
        }
        self.tests.last_mut()
    }

    fn last_failure_mut(&mut self) -> Option<&mut Failure> {
        self.tests.last_mut()?.failures.last_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_event_lines() {
        let event = parse_line("src/a.rs:17: failed: expected v > 124 (0x7c,'|')").unwrap();
        assert_eq!(event.source, SourceRef { file: "src/a.rs".into(), line: 17 });
        assert_eq!(
            event.kind,
            EventKind::Failed { expectation: "v > 124 (0x7c,'|')".into() }
        );

        let event = parse_line("C:/work/a.rs:3: enter: given x").unwrap();
        assert_eq!(event.source.file, "C:/work/a.rs");
        assert_eq!(event.kind, EventKind::Enter { label: "given x".into() });

        assert!(parse_line("    actual value: 1 (0x01)").is_none());
        assert!(parse_line("hello").is_none());
    }

    #[test]
    fn folds_runs_and_failures() {
        let text = "\
t.rs:1: enter: Scenario: s
t.rs:2: passed: v == true
t.rs:3: enter: given a
t.rs:4: failed: expected v > 1 (0x01)
    actual value: 0 (0x00)
t.rs:3: leave: given a
t.rs:1: leave: Scenario: s

t.rs:1: enter: Scenario: s
t.rs:2: passed: v == true
t.rs:5: enter: given b
t.rs:5: leave: given b
t.rs:1: leave: Scenario: s

stray output
";
        let report = Report::parse(text);
        assert_eq!(report.tests.len(), 1);
        let test = &report.tests[0];
        assert_eq!(test.label, "Scenario: s");
        assert_eq!(test.runs, 2);
        assert_eq!(test.passed, 2);
        assert_eq!(test.failed(), 1);
        assert_eq!(test.failures[0].details, ["actual value: 0 (0x00)"]);
        assert_eq!(test.failures[0].path, ["given a"]);
        assert_eq!(report.unrecognized, 1);
        assert_eq!(report.unbalanced, 0);
        assert!(!report.is_success());
    }

    #[test]
    fn fatal_marks_the_test() {
        let text = "\
t.rs:1: enter: deep
t.rs:9: fatal: section nesting exceeds maximum depth of 16
t.rs:1: leave: deep
";
        let report = Report::parse(text);
        assert_eq!(
            report.tests[0].fatal.as_deref(),
            Some("section nesting exceeds maximum depth of 16")
        );
        assert!(!report.is_success());
    }

    #[test]
    fn unbalanced_lines_are_counted() {
        let report = Report::parse("t.rs:1: enter: a\nt.rs:2: leave: b\n");
        assert_eq!(report.unbalanced, 2);
    }
}
