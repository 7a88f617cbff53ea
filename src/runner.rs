//! The test driver.
//!
//! Each test case gets a fresh [`TestEnv`]; its body is invoked once per leaf
//! path of its section tree, framed by the test's own `enter:`/`leave:` lines
//! and followed by an empty line. Nothing but the traversal survives from one
//! run to the next.

use serde::Serialize;
use tracing::{debug, error, info};

use crate::env::{Fault, TestEnv};
use crate::errors::MuteError;
use crate::output::{writer, Output};
use crate::registry::{TestCase, TestRegistry};

/// What happened while driving one test case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TestSummary {
    pub name: String,
    pub runs: usize,
    pub passed: usize,
    pub failed: usize,
}

/// Totals over a whole registry.
#[derive(Debug, Default, Serialize)]
pub struct RunSummary {
    pub tests: Vec<TestSummary>,
    /// Tests the engine refused to finish, with the reason.
    pub rejected: Vec<(String, String)>,
}

impl RunSummary {
    pub fn total_runs(&self) -> usize {
        self.tests.iter().map(|t| t.runs).sum()
    }

    pub fn passed(&self) -> usize {
        self.tests.iter().map(|t| t.passed).sum()
    }

    pub fn failed(&self) -> usize {
        self.tests.iter().map(|t| t.failed).sum()
    }

    pub fn has_rejections(&self) -> bool {
        !self.rejected.is_empty()
    }
}

/// Runs `test` until every leaf path of its section tree has been visited.
///
/// An engine fault (section nesting too deep, unbalanced sections) is
/// reported as a `fatal:` line and stops the test after the run it occurred in.
pub fn run_test(test: &dyn TestCase, output: &mut dyn Output) -> Result<TestSummary, MuteError> {
    let location = test.location();
    let mut env = TestEnv::new(output);
    let mut runs = 0;

    while env.repeat() {
        runs += 1;
        debug!(test = test.name(), run = runs, "running test body");
        writer(env.output()).enter(location, test.kind(), test.name());

        if test.run(&mut env).is_err() {
            debug!(test = test.name(), run = runs, "test body aborted");
        }

        if let Some(Fault { location: at, error }) = env.take_fault() {
            writer(env.output()).fatal(at, &error);
            writer(env.output()).leave(location, test.kind(), test.name());
            writer(env.output()).write_newline();
            env.abandon();
            return Err(error);
        }

        writer(env.output()).leave(location, test.kind(), test.name());
        writer(env.output()).write_newline();
    }

    let tally = env.tally();
    Ok(TestSummary {
        name: test.name().to_string(),
        runs,
        passed: tally.passed,
        failed: tally.failed,
    })
}

/// Drives every registered test in registration order.
///
/// A rejected test does not stop the others. Whether the checks passed is
/// left to whoever reads the output.
pub fn run_all_tests(registry: &TestRegistry<'_>, output: &mut dyn Output) -> RunSummary {
    let mut summary = RunSummary::default();
    for test in registry.iter() {
        match run_test(test, output) {
            Ok(result) => summary.tests.push(result),
            Err(e) => {
                error!(test = test.name(), location = %test.location(), "test rejected: {e}");
                summary.rejected.push((test.name().to_string(), e.to_string()));
            }
        }
    }
    info!(
        tests = summary.tests.len(),
        runs = summary.total_runs(),
        passed = summary.passed(),
        failed = summary.failed(),
        "finished"
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::Outcome;
    use crate::output::OutputBuffer;
    use crate::registry::{Test, TestInfo};
    use crate::section::SectionKind;
    use crate::Location;

    const HERE: Location = Location::new("runner.rs", 1);

    fn two_levels(env: &mut TestEnv<'_>) -> Outcome {
        env.section(SectionKind::Given, "A", HERE, |env| {
            env.section(SectionKind::Then, "X", HERE, |_| Ok(()));
            env.section(SectionKind::Then, "Y", HERE, |_| Ok(()));
            Ok(())
        });
        env.section(SectionKind::Given, "B", HERE, |_| Ok(()));
        Ok(())
    }

    fn too_deep(env: &mut TestEnv<'_>) -> Outcome {
        fn nest(env: &mut TestEnv<'_>, depth: usize) -> Outcome {
            env.section(SectionKind::Section, "level", HERE, |env| nest(env, depth + 1));
            Ok(())
        }
        nest(env, 0)
    }

    #[test]
    fn run_count_equals_leaf_paths() {
        let test = Test::new(TestInfo::new(TestInfo::SCENARIO, "tree", "", HERE), two_levels);
        let mut out = OutputBuffer::new();
        let summary = run_test(&test, &mut out).unwrap();
        assert_eq!(summary.runs, 3);
        let blank_lines = out.lines().filter(|l| l.is_empty()).count();
        assert_eq!(blank_lines, 3);
    }

    #[test]
    fn overflow_rejects_only_that_test() {
        static DEEP: Test = Test::new(
            TestInfo::new(TestInfo::TEST_CASE, "deep", "", HERE),
            too_deep,
        );
        static TREE: Test = Test::new(
            TestInfo::new(TestInfo::SCENARIO, "tree", "", HERE),
            two_levels,
        );
        let mut registry = TestRegistry::new();
        registry.register(&DEEP).unwrap();
        registry.register(&TREE).unwrap();

        let mut out = OutputBuffer::new();
        let summary = run_all_tests(&registry, &mut out);
        assert_eq!(summary.rejected.len(), 1);
        assert_eq!(summary.rejected[0].0, "deep");
        assert_eq!(summary.tests.len(), 1);
        assert_eq!(summary.tests[0].runs, 3);
        assert!(out
            .as_str()
            .contains("runner.rs:1: fatal: section nesting exceeds maximum depth of 16\n"));
        let entered = out.lines().filter(|l| l.ends_with("enter: level")).count();
        assert_eq!(entered, crate::traversal::MAX_DEPTH);
        let left = out.lines().filter(|l| l.ends_with("leave: level")).count();
        assert_eq!(left, crate::traversal::MAX_DEPTH);
    }
}
