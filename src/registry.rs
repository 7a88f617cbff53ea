//! # Mute: Test Registry
//!
//! Test descriptors are plain `static` items (see the `scenario!` and
//! `test_case!` macros); nothing registers itself. A runner builds one
//! [`TestRegistry`] at its entry point, registers every descriptor it wants to
//! run, and hands the registry to the driver. Registration order is execution
//! order.

use std::fmt;

use crate::env::{Outcome, TestEnv};
use crate::errors::{MuteError, Result};
use crate::Location;

/// Entry point of a test body.
pub type TestFn = fn(&mut TestEnv<'_>) -> Outcome;

/// The capabilities the driver needs from a test descriptor.
pub trait TestCase {
    /// Printed in front of the name, e.g. `"Scenario: "`.
    fn kind(&self) -> &str;
    fn name(&self) -> &str;
    fn flags(&self) -> &str;
    fn location(&self) -> Location;
    fn run(&self, env: &mut TestEnv<'_>) -> Outcome;
}

/// Identification of a test: kind prefix, name, tag flags and definition site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestInfo {
    pub kind: &'static str,
    pub name: &'static str,
    pub flags: &'static str,
    pub location: Location,
}

impl TestInfo {
    pub const SCENARIO: &'static str = "Scenario: ";
    pub const TEST_CASE: &'static str = "";

    pub const fn new(
        kind: &'static str,
        name: &'static str,
        flags: &'static str,
        location: Location,
    ) -> Self {
        Self {
            kind,
            name,
            flags,
            location,
        }
    }
}

/// A test descriptor backed by a function pointer; `const`-constructible.
#[derive(Clone, Copy)]
pub struct Test {
    pub info: TestInfo,
    pub body: TestFn,
}

impl Test {
    pub const fn new(info: TestInfo, body: TestFn) -> Self {
        Self { info, body }
    }
}

impl fmt::Debug for Test {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Test").field("info", &self.info).finish_non_exhaustive()
    }
}

impl TestCase for Test {
    fn kind(&self) -> &str {
        self.info.kind
    }

    fn name(&self) -> &str {
        self.info.name
    }

    fn flags(&self) -> &str {
        self.info.flags
    }

    fn location(&self) -> Location {
        self.info.location
    }

    fn run(&self, env: &mut TestEnv<'_>) -> Outcome {
        (self.body)(env)
    }
}

/// Ordered collection of the tests a runner will drive.
#[derive(Default)]
pub struct TestRegistry<'t> {
    tests: Vec<&'t dyn TestCase>,
}

impl<'t> TestRegistry<'t> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `test`; the same name at the same location may only be registered once.
    pub fn register(&mut self, test: &'t dyn TestCase) -> Result<()> {
        let duplicate = self
            .tests
            .iter()
            .any(|t| t.name() == test.name() && t.location() == test.location());
        if duplicate {
            return Err(MuteError::DuplicateTest {
                name: test.name().to_string(),
                location: test.location(),
            });
        }
        self.tests.push(test);
        Ok(())
    }

    pub fn register_all<I>(&mut self, tests: I) -> Result<()>
    where
        I: IntoIterator<Item = &'t dyn TestCase>,
    {
        tests.into_iter().try_for_each(|t| self.register(t))
    }

    pub fn iter(&self) -> impl Iterator<Item = &'t dyn TestCase> + '_ {
        self.tests.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }
}
