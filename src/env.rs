//! The environment a test body runs in.
//!
//! A [`TestEnv`] is created by the driver for one test case and lent to every
//! run of its body. It carries the output sink, the section traversal, the
//! per-test pass/fail tally and the first engine fault raised during the
//! current run.

use tracing::debug;

use crate::errors::MuteError;
use crate::output::Output;
use crate::section::{Section, SectionKind};
use crate::traversal::Traversal;
use crate::Location;

/// Returned by a failed `require`: ends the innermost section body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Abort;

/// Result of a test or section body.
pub type Outcome = Result<(), Abort>;

/// Lets macro-generated bodies end either in `()` or in an [`Outcome`].
pub trait IntoOutcome {
    fn into_outcome(self) -> Outcome;
}

impl IntoOutcome for () {
    fn into_outcome(self) -> Outcome {
        Ok(())
    }
}

/// A body ending in a nested section or a check: its result is already reported.
impl IntoOutcome for bool {
    fn into_outcome(self) -> Outcome {
        Ok(())
    }
}

impl IntoOutcome for Outcome {
    fn into_outcome(self) -> Outcome {
        self
    }
}

/// An engine error together with where it was raised.
#[derive(Debug)]
pub struct Fault {
    pub location: Location,
    pub error: MuteError,
}

/// Check results accumulated over every run of one test.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub passed: usize,
    pub failed: usize,
}

impl Tally {
    pub fn record(&mut self, success: bool) {
        if success {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
    }
}

pub struct TestEnv<'o> {
    output: &'o mut dyn Output,
    traversal: Traversal,
    tally: Tally,
    fault: Option<Fault>,
}

impl<'o> TestEnv<'o> {
    pub fn new(output: &'o mut dyn Output) -> Self {
        Self {
            output,
            traversal: Traversal::new(),
            tally: Tally::default(),
            fault: None,
        }
    }

    pub fn output(&mut self) -> &mut (dyn Output + 'o) {
        &mut *self.output
    }

    /// Whether the body needs another run; see [`Traversal::repeat`].
    pub fn repeat(&mut self) -> bool {
        self.traversal.repeat()
    }

    pub fn depth(&self) -> usize {
        self.traversal.depth()
    }

    pub fn traversal(&self) -> &Traversal {
        &self.traversal
    }

    pub(crate) fn traversal_mut(&mut self) -> &mut Traversal {
        &mut self.traversal
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    pub(crate) fn tally_mut(&mut self) -> &mut Tally {
        &mut self.tally
    }

    /// Keeps the first fault of a run; later ones are usually consequences.
    pub(crate) fn record_fault(&mut self, location: Location, error: MuteError) {
        if self.fault.is_none() {
            self.fault = Some(Fault { location, error });
        }
    }

    pub fn take_fault(&mut self) -> Option<Fault> {
        self.fault.take()
    }

    /// Abandons the traversal, e.g. after a fault.
    pub fn abandon(&mut self) {
        self.traversal.reset();
    }

    /// Runs `body` if this section occurrence is the one selected for this run.
    ///
    /// An [`Abort`] from `body` stops only this body; the section still
    /// reports `leave:` and execution continues after it. Returns whether the
    /// section was entered.
    pub fn section<F>(
        &mut self,
        kind: SectionKind,
        name: &'static str,
        location: Location,
        body: F,
    ) -> bool
    where
        F: FnOnce(&mut TestEnv<'o>) -> Outcome,
    {
        let mut guard = Section::open(self, kind, name, location);
        let entered = guard.take();
        if entered && body(guard.env()).is_err() {
            debug!(section = name, %location, "section body aborted");
        }
        entered
    }

    #[track_caller]
    pub fn given<F>(&mut self, name: &'static str, body: F) -> bool
    where
        F: FnOnce(&mut TestEnv<'o>) -> Outcome,
    {
        self.section(SectionKind::Given, name, Location::caller(), body)
    }

    #[track_caller]
    pub fn when<F>(&mut self, name: &'static str, body: F) -> bool
    where
        F: FnOnce(&mut TestEnv<'o>) -> Outcome,
    {
        self.section(SectionKind::When, name, Location::caller(), body)
    }

    #[track_caller]
    pub fn then<F>(&mut self, name: &'static str, body: F) -> bool
    where
        F: FnOnce(&mut TestEnv<'o>) -> Outcome,
    {
        self.section(SectionKind::Then, name, Location::caller(), body)
    }
}
