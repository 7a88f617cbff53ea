//! # Section traversal
//!
//! A test body is a tree of mutually exclusive sections, but that tree is
//! never declared: it only exists as nested code. [`Traversal`] discovers it
//! one path at a time. Each run of the body enters exactly one section per
//! level along one root-to-leaf path; between runs, [`Traversal::repeat`]
//! picks the next path by advancing the deepest level that still has
//! unvisited siblings along the path just taken, and forgets everything below
//! it. Paths are therefore visited depth first, in source order, and every
//! leaf path is visited exactly once.
//!
//! Per-level state lives in two fixed arrays indexed by depth:
//!
//! - `target[d]`: how many siblings at depth `d` to skip before entering one.
//!   Persists across runs; reset for levels below the one `repeat` advances.
//! - `count[d]`: how many siblings at depth `d` have been seen so far in the
//!   current run. Rebuilt from zero by every run.
//!
//! `enter_section` bumps both the target and the count of the current level;
//! a section is entered when the two agree, i.e. when it is the
//! `target[d] + 1`-th sibling seen. `leave_section` takes the temporary bump
//! back off the target, leaving the count to accumulate.

use tracing::trace;

use crate::errors::{MuteError, Result};

/// Deepest section nesting a test may use.
pub const MAX_DEPTH: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Traversal {
    tracking: bool,
    depth: usize,
    target: [usize; MAX_DEPTH],
    count: [usize; MAX_DEPTH],
}

impl Default for Traversal {
    fn default() -> Self {
        Self::new()
    }
}

impl Traversal {
    pub const fn new() -> Self {
        Self {
            tracking: false,
            depth: 0,
            target: [0; MAX_DEPTH],
            count: [0; MAX_DEPTH],
        }
    }

    /// Registers a section occurrence at the current depth and descends into it.
    ///
    /// Returns whether that occurrence is the one to enter on this run. The
    /// depth is incremented either way and must be restored with
    /// [`leave_section`](Self::leave_section).
    pub fn enter_section(&mut self) -> Result<bool> {
        let d = self.depth;
        if d >= MAX_DEPTH {
            return Err(MuteError::DepthOverflow { max: MAX_DEPTH });
        }
        self.target[d] += 1;
        self.count[d] += 1;
        let entered = self.target[d] == self.count[d];
        self.depth += 1;
        Ok(entered)
    }

    pub fn leave_section(&mut self) -> Result<()> {
        if self.depth == 0 {
            return Err(MuteError::DepthUnderflow);
        }
        self.depth -= 1;
        self.target[self.depth] -= 1;
        Ok(())
    }

    /// Decides whether the test body must run again.
    ///
    /// The first call always starts a run, even for a body without sections.
    pub fn repeat(&mut self) -> bool {
        if !self.tracking {
            self.reset();
            self.tracking = true;
            return true;
        }

        let advanced = (0..MAX_DEPTH)
            .rev()
            .find(|&i| self.target[i] + 1 < self.count[i]);
        if let Some(i) = advanced {
            self.target[i] += 1;
            self.target[i + 1..].fill(0);
            trace!(depth = i, target = self.target[i], "advancing to next sibling");
        }
        self.count = [0; MAX_DEPTH];
        self.depth = 0;

        if advanced.is_some() {
            return true;
        }
        self.tracking = false;
        false
    }

    /// Abandons any traversal in progress.
    pub fn reset(&mut self) {
        self.tracking = false;
        self.depth = 0;
        self.target = [0; MAX_DEPTH];
        self.count = [0; MAX_DEPTH];
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    pub fn target(&self, depth: usize) -> usize {
        self.target[depth]
    }

    pub fn sibling_count(&self, depth: usize) -> usize {
        self.count[depth]
    }
}
