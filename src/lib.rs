//! # Mute: Micro Unit Testing Engine
//!
//! A test framework for code that must be tested where it runs: no
//! unwinding, no heap allocation on the path from a check to its output line,
//! bounded stack. Tests are written in a BDD style with nested, mutually
//! exclusive sections; the engine re-runs each test body once per leaf path of
//! its section tree, discovering the tree as it goes. Progress is written as a
//! plain line protocol for an external tool to interpret (see [`report`]).

pub use crate::env::{Abort, IntoOutcome, Outcome, TestEnv};
pub use crate::errors::{MuteError, Result};
pub use crate::location::Location;
pub use crate::output::{NullSink, Output, OutputBuffer, StdoutSink};
pub use crate::registry::{Test, TestCase, TestInfo, TestRegistry};
pub use crate::runner::{run_all_tests, run_test, RunSummary, TestSummary};
pub use crate::section::{Section, SectionKind};

pub mod assertions;
pub mod cli;
pub mod config;
pub mod describe;
pub mod env;
pub mod errors;
pub mod gold;
pub mod location;
mod macros;
pub mod output;
pub mod predicates;
pub mod registry;
pub mod report;
pub mod runner;
pub mod section;
pub mod selftest;
pub mod traversal;
