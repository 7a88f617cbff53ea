//! Checks and requirements.
//!
//! Every check writes one `passed:`/`failed:` line and returns its outcome;
//! a failed check never stops the test. The `require` variants turn a failure
//! into an [`Abort`] so the caller can leave the innermost section body with
//! `?`.

use crate::env::{Abort, Outcome, TestEnv};
use crate::output::writer;
use crate::predicates::Predicate;
use crate::Location;

impl<'o> TestEnv<'o> {
    /// Checks a boolean condition, reported as `<expr> == true`.
    pub fn check(&mut self, location: Location, expr: &str, condition: bool) -> bool {
        let mut w = writer(self.output());
        w.report_prefix(location, condition);
        w.write_str(expr);
        w.write_str(" == true\n");
        self.tally_mut().record(condition);
        condition
    }

    /// Checks `value` against `predicate`, writing the predicate's details on failure.
    pub fn check_that<V, P>(&mut self, location: Location, expr: &str, value: V, predicate: P) -> bool
    where
        P: Predicate<V>,
    {
        let success = predicate.eval(&value);
        let mut w = writer(self.output());
        w.report_prefix(location, success);
        // best effort: a value that fails to render leaves a truncated line
        let _ = predicate.describe(&mut w, expr);
        w.write_newline();
        if !success {
            let _ = predicate.write_details(&mut w, &value);
        }
        self.tally_mut().record(success);
        success
    }

    pub fn require(&mut self, location: Location, expr: &str, condition: bool) -> Outcome {
        if self.check(location, expr, condition) {
            Ok(())
        } else {
            Err(Abort)
        }
    }

    pub fn require_that<V, P>(
        &mut self,
        location: Location,
        expr: &str,
        value: V,
        predicate: P,
    ) -> Outcome
    where
        P: Predicate<V>,
    {
        if self.check_that(location, expr, value, predicate) {
            Ok(())
        } else {
            Err(Abort)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputBuffer;
    use crate::predicates::{gt, lt};

    const HERE: Location = Location::new("test/test_mute.rs", 8);

    #[test]
    fn boolean_checks() {
        let mut out = OutputBuffer::new();
        let mut env = TestEnv::new(&mut out);
        assert!(env.check(HERE, "v", true));
        assert!(!env.check(HERE, "false", false));
        assert_eq!(env.tally().passed, 1);
        assert_eq!(env.tally().failed, 1);
        drop(env);
        assert_eq!(
            out.as_str(),
            "test/test_mute.rs:8: passed: v == true\n\
             test/test_mute.rs:8: failed: expected false == true\n"
        );
    }

    #[test]
    fn predicate_failure_writes_actual_value() {
        let mut out = OutputBuffer::new();
        let mut env = TestEnv::new(&mut out);
        assert!(!env.check_that(HERE, "v", 123i32, gt(124i32)));
        assert!(env.check_that(HERE, "v", 123i32, lt(124i32)));
        drop(env);
        assert_eq!(
            out.as_str(),
            "test/test_mute.rs:8: failed: expected v > 124 (0x7c,'|')\n    \
             actual value: 123 (0x7b,'{')\n\
             test/test_mute.rs:8: passed: v < 124 (0x7c,'|')\n"
        );
    }

    #[test]
    fn require_maps_failure_to_abort() {
        let mut out = OutputBuffer::new();
        let mut env = TestEnv::new(&mut out);
        assert_eq!(env.require(HERE, "true", true), Ok(()));
        assert_eq!(env.require(HERE, "false", false), Err(Abort));
        assert_eq!(env.require_that(HERE, "v", 5u8, lt(3u8)), Err(Abort));
    }
}
