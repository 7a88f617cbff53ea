//! Test predicates for `check_that`/`require_that`.
//!
//! A predicate evaluates a value, describes the expectation it encodes, and on
//! failure writes whatever detail helps explain the mismatch. The built-in
//! comparisons convert the checked value into the reference type before
//! comparing, so `check_that!(env, byte, gt(100i32))` compares as `i32`.

use std::fmt;

use crate::describe::Describe;

pub trait Predicate<V> {
    fn eval(&self, value: &V) -> bool;

    /// Writes `<expr> <expectation>`, e.g. `v > 124 (0x7c,'|')`.
    fn describe(&self, out: &mut dyn fmt::Write, expr: &str) -> fmt::Result;

    /// Writes the detail lines that follow a failed check.
    fn write_details(&self, out: &mut dyn fmt::Write, value: &V) -> fmt::Result;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

impl CompareOp {
    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
            CompareOp::Lt => "<",
            CompareOp::Gt => ">",
            CompareOp::Le => "<=",
            CompareOp::Ge => ">=",
        }
    }

    pub fn apply<T: PartialOrd + ?Sized>(self, lhs: &T, rhs: &T) -> bool {
        match self {
            CompareOp::Eq => lhs == rhs,
            CompareOp::Ne => lhs != rhs,
            CompareOp::Lt => lhs < rhs,
            CompareOp::Gt => lhs > rhs,
            CompareOp::Le => lhs <= rhs,
            CompareOp::Ge => lhs >= rhs,
        }
    }
}

/// Numeric comparison against a reference value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Compare<R> {
    pub op: CompareOp,
    pub reference: R,
}

impl<R, V> Predicate<V> for Compare<R>
where
    V: Copy + Into<R> + Describe,
    R: PartialOrd + Describe,
{
    fn eval(&self, value: &V) -> bool {
        let value: R = (*value).into();
        self.op.apply(&value, &self.reference)
    }

    fn describe(&self, out: &mut dyn fmt::Write, expr: &str) -> fmt::Result {
        write!(out, "{} {} ", expr, self.op.symbol())?;
        self.reference.describe(out)
    }

    fn write_details(&self, out: &mut dyn fmt::Write, value: &V) -> fmt::Result {
        out.write_str("    actual value: ")?;
        value.describe(out)?;
        out.write_str("\n")
    }
}

pub fn eq<R>(reference: R) -> Compare<R> {
    Compare { op: CompareOp::Eq, reference }
}

pub fn ne<R>(reference: R) -> Compare<R> {
    Compare { op: CompareOp::Ne, reference }
}

pub fn lt<R>(reference: R) -> Compare<R> {
    Compare { op: CompareOp::Lt, reference }
}

pub fn gt<R>(reference: R) -> Compare<R> {
    Compare { op: CompareOp::Gt, reference }
}

pub fn le<R>(reference: R) -> Compare<R> {
    Compare { op: CompareOp::Le, reference }
}

pub fn ge<R>(reference: R) -> Compare<R> {
    Compare { op: CompareOp::Ge, reference }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comparisons_convert_into_the_reference_type() {
        assert!(Predicate::<u8>::eval(&gt(100i32), &200u8));
        assert!(!Predicate::<i32>::eval(&gt(124i32), &123));
        assert!(Predicate::<i32>::eval(&le(123i32), &123));
        assert!(Predicate::<i16>::eval(&ne(0i64), &-3i16));
    }

    #[test]
    fn describe_and_details() {
        let pred = gt(124i32);
        let mut text = String::new();
        Predicate::<i32>::describe(&pred, &mut text, "v").unwrap();
        assert_eq!(text, "v > 124 (0x7c,'|')");

        let mut details = String::new();
        Predicate::<i32>::write_details(&pred, &mut details, &123).unwrap();
        assert_eq!(details, "    actual value: 123 (0x7b,'{')\n");
    }
}
