//! The BDD-style surface: test declarations, sections and checks.
//!
//! ```rust
//! use mute::predicates::lt;
//!
//! mute::scenario! {
//!     static STACK_SCENARIO: "a stack", "[containers]" => |env| {
//!         let mut stack = vec![1, 2];
//!         mute::check!(env, stack.len() == 2);
//!         mute::given!(env, "an element is pushed", {
//!             stack.push(3);
//!             mute::then!(env, "the length grows", {
//!                 mute::require_that!(env, stack.len(), lt(4usize));
//!                 mute::check!(env, stack[2] == 3);
//!             });
//!         });
//!     }
//! }
//!
//! let mut registry = mute::TestRegistry::new();
//! registry.register(&STACK_SCENARIO).unwrap();
//! let mut out = mute::OutputBuffer::new();
//! mute::run_all_tests(&registry, &mut out);
//! assert!(out.as_str().contains("enter: then the length grows"));
//! ```
//!
//! Bodies may end in `()`, in an [`Outcome`](crate::Outcome), or in a
//! section or check without a trailing `;`. `require!` and `require_that!`
//! leave the innermost enclosing section body on failure.

/// The location of the macro invocation.
#[macro_export]
macro_rules! here {
    () => {
        $crate::Location::new(file!(), line!())
    };
}

/// Declares a `static` scenario descriptor, reported as `Scenario: <name>`.
#[macro_export]
macro_rules! scenario {
    ($(#[$meta:meta])* $vis:vis static $id:ident : $name:literal, $flags:literal => |$env:ident| $body:block) => {
        $crate::__mute_test!($(#[$meta])* $vis $id, $crate::TestInfo::SCENARIO, $name, $flags, $env, $body);
    };
}

/// Declares a `static` test case descriptor, reported by its bare name.
#[macro_export]
macro_rules! test_case {
    ($(#[$meta:meta])* $vis:vis static $id:ident : $name:literal, $flags:literal => |$env:ident| $body:block) => {
        $crate::__mute_test!($(#[$meta])* $vis $id, $crate::TestInfo::TEST_CASE, $name, $flags, $env, $body);
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __mute_test {
    ($(#[$meta:meta])* $vis:vis $id:ident, $kind:expr, $name:literal, $flags:literal, $env:ident, $body:block) => {
        $(#[$meta])*
        $vis static $id: $crate::Test = $crate::Test::new(
            $crate::TestInfo::new($kind, $name, $flags, $crate::here!()),
            {
                fn body($env: &mut $crate::TestEnv<'_>) -> $crate::Outcome {
                    $crate::IntoOutcome::into_outcome($body)
                }
                body
            },
        );
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __mute_section {
    ($env:ident, $kind:expr, $name:expr, $body:block) => {
        $env.section($kind, $name, $crate::here!(), |$env| {
            $crate::IntoOutcome::into_outcome($body)
        })
    };
}

#[macro_export]
macro_rules! section {
    ($env:ident, $name:expr, $body:block) => {
        $crate::__mute_section!($env, $crate::SectionKind::Section, $name, $body)
    };
}

#[macro_export]
macro_rules! given {
    ($env:ident, $name:expr, $body:block) => {
        $crate::__mute_section!($env, $crate::SectionKind::Given, $name, $body)
    };
}

#[macro_export]
macro_rules! when {
    ($env:ident, $name:expr, $body:block) => {
        $crate::__mute_section!($env, $crate::SectionKind::When, $name, $body)
    };
}

#[macro_export]
macro_rules! then {
    ($env:ident, $name:expr, $body:block) => {
        $crate::__mute_section!($env, $crate::SectionKind::Then, $name, $body)
    };
}

#[macro_export]
macro_rules! check {
    ($env:ident, $expr:expr) => {
        $env.check($crate::here!(), stringify!($expr), $expr)
    };
}

#[macro_export]
macro_rules! check_that {
    ($env:ident, $expr:expr, $predicate:expr) => {
        $env.check_that($crate::here!(), stringify!($expr), $expr, $predicate)
    };
}

/// Like `check!`, but leaves the innermost section body when the check fails.
#[macro_export]
macro_rules! require {
    ($env:ident, $expr:expr) => {
        $env.require($crate::here!(), stringify!($expr), $expr)?
    };
}

/// Like `check_that!`, but leaves the innermost section body when the check fails.
#[macro_export]
macro_rules! require_that {
    ($env:ident, $expr:expr, $predicate:expr) => {
        $env.require_that($crate::here!(), stringify!($expr), $expr, $predicate)?
    };
}
