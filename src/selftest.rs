//! Built-in demonstration suite.
//!
//! These scenarios exercise every part of the engine: plain checks, predicate
//! checks, nested sections of each kind, and requirements that abort a
//! section. `mute run` drives them, and the gold file under `tests/gold/`
//! records their expected output.

use crate::errors::Result;
use crate::predicates::{gt, lt};
use crate::registry::{TestCase, TestRegistry};
use crate::{check, check_that, given, require, require_that, scenario, section, test_case, then, when};

scenario! {
    pub static SOMETHING_STRINGY: "something stringy", "[aaa,bbb]" => |env| {
        let v: i32 = 123;
        check!(env, v != 0);
        check_that!(env, v, gt(124_i32));
    }
}

scenario! {
    pub static SOMETHING_ELSE_STRINGY: "something else stringy", "[aaa,bbb]" => |env| {
        when!(env, "something", {
            then!(env, "something", {});
            then!(env, "something else", {});
        });
        when!(env, "something else", {});
    }
}

scenario! {
    pub static FIRST_SCENARIO: "first scenario", "" => |env| {
        given!(env, "something", {
            when!(env, "doing something", {
                then!(env, "something happens", {});
                then!(env, "something else happens", {});
            });
        });
    }
}

test_case! {
    pub static FIRST_TEST: "first test", "" => |env| {
        section!(env, "something", {
            section!(env, "doing something", {
                section!(env, "something happens", {});
                section!(env, "something else happens", {});
            });
        });
    }
}

scenario! {
    pub static REQUIRE_STOPS_SECTION: "Require prevents any further testing", "" => |env| {
        check!(env, false);
        check!(env, false);

        given!(env, "a section after failed require", {
            then!(env, "the section is not executed nor visible", {
                require!(env, false);
                require!(env, false);
            });
        });
    }
}

scenario! {
    pub static REQUIRE_KEEPS_SIBLINGS: "Require in section allows further sections", "" => |env| {
        let v: i32 = 123;

        given!(env, "a first section before any failed require", {
            then!(env, "the section is executed", {
                require_that!(env, v, lt(123_i32));
                require!(env, false);
            });
        });
        given!(env, "a second section after a section containing a failed require", {
            then!(env, "the section is executed", {
                require_that!(env, v, gt(123_i32));
                require!(env, false);
            });
        });
    }
}

/// Every built-in scenario, in execution order.
pub fn all() -> [&'static dyn TestCase; 6] {
    [
        &SOMETHING_STRINGY,
        &SOMETHING_ELSE_STRINGY,
        &FIRST_SCENARIO,
        &FIRST_TEST,
        &REQUIRE_STOPS_SECTION,
        &REQUIRE_KEEPS_SIBLINGS,
    ]
}

/// Registers the built-in suite.
pub fn register(registry: &mut TestRegistry<'static>) -> Result<()> {
    registry.register_all(all())
}
