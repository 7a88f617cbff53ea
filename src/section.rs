//! Scoped section guards.
//!
//! A [`Section`] stands for one syntactic section occurrence during one run.
//! Opening it registers the occurrence with the traversal and, if this is the
//! occurrence to visit, reports `enter:`. Dropping it reports `leave:` for an
//! entered section and restores the traversal depth, whatever way the body
//! was left.

use crate::env::TestEnv;
use crate::output::writer;
use crate::Location;

/// The label family of a section, printed in front of its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Section,
    Given,
    When,
    Then,
}

impl SectionKind {
    pub fn prefix(self) -> &'static str {
        match self {
            SectionKind::Section => "",
            SectionKind::Given => "given ",
            SectionKind::When => "when ",
            SectionKind::Then => "then ",
        }
    }
}

pub struct Section<'e, 'o> {
    env: &'e mut TestEnv<'o>,
    location: Location,
    kind: SectionKind,
    name: &'static str,
    entered: bool,
    consumed: bool,
    // false when the traversal refused the occurrence, so there is no depth to restore
    counted: bool,
}

impl<'e, 'o> Section<'e, 'o> {
    pub fn open(
        env: &'e mut TestEnv<'o>,
        kind: SectionKind,
        name: &'static str,
        location: Location,
    ) -> Self {
        let (entered, counted) = match env.traversal_mut().enter_section() {
            Ok(entered) => (entered, true),
            Err(error) => {
                env.record_fault(location, error);
                (false, false)
            }
        };
        if entered {
            writer(env.output()).enter(location, kind.prefix(), name);
        }
        Self {
            env,
            location,
            kind,
            name,
            entered,
            consumed: false,
            counted,
        }
    }

    /// Whether the body should execute; true at most once per occurrence.
    pub fn take(&mut self) -> bool {
        if self.consumed {
            return false;
        }
        self.consumed = true;
        self.entered
    }

    pub fn is_entered(&self) -> bool {
        self.entered
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn env(&mut self) -> &mut TestEnv<'o> {
        &mut *self.env
    }
}

impl Drop for Section<'_, '_> {
    fn drop(&mut self) {
        if self.entered {
            writer(self.env.output()).leave(self.location, self.kind.prefix(), self.name);
        }
        if self.counted {
            if let Err(error) = self.env.traversal_mut().leave_section() {
                self.env.record_fault(self.location, error);
            }
        }
    }
}
