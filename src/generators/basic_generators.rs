use super::{specs::assert_not_at_end, CellMap, CloneableGenerator, InstChecker, InstGenerator};
use std::fmt::Display;

/// A generator with no instantiation, used for unsatisfiable constraints.
#[derive(Debug, Default, Clone)]
pub struct EmptyGenerator;

impl InstChecker for EmptyGenerator {
    fn check(&mut self) -> bool {
        false
    }
}

impl InstGenerator for EmptyGenerator {
    fn reset(&mut self) {}

    fn next(&mut self) {
        assert_not_at_end(true, &*self)
    }

    fn is_at_end(&self) -> bool {
        true
    }

    fn set_vars_again(&mut self) {}
}

impl CloneableGenerator for EmptyGenerator {
    fn clone_with_map(&self, _cells: &mut CellMap) -> Box<dyn CloneableGenerator> {
        Box::new(EmptyGenerator)
    }
}

impl Display for EmptyGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "empty")
    }
}

/// A generator producing a single empty instantiation, used for valid constraints.
#[derive(Debug, Clone)]
pub struct FullGenerator {
    done: bool,
    at_end: bool,
}

impl Default for FullGenerator {
    fn default() -> Self {
        Self {
            done: false,
            at_end: true,
        }
    }
}

impl InstChecker for FullGenerator {
    fn check(&mut self) -> bool {
        true
    }
}

impl InstGenerator for FullGenerator {
    fn reset(&mut self) {
        self.done = false;
        self.at_end = false;
    }

    fn next(&mut self) {
        assert_not_at_end(self.at_end, &*self);
        if self.done {
            self.at_end = true;
        } else {
            self.done = true;
        }
    }

    fn is_at_end(&self) -> bool {
        self.at_end
    }

    fn set_vars_again(&mut self) {}
}

impl CloneableGenerator for FullGenerator {
    fn clone_with_map(&self, _cells: &mut CellMap) -> Box<dyn CloneableGenerator> {
        Box::new(FullGenerator::default())
    }
}

impl Display for FullGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "full")
    }
}
