use super::{specs::assert_not_at_end, CellMap, CloneableGenerator, InstChecker, InstGenerator};
use std::fmt::Display;

/// A nested-loop join of generators sharing binding cells.
///
/// The generators are driven in order: each one is reset with the values produced by the previous ones,
/// and the chain backtracks to the previous generator when one is exhausted.
/// An empty chain produces a single empty instantiation.
pub struct ChainGenerator {
    generators: Vec<Box<dyn CloneableGenerator>>,
    started: bool,
    at_end: bool,
}

impl ChainGenerator {
    /// Builds a chain from its generators, the first one being the outermost loop.
    pub fn new(generators: Vec<Box<dyn CloneableGenerator>>) -> Self {
        Self {
            generators,
            started: false,
            at_end: true,
        }
    }

    /// Returns the number of chained generators.
    pub fn len(&self) -> usize {
        self.generators.len()
    }

    /// Returns `true` iff the chain has no generator.
    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    // searches the next instantiation, starting at the given level
    fn search(&mut self, mut level: usize, mut fresh: bool) -> bool {
        loop {
            let generator = &mut self.generators[level];
            if fresh {
                generator.begin();
            } else {
                generator.next();
            }
            if generator.is_at_end() {
                if level == 0 {
                    return false;
                }
                level -= 1;
                fresh = false;
                self.generators[..level].iter_mut().for_each(|g| g.set_vars_again());
            } else if level + 1 == self.generators.len() {
                return true;
            } else {
                level += 1;
                fresh = true;
            }
        }
    }
}

impl InstChecker for ChainGenerator {
    fn check(&mut self) -> bool {
        self.generators.iter_mut().all(|g| g.check())
    }
}

impl InstGenerator for ChainGenerator {
    fn reset(&mut self) {
        self.started = false;
        self.at_end = false;
    }

    fn next(&mut self) {
        assert_not_at_end(self.at_end, &*self);
        let found = match (self.started, self.generators.len()) {
            (false, 0) => true,
            (true, 0) => false,
            (false, _) => self.search(0, true),
            (true, n) => self.search(n - 1, false),
        };
        self.started = true;
        self.at_end = !found;
    }

    fn is_at_end(&self) -> bool {
        self.at_end
    }

    fn set_vars_again(&mut self) {
        self.generators.iter_mut().for_each(|g| g.set_vars_again());
    }
}

impl CloneableGenerator for ChainGenerator {
    fn clone_with_map(&self, cells: &mut CellMap) -> Box<dyn CloneableGenerator> {
        Box::new(Self::new(
            self.generators
                .iter()
                .map(|g| g.clone_with_map(cells))
                .collect(),
        ))
    }
}

impl Display for ChainGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts = self
            .generators
            .iter()
            .map(|g| g.to_string())
            .collect::<Vec<String>>();
        write!(f, "chain[{}]", parts.join(" ; "))
    }
}
