use std::collections::VecDeque;

use bit_set::BitSet;
use tracing::debug;

use crate::definition::{Definition, StateIndex};

impl Definition {
    /// Computes the set of states that can be reached from the start state by following
    /// transitions (epsilon transitions included).
    pub fn reachable_states(&self) -> BitSet {
        let mut successors = vec![vec![]; self.size()];
        for t in self.transitions() {
            successors[t.from()].push(t.to());
        }
        search(&successors, [self.start()])
    }

    /// Computes the set of states from which some final state can be reached by following
    /// transitions (epsilon transitions included). Every final state is co-reachable.
    pub fn coreachable_states(&self) -> BitSet {
        let mut predecessors = vec![vec![]; self.size()];
        for t in self.transitions() {
            predecessors[t.to()].push(t.from());
        }
        search(
            &predecessors,
            self.indices().filter(|&q| self.is_final(q)),
        )
    }

    /// Removes every state that cannot be reached from the start state, together with the
    /// transitions touching it. The remaining states keep their relative order.
    pub fn remove_unreachable(&self) -> Definition {
        let pruned = self.restrict(&self.reachable_states());
        debug!(
            "removed {} unreachable states",
            self.size() - pruned.size()
        );
        pruned
    }

    /// Removes every state from which no final state can be reached, together with the
    /// transitions touching it. The start state is kept regardless, if it is a dead end itself
    /// the result is an isolated start state that accepts nothing.
    pub fn remove_dead_ends(&self) -> Definition {
        let pruned = self.restrict(&self.coreachable_states());
        debug!("removed {} dead end states", self.size() - pruned.size());
        pruned
    }
}

fn search<I: IntoIterator<Item = StateIndex>>(adjacency: &[Vec<StateIndex>], origins: I) -> BitSet {
    let mut seen = BitSet::with_capacity(adjacency.len());
    let mut queue = VecDeque::new();
    for q in origins {
        if seen.insert(q) {
            queue.push_back(q);
        }
    }
    while let Some(q) = queue.pop_front() {
        for &p in &adjacency[q] {
            if seen.insert(p) {
                queue.push_back(p);
            }
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use itertools::Itertools;

    fn ids(definition: &Definition) -> Vec<&str> {
        definition.states().iter().map(State::id).collect_vec()
    }

    #[test]
    fn unreachable_states_are_dropped() {
        let definition = Definition::parse("1 3\n0 a 1\n2 a 3\n3 b 1\n1 _ 4\n").unwrap();
        let pruned = definition.remove_unreachable();

        assert_eq!(ids(&pruned), vec!["1", "0", "4"]);
        assert_eq!(pruned.to_string(), "1\n0 a 1\n1 _ 4\n");
        assert_eq!(pruned.start_state().id(), "0");
    }

    #[test]
    fn dead_ends_are_dropped() {
        let definition = Definition::parse("2\n0 a 1\n1 b 2\n0 b 3\n3 a 3\n").unwrap();
        let pruned = definition.remove_dead_ends();

        assert_eq!(ids(&pruned), vec!["2", "0", "1"]);
        assert_eq!(pruned.to_string(), "2\n0 a 1\n1 b 2\n");
    }

    #[test]
    fn dead_start_is_kept() {
        let definition = Definition::parse("\n0 a 1\n1 a 0\n").unwrap();
        let pruned = definition.remove_dead_ends();

        assert_eq!(ids(&pruned), vec!["0"]);
        assert_eq!(pruned.to_string(), "\n");
        assert!(!pruned.accepts(Variant::Dfa, Vec::<&str>::new()));
    }

    #[cfg(feature = "random")]
    #[test]
    fn pruning_preserves_language() {
        let mut rng = fastrand::Rng::with_seed(0x9e4);
        for _ in 0..50 {
            let definition = crate::random::random_definition(&mut rng, 6, 2, 0.2, 0.1);
            for pruned in [definition.remove_unreachable(), definition.remove_dead_ends()] {
                assert!(pruned.size() <= definition.size());
                assert_eq!(
                    definition.distinguishing_word(
                        Variant::EpsilonNfa,
                        &pruned,
                        Variant::EpsilonNfa,
                        5
                    ),
                    None,
                    "\n{definition}"
                );
            }
        }
    }
}
