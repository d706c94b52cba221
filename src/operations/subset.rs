use itertools::Itertools;
use tracing::{debug, trace, warn};

use crate::{
    automaton::{Automaton, Configuration, Nfa},
    definition::{Definition, ParseContext},
    Symbol,
};

use super::{ConversionError, MergedIds};

/// The largest number of states [`Definition::subset_construction`] accepts. The construction
/// enumerates every subset of the states, so its cost doubles with every additional state.
pub const MAX_SUBSET_STATES: usize = 20;

impl Definition {
    /// Converts `self` into an equivalent DFA using the subset (powerset) construction.
    ///
    /// Every non-empty subset of the states becomes a state whose id is the sorted
    /// concatenation of the member ids. If that id is already taken, the member ids are joined
    /// by commas inside braces instead (`{1,2}` when `12` is a state). It is final if any member is final, and on every literal
    /// it has a transition to the (non-empty) set of states an NFA started in the subset
    /// reaches. The result is assembled as if parsed: final subsets come first and subsets
    /// that are neither final nor mentioned by a transition do not appear. The start state is
    /// the singleton set of the original start state, which keeps its id.
    ///
    /// Epsilon transitions are not followed, eliminate them first with
    /// [`Definition::eliminate_epsilon`].
    ///
    /// # Errors
    /// [`ConversionError::TooManyStates`] if `self` has more than [`MAX_SUBSET_STATES`] states.
    pub fn subset_construction(&self) -> Result<Definition, ConversionError> {
        let n = self.size();
        if n > MAX_SUBSET_STATES {
            return Err(ConversionError::TooManyStates {
                states: n,
                limit: MAX_SUBSET_STATES,
            });
        }
        if self.has_epsilon_transitions() {
            warn!("subset construction ignores the epsilon transitions of its input");
        }

        let literals = self.alphabet().literals().collect_vec();
        let mut nfa = Nfa::new(self);
        let mut names = MergedIds::new(self);
        let mut finals = vec![];
        let mut edges = vec![];

        for mask in 1u32..(1u32 << n) {
            let subset: Configuration = (0..n).filter(|&q| mask & (1 << q) != 0).collect();
            let is_final = subset.iter().any(|&q| self.is_final(q));
            let targets = literals
                .iter()
                .filter_map(|&a| {
                    nfa.set_configuration(subset.clone());
                    let target = nfa.advance(a).clone();
                    (!target.is_empty()).then_some((a, target))
                })
                .collect_vec();
            if !is_final && targets.is_empty() {
                continue;
            }

            let id = names.name(self, &subset);
            if is_final {
                finals.push(id.clone());
            }
            for (a, target) in targets {
                let target_id = names.name(self, &target);
                trace!("{id} --{a}--> {target_id}");
                edges.push((id.clone(), a, target_id));
            }
        }

        let mut context = ParseContext::with_alphabet(self.alphabet().without_epsilon());
        for id in &finals {
            context.final_state(id);
        }
        for (from, a, to) in &edges {
            context.transition_between(from, Symbol::literal(*a), to);
        }
        let dfa = context.finish(self.start_state().id());

        debug!(
            "subset construction turned {} states into {} states with {} transitions",
            n,
            dfa.size(),
            dfa.transitions().len()
        );
        Ok(dfa)
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test_log::test]
    fn determinizes_second_to_last() {
        let nfa = Definition::parse("2\n0 a 0\n0 b 0\n0 a 1\n1 a 2\n1 b 2\n").unwrap();
        let dfa = nfa.subset_construction().unwrap();

        assert!(dfa.is_deterministic());
        assert_eq!(dfa.start_state().id(), "0");
        assert!(dfa.contains("01"));
        assert!(dfa.contains("012"));
        assert!(dfa.final_states().all(|state| state.id().contains('2')));
        assert_eq!(
            nfa.distinguishing_word(Variant::Nfa, &dfa, Variant::Dfa, 6),
            None
        );
    }

    #[test]
    fn subsets_without_transitions_vanish() {
        let nfa = Definition::parse("1\n0 a 1\n").unwrap();
        let dfa = nfa.subset_construction().unwrap();

        // subsets {1} and {0, 1} are final, {0} and {0, 1} have a transition on a
        assert_eq!(dfa.to_string(), "1 01\n0 a 1\n01 a 1\n");
        assert_eq!(dfa.size(), 3);
    }

    #[test]
    fn limits_are_enforced() {
        let transitions =
            (0..=MAX_SUBSET_STATES).map(|q| (q.to_string(), "a", (q + 1).to_string()));
        let large = Definition::builder()
            .with_transitions(transitions)
            .into_definition("0");
        assert_eq!(
            large.subset_construction(),
            Err(ConversionError::TooManyStates {
                states: MAX_SUBSET_STATES + 2,
                limit: MAX_SUBSET_STATES
            })
        );
    }

    #[test_log::test]
    fn subsets_may_be_named_like_states() {
        let mut text = String::from("12\n");
        for q in 0..12 {
            text.push_str(&format!("{q} a {}\n", q + 1));
        }
        let nfa = Definition::parse(&text).unwrap();
        assert_eq!(nfa.size(), 13);

        let dfa = nfa.subset_construction().unwrap();
        assert!(dfa.is_deterministic());
        // {0, 1} reaches {1, 2}, whose joined id belongs to 12
        assert!(dfa.contains("{1,2}"));
        assert!(dfa.is_final(dfa.index_of("12").unwrap()));
        assert_eq!(
            nfa.distinguishing_word(Variant::Nfa, &dfa, Variant::Dfa, 14),
            None
        );
    }

    #[test]
    fn only_emitted_subsets_are_named() {
        // {1, 2} is neither final nor a source or target of a transition
        let nfa = Definition::parse("\n0 a 12\n0 b 1\n0 c 2\n").unwrap();
        let dfa = nfa.subset_construction().unwrap();

        // the eight subsets containing 0 and the three singleton targets
        assert_eq!(dfa.size(), 11);
        assert!(dfa.contains("12"));
        assert!(!dfa.contains("{1,2}"));
        // {0, 12} comes first and keeps the joined id it shares with {0, 1, 2}
        assert!(dfa.contains("012"));
        assert!(dfa.contains("{0,1,2}"));
        assert_eq!(
            nfa.distinguishing_word(Variant::Nfa, &dfa, Variant::Dfa, 3),
            None
        );
    }

    #[cfg(feature = "random")]
    #[test]
    fn preserves_language_of_random_automata() {
        let mut rng = fastrand::Rng::with_seed(0x5b5e7);
        for _ in 0..40 {
            let nfa = crate::random::random_definition(&mut rng, 5, 2, 0.3, 0.0);
            let dfa = nfa.subset_construction().unwrap();
            assert!(dfa.is_deterministic());
            assert_eq!(
                nfa.distinguishing_word(Variant::Nfa, &dfa, Variant::Dfa, 6),
                None,
                "\n{nfa}"
            );
        }
    }
}
