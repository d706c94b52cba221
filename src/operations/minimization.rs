use itertools::Itertools;
use tracing::{debug, trace};

use crate::{
    automaton::Dfa,
    definition::{Definition, ParseContext, StateIndex},
    math::Partition,
};

use super::{ConversionError, MergedIds};

impl Definition {
    /// Merges the states of a DFA that no word can tell apart (Myhill-Nerode equivalence).
    ///
    /// Two states are distinguished if exactly one of them is final, or if for some literal
    /// exactly one of them has a successor, or both have successors that are distinguished.
    /// This is iterated until nothing changes. Every class of indistinguishable states becomes
    /// one state whose id is the sorted concatenation of the member ids, or the braced,
    /// comma-separated member ids if a state of `self` already has that id.
    ///
    /// States are not pruned beforehand, see [`Definition::minimize`] for the full pipeline.
    ///
    /// # Errors
    /// [`ConversionError::NotADfa`] if `self` has an epsilon transition or a state with two
    /// transitions on the same literal.
    pub fn merge_equivalent(&self) -> Result<Definition, ConversionError> {
        if let Some(t) = self.nondeterministic_transition() {
            return Err(ConversionError::NotADfa {
                state: self.id(t.from()).to_string(),
                symbol: self.alphabet().render(t.symbol()).to_string(),
            });
        }

        let n = self.size();
        let literals = self.alphabet().literals().collect_vec();
        let dfa = Dfa::new(self);
        let successors: Vec<Vec<Option<StateIndex>>> = self
            .indices()
            .map(|q| literals.iter().map(|a| dfa.successor(q, a)).collect())
            .collect();

        let mut distinguished = vec![vec![false; n]; n];
        for (p, q) in self.indices().tuple_combinations() {
            let differ = self.is_final(p) != self.is_final(q);
            distinguished[p][q] = differ;
            distinguished[q][p] = differ;
        }

        let mut rounds = 0;
        loop {
            rounds += 1;
            let mut changed = false;
            for (p, q) in self.indices().tuple_combinations() {
                if distinguished[p][q] {
                    continue;
                }
                let split = successors[p]
                    .iter()
                    .zip(&successors[q])
                    .any(|pair| match pair {
                        (Some(p1), Some(q1)) => distinguished[*p1][*q1],
                        (None, None) => false,
                        _ => true,
                    });
                if split {
                    distinguished[p][q] = true;
                    distinguished[q][p] = true;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
        trace!("distinguishability table stabilized after {rounds} rounds");

        let indices = self.indices().collect_vec();
        let classes = Partition::connected_components(&indices, |p, q| !distinguished[p][q]);

        let mut names = MergedIds::new(self);
        let class_ids = classes
            .iter()
            .map(|class| names.name(self, class))
            .collect_vec();
        let mut class_of = vec![0; n];
        for (i, class) in classes.iter().enumerate() {
            for &q in class {
                class_of[q] = i;
            }
        }

        let mut context = ParseContext::with_alphabet(self.alphabet().clone());
        for (i, class) in classes.iter().enumerate() {
            if class.iter().any(|&q| self.is_final(q)) {
                context.final_state(&class_ids[i]);
            }
        }
        for t in self.transitions() {
            context.transition_between(
                &class_ids[class_of[t.from()]],
                t.symbol().clone(),
                &class_ids[class_of[t.to()]],
            );
        }
        let merged = context.finish(&class_ids[class_of[self.start()]]);

        debug!(
            "merged {} states into {} equivalence classes",
            n,
            merged.size()
        );
        Ok(merged)
    }

    /// Computes the minimal DFA equivalent to `self` by removing unreachable states and dead
    /// ends, merging equivalent states and finally canonicalizing the state ids.
    ///
    /// # Errors
    /// See [`Definition::merge_equivalent`].
    pub fn minimize(&self) -> Result<Definition, ConversionError> {
        Ok(self
            .remove_unreachable()
            .remove_dead_ends()
            .merge_equivalent()?
            .canonicalize())
    }
}
