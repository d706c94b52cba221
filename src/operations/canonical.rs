use itertools::Itertools;
use tracing::{debug, trace};

use crate::{
    automaton::{Automaton, Configuration, EpsilonNfa},
    definition::{Definition, ParseContext, State, StateIndex, DEFAULT_START_ID},
    math::{Bijection, Map},
    Show,
};

/// What a state looks like from the outside: where it goes on every literal, which states it
/// reaches through epsilon transitions and whether it is final. States with equal signatures
/// accept the same words.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Signature {
    successors: Vec<Vec<String>>,
    closure: Vec<String>,
    is_final: bool,
}

impl Signature {
    fn of(
        definition: &Definition,
        lnfa: &mut EpsilonNfa<'_>,
        literals: &[&str],
        state: StateIndex,
    ) -> Self {
        let root = Configuration::from([state]);
        let closure = lnfa
            .closure(&root)
            .into_iter()
            .filter(|&q| q != state)
            .map(|q| definition.id(q).to_string())
            .sorted()
            .collect();
        let is_final = definition.is_final(state);

        let mut successors = Vec::with_capacity(literals.len());
        for &a in literals {
            lnfa.set_configuration(root.clone());
            let targets = lnfa.advance(a).clone();
            successors.push(
                targets
                    .into_iter()
                    .map(|q| definition.id(q).to_string())
                    .sorted()
                    .collect(),
            );
        }

        Self {
            successors,
            closure,
            is_final,
        }
    }
}

impl Show for Signature {
    fn show(&self) -> String {
        let mut out = self
            .successors
            .iter()
            .map(|targets| targets.iter().map(|t| format!("-{t}")).join(""))
            .map(|targets| format!("*{targets}"))
            .join("");
        if !self.closure.is_empty() {
            out.push('_');
            out.extend(self.closure.iter().map(|t| format!("-{t}")));
        }
        out.push('&');
        out.push_str(&self.is_final.show());
        out
    }
}

impl Definition {
    /// Canonicalizes `self` using [`DEFAULT_START_ID`] for the start state, see
    /// [`Definition::canonicalize_with_start`].
    pub fn canonicalize(&self) -> Definition {
        self.canonicalize_with_start(DEFAULT_START_ID)
    }

    /// Collapses states that behave identically and renames all states to short sequential
    /// ids. The start state is renamed to `start_id`, all other states receive the ids
    /// `1`, `2`, ... in arena order (skipping `start_id`).
    ///
    /// Two states are collapsed if they are both final or both non-final, reach the same states
    /// through epsilon transitions and, for every literal, reach the same set of states when an
    /// epsilon-NFA reads the literal. Collapsing can make further states identical, so it is
    /// repeated until nothing changes anymore. Like parsing, collapsing drops non-final states
    /// that have no transitions and are not the start state.
    ///
    /// The result is a fixpoint: canonicalizing it again yields an identical definition.
    pub fn canonicalize_with_start(&self, start_id: &str) -> Definition {
        let mut current = self.clone();
        let mut rounds = 0;
        loop {
            rounds += 1;
            let collapsed = current.collapse_identical();
            let shrunk = collapsed.size() < current.size();
            current = collapsed.renumber(start_id);
            if !shrunk {
                break;
            }
        }
        debug!(
            "canonicalized {} states into {} states in {rounds} rounds",
            self.size(),
            current.size()
        );
        current
    }

    fn collapse_identical(&self) -> Definition {
        let literals = self.alphabet().literals().collect_vec();
        let mut lnfa = EpsilonNfa::new(self);
        let mut representatives: Map<Signature, StateIndex> = Map::default();
        let representative: Vec<StateIndex> = self
            .indices()
            .map(|q| {
                let signature = Signature::of(self, &mut lnfa, &literals, q);
                trace!("signature of {} is {}", self.id(q), signature.show());
                *representatives.entry(signature).or_insert(q)
            })
            .collect();
        let id = |q: StateIndex| self.id(representative[q]);

        let mut context = ParseContext::with_alphabet(self.alphabet().clone());
        for q in self.indices().filter(|&q| self.is_final(q)) {
            context.final_state(id(q));
        }
        for t in self.transitions() {
            context.transition_between(id(t.from()), t.symbol().clone(), id(t.to()));
        }
        context.finish(id(self.start()))
    }

    /// Assigns every state its new id, keeping the arena order.
    fn renumbering(&self, start_id: &str) -> Bijection<String, String> {
        let mut names = Bijection::new();
        let mut fresh = (1usize..)
            .map(|n| n.to_string())
            .filter(|name| name != start_id);
        for q in self.indices() {
            let name = if q == self.start() {
                start_id.to_string()
            } else {
                fresh.next().unwrap_or_default()
            };
            let inserted = names.insert_no_overwrite(self.id(q).to_string(), name);
            debug_assert!(inserted.is_ok(), "renumbering must be injective");
        }
        names
    }

    fn renumber(&self, start_id: &str) -> Definition {
        let names = self.renumbering(start_id);
        let rename = |q: StateIndex| {
            names
                .get_by_left(self.id(q))
                .map(String::as_str)
                .unwrap_or(start_id)
        };

        let mut context = ParseContext::with_alphabet(self.alphabet().clone());
        for q in self.indices() {
            context.push_state(State::new(rename(q), self.is_final(q)));
        }
        for t in self.transitions() {
            context.add_transition(t.from(), t.symbol().clone(), t.to());
        }
        context.finish(start_id)
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn renames_sequentially() {
        let options = ParseOptions::default().with_start_id("start");
        let definition = Definition::parse_with("q2\nstart a q1\nq1 b q2\n", &options)
            .unwrap()
            .canonicalize();

        assert_eq!(definition.to_string(), "1\n0 a 2\n2 b 1\n");
    }

    #[test]
    fn start_id_is_skipped() {
        let definition = Definition::parse("2\n0 a 1\n1 b 2\n").unwrap();
        let canonical = definition.canonicalize_with_start("1");

        assert_eq!(canonical.start_state().id(), "1");
        assert_eq!(canonical.to_string(), "2\n1 a 3\n3 b 2\n");
    }

    #[test]
    fn identical_states_collapse() {
        // 1 and 2 behave the same, which makes 3 and 4 behave the same as well
        let nfa = Definition::parse("5\n0 a 3\n0 b 4\n3 a 1\n4 a 2\n1 c 5\n2 c 5\n").unwrap();
        let canonical = nfa.canonicalize();

        assert_eq!(canonical.size(), 4);
        assert_eq!(
            nfa.distinguishing_word(Variant::Nfa, &canonical, Variant::Nfa, 4),
            None
        );
    }

    #[test_log::test]
    fn preserves_epsilon_behaviour() {
        let lnfa = crate::tests::branching_lnfa();
        let canonical = lnfa.canonicalize();

        // the two final sinks 3 and 5 collapse
        assert_eq!(canonical.size(), lnfa.size() - 1);
        assert_eq!(
            lnfa.distinguishing_word(Variant::EpsilonNfa, &canonical, Variant::EpsilonNfa, 5),
            None
        );
    }

    #[test]
    fn canonicalization_is_a_fixpoint() {
        for definition in [
            crate::tests::a_plus(),
            crate::tests::branching_lnfa(),
            Definition::parse("1 2\n0 a 1\n1 a 2\n2 a 2\n3 b 0\n").unwrap(),
        ] {
            let once = definition.canonicalize();
            assert_eq!(once.canonicalize().to_string(), once.to_string());
        }
        assert_eq!(
            crate::tests::a_plus().canonicalize().to_string(),
            "1\n0 a 1\n1 a 1\n"
        );
    }

    #[cfg(feature = "random")]
    #[test]
    fn random_canonicalization() {
        let mut rng = fastrand::Rng::with_seed(0xca40);
        for _ in 0..50 {
            let definition = crate::random::random_definition(&mut rng, 6, 2, 0.25, 0.15);
            let once = definition.canonicalize();
            assert!(once.size() <= definition.size());
            assert_eq!(once.canonicalize().to_string(), once.to_string());
            assert_eq!(
                definition.distinguishing_word(
                    Variant::EpsilonNfa,
                    &once,
                    Variant::EpsilonNfa,
                    5
                ),
                None,
                "\n{definition}"
            );
        }
    }
}
