use itertools::Itertools;
use thiserror::Error;
use tracing::debug;

use crate::{
    automaton::Configuration,
    definition::Definition,
    math::{self, Map, Set},
};

mod epsilon;

mod subset;
pub use subset::MAX_SUBSET_STATES;

mod reachable;

mod minimization;

mod canonical;

/// Errors that can occur when converting a definition. A conversion that fails does not
/// produce a partial result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// The operation requires a DFA, but the definition has an epsilon transition or a state
    /// with two transitions on the same symbol.
    #[error("not a DFA: state `{state}` has a nondeterministic transition on `{symbol}`")]
    NotADfa {
        /// Id of the offending state.
        state: String,
        /// Id of the offending symbol (the epsilon marker for epsilon transitions).
        symbol: String,
    },
    /// The subset construction was invoked on a definition with too many states.
    #[error("subset construction over {states} states exceeds the limit of {limit} states")]
    TooManyStates {
        /// Number of states of the definition.
        states: usize,
        /// The maximal number of states.
        limit: usize,
    },
}

/// Names sets of states after their members. A set is named by the sorted concatenation of the
/// member ids, unless that name already belongs to a different set (every state of the
/// definition owns its own id). Then the ids are joined by commas and wrapped in braces, with
/// primes appended until the name is free. The same set always gets the same name.
#[derive(Debug)]
pub(crate) struct MergedIds {
    names: Map<Configuration, String>,
    taken: Set<String>,
}

impl MergedIds {
    pub(crate) fn new(definition: &Definition) -> Self {
        let mut names = Map::default();
        let mut taken = Set::default();
        for q in definition.indices() {
            names.insert(Configuration::from([q]), definition.id(q).to_string());
            taken.insert(definition.id(q).to_string());
        }
        Self { names, taken }
    }

    pub(crate) fn name(&mut self, definition: &Definition, states: &Configuration) -> String {
        if let Some(name) = self.names.get(states) {
            return name.clone();
        }

        let ids = states.iter().map(|&q| definition.id(q)).sorted().collect_vec();
        let mut name = math::join_ids(ids.iter().copied());
        if self.taken.contains(&name) {
            let joined = name;
            name = format!("{{{}}}", ids.iter().join(","));
            while self.taken.contains(&name) {
                name.push('\'');
            }
            debug!("merged id `{joined}` is already taken, using `{name}`");
        }

        self.taken.insert(name.clone());
        self.names.insert(states.clone(), name.clone());
        name
    }
}
