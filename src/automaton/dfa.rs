use crate::definition::{Definition, StateIndex};

use super::{Automaton, Configuration, Graph};

/// Simulation engine for deterministic automata. The configuration holds at most one state.
/// Once there is no transition for a symbol the configuration becomes empty and stays empty,
/// which is reported as [`super::Status::Aborted`].
#[derive(Debug, Clone)]
pub struct Dfa<'a> {
    definition: &'a Definition,
    graph: Graph,
    root: StateIndex,
    configuration: Configuration,
}

impl<'a> Dfa<'a> {
    /// Creates an engine over `definition`, rooted in its start state.
    pub fn new(definition: &'a Definition) -> Self {
        Self::rooted_at(definition, definition.start())
    }

    /// Creates an engine over `definition` that resets to `root`.
    pub fn rooted_at(definition: &'a Definition, root: StateIndex) -> Self {
        Self {
            definition,
            graph: Graph::new(definition),
            root,
            configuration: Configuration::from([root]),
        }
    }

    /// The single active state, if any.
    pub fn current(&self) -> Option<StateIndex> {
        self.configuration.first().copied()
    }

    /// The state reached from `state` on `literal`, if there is a transition.
    pub fn successor(&self, state: StateIndex, literal: &str) -> Option<StateIndex> {
        self.graph.successors(state, literal).next()
    }
}

impl Automaton for Dfa<'_> {
    fn definition(&self) -> &Definition {
        self.definition
    }

    fn root(&self) -> StateIndex {
        self.root
    }

    fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Only the smallest state of `configuration` is kept.
    fn set_configuration(&mut self, configuration: Configuration) {
        self.configuration = configuration.into_iter().take(1).collect();
    }

    fn advance(&mut self, literal: &str) -> &Configuration {
        self.configuration = self
            .current()
            .and_then(|q| self.successor(q, literal))
            .into_iter()
            .collect();
        &self.configuration
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn aborted_is_terminal() {
        let definition = Definition::parse("0\n0 a 1\n1 b 0\n").unwrap();
        let mut dfa = Dfa::new(&definition);

        assert_eq!(dfa.run(["a", "b"]), Status::Accepted);
        assert_eq!(dfa.run(["b"]), Status::Aborted);
        assert_eq!(dfa.current(), None);
        assert_eq!(dfa.run(["a", "b"]), Status::Aborted);
        dfa.reset();
        assert_eq!(dfa.current(), Some(definition.start()));
    }

    #[test]
    fn keeps_a_single_state() {
        let definition = Definition::parse("1\n0 a 1\n1 a 0\n").unwrap();
        let mut dfa = Dfa::new(&definition);
        dfa.set_configuration(Configuration::from_iter(definition.indices()));
        assert_eq!(dfa.configuration().len(), 1);

        let zero = definition.index_of("0").unwrap();
        let one = definition.index_of("1").unwrap();
        assert_eq!(dfa.successor(zero, "a"), Some(one));
        assert_eq!(dfa.successor(zero, "b"), None);
    }
}
