use crate::definition::{Definition, StateIndex};

use super::{Automaton, Configuration, Graph};

/// Simulation engine for nondeterministic automata: the new configuration is the union of
/// the successors of all active states. Epsilon transitions are not followed.
#[derive(Debug, Clone)]
pub struct Nfa<'a> {
    definition: &'a Definition,
    graph: Graph,
    root: StateIndex,
    configuration: Configuration,
}

impl<'a> Nfa<'a> {
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
}

impl Automaton for Nfa<'_> {
    fn definition(&self) -> &Definition {
        self.definition
    }

    fn root(&self) -> StateIndex {
        self.root
    }

    fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    fn set_configuration(&mut self, configuration: Configuration) {
        self.configuration = configuration;
    }

    fn advance(&mut self, literal: &str) -> &Configuration {
        self.configuration = self.graph.step(&self.configuration, literal);
        &self.configuration
    }
}
