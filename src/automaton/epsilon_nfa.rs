use crate::definition::{Definition, StateIndex};

use super::{Automaton, Configuration, Graph, Status};

/// Simulation engine for automata with epsilon transitions. Before and after consuming a
/// symbol, the configuration is closed under epsilon transitions.
#[derive(Debug, Clone)]
pub struct EpsilonNfa<'a> {
    definition: &'a Definition,
    graph: Graph,
    root: StateIndex,
    configuration: Configuration,
}

impl<'a> EpsilonNfa<'a> {
    /// Creates an engine over `definition`, rooted in its start state.
    pub fn new(definition: &'a Definition) -> Self {
        Self::rooted_at(definition, definition.start())
    }

    /// Creates an engine over `definition` that starts in (and resets to) `root` instead of
    /// the start state of the definition.
    pub fn rooted_at(definition: &'a Definition, root: StateIndex) -> Self {
        Self {
            definition,
            graph: Graph::new(definition),
            root,
            configuration: Configuration::from([root]),
        }
    }

    /// The epsilon closure of `states`.
    pub fn closure(&self, states: &Configuration) -> Configuration {
        self.graph.epsilon_closure(states)
    }
}

impl Automaton for EpsilonNfa<'_> {
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
        let closed = self.closure(&self.configuration);
        let stepped = self.graph.step(&closed, literal);
        self.configuration = self.closure(&stepped);
        &self.configuration
    }

    /// The status is computed on the epsilon closure of the configuration. Right after a
    /// reset, the configuration is only the root and a final state may still be reachable
    /// through epsilon transitions.
    fn status(&self) -> Status {
        Status::of(self.definition, &self.closure(&self.configuration))
    }
}
