use tracing::trace;

use crate::{
    definition::{Definition, StateIndex},
    Symbol,
};

use super::Configuration;

/// Adjacency index of a [`Definition`]: for every state the list of its outgoing edges as
/// `(symbol, target)` pairs. It is built once when an engine is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    edges: Vec<Vec<(Symbol, StateIndex)>>,
}

impl Graph {
    /// Builds the adjacency index of `definition`.
    pub fn new(definition: &Definition) -> Self {
        let mut edges = vec![vec![]; definition.size()];
        for t in definition.transitions() {
            edges[t.from()].push((t.symbol().clone(), t.to()));
        }
        Self { edges }
    }

    /// The outgoing edges of `state`.
    pub fn edges_from(&self, state: StateIndex) -> &[(Symbol, StateIndex)] {
        &self.edges[state]
    }

    /// The targets of all transitions leaving `state` on the literal `literal`.
    pub fn successors<'a>(
        &'a self,
        state: StateIndex,
        literal: &'a str,
    ) -> impl Iterator<Item = StateIndex> + 'a {
        self.edges[state]
            .iter()
            .filter(move |(symbol, _)| symbol.matches(literal))
            .map(|(_, target)| *target)
    }

    /// The targets of all epsilon transitions leaving `state`.
    pub fn epsilon_successors(&self, state: StateIndex) -> impl Iterator<Item = StateIndex> + '_ {
        self.edges[state]
            .iter()
            .filter(|(symbol, _)| symbol.is_epsilon())
            .map(|(_, target)| *target)
    }

    /// The union of the literal successors of all states in `states`.
    pub fn step(&self, states: &Configuration, literal: &str) -> Configuration {
        states
            .iter()
            .flat_map(|&q| self.successors(q, literal))
            .collect()
    }

    /// Computes the epsilon closure of `states`, the smallest superset that is closed under
    /// taking epsilon transitions. Every state is expanded at most once, so this terminates
    /// after at most one pass over each edge.
    pub fn epsilon_closure(&self, states: &Configuration) -> Configuration {
        let mut closure = states.clone();
        let mut pending: Vec<_> = states.iter().copied().collect();

        while let Some(q) = pending.pop() {
            for p in self.epsilon_successors(q) {
                if closure.insert(p) {
                    pending.push(p);
                }
            }
        }

        if closure.len() > states.len() {
            trace!(
                "epsilon closure grew from {} to {} states",
                states.len(),
                closure.len()
            );
        }
        closure
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    fn ids(definition: &Definition, states: &Configuration) -> Vec<String> {
        states
            .iter()
            .map(|&q| definition.id(q).to_string())
            .sorted()
            .collect()
    }

    #[test]
    fn closure_follows_chains_and_cycles() {
        let definition = Definition::parse("\n0 _ 1\n1 _ 2\n2 _ 0\n2 a 3\n3 _ 4\n").unwrap();
        let graph = Graph::new(&definition);
        let start = Configuration::from([definition.start()]);

        let closure = graph.epsilon_closure(&start);
        assert_eq!(ids(&definition, &closure), vec!["0", "1", "2"]);

        let stepped = graph.step(&closure, "a");
        assert_eq!(ids(&definition, &stepped), vec!["3"]);
        assert_eq!(
            ids(&definition, &graph.epsilon_closure(&stepped)),
            vec!["3", "4"]
        );
    }

    #[test]
    fn literals_ignore_epsilon_edges() {
        let definition = Definition::parse("\n0 _ 1\n0 a 2\n0 a 3\n").unwrap();
        let graph = Graph::new(&definition);
        let q = definition.start();

        assert_eq!(graph.edges_from(q).len(), 3);
        assert_eq!(graph.successors(q, "a").count(), 2);
        assert_eq!(graph.successors(q, "_").count(), 0);
        assert_eq!(graph.epsilon_successors(q).count(), 1);
    }
}
