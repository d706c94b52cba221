use super::{Definition, ParseContext, DEFAULT_EPSILON_MARKER};

/// Helper struct for constructing a [`Definition`] in code rather than from text. It collects
/// final states and transitions and feeds them through a [`ParseContext`] exactly as the parser
/// would, so the result is identical to parsing the corresponding text.
///
/// # Example
///
/// The DFA accepting `a+` with start state `0` and final state `1`:
/// ```
/// use fa_toolkit::prelude::*;
///
/// let definition = DefinitionBuilder::default()
///     .with_final_states(["1"])
///     .with_transitions([("0", "a", "1"), ("1", "a", "1")])
///     .into_definition("0");
/// assert_eq!(definition.to_string(), "1\n0 a 1\n1 a 1\n");
/// ```
#[derive(Debug, Clone)]
pub struct DefinitionBuilder {
    epsilon_marker: String,
    symbols: Vec<String>,
    finals: Vec<String>,
    transitions: Vec<(String, String, String)>,
}

impl Default for DefinitionBuilder {
    fn default() -> Self {
        Self {
            epsilon_marker: DEFAULT_EPSILON_MARKER.to_string(),
            symbols: vec![],
            finals: vec![],
            transitions: vec![],
        }
    }
}

impl DefinitionBuilder {
    /// Sets the symbol id that denotes epsilon.
    pub fn with_epsilon_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.epsilon_marker = marker.into();
        self
    }

    /// By default, the only symbols in the alphabet of the built definition are the ones that
    /// appear on at least one transition. This method forces additional symbols to appear, and
    /// to appear first in the symbol order.
    pub fn with_alphabet_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.symbols.extend(symbols.into_iter().map(Into::into));
        self
    }

    /// Marks the states with the given ids as final.
    pub fn with_final_states<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.finals.extend(ids.into_iter().map(Into::into));
        self
    }

    /// Adds transitions, given as `(from, symbol, to)` triples of ids.
    pub fn with_transitions<I, F, S, T>(mut self, transitions: I) -> Self
    where
        I: IntoIterator<Item = (F, S, T)>,
        F: Into<String>,
        S: Into<String>,
        T: Into<String>,
    {
        self.transitions.extend(
            transitions
                .into_iter()
                .map(|(from, symbol, to)| (from.into(), symbol.into(), to.into())),
        );
        self
    }

    /// Builds the definition with the state `start_id` as its start state.
    pub fn into_definition(self, start_id: &str) -> Definition {
        let mut context = ParseContext::new(&self.epsilon_marker);
        for symbol in &self.symbols {
            context.symbol(symbol);
        }
        for id in &self.finals {
            context.final_state(id);
        }
        for (from, symbol, to) in &self.transitions {
            context.transition(from, symbol, to);
        }
        context.finish(start_id)
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use itertools::Itertools;

    #[test]
    fn builder_matches_parser() {
        let built = DefinitionBuilder::default()
            .with_final_states(["2"])
            .with_transitions([("0", "_", "1"), ("1", "a", "2")])
            .into_definition("0");
        let parsed = Definition::parse("2\n0 _ 1\n1 a 2\n").unwrap();
        assert_eq!(built, parsed);
    }

    #[test]
    fn forced_symbols_come_first() {
        let definition = Definition::builder()
            .with_epsilon_marker("$")
            .with_alphabet_symbols(["z"])
            .with_transitions([("0", "a", "0"), ("0", "$", "0")])
            .into_definition("0");
        assert_eq!(
            definition.alphabet().literals().collect_vec(),
            vec!["z", "a"]
        );
        assert!(definition.has_epsilon_transitions());
    }
}
