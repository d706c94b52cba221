use std::fmt::Display;

use thiserror::Error;
use tracing::trace;

use crate::{
    alphabet::Alphabet,
    automaton::{Automaton, Status},
};

/// Decides what happens with characters of a query that are not symbols of the alphabet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SymbolPolicy {
    /// Unknown characters are kept as literals. Since no transition is labelled with them,
    /// reading one makes every engine abort.
    #[default]
    Intern,
    /// Unknown characters are rejected with [`QueryError::UnknownSymbol`].
    Reject,
}

/// Errors that can occur when turning an input line into a [`Query`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// The line contains a character that is not a symbol of the alphabet.
    #[error("unknown symbol `{0}`")]
    UnknownSymbol(String),
}

/// A word to be fed to an automaton, obtained from one line of input. Every character of the
/// line is one literal symbol.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    symbols: Vec<String>,
}

impl Query {
    /// Splits `line` into one-character symbols. Trailing line terminators are removed and
    /// characters equal to the epsilon marker of `alphabet` are skipped, as epsilon is never
    /// read. What happens with characters the alphabet does not know is decided by `policy`.
    pub fn from_line(
        line: &str,
        alphabet: &Alphabet,
        policy: SymbolPolicy,
    ) -> Result<Self, QueryError> {
        let line = line.trim_end_matches(&['\r', '\n'][..]);
        let mut symbols = Vec::with_capacity(line.len());

        for c in line.chars() {
            let id = c.to_string();
            if id == alphabet.epsilon_marker() {
                trace!("skipping epsilon marker in query");
                continue;
            }
            if policy == SymbolPolicy::Reject && !alphabet.contains(&id) {
                return Err(QueryError::UnknownSymbol(id));
            }
            symbols.push(id);
        }

        Ok(Self { symbols })
    }

    /// The symbols of the query.
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// The number of symbols.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if the query is the empty word.
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Runs the query on `automaton` from its root and returns the resulting status. The
    /// automaton is reset afterwards, so it can serve the next query right away.
    pub fn serve<A: Automaton>(&self, automaton: &mut A) -> Status {
        automaton.reset();
        let status = automaton.run(&self.symbols);
        trace!("{self} ends in {}: {status}", automaton.show_configuration());
        automaton.reset();
        status
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\"", self.symbols.concat())
    }
}

/// Turns `line` into a [`Query`] over the alphabet of the automaton and serves it.
pub fn serve_line<A: Automaton>(
    automaton: &mut A,
    line: &str,
    policy: SymbolPolicy,
) -> Result<Status, QueryError> {
    let query = Query::from_line(line, automaton.definition().alphabet(), policy)?;
    Ok(query.serve(automaton))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;

    #[test]
    fn serves_dfa_queries() {
        let definition = crate::tests::a_plus();
        let mut dfa = Dfa::new(&definition);
        let policy = SymbolPolicy::default();

        assert_eq!(serve_line(&mut dfa, "a", policy), Ok(Status::Accepted));
        assert_eq!(serve_line(&mut dfa, "aaa\r\n", policy), Ok(Status::Accepted));
        assert_eq!(serve_line(&mut dfa, "", policy), Ok(Status::Rejected));
        assert_eq!(serve_line(&mut dfa, "b", policy), Ok(Status::Aborted));
        assert_eq!(serve_line(&mut dfa, "ab", policy), Ok(Status::Aborted));
        assert_eq!(dfa.show_configuration(), "{0}");
    }

    #[test]
    fn rejecting_policy() {
        let definition = crate::tests::a_plus();
        let mut nfa = Nfa::new(&definition);

        assert_eq!(
            serve_line(&mut nfa, "aba", SymbolPolicy::Reject),
            Err(QueryError::UnknownSymbol("b".to_string()))
        );
        assert_eq!(
            serve_line(&mut nfa, "aa", SymbolPolicy::Reject),
            Ok(Status::Accepted)
        );
    }

    #[test]
    fn epsilon_markers_are_skipped() {
        let definition = Definition::parse("2\n0 _ 1\n1 a 2\n").unwrap();
        let query =
            Query::from_line("_a_", definition.alphabet(), SymbolPolicy::Reject).unwrap();
        assert_eq!(query.symbols(), ["a".to_string()]);
        assert_eq!(query.len(), 1);
        assert_eq!(query.to_string(), "\"a\"");

        let mut lnfa = definition.automaton(Variant::EpsilonNfa);
        assert_eq!(query.serve(&mut lnfa), Status::Accepted);
        assert_eq!(
            serve_line(&mut lnfa, "", SymbolPolicy::Intern),
            Ok(Status::Rejected)
        );
    }
}
