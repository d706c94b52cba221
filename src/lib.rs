//! Toolkit for finite automata over string-labelled states.
//!
//! An automaton is described by a [`Definition`], which is an arena of states (each identified by a
//! string id and carrying a flag marking it as final), a set of transitions labelled with
//! [`Symbol`]s and a designated start state. Definitions are read from and written to a simple
//! line based text format: the first line lists the ids of all final states, every subsequent line
//! is a transition `from symbol to`. A reserved symbol id (`_` by default) denotes an epsilon
//! transition.
//!
//! A definition on its own is inert. To check whether it accepts a word, it is wrapped in one of the
//! simulation engines [`automaton::EpsilonNfa`], [`automaton::Nfa`] or [`automaton::Dfa`], all of which
//! implement the [`Automaton`] trait. The engines differ only in how they advance their current
//! configuration (the set of active states) on a symbol.
//!
//! Conversions take a definition and produce a fresh one, the input is never modified. The
//! available conversions are
//! - [`Definition::eliminate_epsilon`], which removes epsilon transitions,
//! - [`Definition::subset_construction`], which determinizes a nondeterministic definition,
//! - [`Definition::remove_unreachable`] and [`Definition::remove_dead_ends`], which prune states,
//! - [`Definition::merge_equivalent`], which merges indistinguishable states of a DFA,
//! - [`Definition::canonicalize`], which collapses structurally identical states and renames all
//!   states to small sequential ids.
//!
//! The [`pipeline`] module chains these into the three classic exercises (epsilon-NFA to NFA,
//! NFA to DFA and DFA minimization), and [`query`] turns raw input lines into words that can be fed
//! to an automaton.
#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use fa_toolkit::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        alphabet::{Alphabet, Symbol},
        automaton::{
            AnyAutomaton, Automaton, Configuration, Dfa, EpsilonNfa, Nfa, Status, Variant,
        },
        definition::{
            Definition, DefinitionBuilder, ParseContext, ParseError, ParseOptions, State,
            StateIndex, Transition, DEFAULT_EPSILON_MARKER, DEFAULT_START_ID,
        },
        math,
        operations::{ConversionError, MAX_SUBSET_STATES},
        pipeline::{Pipeline, Stage, Trace},
        query::{serve_line, Query, QueryError, SymbolPolicy},
        Error, Show,
    };
}

/// This module contains the collection types which are used throughout the crate.
pub mod math;

/// Symbols and the interned alphabet of a definition.
pub mod alphabet;
pub use alphabet::{Alphabet, Symbol};

/// Definitions, i.e. the states and transitions of an automaton, together with parsing and serialization.
pub mod definition;
pub use definition::Definition;

/// Simulation engines that decide acceptance of words.
pub mod automaton;
pub use automaton::{Automaton, Status};

/// Conversions between definitions.
pub mod operations;

/// Named sequences of conversions.
pub mod pipeline;

/// Turning raw input into words.
pub mod query;

/// Generation of random definitions and words. This is feature gated behind the `random` feature.
#[cfg(feature = "random")]
pub mod random;

/// Umbrella error type, wrapping the errors of every stage of the toolkit.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The definition text could not be parsed.
    #[error(transparent)]
    Parse(#[from] definition::ParseError),
    /// A conversion could not be applied.
    #[error(transparent)]
    Conversion(#[from] operations::ConversionError),
    /// An input line could not be turned into a word.
    #[error(transparent)]
    Query(#[from] query::QueryError),
    /// Reading input failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Helper trait which can be used to display states, transitions and such.
pub trait Show {
    /// Returns a human readable representation of `self`. For a state this is its id, for a
    /// transition `(from, symbol, to)` it is `(from, symbol, to)`. This is mainly used for
    /// logging and debugging purposes.
    fn show(&self) -> String;

    /// Show a collection of the thing, for a collection of states this should be `{q0, q1, ...}`.
    fn show_collection<'a, I>(iter: I) -> String
    where
        Self: 'a,
        I: IntoIterator<Item = &'a Self>,
    {
        format!(
            "{{{}}}",
            itertools::Itertools::join(&mut iter.into_iter().map(|x| x.show()), ", ")
        )
    }
}

impl Show for String {
    fn show(&self) -> String {
        self.clone()
    }
}

impl Show for str {
    fn show(&self) -> String {
        self.to_string()
    }
}

impl Show for bool {
    fn show(&self) -> String {
        match self {
            true => "+",
            false => "-",
        }
        .to_string()
    }
}

impl<S: Show + ?Sized> Show for &S {
    fn show(&self) -> String {
        S::show(*self)
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    /// A DFA for `a+`.
    pub fn a_plus() -> Definition {
        DefinitionBuilder::default()
            .with_final_states(["1"])
            .with_transitions([("0", "a", "1"), ("1", "a", "1")])
            .into_definition("0")
    }

    /// An epsilon-NFA for `a*b | c`, where the start state branches with epsilon transitions.
    pub fn branching_lnfa() -> Definition {
        Definition::parse("3 5\n0 _ 1\n0 _ 4\n1 a 1\n1 _ 2\n2 b 3\n4 c 5\n").unwrap()
    }

    #[test]
    fn show_collections() {
        assert_eq!(
            String::show_collection(&["0".to_string(), "1".to_string()]),
            "{0, 1}"
        );
        assert_eq!(true.show(), "+");
        assert_eq!(a_plus().size(), 2);
        assert_eq!(branching_lnfa().size(), 6);
    }
}
