use std::fmt::Display;

use itertools::Itertools;

use crate::{
    definition::{Definition, StateIndex},
    math, Show,
};

mod graph;
pub use graph::Graph;

mod epsilon_nfa;
pub use epsilon_nfa::EpsilonNfa;

mod nfa;
pub use nfa::Nfa;

mod dfa;
pub use dfa::Dfa;

/// The set of currently active states of an automaton. It is ordered by state index, so
/// iterating over it is deterministic.
pub type Configuration = math::OrderedSet<StateIndex>;

/// The outcome of feeding a word to an automaton.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Some active state is final.
    Accepted,
    /// There are active states, but none of them is final.
    Rejected,
    /// No state is active anymore, the automaton got stuck.
    Aborted,
}

impl Status {
    /// Computes the status of `configuration` in `definition`.
    pub fn of(definition: &Definition, configuration: &Configuration) -> Self {
        if configuration.is_empty() {
            Status::Aborted
        } else if configuration.iter().any(|&q| definition.is_final(q)) {
            Status::Accepted
        } else {
            Status::Rejected
        }
    }

    /// Returns true if `self` is [`Status::Accepted`].
    pub fn is_accepted(self) -> bool {
        self == Status::Accepted
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Status::Accepted => "Accepted",
            Status::Rejected => "Rejected",
            Status::Aborted => "Aborted",
        };
        write!(f, "{name}")
    }
}

impl Show for Status {
    fn show(&self) -> String {
        self.to_string()
    }
}

/// A simulation engine over a [`Definition`]. The engine keeps a current [`Configuration`]
/// which is changed by [`Automaton::advance`] and restored by [`Automaton::reset`]. The
/// variants only differ in how they advance:
/// - [`EpsilonNfa`] follows epsilon transitions before and after every symbol,
/// - [`Nfa`] follows all transitions on the symbol and ignores epsilon transitions,
/// - [`Dfa`] follows a single transition and gets stuck once there is none.
pub trait Automaton {
    /// The definition the engine runs on.
    fn definition(&self) -> &Definition;

    /// The state the engine is rooted in, [`Automaton::reset`] returns to it. This is the start
    /// state of the definition unless the engine was explicitly rooted elsewhere.
    fn root(&self) -> StateIndex;

    /// The currently active states.
    fn configuration(&self) -> &Configuration;

    /// Replaces the currently active states.
    fn set_configuration(&mut self, configuration: Configuration);

    /// Consumes the literal symbol with id `literal` and returns the new configuration. A
    /// literal never matches an epsilon transition.
    fn advance(&mut self, literal: &str) -> &Configuration;

    /// Restores the configuration to the singleton set containing the root.
    fn reset(&mut self) {
        let root = self.root();
        self.set_configuration(Configuration::from([root]));
    }

    /// Gives the status of the current configuration.
    fn status(&self) -> Status {
        Status::of(self.definition(), self.configuration())
    }

    /// Feeds the symbols of `word` one after the other and returns the resulting status. This
    /// does not reset the engine beforehand.
    fn run<I, S>(&mut self, word: I) -> Status
    where
        Self: Sized,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for symbol in word {
            self.advance(symbol.as_ref());
        }
        self.status()
    }

    /// Resets the engine, runs `word` and returns true if it is accepted.
    fn accepts<I, S>(&mut self, word: I) -> bool
    where
        Self: Sized,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.reset();
        self.run(word).is_accepted()
    }

    /// The ids of the active states, sorted.
    fn configuration_ids(&self) -> Vec<&str> {
        self.configuration()
            .iter()
            .map(|&q| self.definition().id(q))
            .sorted()
            .collect()
    }

    /// Renders the active states as `{q0, q1, ...}`.
    fn show_configuration(&self) -> String {
        <str as Show>::show_collection(self.configuration_ids())
    }
}

/// Names the three simulation engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// See [`EpsilonNfa`].
    EpsilonNfa,
    /// See [`Nfa`].
    Nfa,
    /// See [`Dfa`].
    Dfa,
}

impl Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Variant::EpsilonNfa => "epsilon-NFA",
            Variant::Nfa => "NFA",
            Variant::Dfa => "DFA",
        };
        write!(f, "{name}")
    }
}

/// One of the three simulation engines, chosen at runtime.
#[derive(Debug, Clone)]
pub enum AnyAutomaton<'a> {
    /// An [`EpsilonNfa`].
    EpsilonNfa(EpsilonNfa<'a>),
    /// An [`Nfa`].
    Nfa(Nfa<'a>),
    /// A [`Dfa`].
    Dfa(Dfa<'a>),
}

impl<'a> AnyAutomaton<'a> {
    /// Creates the engine of the given variant over `definition`.
    pub fn new(definition: &'a Definition, variant: Variant) -> Self {
        match variant {
            Variant::EpsilonNfa => AnyAutomaton::EpsilonNfa(EpsilonNfa::new(definition)),
            Variant::Nfa => AnyAutomaton::Nfa(Nfa::new(definition)),
            Variant::Dfa => AnyAutomaton::Dfa(Dfa::new(definition)),
        }
    }

    /// Which engine `self` is.
    pub fn variant(&self) -> Variant {
        match self {
            AnyAutomaton::EpsilonNfa(_) => Variant::EpsilonNfa,
            AnyAutomaton::Nfa(_) => Variant::Nfa,
            AnyAutomaton::Dfa(_) => Variant::Dfa,
        }
    }
}

impl Automaton for AnyAutomaton<'_> {
    fn definition(&self) -> &Definition {
        match self {
            AnyAutomaton::EpsilonNfa(a) => a.definition(),
            AnyAutomaton::Nfa(a) => a.definition(),
            AnyAutomaton::Dfa(a) => a.definition(),
        }
    }

    fn root(&self) -> StateIndex {
        match self {
            AnyAutomaton::EpsilonNfa(a) => a.root(),
            AnyAutomaton::Nfa(a) => a.root(),
            AnyAutomaton::Dfa(a) => a.root(),
        }
    }

    fn configuration(&self) -> &Configuration {
        match self {
            AnyAutomaton::EpsilonNfa(a) => a.configuration(),
            AnyAutomaton::Nfa(a) => a.configuration(),
            AnyAutomaton::Dfa(a) => a.configuration(),
        }
    }

    fn set_configuration(&mut self, configuration: Configuration) {
        match self {
            AnyAutomaton::EpsilonNfa(a) => a.set_configuration(configuration),
            AnyAutomaton::Nfa(a) => a.set_configuration(configuration),
            AnyAutomaton::Dfa(a) => a.set_configuration(configuration),
        }
    }

    fn advance(&mut self, literal: &str) -> &Configuration {
        match self {
            AnyAutomaton::EpsilonNfa(a) => a.advance(literal),
            AnyAutomaton::Nfa(a) => a.advance(literal),
            AnyAutomaton::Dfa(a) => a.advance(literal),
        }
    }

    fn status(&self) -> Status {
        match self {
            AnyAutomaton::EpsilonNfa(a) => a.status(),
            AnyAutomaton::Nfa(a) => a.status(),
            AnyAutomaton::Dfa(a) => a.status(),
        }
    }
}

impl Definition {
    /// Wraps `self` in the simulation engine of the given variant.
    pub fn automaton(&self, variant: Variant) -> AnyAutomaton<'_> {
        AnyAutomaton::new(self, variant)
    }

    /// Runs `word` from the start state on the engine of the given variant.
    pub fn run<I, S>(&self, variant: Variant, word: I) -> Status
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.automaton(variant).run(word)
    }

    /// Returns true if the engine of the given variant accepts `word`.
    pub fn accepts<I, S>(&self, variant: Variant, word: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.run(variant, word).is_accepted()
    }

    /// Searches for a word of length at most `max_len` that is accepted by exactly one of
    /// `self` (simulated as `variant`) and `other` (simulated as `other_variant`). Words are
    /// drawn from the union of both alphabets and tried shortest first. Returns `None` if the
    /// two agree on all such words.
    pub fn distinguishing_word(
        &self,
        variant: Variant,
        other: &Definition,
        other_variant: Variant,
        max_len: usize,
    ) -> Option<Vec<String>> {
        let alphabet = crate::Alphabet::from_ids(
            self.alphabet().epsilon_marker(),
            self.alphabet().literals().chain(other.alphabet().literals()),
        );
        let mut left = self.automaton(variant);
        let mut right = other.automaton(other_variant);

        alphabet
            .words_up_to(max_len)
            .into_iter()
            .find(|word| left.accepts(word) != right.accepts(word))
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn dfa_example() {
        let definition = crate::tests::a_plus();
        let mut dfa = Dfa::new(&definition);

        assert_eq!(dfa.run(["a"]), Status::Accepted);
        dfa.reset();
        assert_eq!(dfa.run(["a", "a"]), Status::Accepted);
        dfa.reset();
        assert_eq!(dfa.run(Vec::<&str>::new()), Status::Rejected);
        dfa.reset();
        assert_eq!(dfa.run(["b"]), Status::Aborted);
    }

    #[test]
    fn variants_are_interchangeable() {
        let definition = crate::tests::a_plus();
        for variant in [Variant::EpsilonNfa, Variant::Nfa, Variant::Dfa] {
            let mut automaton = definition.automaton(variant);
            assert_eq!(automaton.variant(), variant);
            assert!(automaton.accepts(["a", "a", "a"]));
            assert!(!automaton.accepts(["a", "b"]));
            assert_eq!(automaton.status(), Status::Aborted);
            automaton.reset();
            assert_eq!(automaton.show_configuration(), "{0}");
        }
    }

    #[test]
    fn distinguishing_words() {
        let a_plus = crate::tests::a_plus();
        let a_star = Definition::parse("0\n0 a 0\n").unwrap();

        assert_eq!(
            a_plus.distinguishing_word(Variant::Dfa, &a_star, Variant::Dfa, 3),
            Some(vec![])
        );
        assert_eq!(
            a_plus.distinguishing_word(Variant::Dfa, &a_plus, Variant::Nfa, 3),
            None
        );
    }

    #[test]
    fn status_display() {
        assert_eq!(Status::Accepted.to_string(), "Accepted");
        assert_eq!(Status::Aborted.show(), "Aborted");
        assert_eq!(Variant::EpsilonNfa.to_string(), "epsilon-NFA");
    }
}
