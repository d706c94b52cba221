use std::fmt::Display;

use bit_set::BitSet;
use itertools::Itertools;

use crate::{alphabet::Alphabet, math::Map, Show, Symbol};

mod builder;
pub use builder::DefinitionBuilder;

mod context;
pub use context::ParseContext;

mod parse;
pub use parse::{ParseError, ParseOptions, DEFAULT_EPSILON_MARKER, DEFAULT_START_ID};

/// Position of a state in the arena of the [`Definition`] it belongs to. Indices are only
/// meaningful within one definition, across definitions states are identified by their id.
pub type StateIndex = usize;

/// A state, identified by its id and marked as final or not.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct State {
    id: String,
    is_final: bool,
}

impl State {
    /// Creates a new state.
    pub fn new<S: Into<String>>(id: S, is_final: bool) -> Self {
        Self {
            id: id.into(),
            is_final,
        }
    }

    /// The id of the state.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether the state is final (accepting).
    pub fn is_final(&self) -> bool {
        self.is_final
    }

    pub(crate) fn set_final(&mut self, is_final: bool) {
        self.is_final = is_final;
    }
}

impl Show for State {
    fn show(&self) -> String {
        if self.is_final {
            format!("[{}]", self.id)
        } else {
            self.id.clone()
        }
    }
}

/// A transition `from --symbol--> to` between two states of the same definition.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Transition {
    from: StateIndex,
    symbol: Symbol,
    to: StateIndex,
}

impl Transition {
    /// Creates a new transition.
    pub fn new(from: StateIndex, symbol: Symbol, to: StateIndex) -> Self {
        Self { from, symbol, to }
    }

    /// The index of the source state.
    pub fn from(&self) -> StateIndex {
        self.from
    }

    /// The symbol labelling the transition.
    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    /// The index of the target state.
    pub fn to(&self) -> StateIndex {
        self.to
    }
}

/// The description of an automaton: an arena of states, a set of transitions between them,
/// a designated start state and the alphabet the transitions are labelled with.
///
/// A definition is immutable. It can only be created through a [`ParseContext`] (which is what
/// [`Definition::parse`] and [`DefinitionBuilder`] use), which guarantees that the start state
/// and the endpoints of every transition are members of the state arena. All conversions
/// produce a fresh definition.
///
/// The [`Display`] implementation produces the text format that [`Definition::parse`] reads.
///
/// # Example
/// ```
/// use fa_toolkit::prelude::*;
///
/// let definition = Definition::parse("1\n0 a 1\n1 a 1\n").unwrap();
/// assert_eq!(definition.size(), 2);
/// assert_eq!(definition.to_string(), "1\n0 a 1\n1 a 1\n");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Definition {
    states: Vec<State>,
    index: Map<String, StateIndex>,
    transitions: Vec<Transition>,
    start: StateIndex,
    alphabet: Alphabet,
}

impl Definition {
    /// Returns a [`DefinitionBuilder`] using the default epsilon marker.
    pub fn builder() -> DefinitionBuilder {
        DefinitionBuilder::default()
    }

    /// The number of states.
    pub fn size(&self) -> usize {
        self.states.len()
    }

    /// All states, in arena order.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Returns the state at `index`.
    ///
    /// # Panics
    /// If `index` does not belong to this definition.
    pub fn state(&self, index: StateIndex) -> &State {
        &self.states[index]
    }

    /// Returns the id of the state at `index`.
    pub fn id(&self, index: StateIndex) -> &str {
        self.states[index].id()
    }

    /// Looks up the index of the state with the given id.
    pub fn index_of(&self, id: &str) -> Option<StateIndex> {
        self.index.get(id).copied()
    }

    /// Returns true if a state with the given id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Iterates over the indices of all states.
    pub fn indices(&self) -> std::ops::Range<StateIndex> {
        0..self.states.len()
    }

    /// Whether the state at `index` is final.
    pub fn is_final(&self, index: StateIndex) -> bool {
        self.states[index].is_final()
    }

    /// Iterates over all final states.
    pub fn final_states(&self) -> impl Iterator<Item = &State> + '_ {
        self.states.iter().filter(|state| state.is_final())
    }

    /// All transitions, in insertion order.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// The index of the start state.
    pub fn start(&self) -> StateIndex {
        self.start
    }

    /// The start state.
    pub fn start_state(&self) -> &State {
        &self.states[self.start]
    }

    /// The alphabet the definition was built with.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Returns true if at least one transition is labelled with epsilon.
    pub fn has_epsilon_transitions(&self) -> bool {
        self.transitions.iter().any(|t| t.symbol().is_epsilon())
    }

    /// Returns the first transition that violates determinism, that is an epsilon transition or a
    /// transition leaving a state on a literal for which an earlier transition from that state
    /// already exists.
    pub fn nondeterministic_transition(&self) -> Option<&Transition> {
        let mut seen = crate::math::Set::default();
        self.transitions
            .iter()
            .find(|t| t.symbol().is_epsilon() || !seen.insert((t.from(), t.symbol())))
    }

    /// Returns true if there are no epsilon transitions and no state has two transitions on the
    /// same symbol.
    pub fn is_deterministic(&self) -> bool {
        self.nondeterministic_transition().is_none()
    }

    /// Renders a transition as `(from, symbol, to)`.
    pub fn show_transition(&self, transition: &Transition) -> String {
        format!(
            "({}, {}, {})",
            self.id(transition.from()),
            transition.symbol().show(),
            self.id(transition.to())
        )
    }

    /// Builds the definition that keeps only the states in `keep` (and always the start
    /// state) together with the transitions between them. States keep their relative order.
    pub(crate) fn restrict(&self, keep: &BitSet) -> Definition {
        let mut context = ParseContext::with_alphabet(self.alphabet.clone());
        for q in self.indices() {
            if q == self.start || keep.contains(q) {
                context.push_state(self.states[q].clone());
            }
        }
        for t in &self.transitions {
            if keep.contains(t.from()) && keep.contains(t.to()) {
                context.transition_between(self.id(t.from()), t.symbol().clone(), self.id(t.to()));
            }
        }
        context.finish(self.start_state().id())
    }
}

impl Display for Definition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.final_states().map(State::id).join(" "))?;
        for t in &self.transitions {
            writeln!(
                f,
                "{} {} {}",
                self.id(t.from()),
                self.alphabet.render(t.symbol()),
                self.id(t.to())
            )?;
        }
        Ok(())
    }
}
