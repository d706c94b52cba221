use tracing::trace;

use crate::{
    alphabet::Alphabet,
    math::{Map, Set},
    Symbol,
};

use super::{Definition, State, StateIndex, Transition};

/// The interning tables used while a [`Definition`] is being assembled: states by id, symbols
/// by id and the set of transitions seen so far. A context is created fresh for every parse or
/// conversion and consumed by [`ParseContext::finish`], so nothing leaks between calls.
///
/// The context reproduces the semantics of the text format. States appear in the order in
/// which they are first mentioned, mentioning a state that does not yet exist creates it as
/// non-final, and inserting a transition that already exists does nothing.
#[derive(Debug, Clone)]
pub struct ParseContext {
    alphabet: Alphabet,
    states: Vec<State>,
    index: Map<String, StateIndex>,
    transitions: Vec<Transition>,
    seen: Set<Transition>,
}

impl ParseContext {
    /// Creates an empty context whose alphabet treats `epsilon_marker` as epsilon.
    pub fn new(epsilon_marker: &str) -> Self {
        Self::with_alphabet(Alphabet::new(epsilon_marker))
    }

    /// Creates an empty context that continues interning into the given alphabet. Conversions
    /// use this to carry the alphabet of their input over to their output.
    pub fn with_alphabet(alphabet: Alphabet) -> Self {
        Self {
            alphabet,
            states: vec![],
            index: Map::default(),
            transitions: vec![],
            seen: Set::default(),
        }
    }

    /// The alphabet interned so far.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// The number of states created so far.
    pub fn size(&self) -> usize {
        self.states.len()
    }

    /// Returns the index of the state with id `id`, creating a non-final state if necessary.
    pub fn state(&mut self, id: &str) -> StateIndex {
        if let Some(&q) = self.index.get(id) {
            return q;
        }
        let q = self.states.len();
        self.states.push(State::new(id, false));
        self.index.insert(id.to_string(), q);
        q
    }

    /// Returns the index of the state with id `id` after marking it as final, creating it if
    /// necessary.
    pub fn final_state(&mut self, id: &str) -> StateIndex {
        let q = self.state(id);
        self.states[q].set_final(true);
        q
    }

    /// Inserts a copy of `state`. If a state with the same id exists already, it becomes final
    /// if `state` is final.
    pub fn push_state(&mut self, state: State) -> StateIndex {
        if state.is_final() {
            self.final_state(state.id())
        } else {
            self.state(state.id())
        }
    }

    /// Interns the symbol with id `id`.
    pub fn symbol(&mut self, id: &str) -> Symbol {
        self.alphabet.intern(id)
    }

    /// Inserts the transition `from --symbol--> to` between the given state indices. Returns
    /// `false` if the transition existed already.
    pub fn add_transition(&mut self, from: StateIndex, symbol: Symbol, to: StateIndex) -> bool {
        assert!(
            from < self.states.len() && to < self.states.len(),
            "transition endpoints must be states of this context"
        );
        match &symbol {
            Symbol::Epsilon => {
                let marker = self.alphabet.epsilon_marker().to_string();
                self.alphabet.intern(&marker);
            }
            Symbol::Literal(id) => {
                self.alphabet.intern(id);
            }
        }

        let transition = Transition::new(from, symbol, to);
        if !self.seen.insert(transition.clone()) {
            trace!(
                "dropping duplicate transition ({}, {:?}, {})",
                self.states[from].id(),
                transition.symbol(),
                self.states[to].id()
            );
            return false;
        }
        self.transitions.push(transition);
        true
    }

    /// Inserts a transition between the states with the given ids, creating them as needed.
    pub fn transition_between(&mut self, from: &str, symbol: Symbol, to: &str) -> bool {
        let from = self.state(from);
        let to = self.state(to);
        self.add_transition(from, symbol, to)
    }

    /// Inserts the transition described by a line `from symbol to` of the text format.
    pub fn transition(&mut self, from: &str, symbol: &str, to: &str) -> bool {
        let from = self.state(from);
        let to = self.state(to);
        let symbol = self.symbol(symbol);
        self.add_transition(from, symbol, to)
    }

    /// Consumes the context and produces the [`Definition`] whose start state has id
    /// `start_id`. If no such state exists, it is created as a non-final state.
    pub fn finish(mut self, start_id: &str) -> Definition {
        let start = self.state(start_id);
        Definition {
            states: self.states,
            index: self.index,
            transitions: self.transitions,
            start,
            alphabet: self.alphabet,
        }
    }
}
