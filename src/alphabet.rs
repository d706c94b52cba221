use std::fmt::Display;

use crate::{math::Map, Show};

/// A symbol labels a transition. It is either the distinguished epsilon symbol, which can be
/// taken without consuming input, or a literal identified by its id. Two literals are equal
/// if and only if their ids are equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Symbol {
    /// The empty word, a transition labelled with it is an epsilon transition.
    Epsilon,
    /// A literal symbol with the given id.
    Literal(String),
}

impl Symbol {
    /// Creates a literal symbol with the given id.
    pub fn literal<S: Into<String>>(id: S) -> Self {
        Symbol::Literal(id.into())
    }

    /// Returns true if `self` is the epsilon symbol.
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }

    /// Returns the id of `self` if it is a literal.
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Symbol::Epsilon => None,
            Symbol::Literal(id) => Some(id),
        }
    }

    /// Returns true if `self` is the literal with id `id`. Epsilon matches no literal.
    pub fn matches(&self, id: &str) -> bool {
        self.as_literal() == Some(id)
    }
}

impl Show for Symbol {
    fn show(&self) -> String {
        match self {
            Symbol::Epsilon => "ε".to_string(),
            Symbol::Literal(id) => id.clone(),
        }
    }
}

/// The interned alphabet of a [`crate::Definition`]. It records the marker that denotes epsilon
/// in the text format as well as every symbol that occurred, in the order of its first
/// occurrence. This order is the fixed symbol order every algorithm iterates in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alphabet {
    epsilon_marker: String,
    symbols: Vec<Symbol>,
    index: Map<String, usize>,
}

impl Alphabet {
    /// Creates an empty alphabet, in which `epsilon_marker` is the id of the epsilon symbol.
    pub fn new<S: Into<String>>(epsilon_marker: S) -> Self {
        Self {
            epsilon_marker: epsilon_marker.into(),
            symbols: vec![],
            index: Map::default(),
        }
    }

    /// Creates an alphabet from the given symbol ids, which are interned in order.
    pub fn from_ids<'a, S, I>(epsilon_marker: S, ids: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = &'a str>,
    {
        let mut alphabet = Self::new(epsilon_marker);
        for id in ids {
            alphabet.intern(id);
        }
        alphabet
    }

    /// Returns the symbol with id `id`, creating it if it is not yet known. The first
    /// occurrence of an id wins, so interning is idempotent.
    pub fn intern(&mut self, id: &str) -> Symbol {
        if let Some(&position) = self.index.get(id) {
            return self.symbols[position].clone();
        }
        let symbol = if id == self.epsilon_marker {
            Symbol::Epsilon
        } else {
            Symbol::literal(id)
        };
        self.index.insert(id.to_string(), self.symbols.len());
        self.symbols.push(symbol.clone());
        symbol
    }

    /// Looks up the symbol with id `id` without interning it.
    pub fn get(&self, id: &str) -> Option<&Symbol> {
        self.index.get(id).map(|&position| &self.symbols[position])
    }

    /// Returns true if `id` is the id of a known symbol.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// The id that denotes epsilon.
    pub fn epsilon_marker(&self) -> &str {
        &self.epsilon_marker
    }

    /// Returns true if epsilon has been interned.
    pub fn has_epsilon(&self) -> bool {
        self.symbols.iter().any(Symbol::is_epsilon)
    }

    /// Iterates over the ids of all literal symbols in order of their first occurrence.
    pub fn literals(&self) -> impl Iterator<Item = &str> + '_ {
        self.symbols.iter().filter_map(Symbol::as_literal)
    }

    /// Iterates over all symbols (including epsilon if present).
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> + '_ {
        self.symbols.iter()
    }

    /// The number of literal symbols.
    pub fn size(&self) -> usize {
        self.literals().count()
    }

    /// Returns true if there are no literal symbols.
    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Returns a copy of `self` from which the epsilon symbol has been removed. The marker is
    /// kept, so the resulting alphabet still recognizes it when interning.
    pub fn without_epsilon(&self) -> Self {
        Self::from_ids(self.epsilon_marker.clone(), self.literals())
    }

    /// Enumerates all words over the literal symbols of length at most `max_len`, shortest
    /// first. The number of words grows exponentially in `max_len`.
    pub fn words_up_to(&self, max_len: usize) -> Vec<Vec<String>> {
        let literals: Vec<&str> = self.literals().collect();
        let mut words = vec![vec![]];
        let mut frontier: Vec<Vec<String>> = vec![vec![]];
        for _ in 0..max_len {
            frontier = frontier
                .iter()
                .flat_map(|word| {
                    literals.iter().map(move |&a| {
                        let mut extended = word.clone();
                        extended.push(a.to_string());
                        extended
                    })
                })
                .collect();
            words.extend(frontier.iter().cloned());
        }
        words
    }

    /// Gives the id under which `symbol` is written in the text format.
    pub fn render<'a>(&'a self, symbol: &'a Symbol) -> &'a str {
        match symbol {
            Symbol::Epsilon => &self.epsilon_marker,
            Symbol::Literal(id) => id,
        }
    }
}

impl Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", Symbol::show_collection(self.symbols.iter()))
    }
}
