use fastrand::Rng;
use tracing::trace;

use crate::{
    alphabet::Alphabet,
    definition::{Definition, ParseContext, DEFAULT_EPSILON_MARKER, DEFAULT_START_ID},
    Symbol,
};

/// Names the `i`-th generated symbol: `a`, `b`, ... and `s26`, `s27`, ... once the latin
/// alphabet is exhausted.
fn symbol_name(i: usize) -> String {
    match u8::try_from(i) {
        Ok(offset) if offset < 26 => char::from(b'a' + offset).to_string(),
        _ => format!("s{i}"),
    }
}

fn fresh_context(states: usize, rng: &mut Rng) -> ParseContext {
    let mut context = ParseContext::new(DEFAULT_EPSILON_MARKER);
    for q in 0..states.max(1) {
        let id = q.to_string();
        if rng.bool() {
            context.final_state(&id);
        } else {
            context.state(&id);
        }
    }
    context
}

/// Generates a random definition with states `0`, `1`, ... (`0` being the start state) over the
/// symbols `a`, `b`, ... . Every state is final with probability one half. For every pair of
/// states and every symbol a transition is inserted with probability `density`, and every pair
/// of distinct states is connected by an epsilon transition with probability
/// `epsilon_probability`. The result is usually nondeterministic.
pub fn random_definition(
    rng: &mut Rng,
    states: usize,
    symbols: usize,
    density: f64,
    epsilon_probability: f64,
) -> Definition {
    let mut context = fresh_context(states, rng);
    let n = context.size();

    for p in 0..n {
        for q in 0..n {
            for i in 0..symbols {
                if rng.f64() < density {
                    context.add_transition(p, Symbol::literal(symbol_name(i)), q);
                }
            }
            if p != q && rng.f64() < epsilon_probability {
                context.add_transition(p, Symbol::Epsilon, q);
            }
        }
    }

    let definition = context.finish(DEFAULT_START_ID);
    trace!("generated random definition\n{definition}");
    definition
}

/// Generates a random DFA with states `0`, `1`, ... (`0` being the start state) over the
/// symbols `a`, `b`, ... . Every state has a transition on each symbol with probability
/// `density`, its target is drawn uniformly.
pub fn random_dfa(rng: &mut Rng, states: usize, symbols: usize, density: f64) -> Definition {
    let mut context = fresh_context(states, rng);
    let n = context.size();

    for p in 0..n {
        for i in 0..symbols {
            if rng.f64() < density {
                let q = rng.usize(..n);
                context.add_transition(p, Symbol::literal(symbol_name(i)), q);
            }
        }
    }

    let definition = context.finish(DEFAULT_START_ID);
    trace!("generated random DFA\n{definition}");
    definition
}

/// Draws a word whose length lies in `min_len..=max_len` and whose symbols are drawn uniformly
/// from the literals of `alphabet`. Over an empty alphabet, the empty word is returned.
pub fn random_word(
    rng: &mut Rng,
    alphabet: &Alphabet,
    min_len: usize,
    max_len: usize,
) -> Vec<String> {
    let literals: Vec<&str> = alphabet.literals().collect();
    if literals.is_empty() {
        return vec![];
    }
    let len = rng.usize(min_len..=max_len.max(min_len));
    (0..len)
        .map(|_| literals[rng.usize(..literals.len())].to_string())
        .collect()
}
