use itertools::Itertools;
use tracing::debug;

use crate::{
    automaton::{Automaton, Configuration, EpsilonNfa},
    definition::{Definition, ParseContext},
    Symbol,
};

impl Definition {
    /// Removes all epsilon transitions while preserving the accepted language.
    ///
    /// For every state `s` and every literal `a`, the state `s` receives a direct transition on
    /// `a` to every state that an epsilon-NFA started in `s` reaches by reading `a`. A state
    /// becomes final if a final state is reachable from it through epsilon transitions alone.
    /// The states (and their order) as well as the start state stay the same.
    pub fn eliminate_epsilon(&self) -> Definition {
        let literals = self.alphabet().literals().collect_vec();
        let mut context = ParseContext::with_alphabet(self.alphabet().without_epsilon());
        for state in self.states() {
            context.push_state(state.clone());
        }

        let mut lnfa = EpsilonNfa::new(self);
        for s in self.indices() {
            let root = Configuration::from([s]);
            for &a in &literals {
                lnfa.set_configuration(root.clone());
                for &t in lnfa.advance(a) {
                    context.add_transition(s, Symbol::literal(a), t);
                }
            }
            if lnfa.closure(&root).iter().any(|&q| self.is_final(q)) {
                context.final_state(self.id(s));
            }
        }

        let nfa = context.finish(self.start_state().id());
        debug!(
            "eliminated epsilon transitions, {} transitions became {}",
            self.transitions().len(),
            nfa.transitions().len()
        );
        nfa
    }
}
