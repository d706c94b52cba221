use std::{fmt::Display, str::FromStr};

use tracing::{debug, info};

use crate::{
    automaton::{AnyAutomaton, Variant},
    definition::{Definition, DEFAULT_START_ID},
    operations::ConversionError,
};

/// A single step of a [`Pipeline`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// The definition as it was read.
    Parsed,
    /// See [`Definition::eliminate_epsilon`].
    EpsilonEliminated,
    /// See [`Definition::subset_construction`].
    SubsetConstructed,
    /// See [`Definition::remove_unreachable`].
    UnreachableRemoved,
    /// See [`Definition::remove_dead_ends`].
    DeadEndsRemoved,
    /// See [`Definition::merge_equivalent`].
    EquivalentMerged,
    /// See [`Definition::canonicalize_with_start`].
    Canonicalized,
}

impl Stage {
    /// Applies the conversion of this stage to `definition`. Canonicalization names the start
    /// state `start_id`.
    pub fn apply(
        self,
        definition: &Definition,
        start_id: &str,
    ) -> Result<Definition, ConversionError> {
        Ok(match self {
            Stage::Parsed => definition.clone(),
            Stage::EpsilonEliminated => definition.eliminate_epsilon(),
            Stage::SubsetConstructed => definition.subset_construction()?,
            Stage::UnreachableRemoved => definition.remove_unreachable(),
            Stage::DeadEndsRemoved => definition.remove_dead_ends(),
            Stage::EquivalentMerged => definition.merge_equivalent()?,
            Stage::Canonicalized => definition.canonicalize_with_start(start_id),
        })
    }
}

impl Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Parsed => "parsed",
            Stage::EpsilonEliminated => "epsilon transitions eliminated",
            Stage::SubsetConstructed => "subset construction",
            Stage::UnreachableRemoved => "unreachable states removed",
            Stage::DeadEndsRemoved => "dead ends removed",
            Stage::EquivalentMerged => "equivalent states merged",
            Stage::Canonicalized => "canonicalized",
        };
        write!(f, "{name}")
    }
}

/// The three classic conversion exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pipeline {
    /// Turns an epsilon-NFA into an NFA.
    EpsilonToNfa,
    /// Turns an NFA into a DFA.
    NfaToDfa,
    /// Minimizes a DFA.
    MinimizeDfa,
}

impl Pipeline {
    /// All pipelines.
    pub const ALL: [Pipeline; 3] = [
        Pipeline::EpsilonToNfa,
        Pipeline::NfaToDfa,
        Pipeline::MinimizeDfa,
    ];

    /// The conversions applied after parsing, in order.
    pub fn stages(self) -> &'static [Stage] {
        match self {
            Pipeline::EpsilonToNfa => &[Stage::EpsilonEliminated, Stage::Canonicalized],
            Pipeline::NfaToDfa => &[Stage::SubsetConstructed, Stage::Canonicalized],
            Pipeline::MinimizeDfa => &[
                Stage::UnreachableRemoved,
                Stage::DeadEndsRemoved,
                Stage::EquivalentMerged,
                Stage::Canonicalized,
            ],
        }
    }

    /// The engine that simulates the input of the pipeline.
    pub fn input_variant(self) -> Variant {
        match self {
            Pipeline::EpsilonToNfa => Variant::EpsilonNfa,
            Pipeline::NfaToDfa => Variant::Nfa,
            Pipeline::MinimizeDfa => Variant::Dfa,
        }
    }

    /// The engine that simulates the result of the pipeline.
    pub fn variant(self) -> Variant {
        match self {
            Pipeline::EpsilonToNfa => Variant::Nfa,
            Pipeline::NfaToDfa | Pipeline::MinimizeDfa => Variant::Dfa,
        }
    }

    /// Runs the pipeline on `definition`, naming the start state of the result
    /// [`DEFAULT_START_ID`].
    pub fn run(self, definition: &Definition) -> Result<Trace, ConversionError> {
        self.run_with_start(definition, DEFAULT_START_ID)
    }

    /// Runs the pipeline on `definition` and records every intermediate result. The start state
    /// of the result is named `start_id`.
    pub fn run_with_start(
        self,
        definition: &Definition,
        start_id: &str,
    ) -> Result<Trace, ConversionError> {
        info!("running {self} on {} states", definition.size());
        let mut steps = vec![(Stage::Parsed, definition.clone())];
        for &stage in self.stages() {
            let (_, previous) = &steps[steps.len() - 1];
            let next = stage.apply(previous, start_id)?;
            debug!("{stage}: {} states", next.size());
            steps.push((stage, next));
        }
        Ok(Trace {
            pipeline: self,
            steps,
        })
    }
}

impl Display for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Pipeline::EpsilonToNfa => "lnfa-to-nfa",
            Pipeline::NfaToDfa => "nfa-to-dfa",
            Pipeline::MinimizeDfa => "min-dfa",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Pipeline {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pipeline::ALL
            .into_iter()
            .find(|pipeline| pipeline.to_string() == s)
            .ok_or_else(|| {
                format!(
                    "unknown pipeline `{s}`, expected one of {}",
                    itertools::Itertools::join(&mut Pipeline::ALL.iter(), ", ")
                )
            })
    }
}

/// The intermediate results of running a [`Pipeline`]. The first step is always
/// [`Stage::Parsed`], the last one holds the result.
#[derive(Debug, Clone)]
pub struct Trace {
    pipeline: Pipeline,
    steps: Vec<(Stage, Definition)>,
}

impl Trace {
    /// The pipeline that produced the trace.
    pub fn pipeline(&self) -> Pipeline {
        self.pipeline
    }

    /// All stages with the definition they produced, in order.
    pub fn steps(&self) -> &[(Stage, Definition)] {
        &self.steps
    }

    /// The definition produced by the last stage.
    pub fn result(&self) -> &Definition {
        // a trace always starts with the parsed definition
        &self.steps[self.steps.len() - 1].1
    }

    /// The engine of the pipeline's output variant over the result.
    pub fn automaton(&self) -> AnyAutomaton<'_> {
        AnyAutomaton::new(self.result(), self.pipeline.variant())
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use itertools::Itertools;

    #[test]
    fn names_round_trip() {
        for pipeline in Pipeline::ALL {
            assert_eq!(pipeline.to_string().parse::<Pipeline>(), Ok(pipeline));
        }
        assert!("nfa-to-nfa".parse::<Pipeline>().is_err());
    }

    #[test]
    fn epsilon_to_nfa() {
        let lnfa = Definition::parse("2\n0 _ 1\n1 a 2\n").unwrap();
        let trace = Pipeline::EpsilonToNfa.run(&lnfa).unwrap();

        assert_eq!(
            trace.steps().iter().map(|(stage, _)| *stage).collect_vec(),
            vec![Stage::Parsed, Stage::EpsilonEliminated, Stage::Canonicalized]
        );
        assert_eq!(&trace.steps()[0].1, &lnfa);
        assert!(!trace.result().has_epsilon_transitions());
        assert_eq!(trace.result().start_state().id(), "0");

        let mut nfa = trace.automaton();
        assert_eq!(nfa.variant(), Variant::Nfa);
        assert!(nfa.accepts(["a"]));
        assert!(!nfa.accepts(["a", "a"]));
    }

    #[test_log::test]
    fn every_pipeline_preserves_language() {
        let inputs = [
            (Pipeline::EpsilonToNfa, crate::tests::branching_lnfa()),
            (
                Pipeline::NfaToDfa,
                Definition::parse("2\n0 a 0\n0 b 0\n0 a 1\n1 a 2\n1 b 2\n").unwrap(),
            ),
            (
                Pipeline::MinimizeDfa,
                Definition::parse("1 2\n0 a 1\n1 a 2\n2 a 2\n3 a 0\n").unwrap(),
            ),
        ];
        for (pipeline, input) in inputs {
            let trace = pipeline.run(&input).unwrap();
            assert_eq!(trace.pipeline(), pipeline);
            assert_eq!(trace.steps().len(), pipeline.stages().len() + 1);
            assert_eq!(
                input.distinguishing_word(
                    pipeline.input_variant(),
                    trace.result(),
                    pipeline.variant(),
                    5
                ),
                None,
                "{pipeline}"
            );
        }
    }

    #[test]
    fn minimization_merges_final_self_loops() {
        let dfa = Definition::parse("1 2\n0 a 1\n1 a 2\n2 a 2\n").unwrap();
        let trace = Pipeline::MinimizeDfa.run(&dfa).unwrap();
        assert_eq!(trace.result().to_string(), "1\n0 a 1\n1 a 1\n");
    }

    #[test]
    fn failing_stages_abort_the_pipeline() {
        let nfa = Definition::parse("1\n0 a 1\n0 a 0\n").unwrap();
        assert!(matches!(
            Pipeline::MinimizeDfa.run(&nfa),
            Err(ConversionError::NotADfa { .. })
        ));
    }

    #[test]
    fn custom_start_id() {
        let trace = Pipeline::NfaToDfa
            .run_with_start(&crate::tests::a_plus(), "s")
            .unwrap();
        assert_eq!(trace.result().start_state().id(), "s");
        assert_eq!(trace.result().to_string(), "1\n1 a 1\ns a 1\n");
    }
}
