use thiserror::Error;
use tracing::{trace, warn};

use super::{Definition, ParseContext};

/// The id that denotes epsilon unless configured otherwise.
pub const DEFAULT_EPSILON_MARKER: &str = "_";
/// The id of the start state unless configured otherwise.
pub const DEFAULT_START_ID: &str = "0";

/// Configures how the text format is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// The symbol id that is read as epsilon.
    pub epsilon_marker: String,
    /// The id of the start state.
    pub start_id: String,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            epsilon_marker: DEFAULT_EPSILON_MARKER.to_string(),
            start_id: DEFAULT_START_ID.to_string(),
        }
    }
}

impl ParseOptions {
    /// Sets the symbol id that is read as epsilon.
    pub fn with_epsilon_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.epsilon_marker = marker.into();
        self
    }

    /// Sets the id of the start state.
    pub fn with_start_id<S: Into<String>>(mut self, id: S) -> Self {
        self.start_id = id.into();
        self
    }
}

/// Errors that can occur when reading a definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A transition line has fewer than three fields.
    #[error("line {line}: expected a transition `from symbol to`, found {fields} field(s)")]
    MalformedTransition {
        /// The line number, starting at 1.
        line: usize,
        /// The number of fields that were found.
        fields: usize,
    },
}

fn fields(line: &str) -> impl Iterator<Item = &str> {
    line.split(' ').filter(|field| !field.is_empty())
}

impl Definition {
    /// Parses a definition with the default [`ParseOptions`], i.e. `_` denotes epsilon and `0`
    /// is the start state.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        Self::parse_with(text, &ParseOptions::default())
    }

    /// Parses a definition from its text format. The first line lists the ids of the final
    /// states separated by spaces, every further line is a transition `from symbol to`.
    /// Duplicate transitions are dropped, states are created when they are first mentioned and
    /// the start state is created if no line mentions it.
    ///
    /// Blank lines are skipped and fields after the third one are ignored. A line with one or
    /// two fields is rejected with [`ParseError::MalformedTransition`].
    pub fn parse_with(text: &str, options: &ParseOptions) -> Result<Self, ParseError> {
        let mut context = ParseContext::new(&options.epsilon_marker);
        let mut lines = text.lines();

        if let Some(first) = lines.next() {
            for id in fields(first) {
                context.final_state(id);
            }
        }

        for (offset, line) in lines.enumerate() {
            let line_number = offset + 2;
            let fields: Vec<_> = fields(line).collect();
            match fields.as_slice() {
                [] => trace!("skipping blank line {line_number}"),
                [from, symbol, to, rest @ ..] => {
                    if !rest.is_empty() {
                        warn!(
                            "line {line_number}: ignoring {} field(s) after the transition",
                            rest.len()
                        );
                    }
                    context.transition(from, symbol, to);
                }
                _ => {
                    return Err(ParseError::MalformedTransition {
                        line: line_number,
                        fields: fields.len(),
                    })
                }
            }
        }

        let definition = context.finish(&options.start_id);
        trace!(
            "parsed definition with {} states and {} transitions over {}",
            definition.size(),
            definition.transitions().len(),
            definition.alphabet()
        );
        Ok(definition)
    }
}
