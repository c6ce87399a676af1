use std::borrow::Cow;
use thiserror::Error;

/// Errors that abort a parse.
///
/// Grammar-level rejections of the input are not errors: they travel as
/// [`Outcome::Failure`](crate::Outcome::Failure) values so that combinators can
/// backtrack over them. Everything in this enum except [`Error::Parse`] signals a
/// malformed grammar or a misuse of the API, and combinators never recover from
/// it. [`Error::Parse`] is produced only by [`Parser::parse`](crate::Parser::parse)
/// when the caller asks for a value instead of an outcome.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The input was rejected by the grammar
    #[error(
        "Parsing Error: ({line}:{column}): {message}, expected: {}",
        .expectations.join(", ")
    )]
    Parse {
        position: usize,
        line: usize,
        column: usize,
        message: Cow<'static, str>,
        expectations: Vec<Cow<'static, str>>,
    },

    #[error("already at the end of the input (position {position}), can't advance")]
    AlreadyAtEnd { position: usize },

    /// A rule re-entered itself without consuming any input
    #[error("left recursion in the grammar: {rule} re-entered at ({line}:{column})")]
    LeftRecursion {
        rule: String,
        position: usize,
        line: usize,
        column: usize,
    },

    #[error("{rule} was run before it was defined")]
    UndefinedRule { rule: String },

    #[error("{rule} is already defined")]
    RuleAlreadyDefined { rule: String },

    #[error("query_or needs at least one candidate parser")]
    NoAlternatives,

    #[error("repeat needs minimum <= maximum, got {min}..={max}")]
    InvalidRepeat { min: usize, max: usize },

    #[error("invalid regex pattern: {0}")]
    Regex(#[from] regex::Error),
}

impl Error {
    /// Returns true for errors produced by rejected input rather than by a broken grammar
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Error::Parse { .. })
    }

    /// Input position the error refers to, when it has one
    pub fn position(&self) -> Option<usize> {
        match self {
            Error::Parse { position, .. }
            | Error::AlreadyAtEnd { position }
            | Error::LeftRecursion { position, .. } => Some(*position),
            _ => None,
        }
    }
}
