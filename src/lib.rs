//! # ParsiQuery - Parser Combinator Library
//!
//! A parser combinator library for text, built around an immutable input cursor
//! and explicit success/failure outcomes.
//!
//! ParsiQuery provides composable, type-safe parsers that can be combined to build
//! complex parsing logic from simple building blocks. The library emphasizes:
//!
//! - **Zero panics**: Rejected input is an [`Outcome::Failure`] value, and misuse
//!   of the API (left recursion, undefined rules, invalid patterns) is an [`Error`]
//! - **Rich error reporting**: Failures carry line, column, a message and the
//!   list of things that were expected at the furthest position reached
//! - **Composability**: Small parsers combine into larger ones using combinators,
//!   either through free functions or the extension traits in [`prelude`]
//! - **Backtracking by default**: Alternatives restart from the same input; the
//!   `x_` variants commit once an alternative has consumed input
//!
//! ```
//! use parsiquery::prelude::*;
//! use parsiquery::primitives::{char, letter, letter_or_digit};
//!
//! let identifier = letter()
//!     .once()
//!     .concat(letter_or_digit().many())
//!     .text()
//!     .token();
//! let list = identifier.delimited_by(char(',')).end();
//!
//! assert_eq!(list.parse("a1, b2 ,c").unwrap(), vec!["a1", "b2", "c"]);
//! assert_eq!(
//!     list.parse("a1,,").unwrap_err().to_string(),
//!     "Parsing Error: (1:3): unexpected ',', expected: end of input"
//! );
//! ```

pub mod contained;
pub mod delimited;
pub mod end;
pub mod error;
pub mod except;
pub mod filter;
pub mod input;
pub mod many;
pub mod named;
pub mod not;
pub mod optional;
pub mod or;
pub mod outcome;
pub mod parser;
pub mod position;
pub mod primitives;
pub mod query;
pub mod repeat;
pub mod rule;
pub mod select;
pub mod text;
pub mod then;
pub mod token;
pub mod until;

pub use error::Error;
pub use input::Input;
pub use outcome::{Failure, Outcome, ParseResult};
pub use parser::{BoxedParser, Parser};
pub use position::{PositionExt, Positioned, Span, positioned};
pub use query::{Halt, Query, query, query_or};
pub use rule::{Rule, recursive};

/// The [`Parser`] trait together with every combinator extension trait
pub mod prelude {
    pub use crate::contained::ContainedExt;
    pub use crate::delimited::DelimitedExt;
    pub use crate::end::EndExt;
    pub use crate::except::ExceptExt;
    pub use crate::filter::FilterExt;
    pub use crate::many::ManyExt;
    pub use crate::named::NamedExt;
    pub use crate::not::NotExt;
    pub use crate::optional::OptionalExt;
    pub use crate::or::OrExt;
    pub use crate::parser::Parser;
    pub use crate::position::PositionExt;
    pub use crate::repeat::RepeatExt;
    pub use crate::select::SelectExt;
    pub use crate::text::TextExt;
    pub use crate::then::ThenExt;
    pub use crate::token::TokenExt;
    pub use crate::until::UntilExt;
}
