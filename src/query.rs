//! Sequencing and alternation without nested closures
//!
//! [`query`] runs a closure that pulls values out of parsers one after another
//! through a [`Query`] handle. Each step starts where the previous one stopped
//! and the first failure ends the whole query via `?`:
//!
//! ```
//! use parsiquery::prelude::*;
//! use parsiquery::primitives::{char, letter, number};
//! use parsiquery::query::query;
//!
//! let assignment = query(|q| {
//!     let name = q.run(letter().at_least_once().text().token())?;
//!     q.run(char('=').token())?;
//!     let value = q.run(number().token())?;
//!     Ok((name, value))
//! });
//!
//! let (name, value) = assignment.parse("answer = 42").unwrap();
//! assert_eq!(name, "answer");
//! assert_eq!(value, "42");
//! ```
//!
//! [`query_or`] tries a list of parsers against the same input and returns the
//! first success.

use crate::error::Error;
use crate::input::Input;
use crate::outcome::{Failure, Outcome, ParseResult};
use crate::parser::{BoxedParser, Parser};
use log::trace;
use std::borrow::Cow;

/// Why a query stopped early
#[derive(Debug, Clone, PartialEq)]
pub enum Halt<'code> {
    /// A step rejected the input; the query fails with this failure
    Failed(Failure<'code>),
    /// A step hit a fatal error, which is propagated unchanged
    Fatal(Error),
}

impl From<Error> for Halt<'_> {
    fn from(error: Error) -> Self {
        Halt::Fatal(error)
    }
}

impl<'code> From<Failure<'code>> for Halt<'code> {
    fn from(failure: Failure<'code>) -> Self {
        Halt::Failed(failure)
    }
}

/// Handle through which a query body runs its steps
#[derive(Debug)]
pub struct Query<'code> {
    input: Input<'code>,
}

impl<'code> Query<'code> {
    /// Runs `parser` at the current position and advances past what it consumed
    pub fn run<P>(&mut self, parser: P) -> Result<P::Output, Halt<'code>>
    where
        P: Parser<'code>,
    {
        match parser.run(self.input.clone())? {
            Outcome::Success { value, remainder } => {
                self.input = remainder;
                Ok(value)
            }
            Outcome::Failure(failure) => Err(Halt::Failed(failure)),
        }
    }

    /// Current position of the query
    pub fn input(&self) -> &Input<'code> {
        &self.input
    }

    /// Builds a failure at the current position, for checks a parser can't express
    pub fn fail(
        &self,
        message: impl Into<Cow<'static, str>>,
        expectations: Vec<Cow<'static, str>>,
    ) -> Halt<'code> {
        Halt::Failed(Failure::new(self.input.clone(), message, expectations))
    }
}

/// Parser built from a query body, see [`query`]
#[derive(Clone)]
pub struct QueryParser<F> {
    body: F,
}

impl<'code, F, T> Parser<'code> for QueryParser<F>
where
    F: Fn(&mut Query<'code>) -> Result<T, Halt<'code>>,
{
    type Output = T;

    fn run(&self, input: Input<'code>) -> ParseResult<'code, T> {
        let mut query = Query { input };
        match (self.body)(&mut query) {
            Ok(value) => Ok(Outcome::success(value, query.input)),
            Err(Halt::Failed(failure)) => Ok(Outcome::Failure(failure)),
            Err(Halt::Fatal(error)) => Err(error),
        }
    }
}

/// Creates a parser that runs `body` as a sequence of steps
///
/// The body receives a [`Query`] positioned at the parser's input. On `Ok` the
/// parser succeeds with the returned value and the input after the last step.
/// The first step that fails ends the body through `?`; that failure is returned
/// as is and nothing parsed by earlier steps is kept.
pub fn query<'code, F, T>(body: F) -> QueryParser<F>
where
    F: Fn(&mut Query<'code>) -> Result<T, Halt<'code>>,
{
    QueryParser { body }
}

/// Parser that returns the first success among several candidates
pub struct QueryOr<'code, T> {
    candidates: Vec<BoxedParser<'code, T>>,
}

impl<T> Clone for QueryOr<'_, T> {
    fn clone(&self) -> Self {
        QueryOr {
            candidates: self.candidates.clone(),
        }
    }
}

impl<'code, T> Parser<'code> for QueryOr<'code, T> {
    type Output = T;

    fn run(&self, input: Input<'code>) -> ParseResult<'code, T> {
        let mut best: Option<Failure<'code>> = None;

        for (index, candidate) in self.candidates.iter().enumerate() {
            match candidate.run(input.clone())? {
                Outcome::Failure(failure) => {
                    best = Some(match best {
                        Some(best) => best.best(failure),
                        None => failure,
                    });
                }
                success => {
                    trace!(
                        "query_or: candidate {index} matched at {}",
                        input.position()
                    );
                    return Ok(success);
                }
            }
        }

        match best {
            Some(failure) => Ok(Outcome::Failure(failure)),
            None => Err(Error::NoAlternatives),
        }
    }
}

/// Tries each candidate in order from the same input
///
/// The first success wins. When every candidate fails, the failure that got
/// furthest is returned, with expectations merged among those that tie. An
/// empty candidate list is reported as [`Error::NoAlternatives`] when run.
pub fn query_or<'code, T, I>(candidates: I) -> QueryOr<'code, T>
where
    I: IntoIterator<Item = BoxedParser<'code, T>>,
{
    QueryOr {
        candidates: candidates.into_iter().collect(),
    }
}
