use crate::error::Error;
use crate::input::Input;
use crate::outcome::{Outcome, ParseResult};
use log::debug;
use std::fmt;
use std::rc::Rc;

/// Core parser trait for parser combinators
pub trait Parser<'code> {
    type Output;

    /// Attempt to parse from the given input position
    ///
    /// Rejected input is reported as `Ok(Outcome::Failure(..))`. The `Err`
    /// channel is reserved for fatal errors such as detected left recursion,
    /// which every combinator propagates unchanged.
    fn run(&self, input: Input<'code>) -> ParseResult<'code, Self::Output>;

    /// Runs the parser over `source` from the start, with a fresh memo table
    fn try_parse(&self, source: &'code str) -> ParseResult<'code, Self::Output> {
        self.run(Input::new(source))
    }

    /// Runs the parser over `source` and returns its value
    ///
    /// A rejected input becomes [`Error::Parse`], whose display carries the line,
    /// column, message and expectations of the failure.
    fn parse(&self, source: &'code str) -> Result<Self::Output, Error> {
        match self.try_parse(source)? {
            Outcome::Success { value, .. } => Ok(value),
            Outcome::Failure(failure) => {
                debug!("parse failed: {failure}");
                Err(failure.into_error())
            }
        }
    }

    /// Erases the parser's type so it can be stored alongside parsers of other types
    fn boxed(self) -> BoxedParser<'code, Self::Output>
    where
        Self: Sized + 'code,
    {
        BoxedParser::new(self)
    }
}

impl<'code, P> Parser<'code> for &P
where
    P: Parser<'code> + ?Sized,
{
    type Output = P::Output;

    fn run(&self, input: Input<'code>) -> ParseResult<'code, Self::Output> {
        (**self).run(input)
    }
}

/// Shared, type-erased parser
///
/// Cloning is cheap; every clone runs the same underlying parser.
pub struct BoxedParser<'code, T> {
    inner: Rc<dyn Parser<'code, Output = T> + 'code>,
}

impl<'code, T> BoxedParser<'code, T> {
    pub fn new(parser: impl Parser<'code, Output = T> + 'code) -> Self {
        BoxedParser {
            inner: Rc::new(parser),
        }
    }
}

impl<T> Clone for BoxedParser<'_, T> {
    fn clone(&self) -> Self {
        BoxedParser {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for BoxedParser<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxedParser").finish_non_exhaustive()
    }
}

impl<'code, T> Parser<'code> for BoxedParser<'code, T> {
    type Output = T;

    fn run(&self, input: Input<'code>) -> ParseResult<'code, T> {
        self.inner.run(input)
    }

    fn boxed(self) -> BoxedParser<'code, T> {
        self
    }
}
