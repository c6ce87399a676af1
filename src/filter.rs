use crate::input::Input;
use crate::outcome::{Outcome, ParseResult};
use crate::parser::Parser;
use std::borrow::Cow;

/// Parser that applies a predicate function to filter the output of another parser
///
/// A rejected value turns the success into a failure at the position where the
/// inner parser started, carrying the given message and no expectations.
#[derive(Clone)]
pub struct FilterParser<P, F> {
    parser: P,
    predicate: F,
    error_message: Cow<'static, str>,
}

impl<P, F> FilterParser<P, F> {
    pub fn new(parser: P, predicate: F, error_message: Cow<'static, str>) -> Self {
        Self {
            parser,
            predicate,
            error_message,
        }
    }
}

impl<'code, P, F, T> Parser<'code> for FilterParser<P, F>
where
    P: Parser<'code, Output = T>,
    F: Fn(&T) -> bool,
{
    type Output = T;

    fn run(&self, input: Input<'code>) -> ParseResult<'code, T> {
        self.parser
            .run(input.clone())?
            .map_success(|value, remainder| {
                if (self.predicate)(&value) {
                    Ok(Outcome::success(value, remainder))
                } else {
                    Ok(Outcome::failure(input, self.error_message.clone(), Vec::new()))
                }
            })
    }
}

/// Extension trait to add filter method to all parsers
pub trait FilterExt<'code>: Parser<'code> + Sized {
    fn filter<F>(
        self,
        predicate: F,
        error_message: impl Into<Cow<'static, str>>,
    ) -> FilterParser<Self, F>
    where
        F: Fn(&Self::Output) -> bool,
    {
        FilterParser::new(self, predicate, error_message.into())
    }
}

impl<'code, P> FilterExt<'code> for P where P: Parser<'code> {}
