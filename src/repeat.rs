use crate::error::Error;
use crate::input::Input;
use crate::outcome::{Outcome, ParseResult};
use crate::parser::Parser;
use std::borrow::Cow;

/// Parser combinator that matches between `min` and `max` occurrences of a parser
///
/// Matching is greedy and stops at `max` even when more occurrences follow.
/// Once `min` is reached, a match that consumes nothing also ends the
/// repetition. With fewer than `min` matches the whole repetition fails at its
/// starting position, naming the character where the failing attempt stopped.
///
/// A bound with `min > max` can never match and is reported as
/// [`Error::InvalidRepeat`] when the parser runs.
#[derive(Clone)]
pub struct Repeat<P> {
    parser: P,
    min: usize,
    max: usize,
}

impl<P> Repeat<P> {
    pub fn new(parser: P, min: usize, max: usize) -> Self {
        Repeat { parser, min, max }
    }

    fn describe(&self, inner: &[Cow<'static, str>], found: usize) -> String {
        let inner = inner.join(", ");
        if self.min == self.max {
            format!("'{inner}' {} times, but found {found}", self.min)
        } else {
            format!(
                "'{inner}' between {} and {} times, but found {found}",
                self.min, self.max
            )
        }
    }
}

impl<'code, P> Parser<'code> for Repeat<P>
where
    P: Parser<'code>,
{
    type Output = Vec<P::Output>;

    fn run(&self, input: Input<'code>) -> ParseResult<'code, Self::Output> {
        if self.min > self.max {
            return Err(Error::InvalidRepeat {
                min: self.min,
                max: self.max,
            });
        }

        let mut items = Vec::new();
        let mut remainder = input.clone();

        while items.len() < self.max {
            match self.parser.run(remainder.clone())? {
                Outcome::Success { value, remainder: next } => {
                    if next == remainder && items.len() >= self.min {
                        break;
                    }
                    items.push(value);
                    remainder = next;
                }
                Outcome::Failure(failure) => {
                    if items.len() >= self.min {
                        break;
                    }
                    let message = match failure.remainder().current() {
                        Some(found) => format!("Unexpected '{found}'"),
                        None => "Unexpected 'end of input'".to_string(),
                    };
                    let expectation = self.describe(failure.expectations(), items.len());
                    return Ok(Outcome::failure(input, message, vec![expectation.into()]));
                }
            }
        }

        Ok(Outcome::success(items, remainder))
    }
}

/// Convenience function to create a Repeat parser
pub fn repeat<'code, P>(parser: P, min: usize, max: usize) -> Repeat<P>
where
    P: Parser<'code>,
{
    Repeat::new(parser, min, max)
}

/// Extension trait to add .repeat() and .repeat_exactly() method support for parsers
pub trait RepeatExt<'code>: Parser<'code> + Sized {
    fn repeat(self, min: usize, max: usize) -> Repeat<Self> {
        Repeat::new(self, min, max)
    }

    fn repeat_exactly(self, count: usize) -> Repeat<Self> {
        Repeat::new(self, count, count)
    }
}

/// Implement RepeatExt for all parsers
impl<'code, P> RepeatExt<'code> for P where P: Parser<'code> {}
