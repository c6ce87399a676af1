use crate::input::Input;
use crate::outcome::{Outcome, ParseResult};
use crate::parser::Parser;

/// Parser combinator that tries the first parser, and if it fails, tries the second parser
///
/// Both alternatives start from the same input. When both fail, the failure
/// that got further is reported (expectations are merged on a tie). A first
/// alternative that succeeds without consuming anything gives the second one a
/// chance: the second's success is preferred, otherwise the first result stands.
///
/// The exclusive variant ([`x_or`]) commits to the first alternative once it has
/// consumed input, so a failure after partial consumption is returned without
/// trying the second.
#[derive(Clone)]
pub struct Or<P1, P2> {
    first: P1,
    second: P2,
    exclusive: bool,
}

impl<P1, P2> Or<P1, P2> {
    pub fn new(first: P1, second: P2) -> Self {
        Or {
            first,
            second,
            exclusive: false,
        }
    }

    pub fn exclusive(first: P1, second: P2) -> Self {
        Or {
            first,
            second,
            exclusive: true,
        }
    }
}

impl<'code, P1, P2, O> Parser<'code> for Or<P1, P2>
where
    P1: Parser<'code, Output = O>,
    P2: Parser<'code, Output = O>,
{
    type Output = O;

    fn run(&self, input: Input<'code>) -> ParseResult<'code, O> {
        match self.first.run(input.clone())? {
            Outcome::Failure(first) => {
                if self.exclusive && first.remainder() != &input {
                    return Ok(Outcome::Failure(first));
                }
                self.second
                    .run(input)?
                    .recover_failure(|second| Ok(Outcome::Failure(first.best(second))))
            }
            Outcome::Success { value, remainder } if remainder == input => {
                match self.second.run(input)? {
                    success @ Outcome::Success { .. } => Ok(success),
                    Outcome::Failure(_) => Ok(Outcome::success(value, remainder)),
                }
            }
            success => Ok(success),
        }
    }
}

/// Convenience function to create an Or parser
pub fn or<'code, P1, P2, O>(first: P1, second: P2) -> Or<P1, P2>
where
    P1: Parser<'code, Output = O>,
    P2: Parser<'code, Output = O>,
{
    Or::new(first, second)
}

/// Convenience function to create an exclusive Or parser
pub fn x_or<'code, P1, P2, O>(first: P1, second: P2) -> Or<P1, P2>
where
    P1: Parser<'code, Output = O>,
    P2: Parser<'code, Output = O>,
{
    Or::exclusive(first, second)
}

/// Extension trait to add .or() and .x_or() method support for parsers
pub trait OrExt<'code>: Parser<'code> + Sized {
    fn or<P>(self, other: P) -> Or<Self, P>
    where
        P: Parser<'code, Output = Self::Output>,
    {
        Or::new(self, other)
    }

    fn x_or<P>(self, other: P) -> Or<Self, P>
    where
        P: Parser<'code, Output = Self::Output>,
    {
        Or::exclusive(self, other)
    }
}

/// Implement OrExt for all parsers
impl<'code, P> OrExt<'code> for P where P: Parser<'code> {}
