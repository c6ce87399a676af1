use crate::input::Input;
use crate::outcome::ParseResult;
use crate::parser::Parser;

/// Parser combinator that feeds the first parser's value into a function
/// choosing the parser to run next
///
/// This is monadic bind: the second parser starts where the first one stopped,
/// and a failure of the first is returned without calling the function.
///
/// Example:
/// ```
/// use parsiquery::prelude::*;
/// use parsiquery::primitives::{char, letter};
///
/// // a letter followed by the same letter again
/// let doubled = letter().then(|first| char(first));
/// assert_eq!(doubled.parse("xx").unwrap(), 'x');
/// assert!(doubled.parse("xy").is_err());
/// ```
#[derive(Clone)]
pub struct Then<P, F> {
    parser: P,
    next: F,
}

impl<P, F> Then<P, F> {
    pub fn new(parser: P, next: F) -> Self {
        Then { parser, next }
    }
}

impl<'code, P, F, Q> Parser<'code> for Then<P, F>
where
    P: Parser<'code>,
    F: Fn(P::Output) -> Q,
    Q: Parser<'code>,
{
    type Output = Q::Output;

    fn run(&self, input: Input<'code>) -> ParseResult<'code, Self::Output> {
        self.parser
            .run(input)?
            .map_success(|value, remainder| (self.next)(value).run(remainder))
    }
}

/// Parser combinator that appends the items of a second list parser to the first
#[derive(Clone)]
pub struct Concat<P1, P2> {
    first: P1,
    second: P2,
}

impl<'code, P1, P2, T> Parser<'code> for Concat<P1, P2>
where
    P1: Parser<'code, Output = Vec<T>>,
    P2: Parser<'code, Output = Vec<T>>,
{
    type Output = Vec<T>;

    fn run(&self, input: Input<'code>) -> ParseResult<'code, Vec<T>> {
        self.first.run(input)?.map_success(|mut items, remainder| {
            Ok(self.second.run(remainder)?.map(|rest| {
                items.extend(rest);
                items
            }))
        })
    }
}

/// Convenience function to create a Then parser
pub fn then<'code, P, F, Q>(parser: P, next: F) -> Then<P, F>
where
    P: Parser<'code>,
    F: Fn(P::Output) -> Q,
    Q: Parser<'code>,
{
    Then::new(parser, next)
}

/// Extension trait to add .then() and .concat() method support for parsers
pub trait ThenExt<'code>: Parser<'code> + Sized {
    fn then<F, Q>(self, next: F) -> Then<Self, F>
    where
        F: Fn(Self::Output) -> Q,
        Q: Parser<'code>,
    {
        Then::new(self, next)
    }

    fn concat<T, P>(self, second: P) -> Concat<Self, P>
    where
        Self: Parser<'code, Output = Vec<T>>,
        P: Parser<'code, Output = Vec<T>>,
    {
        Concat {
            first: self,
            second,
        }
    }
}

/// Implement ThenExt for all parsers
impl<'code, P> ThenExt<'code> for P where P: Parser<'code> {}
