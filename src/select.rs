use crate::input::Input;
use crate::outcome::ParseResult;
use crate::parser::Parser;

/// Parser combinator that transforms the output of a parser using a mapping function
#[derive(Clone)]
pub struct Select<P, F> {
    parser: P,
    mapper: F,
}

impl<P, F> Select<P, F> {
    pub fn new(parser: P, mapper: F) -> Self {
        Select { parser, mapper }
    }
}

impl<'code, P, F, U> Parser<'code> for Select<P, F>
where
    P: Parser<'code>,
    F: Fn(P::Output) -> U,
{
    type Output = U;

    fn run(&self, input: Input<'code>) -> ParseResult<'code, U> {
        Ok(self.parser.run(input)?.map(&self.mapper))
    }
}

/// Parser combinator that wraps a single value into a one-element list
#[derive(Clone)]
pub struct Once<P> {
    parser: P,
}

impl<'code, P> Parser<'code> for Once<P>
where
    P: Parser<'code>,
{
    type Output = Vec<P::Output>;

    fn run(&self, input: Input<'code>) -> ParseResult<'code, Self::Output> {
        Ok(self.parser.run(input)?.map(|value| vec![value]))
    }
}

/// Convenience function to create a Select parser
pub fn select<'code, P, F, U>(parser: P, mapper: F) -> Select<P, F>
where
    P: Parser<'code>,
    F: Fn(P::Output) -> U,
{
    Select::new(parser, mapper)
}

/// Extension trait to add .select() and .once() method support for parsers
pub trait SelectExt<'code>: Parser<'code> + Sized {
    fn select<F, U>(self, mapper: F) -> Select<Self, F>
    where
        F: Fn(Self::Output) -> U,
    {
        Select::new(self, mapper)
    }

    fn once(self) -> Once<Self> {
        Once { parser: self }
    }
}

/// Implement SelectExt for all parsers
impl<'code, P> SelectExt<'code> for P where P: Parser<'code> {}
