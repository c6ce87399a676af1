use crate::input::Input;
use crate::outcome::{Outcome, ParseResult};
use crate::parser::Parser;

/// Runs `parser` repeatedly from `input`, appending to `items`
///
/// Stops at the first failing attempt or at an attempt that succeeds without
/// consuming input. A failing attempt that consumed input is returned when
/// `strict` is set and at least one item was collected; otherwise it is
/// discarded and the items so far win.
pub(crate) fn collect<'code, P>(
    parser: &P,
    mut input: Input<'code>,
    mut items: Vec<P::Output>,
    strict: bool,
) -> ParseResult<'code, Vec<P::Output>>
where
    P: Parser<'code>,
{
    loop {
        match parser.run(input.clone())? {
            Outcome::Success { value, remainder } if remainder != input => {
                items.push(value);
                input = remainder;
            }
            Outcome::Failure(failure)
                if strict && !items.is_empty() && failure.remainder() != &input =>
            {
                return Ok(Outcome::Failure(failure));
            }
            _ => return Ok(Outcome::success(items, input)),
        }
    }
}

/// Parser combinator that matches zero or more occurrences of the given parser
///
/// Never fails on its own. Once an element has been parsed, the strict variant
/// ([`x_many`]) reports a last element that failed after consuming input
/// instead of ending the list there.
#[derive(Clone)]
pub struct Many<P> {
    parser: P,
    strict: bool,
}

impl<P> Many<P> {
    pub fn new(parser: P) -> Self {
        Many {
            parser,
            strict: false,
        }
    }

    pub fn strict(parser: P) -> Self {
        Many {
            parser,
            strict: true,
        }
    }
}

impl<'code, P> Parser<'code> for Many<P>
where
    P: Parser<'code>,
{
    type Output = Vec<P::Output>;

    fn run(&self, input: Input<'code>) -> ParseResult<'code, Self::Output> {
        collect(&self.parser, input, Vec::new(), self.strict)
    }
}

/// Parser combinator that matches one or more occurrences of the given parser
#[derive(Clone)]
pub struct AtLeastOnce<P> {
    parser: P,
    strict: bool,
}

impl<'code, P> Parser<'code> for AtLeastOnce<P>
where
    P: Parser<'code>,
{
    type Output = Vec<P::Output>;

    fn run(&self, input: Input<'code>) -> ParseResult<'code, Self::Output> {
        self.parser.run(input)?.map_success(|first, remainder| {
            collect(&self.parser, remainder, vec![first], self.strict)
        })
    }
}

/// Convenience function to create a Many parser
pub fn many<'code, P>(parser: P) -> Many<P>
where
    P: Parser<'code>,
{
    Many::new(parser)
}

/// Convenience function to create a strict Many parser
pub fn x_many<'code, P>(parser: P) -> Many<P>
where
    P: Parser<'code>,
{
    Many::strict(parser)
}

/// Extension trait to add repetition methods to parsers
pub trait ManyExt<'code>: Parser<'code> + Sized {
    fn many(self) -> Many<Self> {
        Many::new(self)
    }

    fn x_many(self) -> Many<Self> {
        Many::strict(self)
    }

    fn at_least_once(self) -> AtLeastOnce<Self> {
        AtLeastOnce {
            parser: self,
            strict: false,
        }
    }

    fn x_at_least_once(self) -> AtLeastOnce<Self> {
        AtLeastOnce {
            parser: self,
            strict: true,
        }
    }
}

/// Implement ManyExt for all parsers
impl<'code, P> ManyExt<'code> for P where P: Parser<'code> {}
