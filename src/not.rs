use super::parser::Parser;
use crate::input::Input;
use crate::outcome::{Outcome, ParseResult};

/// Parser combinator that performs negative lookahead
///
/// Succeeds with () if the given parser fails at the current position.
/// Fails if the given parser succeeds, naming the text it matched.
/// Never consumes any input regardless of outcome.
#[derive(Clone)]
pub struct Not<P> {
    parser: P,
}

impl<P> Not<P> {
    pub fn new(parser: P) -> Self {
        Not { parser }
    }
}

impl<'code, P> Parser<'code> for Not<P>
where
    P: Parser<'code>,
{
    type Output = ();

    fn run(&self, input: Input<'code>) -> ParseResult<'code, ()> {
        match self.parser.run(input.clone())? {
            Outcome::Success { remainder, .. } => {
                let matched = &input.source()[input.position()..remainder.position()];
                let message = format!("`{matched}' was not expected");
                Ok(Outcome::failure(input, message, Vec::new()))
            }
            Outcome::Failure(_) => Ok(Outcome::success((), input)),
        }
    }
}

/// Convenience function to create a Not parser for negative lookahead
pub fn not<'code, P>(parser: P) -> Not<P>
where
    P: Parser<'code>,
{
    Not::new(parser)
}

/// Extension trait to add .not() method support for parsers
pub trait NotExt<'code>: Parser<'code> + Sized {
    fn not(self) -> Not<Self> {
        Not::new(self)
    }
}

/// Implement NotExt for all parsers
impl<'code, P> NotExt<'code> for P where P: Parser<'code> {}
