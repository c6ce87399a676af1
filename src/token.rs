use crate::input::Input;
use crate::many::ManyExt;
use crate::outcome::ParseResult;
use crate::parser::Parser;
use crate::primitives::whitespace;

/// Parser that skips whitespace before and after the wrapped parser
///
/// Both runs of whitespace are optional and may span several lines.
///
/// # Examples
/// - `"  42  "` with a number parser → `"42"`, leaving the input at its end
/// - `"42"` → `"42"`
#[derive(Clone)]
pub struct Token<P> {
    parser: P,
}

impl<P> Token<P> {
    pub fn new(parser: P) -> Self {
        Token { parser }
    }
}

impl<'code, P> Parser<'code> for Token<P>
where
    P: Parser<'code>,
{
    type Output = P::Output;

    fn run(&self, input: Input<'code>) -> ParseResult<'code, P::Output> {
        let blank = whitespace().many();

        blank.run(input)?.map_success(|_, remainder| {
            self.parser.run(remainder)?.map_success(|value, remainder| {
                Ok(blank.run(remainder)?.map(|_| value))
            })
        })
    }
}

/// Convenience function to create a Token parser
pub fn token<'code, P>(parser: P) -> Token<P>
where
    P: Parser<'code>,
{
    Token::new(parser)
}

/// Extension trait to add .token() method support for parsers
pub trait TokenExt<'code>: Parser<'code> + Sized {
    fn token(self) -> Token<Self> {
        Token::new(self)
    }
}

/// Implement TokenExt for all parsers
impl<'code, P> TokenExt<'code> for P where P: Parser<'code> {}
