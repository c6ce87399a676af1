use crate::input::Input;
use crate::outcome::ParseResult;
use crate::parser::Parser;

/// Parser combinator that joins a sequence of characters into a `String`
#[derive(Clone)]
pub struct Text<P> {
    parser: P,
}

impl<P> Text<P> {
    pub fn new(parser: P) -> Self {
        Text { parser }
    }
}

impl<'code, P> Parser<'code> for Text<P>
where
    P: Parser<'code>,
    P::Output: IntoIterator<Item = char>,
{
    type Output = String;

    fn run(&self, input: Input<'code>) -> ParseResult<'code, String> {
        Ok(self.parser.run(input)?.map(|chars| chars.into_iter().collect()))
    }
}

/// Convenience function to create a Text parser
pub fn text<'code, P>(parser: P) -> Text<P>
where
    P: Parser<'code>,
    P::Output: IntoIterator<Item = char>,
{
    Text::new(parser)
}

/// Extension trait to add .text() method support for parsers
pub trait TextExt<'code>: Parser<'code> + Sized {
    fn text(self) -> Text<Self>
    where
        Self::Output: IntoIterator<Item = char>,
    {
        Text::new(self)
    }
}

/// Implement TextExt for all parsers
impl<'code, P> TextExt<'code> for P where P: Parser<'code> {}
