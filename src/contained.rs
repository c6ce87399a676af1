use crate::input::Input;
use crate::outcome::ParseResult;
use crate::parser::Parser;

/// Parser that matches content between opening and closing delimiters
///
/// It parses: `open + content + close` and returns just the `content` value
/// with the delimiters discarded. Whitespace is not skipped; wrap the parts
/// in [`token`](crate::token::token) for that.
///
/// # Examples
/// - `"[1]"` → `'1'`
/// - `"(hello)"` → `"hello"`
#[derive(Clone)]
pub struct Contained<P, O, C> {
    parser: P,
    open: O,
    close: C,
}

impl<P, O, C> Contained<P, O, C> {
    pub fn new(parser: P, open: O, close: C) -> Self {
        Contained {
            parser,
            open,
            close,
        }
    }
}

impl<'code, P, O, C> Parser<'code> for Contained<P, O, C>
where
    P: Parser<'code>,
    O: Parser<'code>,
    C: Parser<'code>,
{
    type Output = P::Output;

    fn run(&self, input: Input<'code>) -> ParseResult<'code, P::Output> {
        self.open.run(input)?.map_success(|_, remainder| {
            self.parser.run(remainder)?.map_success(|content, remainder| {
                Ok(self.close.run(remainder)?.map(|_| content))
            })
        })
    }
}

/// Convenience function to create a Contained parser
pub fn contained<'code, P, O, C>(open: O, parser: P, close: C) -> Contained<P, O, C>
where
    P: Parser<'code>,
    O: Parser<'code>,
    C: Parser<'code>,
{
    Contained::new(parser, open, close)
}

/// Extension trait to add .contained() method support for parsers
pub trait ContainedExt<'code>: Parser<'code> + Sized {
    fn contained<O, C>(self, open: O, close: C) -> Contained<Self, O, C>
    where
        O: Parser<'code>,
        C: Parser<'code>,
    {
        Contained::new(self, open, close)
    }
}

/// Implement ContainedExt for all parsers
impl<'code, P> ContainedExt<'code> for P where P: Parser<'code> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::many::ManyExt;
    use crate::primitives::{char, digit, letter, string};
    use crate::text::TextExt;
    use crate::token::TokenExt;

    #[test]
    fn test_brackets_digit() {
        let parser = digit().contained(char('['), char(']'));
        let outcome = parser.try_parse("[1]").unwrap();
        assert_eq!(outcome.value(), Some(&'1'));
        assert!(outcome.remainder().at_end());
    }

    #[test]
    fn test_parentheses_string() {
        let parser = contained(char('('), string("hello").text(), char(')'));
        assert_eq!(parser.parse("(hello)").unwrap(), "hello");
    }

    #[test]
    fn test_whitespace_is_not_skipped() {
        let parser = letter().many().text().contained(char('{'), char('}'));
        let outcome = parser.try_parse("{ test }").unwrap();
        assert_eq!(outcome.as_failure().unwrap().position(), 1);

        let parser = letter().many().text().token().contained(char('{'), char('}'));
        assert_eq!(parser.parse("{ test }").unwrap(), "test");
    }

    #[test]
    fn test_missing_close() {
        let parser = digit().contained(char('['), char(']'));
        let outcome = parser.try_parse("[1").unwrap();
        let failure = outcome.as_failure().unwrap();
        assert_eq!(failure.position(), 2);
        assert_eq!(failure.expectations(), ["]"]);
    }
}
