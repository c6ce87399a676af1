use crate::input::Input;
use crate::outcome::ParseResult;
use crate::parser::Parser;

/// Represents a span in the source code with start and end positions
/// and a reference to the source code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span<'code> {
    /// Reference to the source code
    pub source: &'code str,
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
    /// Line of the start position, 1-based
    pub line: usize,
    /// Column of the start position, 1-based
    pub column: usize,
}

impl<'code> Span<'code> {
    /// Span covering `start..end`, with the line and column of `start`
    pub fn between(start: &Input<'code>, end: &Input<'code>) -> Self {
        Span {
            source: start.source(),
            start: start.position(),
            end: end.position(),
            line: start.line(),
            column: start.column(),
        }
    }

    /// Get the length of the span in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Get the text that this span represents
    pub fn as_str(&self) -> &'code str {
        &self.source[self.start..self.end]
    }
}

/// A parser combinator that captures the span of a successful parse
#[derive(Clone)]
pub struct Positioned<P> {
    parser: P,
}

impl<P> Positioned<P> {
    pub fn new(parser: P) -> Self {
        Positioned { parser }
    }
}

impl<'code, P> Parser<'code> for Positioned<P>
where
    P: Parser<'code>,
{
    type Output = (P::Output, Span<'code>);

    fn run(&self, input: Input<'code>) -> ParseResult<'code, Self::Output> {
        let outcome = self.parser.run(input.clone())?;
        let span = Span::between(&input, outcome.remainder());
        Ok(outcome.map(|value| (value, span)))
    }
}

/// Extension trait to add span tracking to any parser
pub trait PositionExt<'code>: Parser<'code> + Sized {
    /// Wrap this parser to capture its span
    fn positioned(self) -> Positioned<Self> {
        Positioned::new(self)
    }
}

impl<'code, P> PositionExt<'code> for P where P: Parser<'code> {}

/// Convenience function to create a Positioned combinator
pub fn positioned<'code, P>(parser: P) -> Positioned<P>
where
    P: Parser<'code>,
{
    Positioned::new(parser)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::many::ManyExt;
    use crate::primitives::{char, letter, string};
    use crate::text::TextExt;
    use crate::then::ThenExt;
    use crate::token::TokenExt;

    #[test]
    fn test_span_basic() {
        let source = "hello world";
        let start = Input::new(source);
        let end = start.advance().and_then(|input| input.advance()).unwrap();

        let span = Span::between(&start, &end);
        assert_eq!(span.start, 0);
        assert_eq!(span.end, 2);
        assert_eq!(span.len(), 2);
        assert!(!span.is_empty());
        assert_eq!(span.as_str(), "he");
    }

    #[test]
    fn test_span_empty() {
        let start = Input::new("abc");
        let span = Span::between(&start, &start);
        assert!(span.is_empty());
        assert_eq!(span.as_str(), "");
    }

    #[test]
    fn test_positioned_single_char() {
        let (value, span) = char('a').positioned().parse("abc").unwrap();
        assert_eq!(value, 'a');
        assert_eq!((span.start, span.end), (0, 1));
        assert_eq!((span.line, span.column), (1, 1));
    }

    #[test]
    fn test_positioned_after_whitespace() {
        let word = letter().at_least_once().text().positioned().token();
        let parser = word.many();

        let words = parser.parse("ab\n  cd").unwrap();
        let (text, span) = &words[1];
        assert_eq!(text, "cd");
        assert_eq!((span.start, span.end), (5, 7));
        assert_eq!((span.line, span.column), (2, 3));
        assert_eq!(span.as_str(), "cd");
    }

    #[test]
    fn test_positioned_multi_byte() {
        let parser = char('é').then(|_| positioned(string("ab")));
        let (_, span) = parser.parse("éab").unwrap();
        assert_eq!((span.start, span.end), (2, 4));
        assert_eq!(span.column, 2);
    }

    #[test]
    fn test_positioned_failure_passes_through() {
        let outcome = positioned(char('a')).try_parse("b").unwrap();
        assert_eq!(outcome.as_failure().unwrap().expectations(), ["a"]);
    }
}
