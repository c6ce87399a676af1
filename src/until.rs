use crate::except::Except;
use crate::input::Input;
use crate::many::Many;
use crate::outcome::ParseResult;
use crate::parser::Parser;

/// Parser combinator that repeats a parser until a terminator matches
///
/// Items are collected while the terminator does not match at the current
/// position. The terminator is then required: it is consumed and its value
/// discarded. If an item fails before the terminator is seen, the terminator's
/// failure at that position is reported.
///
/// # Examples
/// - `"/* abc */"` with `string("/*")` skipped and terminator `string("*/")`
///   → the characters of `" abc "`
#[derive(Clone)]
pub struct Until<P, S> {
    parser: P,
    stop: S,
}

impl<P, S> Until<P, S> {
    pub fn new(parser: P, stop: S) -> Self {
        Until { parser, stop }
    }
}

impl<'code, P, S> Parser<'code> for Until<P, S>
where
    P: Parser<'code>,
    S: Parser<'code>,
{
    type Output = Vec<P::Output>;

    fn run(&self, input: Input<'code>) -> ParseResult<'code, Self::Output> {
        let items = Many::new(Except::new(&self.parser, &self.stop));

        items.run(input)?.map_success(|items, remainder| {
            Ok(self.stop.run(remainder)?.map(|_| items))
        })
    }
}

/// Convenience function to create an Until parser
pub fn until<'code, P, S>(parser: P, stop: S) -> Until<P, S>
where
    P: Parser<'code>,
    S: Parser<'code>,
{
    Until::new(parser, stop)
}

/// Extension trait to add .until() method support for parsers
pub trait UntilExt<'code>: Parser<'code> + Sized {
    fn until<S>(self, stop: S) -> Until<Self, S>
    where
        S: Parser<'code>,
    {
        Until::new(self, stop)
    }
}

/// Implement UntilExt for all parsers
impl<'code, P> UntilExt<'code> for P where P: Parser<'code> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{any_char, char, digit, string};
    use crate::text::TextExt;
    use crate::then::ThenExt;

    #[test]
    fn test_until_consumes_terminator() {
        let comment = string("/*").then(|_| any_char().until(string("*/")).text());
        let outcome = comment.try_parse("/* abc */x").unwrap();
        assert_eq!(outcome.value().map(String::as_str), Some(" abc "));
        assert_eq!(outcome.remainder().position(), 9);
    }

    #[test]
    fn test_until_returns_all_but_terminator() {
        let parser = any_char().until(string("aa")).text();
        let outcome = parser.try_parse("abcaab").unwrap();
        assert_eq!(outcome.value().map(String::as_str), Some("abc"));
        assert_eq!(outcome.remainder().position(), 5);
    }

    #[test]
    fn test_until_immediate_terminator() {
        let outcome = until(digit(), char(';')).try_parse(";").unwrap();
        assert_eq!(outcome.value(), Some(&vec![]));
        assert_eq!(outcome.remainder().position(), 1);
    }

    #[test]
    fn test_until_missing_terminator() {
        let outcome = any_char().until(string("*/")).try_parse("abc").unwrap();
        let failure = outcome.as_failure().unwrap();
        assert_eq!(failure.position(), 3);
        assert_eq!(failure.expectations(), ["*/"]);
    }

    #[test]
    fn test_until_item_failure_reports_terminator() {
        let outcome = digit().until(char(';')).try_parse("12x;").unwrap();
        let failure = outcome.as_failure().unwrap();
        assert_eq!(failure.position(), 2);
        assert_eq!(failure.message(), "unexpected 'x'");
        assert_eq!(failure.expectations(), [";"]);
    }
}
