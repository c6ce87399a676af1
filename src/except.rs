use crate::input::Input;
use crate::outcome::{Outcome, ParseResult};
use crate::parser::Parser;

/// Parser combinator that runs a parser only where another parser does not match
///
/// The excluded parser is tried first at the same position. If it succeeds the
/// combinator fails there without consuming anything; otherwise the result of
/// the main parser is returned unchanged.
#[derive(Clone)]
pub struct Except<P, E> {
    parser: P,
    excluded: E,
}

impl<P, E> Except<P, E> {
    pub fn new(parser: P, excluded: E) -> Self {
        Except { parser, excluded }
    }
}

impl<'code, P, E> Parser<'code> for Except<P, E>
where
    P: Parser<'code>,
    E: Parser<'code>,
{
    type Output = P::Output;

    fn run(&self, input: Input<'code>) -> ParseResult<'code, P::Output> {
        if self.excluded.run(input.clone())?.is_success() {
            return Ok(Outcome::failure(
                input,
                "Excepted parser succeeded.",
                vec!["other than the excepted input".into()],
            ));
        }
        self.parser.run(input)
    }
}

/// Convenience function to create an Except parser
pub fn except<'code, P, E>(parser: P, excluded: E) -> Except<P, E>
where
    P: Parser<'code>,
    E: Parser<'code>,
{
    Except::new(parser, excluded)
}

/// Extension trait to add .except() method support for parsers
pub trait ExceptExt<'code>: Parser<'code> + Sized {
    fn except<E>(self, excluded: E) -> Except<Self, E>
    where
        E: Parser<'code>,
    {
        Except::new(self, excluded)
    }
}

/// Implement ExceptExt for all parsers
impl<'code, P> ExceptExt<'code> for P where P: Parser<'code> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::many::ManyExt;
    use crate::primitives::{any_char, char, letter, string};
    use crate::text::TextExt;

    #[test]
    fn test_except_stops_at_excluded_input() {
        let parser = any_char().except(string("aa")).many().text();
        let outcome = parser.try_parse("abcaab").unwrap();
        assert_eq!(outcome.value().map(String::as_str), Some("abc"));
        assert_eq!(outcome.remainder().position(), 3);
    }

    #[test]
    fn test_except_failure_details() {
        let parser = except(letter(), char('x'));
        let outcome = parser.try_parse("xyz").unwrap();
        let failure = outcome.as_failure().unwrap();
        assert_eq!(failure.position(), 0);
        assert_eq!(failure.message(), "Excepted parser succeeded.");
        assert_eq!(failure.expectations(), ["other than the excepted input"]);
    }

    #[test]
    fn test_except_passes_through_main_result() {
        let parser = letter().except(char('x'));
        assert_eq!(parser.parse("y").unwrap(), 'y');

        let outcome = parser.try_parse("1").unwrap();
        assert_eq!(outcome.as_failure().unwrap().expectations(), ["letter"]);
    }

    #[test]
    fn test_except_ignores_partial_excluded_match() {
        let parser = any_char().except(string("ab"));
        assert_eq!(parser.parse("ax").unwrap(), 'a');
    }
}
