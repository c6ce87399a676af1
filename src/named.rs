use super::parser::Parser;
use crate::input::Input;
use crate::outcome::{Outcome, ParseResult};
use std::borrow::Cow;

/// Parser combinator that reports failures under a single name
///
/// The expectations of a failure are replaced by `name` only when the failure
/// happened where the parser started. A failure deeper inside keeps its own,
/// more precise expectations.
#[derive(Clone)]
pub struct Named<P> {
    parser: P,
    name: Cow<'static, str>,
}

impl<P> Named<P> {
    pub fn new(parser: P, name: impl Into<Cow<'static, str>>) -> Self {
        Named {
            parser,
            name: name.into(),
        }
    }
}

impl<'code, P> Parser<'code> for Named<P>
where
    P: Parser<'code>,
{
    type Output = P::Output;

    fn run(&self, input: Input<'code>) -> ParseResult<'code, P::Output> {
        self.parser.run(input.clone())?.recover_failure(|failure| {
            if failure.remainder() == &input {
                Ok(Outcome::Failure(failure.expecting(vec![self.name.clone()])))
            } else {
                Ok(Outcome::Failure(failure))
            }
        })
    }
}

/// Extension trait to add .named() method support for parsers
pub trait NamedExt<'code>: Parser<'code> + Sized {
    fn named(self, name: impl Into<Cow<'static, str>>) -> Named<Self> {
        Named::new(self, name)
    }
}

/// Implement NamedExt for all parsers
impl<'code, P> NamedExt<'code> for P where P: Parser<'code> {}

/// Convenience function to create a Named parser
pub fn named<'code, P>(parser: P, name: impl Into<Cow<'static, str>>) -> Named<P>
where
    P: Parser<'code>,
{
    Named::new(parser, name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::or::OrExt;
    use crate::primitives::{char, digit, letter, string};
    use crate::text::TextExt;

    #[test]
    fn test_named_replaces_expectations_at_start() {
        let parser = digit().or(letter()).named("identifier part");
        let outcome = parser.try_parse("!").unwrap();
        let failure = outcome.as_failure().unwrap();
        assert_eq!(failure.message(), "unexpected '!'");
        assert_eq!(failure.expectations(), ["identifier part"]);
    }

    #[test]
    fn test_named_keeps_deeper_expectations() {
        let parser = named(string("select"), "keyword");
        let outcome = parser.try_parse("sex").unwrap();
        let failure = outcome.as_failure().unwrap();
        assert_eq!(failure.position(), 2);
        assert_eq!(failure.expectations(), ["l"]);
    }

    #[test]
    fn test_named_success_is_unchanged() {
        let parser = string("ab").text().named("ab");
        assert_eq!(parser.parse("ab").unwrap(), "ab");
    }

    #[test]
    fn test_named_shows_in_parse_error() {
        let error = char('=').named("assignment").parse("x").unwrap_err();
        assert_eq!(
            error.to_string(),
            "Parsing Error: (1:1): unexpected 'x', expected: assignment"
        );
    }
}
