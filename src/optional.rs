use crate::input::Input;
use crate::outcome::{Outcome, ParseResult};
use crate::parser::Parser;

/// Parser combinator that makes a parser optional
///
/// Returns `Some(value)` if the parser succeeds and `None` without consuming
/// anything if it fails. The strict variant ([`x_optional`]) only yields `None`
/// when the failure happened before any input was consumed.
#[derive(Clone)]
pub struct Optional<P> {
    parser: P,
    strict: bool,
}

impl<P> Optional<P> {
    pub fn new(parser: P) -> Self {
        Optional {
            parser,
            strict: false,
        }
    }

    pub fn strict(parser: P) -> Self {
        Optional {
            parser,
            strict: true,
        }
    }
}

impl<'code, P> Parser<'code> for Optional<P>
where
    P: Parser<'code>,
{
    type Output = Option<P::Output>;

    fn run(&self, input: Input<'code>) -> ParseResult<'code, Self::Output> {
        match self.parser.run(input.clone())? {
            Outcome::Success { value, remainder } => Ok(Outcome::success(Some(value), remainder)),
            Outcome::Failure(failure) if self.strict && failure.remainder() != &input => {
                Ok(Outcome::Failure(failure))
            }
            Outcome::Failure(_) => Ok(Outcome::success(None, input)),
        }
    }
}

/// Convenience function to create an Optional parser
pub fn optional<'code, P>(parser: P) -> Optional<P>
where
    P: Parser<'code>,
{
    Optional::new(parser)
}

/// Convenience function to create a strict Optional parser
pub fn x_optional<'code, P>(parser: P) -> Optional<P>
where
    P: Parser<'code>,
{
    Optional::strict(parser)
}

/// Extension trait to add .optional() and .x_optional() method support for parsers
pub trait OptionalExt<'code>: Parser<'code> + Sized {
    fn optional(self) -> Optional<Self> {
        Optional::new(self)
    }

    fn x_optional(self) -> Optional<Self> {
        Optional::strict(self)
    }
}

/// Implement OptionalExt for all parsers
impl<'code, P> OptionalExt<'code> for P where P: Parser<'code> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{char, string};
    use crate::text::TextExt;

    #[test]
    fn test_optional_present() {
        let outcome = char('a').optional().try_parse("abc").unwrap();
        assert_eq!(outcome.value(), Some(&Some('a')));
        assert_eq!(outcome.remainder().position(), 1);
    }

    #[test]
    fn test_optional_absent() {
        let outcome = optional(char('a')).try_parse("xyz").unwrap();
        assert_eq!(outcome.value(), Some(&None));
        assert_eq!(outcome.remainder().position(), 0);
    }

    #[test]
    fn test_optional_empty_input() {
        let outcome = char('a').optional().try_parse("").unwrap();
        assert_eq!(outcome.value(), Some(&None));
    }

    #[test]
    fn test_optional_rewinds_partial_match() {
        let outcome = string("abc").text().optional().try_parse("abx").unwrap();
        assert_eq!(outcome.value(), Some(&None));
        assert_eq!(outcome.remainder().position(), 0);
    }

    #[test]
    fn test_x_optional_reports_partial_match() {
        let outcome = string("abc").text().x_optional().try_parse("abx").unwrap();
        let failure = outcome.as_failure().unwrap();
        assert_eq!(failure.position(), 2);
        assert_eq!(failure.expectations(), ["c"]);
    }

    #[test]
    fn test_x_optional_absent() {
        let outcome = x_optional(string("abc")).try_parse("xyz").unwrap();
        assert_eq!(outcome.value(), Some(&None));
        assert_eq!(outcome.remainder().position(), 0);
    }
}
