use crate::input::Input;
use crate::outcome::{Outcome, ParseResult};
use crate::parser::Parser;

/// Parser combinator that requires the wrapped parser to consume all remaining input
///
/// A success that stops short of the end is turned into a failure at the first
/// unconsumed character.
#[derive(Clone)]
pub struct End<P> {
    parser: P,
}

impl<P> End<P> {
    pub fn new(parser: P) -> Self {
        End { parser }
    }
}

impl<'code, P> Parser<'code> for End<P>
where
    P: Parser<'code>,
{
    type Output = P::Output;

    fn run(&self, input: Input<'code>) -> ParseResult<'code, P::Output> {
        self.parser.run(input)?.map_success(|value, remainder| {
            match remainder.current() {
                None => Ok(Outcome::success(value, remainder)),
                Some(found) => Ok(Outcome::failure(
                    remainder,
                    format!("unexpected '{found}'"),
                    vec!["end of input".into()],
                )),
            }
        })
    }
}

/// Convenience function to create an End parser
pub fn end<'code, P>(parser: P) -> End<P>
where
    P: Parser<'code>,
{
    End::new(parser)
}

/// Extension trait to add .end() method support for parsers
pub trait EndExt<'code>: Parser<'code> + Sized {
    fn end(self) -> End<Self> {
        End::new(self)
    }
}

/// Implement EndExt for all parsers
impl<'code, P> EndExt<'code> for P where P: Parser<'code> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::many::ManyExt;
    use crate::primitives::{char, digit};

    #[test]
    fn test_end_accepts_full_match() {
        let outcome = digit().many().end().try_parse("123").unwrap();
        assert_eq!(outcome.value(), Some(&vec!['1', '2', '3']));
        assert!(outcome.remainder().at_end());
    }

    #[test]
    fn test_end_rejects_leftover_input() {
        let outcome = end(digit().many()).try_parse("12x").unwrap();
        let failure = outcome.as_failure().unwrap();
        assert_eq!(failure.position(), 2);
        assert_eq!(failure.message(), "unexpected 'x'");
        assert_eq!(failure.expectations(), ["end of input"]);
    }

    #[test]
    fn test_end_passes_inner_failure_through() {
        let outcome = char('a').end().try_parse("b").unwrap();
        assert_eq!(outcome.as_failure().unwrap().expectations(), ["a"]);
    }

    #[test]
    fn test_end_on_empty_input() {
        assert!(digit().many().end().try_parse("").unwrap().is_success());
    }
}
