use crate::input::Input;
use crate::many::collect;
use crate::outcome::ParseResult;
use crate::parser::Parser;
use crate::then::ThenExt;

/// Parser combinator that matches a list of items separated by a delimiter
///
/// This combinator parses one item, followed by zero or more occurrences of
/// (delimiter + item). It returns a vector of all items; delimiter values are
/// discarded.
///
/// # Examples
/// - `"a,a,a"` with delimiter `,` → `vec!['a', 'a', 'a']`
/// - `"a,a,"` with delimiter `,` → `vec!['a', 'a']`, stopping before the last `,`
///
/// # Note
/// - Requires at least one element
/// - The strict variant ([`x_delimited_by`]) fails on a delimiter followed by a
///   malformed item instead of stopping before it
/// - Does not handle whitespace automatically
#[derive(Clone)]
pub struct DelimitedBy<P, D> {
    parser: P,
    delimiter: D,
    strict: bool,
}

impl<P, D> DelimitedBy<P, D> {
    pub fn new(parser: P, delimiter: D) -> Self {
        DelimitedBy {
            parser,
            delimiter,
            strict: false,
        }
    }

    pub fn strict(parser: P, delimiter: D) -> Self {
        DelimitedBy {
            parser,
            delimiter,
            strict: true,
        }
    }
}

impl<'code, P, D> Parser<'code> for DelimitedBy<P, D>
where
    P: Parser<'code>,
    D: Parser<'code>,
{
    type Output = Vec<P::Output>;

    fn run(&self, input: Input<'code>) -> ParseResult<'code, Self::Output> {
        let delimited_item = (&self.delimiter).then(|_| &self.parser);

        self.parser.run(input)?.map_success(|head, remainder| {
            collect(&delimited_item, remainder, vec![head], self.strict)
        })
    }
}

/// Convenience function to create a DelimitedBy parser
pub fn delimited_by<'code, P, D>(parser: P, delimiter: D) -> DelimitedBy<P, D>
where
    P: Parser<'code>,
    D: Parser<'code>,
{
    DelimitedBy::new(parser, delimiter)
}

/// Convenience function to create a strict DelimitedBy parser
pub fn x_delimited_by<'code, P, D>(parser: P, delimiter: D) -> DelimitedBy<P, D>
where
    P: Parser<'code>,
    D: Parser<'code>,
{
    DelimitedBy::strict(parser, delimiter)
}

/// Extension trait to add .delimited_by() and .x_delimited_by() method support for parsers
pub trait DelimitedExt<'code>: Parser<'code> + Sized {
    fn delimited_by<D>(self, delimiter: D) -> DelimitedBy<Self, D>
    where
        D: Parser<'code>,
    {
        DelimitedBy::new(self, delimiter)
    }

    fn x_delimited_by<D>(self, delimiter: D) -> DelimitedBy<Self, D>
    where
        D: Parser<'code>,
    {
        DelimitedBy::strict(self, delimiter)
    }
}

/// Implement DelimitedExt for all parsers
impl<'code, P> DelimitedExt<'code> for P where P: Parser<'code> {}
