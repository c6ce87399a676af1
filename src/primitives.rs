//! Parsers that look at the input directly: characters, literals and regexes

use crate::error::Error;
use crate::input::Input;
use crate::many::ManyExt;
use crate::named::NamedExt;
use crate::optional::OptionalExt;
use crate::outcome::{Outcome, ParseResult};
use crate::parser::Parser;
use crate::select::SelectExt;
use crate::text::TextExt;
use crate::then::ThenExt;
use regex::{Captures, Regex};
use std::borrow::Cow;

/// Message describing what was found at `input` when something else was expected
pub(crate) fn unexpected(input: &Input<'_>) -> Cow<'static, str> {
    match input.current() {
        Some(found) => format!("unexpected '{found}'").into(),
        None => "Unexpected end of input reached".into(),
    }
}

/// Parser that consumes one character accepted by a predicate
#[derive(Clone)]
pub struct CharParser<F> {
    predicate: F,
    description: Cow<'static, str>,
}

impl<F> CharParser<F>
where
    F: Fn(char) -> bool,
{
    pub fn new(predicate: F, description: impl Into<Cow<'static, str>>) -> Self {
        CharParser {
            predicate,
            description: description.into(),
        }
    }
}

impl<'code, F> Parser<'code> for CharParser<F>
where
    F: Fn(char) -> bool,
{
    type Output = char;

    fn run(&self, input: Input<'code>) -> ParseResult<'code, char> {
        match input.current() {
            Some(current) if (self.predicate)(current) => {
                Ok(Outcome::success(current, input.advance()?))
            }
            _ => {
                let message = unexpected(&input);
                Ok(Outcome::failure(
                    input,
                    message,
                    vec![self.description.clone()],
                ))
            }
        }
    }
}

/// Matches exactly `expected`
pub fn char(expected: char) -> CharParser<impl Fn(char) -> bool + Clone> {
    CharParser::new(move |c| c == expected, expected.to_string())
}

/// Matches one character accepted by `predicate`, described as `description` in failures
pub fn char_where<F>(predicate: F, description: impl Into<Cow<'static, str>>) -> CharParser<F>
where
    F: Fn(char) -> bool,
{
    CharParser::new(predicate, description)
}

/// Matches any one of the characters in `set`
pub fn chars(set: impl Into<String>) -> CharParser<impl Fn(char) -> bool + Clone> {
    let set: String = set.into();
    let description = set.chars().map(String::from).collect::<Vec<_>>().join("|");
    CharParser::new(move |c| set.contains(c), description)
}

/// Matches any character except `excluded`
pub fn char_except(excluded: char) -> CharParser<impl Fn(char) -> bool + Clone> {
    CharParser::new(
        move |c| c != excluded,
        format!("any character except {excluded}"),
    )
}

/// Matches any character not in `set`
pub fn chars_except(set: impl Into<String>) -> CharParser<impl Fn(char) -> bool + Clone> {
    let set: String = set.into();
    let description = format!(
        "any character except {}",
        set.chars().map(String::from).collect::<Vec<_>>().join("|")
    );
    CharParser::new(move |c| !set.contains(c), description)
}

fn class(predicate: fn(char) -> bool, description: &'static str) -> CharParser<fn(char) -> bool> {
    CharParser::new(predicate, description)
}

pub fn any_char() -> CharParser<fn(char) -> bool> {
    class(|_| true, "any character")
}

pub fn whitespace() -> CharParser<fn(char) -> bool> {
    class(char::is_whitespace, "whitespace")
}

/// ASCII decimal digit
pub fn digit() -> CharParser<fn(char) -> bool> {
    class(|c| c.is_ascii_digit(), "digit")
}

pub fn letter() -> CharParser<fn(char) -> bool> {
    class(char::is_alphabetic, "letter")
}

pub fn letter_or_digit() -> CharParser<fn(char) -> bool> {
    class(char::is_alphanumeric, "letter or digit")
}

pub fn lower() -> CharParser<fn(char) -> bool> {
    class(char::is_lowercase, "lowercase letter")
}

pub fn upper() -> CharParser<fn(char) -> bool> {
    class(char::is_uppercase, "uppercase letter")
}

/// Any Unicode numeric character
pub fn numeric() -> CharParser<fn(char) -> bool> {
    class(char::is_numeric, "numeric character")
}

/// Parser that matches a literal one character at a time
///
/// A mismatch is reported at the first offending character, so a partial match
/// consumes input. When nothing matched the expectation is the whole literal.
#[derive(Debug, Clone)]
pub struct StringParser {
    expected: Cow<'static, str>,
    ignore_case: bool,
}

impl StringParser {
    fn matches(&self, found: char, expected: char) -> bool {
        if self.ignore_case {
            found.to_lowercase().eq(expected.to_lowercase())
        } else {
            found == expected
        }
    }
}

impl<'code> Parser<'code> for StringParser {
    type Output = Vec<char>;

    fn run(&self, input: Input<'code>) -> ParseResult<'code, Vec<char>> {
        let mut current = input.clone();

        for expected in self.expected.chars() {
            match current.current() {
                Some(found) if self.matches(found, expected) => current = current.advance()?,
                _ => {
                    let message = unexpected(&current);
                    let expectation = if current == input {
                        self.expected.clone()
                    } else {
                        expected.to_string().into()
                    };
                    return Ok(Outcome::failure(current, message, vec![expectation]));
                }
            }
        }

        let matched = input.source()[input.position()..current.position()]
            .chars()
            .collect();
        Ok(Outcome::success(matched, current))
    }
}

/// Matches `expected` exactly
pub fn string(expected: impl Into<Cow<'static, str>>) -> StringParser {
    StringParser {
        expected: expected.into(),
        ignore_case: false,
    }
}

/// Matches `expected` ignoring case, returning the characters as written in the input
pub fn ignore_case(expected: impl Into<Cow<'static, str>>) -> StringParser {
    StringParser {
        expected: expected.into(),
        ignore_case: true,
    }
}

/// Parser that matches a regular expression anchored at the current position
#[derive(Debug, Clone)]
pub struct RegexParser {
    regex: Regex,
    pattern: String,
    description: Cow<'static, str>,
}

impl RegexParser {
    fn new(pattern: &str, description: Cow<'static, str>) -> Result<Self, Error> {
        let regex = Regex::new(&format!("^(?:{pattern})"))?;
        Ok(RegexParser {
            regex,
            pattern: pattern.to_string(),
            description,
        })
    }

    fn mismatch<'code, T>(&self, input: Input<'code>) -> Outcome<'code, T> {
        let found = match input.current() {
            Some(c) => format!("'{c}'"),
            None => "end of input".to_string(),
        };
        let message = format!(
            "string matching regex `{}` expected but {found} found",
            self.pattern
        );
        Outcome::failure(input, message, vec![self.description.clone()])
    }
}

impl<'code> Parser<'code> for RegexParser {
    type Output = &'code str;

    fn run(&self, input: Input<'code>) -> ParseResult<'code, &'code str> {
        match self.regex.find(input.rest()) {
            Some(found) => {
                let remainder = input.advance_by(found.end())?;
                Ok(Outcome::success(found.as_str(), remainder))
            }
            None => Ok(self.mismatch(input)),
        }
    }
}

/// Matches `pattern` at the current position and returns the matched text
///
/// An invalid pattern is reported immediately as [`Error::Regex`].
pub fn regex(
    pattern: &str,
    description: impl Into<Cow<'static, str>>,
) -> Result<RegexParser, Error> {
    RegexParser::new(pattern, description.into())
}

/// Like [`RegexParser`], but returns the capture groups of the match
#[derive(Debug, Clone)]
pub struct RegexMatchParser(RegexParser);

impl<'code> Parser<'code> for RegexMatchParser {
    type Output = Captures<'code>;

    fn run(&self, input: Input<'code>) -> ParseResult<'code, Captures<'code>> {
        match self.0.regex.captures(input.rest()) {
            Some(captures) => {
                let length = captures.get(0).map_or(0, |whole| whole.end());
                let remainder = input.advance_by(length)?;
                Ok(Outcome::success(captures, remainder))
            }
            None => Ok(self.0.mismatch(input)),
        }
    }
}

/// Matches `pattern` at the current position and returns all of its capture groups
pub fn regex_match(
    pattern: &str,
    description: impl Into<Cow<'static, str>>,
) -> Result<RegexMatchParser, Error> {
    RegexParser::new(pattern, description.into()).map(RegexMatchParser)
}

/// Parser that succeeds with a value without consuming input
#[derive(Debug, Clone)]
pub struct Succeed<T> {
    value: T,
}

impl<'code, T: Clone> Parser<'code> for Succeed<T> {
    type Output = T;

    fn run(&self, input: Input<'code>) -> ParseResult<'code, T> {
        Ok(Outcome::success(self.value.clone(), input))
    }
}

/// Always succeeds with `value`, consuming nothing
pub fn succeed<T: Clone>(value: T) -> Succeed<T> {
    Succeed { value }
}

/// One or more numeric characters
pub fn number<'code>() -> impl Parser<'code, Output = String> + Clone {
    numeric().at_least_once().text().named("number")
}

/// Digits with an optional `.` fraction, returned as written
pub fn decimal<'code>() -> impl Parser<'code, Output = String> + Clone {
    number()
        .then(|integer: String| {
            char('.')
                .then(|_| number())
                .optional()
                .select(move |fraction| match fraction {
                    Some(fraction) => format!("{integer}.{fraction}"),
                    None => integer.clone(),
                })
        })
        .named("decimal")
}

/// `"\n"` or `"\r\n"`
pub fn line_end<'code>() -> impl Parser<'code, Output = String> + Clone {
    char('\r')
        .optional()
        .then(|cr: Option<char>| {
            char('\n').select(move |lf| cr.into_iter().chain([lf]).collect::<String>())
        })
        .named("line end")
}
