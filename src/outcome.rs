use crate::error::Error;
use crate::input::Input;
use std::borrow::Cow;
use std::fmt;

/// What a parser hands back: fatal errors on `Err`, grammar outcomes on `Ok`
pub type ParseResult<'code, T> = Result<Outcome<'code, T>, Error>;

/// Number of characters shown before a failure in its display
const RECENTLY_CONSUMED_WINDOW: usize = 10;

/// Outcome of running a parser against some input
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<'code, T> {
    Success { value: T, remainder: Input<'code> },
    Failure(Failure<'code>),
}

/// Diagnostics for a rejected input
#[derive(Debug, Clone, PartialEq)]
pub struct Failure<'code> {
    remainder: Input<'code>,
    message: Cow<'static, str>,
    expectations: Vec<Cow<'static, str>>,
}

impl<'code, T> Outcome<'code, T> {
    pub fn success(value: T, remainder: Input<'code>) -> Self {
        Outcome::Success { value, remainder }
    }

    pub fn failure(
        remainder: Input<'code>,
        message: impl Into<Cow<'static, str>>,
        expectations: Vec<Cow<'static, str>>,
    ) -> Self {
        Outcome::Failure(Failure::new(remainder, message, expectations))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    /// Input left after a success, or the position a failure was detected at
    pub fn remainder(&self) -> &Input<'code> {
        match self {
            Outcome::Success { remainder, .. } => remainder,
            Outcome::Failure(failure) => failure.remainder(),
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Success { value, .. } => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Outcome::Success { value, .. } => Some(value),
            Outcome::Failure(_) => None,
        }
    }

    pub fn as_failure(&self) -> Option<&Failure<'code>> {
        match self {
            Outcome::Success { .. } => None,
            Outcome::Failure(failure) => Some(failure),
        }
    }

    /// Transforms a successful value, leaving failures untouched
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<'code, U> {
        match self {
            Outcome::Success { value, remainder } => Outcome::success(f(value), remainder),
            Outcome::Failure(failure) => Outcome::Failure(failure),
        }
    }

    /// Continues with `next` only on success; a failure is propagated as is
    pub fn map_success<U>(
        self,
        next: impl FnOnce(T, Input<'code>) -> ParseResult<'code, U>,
    ) -> ParseResult<'code, U> {
        match self {
            Outcome::Success { value, remainder } => next(value, remainder),
            Outcome::Failure(failure) => Ok(Outcome::Failure(failure)),
        }
    }

    /// Continues with `recover` only on failure; a success is passed through
    pub fn recover_failure(
        self,
        recover: impl FnOnce(Failure<'code>) -> ParseResult<'code, T>,
    ) -> ParseResult<'code, T> {
        match self {
            Outcome::Success { .. } => Ok(self),
            Outcome::Failure(failure) => recover(failure),
        }
    }
}

impl<'code> Failure<'code> {
    pub fn new(
        remainder: Input<'code>,
        message: impl Into<Cow<'static, str>>,
        expectations: Vec<Cow<'static, str>>,
    ) -> Self {
        Failure {
            remainder,
            message: message.into(),
            expectations,
        }
    }

    pub fn remainder(&self) -> &Input<'code> {
        &self.remainder
    }

    pub fn position(&self) -> usize {
        self.remainder.position()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn expectations(&self) -> &[Cow<'static, str>] {
        &self.expectations
    }

    /// Replaces the expectation list, keeping position and message
    pub fn expecting(self, expectations: Vec<Cow<'static, str>>) -> Self {
        Failure {
            expectations,
            ..self
        }
    }

    /// Picks the more informative of two failures from alternative branches
    ///
    /// The one that got further wins. On a tie the expectations are
    /// concatenated, keeping this failure's position and message.
    pub fn best(self, other: Failure<'code>) -> Failure<'code> {
        if other.position() > self.position() {
            return other;
        }
        if other.position() < self.position() {
            return self;
        }

        let mut expectations = self.expectations;
        expectations.extend(other.expectations);
        Failure {
            remainder: self.remainder,
            message: self.message,
            expectations,
        }
    }

    /// Converts into the error reported by [`Parser::parse`](crate::Parser::parse)
    pub fn into_error(self) -> Error {
        Error::Parse {
            position: self.remainder.position(),
            line: self.remainder.line(),
            column: self.remainder.column(),
            message: self.message,
            expectations: self.expectations,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Outcome<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success { value, .. } => write!(f, "Successful parsing of {value}."),
            Outcome::Failure(failure) => write!(f, "{failure}"),
        }
    }
}

impl fmt::Display for Failure<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parsing failure: {};", self.message)?;
        if !self.expectations.is_empty() {
            write!(f, " expected {}", self.expectations.join(" or "))?;
        }
        write!(
            f,
            " ({}); recently consumed: {}",
            self.remainder,
            self.remainder.recently_consumed(RECENTLY_CONSUMED_WINDOW)
        )
    }
}
