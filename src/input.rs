use crate::error::Error;
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::ptr;
use std::rc::Rc;

/// Rules currently running, keyed by (rule id, byte offset)
///
/// One table is shared by every input derived from the same [`Input::new`] call,
/// so separate parses never observe each other's entries.
#[derive(Debug, Default)]
pub(crate) struct MemoTable {
    active: RefCell<HashSet<(usize, usize)>>,
}

impl MemoTable {
    /// Marks the rule as running at `position`. Returns false when it already is.
    pub(crate) fn enter(&self, rule: usize, position: usize) -> bool {
        self.active.borrow_mut().insert((rule, position))
    }

    pub(crate) fn leave(&self, rule: usize, position: usize) {
        self.active.borrow_mut().remove(&(rule, position));
    }
}

/// Immutable, position-tracking view over the source text
///
/// Advancing never mutates an input, it returns a new one, so any input can be
/// kept around as a backtracking point. Positions are byte offsets into the
/// source; lines and columns are 1-based and count characters.
#[derive(Clone)]
pub struct Input<'code> {
    source: &'code str,
    position: usize,
    line: usize,
    column: usize,
    memos: Rc<MemoTable>,
}

impl<'code> Input<'code> {
    /// Creates an input at the start of `source` with a fresh memo table
    pub fn new(source: &'code str) -> Self {
        Input {
            source,
            position: 0,
            line: 1,
            column: 1,
            memos: Rc::new(MemoTable::default()),
        }
    }

    /// Character at the current position, `None` at the end
    pub fn current(&self) -> Option<char> {
        self.rest().chars().next()
    }

    pub fn at_end(&self) -> bool {
        self.position == self.source.len()
    }

    /// Returns the input one character further along
    ///
    /// Advancing over `'\n'` moves to column 1 of the next line. Calling this at
    /// the end of the source is a usage error.
    pub fn advance(&self) -> Result<Self, Error> {
        let current = self.current().ok_or(Error::AlreadyAtEnd {
            position: self.position,
        })?;

        let (line, column) = if current == '\n' {
            (self.line + 1, 1)
        } else {
            (self.line, self.column + 1)
        };

        Ok(Input {
            source: self.source,
            position: self.position + current.len_utf8(),
            line,
            column,
            memos: Rc::clone(&self.memos),
        })
    }

    /// Advances over the next `bytes` bytes, keeping line and column in step
    pub(crate) fn advance_by(&self, bytes: usize) -> Result<Self, Error> {
        let target = self.position + bytes;
        let mut input = self.clone();
        while input.position < target {
            input = input.advance()?;
        }
        Ok(input)
    }

    /// Byte offset into the source
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn source(&self) -> &'code str {
        self.source
    }

    /// Unconsumed part of the source
    pub fn rest(&self) -> &'code str {
        &self.source[self.position..]
    }

    /// Up to `window` characters immediately before the current position
    pub fn recently_consumed(&self, window: usize) -> &'code str {
        let consumed = &self.source[..self.position];
        let start = consumed
            .char_indices()
            .rev()
            .take(window)
            .last()
            .map_or(self.position, |(index, _)| index);
        &consumed[start..]
    }

    pub(crate) fn memos(&self) -> &MemoTable {
        &self.memos
    }
}

impl PartialEq for Input<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.source, other.source) && self.position == other.position
    }
}

impl Eq for Input<'_> {}

impl fmt::Debug for Input<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Input")
            .field("position", &self.position)
            .field("line", &self.line)
            .field("column", &self.column)
            .field("current", &self.current())
            .finish()
    }
}

impl fmt::Display for Input<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}, Column {}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advanced<'code>(input: &Input<'code>, times: usize) -> Input<'code> {
        let mut input = input.clone();
        for _ in 0..times {
            input = input.advance().unwrap();
        }
        input
    }

    #[test]
    fn test_new_input_is_at_first_character() {
        let input = Input::new("abc");
        assert_eq!(input.position(), 0);
        assert_eq!(input.line(), 1);
        assert_eq!(input.column(), 1);
        assert_eq!(input.current(), Some('a'));
    }

    #[test]
    fn test_same_string_same_position_equal() {
        let source = "Nada";
        let first = advanced(&Input::new(source), 2);
        let second = advanced(&Input::new(source), 2);
        assert_eq!(first, second);
    }

    #[test]
    fn test_same_string_different_position_not_equal() {
        let source = "Nada";
        let first = advanced(&Input::new(source), 1);
        let second = advanced(&Input::new(source), 2);
        assert_ne!(first, second);
    }

    #[test]
    fn test_different_strings_same_position_not_equal() {
        let first = advanced(&Input::new("Algo"), 2);
        let second = advanced(&Input::new("Nada"), 2);
        assert_ne!(first, second);
    }

    #[test]
    fn test_cannot_advance_at_end() {
        let input = Input::new("");
        assert!(input.at_end());
        assert_eq!(input.current(), None);
        assert_eq!(
            input.advance().unwrap_err(),
            Error::AlreadyAtEnd { position: 0 }
        );
    }

    #[test]
    fn test_current_reflects_position() {
        let input = advanced(&Input::new("abc"), 1);
        assert_eq!(input.current(), Some('b'));
        assert_eq!(input.rest(), "bc");
    }

    #[test]
    fn test_advancing_increases_column() {
        let input = advanced(&Input::new("abc"), 1);
        let next = input.advance().unwrap();
        assert_eq!(next.position(), 2);
        assert_eq!(next.column(), 3);
        assert_eq!(next.line(), 1);
    }

    #[test]
    fn test_advancing_over_newline() {
        let input = Input::new("\nabc");
        let next = input.advance().unwrap();
        assert_eq!(next.line(), 2);
        assert_eq!(next.column(), 1);
    }

    #[test]
    fn test_line_counting_smoke() {
        let expected = [(1, 1, 2), (2, 1, 3), (3, 1, 4), (4, 2, 1), (5, 2, 2), (6, 2, 3)];
        let mut input = Input::new("abc\ndef");

        for (position, line, column) in expected {
            input = input.advance().unwrap();
            assert_eq!(input.position(), position);
            assert_eq!(input.line(), line);
            assert_eq!(input.column(), column);
        }
        assert!(input.at_end());
    }

    #[test]
    fn test_multibyte_characters() {
        let input = Input::new("åä🦀");
        let input = advanced(&input, 2);
        assert_eq!(input.position(), 4);
        assert_eq!(input.column(), 3);
        assert_eq!(input.current(), Some('🦀'));

        let input = input.advance().unwrap();
        assert!(input.at_end());
        assert_eq!(input.position(), "åä🦀".len());
    }

    #[test]
    fn test_advance_by_tracks_lines() {
        let input = Input::new("ab\ncd");
        let input = input.advance_by(4).unwrap();
        assert_eq!(input.position(), 4);
        assert_eq!(input.line(), 2);
        assert_eq!(input.column(), 2);
    }

    #[test]
    fn test_recently_consumed_window() {
        let input = advanced(&Input::new("0123456789abcdef"), 14);
        assert_eq!(input.recently_consumed(10), "456789abcd");

        let input = advanced(&Input::new("xyz"), 2);
        assert_eq!(input.recently_consumed(10), "xy");

        let input = Input::new("xyz");
        assert_eq!(input.recently_consumed(10), "");
    }

    #[test]
    fn test_memo_table_is_shared_along_one_parse() {
        let start = Input::new("ab");
        let later = start.advance().unwrap();

        assert!(start.memos().enter(7, 0));
        assert!(!later.memos().enter(7, 0));
        later.memos().leave(7, 0);
        assert!(start.memos().enter(7, 0));

        let fresh = Input::new("ab");
        assert!(fresh.memos().enter(7, 0));
    }

    #[test]
    fn test_copy_independence() {
        let input = Input::new("abcd");
        let saved_at_a = input.clone();

        let input = input.advance().unwrap();
        assert_eq!(input.current(), Some('b'));
        assert_eq!(saved_at_a.current(), Some('a'));

        let from_a = saved_at_a.advance().unwrap();
        assert_eq!(from_a, input);
    }
}
