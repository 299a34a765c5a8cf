//! Forward, peekable character sources.
//!
//! A [`Cursor`] produces characters one at a time and can hand out independent
//! lookahead cursors via [`Cursor::peek`]. Advancing a peeked cursor never
//! moves the cursor it was peeked from, which is what lets the JSON reader
//! detect the type of the next token without consuming it.

use alloc::{collections::VecDeque, string::String};

/// A forward character source with non-destructive lookahead.
pub trait Cursor {
    /// The lookahead cursor type handed out by [`peek`](Cursor::peek).
    type Peek<'c>: Cursor
    where
        Self: 'c;

    /// Returns an independent cursor positioned identically to `self`.
    ///
    /// Reading from the returned cursor never advances `self`. Peeked cursors
    /// can themselves be peeked, so lookahead nests to any depth.
    fn peek(&mut self) -> Self::Peek<'_>;

    /// Consumes and returns the next character, or `None` at end of input.
    fn read_char(&mut self) -> Option<char>;

    /// Returns the next character without consuming it.
    fn peek_char(&mut self) -> Option<char> {
        self.peek().read_char()
    }

    /// Consumes characters up to the first one contained in `terminators`
    /// and returns the consumed text.
    ///
    /// When `include` is `true` the terminator itself is consumed and
    /// appended; otherwise it is left in place. At end of input the text
    /// collected so far is returned without error.
    fn read_until(&mut self, terminators: &str, include: bool) -> String {
        let mut out = String::new();
        while let Some(c) = self.peek_char() {
            let terminate = terminators.contains(c);
            if terminate && !include {
                break;
            }
            self.read_char();
            out.push(c);
            if terminate {
                break;
            }
        }
        out
    }
}

/// A cursor over a borrowed string slice.
///
/// Peeking is a positional copy; no buffering is involved.
#[derive(Debug, Clone, Copy)]
pub struct StrCursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> StrCursor<'a> {
    /// Creates a cursor positioned at the start of `text`.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }
}

impl<'a> Cursor for StrCursor<'a> {
    type Peek<'c>
        = StrCursor<'a>
    where
        Self: 'c;

    fn peek(&mut self) -> StrCursor<'a> {
        *self
    }

    fn read_char(&mut self) -> Option<char> {
        let c = self.text[self.pos..].chars().next()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn peek_char(&mut self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }
}

/// A cursor over an arbitrary character stream.
///
/// Characters pulled from the underlying iterator on behalf of a peek are
/// buffered, so independent peeks replaying the same prefix never re-invoke
/// the iterator. The buffer only ever holds unconsumed lookahead; consumed
/// characters are dropped immediately.
#[derive(Debug)]
pub struct CharsCursor<I: Iterator<Item = char>> {
    iter: I,
    pending: VecDeque<char>,
}

impl<I: Iterator<Item = char>> CharsCursor<I> {
    /// Wraps a character iterator in a cursor.
    pub fn new(iter: I) -> Self {
        Self {
            iter,
            pending: VecDeque::new(),
        }
    }

    /// Character at `offset` past the cursor position, buffering as needed.
    fn char_at(&mut self, offset: usize) -> Option<char> {
        while self.pending.len() <= offset {
            let c = self.iter.next()?;
            self.pending.push_back(c);
        }
        Some(self.pending[offset])
    }
}

impl<I: Iterator<Item = char>> Cursor for CharsCursor<I> {
    type Peek<'c>
        = CharsPeek<'c, I>
    where
        Self: 'c;

    fn peek(&mut self) -> CharsPeek<'_, I> {
        CharsPeek {
            owner: self,
            offset: 0,
        }
    }

    fn read_char(&mut self) -> Option<char> {
        if let Some(c) = self.pending.pop_front() {
            return Some(c);
        }
        self.iter.next()
    }

    fn peek_char(&mut self) -> Option<char> {
        self.char_at(0)
    }
}

/// Lookahead over a [`CharsCursor`].
///
/// Holds an exclusive borrow of the owning cursor and an offset into its
/// lookahead buffer; reading advances only the offset.
#[derive(Debug)]
pub struct CharsPeek<'a, I: Iterator<Item = char>> {
    owner: &'a mut CharsCursor<I>,
    offset: usize,
}

impl<I: Iterator<Item = char>> Cursor for CharsPeek<'_, I> {
    type Peek<'c>
        = CharsPeek<'c, I>
    where
        Self: 'c;

    fn peek(&mut self) -> CharsPeek<'_, I> {
        CharsPeek {
            owner: &mut *self.owner,
            offset: self.offset,
        }
    }

    fn read_char(&mut self) -> Option<char> {
        let c = self.owner.char_at(self.offset)?;
        self.offset += 1;
        Some(c)
    }

    fn peek_char(&mut self) -> Option<char> {
        self.owner.char_at(self.offset)
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::String, vec::Vec};
    use core::cell::Cell;

    use super::*;

    #[test]
    fn str_cursor_reads_to_end() {
        let mut cursor = StrCursor::new("ab");
        assert_eq!(cursor.read_char(), Some('a'));
        assert_eq!(cursor.read_char(), Some('b'));
        assert_eq!(cursor.read_char(), None);
        assert_eq!(cursor.read_char(), None);
    }

    #[test]
    fn peek_does_not_advance_origin() {
        let mut cursor = StrCursor::new("abc");
        let mut peeked = cursor.peek();
        assert_eq!(peeked.read_char(), Some('a'));
        assert_eq!(peeked.read_char(), Some('b'));
        assert_eq!(cursor.read_char(), Some('a'));
    }

    #[test]
    fn nested_peeks_are_independent() {
        let mut cursor = StrCursor::new("xyz");
        let mut outer = cursor.peek();
        outer.read_char();
        let mut inner = outer.peek();
        assert_eq!(inner.read_char(), Some('y'));
        assert_eq!(inner.read_char(), Some('z'));
        assert_eq!(outer.read_char(), Some('y'));
        assert_eq!(cursor.read_char(), Some('x'));
    }

    #[test]
    fn read_until_excludes_terminator_by_default() {
        let mut cursor = StrCursor::new("hello,world");
        assert_eq!(cursor.read_until(",", false), "hello");
        assert_eq!(cursor.read_char(), Some(','));
    }

    #[test]
    fn read_until_can_include_terminator() {
        let mut cursor = StrCursor::new("hello,world");
        assert_eq!(cursor.read_until(",", true), "hello,");
        assert_eq!(cursor.read_char(), Some('w'));
    }

    #[test]
    fn read_until_stops_at_end_of_input() {
        let mut cursor = StrCursor::new("tail");
        assert_eq!(cursor.read_until(",", false), "tail");
        assert_eq!(cursor.read_char(), None);
    }

    /// Iterator that counts how many characters were pulled from it.
    struct CountingChars<'a> {
        inner: core::str::Chars<'a>,
        pulled: &'a Cell<usize>,
    }

    impl Iterator for CountingChars<'_> {
        type Item = char;

        fn next(&mut self) -> Option<char> {
            let c = self.inner.next();
            if c.is_some() {
                self.pulled.set(self.pulled.get() + 1);
            }
            c
        }
    }

    #[test]
    fn stream_peeks_never_double_consume_the_source() {
        let text = "abcdef";
        let pulled = Cell::new(0);
        let mut cursor = CharsCursor::new(CountingChars {
            inner: text.chars(),
            pulled: &pulled,
        });

        // Replay the same prefix from three independent peeks.
        for _ in 0..3 {
            let mut peeked = cursor.peek();
            assert_eq!(peeked.read_char(), Some('a'));
            assert_eq!(peeked.read_char(), Some('b'));
            assert_eq!(peeked.read_char(), Some('c'));
        }
        assert_eq!(pulled.get(), 3);

        let consumed: String = core::iter::from_fn(|| cursor.read_char()).collect();
        assert_eq!(consumed, text);
        assert_eq!(pulled.get(), text.len());
    }

    #[test]
    fn stream_cursor_matches_str_cursor() {
        let text = "{\"a\": [1, 2]}";
        let mut stream = CharsCursor::new(text.chars());
        let mut slice = StrCursor::new(text);
        let a: Vec<_> = core::iter::from_fn(|| stream.read_char()).collect();
        let b: Vec<_> = core::iter::from_fn(|| slice.read_char()).collect();
        assert_eq!(a, b);
    }
}
