//! The streaming JSON pull parser.

use alloc::{string::String, vec, vec::Vec};

use super::Scope;
use crate::{Cursor, DataReader, ElementKind, Number, ReadError, number};

/// JSON whitespace.
const WHITESPACE: &str = " \n\r\t";

/// Characters that end an unquoted token.
const DELIMITERS: &str = " \n\r\t,}]";

/// A pull parser for JSON text.
///
/// The reader tracks its position in the document with a stack of [`Scope`]s;
/// every operation first checks that it is legal in the current scope and
/// consumes any pending separator. The session starts in the root scope and
/// ends in the closed scope once the single root value has been consumed.
///
/// Type detection via [`next_type`](DataReader::next_type) runs entirely on a
/// peeked cursor, so the reader's real position never moves.
///
/// # Examples
///
/// ```
/// use dataform::{DataReader, StrCursor};
/// use dataform::json::JsonReader;
///
/// let mut reader = JsonReader::new(StrCursor::new(r#"{"a": 1}"#));
/// reader.enter_map().unwrap();
/// assert_eq!(reader.read_key().unwrap(), "a");
/// assert_eq!(reader.read_i32().unwrap(), 1);
/// reader.leave_map().unwrap();
/// ```
#[derive(Debug)]
pub struct JsonReader<C: Cursor> {
    cursor: C,
    stack: Vec<Scope>,
}

impl<C: Cursor> JsonReader<C> {
    /// Creates a reader over `cursor`, positioned before the root value.
    pub fn new(cursor: C) -> Self {
        Self {
            cursor,
            stack: vec![Scope::Root],
        }
    }

    fn top(&self) -> Scope {
        *self.stack.last().unwrap_or(&Scope::Closed)
    }

    /// Transition before consuming a value token.
    fn before_value(&mut self, operation: &'static str) -> Result<(), ReadError> {
        skip_whitespace(&mut self.cursor);
        match self.top() {
            Scope::Root => {
                self.stack.pop();
                self.stack.push(Scope::Closed);
            }
            Scope::Key => {
                expect(&mut self.cursor, ':')?;
                skip_whitespace(&mut self.cursor);
                self.stack.pop();
            }
            Scope::List => {
                expect(&mut self.cursor, ',')?;
                skip_whitespace(&mut self.cursor);
            }
            Scope::EmptyList => {
                self.stack.pop();
                self.stack.push(Scope::List);
            }
            state @ (Scope::Map | Scope::EmptyMap | Scope::Closed) => {
                return Err(ReadError::IllegalState {
                    operation,
                    state: state.name(),
                });
            }
        }
        Ok(())
    }

    /// Transition before consuming a key token.
    fn before_key(&mut self, operation: &'static str) -> Result<(), ReadError> {
        skip_whitespace(&mut self.cursor);
        match self.top() {
            Scope::Map => {
                expect(&mut self.cursor, ',')?;
                skip_whitespace(&mut self.cursor);
            }
            Scope::EmptyMap => {
                self.stack.pop();
                self.stack.push(Scope::Map);
            }
            state => {
                return Err(ReadError::IllegalState {
                    operation,
                    state: state.name(),
                });
            }
        }
        Ok(())
    }

    /// Consumes an unquoted token up to the next delimiter.
    fn scalar_token(&mut self) -> Result<String, ReadError> {
        let token = self.cursor.read_until(DELIMITERS, false);
        if token.is_empty() {
            return Err(ReadError::UnexpectedEof);
        }
        Ok(token)
    }

    fn number_token(&mut self, operation: &'static str) -> Result<String, ReadError> {
        self.before_value(operation)?;
        let token = self.scalar_token()?;
        if number::is_valid(&token) {
            Ok(token)
        } else {
            Err(ReadError::InvalidNumber(token))
        }
    }
}

impl<C: Cursor> DataReader for JsonReader<C> {
    fn enter_map(&mut self) -> Result<(), ReadError> {
        self.before_value("enter map")?;
        expect(&mut self.cursor, '{')?;
        self.stack.push(Scope::EmptyMap);
        Ok(())
    }

    fn leave_map(&mut self) -> Result<(), ReadError> {
        if !self.top().is_map() {
            return Err(ReadError::IllegalState {
                operation: "leave map",
                state: self.top().name(),
            });
        }
        skip_whitespace(&mut self.cursor);
        expect(&mut self.cursor, '}')?;
        self.stack.pop();
        Ok(())
    }

    fn enter_list(&mut self) -> Result<(), ReadError> {
        self.before_value("enter list")?;
        expect(&mut self.cursor, '[')?;
        self.stack.push(Scope::EmptyList);
        Ok(())
    }

    fn leave_list(&mut self) -> Result<(), ReadError> {
        if !self.top().is_list() {
            return Err(ReadError::IllegalState {
                operation: "leave list",
                state: self.top().name(),
            });
        }
        skip_whitespace(&mut self.cursor);
        expect(&mut self.cursor, ']')?;
        self.stack.pop();
        Ok(())
    }

    fn read_key(&mut self) -> Result<String, ReadError> {
        self.before_key("read key")?;
        self.stack.push(Scope::Key);
        read_quoted(&mut self.cursor)
    }

    fn read_bool(&mut self) -> Result<bool, ReadError> {
        self.before_value("read boolean")?;
        match self.scalar_token()?.as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(ReadError::InvalidLiteral(other.into())),
        }
    }

    fn read_i32(&mut self) -> Result<i32, ReadError> {
        let token = self.number_token("read number")?;
        token.parse().map_err(|_| ReadError::InvalidNumber(token))
    }

    fn read_i64(&mut self) -> Result<i64, ReadError> {
        let token = self.number_token("read number")?;
        token.parse().map_err(|_| ReadError::InvalidNumber(token))
    }

    fn read_f32(&mut self) -> Result<f32, ReadError> {
        let token = self.number_token("read number")?;
        token.parse().map_err(|_| ReadError::InvalidNumber(token))
    }

    fn read_f64(&mut self) -> Result<f64, ReadError> {
        let token = self.number_token("read number")?;
        token.parse().map_err(|_| ReadError::InvalidNumber(token))
    }

    fn read_number(&mut self) -> Result<Number, ReadError> {
        let token = self.number_token("read number")?;
        Ok(Number::from_text(token))
    }

    fn read_string(&mut self) -> Result<String, ReadError> {
        self.before_value("read string")?;
        read_quoted(&mut self.cursor)
    }

    fn read_null(&mut self) -> Result<(), ReadError> {
        self.before_value("read null")?;
        match self.scalar_token()?.as_str() {
            "null" => Ok(()),
            other => Err(ReadError::InvalidLiteral(other.into())),
        }
    }

    fn has_next(&mut self) -> Result<bool, ReadError> {
        if self.top() == Scope::Key {
            return Err(ReadError::IllegalState {
                operation: "query next element",
                state: Scope::Key.name(),
            });
        }
        skip_whitespace(&mut self.cursor);
        let next = self.cursor.peek_char();
        Ok(match self.top() {
            // An empty scope has a first element unless it closes right away.
            Scope::EmptyMap => !matches!(next, Some('}') | None),
            Scope::EmptyList => !matches!(next, Some(']') | None),
            _ => next == Some(','),
        })
    }

    fn next_type(&mut self) -> Result<ElementKind, ReadError> {
        // Runs entirely on a peeked cursor; the real position is unchanged.
        let top = self.top();
        let mut lookahead = self.cursor.peek();
        skip_whitespace(&mut lookahead);
        match top {
            Scope::Key => {
                expect(&mut lookahead, ':')?;
                skip_whitespace(&mut lookahead);
            }
            Scope::List => {
                expect(&mut lookahead, ',')?;
                skip_whitespace(&mut lookahead);
            }
            _ => {}
        }

        match lookahead.peek_char() {
            None => return Err(ReadError::UnexpectedEof),
            Some('{') => return Ok(ElementKind::Map),
            Some('[') => return Ok(ElementKind::List),
            _ => {}
        }

        let token = lookahead.peek().read_until(DELIMITERS, false);
        match token.as_str() {
            "true" | "false" => Ok(ElementKind::Boolean),
            "null" => Ok(ElementKind::Null),
            t if number::is_valid(t) => Ok(ElementKind::Number),
            // Anything else must be a quoted token; reading it validates
            // that a closing quote exists.
            _ => {
                read_quoted(&mut lookahead)?;
                Ok(ElementKind::String)
            }
        }
    }
}

fn skip_whitespace<C: Cursor>(cursor: &mut C) {
    while matches!(cursor.peek_char(), Some(c) if WHITESPACE.contains(c)) {
        cursor.read_char();
    }
}

fn expect<C: Cursor>(cursor: &mut C, expected: char) -> Result<(), ReadError> {
    match cursor.read_char() {
        Some(c) if c == expected => Ok(()),
        Some(found) => Err(ReadError::UnexpectedChar { expected, found }),
        None => Err(ReadError::UnexpectedEof),
    }
}

/// Reads a quoted token, decoding escapes.
///
/// Either `"` or `'` opens the token; it must close with the same character.
fn read_quoted<C: Cursor>(cursor: &mut C) -> Result<String, ReadError> {
    let quote = match cursor.read_char() {
        Some(c @ ('"' | '\'')) => c,
        Some(found) => {
            return Err(ReadError::UnexpectedChar {
                expected: '"',
                found,
            });
        }
        None => return Err(ReadError::UnexpectedEof),
    };
    let mut out = String::new();
    loop {
        match cursor.read_char() {
            None => return Err(ReadError::UnterminatedString),
            Some('\\') => match cursor.read_char() {
                None => return Err(ReadError::UnterminatedString),
                Some(escaped) => out.push(unescape(escaped)?),
            },
            Some(c) if c == quote => return Ok(out),
            Some(c) => out.push(c),
        }
    }
}

fn unescape(c: char) -> Result<char, ReadError> {
    Ok(match c {
        '"' => '"',
        '\\' => '\\',
        'b' => '\u{0008}',
        'f' => '\u{000C}',
        'n' => '\n',
        'r' => '\r',
        't' => '\t',
        other => return Err(ReadError::InvalidEscape(other)),
    })
}
