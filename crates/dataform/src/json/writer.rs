//! The streaming JSON push serializer.

use alloc::{
    string::{String, ToString},
    vec,
    vec::Vec,
};
use core::fmt::Write;

use super::Scope;
use crate::{DataWriter, Number, WriteError, number};

/// Output style configuration for [`JsonWriter`].
///
/// # Examples
///
/// ```
/// use dataform::json::Style;
///
/// let compact = Style::compact();
/// let pretty = Style::pretty("  ");
/// ```
#[derive(Debug, Clone)]
pub struct Style {
    /// Indentation repeated once per nesting depth on new lines.
    pub indent: String,
    /// Text inserted between sibling elements; empty for single-line output.
    pub newline: String,
    /// Whether `:` and `,` gain a trailing space when no newline is
    /// configured.
    pub spaces: bool,
}

impl Style {
    /// Single-line output with no whitespace outside string contents.
    #[must_use]
    pub fn compact() -> Self {
        Self {
            indent: String::new(),
            newline: String::new(),
            spaces: false,
        }
    }

    /// Multi-line output indented by `indent` per nesting depth.
    #[must_use]
    pub fn pretty(indent: &str) -> Self {
        Self {
            indent: indent.to_string(),
            newline: "\n".to_string(),
            spaces: true,
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::compact()
    }
}

/// A push serializer for JSON text.
///
/// Mirrors the reader's scope stack: values are only accepted where the
/// grammar allows them, and separators and indentation are emitted as part
/// of the transition into each value. The writer always emits `"` as the
/// string delimiter.
///
/// # Examples
///
/// ```
/// use dataform::DataWriter;
/// use dataform::json::{JsonWriter, Style};
///
/// let mut out = String::new();
/// let mut writer = JsonWriter::new(&mut out, Style::compact());
/// writer.open_map().unwrap();
/// writer.key("on").unwrap();
/// writer.value_bool(true).unwrap();
/// writer.close_map().unwrap();
/// assert_eq!(out, r#"{"on":true}"#);
/// ```
#[derive(Debug)]
pub struct JsonWriter<W: Write> {
    sink: W,
    style: Style,
    comma: &'static str,
    colon: &'static str,
    stack: Vec<Scope>,
    depth: usize,
}

impl<W: Write> JsonWriter<W> {
    /// Creates a writer emitting into `sink` with the given style.
    pub fn new(sink: W, style: Style) -> Self {
        let colon = if style.spaces { ": " } else { ":" };
        let comma = if style.newline.is_empty() && style.spaces {
            ", "
        } else {
            ","
        };
        Self {
            sink,
            style,
            comma,
            colon,
            stack: vec![Scope::Root],
            depth: 0,
        }
    }

    /// Consumes the writer, returning the sink.
    pub fn into_inner(self) -> W {
        self.sink
    }

    fn top(&self) -> Scope {
        *self.stack.last().unwrap_or(&Scope::Closed)
    }

    /// Transition before emitting a value, writing separators as needed.
    fn before_value(&mut self, operation: &'static str) -> Result<(), WriteError> {
        match self.top() {
            Scope::Root => {
                self.stack.pop();
                self.stack.push(Scope::Closed);
            }
            Scope::Key => {
                self.stack.pop();
                self.sink.write_str(self.colon)?;
            }
            Scope::List => {
                self.sink.write_str(self.comma)?;
                self.write_newline()?;
                self.write_indent()?;
            }
            Scope::EmptyList => {
                self.write_newline()?;
                self.write_indent()?;
                self.stack.pop();
                self.stack.push(Scope::List);
            }
            state @ (Scope::Map | Scope::EmptyMap | Scope::Closed) => {
                return Err(WriteError::IllegalState {
                    operation,
                    state: state.name(),
                });
            }
        }
        Ok(())
    }

    /// Transition before emitting a key.
    fn before_key(&mut self, operation: &'static str) -> Result<(), WriteError> {
        match self.top() {
            Scope::Map => {
                self.sink.write_str(self.comma)?;
                self.write_newline()?;
                self.write_indent()?;
            }
            Scope::EmptyMap => {
                self.write_newline()?;
                self.write_indent()?;
                self.stack.pop();
                self.stack.push(Scope::Map);
            }
            state => {
                return Err(WriteError::IllegalState {
                    operation,
                    state: state.name(),
                });
            }
        }
        Ok(())
    }

    fn write_newline(&mut self) -> Result<(), WriteError> {
        self.sink.write_str(&self.style.newline)?;
        Ok(())
    }

    fn write_indent(&mut self) -> Result<(), WriteError> {
        if !self.style.newline.is_empty() {
            for _ in 0..self.depth {
                self.sink.write_str(&self.style.indent)?;
            }
        }
        Ok(())
    }

    fn write_quoted(&mut self, text: &str) -> Result<(), WriteError> {
        self.sink.write_char('"')?;
        for c in text.chars() {
            match escape(c) {
                Some(replacement) => self.sink.write_str(replacement)?,
                None => self.sink.write_char(c)?,
            }
        }
        self.sink.write_char('"')?;
        Ok(())
    }
}

impl<W: Write> DataWriter for JsonWriter<W> {
    fn open_map(&mut self) -> Result<(), WriteError> {
        self.before_value("open map")?;
        self.stack.push(Scope::EmptyMap);
        self.sink.write_char('{')?;
        self.depth += 1;
        Ok(())
    }

    fn close_map(&mut self) -> Result<(), WriteError> {
        if !self.top().is_map() {
            return Err(WriteError::IllegalState {
                operation: "close map",
                state: self.top().name(),
            });
        }
        self.depth -= 1;
        if self.top() == Scope::Map {
            self.write_newline()?;
            self.write_indent()?;
        }
        self.stack.pop();
        self.sink.write_char('}')?;
        Ok(())
    }

    fn open_list(&mut self) -> Result<(), WriteError> {
        self.before_value("open list")?;
        self.stack.push(Scope::EmptyList);
        self.sink.write_char('[')?;
        self.depth += 1;
        Ok(())
    }

    fn close_list(&mut self) -> Result<(), WriteError> {
        if !self.top().is_list() {
            return Err(WriteError::IllegalState {
                operation: "close list",
                state: self.top().name(),
            });
        }
        self.depth -= 1;
        if self.top() == Scope::List {
            self.write_newline()?;
            self.write_indent()?;
        }
        self.stack.pop();
        self.sink.write_char(']')?;
        Ok(())
    }

    fn key(&mut self, key: &str) -> Result<(), WriteError> {
        self.before_key("write key")?;
        self.stack.push(Scope::Key);
        self.write_quoted(key)
    }

    fn value_bool(&mut self, value: bool) -> Result<(), WriteError> {
        self.before_value("write value")?;
        self.sink.write_str(if value { "true" } else { "false" })?;
        Ok(())
    }

    fn value_i32(&mut self, value: i32) -> Result<(), WriteError> {
        self.before_value("write value")?;
        write!(self.sink, "{value}")?;
        Ok(())
    }

    fn value_i64(&mut self, value: i64) -> Result<(), WriteError> {
        self.before_value("write value")?;
        write!(self.sink, "{value}")?;
        Ok(())
    }

    fn value_f32(&mut self, value: f32) -> Result<(), WriteError> {
        if !value.is_finite() {
            return Err(WriteError::NonFinite(value.into()));
        }
        self.before_value("write value")?;
        write!(self.sink, "{value}")?;
        Ok(())
    }

    fn value_f64(&mut self, value: f64) -> Result<(), WriteError> {
        if !value.is_finite() {
            return Err(WriteError::NonFinite(value));
        }
        self.before_value("write value")?;
        write!(self.sink, "{value}")?;
        Ok(())
    }

    fn value_number(&mut self, value: &Number) -> Result<(), WriteError> {
        if !number::is_valid(value.as_str()) {
            return Err(WriteError::InvalidNumber(value.as_str().into()));
        }
        self.before_value("write value")?;
        self.sink.write_str(value.as_str())?;
        Ok(())
    }

    fn value_string(&mut self, value: &str) -> Result<(), WriteError> {
        self.before_value("write value")?;
        self.write_quoted(value)
    }

    fn value_null(&mut self) -> Result<(), WriteError> {
        self.before_value("write value")?;
        self.sink.write_str("null")?;
        Ok(())
    }
}

/// Escape replacement for characters that may not appear raw in a string
/// literal, if any.
const fn escape(c: char) -> Option<&'static str> {
    Some(match c {
        '"' => "\\\"",
        '\\' => "\\\\",
        '\u{0008}' => "\\b",
        '\u{000C}' => "\\f",
        '\n' => "\\n",
        '\r' => "\\r",
        '\t' => "\\t",
        _ => return None,
    })
}
