//! Default token adapters backed by `serde_json`.

use super::error::{Error, Result};
use super::token::{Position, Token, TokenKind, TokenSink, TokenSource};
use chrono::DateTime;
use serde_json::Value;
use std::collections::VecDeque;
use std::io::{Read, Write};
use std::str::FromStr;

/// Reads a JSON document and hands it out token by token.
///
/// The document is parsed in one go, the decoders then walk the flattened
/// token list. Object members keep their textual order. Strings holding an
/// RFC 3339 date-time come out as [`Token::Timestamp`] unless date parsing is
/// switched off.
#[derive(Debug)]
pub struct JsonTokenReader {
    tokens: VecDeque<Token>,
    consumed: usize,
    path: Vec<PathFrame>,
    parse_dates: bool,
}

/// An open container on the way to the current token.
#[derive(Debug)]
struct PathFrame {
    next_index: usize,
    array: bool,
    child: Option<Segment>,
}

#[derive(Debug)]
enum Segment {
    Member(String),
    Index(usize),
}

impl JsonTokenReader {
    pub fn new(value: &Value) -> Self {
        let mut tokens = VecDeque::new();
        flatten(value, &mut tokens);
        JsonTokenReader {
            tokens,
            consumed: 0,
            path: vec![],
            parse_dates: true,
        }
    }

    pub fn from_slice(input: &[u8]) -> Result<Self> {
        let value: Value = serde_json::from_slice(input)?;
        Ok(Self::new(&value))
    }

    pub fn from_reader(reader: impl Read) -> Result<Self> {
        let value: Value = serde_json::from_reader(reader)?;
        Ok(Self::new(&value))
    }

    pub fn parse_dates(mut self, parse_dates: bool) -> Self {
        self.parse_dates = parse_dates;
        self
    }

    fn promote(&self, token: Token) -> Token {
        match token {
            Token::String(s) if self.parse_dates => match DateTime::parse_from_rfc3339(&s) {
                Ok(timestamp) => Token::Timestamp(timestamp),
                Err(_) => Token::String(s),
            },
            token => token,
        }
    }

    /// Moves the path along to the location of `token`, which is about to be
    /// handed out.
    fn track(&mut self, token: &Token) {
        match token {
            Token::PropertyName(name) => {
                if let Some(frame) = self.path.last_mut() {
                    frame.child = Some(Segment::Member(name.clone()));
                }
            }
            Token::EndObject | Token::EndArray => {
                self.path.pop();
            }
            token => {
                if let Some(frame) = self.path.last_mut() {
                    if frame.array {
                        frame.child = Some(Segment::Index(frame.next_index));
                        frame.next_index += 1;
                    }
                }
                let array = match token {
                    Token::StartArray => true,
                    Token::StartObject => false,
                    _ => return,
                };
                self.path.push(PathFrame {
                    next_index: 0,
                    array,
                    child: None,
                });
            }
        }
    }

    fn pointer(&self) -> String {
        let mut pointer = String::new();
        for segment in self.path.iter().filter_map(|frame| frame.child.as_ref()) {
            pointer.push('/');
            match segment {
                Segment::Member(name) => pointer.push_str(&escape_pointer(name)),
                Segment::Index(index) => pointer.push_str(&index.to_string()),
            }
        }
        pointer
    }
}

impl FromStr for JsonTokenReader {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(input)?;
        Ok(Self::new(&value))
    }
}

impl TokenSource for JsonTokenReader {
    fn next_token(&mut self) -> Result<Option<Token>> {
        let token = match self.tokens.pop_front() {
            Some(token) => token,
            None => return Ok(None),
        };
        self.track(&token);
        self.consumed += 1;
        Ok(Some(self.promote(token)))
    }

    fn peek_kind(&mut self) -> Result<Option<TokenKind>> {
        let kind = self.tokens.front().map(|token| match token {
            Token::String(s) if self.parse_dates && DateTime::parse_from_rfc3339(s).is_ok() => {
                TokenKind::Timestamp
            }
            token => token.kind(),
        });
        Ok(kind)
    }

    fn position(&self) -> Option<Position> {
        if self.consumed == 0 {
            return None;
        }
        Some(Position {
            index: self.consumed - 1,
            pointer: self.pointer(),
        })
    }
}

fn escape_pointer(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

fn flatten(value: &Value, tokens: &mut VecDeque<Token>) {
    match value {
        Value::Object(map) => {
            tokens.push_back(Token::StartObject);
            for (name, member) in map {
                tokens.push_back(Token::PropertyName(name.clone()));
                flatten(member, tokens);
            }
            tokens.push_back(Token::EndObject);
        }
        Value::Array(items) => {
            tokens.push_back(Token::StartArray);
            for item in items {
                flatten(item, tokens);
            }
            tokens.push_back(Token::EndArray);
        }
        Value::Number(number) => tokens.push_back(match number.as_i64() {
            Some(integer) => Token::Integer(integer),
            None => Token::Float(number.as_f64().unwrap_or(f64::NAN)),
        }),
        Value::String(s) => tokens.push_back(Token::String(s.clone())),
        Value::Bool(b) => tokens.push_back(Token::Boolean(*b)),
        Value::Null => tokens.push_back(Token::Null),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Container {
    Object,
    Array,
}

#[derive(Debug)]
struct Frame {
    container: Container,
    empty: bool,
    awaiting_value: bool,
}

const VALUE_KINDS: [TokenKind; 8] = [
    TokenKind::StartObject,
    TokenKind::StartArray,
    TokenKind::String,
    TokenKind::Float,
    TokenKind::Integer,
    TokenKind::Boolean,
    TokenKind::Null,
    TokenKind::Timestamp,
];

/// Writes tokens as compact JSON text.
///
/// Only well-nested token sequences are accepted; a property name outside of
/// an object or an unbalanced end token fails with
/// [`Error::UnexpectedToken`].
pub struct JsonTokenWriter<W: Write> {
    writer: W,
    stack: Vec<Frame>,
    root_written: bool,
}

impl<W: Write> JsonTokenWriter<W> {
    pub fn new(writer: W) -> Self {
        JsonTokenWriter {
            writer,
            stack: vec![],
            root_written: false,
        }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Checks that the document is complete and returns the inner writer.
    pub fn finish(mut self) -> Result<W> {
        if let Some(frame) = self.stack.last() {
            let expected = match frame.container {
                Container::Object => TokenKind::EndObject,
                Container::Array => TokenKind::EndArray,
            };
            return Err(Error::UnexpectedEof {
                expected: vec![expected],
            });
        }
        if !self.root_written {
            return Err(Error::UnexpectedEof {
                expected: VALUE_KINDS.to_vec(),
            });
        }
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn misplaced(expected: &[TokenKind], found: TokenKind) -> Error {
        Error::UnexpectedToken {
            expected: expected.to_vec(),
            found,
            position: None,
        }
    }

    /// Writes separators for the next token and checks it may appear here.
    fn prepare(&mut self, kind: TokenKind) -> Result<()> {
        let is_value = !matches!(
            kind,
            TokenKind::EndObject | TokenKind::EndArray | TokenKind::PropertyName
        );
        match self.stack.last_mut() {
            None => {
                if self.root_written || !is_value {
                    return Err(Self::misplaced(&VALUE_KINDS, kind));
                }
                self.root_written = true;
            }
            Some(frame) if frame.container == Container::Object && !frame.awaiting_value => {
                match kind {
                    TokenKind::PropertyName => {
                        if !frame.empty {
                            self.writer.write_all(b",")?;
                        }
                        frame.empty = false;
                        frame.awaiting_value = true;
                    }
                    TokenKind::EndObject => {}
                    kind => {
                        return Err(Self::misplaced(
                            &[TokenKind::PropertyName, TokenKind::EndObject],
                            kind,
                        ))
                    }
                }
            }
            Some(frame) if frame.container == Container::Object => {
                if !is_value {
                    return Err(Self::misplaced(&VALUE_KINDS, kind));
                }
                frame.awaiting_value = false;
            }
            Some(frame) => match kind {
                TokenKind::EndArray => {}
                TokenKind::PropertyName | TokenKind::EndObject => {
                    let mut expected = VALUE_KINDS.to_vec();
                    expected.push(TokenKind::EndArray);
                    return Err(Self::misplaced(&expected, kind));
                }
                _ => {
                    if !frame.empty {
                        self.writer.write_all(b",")?;
                    }
                    frame.empty = false;
                }
            },
        }
        Ok(())
    }

    fn close(&mut self, container: Container, found: TokenKind) -> Result<()> {
        match self.stack.pop() {
            Some(frame) if frame.container == container => Ok(()),
            Some(frame) => {
                let expected = match frame.container {
                    Container::Object => TokenKind::EndObject,
                    Container::Array => TokenKind::EndArray,
                };
                Err(Self::misplaced(&[expected], found))
            }
            None => Err(Self::misplaced(&VALUE_KINDS, found)),
        }
    }
}

impl<W: Write> TokenSink for JsonTokenWriter<W> {
    fn write_token(&mut self, token: Token) -> Result<()> {
        self.prepare(token.kind())?;
        match token {
            Token::StartObject => {
                self.stack.push(Frame {
                    container: Container::Object,
                    empty: true,
                    awaiting_value: false,
                });
                self.writer.write_all(b"{")?;
            }
            Token::StartArray => {
                self.stack.push(Frame {
                    container: Container::Array,
                    empty: true,
                    awaiting_value: false,
                });
                self.writer.write_all(b"[")?;
            }
            Token::EndObject => {
                self.close(Container::Object, TokenKind::EndObject)?;
                self.writer.write_all(b"}")?;
            }
            Token::EndArray => {
                self.close(Container::Array, TokenKind::EndArray)?;
                self.writer.write_all(b"]")?;
            }
            Token::PropertyName(name) => {
                serde_json::to_writer(&mut self.writer, &name)?;
                self.writer.write_all(b":")?;
            }
            Token::String(s) => serde_json::to_writer(&mut self.writer, &s)?,
            Token::Float(f) if !f.is_finite() => return Err(Error::NonFiniteNumber(f)),
            Token::Float(f) => serde_json::to_writer(&mut self.writer, &f)?,
            Token::Integer(i) => serde_json::to_writer(&mut self.writer, &i)?,
            Token::Boolean(b) => serde_json::to_writer(&mut self.writer, &b)?,
            Token::Null => self.writer.write_all(b"null")?,
            Token::Timestamp(timestamp) => {
                serde_json::to_writer(&mut self.writer, &timestamp.to_rfc3339())?
            }
        }
        Ok(())
    }
}
