use super::error::Result;
use chrono::{DateTime, FixedOffset};
use std::fmt;

/// A single lexical event of a JSON document.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    PropertyName(String),
    String(String),
    Float(f64),
    Integer(i64),
    Boolean(bool),
    Null,
    Timestamp(DateTime<FixedOffset>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    StartObject,
    EndObject,
    StartArray,
    EndArray,
    PropertyName,
    String,
    Float,
    Integer,
    Boolean,
    Null,
    Timestamp,
}

impl Token {
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::StartObject => TokenKind::StartObject,
            Token::EndObject => TokenKind::EndObject,
            Token::StartArray => TokenKind::StartArray,
            Token::EndArray => TokenKind::EndArray,
            Token::PropertyName(_) => TokenKind::PropertyName,
            Token::String(_) => TokenKind::String,
            Token::Float(_) => TokenKind::Float,
            Token::Integer(_) => TokenKind::Integer,
            Token::Boolean(_) => TokenKind::Boolean,
            Token::Null => TokenKind::Null,
            Token::Timestamp(_) => TokenKind::Timestamp,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::StartObject => "start of object",
            TokenKind::EndObject => "end of object",
            TokenKind::StartArray => "start of array",
            TokenKind::EndArray => "end of array",
            TokenKind::PropertyName => "property name",
            TokenKind::String => "string",
            TokenKind::Float => "float",
            TokenKind::Integer => "integer",
            TokenKind::Boolean => "boolean",
            TokenKind::Null => "null",
            TokenKind::Timestamp => "timestamp",
        };
        f.write_str(name)
    }
}

/// Where a token was found in its source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// Zero-based ordinal of the token in the stream.
    pub index: usize,
    /// JSON pointer of the value the token belongs to.
    pub pointer: String,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pointer.is_empty() {
            write!(f, "token {}", self.index)
        } else {
            write!(f, "token {} ({})", self.index, self.pointer)
        }
    }
}

/// Pull side of a tokenizer.
///
/// `next_token` returns `None` once the input is exhausted. `position` should
/// describe the token most recently returned by `next_token`.
pub trait TokenSource {
    fn next_token(&mut self) -> Result<Option<Token>>;
    fn peek_kind(&mut self) -> Result<Option<TokenKind>>;

    fn position(&self) -> Option<Position> {
        None
    }
}

/// Push side of a tokenizer.
pub trait TokenSink {
    fn write_token(&mut self, token: Token) -> Result<()>;
}

impl<S: TokenSource + ?Sized> TokenSource for &mut S {
    fn next_token(&mut self) -> Result<Option<Token>> {
        (**self).next_token()
    }

    fn peek_kind(&mut self) -> Result<Option<TokenKind>> {
        (**self).peek_kind()
    }

    fn position(&self) -> Option<Position> {
        (**self).position()
    }
}

impl<S: TokenSink + ?Sized> TokenSink for &mut S {
    fn write_token(&mut self, token: Token) -> Result<()> {
        (**self).write_token(token)
    }
}

/// Collecting tokens into a `Vec` is handy to inspect what an encoder emits.
impl TokenSink for Vec<Token> {
    fn write_token(&mut self, token: Token) -> Result<()> {
        self.push(token);
        Ok(())
    }
}

/// Replays a fixed list of tokens, mostly useful for feeding hand-built
/// streams to the decoders.
#[derive(Debug, Clone)]
pub struct TokenReplay {
    tokens: std::vec::IntoIter<Token>,
    index: usize,
}

impl TokenReplay {
    pub fn new(tokens: Vec<Token>) -> Self {
        TokenReplay {
            tokens: tokens.into_iter(),
            index: 0,
        }
    }
}

impl TokenSource for TokenReplay {
    fn next_token(&mut self) -> Result<Option<Token>> {
        let token = self.tokens.next();
        if token.is_some() {
            self.index += 1;
        }
        Ok(token)
    }

    fn peek_kind(&mut self) -> Result<Option<TokenKind>> {
        Ok(self.tokens.as_slice().first().map(Token::kind))
    }

    fn position(&self) -> Option<Position> {
        Some(Position {
            index: self.index.saturating_sub(1),
            pointer: String::new(),
        })
    }
}
