use super::items::GeometryKind;
use super::token::{Position, TokenKind};
use itertools::Itertools;
use std::io;
use std::string::FromUtf8Error;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while reading or writing GeoJSON.
///
/// All errors are fatal for the call that produced them, no partial document is
/// ever returned alongside one.
#[derive(Error, Debug)]
pub enum Error {
    #[error("expected {} but got {found}{}", one_of(.expected), at(.position))]
    UnexpectedToken {
        expected: Vec<TokenKind>,
        found: TokenKind,
        position: Option<Position>,
    },
    #[error("unexpected end of input, expected {}", one_of(.expected))]
    UnexpectedEof { expected: Vec<TokenKind> },
    #[error("expected {expected} but got '{found}'{}", at(.position))]
    UnexpectedValue {
        expected: String,
        found: String,
        position: Option<Position>,
    },
    #[error("don't know how to parse a '{found}' document{}", at(.position))]
    UnknownDocumentType {
        found: String,
        position: Option<Position>,
    },
    #[error("don't know how to parse a '{found}' geometry{}", at(.position))]
    UnknownGeometryType {
        found: String,
        position: Option<Position>,
    },
    #[error("don't know how to parse CRS type '{found}'{}", at(.position))]
    UnknownCrsType {
        found: String,
        position: Option<Position>,
    },
    #[error("property '{name}' holds {found}, attributes must be scalars{}", at(.position))]
    UnsupportedAttributeValue {
        name: String,
        found: TokenKind,
        position: Option<Position>,
    },
    #[error("property '{name}' appears more than once{}", at(.position))]
    DuplicateAttribute {
        name: String,
        position: Option<Position>,
    },
    #[error("missing required property '{name}'{}", at(.position))]
    MissingProperty {
        name: &'static str,
        position: Option<Position>,
    },
    #[error("invalid {kind}: {reason}")]
    InvalidGeometry { kind: GeometryKind, reason: String },
    #[error("can't write {kind} with 3D coordinates, only 2D is supported")]
    UnsupportedDimensionality { kind: GeometryKind },
    #[error("{0} geometries are not supported")]
    UnsupportedGeometry(&'static str),
    #[error("{0} can't be represented in JSON")]
    NonFiniteNumber(f64),
    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<Error>,
    },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Utf8(#[from] FromUtf8Error),
}

fn one_of(kinds: &[TokenKind]) -> String {
    match kinds {
        [kind] => kind.to_string(),
        kinds => format!("one of [{}]", kinds.iter().join(", ")),
    }
}

fn at(position: &Option<Position>) -> String {
    position
        .as_ref()
        .map(|p| format!(" at {}", p))
        .unwrap_or_default()
}
