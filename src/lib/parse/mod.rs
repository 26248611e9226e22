//! Recursive-descent readers for GeoJSON token streams.

use super::attributes::AttributesTable;
use super::error::{Error, Result};
use super::items::{Document, DocumentKind, Feature, FeatureCollection, Geometry, GeometryKind};
use super::settings::Settings;
use super::token::{Position, Token, TokenKind, TokenSource};
use tracing::debug;

mod document;
mod geometry;

/// Outcome of parsing a shape that the tolerance policy may throw away.
#[derive(Debug)]
pub(crate) enum Parsed<T> {
    Kept(T),
    Dropped(GeometryKind),
}

impl<T> Parsed<T> {
    pub(crate) fn kept(self) -> Option<T> {
        match self {
            Parsed::Kept(value) => Some(value),
            Parsed::Dropped(_) => None,
        }
    }
}

pub(crate) struct Parser<'a, S: ?Sized, A> {
    source: &'a mut S,
    settings: &'a Settings<A>,
}

impl<'a, S, A> Parser<'a, S, A>
where
    S: TokenSource + ?Sized,
    A: AttributesTable,
{
    pub(crate) fn new(source: &'a mut S, settings: &'a Settings<A>) -> Self {
        Parser { source, settings }
    }

    fn position(&self) -> Option<Position> {
        self.source.position()
    }

    fn unexpected(&self, expected: &[TokenKind], found: TokenKind) -> Error {
        Error::UnexpectedToken {
            expected: expected.to_vec(),
            found,
            position: self.position(),
        }
    }

    /// Next token, `expected` only serves the error for a premature end.
    fn read(&mut self, expected: &[TokenKind]) -> Result<Token> {
        self.source.next_token()?.ok_or_else(|| Error::UnexpectedEof {
            expected: expected.to_vec(),
        })
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        let token = self.read(&[kind])?;
        if token.kind() != kind {
            return Err(self.unexpected(&[kind], token.kind()));
        }
        Ok(token)
    }

    fn expect_property(&mut self) -> Result<String> {
        match self.expect(TokenKind::PropertyName)? {
            Token::PropertyName(name) => Ok(name),
            token => Err(self.unexpected(&[TokenKind::PropertyName], token.kind())),
        }
    }

    fn expect_name(&mut self, expected: &str) -> Result<()> {
        let name = self.expect_property()?;
        if name != expected {
            return Err(Error::UnexpectedValue {
                expected: format!("property '{}'", expected),
                found: name,
                position: self.position(),
            });
        }
        Ok(())
    }

    fn expect_string(&mut self) -> Result<String> {
        match self.expect(TokenKind::String)? {
            Token::String(s) => Ok(s),
            token => Err(self.unexpected(&[TokenKind::String], token.kind())),
        }
    }
}

/// Parses a document that is either a `FeatureCollection` or a bare `Feature`.
///
/// A bare feature whose geometry gets dropped by
/// [`Settings::skip_invalid_geometry`] fails with [`Error::InvalidGeometry`],
/// as a feature without geometry is not a valid document.
pub fn parse_document<S, A>(mut source: S, settings: &Settings<A>) -> Result<Document<A>>
where
    S: TokenSource,
    A: AttributesTable,
{
    let mut parser = Parser::new(&mut source, settings);
    let document = match parser.document_header()? {
        DocumentKind::FeatureCollection => {
            Document::FeatureCollection(parser.feature_collection_body()?)
        }
        DocumentKind::Feature => Document::Feature(parser.feature_body()?),
    };
    debug!(kind = document.kind().name(), "parsed document");
    Ok(document)
}

/// Parses a document that has to be a `FeatureCollection`.
///
/// # Example
///
/// ```
/// use geojson_codec::{parse_feature_collection, JsonTokenReader, Settings};
///
/// let json = r#"{"type": "FeatureCollection", "features": []}"#;
/// let reader: JsonTokenReader = json.parse().unwrap();
/// let settings: Settings = Settings::default();
/// let collection = parse_feature_collection(reader, &settings).unwrap();
/// assert!(collection.features.is_empty());
/// ```
pub fn parse_feature_collection<S, A>(
    mut source: S,
    settings: &Settings<A>,
) -> Result<FeatureCollection<A>>
where
    S: TokenSource,
    A: AttributesTable,
{
    let mut parser = Parser::new(&mut source, settings);
    match parser.document_header()? {
        DocumentKind::FeatureCollection => {
            let collection = parser.feature_collection_body()?;
            debug!(
                features = collection.features.len(),
                crs = ?collection.crs,
                "parsed feature collection"
            );
            Ok(collection)
        }
        kind => Err(Error::UnexpectedValue {
            expected: "a FeatureCollection document".into(),
            found: kind.name().into(),
            position: parser.position(),
        }),
    }
}

/// Parses a document that has to be a bare `Feature`.
pub fn parse_feature<S, A>(mut source: S, settings: &Settings<A>) -> Result<Feature<A>>
where
    S: TokenSource,
    A: AttributesTable,
{
    let mut parser = Parser::new(&mut source, settings);
    match parser.document_header()? {
        DocumentKind::Feature => parser.feature_body(),
        kind => Err(Error::UnexpectedValue {
            expected: "a Feature document".into(),
            found: kind.name().into(),
            position: parser.position(),
        }),
    }
}

/// Parses a single geometry object. `None` means the tolerance policy dropped
/// the whole shape.
pub fn parse_geometry<S, A>(mut source: S, settings: &Settings<A>) -> Result<Option<Geometry>>
where
    S: TokenSource,
    A: AttributesTable,
{
    let mut parser = Parser::new(&mut source, settings);
    Ok(parser.geometry()?.kept())
}
