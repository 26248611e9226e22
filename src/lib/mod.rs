//! Reading and writing GeoJSON documents over generic token streams.
//!
//! The decoders pull [`Token`]s from any [`TokenSource`] and the encoders push
//! them into any [`TokenSink`]. [`JsonTokenReader`] and [`JsonTokenWriter`]
//! connect both ends to actual JSON text, the `from_*`/`to_*` functions below
//! wire them up for the common case.

use std::io::{Read, Write};

mod attributes;
mod error;
pub mod geo;
mod items;
mod json;
pub mod output;
mod parse;
mod serialize;
mod settings;
mod token;

pub use attributes::{AttributeValue, Attributes, AttributesTable};
pub use error::{Error, Result};
pub use items::{
    Coordinate, Crs, Document, DocumentKind, Feature, FeatureCollection, Geometry, GeometryKind,
    LineString, MultiLineString, MultiPolygon, Polygon,
};
pub use json::{JsonTokenReader, JsonTokenWriter};
pub use output::{read_json_lines, Output};
pub use parse::{parse_document, parse_feature, parse_feature_collection, parse_geometry};
pub use serialize::{
    serialize_document, serialize_feature, serialize_feature_collection, serialize_geometry,
};
pub use settings::Settings;
pub use token::{Position, Token, TokenKind, TokenReplay, TokenSink, TokenSource};

/// Decodes a GeoJSON document from a string.
///
/// ```
/// use geojson_codec::{from_str, Document, Settings};
///
/// let json = r#"{"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[1,2]}}"#;
/// let settings: Settings = Settings::default();
/// match from_str(json, &settings).unwrap() {
///     Document::Feature(feature) => assert_eq!(feature.geometry.kind().name(), "Point"),
///     other => panic!("unexpected {:?}", other),
/// }
/// ```
pub fn from_str<A: AttributesTable>(json: &str, settings: &Settings<A>) -> Result<Document<A>> {
    let reader: JsonTokenReader = json.parse()?;
    parse_document(reader, settings)
}

pub fn from_reader<A: AttributesTable>(
    reader: impl Read,
    settings: &Settings<A>,
) -> Result<Document<A>> {
    parse_document(JsonTokenReader::from_reader(reader)?, settings)
}

/// Encodes a document as compact GeoJSON.
pub fn to_string<A: AttributesTable, B>(
    document: &Document<A>,
    settings: &Settings<B>,
) -> Result<String> {
    let buffer = to_writer(document, Vec::new(), settings)?;
    Ok(String::from_utf8(buffer)?)
}

/// Encodes a document into `writer` and hands it back once the document is
/// complete.
pub fn to_writer<A: AttributesTable, W: Write, B>(
    document: &Document<A>,
    writer: W,
    settings: &Settings<B>,
) -> Result<W> {
    let mut sink = JsonTokenWriter::new(writer);
    serialize_document(document, &mut sink, settings)?;
    sink.finish()
}
