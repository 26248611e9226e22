//! Writers that turn the document model back into tokens.

use super::attributes::AttributesTable;
use super::error::Result;
use super::items::{Document, Feature, FeatureCollection, Geometry};
use super::settings::Settings;
use super::token::{Token, TokenSink};
use tracing::debug;

mod document;
mod geometry;

pub(crate) struct Serializer<'a, W: ?Sized> {
    sink: &'a mut W,
    skip_invalid_geometry: bool,
}

impl<'a, W: TokenSink + ?Sized> Serializer<'a, W> {
    pub(crate) fn new<A>(sink: &'a mut W, settings: &Settings<A>) -> Self {
        Serializer {
            sink,
            skip_invalid_geometry: settings.skip_invalid_geometry,
        }
    }

    fn write(&mut self, token: Token) -> Result<()> {
        self.sink.write_token(token)
    }

    fn name(&mut self, name: &str) -> Result<()> {
        self.write(Token::PropertyName(name.to_string()))
    }

    /// A `"name": "value"` member.
    fn string_member(&mut self, name: &str, value: &str) -> Result<()> {
        self.name(name)?;
        self.write(Token::String(value.to_string()))
    }
}

/// Writes a `FeatureCollection` document.
///
/// # Example
///
/// ```
/// use geojson_codec::{serialize_feature_collection, FeatureCollection, JsonTokenWriter, Settings};
///
/// let collection: FeatureCollection = FeatureCollection::default();
/// let mut writer = JsonTokenWriter::new(Vec::new());
/// let settings: Settings = Settings::default();
/// serialize_feature_collection(&collection, &mut writer, &settings).unwrap();
/// let json = String::from_utf8(writer.finish().unwrap()).unwrap();
/// assert_eq!(json, r#"{"type":"FeatureCollection","features":[]}"#);
/// ```
pub fn serialize_feature_collection<A, W, B>(
    collection: &FeatureCollection<A>,
    mut sink: W,
    settings: &Settings<B>,
) -> Result<()>
where
    A: AttributesTable,
    W: TokenSink,
{
    Serializer::new(&mut sink, settings).feature_collection(collection)?;
    debug!(
        features = collection.features.len(),
        "serialized feature collection"
    );
    Ok(())
}

/// Writes a bare `Feature` document.
pub fn serialize_feature<A, W, B>(
    feature: &Feature<A>,
    mut sink: W,
    settings: &Settings<B>,
) -> Result<()>
where
    A: AttributesTable,
    W: TokenSink,
{
    Serializer::new(&mut sink, settings).feature(feature)
}

pub fn serialize_document<A, W, B>(
    document: &Document<A>,
    sink: W,
    settings: &Settings<B>,
) -> Result<()>
where
    A: AttributesTable,
    W: TokenSink,
{
    match document {
        Document::FeatureCollection(collection) => {
            serialize_feature_collection(collection, sink, settings)
        }
        Document::Feature(feature) => serialize_feature(feature, sink, settings),
    }
}

/// Writes a single geometry object.
pub fn serialize_geometry<W, B>(
    geometry: &Geometry,
    mut sink: W,
    settings: &Settings<B>,
) -> Result<()>
where
    W: TokenSink,
{
    Serializer::new(&mut sink, settings).geometry(geometry)
}
