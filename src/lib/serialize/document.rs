use super::Serializer;
use crate::attributes::{AttributeValue, AttributesTable};
use crate::error::Result;
use crate::items::{Crs, DocumentKind, Feature, FeatureCollection};
use crate::token::{Token, TokenSink};

impl<'a, W: TokenSink + ?Sized> Serializer<'a, W> {
    pub(crate) fn feature_collection<A: AttributesTable>(
        &mut self,
        collection: &FeatureCollection<A>,
    ) -> Result<()> {
        self.write(Token::StartObject)?;
        self.string_member("type", DocumentKind::FeatureCollection.name())?;

        if let Some(crs) = &collection.crs {
            self.name("crs")?;
            self.crs(crs)?;
        }

        self.name("features")?;
        self.write(Token::StartArray)?;
        for feature in &collection.features {
            self.feature(feature)?;
        }
        self.write(Token::EndArray)?;

        self.write(Token::EndObject)
    }

    pub(crate) fn feature<A: AttributesTable>(&mut self, feature: &Feature<A>) -> Result<()> {
        self.write(Token::StartObject)?;
        self.string_member("type", DocumentKind::Feature.name())?;

        self.name("properties")?;
        self.write(Token::StartObject)?;
        for (name, value) in feature.attributes.iter() {
            self.name(name)?;
            self.write(attribute_token(value))?;
        }
        self.write(Token::EndObject)?;

        self.name("geometry")?;
        self.geometry(&feature.geometry)?;

        self.write(Token::EndObject)
    }

    fn crs(&mut self, crs: &Crs) -> Result<()> {
        self.write(Token::StartObject)?;
        match crs {
            Crs::Named { name } => {
                self.string_member("type", "name")?;
                self.name("properties")?;
                self.write(Token::StartObject)?;
                self.string_member("name", name)?;
                self.write(Token::EndObject)?;
            }
            Crs::Linked { href, link_type } => {
                self.string_member("type", "link")?;
                self.name("properties")?;
                self.write(Token::StartObject)?;
                self.string_member("href", href)?;
                if let Some(link_type) = link_type {
                    self.string_member("type", link_type)?;
                }
                self.write(Token::EndObject)?;
            }
        }
        self.write(Token::EndObject)
    }
}

fn attribute_token(value: &AttributeValue) -> Token {
    match value {
        AttributeValue::String(s) => Token::String(s.clone()),
        AttributeValue::Float(f) => Token::Float(*f),
        AttributeValue::Integer(i) => Token::Integer(*i),
        AttributeValue::Null => Token::Null,
        AttributeValue::Timestamp(ts) => Token::Timestamp(*ts),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::Attributes;
    use crate::items::{Coordinate, Geometry};
    use crate::json::{JsonTokenReader, JsonTokenWriter};
    use crate::parse::parse_feature_collection;
    use crate::settings::Settings;
    use chrono::DateTime;

    fn point_feature(attributes: Attributes) -> Feature {
        Feature {
            geometry: Geometry::Point(Coordinate::new(13.4132, 52.5219)),
            attributes,
        }
    }

    fn to_json(collection: &FeatureCollection) -> String {
        let settings: Settings = Settings::default();
        let mut writer = JsonTokenWriter::new(Vec::new());
        Serializer::new(&mut writer, &settings)
            .feature_collection(collection)
            .unwrap();
        String::from_utf8(writer.finish().unwrap()).unwrap()
    }

    #[test]
    fn omits_absent_crs() {
        let collection = FeatureCollection::new(vec![point_feature(Attributes::new())]);
        let json = to_json(&collection);
        assert!(!json.contains("\"crs\""));
        assert_eq!(
            json,
            r#"{"type":"FeatureCollection","features":[{"type":"Feature","properties":{},"geometry":{"type":"Point","coordinates":[13.4132,52.5219]}}]}"#
        );
    }

    #[test]
    fn writes_named_crs() {
        let collection: FeatureCollection = FeatureCollection::default().with_crs(Crs::Named {
            name: "urn:ogc:def:crs:EPSG::4283".into(),
        });
        assert_eq!(
            to_json(&collection),
            r#"{"type":"FeatureCollection","crs":{"type":"name","properties":{"name":"urn:ogc:def:crs:EPSG::4283"}},"features":[]}"#
        );
    }

    #[test]
    fn writes_linked_crs_type_only_when_present() {
        let collection: FeatureCollection = FeatureCollection::default().with_crs(Crs::Linked {
            href: "data.crs".into(),
            link_type: None,
        });
        assert_eq!(
            to_json(&collection),
            r#"{"type":"FeatureCollection","crs":{"type":"link","properties":{"href":"data.crs"}},"features":[]}"#
        );

        let collection: FeatureCollection = FeatureCollection::default().with_crs(Crs::Linked {
            href: "data.crs".into(),
            link_type: Some("ogcwkt".into()),
        });
        assert!(to_json(&collection)
            .contains(r#""properties":{"href":"data.crs","type":"ogcwkt"}"#));
    }

    #[test]
    fn writes_attributes_in_stored_order() {
        let processed = DateTime::parse_from_rfc3339("2015-08-10T11:10:38+00:00").unwrap();
        let attributes: Attributes = vec![
            ("name", AttributeValue::from("Rosa-Luxemburg-Straße")),
            ("lanes", AttributeValue::from(2i64)),
            ("width", AttributeValue::from(7.5)),
            ("ref", AttributeValue::Null),
            ("processed", AttributeValue::from(processed)),
        ]
        .into_iter()
        .collect();
        let collection = FeatureCollection::new(vec![point_feature(attributes)]);
        let json = to_json(&collection);
        assert!(json.contains(
            r#""properties":{"name":"Rosa-Luxemburg-Straße","lanes":2,"width":7.5,"ref":null,"processed":"2015-08-10T11:10:38+00:00"}"#
        ));
    }

    #[test]
    fn collection_round_trip() {
        let attributes: Attributes = vec![
            ("name", AttributeValue::from("Alexanderplatz")),
            ("visitors", AttributeValue::from(360_000i64)),
        ]
        .into_iter()
        .collect();
        let collection = FeatureCollection::new(vec![
            point_feature(attributes),
            point_feature(Attributes::new()),
        ])
        .with_crs(Crs::Named {
            name: "urn:ogc:def:crs:OGC:1.3:CRS84".into(),
        });

        let reader: JsonTokenReader = to_json(&collection).parse().unwrap();
        let settings: Settings = Settings::default();
        let decoded = parse_feature_collection(reader, &settings).unwrap();
        assert_eq!(decoded, collection);
    }
}
