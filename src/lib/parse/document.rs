use super::{Parsed, Parser};
use crate::attributes::{AttributeValue, AttributesTable};
use crate::error::{Error, Result};
use crate::items::{Crs, DocumentKind, Feature, FeatureCollection};
use crate::token::{Token, TokenKind, TokenSource};
use tracing::debug;

const MEMBER_OR_END: [TokenKind; 2] = [TokenKind::PropertyName, TokenKind::EndObject];

impl<'a, S, A> Parser<'a, S, A>
where
    S: TokenSource + ?Sized,
    A: AttributesTable,
{
    /// Reads `{"type": <kind>` of a root document.
    pub(crate) fn document_header(&mut self) -> Result<DocumentKind> {
        self.expect(TokenKind::StartObject)?;
        self.document_kind()
    }

    fn document_kind(&mut self) -> Result<DocumentKind> {
        self.expect_name("type")?;
        let name = self.expect_string()?;
        DocumentKind::from_name(&name).ok_or_else(|| Error::UnknownDocumentType {
            found: name,
            position: self.position(),
        })
    }

    /// Rest of a feature, after its `type` member. A feature has to keep its
    /// geometry, losing it to the tolerance policy is an error.
    pub(crate) fn feature_body(&mut self) -> Result<Feature<A>> {
        self.expect_name("properties")?;
        self.expect(TokenKind::StartObject)?;
        let attributes = self.attributes()?;

        self.expect_name("geometry")?;
        let geometry = self.geometry()?;
        self.expect(TokenKind::EndObject)?;

        match geometry {
            Parsed::Kept(geometry) => Ok(Feature {
                geometry,
                attributes,
            }),
            Parsed::Dropped(kind) => {
                debug!(geometry = kind.name(), "feature lost its geometry");
                Err(Error::InvalidGeometry {
                    kind,
                    reason: "the feature's only geometry was dropped".into(),
                })
            }
        }
    }

    /// Members of the `properties` object, its opening brace is already
    /// consumed.
    fn attributes(&mut self) -> Result<A> {
        let mut attributes = self.settings.new_attributes();
        loop {
            let name = match self.read(&MEMBER_OR_END)? {
                Token::EndObject => break,
                Token::PropertyName(name) => name,
                token => return Err(self.unexpected(&MEMBER_OR_END, token.kind())),
            };
            let value = self.attribute_value(&name)?;
            if attributes.contains(&name) {
                return Err(Error::DuplicateAttribute {
                    name,
                    position: self.position(),
                });
            }
            attributes.insert(&name, value);
        }
        Ok(attributes)
    }

    fn attribute_value(&mut self, name: &str) -> Result<AttributeValue> {
        let expected = [
            TokenKind::Float,
            TokenKind::Integer,
            TokenKind::Null,
            TokenKind::String,
            TokenKind::Timestamp,
        ];
        let value = match self.read(&expected)? {
            Token::Float(f) => AttributeValue::Float(f),
            Token::Integer(i) => AttributeValue::Integer(i),
            Token::Null => AttributeValue::Null,
            Token::String(s) => AttributeValue::String(s),
            Token::Timestamp(ts) => AttributeValue::Timestamp(ts),
            token => {
                return Err(Error::UnsupportedAttributeValue {
                    name: name.to_string(),
                    found: token.kind(),
                    position: self.position(),
                })
            }
        };
        Ok(value)
    }

    /// Rest of a feature collection, after its `type` member.
    pub(crate) fn feature_collection_body(&mut self) -> Result<FeatureCollection<A>> {
        let mut collection = FeatureCollection::default();

        let name = self.expect_property()?;
        match name.as_str() {
            "crs" => {
                collection.crs = Some(self.crs()?);
                self.expect_name("features")?;
            }
            "features" => {}
            _ => {
                return Err(Error::UnexpectedValue {
                    expected: "property 'crs' or 'features'".into(),
                    found: name,
                    position: self.position(),
                })
            }
        }

        self.expect(TokenKind::StartArray)?;
        let expected = [TokenKind::StartObject, TokenKind::EndArray];
        loop {
            match self.read(&expected)? {
                Token::EndArray => break,
                Token::StartObject => {
                    let feature = self.member_feature()?;
                    collection.features.push(feature);
                }
                token => return Err(self.unexpected(&expected, token.kind())),
            }
        }
        self.expect(TokenKind::EndObject)?;

        Ok(collection)
    }

    /// A feature inside the `features` array, its opening brace is already
    /// consumed.
    fn member_feature(&mut self) -> Result<Feature<A>> {
        match self.document_kind()? {
            DocumentKind::Feature => self.feature_body(),
            kind => Err(Error::UnexpectedValue {
                expected: "a Feature".into(),
                found: kind.name().into(),
                position: self.position(),
            }),
        }
    }

    fn crs(&mut self) -> Result<Crs> {
        self.expect(TokenKind::StartObject)?;
        self.expect_name("type")?;
        let crs_type = self.expect_string()?;
        let crs = match crs_type.as_str() {
            "name" => self.named_crs()?,
            "link" => self.linked_crs()?,
            _ => {
                return Err(Error::UnknownCrsType {
                    found: crs_type,
                    position: self.position(),
                })
            }
        };
        self.expect(TokenKind::EndObject)?;
        Ok(crs)
    }

    fn named_crs(&mut self) -> Result<Crs> {
        self.expect_name("properties")?;
        self.expect(TokenKind::StartObject)?;
        self.expect_name("name")?;
        let name = self.expect_string()?;
        self.expect(TokenKind::EndObject)?;
        Ok(Crs::Named { name })
    }

    fn linked_crs(&mut self) -> Result<Crs> {
        self.expect_name("properties")?;
        self.expect(TokenKind::StartObject)?;

        let mut href = None;
        let mut link_type = None;
        loop {
            let name = match self.read(&MEMBER_OR_END)? {
                Token::EndObject => break,
                Token::PropertyName(name) => name,
                token => return Err(self.unexpected(&MEMBER_OR_END, token.kind())),
            };
            match name.as_str() {
                "href" => href = Some(self.expect_string()?),
                "type" => link_type = Some(self.expect_string()?),
                _ => {
                    return Err(Error::UnexpectedValue {
                        expected: "property 'href' or 'type'".into(),
                        found: name,
                        position: self.position(),
                    })
                }
            }
        }

        let href = href.ok_or_else(|| Error::MissingProperty {
            name: "href",
            position: self.position(),
        })?;
        Ok(Crs::Linked { href, link_type })
    }
}
