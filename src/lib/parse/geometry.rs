use super::{Parsed, Parser};
use crate::attributes::AttributesTable;
use crate::error::{Error, Result};
use crate::items::{
    Coordinate, Geometry, GeometryKind, LineString, MultiLineString, MultiPolygon, Polygon,
};
use crate::token::{Token, TokenKind, TokenSource};
use tracing::trace;

const NUMBER: [TokenKind; 2] = [TokenKind::Float, TokenKind::Integer];

impl<'a, S, A> Parser<'a, S, A>
where
    S: TokenSource + ?Sized,
    A: AttributesTable,
{
    /// Consumes a geometry object, from its opening brace through the closing
    /// one.
    pub(crate) fn geometry(&mut self) -> Result<Parsed<Geometry>> {
        self.expect(TokenKind::StartObject)?;
        self.expect_name("type")?;
        let kind = self.geometry_kind()?;
        self.expect_name("coordinates")?;

        let geometry = match kind {
            GeometryKind::Point => {
                self.expect(TokenKind::StartArray)?;
                Some(Geometry::Point(self.coordinate()?))
            }
            GeometryKind::LineString => {
                self.expect(TokenKind::StartArray)?;
                self.line_string()?.map(Geometry::LineString)
            }
            GeometryKind::MultiLineString => {
                self.expect(TokenKind::StartArray)?;
                Some(Geometry::MultiLineString(self.multi_line_string()?))
            }
            GeometryKind::Polygon => {
                self.expect(TokenKind::StartArray)?;
                self.polygon()?.map(Geometry::Polygon)
            }
            GeometryKind::MultiPolygon => {
                self.expect(TokenKind::StartArray)?;
                Some(Geometry::MultiPolygon(self.multi_polygon()?))
            }
        };

        self.expect(TokenKind::EndObject)?;
        Ok(match geometry {
            Some(geometry) => Parsed::Kept(geometry),
            None => Parsed::Dropped(kind),
        })
    }

    fn geometry_kind(&mut self) -> Result<GeometryKind> {
        let name = self.expect_string()?;
        GeometryKind::from_name(&name).ok_or_else(|| Error::UnknownGeometryType {
            found: name,
            position: self.position(),
        })
    }

    fn number(&mut self) -> Result<f64> {
        match self.read(&NUMBER)? {
            Token::Float(f) => Ok(f),
            Token::Integer(i) => Ok(i as f64),
            token => Err(self.unexpected(&NUMBER, token.kind())),
        }
    }

    /// Two or three numbers, the opening bracket is already consumed.
    fn coordinate(&mut self) -> Result<Coordinate> {
        let x = self.number()?;
        let y = self.number()?;
        let expected = [TokenKind::Float, TokenKind::Integer, TokenKind::EndArray];
        match self.read(&expected)? {
            Token::EndArray => Ok(Coordinate::new(x, y)),
            Token::Float(z) => {
                self.expect(TokenKind::EndArray)?;
                Ok(Coordinate::with_z(x, y, z))
            }
            Token::Integer(z) => {
                self.expect(TokenKind::EndArray)?;
                Ok(Coordinate::with_z(x, y, z as f64))
            }
            token => Err(self.unexpected(&expected, token.kind())),
        }
    }

    /// Runs `item` for every nested array until the enclosing array closes.
    /// The opening bracket of the enclosing array is already consumed.
    fn nested_arrays<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> Result<T>,
    ) -> Result<Vec<T>> {
        let expected = [TokenKind::StartArray, TokenKind::EndArray];
        let mut items = vec![];
        loop {
            match self.read(&expected)? {
                Token::EndArray => break,
                Token::StartArray => items.push(item(&mut *self)?),
                token => return Err(self.unexpected(&expected, token.kind())),
            }
        }
        Ok(items)
    }

    fn line_string(&mut self) -> Result<Option<LineString>> {
        let coordinates = self.nested_arrays(Self::coordinate)?;
        if coordinates.len() >= 2 {
            return Ok(Some(LineString(coordinates)));
        }
        if self.settings.skip_invalid_geometry {
            trace!(
                coordinates = coordinates.len(),
                "dropping line string with too few coordinates"
            );
            return Ok(None);
        }
        Err(Error::InvalidGeometry {
            kind: GeometryKind::LineString,
            reason: format!(
                "needs at least 2 coordinates, got {}",
                coordinates.len()
            ),
        })
    }

    fn multi_line_string(&mut self) -> Result<MultiLineString> {
        let line_strings = self.nested_arrays(Self::line_string)?;
        Ok(MultiLineString(line_strings.into_iter().flatten().collect()))
    }

    /// A polygon has the token shape of a multi line string. The first ring
    /// left after dropping becomes the exterior, the others are holes.
    fn polygon(&mut self) -> Result<Option<Polygon>> {
        let mut rings = self.multi_line_string()?.0.into_iter();
        match rings.next() {
            Some(exterior) => Ok(Some(Polygon::new(exterior, rings.collect()))),
            None if self.settings.skip_invalid_geometry => {
                trace!("dropping polygon without rings");
                Ok(None)
            }
            None => Err(Error::InvalidGeometry {
                kind: GeometryKind::Polygon,
                reason: "needs at least an exterior ring".into(),
            }),
        }
    }

    fn multi_polygon(&mut self) -> Result<MultiPolygon> {
        let polygons = self.nested_arrays(Self::polygon)?;
        Ok(MultiPolygon(polygons.into_iter().flatten().collect()))
    }
}
