use super::Serializer;
use crate::error::{Error, Result};
use crate::items::{Coordinate, Geometry, GeometryKind, LineString, Polygon};
use crate::token::{Token, TokenSink};

impl<'a, W: TokenSink + ?Sized> Serializer<'a, W> {
    pub(crate) fn geometry(&mut self, geometry: &Geometry) -> Result<()> {
        let kind = geometry.kind();
        self.write(Token::StartObject)?;
        self.string_member("type", kind.name())?;
        self.name("coordinates")?;

        match geometry {
            Geometry::Point(coordinate) => self.coordinate(coordinate, kind)?,
            Geometry::LineString(line_string) => self.line_string(line_string, kind)?,
            Geometry::MultiLineString(multi_line_string) => {
                self.write(Token::StartArray)?;
                for line_string in &multi_line_string.0 {
                    self.line_string(line_string, kind)?;
                }
                self.write(Token::EndArray)?;
            }
            Geometry::Polygon(polygon) => self.polygon(polygon, kind)?,
            Geometry::MultiPolygon(multi_polygon) => {
                self.write(Token::StartArray)?;
                for polygon in &multi_polygon.0 {
                    self.polygon(polygon, kind)?;
                }
                self.write(Token::EndArray)?;
            }
        }

        self.write(Token::EndObject)
    }

    /// Only x and y are written, `kind` names the geometry in errors.
    fn coordinate(&mut self, coordinate: &Coordinate, kind: GeometryKind) -> Result<()> {
        if coordinate.z.is_some() {
            return Err(Error::UnsupportedDimensionality { kind });
        }
        self.write(Token::StartArray)?;
        self.write(Token::Float(coordinate.x))?;
        self.write(Token::Float(coordinate.y))?;
        self.write(Token::EndArray)
    }

    fn line_string(&mut self, line_string: &LineString, kind: GeometryKind) -> Result<()> {
        if line_string.is_degenerate() && !self.skip_invalid_geometry {
            return Err(Error::InvalidGeometry {
                kind,
                reason: format!(
                    "line strings need at least 2 coordinates, got {}",
                    line_string.len()
                ),
            });
        }

        self.write(Token::StartArray)?;
        if !line_string.is_degenerate() {
            for coordinate in line_string.coordinates() {
                self.coordinate(coordinate, kind)?;
            }
        }
        self.write(Token::EndArray)
    }

    fn polygon(&mut self, polygon: &Polygon, kind: GeometryKind) -> Result<()> {
        self.write(Token::StartArray)?;
        for ring in polygon.rings() {
            self.line_string(ring, kind)?;
        }
        self.write(Token::EndArray)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{MultiLineString, MultiPolygon};
    use crate::json::{JsonTokenReader, JsonTokenWriter};
    use crate::parse::parse_geometry;
    use crate::settings::Settings;

    fn to_json(geometry: &Geometry, skip_invalid_geometry: bool) -> Result<String> {
        let settings: Settings = Settings::default().skip_invalid_geometry(skip_invalid_geometry);
        let mut writer = JsonTokenWriter::new(Vec::new());
        Serializer::new(&mut writer, &settings).geometry(geometry)?;
        Ok(String::from_utf8(writer.finish()?).unwrap())
    }

    fn round_trip(geometry: &Geometry) -> Geometry {
        let json = to_json(geometry, false).unwrap();
        let reader: JsonTokenReader = json.parse().unwrap();
        let settings: Settings = Settings::default();
        parse_geometry(reader, &settings).unwrap().unwrap()
    }

    fn ring(coordinates: &[(f64, f64)]) -> LineString {
        coordinates.to_vec().into()
    }

    fn square(origin: f64, size: f64) -> LineString {
        ring(&[
            (origin, origin),
            (origin + size, origin),
            (origin + size, origin + size),
            (origin, origin + size),
            (origin, origin),
        ])
    }

    #[test]
    fn point() {
        let geometry = Geometry::Point(Coordinate::new(152.7465, -31.1015));
        assert_eq!(
            to_json(&geometry, false).unwrap(),
            r#"{"type":"Point","coordinates":[152.7465,-31.1015]}"#
        );
    }

    #[test]
    fn polygon_writes_exterior_first() {
        let polygon = Polygon::new(square(0., 10.), vec![square(1., 1.), square(5., 2.)]);
        let json = to_json(&Geometry::Polygon(polygon.clone()), false).unwrap();
        assert!(json.starts_with(r#"{"type":"Polygon","coordinates":[[[0.0,0.0],[10.0,0.0]"#));

        match round_trip(&Geometry::Polygon(polygon.clone())) {
            Geometry::Polygon(decoded) => {
                assert_eq!(decoded.exterior(), polygon.exterior());
                assert_eq!(decoded.interiors(), polygon.interiors());
            }
            other => panic!("expected polygon, got {:?}", other),
        }
    }

    #[test]
    fn every_kind_survives_a_round_trip() {
        let geometries = vec![
            Geometry::Point(Coordinate::new(13.4132, 52.5219)),
            Geometry::LineString(ring(&[(9., 50.), (9., 51.), (10.5, 51.25)])),
            Geometry::MultiLineString(MultiLineString(vec![
                ring(&[(0., 0.), (1., 1.)]),
                ring(&[(2., 2.), (3., 3.), (4., 2.)]),
            ])),
            Geometry::Polygon(Polygon::new(square(0., 4.), vec![square(1., 1.)])),
            Geometry::MultiPolygon(MultiPolygon(vec![
                Polygon::new(square(0., 1.), vec![]),
                Polygon::new(square(10., 5.), vec![square(11., 1.), square(13., 1.)]),
            ])),
        ];
        for geometry in geometries {
            assert_eq!(round_trip(&geometry), geometry);
        }
    }

    #[test]
    fn third_dimension_is_rejected() {
        let geometry = Geometry::LineString(LineString(vec![
            Coordinate::new(0., 0.),
            Coordinate::with_z(1., 1., 34.),
        ]));
        assert!(matches!(
            to_json(&geometry, false),
            Err(Error::UnsupportedDimensionality {
                kind: GeometryKind::LineString
            })
        ));
    }

    #[test]
    fn degenerate_line_strings() {
        let short = LineString(vec![Coordinate::new(1., 1.)]);
        let geometry = Geometry::MultiLineString(MultiLineString(vec![
            short.clone(),
            ring(&[(0., 0.), (1., 1.)]),
        ]));

        assert!(matches!(
            to_json(&geometry, false),
            Err(Error::InvalidGeometry { .. })
        ));
        assert_eq!(
            to_json(&geometry, true).unwrap(),
            r#"{"type":"MultiLineString","coordinates":[[],[[0.0,0.0],[1.0,1.0]]]}"#
        );
        assert_eq!(
            to_json(&Geometry::LineString(short), true).unwrap(),
            r#"{"type":"LineString","coordinates":[]}"#
        );
    }

    #[test]
    fn emits_balanced_tokens() {
        let mut tokens: Vec<Token> = vec![];
        let settings: Settings = Settings::default();
        let geometry = Geometry::Point(Coordinate::new(1., 2.));
        Serializer::new(&mut tokens, &settings).geometry(&geometry).unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::StartObject,
                Token::PropertyName("type".into()),
                Token::String("Point".into()),
                Token::PropertyName("coordinates".into()),
                Token::StartArray,
                Token::Float(1.),
                Token::Float(2.),
                Token::EndArray,
                Token::EndObject,
            ]
        );
    }
}
