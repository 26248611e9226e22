//! Conversions between the document model and `geo-types`, so decoded shapes
//! can be handed to the algorithms of the `geo` ecosystem.
//!
//! `geo-types` is two dimensional, a `z` ordinate is dropped on the way there.
//! Polygon rings are closed by `geo_types::Polygon::new` if they weren't
//! already.

use super::error::Error;
use super::items::{Coordinate, Geometry, LineString, MultiLineString, MultiPolygon, Polygon};
use std::convert::TryFrom;

impl From<Coordinate> for geo_types::Coordinate<f64> {
    fn from(coordinate: Coordinate) -> Self {
        geo_types::Coordinate {
            x: coordinate.x,
            y: coordinate.y,
        }
    }
}

impl From<geo_types::Coordinate<f64>> for Coordinate {
    fn from(coordinate: geo_types::Coordinate<f64>) -> Self {
        Coordinate::new(coordinate.x, coordinate.y)
    }
}

impl From<&LineString> for geo_types::LineString<f64> {
    fn from(line_string: &LineString) -> Self {
        line_string
            .coordinates()
            .iter()
            .map(|&c| geo_types::Coordinate::from(c))
            .collect()
    }
}

impl From<geo_types::LineString<f64>> for LineString {
    fn from(line_string: geo_types::LineString<f64>) -> Self {
        LineString(line_string.0.into_iter().map(Coordinate::from).collect())
    }
}

impl From<&Polygon> for geo_types::Polygon<f64> {
    fn from(polygon: &Polygon) -> Self {
        let interiors: Vec<geo_types::LineString<f64>> =
            polygon.interiors().iter().map(Into::into).collect();
        geo_types::Polygon::new(polygon.exterior().into(), interiors)
    }
}

impl From<geo_types::Polygon<f64>> for Polygon {
    fn from(polygon: geo_types::Polygon<f64>) -> Self {
        let (exterior, interiors) = polygon.into_inner();
        Polygon::new(
            exterior.into(),
            interiors.into_iter().map(LineString::from).collect(),
        )
    }
}

impl From<&Geometry> for geo_types::Geometry<f64> {
    fn from(geometry: &Geometry) -> Self {
        match geometry {
            Geometry::Point(coordinate) => {
                geo_types::Geometry::Point(geo_types::Point((*coordinate).into()))
            }
            Geometry::LineString(line_string) => {
                geo_types::Geometry::LineString(line_string.into())
            }
            Geometry::MultiLineString(MultiLineString(line_strings)) => {
                let line_strings: Vec<geo_types::LineString<f64>> =
                    line_strings.iter().map(Into::into).collect();
                geo_types::Geometry::MultiLineString(geo_types::MultiLineString(line_strings))
            }
            Geometry::Polygon(polygon) => geo_types::Geometry::Polygon(polygon.into()),
            Geometry::MultiPolygon(MultiPolygon(polygons)) => {
                let polygons: Vec<geo_types::Polygon<f64>> =
                    polygons.iter().map(Into::into).collect();
                geo_types::Geometry::MultiPolygon(geo_types::MultiPolygon(polygons))
            }
        }
    }
}

impl TryFrom<geo_types::Geometry<f64>> for Geometry {
    type Error = Error;

    fn try_from(geometry: geo_types::Geometry<f64>) -> Result<Self, Self::Error> {
        use geo_types::Geometry as Geo;

        let geometry = match geometry {
            Geo::Point(point) => Geometry::Point(point.0.into()),
            Geo::LineString(line_string) => Geometry::LineString(line_string.into()),
            Geo::MultiLineString(multi) => Geometry::MultiLineString(MultiLineString(
                multi.0.into_iter().map(LineString::from).collect(),
            )),
            Geo::Polygon(polygon) => Geometry::Polygon(polygon.into()),
            Geo::MultiPolygon(multi) => Geometry::MultiPolygon(MultiPolygon(
                multi.0.into_iter().map(Polygon::from).collect(),
            )),
            Geo::Line(_) => return Err(Error::UnsupportedGeometry("Line")),
            Geo::MultiPoint(_) => return Err(Error::UnsupportedGeometry("MultiPoint")),
            Geo::GeometryCollection(_) => {
                return Err(Error::UnsupportedGeometry("GeometryCollection"))
            }
            _ => return Err(Error::UnsupportedGeometry("Rect and Triangle")),
        };
        Ok(geometry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::*;

    #[test]
    fn drops_z_on_the_way_out() {
        let geometry = Geometry::Point(Coordinate::with_z(13.4132, 52.5219, 34.));
        match geo_types::Geometry::from(&geometry) {
            geo_types::Geometry::Point(point) => {
                assert_relative_eq!(point.x(), 13.4132, epsilon = f64::EPSILON);
                assert_relative_eq!(point.y(), 52.5219, epsilon = f64::EPSILON);
            }
            other => panic!("expected point, got {:?}", other),
        }
    }

    #[test]
    fn polygon_round_trip() {
        let exterior: LineString = vec![(0., 0.), (4., 0.), (4., 4.), (0., 0.)].into();
        let hole: LineString = vec![(1., 1.), (2., 1.), (2., 2.), (1., 1.)].into();
        let polygon = Geometry::Polygon(Polygon::new(exterior, vec![hole]));

        let geo = geo_types::Geometry::from(&polygon);
        assert_eq!(Geometry::try_from(geo).unwrap(), polygon);
    }

    #[test]
    fn multi_geometries_round_trip() {
        let line: LineString = vec![(9., 50.), (9., 51.), (10., 51.)].into();
        let multi_line = Geometry::MultiLineString(MultiLineString(vec![line.clone()]));
        let geo = geo_types::Geometry::from(&multi_line);
        assert_eq!(Geometry::try_from(geo).unwrap(), multi_line);

        let ring: LineString = vec![(0., 0.), (1., 0.), (1., 1.), (0., 0.)].into();
        let multi_polygon = Geometry::MultiPolygon(MultiPolygon(vec![Polygon::new(ring, vec![])]));
        let geo = geo_types::Geometry::from(&multi_polygon);
        assert_eq!(Geometry::try_from(geo).unwrap(), multi_polygon);
    }

    #[test]
    fn rejects_unsupported_kinds() {
        let multi_point: geo_types::MultiPoint<f64> = vec![(1., 2.), (3., 4.)].into();
        let result = Geometry::try_from(geo_types::Geometry::MultiPoint(multi_point));
        assert!(matches!(result, Err(Error::UnsupportedGeometry("MultiPoint"))));
    }
}
