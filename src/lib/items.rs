use super::attributes::Attributes;
use std::fmt;

/// A position. `z` is only set when the source document carried a third
/// ordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Coordinate { x, y, z: None }
    }

    pub fn with_z(x: f64, y: f64, z: f64) -> Self {
        Coordinate { x, y, z: Some(z) }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Coordinate::new(x, y)
    }
}

impl From<(f64, f64, f64)> for Coordinate {
    fn from((x, y, z): (f64, f64, f64)) -> Self {
        Coordinate::with_z(x, y, z)
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([x, y]: [f64; 2]) -> Self {
        Coordinate::new(x, y)
    }
}

/// An ordered list of coordinates. Decoded line strings always hold at least
/// two of them, hand-built ones may be shorter.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineString(pub Vec<Coordinate>);

impl LineString {
    pub fn coordinates(&self) -> &[Coordinate] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fewer than two coordinates.
    pub fn is_degenerate(&self) -> bool {
        self.0.len() < 2
    }
}

impl<T: Into<Coordinate>> From<Vec<T>> for LineString {
    fn from(coordinates: Vec<T>) -> Self {
        LineString(coordinates.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiLineString(pub Vec<LineString>);

/// A polygon is bounded by one exterior ring and any number of holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    exterior: LineString,
    interiors: Vec<LineString>,
}

impl Polygon {
    pub fn new(exterior: LineString, interiors: Vec<LineString>) -> Self {
        Polygon {
            exterior,
            interiors,
        }
    }

    pub fn exterior(&self) -> &LineString {
        &self.exterior
    }

    pub fn interiors(&self) -> &[LineString] {
        &self.interiors
    }

    /// All rings, exterior first.
    pub fn rings(&self) -> impl Iterator<Item = &LineString> {
        std::iter::once(&self.exterior).chain(self.interiors.iter())
    }

    pub fn into_inner(self) -> (LineString, Vec<LineString>) {
        (self.exterior, self.interiors)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiPolygon(pub Vec<Polygon>);

/// The geometry kinds this crate can read and write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryKind {
    Point,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
}

impl GeometryKind {
    pub const ALL: [GeometryKind; 5] = [
        GeometryKind::Point,
        GeometryKind::LineString,
        GeometryKind::MultiLineString,
        GeometryKind::Polygon,
        GeometryKind::MultiPolygon,
    ];

    /// Name as written in the `type` member.
    pub fn name(self) -> &'static str {
        match self {
            GeometryKind::Point => "Point",
            GeometryKind::LineString => "LineString",
            GeometryKind::MultiLineString => "MultiLineString",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPolygon => "MultiPolygon",
        }
    }

    /// Case-insensitive lookup of a `type` member value.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name().to_lowercase() == name)
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Coordinate),
    LineString(LineString),
    MultiLineString(MultiLineString),
    Polygon(Polygon),
    MultiPolygon(MultiPolygon),
}

impl Geometry {
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::LineString(_) => GeometryKind::LineString,
            Geometry::MultiLineString(_) => GeometryKind::MultiLineString,
            Geometry::Polygon(_) => GeometryKind::Polygon,
            Geometry::MultiPolygon(_) => GeometryKind::MultiPolygon,
        }
    }
}

/// Root document kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    FeatureCollection,
    Feature,
}

impl DocumentKind {
    pub fn name(self) -> &'static str {
        match self {
            DocumentKind::FeatureCollection => "FeatureCollection",
            DocumentKind::Feature => "Feature",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "featurecollection" => Some(DocumentKind::FeatureCollection),
            "feature" => Some(DocumentKind::Feature),
            _ => None,
        }
    }
}

/// Coordinate reference system descriptor. It is recorded, never interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Crs {
    Named {
        name: String,
    },
    Linked {
        href: String,
        link_type: Option<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Feature<A = Attributes> {
    pub geometry: Geometry,
    pub attributes: A,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureCollection<A = Attributes> {
    pub crs: Option<Crs>,
    pub features: Vec<Feature<A>>,
}

impl<A> FeatureCollection<A> {
    pub fn new(features: Vec<Feature<A>>) -> Self {
        FeatureCollection {
            crs: None,
            features,
        }
    }

    pub fn with_crs(mut self, crs: Crs) -> Self {
        self.crs = Some(crs);
        self
    }
}

impl<A> Default for FeatureCollection<A> {
    fn default() -> Self {
        FeatureCollection::new(vec![])
    }
}

/// Either of the two root forms a GeoJSON document can take.
#[derive(Debug, Clone, PartialEq)]
pub enum Document<A = Attributes> {
    FeatureCollection(FeatureCollection<A>),
    Feature(Feature<A>),
}

impl<A> Document<A> {
    pub fn kind(&self) -> DocumentKind {
        match self {
            Document::FeatureCollection(_) => DocumentKind::FeatureCollection,
            Document::Feature(_) => DocumentKind::Feature,
        }
    }

    /// Wraps a bare feature into a collection of one.
    pub fn into_feature_collection(self) -> FeatureCollection<A> {
        match self {
            Document::FeatureCollection(collection) => collection,
            Document::Feature(feature) => FeatureCollection::new(vec![feature]),
        }
    }
}
