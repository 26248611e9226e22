extern crate geojson_codec;

use geojson::GeoJson;
use geojson_codec::output::Output;
use geojson_codec::{
    from_reader, from_str, parse_feature_collection, read_json_lines, to_string, AttributeValue,
    AttributesTable, Crs, Document, Error, FeatureCollection, Geometry, GeometryKind,
    JsonTokenReader, LineString, Settings,
};
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek, SeekFrom};

fn get_string(cursor: &mut Cursor<Vec<u8>>) -> String {
    cursor.seek(SeekFrom::Start(0)).unwrap();
    let mut out = Vec::new();
    cursor.read_to_end(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

fn read_collection(path: &str, settings: &Settings) -> Result<FeatureCollection, Error> {
    let file = File::open(path).unwrap();
    let document = from_reader(BufReader::new(file), settings)?;
    Ok(document.into_feature_collection())
}

#[test]
fn alexanderplatz_round_trip() {
    let settings: Settings = Settings::default();
    let collection = read_collection("./tests/data/alexanderplatz.geojson", &settings).unwrap();
    assert_eq!(
        collection.crs,
        Some(Crs::Named {
            name: "urn:ogc:def:crs:EPSG::4283".into()
        })
    );
    let kinds: Vec<GeometryKind> = collection
        .features
        .iter()
        .map(|feature| feature.geometry.kind())
        .collect();
    assert_eq!(kinds, GeometryKind::ALL.to_vec());

    let document = Document::FeatureCollection(collection);
    let json = to_string(&document, &settings).unwrap();
    assert_eq!(from_str(&json, &settings).unwrap(), document);
}

#[test]
fn output_is_valid_geojson() {
    let settings: Settings = Settings::default();
    let collection = read_collection("./tests/data/alexanderplatz.geojson", &settings).unwrap();
    let mut cursor = Cursor::new(Vec::new());
    collection.write_geojson(&mut cursor, &settings).unwrap();
    let string = get_string(&mut cursor);

    let features = match string.trim().parse::<GeoJson>().unwrap() {
        GeoJson::FeatureCollection(collection) => collection.features,
        other => panic!("expected a feature collection, got {:?}", other),
    };
    assert_eq!(features.len(), 5);

    let polygon = features[3].geometry.as_ref().unwrap();
    match &polygon.value {
        geojson::Value::Polygon(rings) => {
            assert_eq!(rings.len(), 2);
            assert_eq!(rings[0][0], vec![13.4108, 52.5213]);
        }
        other => panic!("expected polygon, got {:?}", other),
    }

    let properties = features[0].properties.as_ref().unwrap();
    assert_eq!(properties["processed"], "2015-08-10T11:10:38+00:00");
    assert_eq!(properties["built"], 1891);
    assert!(properties["operator"].is_null());
}

#[test]
fn dates_are_detected() {
    let settings: Settings = Settings::default();
    let collection = read_collection("./tests/data/alexanderplatz.geojson", &settings).unwrap();
    let processed = collection.features[0].attributes.get("processed").unwrap();
    assert_eq!(processed.as_timestamp().unwrap().timestamp(), 1_439_205_038);

    let file = File::open("./tests/data/alexanderplatz.geojson").unwrap();
    let reader = JsonTokenReader::from_reader(BufReader::new(file))
        .unwrap()
        .parse_dates(false);
    let collection = parse_feature_collection(reader, &settings).unwrap();
    assert_eq!(
        collection.features[0].attributes.get("processed"),
        Some(&AttributeValue::from("2015-08-10T11:10:38-00:00"))
    );
}

#[test]
fn linked_crs() {
    let settings: Settings = Settings::default();
    let collection = read_collection("./tests/data/linked_crs.geojson", &settings).unwrap();
    assert_eq!(
        collection.crs,
        Some(Crs::Linked {
            href: "http://example.com/crs/42".into(),
            link_type: Some("proj4".into()),
        })
    );

    let json = to_string(&Document::FeatureCollection(collection), &settings).unwrap();
    assert!(json.contains(
        r#""crs":{"type":"link","properties":{"href":"http://example.com/crs/42","type":"proj4"}}"#
    ));
}

#[test]
fn degenerate_shapes_fail_by_default() {
    let settings: Settings = Settings::default();
    let result = read_collection("./tests/data/degenerate.geojson", &settings);
    assert!(matches!(
        result,
        Err(Error::InvalidGeometry {
            kind: GeometryKind::LineString,
            ..
        })
    ));
}

#[test]
fn degenerate_shapes_are_dropped_on_request() {
    let settings: Settings = Settings::default().skip_invalid_geometry(true);
    let collection = read_collection("./tests/data/degenerate.geojson", &settings).unwrap();
    assert_eq!(collection.features.len(), 3);

    let first = &collection.features[0];
    assert_eq!(
        first.attributes.get("name").and_then(AttributeValue::as_str),
        Some("partly broken")
    );
    match &first.geometry {
        Geometry::MultiLineString(multi) => assert_eq!(multi.0.len(), 1),
        other => panic!("expected multi line string, got {:?}", other),
    }
    match &collection.features[1].geometry {
        Geometry::Polygon(polygon) => assert!(polygon.interiors().is_empty()),
        other => panic!("expected polygon, got {:?}", other),
    }
    match &collection.features[2].geometry {
        Geometry::Polygon(polygon) => {
            let expected: LineString = vec![(1., 1.), (2., 1.), (2., 2.), (1., 1.)].into();
            assert_eq!(polygon.exterior(), &expected);
            assert!(polygon.interiors().is_empty());
        }
        other => panic!("expected polygon, got {:?}", other),
    }
}

#[test]
fn feature_without_surviving_geometry_fails() {
    let json = r#"{"type":"FeatureCollection","features":[{"type":"Feature","properties":{"id":7},"geometry":{"type":"LineString","coordinates":[[1,1]]}}]}"#;
    let settings: Settings = Settings::default().skip_invalid_geometry(true);
    assert!(matches!(
        from_str(json, &settings),
        Err(Error::InvalidGeometry {
            kind: GeometryKind::LineString,
            ..
        })
    ));
}

#[test]
fn json_lines() {
    let settings: Settings = Settings::default();
    let collection = read_collection("./tests/data/alexanderplatz.geojson", &settings).unwrap();
    let mut cursor = Cursor::new(Vec::new());
    collection.write_json_lines(&mut cursor, &settings).unwrap();

    let string = get_string(&mut cursor);
    let lines: Vec<&str> = string.trim().split('\n').collect();
    assert_eq!(lines.len(), 5);
    for line in &lines {
        assert!(matches!(line.parse::<GeoJson>(), Ok(GeoJson::Feature(_))));
    }
    assert!(lines[1].contains("Rosa-Luxemburg-Straße"));

    let features = read_json_lines(string.as_bytes(), &settings).unwrap();
    assert_eq!(features, collection.features);
}

#[test]
fn geometry_collection_is_not_a_document() {
    let settings: Settings = Settings::default();
    let result = from_str(r#"{"type":"GeometryCollection","geometries":[]}"#, &settings);
    assert!(matches!(result, Err(Error::UnknownDocumentType { .. })));
}
