use super::attributes::AttributesTable;
use super::error::{Error, Result};
use super::items::{Feature, FeatureCollection};
use super::json::{JsonTokenReader, JsonTokenWriter};
use super::parse::parse_feature;
use super::serialize::{serialize_feature, serialize_feature_collection};
use super::settings::Settings;
use std::io::{BufRead, Write};
use tracing::debug;

pub trait Output {
    /// One GeoJSON document, terminated by a newline.
    fn write_geojson<B>(&self, writer: &mut dyn Write, settings: &Settings<B>) -> Result<()>;
    /// One `Feature` document per line.
    fn write_json_lines<B>(&self, writer: &mut dyn Write, settings: &Settings<B>) -> Result<()>;
}

impl<A: AttributesTable> Output for FeatureCollection<A> {
    fn write_geojson<B>(&self, writer: &mut dyn Write, settings: &Settings<B>) -> Result<()> {
        let mut sink = JsonTokenWriter::new(&mut *writer);
        serialize_feature_collection(self, &mut sink, settings)?;
        sink.finish()?;
        writeln!(writer)?;
        Ok(())
    }

    fn write_json_lines<B>(&self, writer: &mut dyn Write, settings: &Settings<B>) -> Result<()> {
        for feature in self.features.iter() {
            let mut sink = JsonTokenWriter::new(&mut *writer);
            serialize_feature(feature, &mut sink, settings)?;
            sink.finish()?;
            writeln!(writer)?;
        }
        Ok(())
    }
}

/// Reads newline-delimited `Feature` documents.
///
/// Blank lines are skipped. Failures carry the 1-based line number.
pub fn read_json_lines<A: AttributesTable>(
    reader: impl BufRead,
    settings: &Settings<A>,
) -> Result<Vec<Feature<A>>> {
    let mut features = vec![];
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let feature = read_line(&line, settings).map_err(|source| Error::Line {
            line: index + 1,
            source: Box::new(source),
        })?;
        features.push(feature);
    }
    debug!(features = features.len(), "read json lines");
    Ok(features)
}

fn read_line<A: AttributesTable>(line: &str, settings: &Settings<A>) -> Result<Feature<A>> {
    let reader: JsonTokenReader = line.parse()?;
    parse_feature(reader, settings)
}
