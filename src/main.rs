use geojson_codec::output::Output;
use geojson_codec::{parse_document, to_writer, JsonTokenReader, Settings};
use std::env;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;
use structopt::StructOpt;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(StructOpt, Debug)]
#[structopt(name = "geojson_codec", about = "Decodes a GeoJSON document and writes it back")]
struct Opt {
    /// GeoJSON input, stdin if omitted
    #[structopt(parse(from_os_str))]
    input: Option<PathBuf>,

    /// Drop degenerate shapes instead of failing
    #[structopt(short, long)]
    skip_invalid_geometry: bool,

    /// Write one feature per line
    #[structopt(short, long)]
    lines: bool,

    /// Keep date-like strings as plain strings
    #[structopt(long)]
    no_dates: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let directives = env::var("RUST_LOG").unwrap_or_else(|_| "warn,geojson_codec=info".into());
    let env_filter = EnvFilter::builder().parse_lossy(directives);
    FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let opt = Opt::from_args();
    let input: Box<dyn Read> = match &opt.input {
        Some(path) => Box::new(File::open(path)?),
        None => Box::new(io::stdin()),
    };
    let reader = JsonTokenReader::from_reader(BufReader::new(input))?.parse_dates(!opt.no_dates);

    let settings: Settings = Settings::default().skip_invalid_geometry(opt.skip_invalid_geometry);
    let document = parse_document(reader, &settings)?;
    info!(kind = document.kind().name(), "read document");

    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    if opt.lines {
        let collection = document.into_feature_collection();
        collection.write_json_lines(&mut writer, &settings)?;
    } else {
        let writer = to_writer(&document, &mut writer, &settings)?;
        writeln!(writer)?;
    }
    writer.flush()?;
    Ok(())
}
