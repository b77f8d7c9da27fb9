use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use log::warn;

use crate::error::LoadError;
use crate::reg_lin::Sample;

fn parse_record(record: &csv::StringRecord) -> Option<Sample> {
    match record.iter().collect::<Vec<_>>().as_slice() {
        [x, y] => Some(Sample::new(x.parse().ok()?, y.parse().ok()?)),
        _ => None,
    }
}

/// Reads `x,y` lines, keeping input order. Lines that are not exactly two
/// comma separated floats are logged and skipped.
pub fn parse_samples<R: Read>(reader: R) -> Result<Vec<Sample>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut samples = Vec::new();

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => {
                warn!("Discarding data point: {}", err);
                continue;
            }
        };

        match parse_record(&record) {
            Some(sample) => samples.push(sample),
            None => {
                let line = record.position().map_or(0, |p| p.line());
                let raw = record.iter().collect::<Vec<_>>().join(",");
                warn!("Discarding data point on line {line}: {raw:?}");
            }
        }
    }

    Ok(samples)
}

pub fn read_samples(path: impl AsRef<Path>) -> Result<Vec<Sample>, LoadError> {
    let path = path.as_ref();

    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    parse_samples(file)
}

pub fn write_samples<W: Write>(writer: W, samples: &[Sample]) -> Result<(), LoadError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    for sample in samples {
        writer.write_record([sample.x.to_string(), sample.y.to_string()])?;
    }

    writer.flush()?;

    Ok(())
}
