use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::debug;
pub mod chart;
pub mod convert;
pub mod error;
pub mod render;

pub use chart::LineChart;
pub use convert::convert;
pub use error::{ConvertError, ErrorKind};

pub const ELAPSED_COLUMN: &str = "Elapsed time (s)";
pub const RATE_COLUMN: &str = "Requests per second";

/// The main struct for the requests-per-second time series.
/// Rows keep the input order; missing values are NAN.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeRate {
    pub elapsed: Vec<f64>,
    pub rate: Vec<f64>,
}

impl TimeRate {
    pub fn new(capacity: usize) -> TimeRate {
        TimeRate {
            elapsed: Vec::with_capacity(capacity),
            rate: Vec::with_capacity(capacity),
        }
    }

    /// Init a TimeRate from the csv file at the given path
    pub fn from_csv<P: AsRef<Path>>(fin: P) -> Result<TimeRate, ConvertError> {
        let fin = fin.as_ref();
        let file = File::open(fin).map_err(|source| ConvertError::ReadInput {
            path: fin.to_path_buf(),
            source,
        })?;
        TimeRate::from_reader(BufReader::new(file))
    }

    /// Init a TimeRate from any csv source.
    /// The header must contain both ELAPSED_COLUMN and RATE_COLUMN, other columns are ignored.
    /// Empty cells are read as NAN, any other non-numeric cell is an error.
    pub fn from_reader<R: Read>(reader: R) -> Result<TimeRate, ConvertError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);
        let (i_elapsed, i_rate) = column_positions(rdr.headers()?)?;
        let mut timerate = TimeRate::new(1024);
        for (i, record) in rdr.records().enumerate() {
            let record = record?;
            let row = i + 1;
            timerate.elapsed.push(parse_cell(&record, i_elapsed, row, ELAPSED_COLUMN)?);
            timerate.rate.push(parse_cell(&record, i_rate, row, RATE_COLUMN)?);
        }
        debug!(rows = timerate.len(), "loaded time series");
        Ok(timerate)
    }

    pub fn len(&self) -> usize {
        self.elapsed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elapsed.is_empty()
    }

    /// (elapsed, rate) pairs in row order
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.elapsed.iter().copied().zip(self.rate.iter().copied())
    }
}

impl std::fmt::Display for TimeRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{},{}", ELAPSED_COLUMN, RATE_COLUMN)?;
        for (t, r) in self.points() {
            writeln!(f, "{},{}", t, r)?
        }
        Ok(())
    }
}

/// finds the required columns, reporting all the missing ones at once
fn column_positions(headers: &StringRecord) -> Result<(usize, usize), ConvertError> {
    let find = |name: &str| headers.iter().position(|h| h == name);
    match (find(ELAPSED_COLUMN), find(RATE_COLUMN)) {
        (Some(e), Some(r)) => Ok((e, r)),
        (e, r) => {
            let mut missing = Vec::new();
            if e.is_none() {
                missing.push(ELAPSED_COLUMN.to_string());
            }
            if r.is_none() {
                missing.push(RATE_COLUMN.to_string());
            }
            Err(ConvertError::MissingColumns(missing))
        }
    }
}

fn parse_cell(
    record: &StringRecord,
    index: usize,
    row: usize,
    column: &str,
) -> Result<f64, ConvertError> {
    let cell = record.get(index).unwrap_or_default();
    if cell.is_empty() {
        return Ok(f64::NAN);
    }
    cell.parse::<f64>().map_err(|_| ConvertError::InvalidValue {
        row,
        column: column.to_string(),
        value: cell.to_string(),
    })
}

/// min and max of the finite values, None if there are none
pub fn min_and_max(s: &[f64]) -> Option<(f64, f64)> {
    let mut finite = s.iter().copied().filter(|v| v.is_finite());
    let first = finite.next()?;
    let (mut min, mut max) = (first, first);
    for v in finite {
        if v > max {
            max = v
        }
        if v < min {
            min = v
        }
    }
    Some((min, max))
}
