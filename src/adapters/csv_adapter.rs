//! CSV file price loader.
//!
//! Only the price column is decoded; other columns may hold arbitrary bytes.

use crate::domain::error::CrossoverError;
use crate::ports::price_port::PriceSource;
use std::io;
use std::path::PathBuf;

pub struct CsvPriceLoader {
    path: PathBuf,
}

impl CsvPriceLoader {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl PriceSource for CsvPriceLoader {
    fn load_prices(&self, column: &str) -> Result<Vec<f64>, CrossoverError> {
        let rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| match e.into_kind() {
                csv::ErrorKind::Io(source) => CrossoverError::Open {
                    path: self.path.clone(),
                    source,
                },
                other => CrossoverError::DataFormat {
                    reason: format!("CSV parse error: {other:?}"),
                },
            })?;
        read_records(rdr, column)
    }
}

/// Parse the `column` values of headed CSV text into prices, in row order.
/// Other columns are ignored.
pub fn read_prices<R: io::Read>(reader: R, column: &str) -> Result<Vec<f64>, CrossoverError> {
    let rdr = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    read_records(rdr, column)
}

fn read_records<R: io::Read>(
    mut rdr: csv::Reader<R>,
    column: &str,
) -> Result<Vec<f64>, CrossoverError> {
    let headers = rdr.byte_headers().map_err(csv_error)?;
    let index = headers
        .iter()
        .position(|h| h == column.as_bytes())
        .ok_or_else(|| CrossoverError::DataFormat {
            reason: format!("missing column {column:?} in header"),
        })?;

    let mut prices = Vec::new();
    let mut record = csv::ByteRecord::new();
    let mut row = 0;
    while rdr.read_byte_record(&mut record).map_err(csv_error)? {
        row += 1;
        let cell = record.get(index).ok_or_else(|| CrossoverError::DataFormat {
            reason: format!("data row {row} has no {column:?} value"),
        })?;
        prices.push(parse_price(row, cell)?);
    }

    Ok(prices)
}

/// Prices must be finite and strictly positive.
fn parse_price(row: usize, cell: &[u8]) -> Result<f64, CrossoverError> {
    std::str::from_utf8(cell)
        .ok()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|p| p.is_finite() && *p > 0.0)
        .ok_or_else(|| CrossoverError::Parse {
            row,
            value: String::from_utf8_lossy(cell).into_owned(),
        })
}

fn csv_error(err: csv::Error) -> CrossoverError {
    if err.is_io_error() {
        match err.into_kind() {
            csv::ErrorKind::Io(e) => CrossoverError::Io(e),
            other => CrossoverError::DataFormat {
                reason: format!("CSV parse error: {other:?}"),
            },
        }
    } else {
        CrossoverError::DataFormat {
            reason: format!("CSV parse error: {err}"),
        }
    }
}
