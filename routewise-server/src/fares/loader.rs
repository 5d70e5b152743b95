//! CSV reader for contract fare files.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use csv::StringRecord;
use tracing::{debug, info};

use crate::graph::{FareGraph, FareRow};

use super::error::LoadError;

/// Column holding the origin airport code.
pub const ORIGIN_COLUMN: &str = "ORIGIN_AIRPORT_ABBREV";

/// Column holding the destination airport code.
pub const DESTINATION_COLUMN: &str = "DESTINATION_AIRPORT_ABBREV";

/// Optional column: first day the fare applies.
pub const EFFECTIVE_COLUMN: &str = "EFFECTIVE_DATE";

/// Optional column: last day the fare applies.
pub const EXPIRATION_COLUMN: &str = "EXPIRATION_DATE";

/// Date format used by the fare files (e.g. "10/01/2025").
const DATE_FORMAT: &str = "%m/%d/%Y";

/// Which fare column to use as the edge weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum FareClass {
    /// Unrestricted coach fare
    #[default]
    Yca,
    /// Capacity-controlled coach fare
    Ca,
    /// Business class fare
    Business,
    /// Premium contract fare
    Cp,
}

impl FareClass {
    /// Header of the column holding this fare class.
    pub fn column(self) -> &'static str {
        match self {
            FareClass::Yca => "YCA_FARE",
            FareClass::Ca => "_CA_FARE",
            FareClass::Business => "BUSINESS_FARE",
            FareClass::Cp => "_CP_FARE",
        }
    }
}

/// Configuration for reading a fare file.
#[derive(Debug, Clone, Default)]
pub struct LoaderConfig {
    /// Fare column used as the edge weight.
    pub fare_class: FareClass,

    /// Keep only fares in effect on this date.
    /// Rows without both date columns are always kept.
    pub as_of: Option<NaiveDate>,
}

impl LoaderConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(fare_class: FareClass, as_of: Option<NaiveDate>) -> Self {
        Self { fare_class, as_of }
    }
}

/// Column positions resolved from the header row.
struct Columns {
    origin: usize,
    destination: usize,
    fare: usize,
    effective: Option<usize>,
    expiration: Option<usize>,
}

impl Columns {
    fn resolve(headers: &StringRecord, config: &LoaderConfig) -> Result<Self, LoadError> {
        let position = |name: &str| headers.iter().position(|h| h == name);
        let required =
            |name: &str| position(name).ok_or_else(|| LoadError::MissingColumn(name.to_string()));

        Ok(Self {
            origin: required(ORIGIN_COLUMN)?,
            destination: required(DESTINATION_COLUMN)?,
            fare: required(config.fare_class.column())?,
            effective: position(EFFECTIVE_COLUMN),
            expiration: position(EXPIRATION_COLUMN),
        })
    }
}

fn field(record: &StringRecord, index: usize) -> Option<String> {
    record.get(index).map(str::to_string)
}

fn parse_date(
    record: &StringRecord,
    index: usize,
    column: &str,
    row: usize,
) -> Result<Option<NaiveDate>, LoadError> {
    let value = record.get(index).unwrap_or_default();
    if value.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map(Some)
        .map_err(|_| LoadError::InvalidDate {
            row,
            column: column.to_string(),
            value: value.to_string(),
        })
}

/// Check whether a row's fare is in effect on `as_of`.
fn in_effect(
    record: &StringRecord,
    columns: &Columns,
    as_of: NaiveDate,
    row: usize,
) -> Result<bool, LoadError> {
    let (Some(effective), Some(expiration)) = (columns.effective, columns.expiration) else {
        return Ok(true);
    };

    let from = parse_date(record, effective, EFFECTIVE_COLUMN, row)?;
    let until = parse_date(record, expiration, EXPIRATION_COLUMN, row)?;

    Ok(from.is_none_or(|d| d <= as_of) && until.is_none_or(|d| as_of <= d))
}

/// Read fare rows from CSV data with a header row.
///
/// Rows are returned unvalidated; validation happens when the graph is
/// built. Rows outside the `as_of` window are dropped here.
pub fn read_fare_rows<R: Read>(input: R, config: &LoaderConfig) -> Result<Vec<FareRow>, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = reader.headers()?.clone();
    let columns = Columns::resolve(&headers, config)?;

    let mut rows = Vec::new();
    let mut skipped = 0;

    for (i, result) in reader.records().enumerate() {
        let record = result?;
        let row = i + 1;

        let keep = match config.as_of {
            Some(as_of) => in_effect(&record, &columns, as_of, row)?,
            None => true,
        };
        if !keep {
            skipped += 1;
            continue;
        }

        rows.push(FareRow {
            row,
            origin: field(&record, columns.origin),
            destination: field(&record, columns.destination),
            fare: field(&record, columns.fare),
        });
    }

    debug!(
        rows = rows.len(),
        skipped,
        fare_column = config.fare_class.column(),
        "Read fare rows"
    );

    Ok(rows)
}

/// Load a fare file and build the fare graph from it.
pub fn load_graph(path: &Path, config: &LoaderConfig) -> Result<FareGraph, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let rows = read_fare_rows(file, config)?;
    let records = rows.len();
    let graph = FareGraph::from_rows(rows)?;

    info!(
        path = %path.display(),
        records,
        airports = graph.node_count(),
        edges = graph.edge_count(),
        "Loaded fare graph"
    );

    Ok(graph)
}
