//! Tab-separated spectral library tables.
//!
//! A library holds one row per fragment ion, so many rows share the same
//! (peptide, charge) precursor. Only four columns are interpreted (see
//! [`LibraryColumns`]); all other columns are kept verbatim so that a
//! filtered library can be written back with the input schema.
//!
//! Empty and NA-style numeric cells (`NaN`, `NA`, `N/A`, ...) are read as
//! missing values. The row stays in the table; it just never becomes a
//! selection candidate when its retention time or charge is missing.
//!
//! ```rust,no_run
//! use pseudo_irt::library::{LibraryColumns, SpectralLibrary, WriteOptions};
//!
//! let library = SpectralLibrary::from_path("library.tsv", &LibraryColumns::default())?;
//! println!("{} rows, {} columns", library.len(), library.headers().len());
//! library.write_tsv("copy.tsv", WriteOptions::default())?;
//! # Ok::<(), pseudo_irt::library::LibraryError>(())
//! ```

mod charge;
mod columns;
mod error;


use std::collections::{BTreeSet, HashSet};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use csv::StringRecord;

pub use charge::Charge;
pub use columns::{
    LibraryColumns, CHARGE_COLUMN, INTENSITY_COLUMN, PEPTIDE_COLUMN, RETENTION_TIME_COLUMN,
};
pub use error::LibraryError;

use columns::ColumnPositions;

/// One library row: the interpreted fields plus the raw record.
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryRow {
    /// Zero-based position of the row in the input file
    pub index: usize,

    /// Peptide identity
    pub peptide: String,

    /// Precursor charge, `None` when the cell is missing
    pub charge: Option<Charge>,

    /// Normalized retention time, `None` when the cell is missing
    pub retention_time: Option<f64>,

    /// Fragment intensity, `None` when the cell is missing
    pub intensity: Option<f64>,

    record: StringRecord,
}

impl LibraryRow {
    /// Raw cell values of this row, in header order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.record.iter()
    }

    /// Raw record as read from the file
    pub fn record(&self) -> &StringRecord {
        &self.record
    }
}

/// Options for writing a library table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOptions {
    /// Prepend an unnamed column holding each row's original position
    pub include_index: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            include_index: true,
        }
    }
}

/// In-memory spectral library
#[derive(Debug, Clone, PartialEq)]
pub struct SpectralLibrary {
    headers: StringRecord,
    columns: LibraryColumns,
    rows: Vec<LibraryRow>,
}

impl SpectralLibrary {
    /// Read a tab-separated library from a file
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        columns: &LibraryColumns,
    ) -> Result<Self, LibraryError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), columns)
    }

    /// Read a tab-separated library from any reader
    pub fn from_reader<R: Read>(reader: R, columns: &LibraryColumns) -> Result<Self, LibraryError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let positions = columns.resolve(&headers)?;

        let mut rows = Vec::new();
        for (index, record) in csv_reader.records().enumerate() {
            rows.push(parse_row(index, record?, &positions, columns)?);
        }

        Ok(Self {
            headers,
            columns: columns.clone(),
            rows,
        })
    }

    /// Header row as read from the file
    pub fn headers(&self) -> &StringRecord {
        &self.headers
    }

    /// Column names used to interpret this library
    pub fn columns(&self) -> &LibraryColumns {
        &self.columns
    }

    /// All rows in input order
    pub fn rows(&self) -> &[LibraryRow] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the library has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct peptide identities, sorted
    pub fn peptides(&self) -> BTreeSet<&str> {
        self.rows.iter().map(|r| r.peptide.as_str()).collect()
    }

    /// Number of distinct (peptide, charge) pairs, ignoring rows without a charge
    pub fn precursor_count(&self) -> usize {
        self.rows
            .iter()
            .filter_map(|r| r.charge.map(|charge| (r.peptide.as_str(), charge)))
            .collect::<HashSet<_>>()
            .len()
    }

    /// Keep only the rows whose peptide is in `peptides`.
    ///
    /// Row order and row indices are preserved.
    pub fn subset(&self, peptides: &BTreeSet<String>) -> Self {
        let rows = self
            .rows
            .iter()
            .filter(|r| peptides.contains(&r.peptide))
            .cloned()
            .collect();

        Self {
            headers: self.headers.clone(),
            columns: self.columns.clone(),
            rows,
        }
    }

    /// Write the library as a tab-separated file, returning the row count
    pub fn write_tsv<P: AsRef<Path>>(
        &self,
        path: P,
        options: WriteOptions,
    ) -> Result<usize, LibraryError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        let written = self.write_to(&mut writer, options)?;
        writer.flush()?;
        Ok(written)
    }

    /// Write the library as tab-separated text to any writer
    pub fn write_to<W: Write>(&self, writer: W, options: WriteOptions) -> Result<usize, LibraryError> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_writer(writer);

        if options.include_index {
            let mut header = StringRecord::with_capacity(0, self.headers.len() + 1);
            header.push_field("");
            header.extend(self.headers.iter());
            csv_writer.write_record(&header)?;
        } else {
            csv_writer.write_record(&self.headers)?;
        }

        for row in &self.rows {
            if options.include_index {
                let index = row.index.to_string();
                csv_writer.write_record(std::iter::once(index.as_str()).chain(row.fields()))?;
            } else {
                csv_writer.write_record(&row.record)?;
            }
        }

        csv_writer.flush()?;
        Ok(self.rows.len())
    }
}

fn parse_row(
    index: usize,
    record: StringRecord,
    positions: &ColumnPositions,
    columns: &LibraryColumns,
) -> Result<LibraryRow, LibraryError> {
    let cell = |pos: usize| record.get(pos).unwrap_or("").trim();

    let charge = parse_number(index, &columns.charge, cell(positions.charge))?.and_then(Charge::new);
    let retention_time =
        parse_number(index, &columns.retention_time, cell(positions.retention_time))?;
    let intensity = parse_number(index, &columns.intensity, cell(positions.intensity))?;

    Ok(LibraryRow {
        index,
        peptide: cell(positions.peptide).to_string(),
        charge,
        retention_time,
        intensity,
        record,
    })
}

/// Cell texts read as a missing value
const MISSING_VALUES: &[&str] = &["", "NA", "N/A", "n/a", "#N/A", "NULL", "null", "None", "<NA>"];

/// Parse a numeric cell; empty, NA-style and NaN cells are `None`.
///
/// Text that is neither a number nor a missing marker is an error.
fn parse_number(row: usize, column: &str, value: &str) -> Result<Option<f64>, LibraryError> {
    if MISSING_VALUES.contains(&value) {
        return Ok(None);
    }
    match value.parse::<f64>() {
        Ok(v) if v.is_nan() => Ok(None),
        Ok(v) => Ok(Some(v)),
        Err(_) => Err(LibraryError::InvalidValue {
            row,
            column: column.to_string(),
            value: value.to_string(),
        }),
    }
}
