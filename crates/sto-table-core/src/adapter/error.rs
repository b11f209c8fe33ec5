//! Error types and SNAFU context selectors for type resolution and the STO
//! adapters.
//!
//! Everything the factories, the header scanner, the adapters and the file
//! API can fail with lives in [`AdapterError`], so a caller matching on one
//! enum sees every way a read or write can go wrong. Keep new variants here
//! to keep messages consistent.

use std::io;

use snafu::prelude::*;

use crate::{element::ElementType, storage::StorageError, table::TableError};

/// Errors from resolving, reading or writing an STO table.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum AdapterError {
    /// A declared data type has no registry entry, or a table's element
    /// type cannot be represented (`tag` is then `<unknown>`).
    #[snafu(display("Data type {tag} is not supported by the STO format"))]
    UnsupportedDataType {
        /// The offending type name, verbatim.
        tag: String,
    },

    /// The writer's input collection has no entry keyed `"table"`.
    #[snafu(display("Input tables have no entry named \"table\""))]
    MissingTable,

    /// Reading a header line failed.
    #[snafu(display("Failed to read STO header: {source}"))]
    ReadHeader {
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Reading a line after the header failed.
    #[snafu(display("Failed to read STO data: {source}"))]
    ReadBody {
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Writing the encoded table failed.
    #[snafu(display("Failed to write STO table: {source}"))]
    Write {
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The stream ended before an `endheader` line.
    #[snafu(display("STO header is not terminated by an \"endheader\" line"))]
    MissingEndHeader,

    /// Nothing follows the header.
    #[snafu(display("STO file has no column label line after the header"))]
    MissingColumnLabels,

    /// The header declares a different element type than the adapter reads.
    #[snafu(display("File declares data type {found}, but this adapter reads {expected}"))]
    DataTypeMismatch {
        /// Element type of the adapter.
        expected: ElementType,
        /// Declared value (or `<absent>`).
        found: String,
    },

    /// A reserved count key does not hold a non-negative integer.
    #[snafu(display("Header value {key}={value} is not a valid count"))]
    InvalidHeaderValue {
        /// Header key.
        key: String,
        /// Raw header value.
        value: String,
    },

    /// A count declared in the header disagrees with the body.
    #[snafu(display("Header declares {key}={declared}, but the file has {actual}"))]
    HeaderCountMismatch {
        /// Header key (`nRows` or `nColumns`).
        key: String,
        /// Value declared in the header.
        declared: usize,
        /// Value observed in the body.
        actual: usize,
    },

    /// A data line has the wrong number of cells.
    #[snafu(display("Line {line}: expected {expected} data cells, found {actual}"))]
    RowWidth {
        /// 1-based line number.
        line: usize,
        /// Number of data columns.
        expected: usize,
        /// Number of cells on the line.
        actual: usize,
    },

    /// The time value of a data line does not parse.
    #[snafu(display("Line {line}: invalid time value {text:?}"))]
    InvalidTime {
        /// 1-based line number.
        line: usize,
        /// Raw time text.
        text: String,
    },

    /// A data cell does not parse as the adapter's element type.
    #[snafu(display("Line {line}, column {column}: {text:?} is not a valid {element_type} value"))]
    InvalidCell {
        /// 1-based line number.
        line: usize,
        /// Label of the column.
        column: String,
        /// Raw cell text.
        text: String,
        /// Element type the cell was parsed as.
        element_type: ElementType,
    },

    /// A parsed row violates the table invariants.
    #[snafu(display("Line {line}: {source}"))]
    Table {
        /// 1-based line number.
        line: usize,
        /// Underlying table error.
        source: TableError,
    },

    /// The table handed to an adapter has a different element type.
    #[snafu(display(
        "Table element type {} does not match adapter element type {expected}",
        actual.map_or("<unknown>", ElementType::name)
    ))]
    TableTypeMismatch {
        /// Element type of the adapter.
        expected: ElementType,
        /// Element type reported by the table.
        actual: Option<ElementType>,
    },

    /// A metadata entry cannot be written as a header line.
    #[snafu(display("Metadata entry {key:?} cannot be written as a header line"))]
    InvalidMetadataEntry {
        /// Key of the offending entry.
        key: String,
    },

    /// A column label cannot be written on the tab-delimited label line.
    #[snafu(display("Column label {label:?} cannot be written to an STO file"))]
    InvalidColumnLabel {
        /// The offending label.
        label: String,
    },

    /// Reading or writing the file failed at the storage layer.
    #[snafu(display("Storage error: {source}"))]
    Storage {
        /// Underlying storage error.
        source: StorageError,
    },
}

/// Result alias for adapter and factory operations.
pub type AdapterResult<T> = Result<T, AdapterError>;
