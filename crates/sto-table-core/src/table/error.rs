//! Errors raised when building a [`TimeSeriesTable`](super::TimeSeriesTable).

use snafu::Snafu;

/// Violations of the table invariants.
#[derive(Debug, Snafu, Clone, PartialEq)]
#[snafu(visibility(pub(crate)))]
pub enum TableError {
    /// A row does not have one value per data column.
    #[snafu(display("Row has {actual} values but the table has {expected} data columns"))]
    RowWidthMismatch {
        /// Number of data columns in the table.
        expected: usize,
        /// Number of values in the rejected row.
        actual: usize,
    },

    /// A row's time is earlier than the previous row's time (or is NaN).
    #[snafu(display("Row time {time} is earlier than the previous row time {previous}"))]
    DecreasingTime {
        /// Time of the last accepted row.
        previous: f64,
        /// Time of the rejected row.
        time: f64,
    },
}

/// Result alias for table operations.
pub type TableResult<T> = Result<T, TableError>;
