//! In-memory time-series tables.
//!
//! A [`TimeSeriesTable<T>`] holds an independent `time` column plus any
//! number of labelled data columns whose cells all share one element type
//! `T`. The element type is fixed by the Rust type and can never change after
//! construction.
//!
//! [`AbstractTable`] is the type-erased view used wherever a table's element
//! type is not known statically (for example the writer factory). It reports
//! the element type as a stored discriminant, so callers never need to probe
//! by trial downcasts.

use std::any::Any;
use std::fmt;

use snafu::ensure;

use crate::element::{Element, ElementType};

pub mod error;

pub use error::{TableError, TableResult};

use error::{DecreasingTimeSnafu, RowWidthMismatchSnafu};

/// Ordered `key=value` metadata attached to a table.
///
/// Insertion order is preserved so that a table written to disk lists its
/// metadata in the order it was set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableMetadata {
    entries: Vec<(String, String)>,
}

impl TableMetadata {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or update a key/value pair.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some((_, v)) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            *v = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Value stored for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A time-indexed table whose data cells all hold `T`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesTable<T> {
    metadata: TableMetadata,
    column_labels: Vec<String>,
    times: Vec<f64>,
    rows: Vec<Vec<T>>,
}

impl<T: Element> TimeSeriesTable<T> {
    /// Create an empty table with the given data column labels.
    ///
    /// The time column is implicit and not part of `labels`.
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            metadata: TableMetadata::new(),
            column_labels: labels.into_iter().map(Into::into).collect(),
            times: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// Append one row.
    ///
    /// The row must have one value per data column, and `time` must not be
    /// earlier than the previous row's time (equal times are allowed).
    pub fn append_row(&mut self, time: f64, row: Vec<T>) -> TableResult<()> {
        ensure!(
            row.len() == self.column_labels.len(),
            RowWidthMismatchSnafu {
                expected: self.column_labels.len(),
                actual: row.len(),
            }
        );
        if let Some(&previous) = self.times.last() {
            ensure!(time >= previous, DecreasingTimeSnafu { previous, time });
        }
        self.times.push(time);
        self.rows.push(row);
        Ok(())
    }

    /// Labels of the data columns, excluding time.
    pub fn column_labels(&self) -> &[String] {
        &self.column_labels
    }

    /// The independent time column.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// All rows, in time order.
    pub fn rows(&self) -> &[Vec<T>] {
        &self.rows
    }

    /// Row `index`, if present.
    pub fn row(&self, index: usize) -> Option<&[T]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    /// Values of the column labelled `label`, top to bottom.
    pub fn column(&self, label: &str) -> Option<Vec<&T>> {
        let index = self.column_labels.iter().position(|l| l == label)?;
        Some(self.rows.iter().map(|row| &row[index]).collect())
    }

    /// Number of rows.
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of data columns, excluding time.
    pub fn num_columns(&self) -> usize {
        self.column_labels.len()
    }

    /// Table metadata.
    pub fn metadata(&self) -> &TableMetadata {
        &self.metadata
    }

    /// Mutable table metadata.
    pub fn metadata_mut(&mut self) -> &mut TableMetadata {
        &mut self.metadata
    }
}

/// Type-erased view of a [`TimeSeriesTable`].
pub trait AbstractTable: fmt::Debug + Send + Sync {
    /// The element type of the data columns, or `None` when the table holds
    /// a type the STO registry does not know.
    fn element_type(&self) -> Option<ElementType>;

    /// Labels of the data columns, excluding time.
    fn column_labels(&self) -> &[String];

    /// Number of rows.
    fn num_rows(&self) -> usize;

    /// Table metadata.
    fn metadata(&self) -> &TableMetadata;

    /// Access to the concrete table for downcasting.
    fn as_any(&self) -> &dyn Any;
}

impl<T: Element> AbstractTable for TimeSeriesTable<T> {
    fn element_type(&self) -> Option<ElementType> {
        T::ELEMENT_TYPE
    }

    fn column_labels(&self) -> &[String] {
        &self.column_labels
    }

    fn num_rows(&self) -> usize {
        self.rows.len()
    }

    fn metadata(&self) -> &TableMetadata {
        &self.metadata
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl<'a> dyn AbstractTable + 'a {
    /// Recover the concrete table when it holds elements of type `T`.
    pub fn downcast_ref<T: Element>(&self) -> Option<&TimeSeriesTable<T>> {
        self.as_any().downcast_ref()
    }
}
