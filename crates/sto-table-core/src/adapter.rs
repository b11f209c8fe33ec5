//! Element-specialised STO readers and writers.
//!
//! [`StoFileAdapter<T>`] reads and writes tables whose cells hold `T`. The
//! factories hand adapters out as `Box<dyn DataAdapter>`, so callers that
//! resolved the element type at runtime can drive them without knowing `T`.
//!
//! Layout written by the adapters:
//!
//! ```text
//! version=3
//! DataType=Vec3
//! nRows=2
//! nColumns=3
//! <table metadata key=value lines>
//! endheader
//! time    marker1         marker2
//! 0.0     ~[1.0,2.0,3.0]  ~[4.0,5.0,6.0]
//! ```
//!
//! The body is tab-delimited. A header without a `DataType` key is the
//! legacy (pre-versioning) layout, which only ever stored `double` cells.

use std::collections::BTreeMap;
use std::fmt;
use std::io::{BufRead, Write};
use std::marker::PhantomData;
use std::sync::Arc;

use snafu::{OptionExt, ResultExt, ensure};

use crate::{
    element::{ElementType, StoElement},
    header::{self, Header, NumberedLines, TypeTag, declares_data_type},
    table::{AbstractTable, TableMetadata, TimeSeriesTable},
};

pub mod error;

pub use error::{AdapterError, AdapterResult};

use error::{
    DataTypeMismatchSnafu, HeaderCountMismatchSnafu, InvalidCellSnafu, InvalidColumnLabelSnafu,
    InvalidHeaderValueSnafu, InvalidMetadataEntrySnafu, InvalidTimeSnafu,
    MissingColumnLabelsSnafu, MissingTableSnafu, ReadBodySnafu, RowWidthSnafu, TableSnafu,
    TableTypeMismatchSnafu, WriteSnafu,
};

/// Format version written to the `version` header key.
pub const STO_VERSION: u32 = 3;

/// Cell delimiter of the label line and data lines.
pub const DELIMITER: char = '\t';

/// Label written for the time column.
pub const TIME_LABEL: &str = "time";

/// Key of the table the writer serialises.
pub const TABLE_KEY: &str = "table";

const VERSION_KEY: &str = "version";
const ROWS_KEY: &str = "nRows";
const COLUMNS_KEY: &str = "nColumns";

/// Named, type-erased tables handed to a writer. Must contain [`TABLE_KEY`].
pub type InputTables<'a> = BTreeMap<String, &'a dyn AbstractTable>;

/// Named tables produced by a reader. Contains exactly [`TABLE_KEY`].
pub type OutputTables = BTreeMap<String, Arc<dyn AbstractTable>>;

/// A reader/writer for one element type, usable without knowing that type.
pub trait DataAdapter: fmt::Debug + Send + Sync {
    /// Element type this adapter reads and writes.
    fn element_type(&self) -> ElementType;

    /// Parse a complete STO file.
    ///
    /// `reader` must be positioned at the very start of the file: a stream
    /// that was already used to sniff the header must be reset or reopened.
    fn read(&self, reader: &mut dyn BufRead) -> AdapterResult<OutputTables>;

    /// Write the table keyed [`TABLE_KEY`] to `out`.
    fn write(&self, tables: &InputTables<'_>, out: &mut dyn Write) -> AdapterResult<()>;
}

/// Fetch the table keyed [`TABLE_KEY`].
pub(crate) fn table_entry<'a>(tables: &InputTables<'a>) -> AdapterResult<&'a dyn AbstractTable> {
    tables.get(TABLE_KEY).copied().context(MissingTableSnafu)
}

/// STO reader/writer for tables of `T`.
pub struct StoFileAdapter<T> {
    _element: PhantomData<fn() -> T>,
}

impl<T: StoElement> StoFileAdapter<T> {
    /// Create an adapter. Adapters hold no state.
    pub const fn new() -> Self {
        Self {
            _element: PhantomData,
        }
    }

    /// Parse a complete STO file into a typed table.
    pub fn read_table<R: BufRead + ?Sized>(
        &self,
        reader: &mut R,
    ) -> AdapterResult<TimeSeriesTable<T>> {
        let mut lines = NumberedLines::new(reader);
        let header = header::read_header(&mut lines)?;
        check_declared_type::<T>(&header.type_tag)?;
        let declared_rows = declared_count(&header, ROWS_KEY)?;
        let declared_columns = declared_count(&header, COLUMNS_KEY)?;

        let labels = loop {
            match lines.next_line().context(ReadBodySnafu)? {
                None => return MissingColumnLabelsSnafu.fail(),
                Some((_, line)) if line.trim().is_empty() => continue,
                Some((_, line)) => {
                    break line
                        .split(DELIMITER)
                        .skip(1)
                        .map(str::to_string)
                        .collect::<Vec<_>>();
                }
            }
        };
        if let Some(declared) = declared_columns {
            ensure!(
                declared == labels.len() + 1,
                HeaderCountMismatchSnafu {
                    key: COLUMNS_KEY,
                    declared,
                    actual: labels.len() + 1,
                }
            );
        }

        let mut table = TimeSeriesTable::<T>::new(labels);
        *table.metadata_mut() = user_metadata(&header);

        while let Some((line_no, line)) = lines.next_line().context(ReadBodySnafu)? {
            if line.trim().is_empty() {
                continue;
            }
            let (time, row) = parse_row::<T>(line_no, &line, table.column_labels())?;
            table
                .append_row(time, row)
                .context(TableSnafu { line: line_no })?;
        }

        if let Some(declared) = declared_rows {
            ensure!(
                declared == table.num_rows(),
                HeaderCountMismatchSnafu {
                    key: ROWS_KEY,
                    declared,
                    actual: table.num_rows(),
                }
            );
        }
        Ok(table)
    }

    /// Write a typed table as a complete STO file.
    pub fn write_table<W: Write + ?Sized>(
        &self,
        table: &TimeSeriesTable<T>,
        out: &mut W,
    ) -> AdapterResult<()> {
        for (key, value) in table.metadata().iter() {
            ensure!(
                is_reserved_key(key) || writable_metadata(key, value),
                InvalidMetadataEntrySnafu { key }
            );
        }
        for label in table.column_labels() {
            ensure!(writable_label(label), InvalidColumnLabelSnafu { label });
        }

        writeln!(out, "{VERSION_KEY}={STO_VERSION}").context(WriteSnafu)?;
        writeln!(out, "{}={}", header::DATA_TYPE_KEY, T::STO_TYPE).context(WriteSnafu)?;
        writeln!(out, "{ROWS_KEY}={}", table.num_rows()).context(WriteSnafu)?;
        writeln!(out, "{COLUMNS_KEY}={}", table.num_columns() + 1).context(WriteSnafu)?;
        for (key, value) in table.metadata().iter() {
            if !is_reserved_key(key) {
                writeln!(out, "{key}={value}").context(WriteSnafu)?;
            }
        }
        writeln!(out, "{}", header::END_HEADER).context(WriteSnafu)?;

        let mut line = String::from(TIME_LABEL);
        for label in table.column_labels() {
            line.push(DELIMITER);
            line.push_str(label);
        }
        line.push('\n');
        out.write_all(line.as_bytes()).context(WriteSnafu)?;

        for (time, row) in table.times().iter().zip(table.rows()) {
            line.clear();
            time.format_cell(&mut line);
            for value in row {
                line.push(DELIMITER);
                value.format_cell(&mut line);
            }
            line.push('\n');
            out.write_all(line.as_bytes()).context(WriteSnafu)?;
        }
        out.flush().context(WriteSnafu)
    }
}

impl<T: StoElement> Default for StoFileAdapter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: StoElement> fmt::Debug for StoFileAdapter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoFileAdapter")
            .field("element_type", &T::STO_TYPE)
            .finish()
    }
}

impl<T: StoElement> DataAdapter for StoFileAdapter<T> {
    fn element_type(&self) -> ElementType {
        T::STO_TYPE
    }

    fn read(&self, reader: &mut dyn BufRead) -> AdapterResult<OutputTables> {
        let table = self.read_table(reader)?;
        let mut tables = OutputTables::new();
        tables.insert(TABLE_KEY.to_string(), Arc::new(table));
        Ok(tables)
    }

    fn write(&self, tables: &InputTables<'_>, out: &mut dyn Write) -> AdapterResult<()> {
        let erased = table_entry(tables)?;
        let table = erased.downcast_ref::<T>().context(TableTypeMismatchSnafu {
            expected: T::STO_TYPE,
            actual: erased.element_type(),
        })?;
        self.write_table(table, out)
    }
}

fn check_declared_type<T: StoElement>(tag: &TypeTag) -> AdapterResult<()> {
    let matches = match tag {
        TypeTag::Declared(name) => name == T::STO_TYPE.name(),
        TypeTag::Absent => T::STO_TYPE == ElementType::LEGACY_DEFAULT,
    };
    ensure!(
        matches,
        DataTypeMismatchSnafu {
            expected: T::STO_TYPE,
            found: tag.to_string(),
        }
    );
    Ok(())
}

fn declared_count(header: &Header, key: &str) -> AdapterResult<Option<usize>> {
    header
        .get(key)
        .map(|value| {
            value
                .trim()
                .parse()
                .ok()
                .context(InvalidHeaderValueSnafu { key, value })
        })
        .transpose()
}

fn is_reserved_key(key: &str) -> bool {
    key == VERSION_KEY || key == ROWS_KEY || key == COLUMNS_KEY || declares_data_type(key)
}

fn user_metadata(header: &Header) -> TableMetadata {
    let mut metadata = TableMetadata::new();
    for (key, value) in &header.entries {
        if !is_reserved_key(key) {
            metadata.insert(key.as_str(), value.as_str());
        }
    }
    metadata
}

/// Whether `key=value` reads back as the same pair.
fn writable_metadata(key: &str, value: &str) -> bool {
    let single_line = |s: &str| !s.contains(['\n', '\r']);
    !key.is_empty()
        && !value.is_empty()
        && !value.contains('=')
        && single_line(key)
        && single_line(value)
        && !key.contains(header::END_HEADER)
        && !value.contains(header::END_HEADER)
}

/// Whether `label` survives the tab-delimited label line.
fn writable_label(label: &str) -> bool {
    !label.contains([DELIMITER, '\n', '\r'])
}

fn parse_row<T: StoElement>(
    line_no: usize,
    line: &str,
    labels: &[String],
) -> AdapterResult<(f64, Vec<T>)> {
    let mut fields = line.split(DELIMITER);
    let time_text = fields.next().unwrap_or_default();
    let time = f64::parse_cell(time_text).context(InvalidTimeSnafu {
        line: line_no,
        text: time_text,
    })?;

    let cells: Vec<&str> = fields.collect();
    ensure!(
        cells.len() == labels.len(),
        RowWidthSnafu {
            line: line_no,
            expected: labels.len(),
            actual: cells.len(),
        }
    );

    let row = cells
        .iter()
        .zip(labels)
        .map(|(text, label)| {
            T::parse_cell(text).context(InvalidCellSnafu {
                line: line_no,
                column: label.as_str(),
                text: *text,
                element_type: T::STO_TYPE,
            })
        })
        .collect::<AdapterResult<Vec<T>>>()?;
    Ok((time, row))
}
