//! Element-type resolution for STO time-series text tables.
//!
//! An STO file stores a time column plus data columns whose cells all share
//! one element type (a scalar `double` or a small fixed-size vector type). This
//! crate connects the single type-erased table abstraction to the closed
//! family of element-specialised readers and writers:
//!
//! - The fixed, ordered catalog of supported element types (`registry`,
//!   `element` modules).
//! - Header scanning that extracts the declared element type without parsing
//!   the payload (`header` module).
//! - Reader and writer factories. The reader factory maps a header tag to an
//!   adapter, with the legacy untagged layout falling back to `double`. The
//!   writer factory maps a table's stored element type to an adapter
//!   (`factory` module).
//! - The element-specialised STO adapters behind the `DataAdapter` trait
//!   object (`adapter` module), and the in-memory tables they produce
//!   (`table` module).
//! - Async, path-based read/write helpers over the local filesystem
//!   (`sto_file`, `storage` modules).
//!
//! Higher-level tools (for example the `stotable` CLI) are expected to depend
//! on this core crate rather than re-implementing type resolution.
#![deny(missing_docs)]
pub mod adapter;
pub mod element;
pub mod factory;
pub mod header;
pub mod registry;
pub mod sto_file;
pub mod storage;
pub mod table;

pub use adapter::{
    AdapterError, AdapterResult, DataAdapter, InputTables, OutputTables, StoFileAdapter, TABLE_KEY,
};
pub use element::{Element, ElementType, StoElement};
pub use factory::{UNKNOWN_DATA_TYPE, adapter_for_reading, adapter_for_tag, adapter_for_writing};
pub use header::{TypeTag, sniff_type_tag};
pub use sto_file::{adapter_for_reading_file, read_sto_file, sniff_sto_file, write_sto_file};
pub use table::{AbstractTable, TableError, TableMetadata, TimeSeriesTable};
