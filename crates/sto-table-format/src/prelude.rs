//! Wrapper prelude.
//!
//! The `sto-table-format` crate is the supported public entry point.
//! Downstream code should prefer importing from this prelude instead of
//! depending on internal core module paths.

pub use crate::element::{Element, ElementType, Quaternion, SpatialVec, UnitVec3, Vec3, VecN};
pub use crate::{
    AbstractTable, AdapterError, DataAdapter, InputTables, OutputTables, TABLE_KEY,
    TableError, TableMetadata, TimeSeriesTable, TypeTag, adapter_for_reading,
    adapter_for_reading_file, adapter_for_writing, read_sto_file, sniff_sto_file,
    write_sto_file,
};
