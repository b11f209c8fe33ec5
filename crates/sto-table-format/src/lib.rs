//! # sto-table-format
//!
//! Reading and writing STO time-series text tables whose data cells share
//! one element type.
//!
//! This crate is the supported public entry point and provides a small, stable surface.
//!
//! ## Example
//!
//! ```rust,ignore
//! use sto_table_format::prelude::*;
//!
//! let tables = read_sto_file(Path::new("markers.sto")).await?;
//! let markers = tables[TABLE_KEY].downcast_ref::<Vec3>().unwrap();
//! ```

/// Convenience prelude with the stable, supported surface.
pub mod prelude;

/// Element value types and the element type catalog.
pub mod element {
    pub use sto_table_core::element::{
        Element, ElementType, Quaternion, SpatialVec, StoElement, UnitVec3, Vec2, Vec3, Vec4,
        Vec5, Vec6, Vec7, Vec8, Vec9, Vec10, Vec11, Vec12, VecN,
    };
}

pub use sto_table_core::adapter::{
    AdapterError, DataAdapter, InputTables, OutputTables, StoFileAdapter, TABLE_KEY,
};
pub use sto_table_core::factory::{adapter_for_reading, adapter_for_tag, adapter_for_writing};
pub use sto_table_core::header::{TypeTag, sniff_type_tag};
pub use sto_table_core::registry::{REGISTRY, RegistryEntry};
pub use sto_table_core::sto_file::{
    adapter_for_reading_file, read_sto_file, sniff_sto_file, write_sto_file,
};
pub use sto_table_core::table::{AbstractTable, TableError, TableMetadata, TimeSeriesTable};
