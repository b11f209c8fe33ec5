//! The closed catalog of element types the STO format supports.
//!
//! [`REGISTRY`] is the single source of truth shared by the reader and
//! writer factories: it fixes which element types exist, the catalog order in
//! which header names are matched, and how to construct the adapter for each
//! one. Header names themselves come from [`ElementType::name`].

use std::fmt;

use crate::{
    adapter::{DataAdapter, StoFileAdapter},
    element::{
        ElementType, Quaternion, SpatialVec, StoElement, UnitVec3, Vec2, Vec3, Vec4, Vec5, Vec6,
        Vec7, Vec8, Vec9, Vec10, Vec11, Vec12,
    },
    table::AbstractTable,
};

/// One supported element type and its adapter constructor.
pub struct RegistryEntry {
    element_type: ElementType,
    construct: fn() -> Box<dyn DataAdapter>,
    holds: fn(&dyn AbstractTable) -> bool,
}

impl RegistryEntry {
    /// The element type this entry describes.
    pub const fn element_type(&self) -> ElementType {
        self.element_type
    }

    /// The header name of this entry.
    pub const fn name(&self) -> &'static str {
        self.element_type.name()
    }

    /// Construct a new, empty adapter for this element type.
    pub fn new_adapter(&self) -> Box<dyn DataAdapter> {
        (self.construct)()
    }

    /// Whether `table` stores exactly the element type of this entry.
    ///
    /// Checks the concrete table type, not the discriminant the table
    /// reports.
    pub fn holds(&self, table: &dyn AbstractTable) -> bool {
        (self.holds)(table)
    }
}

impl fmt::Debug for RegistryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryEntry")
            .field("element_type", &self.element_type)
            .finish_non_exhaustive()
    }
}

fn construct<T: StoElement>() -> Box<dyn DataAdapter> {
    Box::new(StoFileAdapter::<T>::new())
}

fn holds<T: StoElement>(table: &dyn AbstractTable) -> bool {
    table.downcast_ref::<T>().is_some()
}

const fn entry<T: StoElement>() -> RegistryEntry {
    RegistryEntry {
        element_type: T::STO_TYPE,
        construct: construct::<T>,
        holds: holds::<T>,
    }
}

/// Supported element types in catalog order.
pub static REGISTRY: [RegistryEntry; 15] = [
    entry::<f64>(),
    entry::<Vec2>(),
    entry::<Vec3>(),
    entry::<Vec4>(),
    entry::<Vec5>(),
    entry::<Vec6>(),
    entry::<Vec7>(),
    entry::<Vec8>(),
    entry::<Vec9>(),
    entry::<Vec10>(),
    entry::<Vec11>(),
    entry::<Vec12>(),
    entry::<UnitVec3>(),
    entry::<Quaternion>(),
    entry::<SpatialVec>(),
];

/// Look up a header name. Matching is exact and case-sensitive.
pub fn entry_by_name(name: &str) -> Option<&'static RegistryEntry> {
    REGISTRY.iter().find(|entry| entry.name() == name)
}

/// Look up the entry for an element type.
pub fn entry_for(element_type: ElementType) -> Option<&'static RegistryEntry> {
    REGISTRY
        .iter()
        .find(|entry| entry.element_type == element_type)
}
