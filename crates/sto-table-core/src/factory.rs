//! Reader and writer factories.
//!
//! Both factories resolve an [`ElementType`] and return a fresh, empty
//! adapter for it from the [registry](crate::registry). They hold no state,
//! never log, and either resolve fully or fail with an error that reaches
//! the caller unchanged:
//!
//! - [`adapter_for_tag`] maps a header [`TypeTag`] to an adapter. An absent
//!   tag selects `double` (legacy files); an unknown name is an error.
//! - [`adapter_for_reading`] sniffs a stream's header first.
//! - [`adapter_for_writing`] reads the element type a table stores and maps
//!   it to an adapter. A table whose element type the registry cannot
//!   represent, or whose concrete type is not the one registered for the
//!   element type it reports, fails with the tag `<unknown>`.

use std::io::BufRead;

use snafu::OptionExt;

use crate::{
    adapter::{
        DataAdapter, InputTables,
        error::{AdapterResult, UnsupportedDataTypeSnafu},
        table_entry,
    },
    element::ElementType,
    header::{TypeTag, sniff_type_tag},
    registry::{self, RegistryEntry},
};

/// Tag reported when a table's element type has no registry entry.
pub const UNKNOWN_DATA_TYPE: &str = "<unknown>";

/// Resolve a header tag to the registry entry it selects.
pub fn resolve_tag(tag: &TypeTag) -> AdapterResult<&'static RegistryEntry> {
    let entry = match tag {
        TypeTag::Absent => registry::entry_for(ElementType::LEGACY_DEFAULT),
        TypeTag::Declared(name) => registry::entry_by_name(name),
    };
    entry.with_context(|| UnsupportedDataTypeSnafu {
        tag: tag.to_string(),
    })
}

/// Construct the reader for a header tag.
pub fn adapter_for_tag(tag: &TypeTag) -> AdapterResult<Box<dyn DataAdapter>> {
    Ok(resolve_tag(tag)?.new_adapter())
}

/// Sniff `reader`'s header and construct the matching reader.
///
/// `reader` is left part-way through the header. Reset or reopen it before
/// passing it to [`DataAdapter::read`].
pub fn adapter_for_reading<R: BufRead + ?Sized>(
    reader: &mut R,
) -> AdapterResult<Box<dyn DataAdapter>> {
    let tag = sniff_type_tag(reader)?;
    adapter_for_tag(&tag)
}

/// Construct the writer for the table keyed `"table"` in `tables`.
pub fn adapter_for_writing(tables: &InputTables<'_>) -> AdapterResult<Box<dyn DataAdapter>> {
    let table = table_entry(tables)?;
    let entry = table
        .element_type()
        .and_then(registry::entry_for)
        .filter(|entry| entry.holds(table))
        .context(UnsupportedDataTypeSnafu {
            tag: UNKNOWN_DATA_TYPE,
        })?;
    Ok(entry.new_adapter())
}

#[cfg(test)]
mod tests {
    use crate::{
        adapter::{AdapterError, TABLE_KEY},
        element::{Element, Quaternion, UnitVec3, Vec3},
        table::{AbstractTable, TimeSeriesTable},
    };

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Torque(#[allow(dead_code)] f64);

    impl Element for Torque {
        const ELEMENT_TYPE: Option<ElementType> = None;
    }

    /// Claims the `Vec3` discriminant without being `Vec3`.
    #[derive(Debug, Clone, PartialEq)]
    struct Marker(#[allow(dead_code)] [f64; 3]);

    impl Element for Marker {
        const ELEMENT_TYPE: Option<ElementType> = Some(ElementType::Vec3);
    }

    fn declared(name: &str) -> TypeTag {
        TypeTag::Declared(name.to_string())
    }

    #[test]
    fn every_registry_name_resolves_to_its_own_adapter() {
        for element_type in ElementType::ALL {
            let adapter = adapter_for_tag(&declared(element_type.name())).unwrap();
            assert_eq!(adapter.element_type(), element_type);
        }
    }

    #[test]
    fn absent_tag_falls_back_to_double() {
        let adapter = adapter_for_tag(&TypeTag::Absent).unwrap();
        assert_eq!(adapter.element_type(), ElementType::Double);
    }

    #[test]
    fn unknown_names_fail_with_the_tag_verbatim() {
        for name in ["Vec13", "vec3", "Double", " Vec3", "Vec3 "] {
            let err = adapter_for_tag(&declared(name)).unwrap_err();
            assert!(
                matches!(err, AdapterError::UnsupportedDataType { ref tag } if tag == name),
                "{name:?} -> {err:?}"
            );
        }
    }

    #[test]
    fn adapter_for_reading_sniffs_then_resolves() {
        let mut text = "version=3\nDataType=UnitVec3\nendheader\ntime\n".as_bytes();
        let adapter = adapter_for_reading(&mut text).unwrap();
        assert_eq!(adapter.element_type(), ElementType::UnitVec3);

        let mut legacy = "nRows=0\nendheader\ntime\n".as_bytes();
        let adapter = adapter_for_reading(&mut legacy).unwrap();
        assert_eq!(adapter.element_type(), ElementType::Double);

        let mut bad = "DataType=Vec13\nendheader\n".as_bytes();
        let err = adapter_for_reading(&mut bad).unwrap_err();
        assert!(matches!(err, AdapterError::UnsupportedDataType { ref tag } if tag == "Vec13"));
    }

    #[test]
    fn writer_resolves_the_stored_element_type() {
        let vec3 = TimeSeriesTable::<Vec3>::new(["a"]);
        let unit = TimeSeriesTable::<UnitVec3>::new(["a"]);
        let quat = TimeSeriesTable::<Quaternion>::new(["a"]);
        let cases: [(&dyn AbstractTable, ElementType); 3] = [
            (&vec3 as &dyn AbstractTable, ElementType::Vec3),
            (&unit as &dyn AbstractTable, ElementType::UnitVec3),
            (&quat as &dyn AbstractTable, ElementType::Quaternion),
        ];

        for (table, expected) in cases {
            let mut tables = InputTables::new();
            tables.insert(TABLE_KEY.to_string(), table);
            assert_eq!(
                adapter_for_writing(&tables).unwrap().element_type(),
                expected
            );
        }
    }

    #[test]
    fn writer_requires_the_table_key() {
        let table = TimeSeriesTable::<f64>::new(["a"]);
        let mut tables = InputTables::new();
        tables.insert("tables".to_string(), &table as &dyn AbstractTable);

        let err = adapter_for_writing(&tables).unwrap_err();
        assert!(matches!(err, AdapterError::MissingTable));
    }

    #[test]
    fn writer_rejects_unregistered_element_types() {
        let table = TimeSeriesTable::<Torque>::new(["joint"]);
        let mut tables = InputTables::new();
        tables.insert(TABLE_KEY.to_string(), &table as &dyn AbstractTable);

        let err = adapter_for_writing(&tables).unwrap_err();
        assert!(matches!(err, AdapterError::UnsupportedDataType { ref tag } if tag == "<unknown>"));
    }

    #[test]
    fn writer_rejects_tables_that_misreport_their_element_type() {
        let table = TimeSeriesTable::<Marker>::new(["RASI"]);
        assert_eq!(
            (&table as &dyn AbstractTable).element_type(),
            Some(ElementType::Vec3)
        );
        let mut tables = InputTables::new();
        tables.insert(TABLE_KEY.to_string(), &table as &dyn AbstractTable);

        let err = adapter_for_writing(&tables).unwrap_err();
        assert!(matches!(err, AdapterError::UnsupportedDataType { ref tag } if tag == "<unknown>"));
    }
}
