#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use sto_table_format::prelude::*;
use tempfile::TempDir;

type TestResult = Result<(), Box<dyn std::error::Error>>;

#[tokio::test]
async fn prelude_covers_a_write_then_read_workflow() -> TestResult {
    let tmp = TempDir::new()?;
    let path = tmp.path().join("orientations.sto");

    let mut table = TimeSeriesTable::<Quaternion>::new(["pelvis", "torso"]);
    table.metadata_mut().insert("inDegrees", "no");
    table.append_row(0.0, vec![Quaternion::IDENTITY, Quaternion::new(0.0, 0.0, 0.0, 2.0)])?;

    let mut inputs = InputTables::new();
    inputs.insert(TABLE_KEY.to_string(), &table as &dyn AbstractTable);
    write_sto_file(&path, &inputs).await?;

    assert_eq!(sniff_sto_file(&path).await?, TypeTag::Declared("Quaternion".into()));

    let tables: OutputTables = read_sto_file(&path).await?;
    let read = tables[TABLE_KEY]
        .downcast_ref::<Quaternion>()
        .expect("Quaternion table");
    assert_eq!(read, &table);
    assert_eq!(read.metadata().get("inDegrees"), Some("no"));
    Ok(())
}

#[test]
fn element_catalog_is_reachable_from_the_facade() {
    let names: Vec<_> = ElementType::ALL.iter().map(|t| t.name()).collect();
    assert_eq!(names.len(), 15);
    assert!(names.contains(&"SpatialVec"));
    assert_eq!(sto_table_format::REGISTRY.len(), 15);
}
