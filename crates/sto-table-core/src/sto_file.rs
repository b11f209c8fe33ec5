//! Path-based entry points for reading and writing STO files.
//!
//! These glue the [factories](crate::factory) to [storage](crate::storage).
//! A file is read once into memory. The header is sniffed from one cursor,
//! and the resolved adapter parses the payload from a fresh cursor over the
//! same bytes, so the sniff never disturbs the payload read.

use std::io::BufRead;
use std::path::Path;

use log::{debug, info};
use snafu::ResultExt;

use crate::{
    adapter::{
        DataAdapter, InputTables, OutputTables,
        error::{AdapterResult, StorageSnafu},
    },
    factory::{adapter_for_tag, adapter_for_writing},
    header::{TypeTag, sniff_type_tag},
    storage,
};

async fn load(path: &Path) -> AdapterResult<Vec<u8>> {
    storage::read_bytes(path).await.context(StorageSnafu)
}

fn resolve(path: &Path, header: &mut dyn BufRead) -> AdapterResult<Box<dyn DataAdapter>> {
    let tag = sniff_type_tag(header)?;
    if tag == TypeTag::Absent {
        debug!(
            "{} declares no DataType; reading it as a legacy double table",
            path.display()
        );
    }
    adapter_for_tag(&tag)
}

/// Read the element type declaration of the file at `path`.
pub async fn sniff_sto_file(path: &Path) -> AdapterResult<TypeTag> {
    let bytes = load(path).await?;
    sniff_type_tag(&mut bytes.as_slice())
}

/// Construct the reader matching the header of the file at `path`.
pub async fn adapter_for_reading_file(path: &Path) -> AdapterResult<Box<dyn DataAdapter>> {
    let bytes = load(path).await?;
    resolve(path, &mut bytes.as_slice())
}

/// Read the STO file at `path` with the adapter its header selects.
///
/// The result holds the table under the key `"table"`.
pub async fn read_sto_file(path: &Path) -> AdapterResult<OutputTables> {
    let bytes = load(path).await?;
    let adapter = resolve(path, &mut bytes.as_slice())?;
    let tables = adapter.read(&mut bytes.as_slice())?;
    debug!(
        "read {} table from {}",
        adapter.element_type(),
        path.display()
    );
    Ok(tables)
}

/// Write the table keyed `"table"` in `tables` to `path`.
///
/// The writer is chosen from the table's element type. The file is replaced
/// atomically.
pub async fn write_sto_file(path: &Path, tables: &InputTables<'_>) -> AdapterResult<()> {
    let adapter = adapter_for_writing(tables)?;
    let mut encoded = Vec::new();
    adapter.write(tables, &mut encoded)?;
    storage::write_atomic(path, &encoded)
        .await
        .context(StorageSnafu)?;
    info!(
        "wrote {} table ({} bytes) to {}",
        adapter.element_type(),
        encoded.len(),
        path.display()
    );
    Ok(())
}
