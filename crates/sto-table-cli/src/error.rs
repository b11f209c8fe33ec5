use sto_table_core::AdapterError;

use snafu::Snafu;

pub type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CliError {
    #[snafu(display("Failed to read the header of {path}: {source}"))]
    SniffFile {
        path: String,
        #[snafu(source(from(AdapterError, Box::new)))]
        source: Box<AdapterError>,
    },

    #[snafu(display(
        "Failed to read STO table from {path}: {source}. \
         Ensure the header declares a supported DataType."
    ))]
    ReadTable {
        path: String,
        #[snafu(source(from(AdapterError, Box::new)))]
        source: Box<AdapterError>,
    },

    #[snafu(display("Failed to write STO table to {path}: {source}"))]
    WriteTable {
        path: String,
        #[snafu(source(from(AdapterError, Box::new)))]
        source: Box<AdapterError>,
    },
}
