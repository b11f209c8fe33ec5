//! CLI tool for inspecting and rewriting STO time-series tables.

mod error;

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use snafu::ResultExt;
use sto_table_core::{
    AbstractTable, InputTables, OutputTables, TABLE_KEY, read_sto_file, sniff_sto_file,
    write_sto_file,
};

use crate::error::{CliResult, ReadTableSnafu, SniffFileSnafu, WriteTableSnafu};

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the DataType declared in a file's header (or <absent>)
    Sniff {
        #[arg(long)]
        file: PathBuf,
    },

    /// Read a file and print its element type, shape and labels
    Inspect {
        #[arg(long)]
        file: PathBuf,
    },

    /// Read a file and write it back out with a current header
    Rewrite {
        #[arg(long)]
        input: PathBuf,

        #[arg(long)]
        output: PathBuf,

        /// Print elapsed time for the rewrite
        #[arg(long, default_value_t = false)]
        timing: bool,
    },
}

#[derive(Debug, Parser)]
#[command(name = "stotable")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

async fn read_table(path: &Path) -> CliResult<OutputTables> {
    read_sto_file(path).await.context(ReadTableSnafu {
        path: path.display().to_string(),
    })
}

fn element_type_name(table: &dyn AbstractTable) -> &'static str {
    table.element_type().map_or("<unknown>", |t| t.name())
}

async fn cmd_sniff(file: &Path) -> CliResult<()> {
    let tag = sniff_sto_file(file).await.context(SniffFileSnafu {
        path: file.display().to_string(),
    })?;
    println!("{tag}");
    Ok(())
}

async fn cmd_inspect(file: &Path) -> CliResult<()> {
    let tables = read_table(file).await?;
    for table in tables.values() {
        println!("DataType: {}", element_type_name(table.as_ref()));
        println!("Rows: {}", table.num_rows());
        println!("Columns: {}", table.column_labels().len());
        println!("Labels: {}", table.column_labels().join(", "));
        for (key, value) in table.metadata().iter() {
            println!("Metadata: {key}={value}");
        }
    }
    Ok(())
}

async fn cmd_rewrite(input: &Path, output: &Path, timing: bool) -> CliResult<()> {
    let start = Instant::now();
    let tables = read_table(input).await?;

    let inputs: InputTables<'_> = tables
        .iter()
        .map(|(key, table)| (key.clone(), table.as_ref()))
        .collect();
    write_sto_file(output, &inputs)
        .await
        .context(WriteTableSnafu {
            path: output.display().to_string(),
        })?;

    let element_type = tables
        .get(TABLE_KEY)
        .map_or("<unknown>", |t| element_type_name(t.as_ref()));
    if timing {
        println!(
            "Wrote {element_type} table to {} (elapsed_ms: {})",
            output.display(),
            start.elapsed().as_millis()
        );
    } else {
        println!("Wrote {element_type} table to {}", output.display());
    }
    Ok(())
}

async fn run() -> CliResult<()> {
    let cli = Cli::parse();

    match cli.cmd {
        Command::Sniff { file } => cmd_sniff(&file).await,
        Command::Inspect { file } => cmd_inspect(&file).await,
        Command::Rewrite {
            input,
            output,
            timing,
        } => cmd_rewrite(&input, &output, timing).await,
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
