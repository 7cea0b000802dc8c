use super::OdFlowAppError;
use flate2::{write::GzEncoder, Compression};
use kdam::tqdm;
use odflow_core::model::OdFlowOutput;
use serde::Serialize;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

pub const OD_MATRIX_FILENAME: &str = "od-matrix.csv";
pub const EDGE_FLOWS_FILENAME: &str = "edge-flows.csv";

/// writes the OD table and the edge flow table into `output_directory`.
///
/// every file is attempted even when an earlier one fails; the failures are logged
/// and returned so the caller can decide how to exit. the in-memory result is never
/// affected by a write failure.
pub fn write_outputs(
    output: &OdFlowOutput,
    output_directory: &Path,
    overwrite: bool,
    gzip: bool,
) -> Vec<OdFlowAppError> {
    let mut failures = vec![];

    let n_od = output.od_matrix.size() * output.od_matrix.size();
    let od_rows = tqdm!(output.od_matrix.rows(), total = n_od, desc = "write OD matrix");
    if let Err(e) = write_rows(output_directory, OD_MATRIX_FILENAME, od_rows, overwrite, gzip) {
        log::error!("{e}");
        failures.push(e);
    }
    eprintln!();

    let n_edges = output.edge_flows.len();
    let edge_rows = tqdm!(
        output.edge_flows.rows(),
        total = n_edges,
        desc = "write edge flows"
    );
    if let Err(e) = write_rows(
        output_directory,
        EDGE_FLOWS_FILENAME,
        edge_rows,
        overwrite,
        gzip,
    ) {
        log::error!("{e}");
        failures.push(e);
    }
    eprintln!();

    failures
}

fn output_filepath(directory: &Path, filename: &str, gzip: bool) -> PathBuf {
    if gzip {
        directory.join(format!("{filename}.gz"))
    } else {
        directory.join(filename)
    }
}

/// serializes rows to a csv file with headers. an existing file is left untouched
/// when `overwrite` is false.
fn write_rows<T: Serialize>(
    directory: &Path,
    filename: &str,
    rows: impl Iterator<Item = T>,
    overwrite: bool,
    gzip: bool,
) -> Result<(), OdFlowAppError> {
    let filepath = output_filepath(directory, filename, gzip);
    let write_error = |error: String| OdFlowAppError::WriteError {
        filepath: filepath.to_string_lossy().to_string(),
        error,
    };
    if filepath.exists() && !overwrite {
        log::warn!(
            "{} exists and overwrite is disabled, skipping",
            filepath.to_string_lossy()
        );
        return Ok(());
    }

    let file = File::create(&filepath).map_err(|e| write_error(e.to_string()))?;
    let buffer: Box<dyn Write> = if gzip {
        Box::new(GzEncoder::new(file, Compression::default()))
    } else {
        Box::new(BufWriter::new(file))
    };
    let mut writer = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(buffer);
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| write_error(e.to_string()))?;
    }
    let mut inner = writer
        .into_inner()
        .map_err(|e| write_error(e.error().to_string()))?;
    inner.flush().map_err(|e| write_error(e.to_string()))?;
    log::info!("wrote {}", filepath.to_string_lossy());
    Ok(())
}
