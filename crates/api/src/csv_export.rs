// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV export of rendered plan tables.

use arrival_plan_domain::PlanTable;
use csv::Writer;
use std::io::Write;

use crate::error::ApiError;

fn csv_error(err: &csv::Error) -> ApiError {
    ApiError::Internal {
        message: format!("Failed to write CSV: {err}"),
    }
}

/// Writes a plan table as CSV: one header record with the captions, then
/// one record per row.
///
/// # Errors
///
/// Returns `ApiError::Internal` if the underlying writer fails.
pub fn write_plan_csv<W: Write>(table: &PlanTable, writer: W) -> Result<(), ApiError> {
    let mut csv_writer: Writer<W> = Writer::from_writer(writer);
    csv_writer
        .write_record(&table.columns)
        .map_err(|e| csv_error(&e))?;
    for row in &table.rows {
        csv_writer.write_record(row).map_err(|e| csv_error(&e))?;
    }
    csv_writer.flush().map_err(|e| ApiError::Internal {
        message: format!("Failed to flush CSV: {e}"),
    })
}

/// Renders a plan table to a CSV string.
///
/// # Errors
///
/// Returns `ApiError::Internal` if encoding fails.
pub fn plan_csv_string(table: &PlanTable) -> Result<String, ApiError> {
    let mut buffer: Vec<u8> = Vec::new();
    write_plan_csv(table, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| ApiError::Internal {
        message: format!("CSV output is not valid UTF-8: {e}"),
    })
}
