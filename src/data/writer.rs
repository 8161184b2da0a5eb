use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::error::{LoadError, LoadResult};
use super::model::{Matrix, ValueColumn, ValuesTable};

/// Header line the simulation writes at the top of `values.o`.
pub const VALUES_HEADER: &str = "nstep time(ms) width(cm) depth(cm) energy(J)";

/// Write one space-separated row per line. Values are written with full
/// round-trip precision.
pub fn write_matrix(path: &Path, matrix: &Matrix) -> LoadResult<()> {
    write_text(path, None, matrix)
}

/// Write a header line followed by the table rows.
pub fn write_values(path: &Path, header: &str, table: &ValuesTable) -> LoadResult<()> {
    write_text(path, Some(header), &table.matrix)
}

fn write_text(path: &Path, header: Option<&str>, matrix: &Matrix) -> LoadResult<()> {
    let file = File::create(path).map_err(|e| LoadError::io(path, e))?;
    let mut out = BufWriter::new(file);
    let result = (|| -> std::io::Result<()> {
        if let Some(header) = header {
            writeln!(out, "{header}")?;
        }
        for row in matrix.iter_rows() {
            let line: Vec<String> = row.iter().map(|v| format!("{v:e}")).collect();
            writeln!(out, "{}", line.join(" "))?;
        }
        out.flush()
    })();
    result.map_err(|e| LoadError::io(path, e))
}

/// Export the values table as CSV with named columns.
///
/// Columns beyond the five known ones are named `col5`, `col6`, ...
pub fn export_values_csv(path: &Path, table: &ValuesTable) -> LoadResult<()> {
    let csv_err = |source| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;

    let headers: Vec<String> = (0..table.matrix.cols())
        .map(|i| match ValueColumn::ALL.get(i) {
            Some(col) => col.name().to_string(),
            None => format!("col{i}"),
        })
        .collect();
    writer.write_record(&headers).map_err(csv_err)?;

    for row in table.matrix.iter_rows() {
        writer
            .write_record(row.iter().map(|v| v.to_string()))
            .map_err(csv_err)?;
    }
    writer.flush().map_err(|e| LoadError::io(path, e))
}
