use std::path::Path;

use super::error::{LoadError, LoadResult};
use super::layout::{DatasetLayout, Role};
use super::model::SimulationDataset;
use super::reader::{read_matrix_with, read_values_with, Diagnostics, NoDiagnostics};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load `temp.o`, `phase.o`, `enth.o` and `values.o` from `output_dir`.
pub fn load_dataset(output_dir: &Path) -> LoadResult<SimulationDataset> {
    load_dataset_with(output_dir, &DatasetLayout::default(), &mut NoDiagnostics)
}

/// Load a dataset using an explicit file layout and diagnostics sink.
///
/// Files are read one after another; the first failure is returned as-is
/// and nothing else is read.
pub fn load_dataset_with(
    output_dir: &Path,
    layout: &DatasetLayout,
    diag: &mut dyn Diagnostics,
) -> LoadResult<SimulationDataset> {
    layout.validate()?;

    if !output_dir.is_dir() {
        return Err(LoadError::io(
            output_dir,
            std::io::Error::new(std::io::ErrorKind::NotFound, "output directory not found"),
        ));
    }
    log::info!("Reading files from: {}", output_dir.display());
    log_directory_listing(output_dir);

    let temperature = read_matrix_with(&layout.path_in(output_dir, Role::Temperature), diag)?;
    let phase = read_matrix_with(&layout.path_in(output_dir, Role::Phase), diag)?;
    let enthalpy = read_matrix_with(&layout.path_in(output_dir, Role::Enthalpy), diag)?;
    let values = read_values_with(&layout.path_in(output_dir, Role::Values), diag)?;

    log::info!(
        "Loaded temperature {:?}, phase {:?}, enthalpy {:?}, {} value rows",
        temperature.shape(),
        phase.shape(),
        enthalpy.shape(),
        values.len()
    );

    Ok(SimulationDataset {
        temperature,
        phase,
        enthalpy,
        values,
    })
}

fn log_directory_listing(dir: &Path) {
    if !log::log_enabled!(log::Level::Debug) {
        return;
    }
    match std::fs::read_dir(dir) {
        Ok(entries) => {
            let mut names: Vec<String> = entries
                .filter_map(Result::ok)
                .map(|e| e.file_name().to_string_lossy().into_owned())
                .collect();
            names.sort();
            log::debug!("Files in directory: {names:?}");
        }
        Err(e) => log::debug!("Could not list {}: {e}", dir.display()),
    }
}
