use std::path::{Path, PathBuf};

use crate::color::Colormap;
use crate::data::loader::load_dataset_with;
use crate::data::model::{Field, Matrix, SimulationDataset};
use crate::data::{DatasetLayout, LogDiagnostics};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until the user opens a directory).
    pub dataset: Option<SimulationDataset>,

    /// Directory the dataset came from.
    pub source_dir: Option<PathBuf>,

    /// File names to look for inside a directory.
    pub layout: DatasetLayout,

    /// Field shown in the heatmap.
    pub field: Field,

    /// Snapshots of the selected field.
    pub frames: Vec<Matrix>,

    /// Index into `frames`.
    pub frame: usize,

    /// Active colour map.
    pub colormap: Colormap,

    /// Colour scale spans all frames instead of the current one.
    pub global_scale: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Bumped whenever the heatmap input changes.
    pub revision: u64,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            source_dir: None,
            layout: DatasetLayout::default(),
            field: Field::Temperature,
            frames: Vec::new(),
            frame: 0,
            colormap: Colormap::Hot,
            global_scale: true,
            status_message: None,
            revision: 0,
        }
    }
}

impl AppState {
    /// Load a dataset from `dir`, reporting failure in `status_message`.
    pub fn open_directory(&mut self, dir: &Path) {
        match load_dataset_with(dir, &self.layout, &mut LogDiagnostics) {
            Ok(dataset) => {
                self.source_dir = Some(dir.to_path_buf());
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", dir.display());
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Ingest a newly loaded dataset and show its temperature field.
    pub fn set_dataset(&mut self, dataset: SimulationDataset) {
        self.dataset = Some(dataset);
        self.status_message = None;
        self.set_field(Field::Temperature);
    }

    /// Switch the heatmap field, re-splitting it into frames.
    pub fn set_field(&mut self, field: Field) {
        self.field = field;
        self.colormap = default_colormap(field);
        self.frames = match &self.dataset {
            Some(ds) => {
                let m = ds.field(field);
                m.frames(m.infer_frame_rows()).unwrap_or_else(|_| vec![m.clone()])
            }
            None => Vec::new(),
        };
        // Start on the final state, like the static plots.
        self.frame = self.frames.len().saturating_sub(1);
        self.revision += 1;
    }

    pub fn current_frame(&self) -> Option<&Matrix> {
        self.frames.get(self.frame)
    }

    /// `(min, max)` for the colour scale.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        if self.global_scale {
            self.frames
                .iter()
                .filter_map(Matrix::min_max)
                .reduce(|(a, b), (c, d)| (a.min(c), b.max(d)))
        } else {
            self.current_frame().and_then(Matrix::min_max)
        }
    }

    /// Contour bands used for the current field.
    pub fn levels(&self) -> usize {
        match self.field {
            Field::Phase => 2,
            _ => 20,
        }
    }
}

fn default_colormap(field: Field) -> Colormap {
    match field {
        Field::Temperature => Colormap::Hot,
        Field::Phase => Colormap::CoolWarm,
        Field::Enthalpy => Colormap::Viridis,
    }
}
