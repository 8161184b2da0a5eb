/// Data layer: core types, reading, loading, and writing.
///
/// Architecture:
/// ```text
///  temp.o / phase.o / enth.o / values.o
///        │
///        ▼
///   ┌──────────┐
///   │  reader   │  whitespace text → Matrix / ValuesTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  DatasetLayout + directory → SimulationDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ SimulationDataset │  temperature, phase, enthalpy, values
///   └──────────────────┘
/// ```

pub mod error;
pub mod layout;
pub mod loader;
pub mod model;
pub mod reader;
pub mod writer;

pub use error::{ErrorClass, LoadError, LoadResult};
pub use layout::{DatasetLayout, Role};
pub use loader::{load_dataset, load_dataset_with};
pub use model::{Field, Matrix, SimulationDataset, ValueColumn, ValuesTable};
pub use reader::{
    read_matrix, read_matrix_with, read_values, read_values_with, Diagnostics, LogDiagnostics,
    NoDiagnostics,
};
