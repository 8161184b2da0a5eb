//! Reader, renderer and viewer for weld-pool simulation output.
//!
//! The simulation writes `temp.o`, `phase.o`, `enth.o` and `values.o` into an
//! output directory. [`data::load_dataset`] turns that directory into a
//! [`data::SimulationDataset`]; [`render::render_all`] writes PNG/GIF plots
//! from it, and the `weldpool-viewer` binary shows it interactively.

pub mod analysis;
pub mod app;
pub mod color;
pub mod data;
pub mod render;
pub mod state;
pub mod ui;
