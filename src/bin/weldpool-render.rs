use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use weldpool_viewer::data::writer::export_values_csv;
use weldpool_viewer::data::{load_dataset_with, DatasetLayout, LogDiagnostics};
use weldpool_viewer::render::{render_all, RenderOptions};

#[derive(Parser)]
#[command(name = "weldpool-render")]
#[command(about = "Render weld-pool simulation output to PNG plots and a GIF", long_about = None)]
struct Cli {
    /// Directory holding temp.o, phase.o, enth.o and values.o
    #[arg(short, long, default_value = "outputs")]
    output_dir: PathBuf,
    /// Where to write the plots
    #[arg(short, long, default_value = "plots")]
    plots_dir: PathBuf,
    /// JSON file overriding the expected file names
    #[arg(long)]
    layout: Option<PathBuf>,
    /// Rows per temperature snapshot (inferred when omitted)
    #[arg(long)]
    frame_rows: Option<usize>,
    /// Animation frame delay in milliseconds
    #[arg(long, default_value_t = 100)]
    delay_ms: u32,
    /// Also export the values table as CSV to this path
    #[arg(long)]
    csv: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let layout = match &cli.layout {
        Some(path) => DatasetLayout::from_json_file(path)
            .with_context(|| format!("reading layout {}", path.display()))?,
        None => DatasetLayout::default(),
    };

    let dataset = load_dataset_with(&cli.output_dir, &layout, &mut LogDiagnostics)
        .with_context(|| format!("loading simulation output from {}", cli.output_dir.display()))?;

    if let Some(csv_path) = &cli.csv {
        export_values_csv(csv_path, &dataset.values)
            .with_context(|| format!("exporting {}", csv_path.display()))?;
        log::info!("Wrote {}", csv_path.display());
    }

    let options = RenderOptions {
        frame_rows: cli.frame_rows,
        delay_ms: cli.delay_ms,
        ..Default::default()
    };
    let report = render_all(&dataset, &cli.plots_dir, &options).context("rendering plots")?;

    for path in &report.written {
        println!("{}", path.display());
    }
    Ok(())
}
