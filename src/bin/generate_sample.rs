use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use weldpool_viewer::data::model::{Matrix, ValuesTable};
use weldpool_viewer::data::writer::{write_values, VALUES_HEADER};

const AMBIENT_K: f64 = 300.0;
const MELT_K: f64 = 1700.0;
const PEAK_K: f64 = 2600.0;
/// Crude specific heat (J/kg/K) and latent heat (J/kg) for the enthalpy field.
const CP: f64 = 500.0;
const LATENT: f64 = 2.7e5;

/// Write a synthetic weld-pool output directory.
#[derive(Parser)]
#[command(name = "generate_sample")]
struct Args {
    /// Directory to create the four output files in
    #[arg(default_value = "outputs")]
    output_dir: PathBuf,
    /// Control volumes per side
    #[arg(long, default_value_t = 40)]
    grid: usize,
    /// Number of snapshots written to temp.o / phase.o / enth.o
    #[arg(long, default_value_t = 25)]
    frames: usize,
}

/// Small deterministic ripple in [-1, 1] K so fields are not perfectly smooth.
fn ripple(i: usize, j: usize, k: usize) -> f64 {
    ((i * 7 + j * 13 + k * 3) as f64 * 0.37).sin()
}

/// Temperature of a surface-heated plate: a Gaussian hot spot centred on the
/// top edge that grows with `progress` in (0, 1].
fn temperature_field(n: usize, k: usize, progress: f64) -> Vec<Vec<f64>> {
    let spread = 0.05 + 0.2 * progress;
    (0..n)
        .map(|j| {
            let y = (j as f64 + 0.5) / n as f64;
            (0..n)
                .map(|i| {
                    let x = (i as f64 + 0.5) / n as f64;
                    let r2 = (x - 0.5).powi(2) + (1.0 - y).powi(2);
                    let hot = (PEAK_K - AMBIENT_K) * progress.sqrt() * (-r2 / (2.0 * spread * spread)).exp();
                    AMBIENT_K + hot + ripple(i, j, k)
                })
                .collect()
        })
        .collect()
}

fn phase_of(t: f64) -> f64 {
    if t >= MELT_K {
        1.0
    } else {
        0.0
    }
}

fn enthalpy_of(t: f64) -> f64 {
    CP * (t - AMBIENT_K) + LATENT * phase_of(t)
}

/// Extent of the molten region: (width, depth) as fractions of the plate.
fn pool_extent(field: &[Vec<f64>]) -> (f64, f64) {
    let n = field.len().max(1) as f64;
    let mut cols = 0usize;
    let mut rows = 0usize;
    for row in field {
        let molten = row.iter().filter(|&&t| t >= MELT_K).count();
        cols = cols.max(molten);
        if molten > 0 {
            rows += 1;
        }
    }
    (cols as f64 / n, rows as f64 / n)
}

/// Append one snapshot followed by a blank line.
fn write_block(out: &mut impl Write, field: &[Vec<f64>], map: impl Fn(f64) -> f64) -> std::io::Result<()> {
    for row in field {
        let line: Vec<String> = row.iter().map(|&t| format!("{:.6e}", map(t))).collect();
        writeln!(out, "{}", line.join(" "))?;
    }
    writeln!(out)
}

fn create(path: &PathBuf) -> Result<BufWriter<File>> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    Ok(BufWriter::new(file))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("creating {}", args.output_dir.display()))?;

    let temp_path = args.output_dir.join("temp.o");
    let phase_path = args.output_dir.join("phase.o");
    let enth_path = args.output_dir.join("enth.o");
    let mut temp_out = create(&temp_path)?;
    let mut phase_out = create(&phase_path)?;
    let mut enth_out = create(&enth_path)?;

    // Plate is 1 cm across; one snapshot every 0.5 ms.
    let mut values = Vec::with_capacity(args.frames);
    let mut energy = 0.0;
    for k in 0..args.frames {
        let progress = (k + 1) as f64 / args.frames as f64;
        let field = temperature_field(args.grid, k, progress);

        write_block(&mut temp_out, &field, |t| t).context("writing temp.o")?;
        write_block(&mut phase_out, &field, phase_of).context("writing phase.o")?;
        write_block(&mut enth_out, &field, enthalpy_of).context("writing enth.o")?;

        let (width, depth) = pool_extent(&field);
        energy += 12.5;
        values.push(vec![(k + 1) as f64, 0.5 * (k + 1) as f64, width, depth, energy]);
    }
    temp_out.flush()?;
    phase_out.flush()?;
    enth_out.flush()?;

    let table = ValuesTable::new(Matrix::from_rows(values)?);
    write_values(&args.output_dir.join("values.o"), VALUES_HEADER, &table)?;

    println!(
        "Wrote {} snapshots of a {}x{} grid to {}",
        args.frames,
        args.grid,
        args.grid,
        args.output_dir.display()
    );
    Ok(())
}
