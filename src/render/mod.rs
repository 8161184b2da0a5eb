/// Headless rendering: field heatmaps, pool-size chart, temperature GIF.
///
/// ```text
///   SimulationDataset
///        │
///        ├── heatmap  → temperature.png, phase.png
///        ├── chart    → pool_size.png
///        └── animation→ temperature_animation.gif
/// ```

pub mod chart;
pub mod heatmap;

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, DynamicImage, Frame};

use crate::analysis;
use crate::color::{ColorScale, Colormap};
use crate::data::model::{Matrix, SimulationDataset, ValuesTable};
use crate::data::LoadError;

use chart::{LineChart, Series, BLUE, RED};
pub use heatmap::{auto_scale, render_heatmap};

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot render {0}: no data")]
    Empty(&'static str),

    #[error(transparent)]
    Frames(#[from] LoadError),
}

/// Knobs for [`render_all`].
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Rows per temperature/phase snapshot; inferred when `None`.
    pub frame_rows: Option<usize>,
    /// GIF frame delay.
    pub delay_ms: u32,
    /// Approximate length in pixels of a heatmap's longer side.
    pub target_size: u32,
    pub temperature_levels: usize,
    pub phase_levels: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            frame_rows: None,
            delay_ms: 100,
            target_size: 600,
            temperature_levels: 20,
            phase_levels: 2,
        }
    }
}

/// Files produced by [`render_all`].
#[derive(Debug, Default)]
pub struct RenderReport {
    pub written: Vec<PathBuf>,
}

/// Split a stacked field matrix into snapshots. `name` labels the error
/// for an empty field.
pub fn field_frames(
    field: &Matrix,
    frame_rows: Option<usize>,
    name: &'static str,
) -> RenderResult<Vec<Matrix>> {
    if field.is_empty() {
        return Err(RenderError::Empty(name));
    }
    let rows = frame_rows.unwrap_or_else(|| field.infer_frame_rows());
    Ok(field.frames(rows)?)
}

/// Render every plot into `plots_dir`, creating it if needed.
pub fn render_all(
    dataset: &SimulationDataset,
    plots_dir: &Path,
    options: &RenderOptions,
) -> RenderResult<RenderReport> {
    std::fs::create_dir_all(plots_dir).map_err(|source| RenderError::Io {
        path: plots_dir.to_path_buf(),
        source,
    })?;
    let mut report = RenderReport::default();

    let frames = field_frames(&dataset.temperature, options.frame_rows, "temperature")?;
    let phase_frames = field_frames(&dataset.phase, options.frame_rows, "phase")?;
    analysis::log_temperature(&frames);
    analysis::log_phase(&dataset.phase);
    analysis::log_pool(&dataset.values);

    // Static temperature plot shows the last snapshot.
    if let Some(last) = frames.last() {
        let path = plots_dir.join("temperature.png");
        save_field(last, Colormap::Hot, options.temperature_levels, options.target_size, &path)?;
        report.written.push(path);
    }

    if let Some(last) = phase_frames.last() {
        let path = plots_dir.join("phase.png");
        save_field(last, Colormap::CoolWarm, options.phase_levels, options.target_size, &path)?;
        report.written.push(path);
    }

    let path = plots_dir.join("pool_size.png");
    render_pool_size(&dataset.values)?.save(&path)?;
    log::info!("Wrote {}", path.display());
    report.written.push(path);

    let path = plots_dir.join("temperature_animation.gif");
    if render_animation(&path, &frames, options)? {
        report.written.push(path);
    }

    Ok(report)
}

fn save_field(
    matrix: &Matrix,
    colormap: Colormap,
    levels: usize,
    target_size: u32,
    path: &Path,
) -> RenderResult<()> {
    let (min, max) = matrix.min_max().ok_or(RenderError::Empty("field"))?;
    let scale = ColorScale::new(colormap, min, max).with_levels(levels);
    render_heatmap(matrix, &scale, auto_scale(matrix, target_size)).save(path)?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

/// Width (blue) and depth (red) against time.
pub fn render_pool_size(values: &ValuesTable) -> RenderResult<image::RgbImage> {
    let (Some(time), Some(width), Some(depth)) =
        (values.time_ms(), values.width_cm(), values.depth_cm())
    else {
        return Err(RenderError::Empty("pool size"));
    };
    Ok(LineChart::default().render(&[
        Series {
            xs: &time,
            ys: &width,
            color: BLUE,
        },
        Series {
            xs: &time,
            ys: &depth,
            color: RED,
        },
    ]))
}

/// Write a looping GIF of `frames` on a shared colour scale.
///
/// Returns `false` (and writes nothing) when there is only one frame.
pub fn render_animation(path: &Path, frames: &[Matrix], options: &RenderOptions) -> RenderResult<bool> {
    if frames.len() < 2 {
        log::warn!("Cannot create animation: temperature data is a single frame");
        return Ok(false);
    }

    let (min, max) = frames
        .iter()
        .filter_map(Matrix::min_max)
        .reduce(|(a, b), (c, d)| (a.min(c), b.max(d)))
        .ok_or(RenderError::Empty("animation"))?;
    let scale = ColorScale::new(Colormap::Hot, min, max).with_levels(options.temperature_levels);
    let pixel_scale = auto_scale(&frames[0], options.target_size);

    let file = File::create(path).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut encoder = GifEncoder::new(BufWriter::new(file));
    encoder.set_repeat(Repeat::Infinite)?;

    let delay = Delay::from_numer_denom_ms(options.delay_ms, 1);
    let gif_frames = frames.iter().map(|m| {
        let rgba = DynamicImage::ImageRgb8(render_heatmap(m, &scale, pixel_scale)).into_rgba8();
        Frame::from_parts(rgba, 0, 0, delay)
    });
    encoder.encode_frames(gif_frames)?;

    log::info!("Wrote {} ({} frames)", path.display(), frames.len());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("weldpool_render_{}_{name}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn dataset(frames: usize) -> SimulationDataset {
        let n = 4;
        let temp: Vec<Vec<f64>> = (0..frames * n)
            .map(|r| (0..n).map(|c| 300.0 + (r * c) as f64).collect())
            .collect();
        SimulationDataset {
            temperature: Matrix::from_rows(temp).unwrap(),
            phase: Matrix::from_rows(vec![vec![0.0, 1.0], vec![1.0, 0.0]]).unwrap(),
            enthalpy: Matrix::from_rows(vec![vec![1.0]]).unwrap(),
            values: ValuesTable::new(
                Matrix::from_rows(vec![
                    vec![1.0, 0.5, 0.1, 0.2, 10.0],
                    vec![2.0, 1.0, 0.15, 0.25, 20.0],
                ])
                .unwrap(),
            ),
        }
    }

    #[test]
    fn writes_all_four_artifacts_for_a_series() {
        let dir = scratch("series");
        let options = RenderOptions {
            target_size: 40,
            ..Default::default()
        };
        let report = render_all(&dataset(3), &dir, &options).unwrap();
        assert_eq!(report.written.len(), 4);
        for path in &report.written {
            assert!(path.exists(), "{} missing", path.display());
        }
        let temp = image::open(dir.join("temperature.png")).unwrap();
        assert_eq!((temp.width(), temp.height()), (40, 40));
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn single_frame_skips_animation() {
        let dir = scratch("single");
        let report = render_all(&dataset(1), &dir, &RenderOptions::default()).unwrap();
        assert_eq!(report.written.len(), 3);
        assert!(!dir.join("temperature_animation.gif").exists());
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn explicit_frame_rows_must_divide() {
        let ds = dataset(2);
        assert!(field_frames(&ds.temperature, Some(3), "temperature").is_err());
        assert_eq!(field_frames(&ds.temperature, Some(2), "temperature").unwrap().len(), 4);
    }

    #[test]
    fn stacked_phase_draws_one_frame_like_temperature() {
        let dir = scratch("stacked_phase");
        let mut ds = dataset(3);
        let phase: Vec<Vec<f64>> = (0..12)
            .map(|r| (0..4).map(|c| if c < r % 4 { 1.0 } else { 0.0 }).collect())
            .collect();
        ds.phase = Matrix::from_rows(phase).unwrap();
        let options = RenderOptions {
            target_size: 40,
            ..Default::default()
        };
        render_all(&ds, &dir, &options).unwrap();

        let temp = image::open(dir.join("temperature.png")).unwrap();
        let phase = image::open(dir.join("phase.png")).unwrap();
        assert_eq!((phase.width(), phase.height()), (40, 40));
        assert_eq!(
            (phase.width(), phase.height()),
            (temp.width(), temp.height())
        );
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn pool_chart_needs_columns() {
        let values = ValuesTable::new(Matrix::from_rows(vec![vec![1.0, 2.0]]).unwrap());
        assert!(matches!(render_pool_size(&values), Err(RenderError::Empty(_))));
    }
}
