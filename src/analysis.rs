use crate::data::model::{Matrix, ValuesTable};

// ---------------------------------------------------------------------------
// Per-field summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSummary {
    pub shape: (usize, usize),
    pub min: f64,
    pub max: f64,
}

impl FieldSummary {
    /// `None` for an empty matrix.
    pub fn of(matrix: &Matrix) -> Option<Self> {
        let (min, max) = matrix.min_max()?;
        Some(FieldSummary {
            shape: matrix.shape(),
            min,
            max,
        })
    }
}

/// Sorted distinct values, NaN excluded.
pub fn unique_values(matrix: &Matrix) -> Vec<f64> {
    let mut vals: Vec<f64> = matrix
        .as_slice()
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .collect();
    vals.sort_by(f64::total_cmp);
    vals.dedup();
    vals
}

// ---------------------------------------------------------------------------
// Frame-to-frame change
// ---------------------------------------------------------------------------

/// How much a field moves between consecutive snapshots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameChange {
    pub max_abs_change: f64,
    pub changed: usize,
    pub total: usize,
}

impl FrameChange {
    /// `None` when there are fewer than two frames.
    pub fn between(frames: &[Matrix]) -> Option<Self> {
        if frames.len() < 2 {
            return None;
        }
        let mut max_abs_change = 0.0f64;
        let mut changed = 0;
        let mut total = 0;
        for pair in frames.windows(2) {
            for (a, b) in pair[0].as_slice().iter().zip(pair[1].as_slice()) {
                let d = b - a;
                if d != 0.0 {
                    changed += 1;
                }
                max_abs_change = max_abs_change.max(d.abs());
                total += 1;
            }
        }
        Some(FrameChange {
            max_abs_change,
            changed,
            total,
        })
    }

    pub fn percent_changed(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            100.0 * self.changed as f64 / self.total as f64
        }
    }
}

// ---------------------------------------------------------------------------
// Pool size ranges
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoolSummary {
    pub time_ms: (f64, f64),
    pub width_cm: (f64, f64),
    pub depth_cm: (f64, f64),
}

impl PoolSummary {
    /// `None` if the table is empty or lacks the time/width/depth columns.
    pub fn of(values: &ValuesTable) -> Option<Self> {
        Some(PoolSummary {
            time_ms: range(&values.time_ms()?)?,
            width_cm: range(&values.width_cm()?)?,
            depth_cm: range(&values.depth_cm()?)?,
        })
    }
}

fn range(xs: &[f64]) -> Option<(f64, f64)> {
    xs.iter().copied().fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

// ---------------------------------------------------------------------------
// Log reports
// ---------------------------------------------------------------------------

pub fn log_temperature(frames: &[Matrix]) {
    let Some(first) = frames.first() else {
        log::warn!("Temperature data is empty");
        return;
    };
    if let Some(s) = summarize_frames(frames) {
        log::info!(
            "Temperature data: {} frame(s) of {:?}, range {:.2} K to {:.2} K",
            frames.len(),
            first.shape(),
            s.min,
            s.max
        );
    }
    match FrameChange::between(frames) {
        Some(change) => {
            log::info!(
                "Maximum temperature change between timesteps: {:.2} K",
                change.max_abs_change
            );
            log::info!(
                "Temperature changes: {} out of {} elements ({:.2}%)",
                change.changed,
                change.total,
                change.percent_changed()
            );
        }
        None => log::warn!("Temperature data is a single 2D frame, not a time series"),
    }
}

pub fn log_phase(phase: &Matrix) {
    if let Some(s) = FieldSummary::of(phase) {
        log::info!(
            "Phase data shape {:?}, range {:.2} to {:.2}",
            s.shape,
            s.min,
            s.max
        );
    }
    let unique = unique_values(phase);
    if unique.len() <= 16 {
        log::info!("Unique phase values: {unique:?}");
    } else {
        log::info!("{} distinct phase values", unique.len());
    }
}

pub fn log_pool(values: &ValuesTable) {
    match PoolSummary::of(values) {
        Some(p) => {
            log::info!("Time range: {:.3} ms to {:.3} ms", p.time_ms.0, p.time_ms.1);
            log::info!("Width range: {:.3} cm to {:.3} cm", p.width_cm.0, p.width_cm.1);
            log::info!("Depth range: {:.3} cm to {:.3} cm", p.depth_cm.0, p.depth_cm.1);
        }
        None => log::warn!("Values table has no time/width/depth data"),
    }
}

fn summarize_frames(frames: &[Matrix]) -> Option<FieldSummary> {
    let mut out: Option<FieldSummary> = None;
    for f in frames {
        let s = FieldSummary::of(f)?;
        out = Some(match out {
            None => s,
            Some(acc) => FieldSummary {
                shape: acc.shape,
                min: acc.min.min(s.min),
                max: acc.max.max(s.max),
            },
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: Vec<Vec<f64>>) -> Matrix {
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn summary_of_field() {
        let s = FieldSummary::of(&m(vec![vec![300.0, 1800.0], vec![450.0, 299.5]])).unwrap();
        assert_eq!(s.shape, (2, 2));
        assert_eq!(s.min, 299.5);
        assert_eq!(s.max, 1800.0);
        assert!(FieldSummary::of(&m(vec![])).is_none());
    }

    #[test]
    fn unique_phase_values() {
        let phase = m(vec![vec![0.0, 1.0, 0.0], vec![0.5, 1.0, 0.0]]);
        assert_eq!(unique_values(&phase), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn change_between_frames() {
        let frames = vec![
            m(vec![vec![300.0, 300.0], vec![300.0, 300.0]]),
            m(vec![vec![300.0, 310.0], vec![300.0, 300.0]]),
            m(vec![vec![300.0, 310.0], vec![280.0, 300.0]]),
        ];
        let c = FrameChange::between(&frames).unwrap();
        assert_eq!(c.max_abs_change, 20.0);
        assert_eq!(c.changed, 2);
        assert_eq!(c.total, 8);
        assert_eq!(c.percent_changed(), 25.0);
    }

    #[test]
    fn single_frame_has_no_change() {
        assert!(FrameChange::between(&[m(vec![vec![1.0]])]).is_none());
    }

    #[test]
    fn pool_ranges() {
        let values = ValuesTable::new(m(vec![
            vec![1.0, 0.5, 0.1, 0.2, 10.0],
            vec![2.0, 1.0, 0.15, 0.25, 20.0],
            vec![3.0, 1.5, 0.12, 0.3, 30.0],
        ]));
        let p = PoolSummary::of(&values).unwrap();
        assert_eq!(p.time_ms, (0.5, 1.5));
        assert_eq!(p.width_cm, (0.1, 0.15));
        assert_eq!(p.depth_cm, (0.2, 0.3));
    }
}
