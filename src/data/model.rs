use std::fmt;

use super::error::{LoadError, LoadResult};

// ---------------------------------------------------------------------------
// Matrix – a rectangular block of numbers from one output file
// ---------------------------------------------------------------------------

/// A rectangular, row-major array of `f64` parsed from a text file.
///
/// `block_starts` records the row index at which each blank-line-separated
/// block of the source file begins. Simulation codes that append one
/// snapshot per output time usually separate them that way.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
    block_starts: Vec<usize>,
}

impl Matrix {
    /// Build a matrix from a list of equal-length rows.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> LoadResult<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        let n_rows = rows.len();
        let mut data = Vec::with_capacity(n_rows * cols);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(LoadError::UnevenRows {
                    row: i,
                    expected: cols,
                    found: row.len(),
                });
            }
            data.extend(row);
        }
        let block_starts = if n_rows == 0 { Vec::new() } else { vec![0] };
        Ok(Matrix {
            rows: n_rows,
            cols,
            data,
            block_starts,
        })
    }

    /// Assemble a matrix from already-validated parts. Used by the reader.
    pub(crate) fn from_parts(
        rows: usize,
        cols: usize,
        data: Vec<f64>,
        block_starts: Vec<usize>,
    ) -> Self {
        debug_assert_eq!(rows * cols, data.len());
        Matrix {
            rows,
            cols,
            data,
            block_starts,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flat row-major storage.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> Option<&[f64]> {
        if row < self.rows {
            Some(&self.data[row * self.cols..(row + 1) * self.cols])
        } else {
            None
        }
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact panics on zero; an empty matrix has no rows anyway.
        self.data.chunks_exact(self.cols.max(1))
    }

    pub fn column(&self, col: usize) -> Option<Vec<f64>> {
        if col >= self.cols {
            return None;
        }
        Some(self.iter_rows().map(|r| r[col]).collect())
    }

    /// Nested `Vec` copy, handy for comparisons and export.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.iter_rows().map(|r| r.to_vec()).collect()
    }

    pub fn block_starts(&self) -> &[usize] {
        &self.block_starts
    }

    /// Smallest and largest finite value, `None` for an empty matrix.
    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.data
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }

    /// Guess how many rows make up one snapshot.
    ///
    /// Equal-sized blank-line blocks win; then square frames when the row
    /// count is a whole multiple of the column count; else one frame.
    pub fn infer_frame_rows(&self) -> usize {
        if self.rows == 0 {
            return 0;
        }
        if self.block_starts.len() > 1 {
            let first = self.block_starts[1];
            let equal = self
                .block_starts
                .windows(2)
                .all(|w| w[1] - w[0] == first)
                && self.rows - self.block_starts[self.block_starts.len() - 1] == first;
            if equal {
                return first;
            }
        }
        if self.cols > 0 && self.rows > self.cols && self.rows % self.cols == 0 {
            return self.cols;
        }
        self.rows
    }

    /// Split into consecutive frames of `rows_per_frame` rows each.
    pub fn frames(&self, rows_per_frame: usize) -> LoadResult<Vec<Matrix>> {
        if rows_per_frame == 0 || self.rows % rows_per_frame != 0 {
            return Err(LoadError::FrameSplit {
                rows: self.rows,
                rows_per_frame,
            });
        }
        let frame_len = rows_per_frame * self.cols;
        Ok(self
            .data
            .chunks(frame_len.max(1))
            .map(|chunk| Matrix::from_parts(rows_per_frame, self.cols, chunk.to_vec(), vec![0]))
            .collect())
    }
}

// ---------------------------------------------------------------------------
// ValuesTable – per-timestep scalars
// ---------------------------------------------------------------------------

/// Known columns of `values.o`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueColumn {
    Step = 0,
    TimeMs = 1,
    WidthCm = 2,
    DepthCm = 3,
    EnergyJ = 4,
}

impl ValueColumn {
    pub const ALL: [ValueColumn; 5] = [
        ValueColumn::Step,
        ValueColumn::TimeMs,
        ValueColumn::WidthCm,
        ValueColumn::DepthCm,
        ValueColumn::EnergyJ,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Column name used for CSV export.
    pub fn name(self) -> &'static str {
        match self {
            ValueColumn::Step => "step",
            ValueColumn::TimeMs => "time_ms",
            ValueColumn::WidthCm => "width_cm",
            ValueColumn::DepthCm => "depth_cm",
            ValueColumn::EnergyJ => "energy_J",
        }
    }
}

impl fmt::Display for ValueColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The parsed `values.o` table. Column semantics follow [`ValueColumn`];
/// the column count itself is not enforced.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuesTable {
    pub matrix: Matrix,
}

impl ValuesTable {
    pub fn new(matrix: Matrix) -> Self {
        ValuesTable { matrix }
    }

    pub fn len(&self) -> usize {
        self.matrix.rows()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.rows() == 0
    }

    pub fn column(&self, col: ValueColumn) -> Option<Vec<f64>> {
        self.matrix.column(col.index())
    }

    pub fn time_ms(&self) -> Option<Vec<f64>> {
        self.column(ValueColumn::TimeMs)
    }

    pub fn width_cm(&self) -> Option<Vec<f64>> {
        self.column(ValueColumn::WidthCm)
    }

    pub fn depth_cm(&self) -> Option<Vec<f64>> {
        self.column(ValueColumn::DepthCm)
    }

    pub fn energy_j(&self) -> Option<Vec<f64>> {
        self.column(ValueColumn::EnergyJ)
    }
}

// ---------------------------------------------------------------------------
// SimulationDataset – everything one run wrote
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationDataset {
    pub temperature: Matrix,
    pub phase: Matrix,
    pub enthalpy: Matrix,
    pub values: ValuesTable,
}

/// Selects one of the three field matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Temperature,
    Phase,
    Enthalpy,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Temperature, Field::Phase, Field::Enthalpy];

    pub fn label(self) -> &'static str {
        match self {
            Field::Temperature => "Temperature (K)",
            Field::Phase => "Liquid Fraction",
            Field::Enthalpy => "Enthalpy",
        }
    }
}

impl SimulationDataset {
    pub fn field(&self, field: Field) -> &Matrix {
        match field {
            Field::Temperature => &self.temperature,
            Field::Phase => &self.phase,
            Field::Enthalpy => &self.enthalpy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stacked(frames: usize, n: usize) -> Matrix {
        let rows = (0..frames * n)
            .map(|r| (0..n).map(|c| (r * n + c) as f64).collect())
            .collect();
        Matrix::from_rows(rows).unwrap()
    }

    #[test]
    fn from_rows_rejects_ragged() {
        let err = Matrix::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).unwrap_err();
        assert!(err.is_parse());
        assert!(matches!(
            err,
            LoadError::UnevenRows {
                row: 1,
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn square_frames_are_inferred() {
        let m = stacked(3, 4);
        assert_eq!(m.shape(), (12, 4));
        assert_eq!(m.infer_frame_rows(), 4);
        let frames = m.frames(4).unwrap();
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[1].get(0, 0), Some(16.0));
    }

    #[test]
    fn single_frame_when_not_stacked() {
        let m = stacked(1, 3);
        assert_eq!(m.infer_frame_rows(), 3);
        assert_eq!(m.frames(3).unwrap().len(), 1);
    }

    #[test]
    fn blocks_take_precedence() {
        let m = Matrix::from_parts(4, 1, vec![1.0, 2.0, 3.0, 4.0], vec![0, 2]);
        assert_eq!(m.infer_frame_rows(), 2);
    }

    #[test]
    fn uneven_frames_error() {
        assert!(matches!(
            stacked(1, 3).frames(2),
            Err(LoadError::FrameSplit {
                rows: 3,
                rows_per_frame: 2
            })
        ));
    }

    #[test]
    fn values_columns() {
        let m = Matrix::from_rows(vec![
            vec![1.0, 0.5, 0.1, 0.2, 10.0],
            vec![2.0, 1.0, 0.15, 0.25, 20.0],
        ])
        .unwrap();
        let v = ValuesTable::new(m);
        assert_eq!(v.time_ms(), Some(vec![0.5, 1.0]));
        assert_eq!(v.energy_j(), Some(vec![10.0, 20.0]));
    }

    #[test]
    fn missing_value_column_is_none() {
        let v = ValuesTable::new(Matrix::from_rows(vec![vec![1.0, 2.0]]).unwrap());
        assert_eq!(v.depth_cm(), None);
    }

    #[test]
    fn min_max_skips_nan() {
        let m = Matrix::from_rows(vec![vec![f64::NAN, 3.0, -1.0]]).unwrap();
        assert_eq!(m.min_max(), Some((-1.0, 3.0)));
    }
}
