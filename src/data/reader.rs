use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use super::error::{LoadError, LoadResult};
use super::model::{Matrix, ValuesTable};

/// Number of leading characters handed to [`Diagnostics::file_opened`].
const PREVIEW_CHARS: usize = 100;

// ---------------------------------------------------------------------------
// Diagnostics – optional caller-supplied instrumentation
// ---------------------------------------------------------------------------

/// Hooks a caller can pass to the readers to observe what they do.
///
/// Every method has an empty default so implementors only override what
/// they care about.
pub trait Diagnostics {
    /// Called once the file is open, with up to the first 100 characters.
    fn file_opened(&mut self, _path: &Path, _preview: &str) {}

    /// Called after a successful parse.
    fn file_parsed(&mut self, _path: &Path, _rows: usize, _cols: usize) {}
}

/// Does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDiagnostics;

impl Diagnostics for NoDiagnostics {}

/// Reports through the `log` facade at `info` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn file_opened(&mut self, path: &Path, preview: &str) {
        log::info!("Opened {}", path.display());
        log::debug!("First {PREVIEW_CHARS} characters: {preview:?}");
    }

    fn file_parsed(&mut self, path: &Path, rows: usize, cols: usize) {
        log::info!("Parsed {} as {rows}x{cols}", path.display());
    }
}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Read a headerless whitespace-delimited matrix file.
pub fn read_matrix(path: &Path) -> LoadResult<Matrix> {
    read_matrix_with(path, &mut NoDiagnostics)
}

/// Read a `values.o` style file: the first line is a header and is dropped.
pub fn read_values(path: &Path) -> LoadResult<ValuesTable> {
    read_values_with(path, &mut NoDiagnostics)
}

pub fn read_matrix_with(path: &Path, diag: &mut dyn Diagnostics) -> LoadResult<Matrix> {
    read_file(path, false, diag)
}

pub fn read_values_with(path: &Path, diag: &mut dyn Diagnostics) -> LoadResult<ValuesTable> {
    read_file(path, true, diag).map(ValuesTable::new)
}

fn read_file(path: &Path, skip_header: bool, diag: &mut dyn Diagnostics) -> LoadResult<Matrix> {
    let mut bytes = Vec::new();
    File::open(path)
        .and_then(|f| BufReader::new(f).read_to_end(&mut bytes))
        .map_err(|e| LoadError::io(path, e))?;

    // Undecodable bytes are bad content, not a failed read.
    let text = String::from_utf8(bytes).map_err(|e| {
        let valid = &e.as_bytes()[..e.utf8_error().valid_up_to()];
        LoadError::Encoding {
            path: path.to_path_buf(),
            line: valid.iter().filter(|&&b| b == b'\n').count() + 1,
        }
    })?;

    let preview: String = text.chars().take(PREVIEW_CHARS).collect();
    diag.file_opened(path, &preview);

    let matrix = parse_text(text.as_bytes(), path, skip_header)?;
    diag.file_parsed(path, matrix.rows(), matrix.cols());
    Ok(matrix)
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Parse whitespace-delimited numbers from any buffered source.
///
/// `path` is only used for error messages. Blank lines are skipped but
/// remembered as block boundaries. Line numbers in errors are 1-based and
/// count the header.
pub fn parse_text<R: BufRead>(reader: R, path: &Path, skip_header: bool) -> LoadResult<Matrix> {
    let mut lines = reader.lines().enumerate();

    if skip_header {
        match lines.next() {
            Some((_, Ok(_))) => {}
            Some((idx, Err(e))) => return Err(line_error(path, idx + 1, e)),
            None => {
                return Err(LoadError::MissingHeader {
                    path: path.to_path_buf(),
                })
            }
        }
    }

    let mut data = Vec::new();
    let mut cols: Option<usize> = None;
    let mut rows = 0usize;
    let mut block_starts = Vec::new();
    let mut after_blank = true;

    for (idx, line) in lines {
        let line_no = idx + 1;
        let line = line.map_err(|e| line_error(path, line_no, e))?;

        if line.trim().is_empty() {
            after_blank = true;
            continue;
        }

        let before = data.len();
        for token in line.split_whitespace() {
            let value = token.parse::<f64>().map_err(|_| LoadError::Parse {
                path: path.to_path_buf(),
                line: line_no,
                token: token.to_string(),
            })?;
            data.push(value);
        }
        let found = data.len() - before;

        match cols {
            None => cols = Some(found),
            Some(expected) if expected != found => {
                return Err(LoadError::Ragged {
                    path: path.to_path_buf(),
                    line: line_no,
                    expected,
                    found,
                });
            }
            Some(_) => {}
        }

        if after_blank {
            block_starts.push(rows);
            after_blank = false;
        }
        rows += 1;
    }

    Ok(Matrix::from_parts(
        rows,
        cols.unwrap_or(0),
        data,
        block_starts,
    ))
}

fn line_error(path: &Path, line: usize, e: std::io::Error) -> LoadError {
    if e.kind() == std::io::ErrorKind::InvalidData {
        LoadError::Encoding {
            path: path.to_path_buf(),
            line,
        }
    } else {
        LoadError::io(path, e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str, header: bool) -> LoadResult<Matrix> {
        parse_text(text.as_bytes(), Path::new("test.o"), header)
    }

    #[test]
    fn two_by_two() {
        let m = parse("1.0 2.0\n3.0 4.0\n", false).unwrap();
        assert_eq!(m.to_rows(), vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
    }

    #[test]
    fn blank_lines_are_not_rows() {
        let m = parse("\n1 2 3\n   \n4 5 6\n\n7 8 9", false).unwrap();
        assert_eq!(m.shape(), (3, 3));
        assert_eq!(m.block_starts(), &[0, 1, 2]);
    }

    #[test]
    fn mixed_whitespace_and_scientific_notation() {
        let m = parse("  1.5e3\t-2E-2   3\r\n", false).unwrap();
        assert_eq!(m.to_rows(), vec![vec![1500.0, -0.02, 3.0]]);
    }

    #[test]
    fn bad_token_is_a_parse_error() {
        let err = parse("1.0 2.0\n3.0 abc\n", false).unwrap_err();
        assert!(err.is_parse());
        match err {
            LoadError::Parse { line, token, .. } => {
                assert_eq!(line, 2);
                assert_eq!(token, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = parse("1 2 3\n4 5\n", false).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Ragged {
                line: 2,
                expected: 3,
                found: 2,
                ..
            }
        ));
    }

    #[test]
    fn header_is_dropped_whatever_it_contains() {
        let m = parse("1 2 3 4 5\n6 7 8 9 10\n", true).unwrap();
        assert_eq!(m.rows(), 1);
        assert_eq!(m.get(0, 0), Some(6.0));

        let m = parse("not numbers at all !!\n\n1 2\n", true).unwrap();
        assert_eq!(m.to_rows(), vec![vec![1.0, 2.0]]);
    }

    #[test]
    fn values_scenario() {
        let text = "step time width depth energy\n1 0.5 0.1 0.2 10.0\n2 1.0 0.15 0.25 20.0\n";
        let m = parse(text, true).unwrap();
        assert_eq!(
            m.to_rows(),
            vec![
                vec![1.0, 0.5, 0.1, 0.2, 10.0],
                vec![2.0, 1.0, 0.15, 0.25, 20.0]
            ]
        );
    }

    #[test]
    fn empty_values_file_has_no_header() {
        let err = parse("", true).unwrap_err();
        assert!(matches!(err, LoadError::MissingHeader { .. }));
        assert!(err.is_parse());
    }

    #[test]
    fn header_only_gives_empty_table() {
        let m = parse("step time width depth energy\n", true).unwrap();
        assert!(m.is_empty());
        assert_eq!(m.rows(), 0);
    }

    #[test]
    fn empty_matrix_file_is_empty() {
        let m = parse("\n\n", false).unwrap();
        assert_eq!(m.shape(), (0, 0));
    }

    #[derive(Default)]
    struct Recorder {
        previews: Vec<String>,
        parsed: Vec<(usize, usize)>,
    }

    impl Diagnostics for Recorder {
        fn file_opened(&mut self, _path: &Path, preview: &str) {
            self.previews.push(preview.to_string());
        }

        fn file_parsed(&mut self, _path: &Path, rows: usize, cols: usize) {
            self.parsed.push((rows, cols));
        }
    }

    #[test]
    fn diagnostics_see_preview_and_shape() {
        let dir = std::env::temp_dir().join(format!("weldpool_reader_diag_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("temp.o");
        let long_row = vec!["1.0"; 60].join(" ");
        std::fs::write(&path, format!("{long_row}\n{long_row}\n")).unwrap();

        let mut rec = Recorder::default();
        let m = read_matrix_with(&path, &mut rec).unwrap();
        assert_eq!(m.shape(), (2, 60));
        assert_eq!(rec.previews.len(), 1);
        assert_eq!(rec.previews[0].chars().count(), PREVIEW_CHARS);
        assert_eq!(rec.parsed, vec![(2, 60)]);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn undecodable_bytes_are_a_parse_error() {
        let dir = std::env::temp_dir().join(format!("weldpool_reader_utf8_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("temp.o");
        std::fs::write(&path, b"1.0 2.0\n1.0 \xff\n").unwrap();

        let err = read_matrix(&path).unwrap_err();
        assert!(err.is_parse(), "{err}");
        assert!(matches!(err, LoadError::Encoding { line: 2, .. }));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn undecodable_header_in_stream_is_a_parse_error() {
        let err = parse_text(&b"\xfe\xff\n1 2\n"[..], Path::new("values.o"), true).unwrap_err();
        assert!(matches!(err, LoadError::Encoding { line: 1, .. }));
    }

    #[test]
    fn missing_file_is_io() {
        let err = read_matrix(Path::new("/definitely/not/here/temp.o")).unwrap_err();
        assert!(err.is_io());
    }
}
