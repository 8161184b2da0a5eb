use std::path::PathBuf;

/// Broad classification of a [`LoadError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// File or directory missing or unreadable.
    Io,
    /// File contents could not be turned into numbers.
    Parse,
}

pub type LoadResult<T> = Result<T, LoadError>;

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}:{line}: '{token}' is not a number")]
    Parse {
        path: PathBuf,
        line: usize,
        token: String,
    },

    #[error("{path}:{line}: expected {expected} values but found {found}")]
    Ragged {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("{path}:{line}: text is not valid UTF-8")]
    Encoding { path: PathBuf, line: usize },

    #[error("row {row} has {found} values, expected {expected}")]
    UnevenRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("{rows} rows cannot be split into frames of {rows_per_frame}")]
    FrameSplit { rows: usize, rows_per_frame: usize },

    #[error("{path}: file is empty, no header line to skip")]
    MissingHeader { path: PathBuf },

    #[error("Invalid dataset layout: {0}")]
    InvalidLayout(String),

    #[error("Layout file {path}: {source}")]
    LayoutFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("CSV error on {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl LoadError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            LoadError::Io { .. } | LoadError::Csv { .. } => ErrorClass::Io,
            LoadError::Parse { .. }
            | LoadError::Ragged { .. }
            | LoadError::Encoding { .. }
            | LoadError::UnevenRows { .. }
            | LoadError::FrameSplit { .. }
            | LoadError::MissingHeader { .. }
            | LoadError::InvalidLayout(_)
            | LoadError::LayoutFile { .. } => ErrorClass::Parse,
        }
    }

    pub fn is_io(&self) -> bool {
        self.class() == ErrorClass::Io
    }

    pub fn is_parse(&self) -> bool {
        self.class() == ErrorClass::Parse
    }
}
