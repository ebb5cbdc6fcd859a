use thiserror::Error;

/// Errors raised by cell access on a [`Board`](crate::board::Board).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("cell ({row}, {column}) is outside the {rows}x{columns} board")]
    OutOfRange {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },
}

/// Invalid startup configuration. Always fatal, reported before the app starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: i64 },
    #[error("{field} of {value} is too large")]
    TooLarge { field: &'static str, value: i64 },
    #[error("a {rows}x{columns} board of {cell_size}px cells does not fit in pixel coordinates")]
    LayoutOverflow {
        rows: usize,
        columns: usize,
        cell_size: u32,
    },
    #[error("malformed board size {0:?}, expected ROWSxCOLUMNS")]
    MalformedSize(String),
}
