use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid plot box: width={width}, height={height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("column {column} has {actual} entries, expected {expected}")]
    ColumnLengthMismatch {
        column: usize,
        expected: usize,
        actual: usize,
    },

    #[error("unknown field `{0}`")]
    UnknownField(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
