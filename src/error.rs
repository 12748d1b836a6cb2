use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// Dataset could not be read, fetched or decoded.
    #[error("failed to load data: {0}")]
    LoadFailure(String),

    #[error("failed to export chart: {0}")]
    Export(String),
}
