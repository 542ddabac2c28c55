use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid log domain: min={min}, max={max} (requires 0 < min < max)")]
    InvalidDomain { min: f64, max: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
