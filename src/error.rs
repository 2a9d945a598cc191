use thiserror::Error;

pub type AxisResult<T> = Result<T, AxisError>;

#[derive(Debug, Error)]
pub enum AxisError {
    #[error("invalid axis configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid view size: width={width}, height={height}")]
    InvalidView { width: f64, height: f64 },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}
