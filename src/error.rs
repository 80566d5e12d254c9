use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to parse search box configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid search box configuration: {0}")]
    InvalidConfig(String),

    /// An explicit grid spacing must be strictly positive.
    #[error("grid step size must be greater than zero, got {0}")]
    ZeroStepSize(f64),

    #[error("probe radius must be non-negative, got {0}")]
    NegativeProbe(f64),

    #[error("{field} = {value} is outside [{min}, {max}]")]
    FieldOutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}
