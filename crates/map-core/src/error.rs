use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{field} must be positive and finite, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("friction must lie strictly between 0 and 1, got {0}")]
    FrictionOutOfRange(f32),
    #[error("line color {0:?} is not a hex color")]
    BadLineColor(String),
}
