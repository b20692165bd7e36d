use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoverageError {
    #[error("invalid parameter '{name}': {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}
