use thiserror::Error;

#[derive(Debug, Error)]
pub enum CareerError {
    #[error("{field} is out of range: {value} (expected {expected})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, CareerError>;
