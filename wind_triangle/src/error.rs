use thiserror::Error;

pub type SolverResult<T> = Result<T, WindTriangleError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum WindTriangleError {
    #[error("Invalid argument {name} = {value}: {reason}")]
    InvalidArgument {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    #[error("Wind direction is variable, no single direction to correct for")]
    VariableWind,
    #[error("Unsupported wind speed unit {0}, only knots are accepted")]
    UnsupportedUnit(&'static str),
    #[error("Failed to parse wind group: {0}")]
    WindGroupParse(#[from] nom::error::Error<String>),
}
