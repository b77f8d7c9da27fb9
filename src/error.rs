use std::path::PathBuf;

/// Validation failures raised before the descent loop starts.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FitError {
    #[error("cannot fit a line to zero samples")]
    DegenerateInput,

    #[error("invalid hyperparameter: {0}")]
    InvalidHyperparameter(String),
}

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("could not open {}: {}", .path.display(), .source)]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
