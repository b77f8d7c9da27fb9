pub mod data;
pub mod error;
pub mod plots;
pub mod reg_lin;

pub use error::{FitError, LoadError};
pub use reg_lin::{fit, fit_with, Descent, Hyperparameters, IterationRecord, LineParams, Sample};
