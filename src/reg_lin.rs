use std::fmt;

use crate::error::FitError;

pub const DEFAULT_ITERATIONS: usize = 1000;
pub const DEFAULT_LEARNING_RATE: f64 = 0.01;

/// One observed point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: f64,
    pub y: f64,
}

impl Sample {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Sample {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Slope and intercept of `y = m * x + c`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LineParams {
    pub m: f64,
    pub c: f64,
}

impl LineParams {
    pub fn predict(&self, x: f64) -> f64 {
        self.m * x + self.c
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hyperparameters {
    iterations: usize,
    learning_rate: f64,
}

impl Hyperparameters {
    /// Rejects negative iteration counts and learning rates that are not
    /// strictly positive and finite.
    pub fn new(iterations: i64, learning_rate: f64) -> Result<Self, FitError> {
        let iterations = usize::try_from(iterations).map_err(|_| {
            FitError::InvalidHyperparameter(format!(
                "iteration count must not be negative, got {iterations}"
            ))
        })?;

        if !(learning_rate.is_finite() && learning_rate > 0.) {
            return Err(FitError::InvalidHyperparameter(format!(
                "learning rate must be positive and finite, got {learning_rate}"
            )));
        }

        Ok(Self {
            iterations,
            learning_rate,
        })
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }
}

impl Default for Hyperparameters {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            learning_rate: DEFAULT_LEARNING_RATE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient {
    pub dm: f64,
    pub dc: f64,
}

/// Per-iteration telemetry. `cost` is evaluated at the parameters produced
/// by this iteration's update.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct IterationRecord {
    pub iteration: usize,
    pub m: f64,
    pub c: f64,
    pub cost: f64,
}

impl IterationRecord {
    pub fn params(&self) -> LineParams {
        LineParams {
            m: self.m,
            c: self.c,
        }
    }
}

impl fmt::Display for IterationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cost({:.2}, {:.2}) = {:.2}", self.m, self.c, self.cost)
    }
}

/// Mean squared error: `1/N * sum((y - (m*x + c))^2)`.
///
/// Callers guarantee `samples` is non-empty; an empty slice yields NaN.
pub fn cost(samples: &[Sample], params: LineParams) -> f64 {
    let sum: f64 = samples
        .iter()
        .map(|s| {
            let d = s.y - params.predict(s.x);
            d * d
        })
        .sum();

    sum / samples.len() as f64
}

/// Partial derivatives of [`cost`]:
///
/// ```text
/// dm = 2/N * sum(-x * (y - (m*x + c)))
/// dc = 2/N * sum(-(y - (m*x + c)))
/// ```
pub fn gradient(samples: &[Sample], params: LineParams) -> Gradient {
    let (dm, dc) = samples.iter().fold((0., 0.), |(dm, dc), s| {
        let d = s.y - params.predict(s.x);
        (dm - s.x * d, dc - d)
    });

    let n = samples.len() as f64;

    Gradient {
        dm: 2. / n * dm,
        dc: 2. / n * dc,
    }
}

/// Batch gradient descent as a finite, lazy sequence of iteration records.
///
/// Every call to `next` performs exactly one update. Dropping the iterator
/// before it is exhausted stops the fit; `params` holds the last update.
#[derive(Debug)]
pub struct Descent<'a> {
    samples: &'a [Sample],
    hyperparameters: Hyperparameters,
    params: LineParams,
    iteration: usize,
}

impl<'a> Descent<'a> {
    pub fn new(samples: &'a [Sample], hyperparameters: Hyperparameters) -> Result<Self, FitError> {
        if samples.is_empty() {
            return Err(FitError::DegenerateInput);
        }

        Ok(Self {
            samples,
            hyperparameters,
            params: LineParams::default(),
            iteration: 0,
        })
    }

    pub fn params(&self) -> LineParams {
        self.params
    }
}

impl Iterator for Descent<'_> {
    type Item = IterationRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.iteration >= self.hyperparameters.iterations {
            return None;
        }

        let alpha = self.hyperparameters.learning_rate;
        let Gradient { dm, dc } = gradient(self.samples, self.params);

        self.params.m -= alpha * dm;
        self.params.c -= alpha * dc;

        let record = IterationRecord {
            iteration: self.iteration,
            m: self.params.m,
            c: self.params.c,
            cost: cost(self.samples, self.params),
        };

        self.iteration += 1;

        Some(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.hyperparameters.iterations - self.iteration;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Descent<'_> {}

/// Runs the full descent, handing every iteration record to `observer`.
pub fn fit_with<F>(
    samples: &[Sample],
    hyperparameters: Hyperparameters,
    mut observer: F,
) -> Result<LineParams, FitError>
where
    F: FnMut(&IterationRecord),
{
    let mut descent = Descent::new(samples, hyperparameters)?;

    for record in descent.by_ref() {
        observer(&record);
    }

    Ok(descent.params())
}

pub fn fit(samples: &[Sample], hyperparameters: Hyperparameters) -> Result<LineParams, FitError> {
    fit_with(samples, hyperparameters, |_| {})
}
