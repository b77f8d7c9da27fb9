use std::ops::Range;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::reg_lin::{LineParams, Sample};

/// The fitted line is previewed over this x interval.
pub const LINE_PREVIEW_X: Range<f64> = 0.0..20.0;

pub struct MinMax<T> {
    pub min: T,
    pub max: T,
}

pub fn find_max_min<T: std::cmp::PartialOrd + Copy>(
    mut data: impl Iterator<Item = T>,
) -> Option<MinMax<T>> {
    let first = data.next()?;

    Some(data.fold(MinMax { min: first, max: first }, |acc, x| MinMax {
        min: if x < acc.min { x } else { acc.min },
        max: if x > acc.max { x } else { acc.max },
    }))
}

fn padded(MinMax { min, max }: MinMax<f64>) -> Range<f64> {
    let pad = ((max - min) * 0.05).max(1.);
    (min - pad)..(max + pad)
}

/// Axis ranges covering every sample plus both ends of the preview segment.
/// Non-finite values are ignored so a diverged fit still renders the samples.
pub fn fit_ranges(samples: &[Sample], line: LineParams) -> (Range<f64>, Range<f64>) {
    let ends = [
        (LINE_PREVIEW_X.start, line.predict(LINE_PREVIEW_X.start)),
        (LINE_PREVIEW_X.end, line.predict(LINE_PREVIEW_X.end)),
    ];

    let points = samples
        .iter()
        .map(|s| (s.x, s.y))
        .chain(ends)
        .filter(|(x, y)| x.is_finite() && y.is_finite());

    let x = find_max_min(points.clone().map(|(x, _)| x)).unwrap_or(MinMax { min: 0., max: 1. });
    let y = find_max_min(points.map(|(_, y)| y)).unwrap_or(MinMax { min: 0., max: 1. });

    (padded(x), padded(y))
}

/// Scatter of the samples (red crosses) overlaid with the fitted line from
/// `x = 0` to `x = 20`.
pub fn plot_fit<DB>(
    samples: &[Sample],
    line: LineParams,
    caption: &str,
    drawing_area: &DrawingArea<DB, Shift>,
) -> Result<(), Box<dyn std::error::Error>>
where
    DB: DrawingBackend,
    <DB as DrawingBackend>::ErrorType: 'static,
{
    drawing_area.fill(&WHITE)?;

    let (x_range, y_range) = fit_ranges(samples, line);

    let mut chart_context = ChartBuilder::on(drawing_area)
        .caption(caption, ("Arial", 15))
        .set_all_label_area_size(30)
        .margin(10)
        .build_cartesian_2d(x_range, y_range)?;

    chart_context
        .configure_mesh()
        .x_labels(5)
        .x_desc("x")
        .y_labels(5)
        .y_desc("y")
        .draw()?;

    chart_context.draw_series(
        samples
            .iter()
            .map(|s| Cross::new((s.x, s.y), 3, RED.stroke_width(1))),
    )?;

    chart_context.draw_series(LineSeries::new(
        [LINE_PREVIEW_X.start, LINE_PREVIEW_X.end].map(|x| (x, line.predict(x))),
        &BLUE,
    ))?;

    Ok(())
}

pub fn plot_cost_history<DB>(
    costs: &[f64],
    label: &str,
    drawing_area: &DrawingArea<DB, Shift>,
) -> Result<(), Box<dyn std::error::Error>>
where
    DB: DrawingBackend,
    <DB as DrawingBackend>::ErrorType: 'static,
{
    drawing_area.fill(&WHITE)?;

    let finite = costs.iter().copied().filter(|c| c.is_finite() && *c > 0.);
    let MinMax { min, max } = find_max_min(finite).unwrap_or(MinMax { min: 1e-3, max: 1. });

    let mut chart_context = ChartBuilder::on(drawing_area)
        .caption(label, ("Arial", 20))
        .set_all_label_area_size(70)
        .margin(50)
        .build_cartesian_2d(0..costs.len().max(1), (min..max * 1.1).log_scale())?;

    chart_context
        .configure_mesh()
        .x_labels(10)
        .x_desc("Iteration")
        .y_labels(10)
        .y_desc(label)
        .y_label_formatter(&|y| format!("{:.1e}", y))
        .draw()?;

    let losses = LineSeries::new(
        costs
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_finite() && **c > 0.)
            .map(|(i, &c)| (i, c)),
        BLUE.filled(),
    );

    chart_context.draw_series(losses)?;

    Ok(())
}
