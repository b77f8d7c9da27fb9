use std::path::PathBuf;

use clap::Parser;
use log::info;
use plotters::prelude::*;

use gradient_line_fit::data::read_samples;
use gradient_line_fit::plots::{plot_cost_history, plot_fit};
use gradient_line_fit::reg_lin::{DEFAULT_ITERATIONS, DEFAULT_LEARNING_RATE};
use gradient_line_fit::{fit_with, Hyperparameters, IterationRecord};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// number of iterations
    #[clap(short = 'n', long, default_value_t = DEFAULT_ITERATIONS as i64, allow_negative_numbers = true)]
    iterations: i64,

    #[clap(short, long, default_value_t = DEFAULT_LEARNING_RATE, allow_negative_numbers = true)]
    learning_rate: f64,

    #[clap(short, long, default_value = "data.txt")]
    input: PathBuf,

    #[clap(short, long, default_value = "out.png")]
    output: PathBuf,

    #[clap(long, default_value_t = 256)]
    width: u32,

    #[clap(long, default_value_t = 256)]
    height: u32,

    /// also render the per-iteration cost to this image
    #[clap(long)]
    cost_plot: Option<PathBuf>,

    /// dump every iteration record as csv
    #[clap(long)]
    history: Option<PathBuf>,

    /// don't print the per-iteration cost lines
    #[clap(short, long)]
    quiet: bool,
}

/// Iteration records are only kept when something consumes them afterwards.
fn record_buffer(args: &Args) -> Option<Vec<IterationRecord>> {
    (args.cost_plot.is_some() || args.history.is_some()).then(Vec::new)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let hyperparameters = Hyperparameters::new(args.iterations, args.learning_rate)?;

    info!("reading samples from {}..", args.input.display());
    let samples = read_samples(&args.input)?;
    info!("loaded {} samples", samples.len());

    let mut records = record_buffer(&args);

    let line = fit_with(&samples, hyperparameters, |record| {
        if !args.quiet {
            println!("{record}");
        }
        if let Some(records) = records.as_mut() {
            records.push(*record);
        }
    })?;
    let records = records.unwrap_or_default();

    info!("fitted y = {} * x + {}", line.m, line.c);

    {
        let drawing_area =
            BitMapBackend::new(&args.output, (args.width, args.height)).into_drawing_area();

        plot_fit(&samples, line, "gradient descent fit", &drawing_area)?;

        drawing_area.present()?;
    }
    info!("plot written to {}", args.output.display());

    if let Some(path) = &args.cost_plot {
        let costs: Vec<f64> = records.iter().map(|r| r.cost).collect();

        let drawing_area = BitMapBackend::new(path, (800, 600)).into_drawing_area();
        plot_cost_history(&costs, "Cost", &drawing_area)?;
        drawing_area.present()?;

        info!("cost plot written to {}", path.display());
    }

    if let Some(path) = &args.history {
        let mut writer = csv::Writer::from_path(path)?;
        for record in &records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        info!("history written to {}", path.display());
    }

    Ok(())
}
