use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Normal, Uniform};

use gradient_line_fit::data::write_samples;
use gradient_line_fit::Sample;

/// Writes noisy samples of `y = slope * x + intercept` in the `x,y` format.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[clap(short, long, default_value = "data.txt")]
    output: PathBuf,

    #[clap(short = 'n', long, default_value_t = 100)]
    count: usize,

    #[clap(long, default_value_t = 2.0, allow_negative_numbers = true)]
    slope: f64,

    #[clap(long, default_value_t = 3.0, allow_negative_numbers = true)]
    intercept: f64,

    #[clap(long, default_value_t = 1.0)]
    noise: f64,

    #[clap(long, default_value_t = 0.0, allow_negative_numbers = true)]
    x_min: f64,

    #[clap(long, default_value_t = 10.0, allow_negative_numbers = true)]
    x_max: f64,

    #[clap(long)]
    seed: Option<u64>,
}

fn check_x_range(x_min: f64, x_max: f64) -> Result<(), String> {
    if !x_min.is_finite() || !x_max.is_finite() {
        return Err(format!("x range bounds must be finite, got {x_min}..{x_max}"));
    }

    if x_min >= x_max {
        return Err(format!("empty x range {x_min}..{x_max}"));
    }

    Ok(())
}

fn generate_dataset<R: Rng>(
    rng: &mut R,
    args: &Args,
) -> Result<Vec<Sample>, Box<dyn std::error::Error>> {
    check_x_range(args.x_min, args.x_max)?;

    let uniform = Uniform::new(args.x_min, args.x_max);
    let noise = Normal::new(0., args.noise)?;

    let dataset = (0..args.count)
        .map(|_| {
            let x = rng.sample(&uniform);
            let y = args.slope * x + args.intercept + rng.sample(&noise);
            Sample::new(x, y)
        })
        .collect();

    Ok(dataset)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let dataset = generate_dataset(&mut rng, &args)?;

    let file = File::create(&args.output)?;
    write_samples(BufWriter::new(file), &dataset)?;

    info!(
        "wrote {} samples of y = {} * x + {} to {}",
        dataset.len(),
        args.slope,
        args.intercept,
        args.output.display()
    );

    Ok(())
}
