//! rollcall - roll dice notation from the command line

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rollcall::{format_result, RollConfig};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Roll tabletop dice notation and narrate the outcome
#[derive(Parser, Debug)]
#[command(name = "rollcall", version, about = "Roll dice notation like 4d6dl1 or 6d10>7")]
struct Args {
    /// Dice notation, e.g. `2d6+3`, `2d20k1`, `4dF`, `10d10!`, `3d6ro<2`
    notation: String,

    /// TOML file with `max_dice` and `show_individual`
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for reproducible rolls
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the roll result as JSON instead of narrating it
    #[arg(long)]
    json: bool,
}

fn main() -> Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rollcall=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let config = RollConfig::load(args.config.as_deref())?;
    debug!(?config, "loaded config");

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let result = match rollcall::evaluate_with(&args.notation, &config, &mut rng) {
        Ok(result) => result,
        Err(e) => {
            info!(notation = %args.notation, error = ?e, "rejected notation");
            eprintln!("{e}");
            return Ok(ExitCode::FAILURE);
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", format_result(&result, config.show_individual));
    }

    Ok(ExitCode::SUCCESS)
}
