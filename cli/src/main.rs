//! legacy-random CLI
//!
//! Reproduces engine streams from the command line:
//! - `legacy-random sample` - draw values from a seeded engine
//! - `legacy-random at` - draw from the positional stream at a block coordinate
//! - `legacy-random key` - draw from the positional stream of a string key
//! - `legacy-random hash-seed` - print the 128-bit seed of a string
//! - `legacy-random unique-seed` - print a process-unique seed

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

use legacy_random_core::rng::seed::{global_uniquifier, seed_from_hash_of, upgrade_seed_to_128bit};
use legacy_random_core::rng::{CompareAndSwap, LegacyRandom, StateCell, Unsynchronized};
use legacy_random_core::{
    BitSource, ConcurrencyGuard, EngineConfig, EngineVariant, RandomSource,
};

#[derive(Parser)]
#[command(name = "legacy-random")]
#[command(about = "Deterministic 48-bit LCG streams", version)]
struct Cli {
    /// JSON engine configuration
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw values from a seeded engine
    Sample {
        /// Seed (overrides the config)
        #[arg(long, allow_negative_numbers = true)]
        seed: Option<i64>,

        /// Number of values
        #[arg(short = 'n', long, default_value_t = 10)]
        count: usize,

        #[arg(long, value_enum, default_value_t = Kind::Int)]
        kind: Kind,

        /// Exclusive upper bound for `int` draws
        #[arg(long)]
        bound: Option<i32>,

        /// Use the lock-free engine (overrides the config)
        #[arg(long)]
        thread_safe: bool,
    },

    /// Draw from the positional stream at a block coordinate
    At {
        #[arg(long, allow_negative_numbers = true)]
        seed: i64,

        #[arg(allow_negative_numbers = true)]
        x: i32,
        #[arg(allow_negative_numbers = true)]
        y: i32,
        #[arg(allow_negative_numbers = true)]
        z: i32,

        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },

    /// Draw from the positional stream of a string key
    Key {
        #[arg(long, allow_negative_numbers = true)]
        seed: i64,

        key: String,

        #[arg(short = 'n', long, default_value_t = 1)]
        count: usize,
    },

    /// Print the 128-bit seed derived from a string
    HashSeed { input: String },

    /// Print a process-unique seed and its 128-bit expansion
    UniqueSeed,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Int,
    Long,
    Double,
    Float,
    Bool,
    Gaussian,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::Sample {
            seed,
            count,
            kind,
            bound,
            thread_safe,
        } => {
            let mut config = config;
            if seed.is_some() {
                config.seed = seed;
            }
            if thread_safe {
                config.variant = EngineVariant::ThreadSafe;
                config.detect_threading = false;
            }
            let guard = config.guard();
            match config.variant {
                EngineVariant::SingleThreaded => sample(
                    config.build::<Unsynchronized>(global_uniquifier())?,
                    guard.as_ref(),
                    count,
                    kind,
                    bound,
                ),
                EngineVariant::ThreadSafe => sample(
                    config.build::<CompareAndSwap>(global_uniquifier())?,
                    guard.as_ref(),
                    count,
                    kind,
                    bound,
                ),
            }
        }
        Commands::At {
            seed,
            x,
            y,
            z,
            count,
        } => {
            let factory = LegacyRandom::<Unsynchronized>::new(seed).fork_positional();
            tracing::debug!(factory_seed = factory.seed(), x, y, z, "positional stream");
            print_ints(&factory.at(x, y, z), count);
            Ok(())
        }
        Commands::Key { seed, key, count } => {
            let factory = LegacyRandom::<Unsynchronized>::new(seed).fork_positional();
            tracing::debug!(factory_seed = factory.seed(), key = %key, "keyed stream");
            print_ints(&factory.from_hash_of(&key), count);
            Ok(())
        }
        Commands::HashSeed { input } => {
            let seed = seed_from_hash_of(&input);
            println!("{}", serde_json::to_string(&seed)?);
            Ok(())
        }
        Commands::UniqueSeed => {
            let seed = global_uniquifier().next_seed();
            println!("{}", seed);
            println!("{}", serde_json::to_string(&upgrade_seed_to_128bit(seed))?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = EngineConfig::from_json(&json)
        .with_context(|| format!("Invalid config {}", path.display()))?;
    tracing::info!(config = %path.display(), "Loaded engine config");
    Ok(config)
}

fn sample<S: StateCell>(
    mut rng: LegacyRandom<S>,
    guard: Option<&ConcurrencyGuard>,
    count: usize,
    kind: Kind,
    bound: Option<i32>,
) -> Result<()> {
    if let Some(guard) = guard {
        guard.check_and_lock()?;
    }

    for _ in 0..count {
        match kind {
            Kind::Int => match bound {
                Some(bound) => println!("{}", rng.next_int_bounded(bound)?),
                None => println!("{}", rng.next_int()),
            },
            Kind::Long => println!("{}", rng.next_long()),
            Kind::Double => println!("{}", rng.next_double()),
            Kind::Float => println!("{}", rng.next_float()),
            Kind::Bool => println!("{}", rng.next_boolean()),
            Kind::Gaussian => println!("{}", rng.next_gaussian()),
        }
    }

    if let Some(guard) = guard {
        guard.check_and_unlock()?;
    }
    tracing::debug!(state = rng.state(), "final register");
    Ok(())
}

fn print_ints(rng: &impl BitSource, count: usize) {
    for _ in 0..count {
        println!("{}", rng.next_int());
    }
}
