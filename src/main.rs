use clap::Parser;
use rust_chess_uci::config::{self, EngineConfig};
use rust_chess_uci::engine::Engine;
use rust_chess_uci::error::EngineError;
use rust_chess_uci::uci::UciLoop;
use std::io::{self, BufReader};
use std::panic;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Name of a saved engine profile in the `profiles/` directory
    #[arg(long)]
    profile: Option<String>,

    /// Transposition table size in MiB
    #[arg(long)]
    hash: Option<usize>,

    /// Search depth used when `go` does not give one
    #[arg(long)]
    depth: Option<i32>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Standard output belongs to the UCI protocol.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();
    panic::set_hook(Box::new(tracing_panic::panic_hook));

    let mut config = match &args.profile {
        Some(name) => config::load_profile(name).map_err(|source| EngineError::Profile {
            name: name.clone(),
            source,
        })?,
        None => EngineConfig::default(),
    };
    if let Some(hash) = args.hash {
        config.hash_mb = hash;
    }
    if let Some(depth) = args.depth {
        config.default_depth = depth;
    }
    info!(?config, "starting engine");

    let engine = Engine::new(config);
    UciLoop::new(engine, io::stdout()).run(BufReader::new(io::stdin()))?;
    Ok(())
}
