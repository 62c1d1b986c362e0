//! Game server binary

use clap::Parser;
use log::{error, info};
use server::game::{GameState, ResolutionMode};
use server::network::Server;
use shared::{WorldBounds, INITIAL_ASTEROID_COUNT, WORLD_HEIGHT, WORLD_WIDTH};
use std::process;
use std::time::Duration;

/// Command line arguments for the authoritative server
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Server IP address to bind to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Server port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Tick rate (updates per second)
    #[arg(short, long, default_value = "60")]
    tick_rate: u32,

    /// Maximum number of ships
    #[arg(short, long, default_value = "4")]
    max_clients: usize,

    /// World width, centred on the origin
    #[arg(long, default_value_t = WORLD_WIDTH)]
    width: f32,

    /// World height, centred on the origin
    #[arg(long, default_value_t = WORLD_HEIGHT)]
    height: f32,

    /// Asteroids present when the server starts
    #[arg(short, long, default_value_t = INITIAL_ASTEROID_COUNT)]
    asteroids: usize,
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let args = Args::parse();

    if args.tick_rate == 0 {
        error!("Tick rate must be positive");
        process::exit(2);
    }

    let bounds = WorldBounds::centered(args.width, args.height);
    if !bounds.is_valid() {
        error!(
            "World size must be positive, got {}x{}",
            args.width, args.height
        );
        process::exit(2);
    }

    if let Err(e) = run(args).await {
        error!("Server error: {}", e);
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let addr = format!("{}:{}", args.host, args.port);
    let tick_duration = Duration::from_secs_f64(1.0 / args.tick_rate as f64);

    info!("Starting server on {} at {}Hz", addr, args.tick_rate);

    let world = GameState::new(
        WorldBounds::centered(args.width, args.height),
        ResolutionMode::ClientServer,
        args.asteroids,
    );
    let server = Server::new(&addr, tick_duration, args.max_clients, world).await?;

    tokio::select! {
        result = server.run() => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
        }
    }

    Ok(())
}
