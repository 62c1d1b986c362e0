use clap::Parser;
use client::game::{ClientWorld, Scoreboard};
use client::input::InputManager;
use client::local::LocalGame;
use client::network::NetworkClient;
use client::rendering::Renderer;
use client::session::{NetworkedSession, Session, SessionStatus};
use log::{error, info};
use macroquad::prelude::*;
use shared::{WorldBounds, INITIAL_ASTEROID_COUNT, WORLD_HEIGHT, WORLD_WIDTH};
use std::process;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server address to connect to
    #[arg(short = 's', long, default_value = "127.0.0.1:8080")]
    server: String,

    /// Window and world width
    #[arg(short = 'w', long, default_value_t = WORLD_WIDTH)]
    width: f32,

    /// Window and world height (no short flag to avoid conflict with --help)
    #[arg(long, default_value_t = WORLD_HEIGHT)]
    height: f32,

    /// How long to wait for the join reply
    #[arg(long, default_value = "5000")]
    connect_timeout_ms: u64,

    /// Run the simulation in this process instead of connecting
    #[arg(long)]
    local: bool,
}

fn window_conf() -> Conf {
    // Conf is built before main runs, so the size comes from argv here too
    let args = Args::parse();
    Conf {
        window_title: "Asteroids".to_owned(),
        window_width: args.width.max(1.0) as i32,
        window_height: args.height.max(1.0) as i32,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    if std::env::var("RUST_LOG").is_err() {
        eprintln!("Set RUST_LOG=info for detailed logging");
    }

    let args = Args::parse();
    let bounds = WorldBounds::centered(args.width, args.height);
    if !bounds.is_valid() {
        error!(
            "World size must be positive, got {}x{}",
            args.width, args.height
        );
        process::exit(2);
    }
    let renderer = Renderer::new(args.width, args.height);

    info!("Controls: Up/Down to thrust, Left/Right to turn, Space to shoot");

    // The runtime must outlive the session when networked
    let (mut session, _runtime) = if args.local {
        info!("Starting single-process game");
        (Session::Local(LocalGame::new(bounds, INITIAL_ASTEROID_COUNT)), None)
    } else {
        let (session, runtime) = connect(&args, bounds);
        (session, Some(runtime))
    };

    let mut input = InputManager::new();

    loop {
        if session.update(input.update(), get_frame_time()) == SessionStatus::Disconnected {
            error!("Network task stopped");
            process::exit(1);
        }
        session.draw(&renderer);

        next_frame().await
    }
}

/// Joins the server and starts the network task. Setup failures are fatal.
fn connect(args: &Args, bounds: WorldBounds) -> (Session, Runtime) {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to start network runtime: {}", e);
            process::exit(1);
        }
    };

    info!("Connecting to: {}", args.server);
    let connect_timeout = Duration::from_millis(args.connect_timeout_ms);
    let connection = match runtime.block_on(NetworkClient::connect(&args.server, connect_timeout)) {
        Ok(connection) => connection,
        Err(e) => {
            error!("Failed to join {}: {}", args.server, e);
            process::exit(1);
        }
    };

    let world = Arc::new(Mutex::new(ClientWorld::new(bounds)));
    let scoreboard = Arc::new(Mutex::new(Scoreboard::new(connection.ship_id())));
    let (inputs, input_rx) = mpsc::unbounded_channel();

    let task_world = Arc::clone(&world);
    let task_scoreboard = Arc::clone(&scoreboard);
    runtime.spawn(async move {
        connection
            .run(&task_world, &task_scoreboard, input_rx)
            .await;
    });

    let session = Session::Networked(NetworkedSession {
        world,
        scoreboard,
        inputs,
    });
    (session, runtime)
}
