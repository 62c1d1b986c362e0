//! # Asteroids Server Library
//!
//! Authoritative server for the networked asteroids game. It owns the only
//! true copy of the world, applies client input the moment it arrives and
//! broadcasts a full snapshot of every live entity once per tick.
//!
//! ## Core Responsibilities
//!
//! ### Authoritative Simulation
//! Ships, bullets and asteroids live in a fixed-capacity arena. Each tick the
//! server integrates motion, runs the swept collision pass between asteroids
//! and ships or bullets, resolves hits and then wraps or culls whatever left
//! the screen. Clients never decide a collision.
//!
//! ### Client Management
//! The first datagram from an unknown address is a join request. The server
//! allocates a ship, remembers the address and replies with the ship id.
//! Joins beyond the configured capacity are ignored.
//!
//! ### State Broadcasting
//! After every step the world is encoded once and sent best-effort to every
//! known address. Nothing is acknowledged or retried; a lost snapshot is
//! simply superseded by the next one.
//!
//! ## Architecture Design
//!
//! Two async tasks share one [`game::GameState`] behind a mutex:
//!
//! - **Network Receiver**: blocks on the socket and applies joins and input
//!   events directly to the world.
//! - **Tick Loop**: steps the world at a fixed rate and broadcasts it.
//!
//! ## Module Organization
//!
//! - `client_manager`: joined addresses and their ship ids
//! - `game`: arena, ship records, hit resolution and snapshot building
//! - `network`: socket ownership, ingress and the broadcast loop
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use server::game::{GameState, ResolutionMode};
//! use server::network::Server;
//! use shared::WorldBounds;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let world = GameState::new(WorldBounds::default(), ResolutionMode::ClientServer, 4);
//!
//!     // 60Hz, up to four ships
//!     let server = Server::new("127.0.0.1:8080", Duration::from_millis(16), 4, world).await?;
//!     server.run().await?;
//!
//!     Ok(())
//! }
//! ```

pub mod client_manager;
pub mod game;
pub mod network;
