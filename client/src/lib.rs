//! # Asteroids Client Library
//!
//! Thin client for the networked asteroids game. It samples the keyboard,
//! forwards each input event to the server and renders a local mirror of the
//! world that is kept smooth between snapshots by dead reckoning.
//!
//! ## Architecture Overview
//!
//! The client holds no authority. Everything it draws comes from the last
//! snapshot, extrapolated along the reported velocities and gradually
//! corrected towards each new snapshot over the measured interval between
//! snapshots. Spawns, removals and respawns appear as soon as the snapshot
//! that carries them is applied.
//!
//! Two threads cooperate:
//!
//! - **Frame loop** (macroquad): samples input, advances the mirror by the
//!   frame time and draws it.
//! - **Network task** (tokio): applies every received snapshot and sends the
//!   queued input events.
//!
//! The world mirror and the scoreboard sit behind separate locks so neither
//! thread holds one across a blocking call.
//!
//! A `--local` run skips the network entirely and drives the server's
//! simulation directly in the frame loop, with the single-process hit rules.
//!
//! ## Module Organization
//!
//! - `game`: world mirror, dead-reckoning corrections and the scoreboard
//! - `input`: keyboard sampling into input events
//! - `local`: single-process game driver
//! - `network`: join handshake, snapshot receiver and input sender
//! - `rendering`: draw sink for entities and the HUD
//! - `session`: local or networked game behind one frame-loop interface
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use client::game::{ClientWorld, Scoreboard};
//! use client::network::NetworkClient;
//! use shared::WorldBounds;
//! use std::sync::Mutex;
//! use std::time::Duration;
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let connection = NetworkClient::connect("127.0.0.1:8080", Duration::from_secs(5)).await?;
//!
//!     let world = Mutex::new(ClientWorld::new(WorldBounds::default()));
//!     let scoreboard = Mutex::new(Scoreboard::new(connection.ship_id()));
//!     let (_inputs, input_rx) = mpsc::unbounded_channel();
//!
//!     connection.run(&world, &scoreboard, input_rx).await;
//!     Ok(())
//! }
//! ```

pub mod game;
pub mod input;
pub mod local;
pub mod network;
pub mod rendering;
pub mod session;
