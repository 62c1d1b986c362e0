//! Server network layer: input ingress and the fixed-tick broadcast loop

use crate::client_manager::ClientManager;
use crate::game::GameState;
use log::{debug, error, info, warn};
use shared::protocol::{InputMessage, JoinReply, INPUT_MESSAGE_SIZE};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::UdpSocket;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

/// Authoritative server bound to one UDP socket.
///
/// Cloning is cheap and shares the socket, client list and game state, which
/// is how the receiver task and the tick loop reach the same world.
#[derive(Clone)]
pub struct Server {
    socket: Arc<UdpSocket>,
    clients: Arc<RwLock<ClientManager>>,
    game_state: Arc<Mutex<GameState>>,
    tick_duration: Duration,
}

impl Server {
    pub async fn new(
        addr: &str,
        tick_duration: Duration,
        max_clients: usize,
        game_state: GameState,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let socket = Arc::new(UdpSocket::bind(addr).await?);
        info!("Server listening on {}", socket.local_addr()?);

        Ok(Server {
            socket,
            clients: Arc::new(RwLock::new(ClientManager::new(max_clients))),
            game_state: Arc::new(Mutex::new(game_state)),
            tick_duration,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    pub fn game_state(&self) -> Arc<Mutex<GameState>> {
        Arc::clone(&self.game_state)
    }

    /// Fixed simulation step, also used to scale every input event.
    pub fn tick_dt(&self) -> f32 {
        self.tick_duration.as_secs_f32()
    }

    /// Spawns the task that blocks on the socket and applies each datagram
    /// as soon as it arrives.
    fn spawn_network_receiver(&self) -> JoinHandle<()> {
        let server = self.clone();

        tokio::spawn(async move {
            let mut buffer = [0u8; 2048];

            loop {
                match server.socket.recv_from(&mut buffer).await {
                    Ok((len, addr)) => server.handle_datagram(&buffer[..len], addr).await,
                    Err(e) => {
                        error!("Error receiving packet: {}", e);
                        tokio::time::sleep(Duration::from_millis(10)).await;
                    }
                }
            }
        })
    }

    /// Routes one datagram. Unknown senders are joining; known senders are
    /// sending input.
    pub async fn handle_datagram(&self, data: &[u8], addr: SocketAddr) {
        let known = {
            let clients = self.clients.read().await;
            clients.find_client_by_addr(addr).is_some()
        };

        if known {
            self.handle_input(data, addr).await;
        } else {
            self.handle_join(addr).await;
        }
    }

    async fn handle_join(&self, addr: SocketAddr) {
        let ship_id = {
            let mut clients = self.clients.write().await;
            if clients.is_full() {
                warn!("Ignoring join from {}: server full", addr);
                return;
            }

            let Some(ship_id) = self.game_state.lock().await.add_ship() else {
                warn!("Ignoring join from {}: no free ship slot", addr);
                return;
            };
            clients.add_client(addr, ship_id);
            ship_id
        };

        let reply = JoinReply {
            ship_id: ship_id as i32,
        };
        match reply.encode() {
            Ok(data) => {
                if let Err(e) = self.socket.send_to(&data, addr).await {
                    error!("Failed to send join reply to {}: {}", addr, e);
                }
            }
            Err(e) => error!("Failed to encode join reply: {}", e),
        }
    }

    async fn handle_input(&self, data: &[u8], addr: SocketAddr) {
        if data.len() != INPUT_MESSAGE_SIZE {
            warn!(
                "Malformed datagram from {} ({} bytes), ignoring",
                addr,
                data.len()
            );
            return;
        }

        let message = match InputMessage::decode(data) {
            Ok(message) => message,
            Err(e) => {
                warn!("Bad input from {}: {}", addr, e);
                return;
            }
        };

        let (Ok(ship_id), Ok(kind)) = (usize::try_from(message.ship_id), message.kind()) else {
            warn!("Bad input from {}: {:?}", addr, message);
            return;
        };

        let applied = {
            let mut state = self.game_state.lock().await;
            state.apply_input(ship_id, kind, self.tick_dt())
        };
        if !applied {
            debug!("Input {:?} for ship {} not in play", kind, ship_id);
        }
    }

    /// Encodes the current world once and sends it to every client. Send
    /// failures are logged and skipped.
    pub async fn broadcast_snapshot(&self) {
        let snapshot = self.game_state.lock().await.build_snapshot();

        let data = match snapshot.encode() {
            Ok(data) => data,
            Err(e) => {
                error!("Failed to encode snapshot: {}", e);
                return;
            }
        };

        let addrs = {
            let clients = self.clients.read().await;
            clients.get_client_addrs()
        };

        for addr in addrs {
            if let Err(e) = self.socket.send_to(&data, addr).await {
                error!("Failed to send snapshot to {}: {}", addr, e);
            }
        }
    }

    /// Main server loop: step the world every tick and broadcast it.
    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let mut receiver = self.spawn_network_receiver();

        let mut tick_interval = interval(self.tick_duration);
        tick_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last_tick = Instant::now();
        let dt = self.tick_dt();

        info!("Server started successfully");

        loop {
            tokio::select! {
                _ = tick_interval.tick() => {
                    let now = Instant::now();
                    let elapsed = now.duration_since(last_tick);
                    last_tick = now;

                    let tick = {
                        let mut state = self.game_state.lock().await;
                        state.step(dt);
                        state.tick
                    };
                    self.broadcast_snapshot().await;

                    if tick % 60 == 0 {
                        let client_count = self.clients.read().await.len();
                        debug!(
                            "Tick {}: {} clients, {:.1}Hz",
                            tick,
                            client_count,
                            1.0 / elapsed.as_secs_f32().max(f32::EPSILON)
                        );
                    }
                },

                result = &mut receiver => {
                    error!("Network receiver stopped");
                    result?;
                    break;
                },
            }
        }

        Ok(())
    }
}
