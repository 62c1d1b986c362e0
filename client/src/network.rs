//! Client network layer: join handshake, snapshot receiver and input sender

use crate::game::{ClientWorld, Scoreboard};
use log::{debug, error, info, warn};
use shared::protocol::{
    InputMessage, JoinReply, MessageType, ProtocolError, Snapshot, JOIN_GREETING,
    JOIN_REPLY_SIZE, MAX_DATAGRAM_SIZE,
};
use std::net::SocketAddr;
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};
use tokio::net::{lookup_host, UdpSocket};
use tokio::sync::mpsc;
use tokio::time::timeout;

/// A client that has completed the join handshake.
pub struct NetworkClient {
    socket: UdpSocket,
    server_addr: SocketAddr,
    ship_id: usize,
}

impl NetworkClient {
    /// Resolves `server`, sends a join request and waits up to
    /// `connect_timeout` for the ship id.
    pub async fn connect(
        server: &str,
        connect_timeout: Duration,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let server_addr = lookup_host(server)
            .await?
            .next()
            .ok_or_else(|| format!("could not resolve {}", server))?;

        let bind_addr = if server_addr.is_ipv4() {
            "0.0.0.0:0"
        } else {
            "[::]:0"
        };
        let socket = UdpSocket::bind(bind_addr).await?;

        info!("Joining {}", server_addr);
        socket.send_to(JOIN_GREETING, server_addr).await?;

        let ship_id = timeout(connect_timeout, Self::await_join_reply(&socket, server_addr))
            .await
            .map_err(|_| format!("no join reply from {} within {:?}", server_addr, connect_timeout))??;

        info!("Connected as ship {}", ship_id);
        Ok(NetworkClient {
            socket,
            server_addr,
            ship_id,
        })
    }

    /// Snapshots may overtake the reply, so anything that is not a join
    /// reply from the server is skipped.
    async fn await_join_reply(
        socket: &UdpSocket,
        server_addr: SocketAddr,
    ) -> Result<usize, Box<dyn std::error::Error>> {
        let mut buffer = [0u8; 64];
        loop {
            let (len, from) = socket.recv_from(&mut buffer).await?;
            if from != server_addr || len != JOIN_REPLY_SIZE {
                continue;
            }
            let reply = JoinReply::decode(&buffer[..len])?;
            return Ok(usize::try_from(reply.ship_id)
                .map_err(|_| format!("server assigned invalid ship id {}", reply.ship_id))?);
        }
    }

    pub fn ship_id(&self) -> usize {
        self.ship_id
    }

    pub fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    async fn send_input(&self, message: MessageType) -> Result<(), Box<dyn std::error::Error>> {
        let data = InputMessage::new(self.ship_id as i32, message).encode()?;
        self.socket.send_to(&data, self.server_addr).await?;
        Ok(())
    }

    /// Receives snapshots into the shared world and forwards queued input
    /// until the input channel closes.
    pub async fn run(
        self,
        world: &Mutex<ClientWorld>,
        scoreboard: &Mutex<Scoreboard>,
        mut inputs: mpsc::UnboundedReceiver<MessageType>,
    ) {
        let mut buffer = vec![0u8; MAX_DATAGRAM_SIZE];

        loop {
            tokio::select! {
                result = self.socket.recv_from(&mut buffer) => {
                    match result {
                        Ok((len, from)) if from == self.server_addr => {
                            if let Err(e) = apply_datagram(world, scoreboard, &buffer[..len], Instant::now()) {
                                warn!("Discarding snapshot: {}", e);
                            }
                        }
                        Ok((_, from)) => debug!("Ignoring datagram from {}", from),
                        Err(e) => error!("Error receiving packet: {}", e),
                    }
                },

                message = inputs.recv() => {
                    let Some(message) = message else {
                        info!("Input channel closed, stopping network loop");
                        break;
                    };
                    if let Err(e) = self.send_input(message).await {
                        error!("Error sending input: {}", e);
                    }
                },
            }
        }
    }
}

/// Decodes one snapshot datagram and applies it under both locks. A datagram
/// that fails to decode or validate leaves both untouched.
pub fn apply_datagram(
    world: &Mutex<ClientWorld>,
    scoreboard: &Mutex<Scoreboard>,
    data: &[u8],
    received_at: Instant,
) -> Result<(), ProtocolError> {
    let snapshot = Snapshot::decode(data)?;

    world
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .apply_snapshot(&snapshot, received_at)?;
    scoreboard
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .update(&snapshot);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::protocol::{OtherInfo, ShipInfo};
    use shared::{EntityKind, Vec2, WorldBounds};

    fn sample_snapshot() -> Snapshot {
        Snapshot {
            ships: vec![ShipInfo {
                dead: 0,
                ship_id: 2,
                score: 100,
                lives: 3,
                scale: 16.0,
                position: Vec2::new(1.0, 2.0),
                velocity: Vec2::ZERO,
                heading: 0.0,
            }],
            others: vec![OtherInfo {
                object_id: 0,
                kind: EntityKind::Asteroid.to_wire(),
                scale: 70.0,
                position: Vec2::new(-100.0, 0.0),
                velocity: Vec2::new(0.0, 50.0),
                heading: 0.0,
            }],
        }
    }

    #[test]
    fn test_apply_datagram_updates_world_and_scoreboard() {
        let world = Mutex::new(ClientWorld::new(WorldBounds::default()));
        let scoreboard = Mutex::new(Scoreboard::new(2));
        let data = sample_snapshot().encode().unwrap();

        apply_datagram(&world, &scoreboard, &data, Instant::now()).unwrap();

        let world = world.lock().unwrap();
        assert!(world.arena().is_active(0));
        assert!(world.arena().is_active(2));
        assert_eq!(scoreboard.lock().unwrap().score, 100);
    }

    #[test]
    fn test_truncated_datagram_is_discarded() {
        let world = Mutex::new(ClientWorld::new(WorldBounds::default()));
        let scoreboard = Mutex::new(Scoreboard::new(2));
        let data = sample_snapshot().encode().unwrap();

        let result = apply_datagram(&world, &scoreboard, &data[..data.len() - 4], Instant::now());

        assert!(matches!(result, Err(ProtocolError::Truncated { .. })));
        assert_eq!(world.lock().unwrap().arena().active_count(), 0);
        assert_eq!(*scoreboard.lock().unwrap(), Scoreboard::new(2));
    }

    #[tokio::test]
    async fn test_connect_times_out_without_server() {
        // Bound but silent peer
        let silent = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = silent.local_addr().unwrap().to_string();

        let result = NetworkClient::connect(&addr, Duration::from_millis(100)).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_connect_skips_non_reply_datagrams() {
        let server = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let addr = server.local_addr().unwrap().to_string();

        let fake_server = tokio::spawn(async move {
            let mut buf = [0u8; 64];
            let (_, client) = server.recv_from(&mut buf).await.unwrap();
            let snapshot = Snapshot::default().encode().unwrap();
            server.send_to(&snapshot, client).await.unwrap();
            let reply = JoinReply { ship_id: 7 }.encode().unwrap();
            server.send_to(&reply, client).await.unwrap();
        });

        let client = NetworkClient::connect(&addr, Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(client.ship_id(), 7);
        fake_server.await.unwrap();
    }
}
