//! Known client addresses and their ships
//!
//! A client is identified by the address its join datagram came from. Each
//! joined address is bound to exactly one ship slot for the lifetime of the
//! server; there is no disconnect or timeout handling.

use log::info;
use std::collections::HashMap;
use std::net::SocketAddr;

/// A joined client and the ship it controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Client {
    pub addr: SocketAddr,
    pub ship_id: usize,
}

/// Registry of joined clients bounded by a capacity limit.
pub struct ClientManager {
    clients: HashMap<SocketAddr, Client>,
    max_clients: usize,
}

impl ClientManager {
    pub fn new(max_clients: usize) -> Self {
        Self {
            clients: HashMap::new(),
            max_clients,
        }
    }

    pub fn is_full(&self) -> bool {
        self.clients.len() >= self.max_clients
    }

    /// Binds `addr` to `ship_id`.
    ///
    /// Returns false if the server is at capacity or the address already
    /// joined.
    pub fn add_client(&mut self, addr: SocketAddr, ship_id: usize) -> bool {
        if self.is_full() || self.clients.contains_key(&addr) {
            return false;
        }

        info!("Client {} joined with ship {}", addr, ship_id);
        self.clients.insert(addr, Client { addr, ship_id });
        true
    }

    pub fn find_client_by_addr(&self, addr: SocketAddr) -> Option<&Client> {
        self.clients.get(&addr)
    }

    /// Addresses that receive every broadcast.
    pub fn get_client_addrs(&self) -> Vec<SocketAddr> {
        self.clients.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
