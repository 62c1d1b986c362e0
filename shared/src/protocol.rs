//! Wire format shared by client and server
//!
//! All messages are fixed-size records of little-endian `i32`, `u32` and
//! `f32` fields with no padding, encoded with bincode's default (fixed-int,
//! little-endian) configuration. There are no sequence numbers, acks or
//! checksums; every datagram stands on its own.
//!
//! | Direction        | Message       | Layout                                   |
//! |------------------|---------------|------------------------------------------|
//! | client -> server | join          | any bytes                                |
//! | server -> client | [`JoinReply`] | `i32 ship_id`                            |
//! | client -> server | [`InputMessage`] | `i32 ship_id, i32 message_type`       |
//! | server -> client | [`Snapshot`]  | `u32 ships, u32 others, ShipInfo[], OtherInfo[]` |

use crate::arena::EntityKind;
use crate::math::Vec2;
use bincode::{deserialize, serialize, serialize_into};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Payload the client sends to request a ship. The server ignores its content.
pub const JOIN_GREETING: &[u8] = b"Hello, server!";

pub const JOIN_REPLY_SIZE: usize = 4;
pub const INPUT_MESSAGE_SIZE: usize = 8;
pub const SNAPSHOT_HEADER_SIZE: usize = 8;
pub const SHIP_INFO_SIZE: usize = 40;
pub const OTHER_INFO_SIZE: usize = 32;

/// Largest datagram either side expects to receive.
pub const MAX_DATAGRAM_SIZE: usize = 65_507;

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("datagram too short: expected at least {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
    #[error("unknown message type {0}")]
    UnknownMessageType(i32),
    #[error("unknown entity kind {0}")]
    UnknownEntityKind(i32),
    #[error("entity id {0} is outside the arena")]
    InvalidSlot(i32),
    #[error("snapshot counts overflow the addressable size")]
    Oversized,
    #[error("codec error: {0}")]
    Codec(#[from] bincode::Error),
}

fn ensure_len(bytes: &[u8], expected: usize) -> Result<(), ProtocolError> {
    if bytes.len() < expected {
        return Err(ProtocolError::Truncated {
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}

/// Input events a client can send for its ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum MessageType {
    MoveUp = 0,
    MoveDown = 1,
    MoveLeft = 2,
    MoveRight = 3,
    Shoot = 4,
}

impl TryFrom<i32> for MessageType {
    type Error = ProtocolError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(MessageType::MoveUp),
            1 => Ok(MessageType::MoveDown),
            2 => Ok(MessageType::MoveLeft),
            3 => Ok(MessageType::MoveRight),
            4 => Ok(MessageType::Shoot),
            other => Err(ProtocolError::UnknownMessageType(other)),
        }
    }
}

/// Server reply to a join request carrying the assigned ship slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinReply {
    pub ship_id: i32,
}

impl JoinReply {
    pub fn encode(&self) -> Result<Vec<u8>, ProtocolError> {
        Ok(serialize(self)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, ProtocolError> {
        ensure_len(bytes, JOIN_REPLY_SIZE)?;
        Ok(deserialize(&bytes[..JOIN_REPLY_SIZE])?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputMessage {
    pub ship_id: i32,
    pub message_type: i32,
}

impl InputMessage {
    pub fn new(ship_id: i32, message_type: MessageType) -> Self {
        Self {
            ship_id,
            message_type: message_type as i32,
        }
    }

    pub fn kind(&self) -> Result<MessageType, ProtocolError> {
        MessageType::try_from(self.message_type)
    }

    pub fn encode(&self) -> Result<Vec<u8>, ProtocolError> {
        Ok(serialize(self)?)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, ProtocolError> {
        ensure_len(bytes, INPUT_MESSAGE_SIZE)?;
        let message: InputMessage = deserialize(&bytes[..INPUT_MESSAGE_SIZE])?;
        message.kind()?;
        Ok(message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipInfo {
    pub dead: i32,
    pub ship_id: i32,
    pub score: i32,
    pub lives: i32,
    pub scale: f32,
    pub position: Vec2,
    pub velocity: Vec2,
    pub heading: f32,
}

impl ShipInfo {
    pub fn is_dead(&self) -> bool {
        self.dead != 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OtherInfo {
    pub object_id: i32,
    pub kind: i32,
    pub scale: f32,
    pub position: Vec2,
    pub velocity: Vec2,
    pub heading: f32,
}

impl OtherInfo {
    pub fn entity_kind(&self) -> Result<EntityKind, ProtocolError> {
        EntityKind::from_wire(self.kind).ok_or(ProtocolError::UnknownEntityKind(self.kind))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct SnapshotHeader {
    ship_count: u32,
    other_count: u32,
}

/// One broadcast of every live ship and every other live entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub ships: Vec<ShipInfo>,
    pub others: Vec<OtherInfo>,
}

impl Snapshot {
    /// Exact payload size implied by the two counts.
    pub fn encoded_len_for(ship_count: usize, other_count: usize) -> Option<usize> {
        let ships = ship_count.checked_mul(SHIP_INFO_SIZE)?;
        let others = other_count.checked_mul(OTHER_INFO_SIZE)?;
        SNAPSHOT_HEADER_SIZE.checked_add(ships)?.checked_add(others)
    }

    pub fn encoded_len(&self) -> usize {
        SNAPSHOT_HEADER_SIZE + self.ships.len() * SHIP_INFO_SIZE + self.others.len() * OTHER_INFO_SIZE
    }

    pub fn encode(&self) -> Result<Vec<u8>, ProtocolError> {
        let header = SnapshotHeader {
            ship_count: u32::try_from(self.ships.len()).map_err(|_| ProtocolError::Oversized)?,
            other_count: u32::try_from(self.others.len()).map_err(|_| ProtocolError::Oversized)?,
        };

        let mut buffer = Vec::with_capacity(self.encoded_len());
        serialize_into(&mut buffer, &header)?;
        for ship in &self.ships {
            serialize_into(&mut buffer, ship)?;
        }
        for other in &self.others {
            serialize_into(&mut buffer, other)?;
        }

        Ok(buffer)
    }

    /// Decodes a snapshot datagram.
    ///
    /// The buffer must hold at least as many bytes as its own leading counts
    /// imply, and every other-object kind must be known. Any violation
    /// rejects the whole datagram.
    pub fn decode(bytes: &[u8]) -> Result<Self, ProtocolError> {
        ensure_len(bytes, SNAPSHOT_HEADER_SIZE)?;
        let header: SnapshotHeader = deserialize(&bytes[..SNAPSHOT_HEADER_SIZE])?;

        let ship_count = header.ship_count as usize;
        let other_count = header.other_count as usize;
        let expected =
            Self::encoded_len_for(ship_count, other_count).ok_or(ProtocolError::Oversized)?;
        ensure_len(bytes, expected)?;

        let ships_start = SNAPSHOT_HEADER_SIZE;
        let others_start = ships_start + ship_count * SHIP_INFO_SIZE;

        let ships = (0..ship_count)
            .map(|i| {
                let offset = ships_start + i * SHIP_INFO_SIZE;
                deserialize::<ShipInfo>(&bytes[offset..offset + SHIP_INFO_SIZE])
            })
            .collect::<Result<Vec<_>, _>>()?;

        let others = (0..other_count)
            .map(|i| {
                let offset = others_start + i * OTHER_INFO_SIZE;
                deserialize::<OtherInfo>(&bytes[offset..offset + OTHER_INFO_SIZE])
            })
            .collect::<Result<Vec<_>, _>>()?;

        for other in &others {
            other.entity_kind()?;
        }

        Ok(Snapshot { ships, others })
    }
}
