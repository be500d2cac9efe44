//! Rooms and the in-memory room catalog.
//!
//! The catalog is a thin collaborator: it hands out opaque [`RoomId`]s and
//! keeps room codes unique. The ledger only ever sees the ids.

use crate::error::{Error, Result};
use crate::ledger::ReadingLedger;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, stable room identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(uuid::Uuid);

impl RoomId {
    /// Generate a fresh random identifier.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Wrap an existing UUID (e.g. one read back from storage).
    pub fn from_uuid(id: uuid::Uuid) -> Self {
        Self(id)
    }
}

impl Default for RoomId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A rented room with its fixed monthly fees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Stable identifier
    pub id: RoomId,
    /// Short human-facing label, e.g. "01"
    pub code: String,
    /// Monthly rent
    pub rent: u64,
    /// Monthly trash/security fee
    pub trash_security: u64,
}

impl Room {
    /// Create a room with a fresh identifier.
    pub fn new(code: impl Into<String>, rent: u64, trash_security: u64) -> Self {
        Self {
            id: RoomId::new(),
            code: code.into(),
            rent,
            trash_security,
        }
    }

    /// Caption printed on the receipt, e.g. "Room: 01".
    pub fn caption(&self) -> String {
        format!("Room: {}", self.code)
    }
}

/// Rooms ordered by code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomCatalog {
    rooms: Vec<Room>,
}

impl RoomCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a catalog from previously persisted rooms.
    pub fn from_rooms(mut rooms: Vec<Room>) -> Self {
        rooms.sort_by(|a, b| a.code.cmp(&b.code));
        Self { rooms }
    }

    /// Add a room; the code is trimmed and must be non-empty and unique.
    pub fn add(&mut self, code: &str, rent: u64, trash_security: u64) -> Result<&Room> {
        let code = code.trim();
        if code.is_empty() {
            return Err(Error::EmptyRoomCode);
        }
        if self.rooms.iter().any(|r| r.code == code) {
            return Err(Error::DuplicateRoomCode(code.to_string()));
        }

        let room = Room::new(code, rent, trash_security);
        let id = room.id;
        self.rooms.push(room);
        self.rooms.sort_by(|a, b| a.code.cmp(&b.code));
        self.get(id).ok_or_else(|| Error::UnknownRoom(id.to_string()))
    }

    /// Look up a room by id.
    pub fn get(&self, id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    /// Look up a room by its code.
    pub fn by_code(&self, code: &str) -> Option<&Room> {
        self.rooms.iter().find(|r| r.code == code.trim())
    }

    /// Remove a room and cascade the deletion to its ledger records.
    pub fn remove(&mut self, id: RoomId, ledger: &mut ReadingLedger) -> Result<Room> {
        let pos = self
            .rooms
            .iter()
            .position(|r| r.id == id)
            .ok_or_else(|| Error::UnknownRoom(id.to_string()))?;
        let removed = self.rooms.remove(pos);
        let dropped = ledger.remove_room(id);
        log::debug!("Removed room {} and {} reading records", removed.code, dropped);
        Ok(removed)
    }

    /// All rooms, ordered by code.
    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    /// Number of rooms.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }
}
