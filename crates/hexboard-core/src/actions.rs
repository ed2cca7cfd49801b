//! Gestures a user can perform on the board.
//!
//! This module defines typed arguments for every gesture and the events that
//! result from applying them.

use crate::hex::HexCoord;
use crate::tile::Token;
use serde::{Deserialize, Serialize};

/// What a drag carries from its source tile to the drop target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragPayload {
    pub token: Token,
}

impl From<Token> for DragPayload {
    fn from(token: Token) -> Self {
        Self { token }
    }
}

/// Outcome of starting a drag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragStart {
    /// The source holds a token; the payload travels with the gesture
    Accepted(DragPayload),
    /// Nothing to pick up; the host should cancel the gesture
    Rejected,
}

impl DragStart {
    pub fn payload(&self) -> Option<&DragPayload> {
        match self {
            DragStart::Accepted(payload) => Some(payload),
            DragStart::Rejected => None,
        }
    }
}

/// Every gesture the controller understands
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardAction {
    /// Click a tile: rotate blocked terrain or cycle plain terrain color
    Click(HexCoord),
    /// Flip a tile between plain and blocked terrain
    ToggleBlocked(HexCoord),
    /// Begin dragging the token on a tile
    DragStart(HexCoord),
    /// Drag passes over a tile
    DragOver(HexCoord),
    /// Drag released over a tile
    Drop {
        source: HexCoord,
        target: HexCoord,
        payload: Option<DragPayload>,
    },
    /// Drag finished; `success` is the host's verdict on the drop
    DragEnd { source: HexCoord, success: bool },
}

/// Changes (and refusals) that result from gestures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardEvent {
    /// Plain terrain moved to the next palette color
    ColorCycled { coord: HexCoord, color_index: usize },

    /// Blocked terrain turned
    TileRotated { coord: HexCoord, rotation: u16 },

    /// A tile switched between plain and blocked terrain
    BlockedChanged { coord: HexCoord, blocked: bool },

    /// A drag was allowed to begin
    DragAccepted { source: HexCoord, payload: DragPayload },

    /// A drag was refused because the source holds no token
    DragRejected { source: HexCoord },

    /// A token landed on a tile
    TokenPlaced {
        source: HexCoord,
        target: HexCoord,
        token: Token,
    },

    /// A drop was refused; the host should end the drag unsuccessfully
    DropRejected { target: HexCoord },

    /// A token left its source tile after a successful drag
    TokenCleared { coord: HexCoord, token: Token },
}
