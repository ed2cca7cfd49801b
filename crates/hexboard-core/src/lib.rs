//! Hexboard - state engine for an editable hex tile map
//!
//! This crate provides the board model behind a hex map editor, including:
//! - Hex coordinates and hexagon-shaped regions
//! - Tiles that hold terrain color, blocked terrain or a token
//! - Click and drag-and-drop gesture handling
//! - A sparse, versioned JSON save format
//!
//! # Architecture
//!
//! Drawing the board is left to the host. The host reads `Board::tile_views`,
//! forwards user gestures to an `InteractionController`, and redraws. It can be
//! compiled to:
//! - Native Rust for tools and tests
//! - WebAssembly for a browser front end (feature `wasm`)
//!
//! # Modules
//!
//! - [`hex`]: Axial coordinates and region generation
//! - [`tile`]: Tiles, tokens and their transitions
//! - [`board`]: The board, its palette and errors
//! - [`config`]: Board settings
//! - [`actions`]: Gesture arguments and resulting events
//! - [`interaction`]: The gesture state machine
//! - [`save`]: Save/load of versioned documents

pub mod actions;
pub mod board;
pub mod config;
pub mod hex;
pub mod interaction;
pub mod save;
pub mod tile;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use actions::{BoardAction, BoardEvent, DragPayload, DragStart};
pub use board::{Board, BoardError, Palette, TileView};
pub use config::BoardConfig;
pub use hex::HexCoord;
pub use interaction::InteractionController;
pub use save::{LoadReport, SaveDocument, TileRecord, SAVE_VERSION};
pub use tile::{Occupant, Tile, Token};
