//! Game board representation.
//!
//! This module contains:
//! - The terrain color palette
//! - The board: one tile per coordinate of a hexagon-shaped region
//! - The render view handed to whatever draws the board
//! - `BoardError`, shared by every board operation

use crate::config::{BoardConfig, MAX_RADIUS};
use crate::hex::HexCoord;
use crate::tile::{Occupant, Tile, Token};
use serde::Serialize;
use std::collections::HashMap;
use thiserror::Error;
use tracing::info;

/// Errors that can occur when querying, loading or configuring a board
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("No tile at {0}")]
    NotFound(HexCoord),

    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("Unsupported schema version {found} (supported up to {supported})")]
    VersionMismatch { found: u32, supported: u32 },

    #[error("Invalid tile record: {0}")]
    InvalidRecord(String),

    #[error("Invalid board config: {0}")]
    InvalidConfig(String),
}

/// Ordered terrain colors. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette(Vec<String>);

impl Palette {
    /// Create a palette, rejecting an empty color list
    pub fn new(colors: Vec<String>) -> Result<Self, BoardError> {
        if colors.is_empty() {
            return Err(BoardError::InvalidConfig("palette must not be empty".into()));
        }
        Ok(Self(colors))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Never true for a constructed palette
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Color for a palette index, wrapping indexes past the end
    pub fn color(&self, index: usize) -> &str {
        &self.0[index % self.0.len()]
    }

    pub fn colors(&self) -> &[String] {
        &self.0
    }
}

/// Everything a renderer needs to draw one tile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TileView<'a> {
    pub coord: HexCoord,
    pub is_blocked: bool,
    pub display_color: &'a str,
    pub token: Option<&'a Token>,
    /// Blocked-terrain rotation, or token rotation for token tiles
    pub rotation: u16,
}

/// The complete game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Tiles in generation order
    tiles: Vec<Tile>,
    /// Position of each tile in `tiles`
    index: HashMap<HexCoord, usize>,
    palette: Palette,
    radius: u32,
    rotation_step: u16,
}

impl Board {
    /// Create a default board covering a hexagon of the given radius.
    ///
    /// Radii above `MAX_RADIUS` are clamped to it; use `with_config` to have them
    /// rejected instead.
    pub fn create_default(radius: u32) -> Self {
        // The default palette and rotation step always validate
        let config = BoardConfig::with_radius(radius.min(MAX_RADIUS));
        Self::build(&config, Palette(config.palette.clone()))
    }

    /// Create a default board from validated settings
    pub fn with_config(config: &BoardConfig) -> Result<Self, BoardError> {
        config.validate()?;
        let palette = Palette::new(config.palette.clone())?;
        Ok(Self::build(config, palette))
    }

    fn build(config: &BoardConfig, palette: Palette) -> Self {
        let tiles: Vec<Tile> = HexCoord::hexagon(config.radius)
            .into_iter()
            .map(Tile::new)
            .collect();
        let index = tiles
            .iter()
            .enumerate()
            .map(|(i, tile)| (tile.coord(), i))
            .collect();

        Self {
            tiles,
            index,
            palette,
            radius: config.radius,
            rotation_step: config.rotation_step,
        }
    }

    // ==================== Query Methods ====================

    /// Get a tile by coordinate
    pub fn find_tile(&self, coord: &HexCoord) -> Result<&Tile, BoardError> {
        self.index
            .get(coord)
            .map(|&i| &self.tiles[i])
            .ok_or(BoardError::NotFound(*coord))
    }

    /// Get a tile by coordinate for mutation through its own operations
    pub fn find_tile_mut(&mut self, coord: &HexCoord) -> Result<&mut Tile, BoardError> {
        match self.index.get(coord) {
            Some(&i) => Ok(&mut self.tiles[i]),
            None => Err(BoardError::NotFound(*coord)),
        }
    }

    /// Whether the coordinate lies inside the board's region
    pub fn contains(&self, coord: &HexCoord) -> bool {
        self.index.contains_key(coord)
    }

    /// All tiles, in the same order on every call
    pub fn all_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn rotation_step(&self) -> u16 {
        self.rotation_step
    }

    /// Terrain color of a tile, derived from its palette index
    pub fn terrain_color(&self, tile: &Tile) -> &str {
        self.palette.color(tile.color_index())
    }

    /// Per-tile render data, in `all_tiles` order
    pub fn tile_views(&self) -> Vec<TileView<'_>> {
        self.tiles
            .iter()
            .map(|tile| TileView {
                coord: tile.coord(),
                is_blocked: tile.is_blocked(),
                display_color: self.terrain_color(tile),
                token: tile.token(),
                rotation: match tile.occupant() {
                    Occupant::Blocked { rotation } => *rotation,
                    Occupant::Token(token) => token.rotation,
                    Occupant::Empty => 0,
                },
            })
            .collect()
    }

    /// Number of tiles that differ from their default state
    pub fn modified_count(&self) -> usize {
        self.tiles.iter().filter(|t| !t.is_default()).count()
    }

    // ==================== Mutation Methods ====================

    /// Return every tile to its default state. The region and palette are kept.
    pub fn reset(&mut self) {
        for tile in &mut self.tiles {
            *tile = Tile::new(tile.coord());
        }
        info!(radius = self.radius, tiles = self.tiles.len(), "board reset");
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::create_default(crate::config::DEFAULT_RADIUS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_board_has_37_tiles() {
        let board = Board::create_default(3);
        assert_eq!(board.len(), 37);
        assert_eq!(board.len(), 3 * 3 * 3 + 3 * 3 + 1);
        for tile in board.all_tiles() {
            assert!(tile.is_default());
            assert!(!tile.is_blocked());
            assert!(!tile.has_token());
            assert_eq!(board.terrain_color(tile), "transparent");
        }
    }

    #[test]
    fn test_create_default_is_deterministic() {
        let a: Vec<HexCoord> = Board::create_default(2).all_tiles().map(|t| t.coord()).collect();
        let b: Vec<HexCoord> = Board::create_default(2).all_tiles().map(|t| t.coord()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_all_tiles_is_restartable() {
        let board = Board::default();
        let first: Vec<_> = board.all_tiles().map(|t| t.coord()).collect();
        let second: Vec<_> = board.all_tiles().map(|t| t.coord()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_find_tile() {
        let board = Board::create_default(3);
        let tile = board.find_tile(&HexCoord::new(3, -3)).unwrap();
        assert_eq!(tile.coord(), HexCoord::new(3, -3));
    }

    #[test]
    fn test_find_tile_outside_region() {
        let mut board = Board::create_default(3);
        let outside = HexCoord::new(4, 0);
        assert_eq!(board.find_tile(&outside), Err(BoardError::NotFound(outside)));
        assert!(board.find_tile_mut(&outside).is_err());
        assert!(!board.contains(&outside));
    }

    #[test]
    fn test_terrain_color_follows_index() {
        let mut board = Board::default();
        let len = board.palette().len();
        let coord = HexCoord::new(1, 0);
        board.find_tile_mut(&coord).unwrap().cycle_color(len);
        let tile = board.find_tile(&coord).unwrap();
        assert_eq!(board.terrain_color(tile), "#ffffff");
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut board = Board::default();
        let len = board.palette().len();
        board.find_tile_mut(&HexCoord::ORIGIN).unwrap().cycle_color(len);
        board.find_tile_mut(&HexCoord::new(0, 1)).unwrap().set_blocked(true);
        board
            .find_tile_mut(&HexCoord::new(1, 1))
            .unwrap()
            .place_token(Token::new("a.png", "A", 0));
        assert_eq!(board.modified_count(), 3);

        board.reset();
        assert_eq!(board, Board::default());
        board.reset();
        assert_eq!(board, Board::default());
    }

    #[test]
    fn test_with_config_validates() {
        let mut config = BoardConfig::default();
        config.palette.clear();
        assert!(matches!(
            Board::with_config(&config),
            Err(BoardError::InvalidConfig(_))
        ));

        let config = BoardConfig {
            radius: 1,
            palette: vec!["red".into(), "blue".into()],
            rotation_step: 90,
            allow_editing: true,
        };
        let board = Board::with_config(&config).unwrap();
        assert_eq!(board.len(), 7);
        assert_eq!(board.palette().len(), 2);
        assert_eq!(board.rotation_step(), 90);
    }

    #[test]
    fn test_oversized_radius_rejected() {
        let config = BoardConfig::with_radius(u32::MAX);
        assert!(matches!(
            Board::with_config(&config),
            Err(BoardError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_tile_views() {
        let mut board = Board::create_default(1);
        let blocked = HexCoord::new(0, -1);
        let occupied = HexCoord::new(1, 0);
        {
            let tile = board.find_tile_mut(&blocked).unwrap();
            tile.set_blocked(true);
            tile.rotate_blocked(120);
        }
        board
            .find_tile_mut(&occupied)
            .unwrap()
            .place_token(Token::new("k.png", "Knight", 30));

        let views = board.tile_views();
        assert_eq!(views.len(), 7);

        let blocked_view = views.iter().find(|v| v.coord == blocked).unwrap();
        assert!(blocked_view.is_blocked);
        assert_eq!(blocked_view.rotation, 120);
        assert_eq!(blocked_view.token, None);

        let token_view = views.iter().find(|v| v.coord == occupied).unwrap();
        assert_eq!(token_view.rotation, 30);
        assert_eq!(token_view.token.map(|t| t.label.as_str()), Some("Knight"));
        assert_eq!(token_view.display_color, "transparent");
    }

    #[test]
    fn test_palette_rejects_empty() {
        assert!(Palette::new(Vec::new()).is_err());
        let palette = Palette::new(vec!["a".into(), "b".into()]).unwrap();
        assert_eq!(palette.color(1), "b");
        assert_eq!(palette.color(2), "a");
    }
}
