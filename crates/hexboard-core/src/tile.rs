//! Tiles and the tokens placed on them.
//!
//! A tile is always in exactly one of three modes: plain terrain, blocked terrain,
//! or holding a token. The mode is an enum so a blocked tile can never also carry a
//! token. Terrain color is stored as a palette index; the color itself is looked up
//! through the owning board's palette.

use crate::hex::HexCoord;
use serde::{Deserialize, Serialize};

/// Normalise any integer angle into `0..360` degrees
pub fn normalize_rotation(degrees: i64) -> u16 {
    degrees.rem_euclid(360) as u16
}

/// A placeable game piece
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Image reference handed to the renderer (URL or asset path)
    pub image: String,
    /// Label shown as the tile's title
    pub label: String,
    /// Orientation in degrees, always in `0..360`
    pub rotation: u16,
}

impl Token {
    /// Create a token, wrapping the rotation into `0..360`
    pub fn new(image: impl Into<String>, label: impl Into<String>, rotation: i32) -> Self {
        Self {
            image: image.into(),
            label: label.into(),
            rotation: normalize_rotation(rotation as i64),
        }
    }
}

/// What currently sits on a tile
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Occupant {
    /// Plain terrain, clicks cycle its color
    #[default]
    Empty,
    /// Impassable terrain drawn at the given rotation
    Blocked { rotation: u16 },
    /// A token sits on the tile
    Token(Token),
}

/// A single hex tile on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    coord: HexCoord,
    color_index: usize,
    occupant: Occupant,
}

impl Tile {
    /// Create a default tile: plain terrain, first palette color, no token
    pub fn new(coord: HexCoord) -> Self {
        Self {
            coord,
            color_index: 0,
            occupant: Occupant::Empty,
        }
    }

    /// Position on the hex grid; fixed for the tile's lifetime
    pub fn coord(&self) -> HexCoord {
        self.coord
    }

    /// Index of the terrain color in the board palette
    pub fn color_index(&self) -> usize {
        self.color_index
    }

    pub fn occupant(&self) -> &Occupant {
        &self.occupant
    }

    pub fn is_blocked(&self) -> bool {
        matches!(self.occupant, Occupant::Blocked { .. })
    }

    pub fn token(&self) -> Option<&Token> {
        match &self.occupant {
            Occupant::Token(token) => Some(token),
            _ => None,
        }
    }

    pub fn has_token(&self) -> bool {
        self.token().is_some()
    }

    /// Rotation of the blocked terrain piece, 0 for any other mode
    pub fn rotation(&self) -> u16 {
        match self.occupant {
            Occupant::Blocked { rotation } => rotation,
            _ => 0,
        }
    }

    /// True when nothing about this tile differs from a freshly created one
    pub fn is_default(&self) -> bool {
        self.color_index == 0 && self.occupant == Occupant::Empty
    }

    // ==================== Transitions ====================

    /// Advance to the next palette color. Only plain terrain cycles.
    ///
    /// Returns whether the color changed.
    pub fn cycle_color(&mut self, palette_len: usize) -> bool {
        if self.occupant != Occupant::Empty || palette_len == 0 {
            return false;
        }
        self.color_index = (self.color_index + 1) % palette_len;
        true
    }

    /// Turn blocked terrain by `step` degrees. Returns whether the tile turned.
    pub fn rotate_blocked(&mut self, step: u16) -> bool {
        match &mut self.occupant {
            Occupant::Blocked { rotation } => {
                *rotation = normalize_rotation(*rotation as i64 + step as i64);
                true
            }
            _ => false,
        }
    }

    /// Put a token on the tile, replacing any token already there.
    ///
    /// Blocked tiles refuse tokens, and so does every tile for a token without an
    /// image. Returns whether the token was placed.
    pub fn place_token(&mut self, token: Token) -> bool {
        if self.is_blocked() || token.image.is_empty() {
            return false;
        }
        self.occupant = Occupant::Token(token);
        true
    }

    /// Remove the token, if any. Returns the removed token.
    pub fn clear_token(&mut self) -> Option<Token> {
        if self.has_token() {
            match std::mem::take(&mut self.occupant) {
                Occupant::Token(token) => Some(token),
                _ => None,
            }
        } else {
            None
        }
    }

    /// Switch between plain and blocked terrain.
    ///
    /// A tile holding a token cannot be blocked. Blocking starts at rotation 0 and
    /// unblocking forgets the rotation. Returns whether the mode changed.
    pub fn set_blocked(&mut self, blocked: bool) -> bool {
        match (&self.occupant, blocked) {
            (Occupant::Empty, true) => {
                self.occupant = Occupant::Blocked { rotation: 0 };
                true
            }
            (Occupant::Blocked { .. }, false) => {
                self.occupant = Occupant::Empty;
                true
            }
            _ => false,
        }
    }

    /// Overwrite the tile's state wholesale. Used when restoring saved records.
    pub(crate) fn restore(&mut self, color_index: usize, occupant: Occupant) {
        self.color_index = color_index;
        self.occupant = occupant;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PALETTE_LEN: usize = 5;

    fn token() -> Token {
        Token::new("/assets/knight.png", "Knight", 90)
    }

    #[test]
    fn test_new_tile_is_default() {
        let tile = Tile::new(HexCoord::new(1, -1));
        assert!(tile.is_default());
        assert!(!tile.is_blocked());
        assert!(!tile.has_token());
        assert_eq!(tile.color_index(), 0);
        assert_eq!(tile.coord(), HexCoord::new(1, -1));
    }

    #[test]
    fn test_cycle_color_wraps_after_palette_len() {
        let mut tile = Tile::new(HexCoord::ORIGIN);
        tile.cycle_color(PALETTE_LEN);
        tile.cycle_color(PALETTE_LEN);
        let start = tile.clone();

        for _ in 0..PALETTE_LEN {
            assert!(tile.cycle_color(PALETTE_LEN));
        }
        assert_eq!(tile, start);
    }

    #[test]
    fn test_cycle_color_ignored_on_blocked_and_token_tiles() {
        let mut blocked = Tile::new(HexCoord::ORIGIN);
        blocked.set_blocked(true);
        assert!(!blocked.cycle_color(PALETTE_LEN));
        assert_eq!(blocked.color_index(), 0);

        let mut occupied = Tile::new(HexCoord::ORIGIN);
        occupied.place_token(token());
        assert!(!occupied.cycle_color(PALETTE_LEN));
        assert_eq!(occupied.color_index(), 0);
    }

    #[test]
    fn test_rotate_blocked_steps_modulo_360() {
        let mut tile = Tile::new(HexCoord::ORIGIN);
        tile.set_blocked(true);

        for expected in [60, 120, 180, 240, 300, 0] {
            assert!(tile.rotate_blocked(60));
            assert_eq!(tile.rotation(), expected);
        }
    }

    #[test]
    fn test_rotate_ignored_when_not_blocked() {
        let mut tile = Tile::new(HexCoord::ORIGIN);
        assert!(!tile.rotate_blocked(60));
        assert_eq!(tile.rotation(), 0);
        assert!(tile.is_default());
    }

    #[test]
    fn test_place_then_clear_restores_previous_state() {
        let mut tile = Tile::new(HexCoord::ORIGIN);
        tile.cycle_color(PALETTE_LEN);
        let before = tile.clone();

        assert!(tile.place_token(token()));
        assert_eq!(tile.color_index(), 1);
        assert_eq!(tile.clear_token(), Some(token()));
        assert_eq!(tile, before);
    }

    #[test]
    fn test_place_token_overwrites() {
        let mut tile = Tile::new(HexCoord::ORIGIN);
        tile.place_token(token());
        let dragon = Token::new("/assets/dragon.png", "Dragon", 0);
        assert!(tile.place_token(dragon.clone()));
        assert_eq!(tile.token(), Some(&dragon));
    }

    #[test]
    fn test_place_token_refused_on_blocked_tile() {
        let mut tile = Tile::new(HexCoord::ORIGIN);
        tile.set_blocked(true);
        assert!(!tile.place_token(token()));
        assert!(tile.is_blocked());
        assert!(!tile.has_token());
    }

    #[test]
    fn test_place_token_refuses_empty_image() {
        let mut tile = Tile::new(HexCoord::ORIGIN);
        assert!(!tile.place_token(Token::new("", "Nameless", 0)));
        assert!(tile.is_default());

        tile.place_token(token());
        assert!(!tile.place_token(Token::new("", "Nameless", 0)));
        assert_eq!(tile.token(), Some(&token()));
    }

    #[test]
    fn test_clear_token_is_idempotent() {
        let mut tile = Tile::new(HexCoord::ORIGIN);
        tile.place_token(token());
        tile.clear_token();
        let once = tile.clone();
        assert_eq!(tile.clear_token(), None);
        assert_eq!(tile, once);
    }

    #[test]
    fn test_clear_token_leaves_blocked_tile_alone() {
        let mut tile = Tile::new(HexCoord::ORIGIN);
        tile.set_blocked(true);
        tile.rotate_blocked(120);
        assert_eq!(tile.clear_token(), None);
        assert!(tile.is_blocked());
        assert_eq!(tile.rotation(), 120);
    }

    #[test]
    fn test_cannot_block_tile_with_token() {
        let mut tile = Tile::new(HexCoord::ORIGIN);
        tile.place_token(token());
        assert!(!tile.set_blocked(true));
        assert!(tile.has_token());
    }

    #[test]
    fn test_unblock_forgets_rotation() {
        let mut tile = Tile::new(HexCoord::ORIGIN);
        tile.set_blocked(true);
        tile.rotate_blocked(60);
        assert!(tile.set_blocked(false));
        assert!(tile.is_default());

        tile.set_blocked(true);
        assert_eq!(tile.rotation(), 0);
    }

    #[test]
    fn test_token_rotation_is_normalised() {
        assert_eq!(Token::new("a", "b", -90).rotation, 270);
        assert_eq!(Token::new("a", "b", 720).rotation, 0);
        assert_eq!(normalize_rotation(-360), 0);
    }
}
