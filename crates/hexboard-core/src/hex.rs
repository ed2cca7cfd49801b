//! Hex coordinate system using axial coordinates (q, r).
//!
//! The board only needs a small slice of hex geometry: a stable identity for each
//! cell, validation of cube triples coming from saved documents, and generation of
//! the hexagon-shaped region the board covers. Pixel layout belongs to the renderer.

use serde::{Deserialize, Serialize};

/// Axial coordinate for hex grid.
///
/// In axial coordinates:
/// - `q` increases going east (right)
/// - `r` increases going southeast
/// - The third coordinate `s` (not stored) satisfies: q + r + s = 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct HexCoord {
    /// Column (increases going east)
    pub q: i32,
    /// Row (increases going southeast)
    pub r: i32,
}

impl HexCoord {
    /// The origin of the grid
    pub const ORIGIN: HexCoord = HexCoord::new(0, 0);

    /// Create a new hex coordinate
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Build from a full cube triple, rejecting triples that do not sum to zero
    pub const fn from_cube(q: i32, r: i32, s: i32) -> Option<Self> {
        if q + r + s == 0 {
            Some(Self { q, r })
        } else {
            None
        }
    }

    /// The implicit third coordinate (s = -q - r)
    pub const fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// Distance to another hex (in hex steps)
    pub fn distance_to(&self, other: &HexCoord) -> u32 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = (self.s() - other.s()).abs();
        ((dq + dr + ds) / 2) as u32
    }

    /// Every coordinate within `radius` steps of the origin.
    ///
    /// Ordered by `q` ascending, then `r` ascending, so the same radius always
    /// produces the same sequence. A radius `n` hexagon holds `3n² + 3n + 1` cells.
    pub fn hexagon(radius: u32) -> Vec<HexCoord> {
        let n = radius as i32;
        let mut coords = Vec::with_capacity(Self::hexagon_len(radius));
        for q in -n..=n {
            let r_min = (-n).max(-q - n);
            let r_max = n.min(-q + n);
            for r in r_min..=r_max {
                coords.push(HexCoord::new(q, r));
            }
        }
        coords
    }

    /// Number of cells in a hexagon of the given radius
    pub const fn hexagon_len(radius: u32) -> usize {
        let n = radius as usize;
        3 * n * n + 3 * n + 1
    }
}

impl std::fmt::Display for HexCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.q, self.r, self.s())
    }
}
