//! Versioned save format for boards.
//!
//! A saved board is a JSON document `{ "version": 1, "hexagons": [...] }` holding one
//! sparse record per tile that differs from its default state. Records carry the
//! cube coordinate plus only the non-default fields:
//!
//! ```json
//! { "version": 1, "hexagons": [
//!     { "q": 0, "r": 1, "s": -1, "blocked": true, "rotation": 120 },
//!     { "q": 2, "r": -1, "s": -1, "color": 3 },
//!     { "q": -1, "r": 0, "s": 1, "image": "/assets/knight.png", "text": "Knight" }
//! ] }
//! ```
//!
//! Loading is strict about the document shape and lenient about its contents:
//! a document without `version` or `hexagons` is rejected outright, while records
//! pointing outside the board are skipped and fields with unexpected types or names
//! are dropped one by one. Documents written by a newer version load with the
//! same tolerance.

use crate::board::{Board, BoardError};
use crate::config::BoardConfig;
use crate::hex::HexCoord;
use crate::tile::{normalize_rotation, Occupant, Tile, Token};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info, warn};

/// Schema version written by this crate
pub const SAVE_VERSION: u32 = 1;

/// The persisted form of a board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "WireDocument")]
pub struct SaveDocument {
    pub version: u32,
    pub hexagons: Vec<TileRecord>,
}

/// Wire shape of a document; records pick up the document version when parsed
#[derive(Deserialize)]
struct WireDocument {
    version: u32,
    hexagons: Vec<TileRecord>,
}

impl From<WireDocument> for SaveDocument {
    fn from(wire: WireDocument) -> Self {
        let version = wire.version;
        let hexagons = wire
            .hexagons
            .into_iter()
            .map(|record| TileRecord { version, ..record })
            .collect();
        Self { version, hexagons }
    }
}

impl SaveDocument {
    pub fn to_json(&self) -> Result<String, BoardError> {
        serde_json::to_string(self).map_err(|e| BoardError::MalformedDocument(e.to_string()))
    }
}

/// Sparse saved state of one tile
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TileRecord {
    pub q: i32,
    pub r: i32,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub s: Option<i32>,
    /// Palette index
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub color: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub blocked: Option<bool>,
    /// Blocked-terrain rotation, or token rotation for token tiles
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub rotation: Option<i64>,
    /// Token label
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub text: Option<String>,
    /// Token image reference
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "lenient")]
    pub image: Option<String>,
    /// Schema version of the document the record belongs to. Written once at
    /// document level on the wire and copied into each record when parsed.
    #[serde(skip)]
    pub version: u32,
}

impl TileRecord {
    /// An empty record for a coordinate
    pub fn at(coord: HexCoord, version: u32) -> Self {
        Self {
            q: coord.q,
            r: coord.r,
            s: Some(coord.s()),
            version,
            ..Self::default()
        }
    }

    /// The record's coordinate, or `None` when `s` contradicts `q` and `r`
    pub fn coord(&self) -> Option<HexCoord> {
        match self.s {
            Some(s) => HexCoord::from_cube(self.q, self.r, s),
            None => Some(HexCoord::new(self.q, self.r)),
        }
    }
}

/// Deserialize an optional field, treating a value of the wrong type as absent
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    match serde_json::from_value(value.clone()) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) => {
            warn!(%value, error = %e, "dropping field with unexpected type");
            Ok(None)
        }
    }
}

impl Tile {
    /// Capture the tile's non-default state, or `None` if there is nothing to save
    pub fn to_record(&self, version: u32) -> Option<TileRecord> {
        if self.is_default() {
            return None;
        }

        let mut record = TileRecord::at(self.coord(), version);
        if self.color_index() != 0 {
            record.color = Some(self.color_index());
        }
        match self.occupant() {
            Occupant::Empty => {}
            Occupant::Blocked { rotation } => {
                record.blocked = Some(true);
                if *rotation != 0 {
                    record.rotation = Some(*rotation as i64);
                }
            }
            Occupant::Token(token) => {
                record.image = Some(token.image.clone());
                if !token.label.is_empty() {
                    record.text = Some(token.label.clone());
                }
                if token.rotation != 0 {
                    record.rotation = Some(token.rotation as i64);
                }
            }
        }
        Some(record)
    }

    /// Restore the tile from a saved record.
    ///
    /// The record must describe this tile's coordinate. Fields the tile cannot
    /// hold are dropped: a color past the end of the palette, or token fields on a
    /// blocked record.
    pub fn apply_record(&mut self, record: &TileRecord, version: u32, palette_len: usize) {
        debug_assert_eq!(record.coord(), Some(self.coord()), "record applied to wrong tile");

        if version > SAVE_VERSION {
            debug!(coord = %self.coord(), version, "applying record from newer schema");
        }

        let color_index = match record.color {
            Some(color) if color < palette_len => color,
            Some(color) => {
                warn!(coord = %self.coord(), color, palette_len, "ignoring out-of-range color");
                0
            }
            None => 0,
        };

        let rotation = normalize_rotation(record.rotation.unwrap_or(0));
        let occupant = if record.blocked == Some(true) {
            if record.image.is_some() || record.text.is_some() {
                warn!(coord = %self.coord(), "ignoring token fields on blocked tile");
            }
            Occupant::Blocked { rotation }
        } else if let Some(image) = record.image.as_ref().filter(|image| !image.is_empty()) {
            Occupant::Token(Token {
                image: image.clone(),
                label: record.text.clone().unwrap_or_default(),
                rotation,
            })
        } else {
            if record.text.is_some() || record.image.is_some() {
                warn!(coord = %self.coord(), "ignoring token without image");
            }
            Occupant::Empty
        };

        self.restore(color_index, occupant);
    }
}

/// Summary of a load: what was restored and what was passed over
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoadReport {
    /// Version found in the document
    pub version: u32,
    /// Records applied to a tile
    pub restored: usize,
    /// Records that could not be applied, with the reason
    pub skipped: Vec<BoardError>,
    /// Set when the document comes from a newer schema
    pub version_mismatch: Option<BoardError>,
}

impl LoadReport {
    /// True when every record was applied and the version is understood
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.version_mismatch.is_none()
    }
}

/// Document shape checked before any record is looked at
#[derive(Deserialize)]
struct RawDocument {
    version: u32,
    hexagons: Vec<serde_json::Value>,
}

/// Capture the board as a save document of the given schema version
pub fn save(board: &Board, version: u32) -> Result<SaveDocument, BoardError> {
    if version == 0 || version > SAVE_VERSION {
        return Err(BoardError::VersionMismatch {
            found: version,
            supported: SAVE_VERSION,
        });
    }

    let hexagons: Vec<TileRecord> = board
        .all_tiles()
        .filter_map(|tile| tile.to_record(version))
        .collect();
    info!(version, records = hexagons.len(), tiles = board.len(), "board saved");

    Ok(SaveDocument { version, hexagons })
}

/// Save the board as a JSON string in the current schema version
pub fn to_json(board: &Board) -> Result<String, BoardError> {
    save(board, SAVE_VERSION)?.to_json()
}

/// Build a board from a JSON save document.
///
/// `config` must describe the region the document was saved from. On error the
/// caller's current board is untouched since a fresh board is returned.
pub fn load(json: &str, config: &BoardConfig) -> Result<(Board, LoadReport), BoardError> {
    let raw: RawDocument =
        serde_json::from_str(json).map_err(|e| BoardError::MalformedDocument(e.to_string()))?;

    let records = raw.hexagons.into_iter().enumerate().map(|(i, value)| {
        serde_json::from_value::<TileRecord>(value)
            .map(|record| TileRecord {
                version: raw.version,
                ..record
            })
            .map_err(|e| BoardError::InvalidRecord(format!("record {}: {}", i, e)))
    });
    restore(raw.version, records, config)
}

/// Build a board from an already parsed save document
pub fn load_document(
    document: &SaveDocument,
    config: &BoardConfig,
) -> Result<(Board, LoadReport), BoardError> {
    restore(document.version, document.hexagons.iter().cloned().map(Ok), config)
}

/// Return every tile of the board to its default state
pub fn reset(board: &mut Board) {
    board.reset();
}

fn restore(
    version: u32,
    records: impl Iterator<Item = Result<TileRecord, BoardError>>,
    config: &BoardConfig,
) -> Result<(Board, LoadReport), BoardError> {
    let mut board = Board::with_config(config)?;
    let palette_len = board.palette().len();
    let mut report = LoadReport {
        version,
        ..LoadReport::default()
    };

    if version > SAVE_VERSION {
        warn!(version, supported = SAVE_VERSION, "loading document from a newer schema");
        report.version_mismatch = Some(BoardError::VersionMismatch {
            found: version,
            supported: SAVE_VERSION,
        });
    }

    for record in records {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "skipping unreadable record");
                report.skipped.push(e);
                continue;
            }
        };

        let Some(coord) = record.coord() else {
            let e = BoardError::InvalidRecord(format!(
                "coordinate ({}, {}, {:?}) does not sum to zero",
                record.q, record.r, record.s
            ));
            warn!(error = %e, "skipping record");
            report.skipped.push(e);
            continue;
        };

        match board.find_tile_mut(&coord) {
            Ok(tile) => {
                tile.apply_record(&record, version, palette_len);
                report.restored += 1;
            }
            Err(e) => {
                warn!(%coord, "skipping record outside the board");
                report.skipped.push(e);
            }
        }
    }

    info!(
        version,
        restored = report.restored,
        skipped = report.skipped.len(),
        "board loaded"
    );
    Ok((board, report))
}
