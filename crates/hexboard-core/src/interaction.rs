//! Gesture handling on top of the board.
//!
//! The controller owns the board and turns clicks and drag-and-drop gestures into
//! tile transitions. It keeps no per-gesture state: the host passes the source,
//! target, payload and success flag with every event, in the order
//! start → over* → drop → end.
//!
//! A drop never clears the source tile. The source is emptied only when the host
//! reports the whole drag as successful, so a drop onto the source itself followed
//! by a successful end removes the token from the board.
//!
//! With editing turned off the board is read-only: every gesture is accepted and
//! ignored, without even checking its coordinates.

use crate::actions::{BoardAction, BoardEvent, DragPayload, DragStart};
use crate::board::{Board, BoardError};
use crate::hex::HexCoord;
use tracing::debug;

/// Applies user gestures to a board it owns
#[derive(Debug, Clone)]
pub struct InteractionController {
    board: Board,
    allow_editing: bool,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(Board::default())
    }
}

impl InteractionController {
    /// An editable controller
    pub fn new(board: Board) -> Self {
        Self {
            board,
            allow_editing: true,
        }
    }

    /// A controller whose board only changes through gestures when `allow_editing` is set
    pub fn with_editing(board: Board, allow_editing: bool) -> Self {
        Self {
            board,
            allow_editing,
        }
    }

    pub fn allows_editing(&self) -> bool {
        self.allow_editing
    }

    pub fn set_allow_editing(&mut self, allow_editing: bool) {
        debug!(allow_editing, "editing mode changed");
        self.allow_editing = allow_editing;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn into_board(self) -> Board {
        self.board
    }

    /// Swap in a new board (after a load, for example), returning the old one
    pub fn replace_board(&mut self, board: Board) -> Board {
        std::mem::replace(&mut self.board, board)
    }

    /// Apply a gesture, returning the events it produced.
    ///
    /// Coordinates outside the board are errors. Gestures whose guards fail are not:
    /// they yield no events or a rejection event. A read-only controller yields no
    /// events at all.
    pub fn apply(&mut self, action: BoardAction) -> Result<Vec<BoardEvent>, BoardError> {
        if !self.allow_editing {
            debug!(?action, "read-only board, gesture ignored");
            return Ok(Vec::new());
        }
        let events = match action {
            BoardAction::Click(coord) => self.on_click(coord)?.into_iter().collect(),
            BoardAction::ToggleBlocked(coord) => {
                self.on_toggle_blocked(coord)?.into_iter().collect()
            }
            BoardAction::DragStart(source) => match self.on_drag_start(source)? {
                DragStart::Accepted(payload) => {
                    vec![BoardEvent::DragAccepted { source, payload }]
                }
                DragStart::Rejected => vec![BoardEvent::DragRejected { source }],
            },
            BoardAction::DragOver(target) => {
                self.on_drag_over(target);
                Vec::new()
            }
            BoardAction::Drop {
                source,
                target,
                payload,
            } => vec![self.on_drop(source, target, payload)?],
            BoardAction::DragEnd { source, success } => {
                self.on_drag_end(source, success)?.into_iter().collect()
            }
        };
        Ok(events)
    }

    /// Rotate a blocked tile, or cycle the color of plain terrain.
    ///
    /// Clicking a token tile changes nothing.
    pub fn on_click(&mut self, coord: HexCoord) -> Result<Option<BoardEvent>, BoardError> {
        if !self.allow_editing {
            return Ok(None);
        }
        let step = self.board.rotation_step();
        let palette_len = self.board.palette().len();
        let tile = self.board.find_tile_mut(&coord)?;

        let event = if tile.is_blocked() {
            tile.rotate_blocked(step);
            Some(BoardEvent::TileRotated {
                coord,
                rotation: tile.rotation(),
            })
        } else if tile.cycle_color(palette_len) {
            Some(BoardEvent::ColorCycled {
                coord,
                color_index: tile.color_index(),
            })
        } else {
            None
        };

        debug!(%coord, ?event, "click");
        Ok(event)
    }

    /// Flip a tile between plain and blocked terrain. Token tiles are left alone.
    pub fn on_toggle_blocked(&mut self, coord: HexCoord) -> Result<Option<BoardEvent>, BoardError> {
        if !self.allow_editing {
            return Ok(None);
        }
        let tile = self.board.find_tile_mut(&coord)?;
        let blocked = !tile.is_blocked();
        if !tile.set_blocked(blocked) {
            debug!(%coord, "toggle blocked ignored");
            return Ok(None);
        }
        debug!(%coord, blocked, "toggle blocked");
        Ok(Some(BoardEvent::BlockedChanged { coord, blocked }))
    }

    /// Only a tile holding a token with an image can be dragged. The source is not
    /// changed.
    pub fn on_drag_start(&self, source: HexCoord) -> Result<DragStart, BoardError> {
        if !self.allow_editing {
            return Ok(DragStart::Rejected);
        }
        let tile = self.board.find_tile(&source)?;
        let start = match tile.token() {
            Some(token) if !token.image.is_empty() => {
                DragStart::Accepted(DragPayload::from(token.clone()))
            }
            _ => DragStart::Rejected,
        };
        debug!(%source, accepted = start.payload().is_some(), "drag start");
        Ok(start)
    }

    /// Any tile of an editable board accepts a drop, the source included
    pub fn on_drag_over(&self, _target: HexCoord) -> bool {
        self.allow_editing
    }

    /// Place the dragged token on the target, replacing whatever token it holds.
    ///
    /// A missing payload or a blocked target yields `DropRejected`; the host should
    /// then end the drag with `success = false` so the source keeps its token.
    pub fn on_drop(
        &mut self,
        source: HexCoord,
        target: HexCoord,
        payload: Option<DragPayload>,
    ) -> Result<BoardEvent, BoardError> {
        if !self.allow_editing {
            return Ok(BoardEvent::DropRejected { target });
        }
        let tile = self.board.find_tile_mut(&target)?;

        let Some(DragPayload { token }) = payload else {
            debug!(%source, %target, "drop without payload ignored");
            return Ok(BoardEvent::DropRejected { target });
        };

        if !tile.place_token(token.clone()) {
            debug!(%source, %target, "drop on blocked tile or without image ignored");
            return Ok(BoardEvent::DropRejected { target });
        }

        debug!(%source, %target, label = %token.label, "token dropped");
        Ok(BoardEvent::TokenPlaced {
            source,
            target,
            token,
        })
    }

    /// Finish a drag. On success the source tile gives up its token; a failed
    /// drag changes nothing and does not look at the source.
    pub fn on_drag_end(
        &mut self,
        source: HexCoord,
        success: bool,
    ) -> Result<Option<BoardEvent>, BoardError> {
        if !self.allow_editing {
            return Ok(None);
        }
        if !success {
            debug!(%source, "drag aborted");
            return Ok(None);
        }

        let tile = self.board.find_tile_mut(&source)?;
        let cleared = tile.clear_token();
        debug!(%source, cleared = cleared.is_some(), "drag end");
        Ok(cleared.map(|token| BoardEvent::TokenCleared {
            coord: source,
            token,
        }))
    }
}
