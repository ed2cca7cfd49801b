//! WebAssembly bindings for the hex board.
//!
//! This module exposes the board to a JavaScript renderer through wasm-bindgen.
//! Structured values cross the boundary as JSON strings.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use crate::actions::{BoardEvent, DragPayload};
#[cfg(feature = "wasm")]
use crate::config::BoardConfig;
#[cfg(feature = "wasm")]
use crate::hex::HexCoord;
#[cfg(feature = "wasm")]
use crate::interaction::InteractionController;
#[cfg(feature = "wasm")]
use crate::save;
#[cfg(feature = "wasm")]
use crate::board::Board;

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

#[cfg(feature = "wasm")]
fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[cfg(feature = "wasm")]
fn events_json(events: &[BoardEvent]) -> String {
    serde_json::to_string(events).unwrap_or_else(|_| "[]".to_string())
}

/// WASM-exposed board wrapper
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub struct WasmBoard {
    controller: InteractionController,
    config: BoardConfig,
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
impl WasmBoard {
    /// Create a default board. Pass `"{}"` for the default settings.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<WasmBoard, JsValue> {
        let config = BoardConfig::from_json(config_json).map_err(js_error)?;
        let board = Board::with_config(&config).map_err(js_error)?;
        Ok(WasmBoard {
            controller: InteractionController::with_editing(board, config.allow_editing),
            config,
        })
    }

    /// Whether gestures change the board
    #[wasm_bindgen(js_name = allowsEditing)]
    pub fn allows_editing(&self) -> bool {
        self.controller.allows_editing()
    }

    /// Switch between an editable and a read-only board
    #[wasm_bindgen(js_name = setAllowEditing)]
    pub fn set_allow_editing(&mut self, allow_editing: bool) {
        self.config.allow_editing = allow_editing;
        self.controller.set_allow_editing(allow_editing);
    }

    /// Per-tile render data as a JSON array
    #[wasm_bindgen(js_name = getTiles)]
    pub fn get_tiles(&self) -> String {
        serde_json::to_string(&self.controller.board().tile_views())
            .unwrap_or_else(|_| "[]".to_string())
    }

    /// Click a tile, returns events JSON
    #[wasm_bindgen(js_name = click)]
    pub fn click(&mut self, q: i32, r: i32) -> Result<String, JsValue> {
        let event = self
            .controller
            .on_click(HexCoord::new(q, r))
            .map_err(js_error)?;
        Ok(events_json(&event.into_iter().collect::<Vec<_>>()))
    }

    /// Flip a tile between plain and blocked terrain, returns events JSON
    #[wasm_bindgen(js_name = toggleBlocked)]
    pub fn toggle_blocked(&mut self, q: i32, r: i32) -> Result<String, JsValue> {
        let event = self
            .controller
            .on_toggle_blocked(HexCoord::new(q, r))
            .map_err(js_error)?;
        Ok(events_json(&event.into_iter().collect::<Vec<_>>()))
    }

    /// Start a drag. Returns the payload JSON, or `null` if the drag must be cancelled.
    #[wasm_bindgen(js_name = dragStart)]
    pub fn drag_start(&self, q: i32, r: i32) -> Result<String, JsValue> {
        let start = self
            .controller
            .on_drag_start(HexCoord::new(q, r))
            .map_err(js_error)?;
        Ok(match start.payload() {
            Some(payload) => serde_json::to_string(payload).unwrap_or_else(|_| "null".to_string()),
            None => "null".to_string(),
        })
    }

    /// Whether a drop is allowed over the given tile
    #[wasm_bindgen(js_name = dragOver)]
    pub fn drag_over(&self, q: i32, r: i32) -> bool {
        self.controller.on_drag_over(HexCoord::new(q, r))
    }

    /// Drop the payload from `dragStart` onto a tile, returns events JSON
    #[wasm_bindgen(js_name = drop)]
    pub fn drop_on(
        &mut self,
        source_q: i32,
        source_r: i32,
        target_q: i32,
        target_r: i32,
        payload_json: &str,
    ) -> Result<String, JsValue> {
        // A missing or unreadable payload is a rejected drop, not an error
        let payload: Option<DragPayload> = serde_json::from_str(payload_json).ok().flatten();
        let event = self
            .controller
            .on_drop(
                HexCoord::new(source_q, source_r),
                HexCoord::new(target_q, target_r),
                payload,
            )
            .map_err(js_error)?;
        Ok(events_json(&[event]))
    }

    /// Finish a drag, returns events JSON
    #[wasm_bindgen(js_name = dragEnd)]
    pub fn drag_end(&mut self, q: i32, r: i32, success: bool) -> Result<String, JsValue> {
        let event = self
            .controller
            .on_drag_end(HexCoord::new(q, r), success)
            .map_err(js_error)?;
        Ok(events_json(&event.into_iter().collect::<Vec<_>>()))
    }

    /// Current board as a save document
    #[wasm_bindgen(js_name = saveJson)]
    pub fn save_json(&self) -> Result<String, JsValue> {
        save::to_json(self.controller.board()).map_err(js_error)
    }

    /// Replace the board from a save document. Returns the number of skipped records.
    #[wasm_bindgen(js_name = loadJson)]
    pub fn load_json(&mut self, json: &str) -> Result<usize, JsValue> {
        let (board, report) = save::load(json, &self.config).map_err(js_error)?;
        self.controller.replace_board(board);
        Ok(report.skipped.len())
    }

    /// Return every tile to its default state
    #[wasm_bindgen(js_name = reset)]
    pub fn reset(&mut self) {
        save::reset(self.controller.board_mut());
    }
}
