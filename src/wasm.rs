//! JavaScript boundary. Coordinates cross it as `(a, b)` pairs: `(q, r)` on
//! hex boards, `(x, y)` on square boards.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::config::{GameConfig, TopologyKind};
use crate::error::GameError;
use crate::game::GameInstance;
use crate::topology::{Hex, Square, Topology};

enum AnyGame {
    Hex(GameInstance<Hex>),
    Square(GameInstance<Square>),
}

macro_rules! with_game {
    ($game:expr, $g:ident => $body:expr) => {
        match $game {
            AnyGame::Hex($g) => $body,
            AnyGame::Square($g) => $body,
        }
    };
}

#[wasm_bindgen]
pub struct WasmGame {
    inner: AnyGame,
}

#[wasm_bindgen]
impl WasmGame {
    /// Starts a game from a JS config object; `undefined` uses the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<WasmGame, JsValue> {
        let config: GameConfig = if config.is_undefined() || config.is_null() {
            GameConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };

        let inner = match config.topology {
            TopologyKind::Hex => AnyGame::Hex(GameInstance::from_config(&config).map_err(to_js)?),
            TopologyKind::Square => {
                AnyGame::Square(GameInstance::from_config(&config).map_err(to_js)?)
            }
        };
        Ok(WasmGame { inner })
    }

    pub fn place(&mut self, a: i32, b: i32) -> Result<JsValue, JsValue> {
        match &mut self.inner {
            AnyGame::Hex(g) => to_value(&g.place(Hex::coord(a, b)).map_err(to_js)?),
            AnyGame::Square(g) => to_value(&g.place(Square::coord(a, b)).map_err(to_js)?),
        }
    }

    pub fn pass(&mut self) -> Result<JsValue, JsValue> {
        with_game!(&mut self.inner, g => to_value(&g.pass().map_err(to_js)?))
    }

    #[wasm_bindgen(js_name = aiMove)]
    pub fn ai_move(&mut self) -> Result<JsValue, JsValue> {
        with_game!(&mut self.inner, g => to_value(&g.do_ai_move().map_err(to_js)?))
    }

    #[wasm_bindgen(js_name = isHumanTurn)]
    pub fn is_human_turn(&self) -> bool {
        with_game!(&self.inner, g => g.is_human_turn())
    }

    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsValue> {
        with_game!(&self.inner, g => to_value(&g.legal_moves()))
    }

    pub fn state(&self) -> Result<JsValue, JsValue> {
        with_game!(&self.inner, g => to_value(&g.to_game_state()))
    }

    /// `null` until the game is over.
    pub fn result(&self) -> Result<JsValue, JsValue> {
        with_game!(&self.inner, g => match g.to_game_result() {
            Some(result) => to_value(&result),
            None => Ok(JsValue::NULL),
        })
    }

    /// Text dump of the board.
    pub fn render(&self) -> String {
        with_game!(&self.inner, g => g.board().to_string())
    }
}

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}

fn to_value<V: Serialize + ?Sized>(value: &V) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(Into::into)
}

fn to_js(err: GameError) -> JsValue {
    JsValue::from_str(&err.to_string())
}
