use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use wasm_bindgen::prelude::*;

use crate::{Square, Validator, generate as generate_square};

/// Reads any JS value as JSON; the validator decides whether it is a grid.
///
/// `null`, strings and fractional numbers stay JSON values so they fail
/// as non-integer cells.
fn js_to_json(value: JsValue) -> Result<serde_json::Value, JsError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsError::new(&e.to_string()))
}

/// Convert a Square to a JsValue (2D array of numbers).
fn square_to_js(sq: &Square) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(&sq.to_rows()).map_err(|e| JsError::new(&e.to_string()))
}

/// Returns whether `grid` is a magic square.
///
/// Anything that is not an array of arrays yields `false`.
#[wasm_bindgen(js_name = isMagicSquare)]
pub fn is_magic_square(grid: JsValue) -> bool {
    js_to_json(grid)
        .map(|value| Validator::default().is_magic_json(value))
        .unwrap_or(false)
}

/// Validates `grid` and returns the outcome object.
///
/// Structural failures are thrown as errors carrying the diagnostic message.
#[wasm_bindgen]
pub fn validate(grid: JsValue) -> Result<JsValue, JsError> {
    let value = js_to_json(grid)?;
    let outcome = Validator::default()
        .validate_json(value)
        .map_err(|e| JsError::new(&e.to_string()))?;
    serde_wasm_bindgen::to_value(&outcome).map_err(|e| JsError::new(&e.to_string()))
}

/// Generate a magic square of order n with the given seed.
/// Returns a 2D array directly usable in JavaScript.
#[wasm_bindgen]
pub fn generate(n: u8, seed: u64) -> Result<JsValue, JsError> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let sq = generate_square(n as usize, &mut rng)
        .ok_or_else(|| JsError::new("no magic square exists of order 0 or 2"))?;

    square_to_js(&sq)
}
