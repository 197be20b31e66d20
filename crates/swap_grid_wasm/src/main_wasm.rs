use wasm_bindgen::prelude::*;
use web_sys::console;

pub(crate) fn main_wasm() -> Result<(), JsValue> {
    console::log_1(&format!("Starting {}", env!("CARGO_PKG_NAME")).into());
    swap_grid::run();
    Ok(())
}
