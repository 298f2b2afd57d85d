use wasm_bindgen::prelude::*;

pub mod browser;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());

    log::info!("WASM client initialized");
}

/// Page entry point: wire up the controls and start the labels load.
#[wasm_bindgen]
pub fn init_record_browser() {
    browser::init_browser_panel();
}
