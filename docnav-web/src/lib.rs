#![forbid(unsafe_code)]
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub mod app;
pub mod bridge;
pub mod dom;
pub mod error;
pub mod events;
pub mod page;
pub mod storage;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    #[cfg(feature = "console-logging")]
    let _ = console_log::init_with_level(log::Level::Debug);
    app::run_when_ready();
}
