#![cfg(target_arch = "wasm32")]
//! Browser host for the impact choreography.
//!
//! The page owns layout, the upload form and the classifier request. It hands
//! each result to a [`SceneHandle`], which either runs its own
//! `requestAnimationFrame` loop ([`SceneHandle::attach`]) or is ticked by the
//! page's render loop ([`SceneHandle::tick`]).

use wasm_bindgen::prelude::*;

mod dom;
mod frame;
mod handle;

pub use handle::SceneHandle;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("hacs-web starting");
    Ok(())
}
