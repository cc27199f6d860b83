use wasm_bindgen::JsCast;
use web_sys as web;

pub fn window_document() -> anyhow::Result<web::Document> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))
}

/// Show or hide an element by id through its inline style.
pub fn set_visible(document: &web::Document, element_id: &str, visible: bool) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let style = if visible { "" } else { "display:none" };
        let _ = el.set_attribute("style", style);
    }
}

/// Restart and play an `<audio>`/`<video>` element. Autoplay rejections are logged.
pub fn play_media(document: &web::Document, element_id: &str) {
    let Some(el) = document.get_element_by_id(element_id) else {
        log::warn!("[dom] no media element #{element_id}");
        return;
    };
    match el.dyn_into::<web::HtmlMediaElement>() {
        Ok(media) => {
            media.set_current_time(0.0);
            if let Err(e) = media.play() {
                log::warn!("[dom] play #{element_id} failed: {:?}", e);
            }
        }
        Err(_) => log::warn!("[dom] #{element_id} is not a media element"),
    }
}
