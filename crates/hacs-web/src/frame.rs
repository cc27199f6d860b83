use crate::dom;
use crate::handle::JsHooks;
use hacs_core::{FrameClock, ImpactScene, TimeBase};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub scene: Rc<RefCell<ImpactScene>>,
    pub js_hooks: Rc<RefCell<JsHooks>>,

    pub document: web::Document,
    pub planet_id: String,

    /// Shared with the handle's `tick` path.
    pub clock: Rc<RefCell<FrameClock>>,
    pub base: TimeBase,
    pub started: Instant,
    pub planet_shown: Option<bool>,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let elapsed = self.base.to_scene(self.started.elapsed().as_secs_f64());
        let tick = self.clock.borrow_mut().observe(elapsed);

        let (events, planet_visible) = {
            let mut scene = self.scene.borrow_mut();
            let events = scene.tick(tick);
            (events, scene.background().visible)
        }; // scene borrow released before JS runs

        if self.planet_shown != Some(planet_visible) {
            dom::set_visible(&self.document, &self.planet_id, planet_visible);
            self.planet_shown = Some(planet_visible);
        }

        self.js_hooks.borrow().dispatch(&events);
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        if let Err(e) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
    }
}
