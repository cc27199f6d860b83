use crate::dom;
use crate::frame::{self, FrameContext};
use hacs_core::{
    ChoreographyConfig, ClassificationResult, FrameClock, FrameTick, ImpactScene, Outcome,
    PredictionResponse, ResultFeed, SceneEvent, SceneEventKind, TimeBase,
};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

pub fn event_name(ev: &SceneEvent) -> &'static str {
    match ev.kind() {
        SceneEventKind::ApproachStarted => "approach",
        SceneEventKind::Impact => "impact",
        SceneEventKind::Midpoint => "midpoint",
        SceneEventKind::NearEnd => "near-end",
        SceneEventKind::Settled => "settled",
    }
}

fn parse_kind(name: &str) -> Option<SceneEventKind> {
    match name {
        "approach" => Some(SceneEventKind::ApproachStarted),
        "impact" => Some(SceneEventKind::Impact),
        "midpoint" => Some(SceneEventKind::Midpoint),
        "near-end" => Some(SceneEventKind::NearEnd),
        "settled" => Some(SceneEventKind::Settled),
        _ => None,
    }
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// JavaScript subscribers. Called only after the scene borrow is released so a
/// callback may query the handle again.
#[derive(Default)]
pub struct JsHooks {
    subscribers: Vec<(SceneEventKind, js_sys::Function)>,
}

impl JsHooks {
    pub fn dispatch(&self, events: &[SceneEvent]) {
        for ev in events {
            let name = JsValue::from_str(event_name(ev));
            for (kind, f) in &self.subscribers {
                if *kind == ev.kind() {
                    if let Err(e) = f.call1(&JsValue::NULL, &name) {
                        log::error!("[hooks] {} callback threw: {:?}", event_name(ev), e);
                    }
                }
            }
        }
    }
}

/// Scene handle exported to the page.
///
/// Either drive it from JavaScript with [`SceneHandle::tick`], or call
/// [`SceneHandle::attach`] once to let the crate run its own animation-frame loop.
#[wasm_bindgen]
pub struct SceneHandle {
    scene: Rc<RefCell<ImpactScene>>,
    feed: Rc<RefCell<ResultFeed>>,
    js_hooks: Rc<RefCell<JsHooks>>,
    clock: Rc<RefCell<FrameClock>>,
    attached: bool,
}

#[wasm_bindgen]
impl SceneHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32, config_json: Option<String>) -> Result<SceneHandle, JsValue> {
        let config = match config_json {
            Some(json) => serde_json::from_str::<ChoreographyConfig>(&json).map_err(js_err)?,
            None => ChoreographyConfig::default(),
        };
        let scene = ImpactScene::seeded(config, Outcome::Safe, seed as u64).map_err(js_err)?;
        Ok(SceneHandle {
            scene: Rc::new(RefCell::new(scene)),
            feed: Rc::new(RefCell::new(ResultFeed::new())),
            js_hooks: Rc::new(RefCell::new(JsHooks::default())),
            clock: Rc::new(RefCell::new(FrameClock::new())),
            attached: false,
        })
    }

    /// Start a new run for a classifier result. Returns the new reset token.
    pub fn apply_result(&self, hazardous: bool, probability: f32) -> Result<f64, JsValue> {
        let result = ClassificationResult::new(hazardous, probability).map_err(js_err)?;
        Ok(self.accept(result))
    }

    /// Same as [`SceneHandle::apply_result`] for a raw `/predict` response body.
    pub fn apply_response_json(&self, json: &str) -> Result<f64, JsValue> {
        let resp: PredictionResponse = serde_json::from_str(json).map_err(js_err)?;
        let result = ClassificationResult::try_from(resp).map_err(js_err)?;
        Ok(self.accept(result))
    }

    /// Advance one frame and return the names of the events it fired.
    pub fn tick(&self, elapsed: f64, delta: f32) -> js_sys::Array {
        let out = js_sys::Array::new();
        if self.attached {
            log::warn!("[handle] tick() ignored: scene is driven by its own frame loop");
            return out;
        }
        let observed = self.clock.borrow_mut().observe(elapsed);
        let delta = if delta.is_finite() && delta >= 0.0 {
            delta
        } else {
            observed.delta
        };
        let events = self
            .scene
            .borrow_mut()
            .tick(FrameTick::new(observed.elapsed, delta));
        self.js_hooks.borrow().dispatch(&events);
        for ev in &events {
            out.push(&JsValue::from_str(event_name(ev)));
        }
        out
    }

    /// Register `callback(name)` for "approach", "impact", "midpoint", "near-end" or "settled".
    pub fn on(&self, event: &str, callback: js_sys::Function) -> Result<(), JsValue> {
        let kind = parse_kind(event).ok_or_else(|| js_err(format!("unknown event {event:?}")))?;
        self.js_hooks.borrow_mut().subscribers.push((kind, callback));
        Ok(())
    }

    pub fn phase(&self) -> String {
        format!("{:?}", self.scene.borrow().phase())
    }

    pub fn hazardous(&self) -> bool {
        self.scene.borrow().outcome().is_hazardous()
    }

    /// `[x, y, z, scale, rx, ry, rz]`, or undefined on a safe run.
    pub fn asteroid_pose(&self) -> Option<Vec<f32>> {
        self.scene.borrow().asteroid().map(|p| {
            vec![
                p.position.x,
                p.position.y,
                p.position.z,
                p.scale,
                p.rotation.x,
                p.rotation.y,
                p.rotation.z,
            ]
        })
    }

    /// `[x, y, z, scale, spin_z, progress]`, or undefined before the impact.
    pub fn explosion_pose(&self) -> Option<Vec<f32>> {
        self.scene.borrow().explosion().map(|p| {
            vec![
                p.position.x,
                p.position.y,
                p.position.z,
                p.scale,
                p.spin_z,
                p.progress,
            ]
        })
    }

    pub fn planet_visible(&self) -> bool {
        self.scene.borrow().background().visible
    }

    /// `[x, y, z, rotation_x]`
    pub fn planet_pose(&self) -> Vec<f32> {
        let bg = self.scene.borrow().background();
        vec![bg.position.x, bg.position.y, bg.position.z, bg.rotation_x]
    }

    /// Debris as 8 floats per particle: position xyz, size, rgba.
    pub fn particle_buffer(&self) -> js_sys::Float32Array {
        let scene = self.scene.borrow();
        let floats: &[f32] = bytemuck::cast_slice(scene.particles());
        js_sys::Float32Array::from(floats)
    }

    /// Drive the scene from `requestAnimationFrame`, toggling `#planet_id` and
    /// playing `#impact_audio_id` on impact.
    pub fn attach(&mut self, planet_id: String, impact_audio_id: Option<String>) -> Result<(), JsValue> {
        if self.attached {
            return Ok(());
        }
        let document = dom::window_document().map_err(js_err)?;
        if let Some(audio_id) = impact_audio_id {
            let doc = document.clone();
            self.scene
                .borrow_mut()
                .subscribe(SceneEventKind::Impact, move |_| dom::play_media(&doc, &audio_id));
        }
        self.attached = true;
        // Continue the clock the page was ticking so mount and activation
        // times recorded so far keep their meaning.
        let base = TimeBase::continuing(&self.clock.borrow());
        let now = Instant::now();
        frame::start_loop(Rc::new(RefCell::new(FrameContext {
            scene: self.scene.clone(),
            js_hooks: self.js_hooks.clone(),
            document,
            planet_id,
            clock: self.clock.clone(),
            base,
            started: now,
            planet_shown: None,
        })));
        log::info!("[handle] attached to animation frames at {:.3}s", base.origin());
        Ok(())
    }
}

impl SceneHandle {
    fn accept(&self, result: ClassificationResult) -> f64 {
        let mut feed = self.feed.borrow_mut();
        let token = self.scene.borrow_mut().apply_result(&mut feed, result);
        token.value() as f64
    }
}
