//! Browser bindings for `warp-engine`.
//!
//! [`Experience`] owns the view-state [`Director`] and mounts canvas layers that read
//! it; [`HeadlessBackdrop`] runs the same backdrop without a canvas and exposes the
//! packed instance buffer for a host-side renderer.

pub mod animation;
pub mod canvas;
pub mod runner;

pub use animation::AnimationLoop;
pub use canvas::Canvas2dSurface;
pub use runner::LayerRunner;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlCanvasElement, MouseEvent, TouchEvent, Window};
use warp_engine::{
    Attempt, BackdropConfig, ConfigError, CursorTrail, Director, DrawInstance, ExperienceConfig, InputEvent,
    Layer, Rng, Section, StepClock, Starfield, Surface, ViewStore,
};

fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

fn to_js(err: ConfigError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

/// Monotonic seconds on the same timeline as animation-frame timestamps.
fn now_seconds() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now() / 1000.0)
        .unwrap_or_else(|| js_sys::Date::now() / 1000.0)
}

fn random_seed() -> u64 {
    (js_sys::Math::random() * 9_007_199_254_740_992.0) as u64
}

fn resolve_backdrop(preset: Option<String>, fallback: &BackdropConfig) -> Result<BackdropConfig, JsValue> {
    match preset {
        Some(name) => BackdropConfig::preset(&name).map_err(to_js),
        None => Ok(fallback.clone()),
    }
}

/// Client position of a mouse event or the first touch point.
fn pointer_position(event: &Event) -> Option<(f32, f32)> {
    if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
        return Some((mouse.client_x() as f32, mouse.client_y() as f32));
    }
    let touch = event.dyn_ref::<TouchEvent>()?.touches().get(0)?;
    Some((touch.client_x() as f32, touch.client_y() as f32))
}

struct Mounted<L: Layer> {
    runner: LayerRunner<L>,
    surface: Canvas2dSurface,
}

/// The interactive presentation: passcode gate, section and playlist state, and any
/// number of canvas layers reading that state.
#[wasm_bindgen]
pub struct Experience {
    director: Rc<RefCell<Director>>,
    config: ExperienceConfig,
    seeds: Rng,
    loops: Vec<AnimationLoop>,
}

impl Experience {
    fn mount_layer<L: Layer + 'static>(
        &mut self,
        canvas: HtmlCanvasElement,
        track_pointer: bool,
        build: impl FnOnce(f32, f32, u64) -> L,
    ) -> Result<(), JsValue> {
        let window = window()?;
        let mut surface = Canvas2dSurface::new(canvas)?;
        let (width, height) = surface.fit_to_window(&window)?;
        let layer = build(width, height, self.seeds.next_u64());
        let reader = self.director.borrow().reader();
        let runner = LayerRunner::new(layer, reader, StepClock::new(self.config.clock));
        let mount = Rc::new(RefCell::new(Mounted { runner, surface }));

        let director = Rc::clone(&self.director);
        let frame_mount = Rc::clone(&mount);
        let last = Cell::new(None::<f64>);
        let mut animation = AnimationLoop::start(&window, move |timestamp| {
            director.borrow_mut().poll(timestamp / 1000.0);
            let dt = last
                .replace(Some(timestamp))
                .map_or(0.0, |prev| ((timestamp - prev) / 1000.0) as f32);
            let mut mounted = frame_mount.borrow_mut();
            let Mounted { runner, surface } = &mut *mounted;
            runner.tick(dt);
            surface.present(runner.draw_list());
        })?;

        let resize_mount = Rc::clone(&mount);
        let resize_window = window.clone();
        animation.listen(&window, "resize", move |_event: Event| {
            let mut mounted = resize_mount.borrow_mut();
            match mounted.surface.fit_to_window(&resize_window) {
                Ok((width, height)) => mounted.runner.push_input(InputEvent::Resize { width, height }),
                Err(err) => log::warn!("experience: resize failed: {:?}", err),
            }
        })?;

        if track_pointer {
            for event in ["mousemove", "touchmove"] {
                let pointer_mount = Rc::clone(&mount);
                animation.listen(&window, event, move |event: Event| {
                    let Some((x, y)) = pointer_position(&event) else {
                        return;
                    };
                    let mut mounted = pointer_mount.borrow_mut();
                    let rect = mounted.surface.canvas().get_bounding_client_rect();
                    mounted.runner.push_input(InputEvent::PointerMove {
                        x: x - rect.left() as f32,
                        y: y - rect.top() as f32,
                    });
                })?;
            }
        }

        log::info!(
            "experience: mounted {} layer at {}x{}",
            mount.borrow().surface.backend(),
            width,
            height
        );
        self.loops.push(animation);
        Ok(())
    }

    fn poll(&self) {
        self.director.borrow_mut().poll(now_seconds());
    }
}

#[wasm_bindgen]
impl Experience {
    /// Build from an optional JSON configuration; defaults apply when absent.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<Experience, JsValue> {
        init_logging();
        let config = match config_json {
            Some(json) => ExperienceConfig::from_json(&json).map_err(|err| {
                log::warn!("experience: rejected configuration: {}", err);
                to_js(err)
            })?,
            None => ExperienceConfig::default(),
        };
        let seed = config.seed.unwrap_or_else(random_seed);
        log::info!("experience: initialized, {} tracks", config.tracks.len());
        Ok(Experience {
            director: Rc::new(RefCell::new(Director::new(&config))),
            config,
            seeds: Rng::new(seed),
            loops: Vec::new(),
        })
    }

    /// Full-viewport starfield. `preset` names a built-in backdrop ("nebula",
    /// "tunnel"); without it the configured backdrop is used.
    pub fn mount_backdrop(&mut self, canvas: HtmlCanvasElement, preset: Option<String>) -> Result<(), JsValue> {
        let backdrop = resolve_backdrop(preset, &self.config.backdrop)?;
        self.mount_layer(canvas, false, move |width, height, seed| {
            Starfield::new(&backdrop, width, height, seed)
        })
    }

    pub fn mount_cursor_trail(&mut self, canvas: HtmlCanvasElement) -> Result<(), JsValue> {
        let trail = self.config.trail;
        self.mount_layer(canvas, true, move |_, _, seed| CursorTrail::new(trail, Rng::new(seed)))
    }

    /// Returns true when the passcode was accepted and the warp has started.
    pub fn submit_passcode(&mut self, input: &str) -> bool {
        let now = now_seconds();
        let mut director = self.director.borrow_mut();
        director.poll(now);
        director.submit_passcode(input, now) == Attempt::Accepted
    }

    pub fn has_error(&self) -> bool {
        self.poll();
        self.director.borrow().has_error()
    }

    pub fn is_unlocked(&self) -> bool {
        self.poll();
        self.director.borrow().state().is_unlocked
    }

    pub fn is_warping(&self) -> bool {
        self.poll();
        self.director.borrow().state().is_warping
    }

    pub fn set_section(&mut self, section: &str) -> Result<(), JsValue> {
        let section: Section = section.parse().map_err(to_js)?;
        self.director.borrow_mut().set_section(section);
        Ok(())
    }

    pub fn active_section(&self) -> String {
        self.director.borrow().state().active_section.to_string()
    }

    pub fn is_playing(&self) -> bool {
        self.director.borrow().state().is_playing
    }

    pub fn toggle_play(&mut self) {
        self.director.borrow_mut().toggle_play();
    }

    /// Sync with the audio element when playback stops on its own.
    pub fn set_playing(&mut self, playing: bool) {
        self.director.borrow_mut().set_playing(playing);
    }

    pub fn next_track(&mut self) {
        self.director.borrow_mut().next_track();
    }

    pub fn prev_track(&mut self) {
        self.director.borrow_mut().prev_track();
    }

    pub fn set_track(&mut self, index: usize) {
        self.director.borrow_mut().set_track(index);
    }

    /// Index of the current track in the configured playlist.
    pub fn current_track(&self) -> usize {
        self.director.borrow().state().current_track
    }

    pub fn current_track_title(&self) -> Option<String> {
        self.director.borrow().current_track().map(|t| t.title.clone())
    }

    pub fn current_track_src(&self) -> Option<String> {
        self.director.borrow().current_track().map(|t| t.src.clone())
    }

    /// Stop every mounted loop and detach its listeners.
    pub fn destroy(&mut self) {
        let count = self.loops.len();
        for animation in &mut self.loops {
            animation.stop();
        }
        self.loops.clear();
        log::info!("experience: destroyed {} layers", count);
    }
}

/// Backdrop without a canvas. The host drives `tick` and reads the packed
/// instance buffer from linear memory.
#[wasm_bindgen]
pub struct HeadlessBackdrop {
    store: ViewStore,
    runner: LayerRunner<Starfield>,
}

#[wasm_bindgen]
impl HeadlessBackdrop {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, preset: Option<String>, seed: Option<u64>) -> Result<HeadlessBackdrop, JsValue> {
        init_logging();
        let backdrop = resolve_backdrop(preset, &BackdropConfig::default())?;
        let store = ViewStore::new();
        let starfield = Starfield::new(&backdrop, width, height, seed.unwrap_or_else(random_seed));
        let runner = LayerRunner::new(starfield, store.reader(), StepClock::per_frame());
        Ok(HeadlessBackdrop { store, runner })
    }

    pub fn tick(&mut self, dt: f32) {
        self.runner.tick(dt);
        self.runner.pack_instances();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.runner.push_input(InputEvent::Resize { width, height });
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        self.runner.push_input(InputEvent::PointerMove { x, y });
    }

    pub fn set_warping(&mut self, warping: bool) {
        self.store.set_warping(warping);
    }

    pub fn speed(&self) -> f32 {
        self.runner.layer().drive().speed()
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.runner.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.runner.instance_count()
    }

    /// Floats per packed instance.
    pub fn instance_stride(&self) -> u32 {
        DrawInstance::FLOATS as u32
    }
}
