//! Self-rescheduling `requestAnimationFrame` loop with owned event listeners.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Event, EventTarget, Window};
use warp_engine::{LoopControl, LoopToken};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

/// One running frame loop. The next frame is requested only after the current tick
/// completes. Stopping (or dropping) cancels the pending frame and detaches every
/// listener registered through [`AnimationLoop::listen`].
pub struct AnimationLoop {
    window: Window,
    control: LoopControl,
    frame: FrameCallback,
    pending: Rc<Cell<Option<i32>>>,
    listeners: Vec<Listener>,
}

fn request(window: &Window, frame: &FrameCallback, pending: &Cell<Option<i32>>) {
    let borrow = frame.borrow();
    let Some(callback) = borrow.as_ref() else {
        return;
    };
    match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
        Ok(id) => pending.set(Some(id)),
        Err(err) => log::warn!("animation: requestAnimationFrame failed: {:?}", err),
    }
}

impl AnimationLoop {
    /// Start ticking `tick` with the frame timestamp in milliseconds.
    pub fn start(window: &Window, mut tick: impl FnMut(f64) + 'static) -> Result<Self, JsValue> {
        let mut control = LoopControl::new();
        let token: LoopToken = control.start();
        let frame: FrameCallback = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));

        let next_frame = Rc::clone(&frame);
        let next_pending = Rc::clone(&pending);
        let next_window = window.clone();
        *frame.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
            next_pending.set(None);
            if !token.is_live() {
                return;
            }
            tick(timestamp);
            if token.is_live() {
                request(&next_window, &next_frame, &next_pending);
            }
        }) as Box<dyn FnMut(f64)>));

        let animation = Self {
            window: window.clone(),
            control,
            frame,
            pending,
            listeners: Vec::new(),
        };
        request(&animation.window, &animation.frame, &animation.pending);
        if animation.pending.get().is_none() {
            return Err(JsValue::from_str("could not schedule the first frame"));
        }
        Ok(animation)
    }

    /// Attach a listener that lives exactly as long as this loop.
    pub fn listen(
        &mut self,
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<(), JsValue> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        self.listeners.push(Listener {
            target: target.clone(),
            event,
            callback,
        });
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.control.is_running()
    }

    /// Cancel the pending frame and remove all listeners. Safe to call twice.
    pub fn stop(&mut self) {
        if !self.control.stop() {
            return;
        }
        if let Some(id) = self.pending.take() {
            if let Err(err) = self.window.cancel_animation_frame(id) {
                log::warn!("animation: cancelAnimationFrame failed: {:?}", err);
            }
        }
        for listener in self.listeners.drain(..) {
            let removed = listener.target.remove_event_listener_with_callback(
                listener.event,
                listener.callback.as_ref().unchecked_ref(),
            );
            if let Err(err) = removed {
                log::warn!("animation: removing {} listener failed: {:?}", listener.event, err);
            }
        }
        // Breaks the closure's reference to itself.
        self.frame.borrow_mut().take();
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
