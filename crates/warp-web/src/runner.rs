use glam::Vec2;
use warp_engine::{
    DrawList, Frame, InputEvent, InputQueue, InstanceBuffer, Layer, StepClock, ViewReader,
};

/// Generic layer runner that wires one [`Layer`] to the frame loop.
///
/// wasm-bindgen cannot export generic structs, so the exported types in this crate
/// hold concrete `LayerRunner<Starfield>` / `LayerRunner<CursorTrail>` values.
pub struct LayerRunner<L: Layer> {
    layer: L,
    view: ViewReader,
    input: InputQueue,
    clock: StepClock,
    draw: DrawList,
    instances: InstanceBuffer,
    pointer: Option<Vec2>,
}

impl<L: Layer> LayerRunner<L> {
    pub fn new(layer: L, view: ViewReader, clock: StepClock) -> Self {
        Self {
            layer,
            view,
            input: InputQueue::new(),
            clock,
            draw: DrawList::with_capacity(1024),
            instances: InstanceBuffer::new(),
            pointer: None,
        }
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: apply queued input, step the layer, rebuild the draw list.
    /// Returns the number of update steps taken.
    pub fn tick(&mut self, dt: f32) -> u32 {
        for event in self.input.drain() {
            match event {
                InputEvent::PointerMove { x, y } => self.pointer = Some(Vec2::new(x, y)),
                InputEvent::Resize { width, height } => self.layer.resize(width, height),
            }
        }

        let frame = Frame {
            view: self.view.snapshot(),
            pointer: self.pointer,
        };
        let steps = self.clock.advance(dt);
        for _ in 0..steps {
            self.layer.update(&frame);
        }

        self.draw.clear();
        self.layer.render(&frame, &mut self.draw);
        if self.draw.skipped() > 0 {
            log::trace!("runner: {} draw commands skipped", self.draw.skipped());
        }
        steps
    }

    /// Pack the current draw list into the flat instance buffer for host reads.
    pub fn pack_instances(&mut self) {
        self.instances.pack(&self.draw);
    }

    pub fn draw_list(&self) -> &DrawList {
        &self.draw
    }

    pub fn layer(&self) -> &L {
        &self.layer
    }

    pub fn frames(&self) -> u64 {
        self.clock.frames()
    }

    // ---- Pointer accessors for host-side buffer reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.instance_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warp_engine::{
        BackdropConfig, CursorTrail, DrawCommand, RecordingSurface, Rng, Starfield, Surface,
        TrailConfig, ViewStore,
    };

    #[test]
    fn tick_renders_backdrop() {
        let store = ViewStore::new();
        let field = Starfield::new(&BackdropConfig::nebula(), 640.0, 480.0, 7);
        let mut runner = LayerRunner::new(field, store.reader(), StepClock::per_frame());
        assert_eq!(runner.tick(0.016), 1);
        assert!(!runner.draw_list().is_empty());
        assert_eq!(runner.instance_count(), 0, "instances only packed on request");
        runner.pack_instances();
        assert_eq!(runner.instance_count() as usize, runner.draw_list().len());
    }

    #[test]
    fn presents_every_tick_and_follows_resize() {
        let store = ViewStore::new();
        let field = Starfield::new(&BackdropConfig::tunnel(), 640.0, 480.0, 11);
        let mut runner = LayerRunner::new(field, store.reader(), StepClock::per_frame());
        let mut surface = RecordingSurface::new(640.0, 480.0);
        for _ in 0..3 {
            runner.tick(0.016);
            surface.present(runner.draw_list());
        }
        assert_eq!(surface.frames, 3);
        assert!(matches!(surface.last[0], DrawCommand::Fill { .. }));
        assert_eq!(surface.last.len(), runner.draw_list().len());

        surface.resize(320.0, 200.0);
        let (width, height) = surface.size();
        runner.push_input(InputEvent::Resize { width, height });
        runner.tick(0.016);
        surface.present(runner.draw_list());
        assert_eq!(runner.layer().fields()[0].size(), (320.0, 200.0));
        assert_eq!(surface.frames, 4);
    }

    #[test]
    fn warp_flag_reaches_layer() {
        let mut store = ViewStore::new();
        let field = Starfield::new(&BackdropConfig::nebula(), 640.0, 480.0, 7);
        let mut runner = LayerRunner::new(field, store.reader(), StepClock::per_frame());
        runner.tick(0.016);
        let cruising = runner.layer().drive().speed();
        store.set_warping(true);
        for _ in 0..10 {
            runner.tick(0.016);
        }
        assert!(runner.layer().drive().speed() > cruising);
    }

    #[test]
    fn pointer_moves_feed_trail() {
        let store = ViewStore::new();
        let trail = CursorTrail::new(TrailConfig::default(), Rng::new(3));
        let mut runner = LayerRunner::new(trail, store.reader(), StepClock::per_frame());
        runner.push_input(InputEvent::PointerMove { x: 10.0, y: 10.0 });
        runner.tick(0.016);
        assert!(runner.layer().is_empty());
        runner.push_input(InputEvent::PointerMove { x: 60.0, y: 10.0 });
        runner.tick(0.016);
        assert_eq!(runner.layer().len(), 8);
    }

    #[test]
    fn fixed_clock_can_skip_updates() {
        let store = ViewStore::new();
        let trail = CursorTrail::new(TrailConfig::default(), Rng::new(3));
        let mut runner = LayerRunner::new(trail, store.reader(), StepClock::fixed(1.0 / 60.0, 4));
        assert_eq!(runner.tick(0.001), 0);
        assert_eq!(runner.frames(), 1);
        assert!(runner.layer().is_empty());
    }
}
