use crate::api::layer::{Frame, Layer};
use crate::config::BackdropConfig;
use crate::core::rng::Rng;
use crate::renderer::color::Rgba;
use crate::renderer::draw::DrawList;
use crate::systems::field::ParticleField;
use crate::systems::warp::WarpDrive;

/// Full-canvas backdrop: stacked particle fields moved by one shared warp drive.
pub struct Starfield {
    drive: WarpDrive,
    fields: Vec<ParticleField>,
    background: Option<Rgba>,
}

impl Starfield {
    pub fn new(config: &BackdropConfig, width: f32, height: f32, seed: u64) -> Self {
        let mut root = Rng::new(seed);
        let fields = config
            .fields
            .iter()
            .enumerate()
            .map(|(i, field)| ParticleField::new(field.clone(), width, height, root.fork(i as u64)))
            .collect();
        Self {
            drive: WarpDrive::new(config.warp),
            fields,
            background: config.background,
        }
    }

    pub fn drive(&self) -> &WarpDrive {
        &self.drive
    }

    pub fn fields(&self) -> &[ParticleField] {
        &self.fields
    }

    pub fn particle_count(&self) -> usize {
        self.fields.iter().map(ParticleField::len).sum()
    }
}

impl Layer for Starfield {
    fn resize(&mut self, width: f32, height: f32) {
        for field in &mut self.fields {
            field.resize(width, height);
        }
        log::debug!("starfield: resized to {}x{}, {} particles", width, height, self.particle_count());
    }

    fn update(&mut self, frame: &Frame) {
        let speed = self.drive.step(frame.view.is_warping);
        for field in &mut self.fields {
            field.update(speed);
        }
    }

    fn render(&self, frame: &Frame, out: &mut DrawList) {
        match self.background {
            Some(color) => out.fill(color),
            None => out.clear_surface(),
        }
        let speed = self.drive.speed();
        for field in &self.fields {
            field.render(speed, frame.view.is_warping, out);
        }
    }
}
