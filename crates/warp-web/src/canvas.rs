use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};
use warp_engine::{DrawCommand, DrawList, Rgba, Surface};

/// Canvas 2D backend. Owns its canvas exclusively for the lifetime of a mount.
pub struct Canvas2dSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    width: f32,
    height: f32,
}

impl Canvas2dSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;
        let width = canvas.width() as f32;
        let height = canvas.height() as f32;
        Ok(Self {
            canvas,
            ctx,
            width,
            height,
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Size the canvas to the window's inner dimensions.
    pub fn fit_to_window(&mut self, window: &Window) -> Result<(f32, f32), JsValue> {
        let width = window.inner_width()?.as_f64().unwrap_or(0.0) as f32;
        let height = window.inner_height()?.as_f64().unwrap_or(0.0) as f32;
        self.resize(width, height);
        Ok((width, height))
    }

    fn set_glow(&self, glow: f32, color: &Rgba) {
        if glow > 0.0 {
            self.ctx.set_shadow_blur(glow as f64);
            self.ctx.set_shadow_color(&color.to_css());
        } else {
            self.ctx.set_shadow_blur(0.0);
        }
    }

    fn draw(&self, command: &DrawCommand) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        match command {
            DrawCommand::Fill { color } => {
                ctx.set_shadow_blur(0.0);
                ctx.set_fill_style_str(&color.to_css());
                ctx.fill_rect(0.0, 0.0, self.width as f64, self.height as f64);
            }
            DrawCommand::Clear => {
                ctx.clear_rect(0.0, 0.0, self.width as f64, self.height as f64);
            }
            DrawCommand::Disc { center, radius, color, glow } => {
                self.set_glow(*glow, color);
                ctx.set_fill_style_str(&color.to_css());
                ctx.begin_path();
                ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU)?;
                ctx.fill();
            }
            DrawCommand::Line { from, to, width, color, glow } => {
                self.set_glow(*glow, color);
                ctx.set_stroke_style_str(&color.to_css());
                ctx.set_line_width(*width as f64);
                ctx.begin_path();
                ctx.move_to(from.x as f64, from.y as f64);
                ctx.line_to(to.x as f64, to.y as f64);
                ctx.stroke();
            }
            DrawCommand::Ellipse { center, radii, rotation, width, color } => {
                ctx.set_shadow_blur(0.0);
                ctx.set_stroke_style_str(&color.to_css());
                ctx.set_line_width(*width as f64);
                ctx.begin_path();
                ctx.ellipse(
                    center.x as f64,
                    center.y as f64,
                    radii.x as f64,
                    radii.y as f64,
                    *rotation as f64,
                    0.0,
                    TAU,
                )?;
                ctx.stroke();
            }
        }
        Ok(())
    }
}

impl Surface for Canvas2dSurface {
    fn backend(&self) -> &'static str {
        "canvas2d"
    }

    fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);
        self.canvas.set_width(self.width as u32);
        self.canvas.set_height(self.height as u32);
    }

    fn present(&mut self, list: &DrawList) {
        for command in list.commands() {
            if let Err(err) = self.draw(command) {
                log::warn!("canvas: dropping rest of frame: {:?}", err);
                break;
            }
        }
        self.ctx.set_shadow_blur(0.0);
    }
}
