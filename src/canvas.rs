use folio_core::{DotSurface, Hsla, Viewport};
use glam::Vec2;
use std::f64::consts::TAU;
use std::fmt::Write;
use wasm_bindgen::JsCast;
use web_sys as web;

/// 2D canvas backend for the backdrop.
pub struct CanvasSurface {
    ctx: web::CanvasRenderingContext2d,
    style: String,
    // fillStyle currently set on the context; consecutive dots mostly share it
    last_style: String,
}

impl CanvasSurface {
    /// `None` when the environment has no 2D context for this canvas.
    pub fn acquire(canvas: &web::HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            ctx,
            style: String::with_capacity(32),
            last_style: String::with_capacity(32),
        })
    }
}

impl DotSurface for CanvasSurface {
    fn clear(&mut self, viewport: Viewport) {
        // resizing the canvas resets context state, fillStyle included
        self.last_style.clear();
        self.ctx
            .clear_rect(0.0, 0.0, viewport.width as f64, viewport.height as f64);
    }

    fn fill_dot(&mut self, center: Vec2, radius: f32, color: Hsla) {
        self.style.clear();
        _ = write!(self.style, "{color}");
        if self.style != self.last_style {
            self.ctx.set_fill_style_str(&self.style);
            std::mem::swap(&mut self.style, &mut self.last_style);
        }
        self.ctx.begin_path();
        _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
        self.ctx.fill();
    }
}

/// Match the canvas backing store to the viewport, one unit per CSS pixel.
pub fn fit_to_viewport(canvas: &web::HtmlCanvasElement, viewport: Viewport) {
    canvas.set_width(viewport.width.max(0.0) as u32);
    canvas.set_height(viewport.height.max(0.0) as u32);
}
