//! Canvas 2D implementation of [`Surface`]

use std::collections::HashMap;

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::{ImageId, Paint, Rect, Surface};

/// Draws onto a `<canvas>` through its 2D context
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    images: HashMap<ImageId, HtmlImageElement>,
}

impl CanvasSurface {
    /// Grab the 2D context and start loading every image
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;

        let mut images = HashMap::new();
        for id in ImageId::ALL {
            match HtmlImageElement::new() {
                Ok(img) => {
                    img.set_src(id.path());
                    images.insert(id, img);
                }
                Err(_) => log::warn!("Could not create image element for {:?}", id),
            }
        }

        Some(Self { canvas, ctx, images })
    }

    /// Match the backing store to the given CSS size
    pub fn resize(&self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f32, height: f32) {
        self.ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: Paint) {
        self.ctx.set_fill_style_str(&paint.css());
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius.max(0.0) as f64,
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx.fill();
    }

    fn stroke_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32, width: f32, paint: Paint) {
        self.ctx.set_stroke_style_str(&paint.css());
        self.ctx.set_line_width(width as f64);
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius.max(0.0) as f64,
            start as f64,
            end as f64,
        );
        self.ctx.stroke();
    }

    fn draw_image(&mut self, image: ImageId, dst: Rect) {
        let Some(img) = self.images.get(&image) else { return };
        // Not decoded yet; skip rather than throw
        if !img.complete() || img.natural_width() == 0 {
            return;
        }
        let _ = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
            img,
            dst.x as f64,
            dst.y as f64,
            dst.w as f64,
            dst.h as f64,
        );
    }

    fn draw_sprite(&mut self, image: ImageId, src: Rect, dst: Rect) {
        let Some(img) = self.images.get(&image) else { return };
        if !img.complete() || img.natural_width() == 0 {
            return;
        }
        let _ = self
            .ctx
            .draw_image_with_html_image_element_and_sw_and_sh_and_dx_and_dy_and_dw_and_dh(
                img,
                src.x as f64,
                src.y as f64,
                src.w as f64,
                src.h as f64,
                dst.x as f64,
                dst.y as f64,
                dst.w as f64,
                dst.h as f64,
            );
    }

    fn text(&mut self, text: &str, center: Vec2, size_px: f32, fill: Paint, stroke: Paint) {
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.ctx
            .set_font(&format!("{}px/1.1 ui-rounded, system-ui, sans-serif", size_px.floor()));
        self.ctx.set_stroke_style_str(&stroke.css());
        self.ctx.set_line_width(3.0);
        self.ctx.set_fill_style_str(&fill.css());
        let _ = self.ctx.stroke_text(text, center.x as f64, center.y as f64);
        let _ = self.ctx.fill_text(text, center.x as f64, center.y as f64);
    }
}
