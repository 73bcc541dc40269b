//! 2D drawing surface
//!
//! Scenes draw through [`Surface`] so the simulation runs headless in tests
//! and natively. The browser implementation wraps a Canvas 2D context.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use glam::Vec2;

/// Fill/stroke colour
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    /// Hue in degrees, saturation and lightness in percent
    Hsl { h: f32, s: f32, l: f32 },
    /// 8-bit channels with alpha in [0, 1]
    Rgba { r: u8, g: u8, b: u8, a: f32 },
}

impl Paint {
    pub const fn white(a: f32) -> Self {
        Paint::Rgba { r: 255, g: 255, b: 255, a }
    }

    pub const fn black(a: f32) -> Self {
        Paint::Rgba { r: 0, g: 0, b: 0, a }
    }

    /// CSS colour string
    pub fn css(&self) -> String {
        match *self {
            Paint::Hsl { h, s, l } => format!("hsl({} {}% {}%)", h, s, l),
            Paint::Rgba { r, g, b, a } => format!("rgba({},{},{},{})", r, g, b, a),
        }
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Square of half-size `r` centred on `c`
    pub fn centered(c: Vec2, r: f32) -> Self {
        Self::new(c.x - r, c.y - r, r * 2.0, r * 2.0)
    }
}

/// Images the game blits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageId {
    Sky,
    Clouds,
    Nebula,
    /// Horizontal strip of 256px orb sprites
    Orbs,
}

impl ImageId {
    pub const ALL: [ImageId; 4] = [ImageId::Sky, ImageId::Clouds, ImageId::Nebula, ImageId::Orbs];

    pub fn path(&self) -> &'static str {
        match self {
            ImageId::Sky => "assets/bg-sky.png",
            ImageId::Clouds => "assets/bg-clouds.png",
            ImageId::Nebula => "assets/bg-nebula.png",
            ImageId::Orbs => "assets/sprites-orbs.png",
        }
    }
}

/// Drawing operations used by the game
pub trait Surface {
    fn clear(&mut self, width: f32, height: f32);
    /// Global alpha for subsequent draws
    fn set_alpha(&mut self, alpha: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: Paint);
    /// Stroke an arc from `start` to `end` radians
    fn stroke_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32, width: f32, paint: Paint);
    fn draw_image(&mut self, image: ImageId, dst: Rect);
    /// Blit the `src` region of `image` into `dst`
    fn draw_sprite(&mut self, image: ImageId, src: Rect, dst: Rect);
    /// Centred text, outlined then filled
    fn text(&mut self, text: &str, center: Vec2, size_px: f32, fill: Paint, stroke: Paint);
}

/// Surface that draws nothing (headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn clear(&mut self, _width: f32, _height: f32) {}
    fn set_alpha(&mut self, _alpha: f32) {}
    fn fill_circle(&mut self, _center: Vec2, _radius: f32, _paint: Paint) {}
    fn stroke_arc(&mut self, _c: Vec2, _r: f32, _s: f32, _e: f32, _w: f32, _p: Paint) {}
    fn draw_image(&mut self, _image: ImageId, _dst: Rect) {}
    fn draw_sprite(&mut self, _image: ImageId, _src: Rect, _dst: Rect) {}
    fn text(&mut self, _text: &str, _center: Vec2, _size_px: f32, _fill: Paint, _stroke: Paint) {}
}

/// Horizontal offsets of the cloud and nebula layers at `ts` seconds
pub fn parallax_offsets(ts: f64, width: f32) -> (f32, f32) {
    let clouds = if width > 0.0 {
        -((ts * 0.08) % width as f64) as f32
    } else {
        0.0
    };
    let nebula = ((ts * 0.12).sin() * 0.5 + 0.5) as f32 * -100.0;
    (clouds, nebula)
}

/// Draw the three-layer scrolling background
pub fn draw_parallax(surface: &mut dyn Surface, ts: f64, width: f32, height: f32) {
    let (cx, nx) = parallax_offsets(ts, width);
    surface.draw_image(ImageId::Sky, Rect::new(0.0, 0.0, width, height));
    surface.set_alpha(0.45);
    surface.draw_image(ImageId::Clouds, Rect::new(cx, 0.0, width, height));
    surface.draw_image(ImageId::Clouds, Rect::new(cx + width, 0.0, width, height));
    surface.set_alpha(0.38);
    surface.draw_image(ImageId::Nebula, Rect::new(nx, 0.0, width + 200.0, height));
    surface.set_alpha(1.0);
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Recorded draw call
    #[derive(Debug, Clone, PartialEq)]
    pub enum DrawCmd {
        Clear,
        Alpha(f32),
        Circle { center: Vec2, radius: f32 },
        Arc { center: Vec2, radius: f32, start: f32, end: f32, paint: Paint },
        Image(ImageId, Rect),
        Sprite { src: Rect, dst: Rect },
        Text(String),
    }

    /// Surface that records every call
    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub cmds: Vec<DrawCmd>,
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self, _width: f32, _height: f32) {
            self.cmds.push(DrawCmd::Clear);
        }
        fn set_alpha(&mut self, alpha: f32) {
            self.cmds.push(DrawCmd::Alpha(alpha));
        }
        fn fill_circle(&mut self, center: Vec2, radius: f32, _paint: Paint) {
            self.cmds.push(DrawCmd::Circle { center, radius });
        }
        fn stroke_arc(&mut self, center: Vec2, radius: f32, start: f32, end: f32, _w: f32, paint: Paint) {
            self.cmds.push(DrawCmd::Arc { center, radius, start, end, paint });
        }
        fn draw_image(&mut self, image: ImageId, dst: Rect) {
            self.cmds.push(DrawCmd::Image(image, dst));
        }
        fn draw_sprite(&mut self, _image: ImageId, src: Rect, dst: Rect) {
            self.cmds.push(DrawCmd::Sprite { src, dst });
        }
        fn text(&mut self, text: &str, _center: Vec2, _size_px: f32, _fill: Paint, _stroke: Paint) {
            self.cmds.push(DrawCmd::Text(text.to_string()));
        }
    }
}
