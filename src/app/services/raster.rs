use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};

use crate::app::domain::stroke::{Point, Snapshot};
use crate::app::infrastructure::error::Result;

/// Pen settings applied to every segment. Caps and joins are always round:
/// each segment is painted as a capsule around its centre line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub width: f32,
    pub color: [u8; 3],
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: 2.0,
            color: [0, 0, 0],
        }
    }
}

/// RGBA pixel canvas with a transparent background.
pub struct Canvas {
    pixels: RgbaImage,
    style: StrokeStyle,
}

impl Canvas {
    pub fn new(width: u32, height: u32, style: StrokeStyle) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
            style,
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    /// Raw RGBA bytes, row-major.
    pub fn as_rgba(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    pub fn pixel_alpha(&self, x: u32, y: u32) -> u8 {
        self.pixels.get_pixel(x, y)[3]
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.pixels().all(|p| p[3] == 0)
    }

    pub fn clear(&mut self) {
        for p in self.pixels.pixels_mut() {
            *p = Rgba([0, 0, 0, 0]);
        }
    }

    /// A zero-length segment: a round dot the size of the pen.
    pub fn draw_dot(&mut self, at: Point) {
        self.draw_segment(at, at);
    }

    pub fn draw_segment(&mut self, from: Point, to: Point) {
        let w = self.width();
        let h = self.height();
        if w == 0 || h == 0 {
            return;
        }

        let radius = (self.style.width / 2.0).max(0.5);
        let reach = radius + 1.0;
        let min_x = (from.x.min(to.x) - reach).floor().max(0.0) as u32;
        let min_y = (from.y.min(to.y) - reach).floor().max(0.0) as u32;
        let max_x = (from.x.max(to.x) + reach).ceil().min((w - 1) as f32);
        let max_y = (from.y.max(to.y) + reach).ceil().min((h - 1) as f32);
        if max_x < 0.0 || max_y < 0.0 {
            return;
        }
        let (max_x, max_y) = (max_x as u32, max_y as u32);

        let [r, g, b] = self.style.color;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let centre = Point::new(x as f32 + 0.5, y as f32 + 0.5);
                let d = distance_to_segment(centre, from, to);
                let coverage = (radius + 0.5 - d).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    blend(self.pixels.get_pixel_mut(x, y), [r, g, b], coverage);
                }
            }
        }
    }

    /// Encode the whole canvas as PNG.
    pub fn export(&self) -> Result<Snapshot> {
        let mut bytes = Vec::new();
        self.pixels
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(Snapshot::new(bytes, self.width(), self.height()))
    }
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f32 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let (cx, cy) = (a.x + t * dx, a.y + t * dy);
    ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt()
}

/// Source-over blend of an opaque colour at `coverage` onto `dst`.
fn blend(dst: &mut Rgba<u8>, color: [u8; 3], coverage: f32) {
    let src_a = coverage;
    let dst_a = dst[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a <= 0.0 {
        return;
    }
    for i in 0..3 {
        let src_c = color[i] as f32;
        let dst_c = dst[i] as f32;
        let out_c = (src_c * src_a + dst_c * dst_a * (1.0 - src_a)) / out_a;
        dst[i] = out_c.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
}
