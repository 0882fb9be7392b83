//! Drawing surface backed by a ratatui canvas.

use bgfx_core::Rgb;
use bgfx_field::{Point, Surface};
use ratatui::{
    Frame,
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::canvas::{Canvas, Line as CanvasLine, Points},
};

/// A filled dot, pre-sampled to canvas points.
#[derive(Debug, Clone)]
struct Dot {
    coords: Vec<(f64, f64)>,
    color: Color,
}

/// Collects one frame of lines and dots and paints them with a [`Canvas`].
///
/// Surface coordinates are CSS pixels with y pointing down; the canvas has
/// y pointing up, so every y is flipped against the surface height.
/// Terminals have no alpha, so colors are composited over the backdrop
/// before they are stored.
#[derive(Debug)]
pub struct CanvasSurface {
    backdrop: Rgb,
    cell_width: f64,
    cell_height: f64,
    width: f64,
    height: f64,
    device_pixel_ratio: f64,
    lines: Vec<CanvasLine>,
    dots: Vec<Dot>,
}

impl CanvasSurface {
    /// Create a surface for terminal cells of the given pixel size.
    pub fn new(backdrop: Rgb, cell_width: u16, cell_height: u16) -> Self {
        Self {
            backdrop,
            cell_width: cell_width.max(1) as f64,
            cell_height: cell_height.max(1) as f64,
            width: 1.0,
            height: 1.0,
            device_pixel_ratio: 1.0,
            lines: Vec::new(),
            dots: Vec::new(),
        }
    }

    /// Braille packs 2x4 dots per cell, half blocks 1x2.
    fn marker(&self) -> Marker {
        if self.device_pixel_ratio >= 2.0 {
            Marker::Braille
        } else {
            Marker::HalfBlock
        }
    }

    /// Size of one canvas dot in surface pixels.
    fn dot_pitch(&self) -> (f64, f64) {
        match self.marker() {
            Marker::Braille => (self.cell_width / 2.0, self.cell_height / 4.0),
            _ => (self.cell_width, self.cell_height / 2.0),
        }
    }

    fn flip(&self, y: f64) -> f64 {
        self.height - y
    }

    /// Number of lines in the current frame.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Number of dots in the current frame.
    pub fn dot_count(&self) -> usize {
        self.dots.len()
    }

    /// Paint the current frame into `area`.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let canvas = Canvas::default()
            .background_color(self.backdrop.into())
            .marker(self.marker())
            .x_bounds([0.0, self.width])
            .y_bounds([0.0, self.height])
            .paint(|ctx| {
                for line in &self.lines {
                    ctx.draw(line);
                }
                // Dots go on their own layer so lines never paint over them
                ctx.layer();
                for dot in &self.dots {
                    ctx.draw(&Points {
                        coords: &dot.coords,
                        color: dot.color,
                    });
                }
            });
        frame.render_widget(canvas, area);
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, pixel_width: u32, pixel_height: u32, device_pixel_ratio: f64) {
        self.device_pixel_ratio = device_pixel_ratio.max(1.0);
        self.width = (pixel_width as f64 / self.device_pixel_ratio).max(1.0);
        self.height = (pixel_height as f64 / self.device_pixel_ratio).max(1.0);
    }

    fn clear(&mut self) {
        self.lines.clear();
        self.dots.clear();
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Rgb, alpha: f64) {
        if alpha <= 0.0 {
            return;
        }
        self.lines.push(CanvasLine::new(
            from.x,
            self.flip(from.y),
            to.x,
            self.flip(to.y),
            color.over(self.backdrop, alpha).into(),
        ));
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgb, alpha: f64) {
        let (pitch_x, pitch_y) = self.dot_pitch();
        let steps_x = (radius / pitch_x).floor() as i32;
        let steps_y = (radius / pitch_y).floor() as i32;
        let cy = self.flip(center.y);

        let mut coords = Vec::with_capacity(((2 * steps_x + 1) * (2 * steps_y + 1)) as usize);
        for iy in -steps_y..=steps_y {
            for ix in -steps_x..=steps_x {
                let dx = ix as f64 * pitch_x;
                let dy = iy as f64 * pitch_y;
                if dx * dx + dy * dy <= radius * radius {
                    coords.push((center.x + dx, cy + dy));
                }
            }
        }

        self.dots.push(Dot {
            coords,
            color: color.over(self.backdrop, alpha).into(),
        });
    }
}
