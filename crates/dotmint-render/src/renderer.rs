//! Grid rendering of the dot canvas.

use crate::surface::Surface;
use dotmint_core::color::HexColor;
use dotmint_core::input::CanvasGeometry;
use dotmint_core::sample::SampleError;
use dotmint_core::session::Damage;
use dotmint_core::stroke::{GridPos, StrokeStore};
use kurbo::Rect;
use peniko::Color;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image decoding failed: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Sampling failed: {0}")]
    Sample(#[from] SampleError),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Convert a model color to an opaque paint color.
pub fn to_color(color: HexColor) -> Color {
    let [r, g, b] = color.to_rgb8();
    Color::from_rgba8(r, g, b, 255)
}

/// Fully transparent black.
fn transparent() -> Color {
    Color::from_rgba8(0, 0, 0, 0)
}

/// Grid display style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridStyle {
    /// No grid, as in exported images.
    None,
    /// 1 px lines on every cell boundary.
    #[default]
    Lines,
}

/// What to draw in one frame.
pub struct RenderContext<'a> {
    /// Dots to draw, in paint order.
    pub strokes: &'a StrokeStore,
    /// Background fill. `None` leaves the surface transparent.
    pub background_color: Option<HexColor>,
    /// Grid display style.
    pub grid_style: GridStyle,
}

impl<'a> RenderContext<'a> {
    /// Create a context for the interactive canvas.
    pub fn new(strokes: &'a StrokeStore, background_color: HexColor) -> Self {
        Self {
            strokes,
            background_color: Some(background_color),
            grid_style: GridStyle::Lines,
        }
    }

    /// Create a context for an exported image: no grid lines, and the
    /// background only when it is preserved.
    pub fn export(
        strokes: &'a StrokeStore,
        background_color: HexColor,
        preserve_background: bool,
    ) -> Self {
        Self {
            strokes,
            background_color: preserve_background.then_some(background_color),
            grid_style: GridStyle::None,
        }
    }

    /// Set the grid style.
    pub fn with_grid_style(mut self, grid_style: GridStyle) -> Self {
        self.grid_style = grid_style;
        self
    }
}

/// Paints dots and grid lines onto a [`Surface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridRenderer {
    pub geometry: CanvasGeometry,
    pub grid_color: HexColor,
}

impl Default for GridRenderer {
    fn default() -> Self {
        Self::new(CanvasGeometry::default())
    }
}

impl GridRenderer {
    pub fn new(geometry: CanvasGeometry) -> Self {
        Self {
            geometry,
            grid_color: HexColor::GRID_LINE,
        }
    }

    pub fn with_grid_color(mut self, grid_color: HexColor) -> Self {
        self.grid_color = grid_color;
        self
    }

    /// Redraw the whole surface. Rendering the same context twice yields
    /// the same pixels.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S, ctx: &RenderContext<'_>) {
        let (width, height) = surface.size();
        let full = Rect::new(0.0, 0.0, width as f64, height as f64);
        let background = ctx.background_color.map(to_color).unwrap_or_else(transparent);
        surface.fill_rect(full, background);

        for dot in ctx.strokes {
            surface.fill_rect(self.geometry.cell_rect(dot.position), to_color(dot.color));
        }

        if ctx.grid_style == GridStyle::Lines {
            self.draw_grid(surface);
        }
    }

    /// Overlay grid lines every cell across the full surface, far edges
    /// included.
    pub fn draw_grid<S: Surface + ?Sized>(&self, surface: &mut S) {
        let (width, height) = surface.size();
        if width == 0 || height == 0 {
            return;
        }
        let color = to_color(self.grid_color);
        let step = self.geometry.cell_size.max(1) as usize;

        for x in (0..=width).step_by(step) {
            let x = x.min(width - 1) as f64;
            surface.fill_rect(Rect::new(x, 0.0, x + 1.0, height as f64), color);
        }
        for y in (0..=height).step_by(step) {
            let y = y.min(height - 1) as f64;
            surface.fill_rect(Rect::new(0.0, y, width as f64, y + 1.0), color);
        }
    }

    /// Fill one cell and redraw its outline.
    pub fn paint_cell<S: Surface + ?Sized>(&self, surface: &mut S, cell: GridPos, color: HexColor) {
        let rect = self.geometry.cell_rect(cell);
        surface.fill_rect(rect, to_color(color));

        let (width, height) = surface.size();
        if width == 0 || height == 0 {
            return;
        }
        let line = to_color(self.grid_color);
        // Edges on the far canvas border land on the last pixel row/column
        let right = rect.x1.min(width as f64 - 1.0);
        let bottom = rect.y1.min(height as f64 - 1.0);
        surface.fill_rect(Rect::new(rect.x0, rect.y0, rect.x1, rect.y0 + 1.0), line);
        surface.fill_rect(Rect::new(rect.x0, bottom, rect.x1, bottom + 1.0), line);
        surface.fill_rect(Rect::new(rect.x0, rect.y0, rect.x0 + 1.0, rect.y1), line);
        surface.fill_rect(Rect::new(right, rect.y0, right + 1.0, rect.y1), line);
    }

    /// Repaint what a list of session damage entries describes.
    pub fn apply_damage<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        damage: &[Damage],
        ctx: &RenderContext<'_>,
    ) {
        if damage.contains(&Damage::Full) {
            self.render(surface, ctx);
            return;
        }
        for entry in damage {
            if let Damage::Cell { position, color } = entry {
                self.paint_cell(surface, *position, *color);
            }
        }
    }
}
