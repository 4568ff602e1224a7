//! Pointer events and the mapping from canvas pixels to grid cells.

use crate::stroke::GridPos;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Edge length of one grid cell, in canvas pixels.
pub const CELL_SIZE: u32 = 20;

/// Edge length of the square canvas, in pixels (30 cells).
pub const CANVAS_SIZE: u32 = 600;

/// Pointer event in canvas pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
    /// The pointer left the canvas bounds.
    Leave,
}

impl PointerEvent {
    pub fn position(&self) -> Option<Point> {
        match self {
            PointerEvent::Down { position }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position } => Some(*position),
            PointerEvent::Leave => None,
        }
    }
}

/// Size of the drawing surface and its cell grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasGeometry {
    pub cell_size: u32,
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasGeometry {
    fn default() -> Self {
        Self {
            cell_size: CELL_SIZE,
            width: CANVAS_SIZE,
            height: CANVAS_SIZE,
        }
    }
}

impl CanvasGeometry {
    pub fn new(cell_size: u32, width: u32, height: u32) -> Self {
        Self {
            cell_size: cell_size.max(1),
            width,
            height,
        }
    }

    /// Grid cell under a canvas point, or `None` outside the canvas.
    pub fn cell_at(&self, point: Point) -> Option<GridPos> {
        if !point.x.is_finite() || !point.y.is_finite() {
            return None;
        }
        if point.x < 0.0
            || point.y < 0.0
            || point.x >= self.width as f64
            || point.y >= self.height as f64
        {
            return None;
        }
        let size = self.cell_size as f64;
        Some(GridPos::new(
            (point.x / size).floor() as i32,
            (point.y / size).floor() as i32,
        ))
    }

    /// Top-left pixel of a cell.
    pub fn cell_origin(&self, cell: GridPos) -> Point {
        let size = self.cell_size as f64;
        Point::new(cell.x as f64 * size, cell.y as f64 * size)
    }

    /// Pixel rectangle covered by a cell.
    pub fn cell_rect(&self, cell: GridPos) -> Rect {
        let size = self.cell_size as f64;
        Rect::from_origin_size(self.cell_origin(cell), (size, size))
    }

    /// Full canvas rectangle.
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width as f64, self.height as f64)
    }

    pub fn columns(&self) -> u32 {
        self.width.div_ceil(self.cell_size.max(1))
    }

    pub fn rows(&self) -> u32 {
        self.height.div_ceil(self.cell_size.max(1))
    }
}
