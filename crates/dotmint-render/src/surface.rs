//! Raster targets for the grid renderer.

use kurbo::Rect;
use peniko::Color;

/// A raster target the renderer can paint into.
pub trait Surface {
    /// Width and height in pixels.
    fn size(&self) -> (u32, u32);

    /// Fill the pixels covered by `rect`, clipped to the surface.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// RGBA value of one pixel, or `None` outside the surface.
    fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]>;
}

/// In-memory RGBA8 surface.
///
/// Fills overwrite pixels; there is no blending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelSurface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelSurface {
    /// Create a fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes, row-major.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Clamp one rect edge pair to pixel indices.
    fn span(lo: f64, hi: f64, limit: u32) -> (u32, u32) {
        let clamp = |v: f64| v.round().clamp(0.0, limit as f64) as u32;
        (clamp(lo), clamp(hi))
    }
}

impl Surface for PixelSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let rect = rect.abs();
        let (x0, x1) = Self::span(rect.x0, rect.x1, self.width);
        let (y0, y1) = Self::span(rect.y0, rect.y1, self.height);
        let rgba = color.to_rgba8();
        let pixel = [rgba.r, rgba.g, rgba.b, rgba.a];

        for y in y0..y1 {
            let row = y as usize * self.width as usize;
            for x in x0..x1 {
                let i = (row + x as usize) * 4;
                self.data[i..i + 4].copy_from_slice(&pixel);
            }
        }
    }

    fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let mut out = [0; 4];
        out.copy_from_slice(&self.data[i..i + 4]);
        Some(out)
    }
}
