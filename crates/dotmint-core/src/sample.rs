//! Convert an RGBA image into a grid of averaged dots ("dotmint").

use crate::color::HexColor;
use crate::stroke::Dot;
use thiserror::Error;

/// Cells per side of a generated dotmint.
pub const DOTMINT_GRID: u32 = 30;

/// Sampling errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SampleError {
    #[error("Grid size must be at least 1")]
    EmptyGrid,
    #[error("Image {width}x{height} is smaller than a {grid}x{grid} grid")]
    TooSmall { width: u32, height: u32, grid: u32 },
    #[error("Expected {expected} bytes of RGBA data, got {actual}")]
    BufferSize { expected: usize, actual: usize },
}

/// Average an RGBA8 image into `grid * grid` dots, row-major.
///
/// Cell `(x, y)` starts at `floor(x * cell_w)` and spans `ceil(cell_w)`
/// pixels (clipped to the image), where `cell_w = width / grid`; likewise
/// vertically. Each channel is the floored mean of the covered pixels.
/// Alpha is ignored.
pub fn sample_dotmint(
    rgba: &[u8],
    width: u32,
    height: u32,
    grid: u32,
) -> Result<Vec<Dot>, SampleError> {
    if grid == 0 {
        return Err(SampleError::EmptyGrid);
    }
    if width < grid || height < grid {
        return Err(SampleError::TooSmall { width, height, grid });
    }
    let expected = width as usize * height as usize * 4;
    if rgba.len() != expected {
        return Err(SampleError::BufferSize {
            expected,
            actual: rgba.len(),
        });
    }

    let cell_w = width as f64 / grid as f64;
    let cell_h = height as f64 / grid as f64;
    let span_w = cell_w.ceil() as u32;
    let span_h = cell_h.ceil() as u32;

    let mut dots = Vec::with_capacity((grid * grid) as usize);
    for gy in 0..grid {
        let y0 = (gy as f64 * cell_h).floor() as u32;
        let y1 = (y0 + span_h).min(height);
        for gx in 0..grid {
            let x0 = (gx as f64 * cell_w).floor() as u32;
            let x1 = (x0 + span_w).min(width);

            let mut sums = [0u64; 3];
            let mut count = 0u64;
            for py in y0..y1 {
                let row = py as usize * width as usize;
                for px in x0..x1 {
                    let i = (row + px as usize) * 4;
                    sums[0] += rgba[i] as u64;
                    sums[1] += rgba[i + 1] as u64;
                    sums[2] += rgba[i + 2] as u64;
                    count += 1;
                }
            }

            let color = HexColor::new(
                (sums[0] / count) as u8,
                (sums[1] / count) as u8,
                (sums[2] / count) as u8,
            );
            dots.push(Dot::new(gx as i32, gy as i32, color));
        }
    }
    Ok(dots)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
        let mut data = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..width * height {
            data.extend_from_slice(&[rgb[0], rgb[1], rgb[2], 255]);
        }
        data
    }

    #[test]
    fn test_solid_image() {
        let data = solid(60, 60, [10, 20, 30]);
        let dots = sample_dotmint(&data, 60, 60, DOTMINT_GRID).unwrap();
        assert_eq!(dots.len(), 900);
        assert!(dots.iter().all(|d| d.color == HexColor::new(10, 20, 30)));
        assert_eq!(dots[0].position.x, 0);
        assert_eq!(dots[31].position.x, 1);
        assert_eq!(dots[31].position.y, 1);
    }

    #[test]
    fn test_split_image() {
        // Left half red, right half blue
        let mut data = Vec::new();
        for _y in 0..4 {
            for x in 0..4 {
                if x < 2 {
                    data.extend_from_slice(&[255, 0, 0, 255]);
                } else {
                    data.extend_from_slice(&[0, 0, 255, 255]);
                }
            }
        }
        let dots = sample_dotmint(&data, 4, 4, 2).unwrap();
        assert_eq!(dots[0].color, HexColor::new(255, 0, 0));
        assert_eq!(dots[1].color, HexColor::new(0, 0, 255));
        assert_eq!(dots[2].color, HexColor::new(255, 0, 0));
        assert_eq!(dots[3].color, HexColor::new(0, 0, 255));
    }

    #[test]
    fn test_mean_is_floored() {
        // One cell of two pixels: 0 and 255 -> 127
        let data = vec![0, 0, 0, 255, 255, 255, 255, 255];
        let dots = sample_dotmint(&data, 2, 1, 1).unwrap();
        assert_eq!(dots[0].color, HexColor::new(127, 127, 127));
    }

    #[test]
    fn test_fractional_cells_cover_image() {
        let data = solid(100, 100, [200, 100, 50]);
        let dots = sample_dotmint(&data, 100, 100, 30).unwrap();
        assert_eq!(dots.len(), 900);
        assert!(dots.iter().all(|d| d.color == HexColor::new(200, 100, 50)));
    }

    #[test]
    fn test_invalid_input() {
        assert_eq!(sample_dotmint(&[], 0, 0, 0), Err(SampleError::EmptyGrid));
        assert!(matches!(
            sample_dotmint(&solid(10, 10, [0, 0, 0]), 10, 10, 30),
            Err(SampleError::TooSmall { .. })
        ));
        assert!(matches!(
            sample_dotmint(&[0; 12], 2, 2, 1),
            Err(SampleError::BufferSize { expected: 16, actual: 12 })
        ));
    }
}
