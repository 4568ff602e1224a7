//! Decode image bytes into a dot dataset.

use crate::renderer::RenderResult;
use dotmint_core::sample::sample_dotmint;
use dotmint_core::stroke::Dot;
use image::imageops::FilterType;

/// Edge length images are scaled to before sampling.
pub const SAMPLE_SIZE: u32 = 1024;

/// Decode a PNG, JPEG or WebP image and sample it into `grid * grid` dots.
///
/// The image is stretched to a `SAMPLE_SIZE` square first, so every input
/// aspect ratio yields square cells.
pub fn dotmint_from_image(bytes: &[u8], grid: u32) -> RenderResult<Vec<Dot>> {
    let image = image::load_from_memory(bytes)?;
    log::debug!("Decoded {}x{} image for sampling", image.width(), image.height());
    let square = image
        .resize_exact(SAMPLE_SIZE, SAMPLE_SIZE, FilterType::Triangle)
        .to_rgba8();
    Ok(sample_dotmint(square.as_raw(), SAMPLE_SIZE, SAMPLE_SIZE, grid)?)
}
