//! PNG export.

use crate::renderer::{GridRenderer, RenderContext, RenderResult};
use crate::surface::PixelSurface;
use std::path::Path;

/// Default file name for exported images.
pub const EXPORT_FILE_NAME: &str = "pixel-art.png";

/// Encode an RGBA8 buffer as PNG.
pub fn encode_png(rgba: &[u8], width: u32, height: u32) -> RenderResult<Vec<u8>> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(rgba)?;
        writer.finish()?;
    }
    Ok(png_data)
}

/// Render `ctx` onto a fresh surface and encode it.
pub fn render_png(renderer: &GridRenderer, ctx: &RenderContext<'_>) -> RenderResult<Vec<u8>> {
    let geometry = renderer.geometry;
    let mut surface = PixelSurface::new(geometry.width, geometry.height);
    renderer.render(&mut surface, ctx);
    encode_png(surface.as_raw(), surface.width(), surface.height())
}

/// Render `ctx` and write the PNG to `path`.
pub fn save_png(
    renderer: &GridRenderer,
    ctx: &RenderContext<'_>,
    path: impl AsRef<Path>,
) -> RenderResult<()> {
    let path = path.as_ref();
    let png_data = render_png(renderer, ctx)?;
    std::fs::write(path, &png_data)?;
    log::info!("Exported {} ({} bytes)", path.display(), png_data.len());
    Ok(())
}
