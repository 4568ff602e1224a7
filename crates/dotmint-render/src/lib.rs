//! DotMint Render Library
//!
//! Raster surfaces, grid rendering, PNG export and image sampling for
//! DotMint.

pub mod decode;
pub mod editor;
pub mod export;
pub mod generate;
mod renderer;
mod surface;

pub use decode::dotmint_from_image;
pub use editor::Editor;
pub use export::{EXPORT_FILE_NAME, encode_png, render_png, save_png};
pub use generate::{GenerateError, Generated, generate_dotmint};
pub use renderer::{GridRenderer, GridStyle, RenderContext, RenderError, RenderResult, to_color};
pub use surface::{PixelSurface, Surface};
