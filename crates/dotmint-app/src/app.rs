//! Application configuration and subcommand implementations.

use crate::script::Script;
use anyhow::{Context, Result};
use dotmint_core::color::HexColor;
use dotmint_core::history::Snapshot;
use dotmint_core::input::{CELL_SIZE, CANVAS_SIZE, CanvasGeometry};
use dotmint_core::sample::DOTMINT_GRID;
use dotmint_core::session::{EditorSession, SessionConfig};
use dotmint_core::share;
use dotmint_render::{
    EXPORT_FILE_NAME, Editor, GridRenderer, PixelSurface, dotmint_from_image, encode_png,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Edge length of one grid cell, in pixels.
    pub cell_size: u32,
    /// Edge length of the square canvas, in pixels.
    pub canvas_size: u32,
    /// Origin that share links point at.
    pub base_url: String,
    pub grid_color: HexColor,
    pub background_color: HexColor,
    /// Whether exported PNGs include the background color.
    pub preserve_background: bool,
    /// Where PNGs are written.
    pub output: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cell_size: CELL_SIZE,
            canvas_size: CANVAS_SIZE,
            base_url: "https://dotmint.app/".to_string(),
            grid_color: HexColor::GRID_LINE,
            background_color: HexColor::WHITE,
            preserve_background: true,
            output: PathBuf::from(EXPORT_FILE_NAME),
        }
    }
}

impl AppConfig {
    /// Load a JSON config file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Invalid config {}", path.display()))
    }

    pub fn geometry(&self) -> CanvasGeometry {
        CanvasGeometry::new(self.cell_size, self.canvas_size, self.canvas_size)
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            geometry: self.geometry(),
            background_color: self.background_color,
            preserve_background: self.preserve_background,
            ..SessionConfig::default()
        }
    }
}

/// Runs subcommands against a fresh editor per invocation.
pub struct App {
    config: AppConfig,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn editor(&self) -> Editor<PixelSurface> {
        let session = EditorSession::new(self.config.session_config());
        let renderer =
            GridRenderer::new(self.config.geometry()).with_grid_color(self.config.grid_color);
        let mut editor = Editor::new(session).with_renderer(renderer);
        editor.attach_surface(PixelSurface::new(self.config.canvas_size, self.config.canvas_size));
        editor
    }

    /// Write the editor's drawing as PNG. With `grid` the live canvas is
    /// written as shown, grid lines included.
    fn write_png(&self, editor: &Editor<PixelSurface>, grid: bool) -> Result<()> {
        let png_data = match editor.surface() {
            Some(surface) if grid => {
                encode_png(surface.as_raw(), surface.width(), surface.height())?
            }
            _ => editor.export_png()?,
        };
        let path = &self.config.output;
        std::fs::write(path, &png_data)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Wrote {} ({} bytes)", path.display(), png_data.len());
        Ok(())
    }

    fn link(&self, editor: &Editor<PixelSurface>) -> Result<String> {
        Ok(editor.session().share_link(&self.config.base_url)?)
    }

    /// Replay a script, write the PNG and return the share link.
    pub fn replay(&self, script_path: &Path, grid: bool) -> Result<String> {
        let json = std::fs::read_to_string(script_path)
            .with_context(|| format!("Failed to read script {}", script_path.display()))?;
        let script = Script::from_json(&json)
            .with_context(|| format!("Invalid script {}", script_path.display()))?;
        log::info!("Replaying {} actions", script.actions.len());

        let mut editor = self.editor();
        script.replay(&mut editor);
        self.write_png(&editor, grid)?;
        self.link(&editor)
    }

    /// Render a share link or token to PNG.
    pub fn render(&self, input: &str, grid: bool) -> Result<()> {
        let snapshot = share::decode_link(input).context("Failed to decode share token")?;
        let mut editor = self.editor();
        editor.load_snapshot(&snapshot);
        self.write_png(&editor, grid)
    }

    /// Sample an image into a dataset, write the PNG and return the share
    /// link.
    pub fn sample(&self, image_path: &Path, grid: bool) -> Result<String> {
        let bytes = std::fs::read(image_path)
            .with_context(|| format!("Failed to read image {}", image_path.display()))?;
        let dots = dotmint_from_image(&bytes, DOTMINT_GRID)
            .with_context(|| format!("Failed to sample {}", image_path.display()))?;

        let mut editor = self.editor();
        editor.load_dataset(dots);
        self.write_png(&editor, grid)?;
        self.link(&editor)
    }

    /// Build a share link from a snapshot JSON file.
    pub fn share(&self, snapshot_path: &Path) -> Result<String> {
        let json = std::fs::read_to_string(snapshot_path)
            .with_context(|| format!("Failed to read snapshot {}", snapshot_path.display()))?;
        let snapshot = Snapshot::from_json(&json)
            .with_context(|| format!("Invalid snapshot {}", snapshot_path.display()))?;
        Ok(share::share_link(&self.config.base_url, &snapshot)?)
    }
}
