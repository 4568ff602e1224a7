//! An editor session bound to a raster surface.

use crate::export::encode_png;
use crate::renderer::{GridRenderer, RenderContext, RenderResult};
use crate::surface::{PixelSurface, Surface};
use dotmint_core::color::HexColor;
use dotmint_core::history::Snapshot;
use dotmint_core::input::PointerEvent;
use dotmint_core::session::{Damage, EditorSession};
use dotmint_core::stroke::Dot;
use dotmint_core::tools::ToolKind;

/// Keeps a surface in sync with an [`EditorSession`].
///
/// The surface is optional: until one is attached every paint request is
/// skipped, while the session itself keeps working.
pub struct Editor<S: Surface> {
    session: EditorSession,
    renderer: GridRenderer,
    surface: Option<S>,
}

impl<S: Surface> Editor<S> {
    pub fn new(session: EditorSession) -> Self {
        let renderer = GridRenderer::new(*session.geometry());
        Self {
            session,
            renderer,
            surface: None,
        }
    }

    pub fn with_renderer(mut self, renderer: GridRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    /// Attach a surface and paint the current canvas onto it.
    pub fn attach_surface(&mut self, surface: S) {
        self.surface = Some(surface);
        self.present(&[Damage::Full]);
    }

    /// Detach and return the surface.
    pub fn detach_surface(&mut self) -> Option<S> {
        self.surface.take()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn renderer(&self) -> &GridRenderer {
        &self.renderer
    }

    fn present(&mut self, damage: &[Damage]) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        if damage.is_empty() {
            return;
        }
        let ctx = RenderContext::new(self.session.strokes(), self.session.background_color());
        self.renderer.apply_damage(surface, damage, &ctx);
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        let damage = self.session.handle_pointer(event);
        self.present(&damage);
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.session.set_tool(tool);
    }

    pub fn set_color(&mut self, color: HexColor) {
        self.session.set_color(color);
    }

    pub fn toggle_preserve_background(&mut self) {
        self.session.preserve_background = !self.session.preserve_background;
    }

    pub fn undo(&mut self) {
        let damage = self.session.undo();
        self.present(&damage);
    }

    pub fn redo(&mut self) {
        let damage = self.session.redo();
        self.present(&damage);
    }

    pub fn clear_canvas(&mut self) {
        let damage = self.session.clear_canvas();
        self.present(&damage);
    }

    pub fn load_dataset(&mut self, dots: Vec<Dot>) {
        let damage = self.session.load_dataset(dots);
        self.present(&damage);
    }

    pub fn load_snapshot(&mut self, snapshot: &Snapshot) {
        let damage = self.session.load_snapshot(snapshot);
        self.present(&damage);
    }

    pub fn load_share_token(&mut self, input: &str) {
        let damage = self.session.load_share_token(input);
        self.present(&damage);
    }

    /// Encode the drawing as PNG without grid lines.
    pub fn export_png(&self) -> RenderResult<Vec<u8>> {
        let geometry = self.session.geometry();
        let mut surface = PixelSurface::new(geometry.width, geometry.height);
        let ctx = RenderContext::export(
            self.session.strokes(),
            self.session.background_color(),
            self.session.preserve_background,
        );
        self.renderer.render(&mut surface, &ctx);
        encode_png(surface.as_raw(), surface.width(), surface.height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dotmint_core::input::CanvasGeometry;
    use dotmint_core::session::SessionConfig;
    use kurbo::Point;

    const RED: [u8; 4] = [0xFF, 0x00, 0x4D, 0xFF];
    const WHITE: [u8; 4] = [0xFF, 0xFF, 0xFF, 0xFF];

    fn editor() -> Editor<PixelSurface> {
        let config = SessionConfig {
            geometry: CanvasGeometry::new(10, 50, 50),
            ..SessionConfig::default()
        };
        Editor::new(EditorSession::new(config))
    }

    fn click(editor: &mut Editor<PixelSurface>, x: f64, y: f64) {
        let position = Point::new(x, y);
        editor.handle_pointer(PointerEvent::Down { position });
        editor.handle_pointer(PointerEvent::Up { position });
    }

    #[test]
    fn test_without_surface_is_noop() {
        let mut editor = editor();
        click(&mut editor, 15.0, 15.0);
        assert!(editor.surface().is_none());
        assert_eq!(editor.session().strokes().len(), 1);
    }

    #[test]
    fn test_attach_paints_existing_drawing() {
        let mut editor = editor();
        click(&mut editor, 15.0, 15.0);
        editor.attach_surface(PixelSurface::new(50, 50));

        let surface = editor.surface().unwrap();
        assert_eq!(surface.pixel(15, 15), Some(RED));
        assert_eq!(surface.pixel(35, 35), Some(WHITE));
    }

    #[test]
    fn test_draw_and_undo_repaints() {
        let mut editor = editor();
        editor.attach_surface(PixelSurface::new(50, 50));

        click(&mut editor, 25.0, 25.0);
        assert_eq!(editor.surface().unwrap().pixel(25, 25), Some(RED));

        editor.undo();
        assert_eq!(editor.surface().unwrap().pixel(25, 25), Some(WHITE));

        editor.redo();
        assert_eq!(editor.surface().unwrap().pixel(25, 25), Some(RED));
    }

    #[test]
    fn test_export_respects_preserve_background() {
        let mut editor = editor();
        click(&mut editor, 5.0, 5.0);

        let with_bg = image::load_from_memory(&editor.export_png().unwrap())
            .unwrap()
            .to_rgba8();
        assert_eq!(with_bg.get_pixel(45, 45).0, WHITE);
        assert_eq!(with_bg.get_pixel(0, 0).0, RED);

        editor.toggle_preserve_background();
        let without_bg = image::load_from_memory(&editor.export_png().unwrap())
            .unwrap()
            .to_rgba8();
        assert_eq!(without_bg.get_pixel(45, 45).0, [0, 0, 0, 0]);
    }
}
