//! Editor session: the stroke store, history and tools of one canvas.

use crate::color::HexColor;
use crate::history::{HistoryManager, MAX_UNDO_HISTORY, Snapshot};
use crate::input::{CanvasGeometry, PointerEvent};
use crate::share::{self, ShareResult};
use crate::stroke::{Dot, GridPos, StrokeStore};
use crate::tools::{ToolKind, ToolManager, ToolTarget};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Region of the canvas that must be repainted after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Damage {
    /// Fill one cell with `color` and redraw its outline.
    Cell { position: GridPos, color: HexColor },
    /// Repaint background, every dot and the grid.
    Full,
}

/// Settings a session starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub geometry: CanvasGeometry,
    pub background_color: HexColor,
    pub selected_color: HexColor,
    pub preserve_background: bool,
    pub history_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            geometry: CanvasGeometry::default(),
            background_color: HexColor::WHITE,
            selected_color: HexColor::DEFAULT_SELECTED,
            preserve_background: true,
            history_capacity: MAX_UNDO_HISTORY,
        }
    }
}

/// One editing session. Owns everything the tools mutate.
#[derive(Debug, Clone)]
pub struct EditorSession {
    config: SessionConfig,
    strokes: StrokeStore,
    background_color: HexColor,
    history: HistoryManager,
    /// Tool manager.
    pub tool_manager: ToolManager,
    /// Whether PNG exports include the background color.
    pub preserve_background: bool,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl EditorSession {
    /// Create a session with a blank canvas. The blank canvas is the floor
    /// entry of the undo history.
    pub fn new(config: SessionConfig) -> Self {
        let history = HistoryManager::with_capacity(
            Snapshot::blank(config.background_color),
            config.history_capacity,
        );
        Self {
            config,
            strokes: StrokeStore::new(),
            background_color: config.background_color,
            history,
            tool_manager: ToolManager::with_color(config.selected_color),
            preserve_background: config.preserve_background,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn geometry(&self) -> &CanvasGeometry {
        &self.config.geometry
    }

    pub fn strokes(&self) -> &StrokeStore {
        &self.strokes
    }

    pub fn background_color(&self) -> HexColor {
        self.background_color
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn selected_color(&self) -> HexColor {
        self.tool_manager.selected_color
    }

    pub fn current_tool(&self) -> ToolKind {
        self.tool_manager.current_tool
    }

    /// Switch tools. A gesture in progress is finished and committed with
    /// the tool that started it.
    pub fn set_tool(&mut self, tool: ToolKind) {
        if self.tool_manager.is_drawing() {
            self.finish_gesture();
        }
        self.tool_manager.set_tool(tool);
    }

    pub fn set_color(&mut self, color: HexColor) {
        self.tool_manager.selected_color = color;
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Route a pointer event to the active tool.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Vec<Damage> {
        match event {
            PointerEvent::Down { position } => {
                self.tool_manager.begin();
                self.apply_at(position)
            }
            PointerEvent::Move { position } => {
                if !self.tool_manager.is_drawing() {
                    return Vec::new();
                }
                self.tool_manager.mark_moved();
                self.apply_at(position)
            }
            PointerEvent::Up { position } => {
                if !self.tool_manager.is_drawing() {
                    return Vec::new();
                }
                // A click paints its release cell too; already touched cells are skipped
                let damage = if self.tool_manager.has_moved() {
                    Vec::new()
                } else {
                    self.apply_at(position)
                };
                self.finish_gesture();
                damage
            }
            PointerEvent::Leave => {
                if self.tool_manager.is_drawing() {
                    log::debug!("Pointer left the canvas mid-gesture, committing");
                    self.finish_gesture();
                }
                Vec::new()
            }
        }
    }

    fn apply_at(&mut self, position: Point) -> Vec<Damage> {
        let Some(cell) = self.config.geometry.cell_at(position) else {
            return Vec::new();
        };
        let target = ToolTarget {
            strokes: &mut self.strokes,
            background_color: &mut self.background_color,
        };
        self.tool_manager.apply(target, cell)
    }

    fn finish_gesture(&mut self) {
        let Some(summary) = self.tool_manager.end() else {
            return;
        };
        log::debug!(
            "{} {} finished",
            summary.tool.name(),
            if summary.moved { "drag" } else { "click" }
        );
        if summary.tool.records_history() {
            self.commit();
        }
    }

    /// Record the live canvas as an undo unit.
    pub fn commit(&mut self) {
        self.history.snapshot(&self.strokes, self.background_color);
        log::debug!(
            "History: {} entries, {} dots",
            self.history.len(),
            self.strokes.len()
        );
    }

    /// Undo the last committed change. Silent no-op at the floor entry.
    pub fn undo(&mut self) -> Vec<Damage> {
        self.tool_manager.cancel();
        let Some(snapshot) = self.history.undo() else {
            return Vec::new();
        };
        snapshot.restore_into(&mut self.strokes);
        self.background_color = snapshot.background_color;
        vec![Damage::Full]
    }

    /// Redo the last undone change. Silent no-op when nothing was undone.
    pub fn redo(&mut self) -> Vec<Damage> {
        self.tool_manager.cancel();
        let Some(snapshot) = self.history.redo() else {
            return Vec::new();
        };
        snapshot.restore_into(&mut self.strokes);
        self.background_color = snapshot.background_color;
        vec![Damage::Full]
    }

    /// Remove every dot and reset the background.
    pub fn clear_canvas(&mut self) -> Vec<Damage> {
        self.tool_manager.cancel();
        self.strokes.clear();
        self.background_color = self.config.background_color;
        self.commit();
        vec![Damage::Full]
    }

    /// Replace the drawing with a dataset of dots, keeping the background.
    pub fn load_dataset<I: IntoIterator<Item = Dot>>(&mut self, dots: I) -> Vec<Damage> {
        self.tool_manager.cancel();
        self.strokes.replace_with(dots);
        log::info!("Loaded dataset with {} dots", self.strokes.len());
        self.commit();
        vec![Damage::Full]
    }

    /// Replace the drawing and background with a snapshot.
    pub fn load_snapshot(&mut self, snapshot: &Snapshot) -> Vec<Damage> {
        self.tool_manager.cancel();
        snapshot.restore_into(&mut self.strokes);
        self.background_color = snapshot.background_color;
        self.commit();
        vec![Damage::Full]
    }

    /// Load a share token, link or query string.
    ///
    /// Sharing is best effort: a malformed token is logged and ignored,
    /// leaving the canvas as it was.
    pub fn load_share_token(&mut self, input: &str) -> Vec<Damage> {
        match share::decode_link(input) {
            Ok(snapshot) => {
                log::info!("Loaded shared drawing with {} dots", snapshot.strokes.len());
                self.load_snapshot(&snapshot)
            }
            Err(err) => {
                log::warn!("Ignoring share token: {}", err);
                Vec::new()
            }
        }
    }

    /// Capture the live canvas.
    pub fn current_snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.strokes, self.background_color)
    }

    /// Share token for the live canvas.
    pub fn share_token(&self) -> ShareResult<String> {
        share::encode(&self.current_snapshot())
    }

    /// Share link for the live canvas on `base_url`.
    pub fn share_link(&self, base_url: &str) -> ShareResult<String> {
        share::share_link(base_url, &self.current_snapshot())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: HexColor = HexColor::new(0xFF, 0, 0);
    const BLUE: HexColor = HexColor::new(0, 0, 0xFF);

    fn at(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn click(session: &mut EditorSession, x: f64, y: f64) -> Vec<Damage> {
        let mut damage = session.handle_pointer(PointerEvent::Down { position: at(x, y) });
        damage.extend(session.handle_pointer(PointerEvent::Up { position: at(x, y) }));
        damage
    }

    #[test]
    fn test_new_session_has_floor_entry() {
        let session = EditorSession::default();
        assert_eq!(session.history().len(), 1);
        assert!(session.strokes().is_empty());
        assert_eq!(session.background_color(), HexColor::WHITE);
        assert_eq!(session.selected_color(), HexColor::DEFAULT_SELECTED);
        assert_eq!(session.current_tool(), ToolKind::Pencil);
    }

    #[test]
    fn test_draw_undo_redo_scenario() {
        let mut session = EditorSession::default();
        session.set_color(RED);

        let damage = click(&mut session, 5.0, 5.0);
        assert_eq!(
            damage,
            vec![Damage::Cell {
                position: GridPos::new(0, 0),
                color: RED,
            }]
        );
        assert_eq!(session.history().len(), 2);

        assert_eq!(session.undo(), vec![Damage::Full]);
        assert!(session.strokes().is_empty());
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history().redo_len(), 1);

        assert_eq!(session.redo(), vec![Damage::Full]);
        assert_eq!(session.strokes().as_slice(), &[Dot::new(0, 0, RED)]);
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history().redo_len(), 0);
    }

    #[test]
    fn test_undo_redo_noops() {
        let mut session = EditorSession::default();
        assert!(session.undo().is_empty());
        assert!(session.redo().is_empty());
        assert_eq!(session.history().len(), 1);
        assert!(session.strokes().is_empty());
    }

    #[test]
    fn test_drag_commits_once() {
        let mut session = EditorSession::default();
        session.handle_pointer(PointerEvent::Down { position: at(5.0, 5.0) });
        session.handle_pointer(PointerEvent::Move { position: at(8.0, 5.0) });
        session.handle_pointer(PointerEvent::Move { position: at(25.0, 5.0) });
        session.handle_pointer(PointerEvent::Move { position: at(45.0, 5.0) });
        assert_eq!(session.history().len(), 1);

        session.handle_pointer(PointerEvent::Up { position: at(45.0, 5.0) });
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.strokes().len(), 3);
    }

    #[test]
    fn test_move_without_press_is_ignored() {
        let mut session = EditorSession::default();
        assert!(session.handle_pointer(PointerEvent::Move { position: at(5.0, 5.0) }).is_empty());
        assert!(session.handle_pointer(PointerEvent::Up { position: at(5.0, 5.0) }).is_empty());
        assert!(session.strokes().is_empty());
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_leave_commits_partial_gesture() {
        let mut session = EditorSession::default();
        session.handle_pointer(PointerEvent::Down { position: at(5.0, 5.0) });
        session.handle_pointer(PointerEvent::Move { position: at(25.0, 5.0) });
        session.handle_pointer(PointerEvent::Leave);

        assert!(!session.tool_manager.is_drawing());
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history().current().strokes.len(), 2);

        // Leaving again while idle records nothing
        session.handle_pointer(PointerEvent::Leave);
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn test_tool_switch_mid_gesture_commits() {
        let mut session = EditorSession::default();
        session.set_color(RED);
        session.handle_pointer(PointerEvent::Down { position: at(5.0, 5.0) });
        session.set_tool(ToolKind::Eraser);
        assert!(!session.tool_manager.is_drawing());

        // The release belongs to the abandoned gesture and changes nothing
        assert!(session.handle_pointer(PointerEvent::Up { position: at(5.0, 5.0) }).is_empty());
        assert_eq!(session.strokes().as_slice(), &[Dot::new(0, 0, RED)]);
        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history().current(), &session.current_snapshot());

        assert_eq!(session.undo(), vec![Damage::Full]);
        assert!(session.strokes().is_empty());
    }

    #[test]
    fn test_tool_switch_while_idle_records_nothing() {
        let mut session = EditorSession::default();
        session.set_tool(ToolKind::Fill);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_fill_keeps_dots_on_top() {
        let mut session = EditorSession::default();
        session.set_color(RED);
        click(&mut session, 105.0, 105.0);

        session.set_tool(ToolKind::Fill);
        session.set_color(BLUE);
        let damage = click(&mut session, 5.0, 5.0);

        assert_eq!(damage, vec![Damage::Full]);
        assert_eq!(session.background_color(), BLUE);
        assert_eq!(session.strokes().as_slice(), &[Dot::new(5, 5, RED)]);
        assert_eq!(session.history().current().background_color, BLUE);
    }

    #[test]
    fn test_eraser_on_empty_cell() {
        let mut session = EditorSession::default();
        session.set_color(RED);
        click(&mut session, 45.0, 45.0);

        session.set_tool(ToolKind::Eraser);
        let damage = click(&mut session, 5.0, 5.0);
        assert_eq!(
            damage,
            vec![Damage::Cell {
                position: GridPos::new(0, 0),
                color: HexColor::WHITE,
            }]
        );
        assert_eq!(session.strokes().len(), 1);
    }

    #[test]
    fn test_eyedropper_does_not_record_history() {
        let mut session = EditorSession::default();
        session.set_color(BLUE);
        click(&mut session, 45.0, 45.0);
        session.set_color(RED);

        session.set_tool(ToolKind::Eyedropper);
        click(&mut session, 45.0, 45.0);
        assert_eq!(session.selected_color(), BLUE);
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn test_clear_canvas_resets_background() {
        let mut session = EditorSession::default();
        click(&mut session, 5.0, 5.0);
        session.set_tool(ToolKind::Fill);
        click(&mut session, 45.0, 45.0);

        session.clear_canvas();
        assert!(session.strokes().is_empty());
        assert_eq!(session.background_color(), HexColor::WHITE);
        assert_eq!(session.history().len(), 4);
        assert!(!session.can_redo());
    }

    #[test]
    fn test_share_token_roundtrip_through_session() {
        let mut session = EditorSession::default();
        session.set_color(RED);
        click(&mut session, 25.0, 45.0);
        let link = session.share_link("https://dotmint.app").unwrap();

        let mut other = EditorSession::default();
        assert_eq!(other.load_share_token(&link), vec![Damage::Full]);
        assert_eq!(other.strokes().as_slice(), &[Dot::new(1, 2, RED)]);
        assert_eq!(other.history().len(), 2);
    }

    #[test]
    fn test_malformed_share_token_is_ignored() {
        let mut session = EditorSession::default();
        assert!(session.load_share_token("%%%garbage").is_empty());
        assert!(session.strokes().is_empty());
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_points_outside_canvas_do_nothing() {
        let mut session = EditorSession::default();
        let damage = click(&mut session, 700.0, 5.0);
        assert!(damage.is_empty());
        assert!(session.strokes().is_empty());
    }
}
