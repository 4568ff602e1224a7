//! Drawing tools and the per-gesture tool state machine.

use crate::color::HexColor;
use crate::session::Damage;
use crate::stroke::{Dot, GridPos, StrokeStore};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    #[default]
    Pencil,
    Eraser,
    Fill,
    Eyedropper,
}

impl ToolKind {
    pub const ALL: [ToolKind; 4] = [
        ToolKind::Pencil,
        ToolKind::Eraser,
        ToolKind::Fill,
        ToolKind::Eyedropper,
    ];

    /// Display name for this tool.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Pencil => "Pencil",
            ToolKind::Eraser => "Eraser",
            ToolKind::Fill => "Fill",
            ToolKind::Eyedropper => "Color Picker",
        }
    }

    /// Whether finishing a gesture with this tool records an undo unit.
    pub fn records_history(self) -> bool {
        match self {
            ToolKind::Pencil | ToolKind::Eraser | ToolKind::Fill => true,
            ToolKind::Eyedropper => false,
        }
    }
}

/// State of a tool interaction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ToolState {
    /// Waiting for a gesture.
    #[default]
    Idle,
    /// A gesture is in progress.
    Drawing {
        /// Whether the pointer moved since the press.
        moved: bool,
        /// Cells already processed during this gesture.
        touched: HashSet<GridPos>,
    },
}

/// How a finished gesture played out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureSummary {
    pub tool: ToolKind,
    /// `false` for a click without pointer movement.
    pub moved: bool,
}

/// The canvas state a tool acts on.
pub struct ToolTarget<'a> {
    pub strokes: &'a mut StrokeStore,
    pub background_color: &'a mut HexColor,
}

/// Manages the current tool, the selected color and the gesture state.
#[derive(Debug, Clone)]
pub struct ToolManager {
    /// Currently selected tool.
    pub current_tool: ToolKind,
    /// Color painted by the pencil and the fill tool.
    pub selected_color: HexColor,
    /// Current state of the tool.
    pub state: ToolState,
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolManager {
    /// Create a tool manager with the pencil and the default color.
    pub fn new() -> Self {
        Self::with_color(HexColor::DEFAULT_SELECTED)
    }

    pub fn with_color(selected_color: HexColor) -> Self {
        Self {
            current_tool: ToolKind::default(),
            selected_color,
            state: ToolState::Idle,
        }
    }

    /// Set the current tool. Abandons any gesture in progress.
    pub fn set_tool(&mut self, tool: ToolKind) {
        self.current_tool = tool;
        self.state = ToolState::Idle;
    }

    /// Begin a gesture.
    pub fn begin(&mut self) {
        self.state = ToolState::Drawing {
            moved: false,
            touched: HashSet::new(),
        };
    }

    /// Note pointer movement during the gesture.
    pub fn mark_moved(&mut self) {
        if let ToolState::Drawing { moved, .. } = &mut self.state {
            *moved = true;
        }
    }

    /// Whether the pointer moved during the current gesture.
    pub fn has_moved(&self) -> bool {
        matches!(self.state, ToolState::Drawing { moved: true, .. })
    }

    /// Finish the gesture.
    pub fn end(&mut self) -> Option<GestureSummary> {
        match std::mem::take(&mut self.state) {
            ToolState::Drawing { moved, .. } => Some(GestureSummary {
                tool: self.current_tool,
                moved,
            }),
            ToolState::Idle => None,
        }
    }

    /// Drop the gesture without reporting it.
    pub fn cancel(&mut self) {
        self.state = ToolState::Idle;
    }

    /// Check if a gesture is in progress.
    pub fn is_drawing(&self) -> bool {
        matches!(self.state, ToolState::Drawing { .. })
    }

    /// Record a cell as processed. Returns `false` if it was already
    /// processed during this gesture (or no gesture is active).
    fn touch(&mut self, cell: GridPos) -> bool {
        match &mut self.state {
            ToolState::Drawing { touched, .. } => touched.insert(cell),
            ToolState::Idle => false,
        }
    }

    /// Apply the current tool to a cell and report what needs repainting.
    pub fn apply(&mut self, target: ToolTarget<'_>, cell: GridPos) -> Vec<Damage> {
        match self.current_tool {
            ToolKind::Pencil => self.pencil(target, cell),
            ToolKind::Eraser => self.eraser(target, cell),
            ToolKind::Fill => self.fill(target, cell),
            ToolKind::Eyedropper => self.eyedropper(target, cell),
        }
    }

    fn pencil(&mut self, target: ToolTarget<'_>, cell: GridPos) -> Vec<Damage> {
        if !self.touch(cell) {
            return Vec::new();
        }
        target.strokes.add(Dot::at(cell, self.selected_color));
        vec![Damage::Cell {
            position: cell,
            color: self.selected_color,
        }]
    }

    fn eraser(&mut self, target: ToolTarget<'_>, cell: GridPos) -> Vec<Damage> {
        if !self.touch(cell) {
            return Vec::new();
        }
        target.strokes.remove_at(cell.x, cell.y);
        // Repainted even when the cell was already empty
        vec![Damage::Cell {
            position: cell,
            color: *target.background_color,
        }]
    }

    fn fill(&mut self, target: ToolTarget<'_>, cell: GridPos) -> Vec<Damage> {
        if target.strokes.exists_at(cell.x, cell.y) || !self.touch(cell) {
            return Vec::new();
        }
        *target.background_color = self.selected_color;
        vec![Damage::Full]
    }

    fn eyedropper(&mut self, target: ToolTarget<'_>, cell: GridPos) -> Vec<Damage> {
        if let Some(dot) = target.strokes.get(cell.x, cell.y) {
            self.selected_color = dot.color;
        }
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: HexColor = HexColor::new(0xFF, 0, 0);
    const BLUE: HexColor = HexColor::new(0, 0, 0xFF);

    struct Canvas {
        strokes: StrokeStore,
        background: HexColor,
    }

    impl Canvas {
        fn new() -> Self {
            Self {
                strokes: StrokeStore::new(),
                background: HexColor::WHITE,
            }
        }

        fn target(&mut self) -> ToolTarget<'_> {
            ToolTarget {
                strokes: &mut self.strokes,
                background_color: &mut self.background,
            }
        }
    }

    #[test]
    fn test_tool_selection() {
        let mut tm = ToolManager::new();
        assert_eq!(tm.current_tool, ToolKind::Pencil);

        tm.set_tool(ToolKind::Fill);
        assert_eq!(tm.current_tool, ToolKind::Fill);
    }

    #[test]
    fn test_gesture_lifecycle() {
        let mut tm = ToolManager::new();
        assert!(!tm.is_drawing());
        assert!(tm.end().is_none());

        tm.begin();
        assert!(tm.is_drawing());
        tm.mark_moved();

        let summary = tm.end().unwrap();
        assert!(summary.moved);
        assert_eq!(summary.tool, ToolKind::Pencil);
        assert!(!tm.is_drawing());
    }

    #[test]
    fn test_set_tool_cancels_gesture() {
        let mut tm = ToolManager::new();
        tm.begin();
        tm.set_tool(ToolKind::Eraser);
        assert!(!tm.is_drawing());
    }

    #[test]
    fn test_pencil_skips_touched_cells() {
        let mut canvas = Canvas::new();
        let mut tm = ToolManager::with_color(RED);
        tm.begin();

        let first = tm.apply(canvas.target(), GridPos::new(1, 1));
        assert_eq!(first.len(), 1);

        tm.selected_color = BLUE;
        let second = tm.apply(canvas.target(), GridPos::new(1, 1));
        assert!(second.is_empty());
        assert_eq!(canvas.strokes.get(1, 1).map(|d| d.color), Some(RED));
    }

    #[test]
    fn test_pencil_requires_gesture() {
        let mut canvas = Canvas::new();
        let mut tm = ToolManager::new();
        assert!(tm.apply(canvas.target(), GridPos::new(0, 0)).is_empty());
        assert!(canvas.strokes.is_empty());
    }

    #[test]
    fn test_eraser_on_empty_cell_still_repaints() {
        let mut canvas = Canvas::new();
        canvas.strokes.add(Dot::new(5, 5, RED));
        let mut tm = ToolManager::new();
        tm.set_tool(ToolKind::Eraser);
        tm.begin();

        let damage = tm.apply(canvas.target(), GridPos::new(0, 0));
        assert_eq!(
            damage,
            vec![Damage::Cell {
                position: GridPos::new(0, 0),
                color: HexColor::WHITE,
            }]
        );
        assert_eq!(canvas.strokes.len(), 1);
    }

    #[test]
    fn test_fill_sets_background_and_keeps_dots() {
        let mut canvas = Canvas::new();
        canvas.strokes.add(Dot::new(5, 5, RED));
        let mut tm = ToolManager::with_color(BLUE);
        tm.set_tool(ToolKind::Fill);
        tm.begin();

        let damage = tm.apply(canvas.target(), GridPos::new(0, 0));
        assert_eq!(damage, vec![Damage::Full]);
        assert_eq!(canvas.background, BLUE);
        assert_eq!(canvas.strokes.as_slice(), &[Dot::new(5, 5, RED)]);
    }

    #[test]
    fn test_fill_on_occupied_cell_does_nothing() {
        let mut canvas = Canvas::new();
        canvas.strokes.add(Dot::new(5, 5, RED));
        let mut tm = ToolManager::with_color(BLUE);
        tm.set_tool(ToolKind::Fill);
        tm.begin();

        assert!(tm.apply(canvas.target(), GridPos::new(5, 5)).is_empty());
        assert_eq!(canvas.background, HexColor::WHITE);
    }

    #[test]
    fn test_eyedropper_picks_color() {
        let mut canvas = Canvas::new();
        canvas.strokes.add(Dot::new(2, 3, BLUE));
        let mut tm = ToolManager::with_color(RED);
        tm.set_tool(ToolKind::Eyedropper);
        tm.begin();

        assert!(tm.apply(canvas.target(), GridPos::new(0, 0)).is_empty());
        assert_eq!(tm.selected_color, RED);

        tm.apply(canvas.target(), GridPos::new(2, 3));
        assert_eq!(tm.selected_color, BLUE);
        assert_eq!(canvas.strokes.len(), 1);
    }

    #[test]
    fn test_tool_names_and_history() {
        assert_eq!(ToolKind::ALL.len(), 4);
        assert_eq!(ToolKind::Eyedropper.name(), "Color Picker");
        assert!(!ToolKind::Eyedropper.records_history());
        assert!(ToolKind::Fill.records_history());
    }
}
