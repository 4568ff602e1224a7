//! Scripted editing sessions.
//!
//! A script is a JSON array of actions, for example:
//!
//! ```json
//! [
//!   { "action": "select_color", "color": "#00E436" },
//!   { "action": "pointer", "event": "down", "x": 25, "y": 25 },
//!   { "action": "pointer", "event": "move", "x": 65, "y": 25 },
//!   { "action": "pointer", "event": "up", "x": 65, "y": 25 },
//!   { "action": "undo" }
//! ]
//! ```

use dotmint_core::color::{HexColor, PALETTE};
use dotmint_core::input::PointerEvent;
use dotmint_core::tools::ToolKind;
use dotmint_render::{Editor, Surface};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Kind of pointer event in a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerKind {
    Down,
    Move,
    Up,
    Leave,
}

/// One step of a script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptAction {
    SelectTool {
        tool: ToolKind,
    },
    SelectColor {
        color: HexColor,
    },
    /// Pick one of the fixed palette swatches.
    SelectPalette {
        index: usize,
    },
    Pointer {
        event: PointerKind,
        #[serde(default)]
        x: f64,
        #[serde(default)]
        y: f64,
    },
    /// Press and release at the same point.
    Click {
        x: f64,
        y: f64,
    },
    Undo,
    Redo,
    Clear,
    ToggleBackground,
    /// Load a share link or token.
    LoadShare {
        token: String,
    },
}

impl ScriptAction {
    fn pointer_events(&self) -> Vec<PointerEvent> {
        match *self {
            ScriptAction::Pointer { event, x, y } => {
                let position = Point::new(x, y);
                vec![match event {
                    PointerKind::Down => PointerEvent::Down { position },
                    PointerKind::Move => PointerEvent::Move { position },
                    PointerKind::Up => PointerEvent::Up { position },
                    PointerKind::Leave => PointerEvent::Leave,
                }]
            }
            ScriptAction::Click { x, y } => {
                let position = Point::new(x, y);
                vec![PointerEvent::Down { position }, PointerEvent::Up { position }]
            }
            _ => Vec::new(),
        }
    }
}

/// A parsed script.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Script {
    pub actions: Vec<ScriptAction>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Run every action against `editor`, in order.
    pub fn replay<S: Surface>(&self, editor: &mut Editor<S>) {
        for action in &self.actions {
            log::debug!("Replaying {:?}", action);
            match action {
                ScriptAction::SelectTool { tool } => editor.set_tool(*tool),
                ScriptAction::SelectColor { color } => editor.set_color(*color),
                ScriptAction::SelectPalette { index } => match PALETTE.get(*index) {
                    Some(color) => editor.set_color(*color),
                    None => log::warn!("Ignoring palette index {}", index),
                },
                ScriptAction::Pointer { .. } | ScriptAction::Click { .. } => {
                    for event in action.pointer_events() {
                        editor.handle_pointer(event);
                    }
                }
                ScriptAction::Undo => editor.undo(),
                ScriptAction::Redo => editor.redo(),
                ScriptAction::Clear => editor.clear_canvas(),
                ScriptAction::ToggleBackground => editor.toggle_preserve_background(),
                ScriptAction::LoadShare { token } => editor.load_share_token(token),
            }
        }
    }
}
