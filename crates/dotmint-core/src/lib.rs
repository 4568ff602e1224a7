//! DotMint Core Library
//!
//! Platform-agnostic model for the DotMint pixel editor: colors, dots,
//! undo history, drawing tools, share links and dataset sampling.

pub mod color;
pub mod credits;
pub mod generation;
pub mod history;
pub mod input;
pub mod sample;
pub mod session;
pub mod share;
pub mod storage;
pub mod stroke;
pub mod tools;

pub use color::{ColorError, HexColor, PALETTE};
pub use credits::{AuthStatus, CreditError, CreditLedger, GENERATION_COST};
pub use generation::{GenerationError, GenerationRequest, GenerationService};
pub use history::{HistoryManager, MAX_UNDO_HISTORY, Snapshot};
pub use input::{CANVAS_SIZE, CELL_SIZE, CanvasGeometry, PointerEvent};
pub use sample::{DOTMINT_GRID, SampleError, sample_dotmint};
pub use session::{Damage, EditorSession, SessionConfig};
pub use share::{ShareError, ShareResult};
pub use storage::{MemoryUserStore, UserRecord, UserStore};
pub use stroke::{Dot, GridPos, StrokeStore};
pub use tools::{ToolKind, ToolManager, ToolState};
