//! DotMint Application Library
//!
//! Configuration, scripted session replay and the subcommands of the
//! `dotmint` binary.

pub mod app;
pub mod script;

pub use app::{App, AppConfig};
pub use script::{PointerKind, Script, ScriptAction};
