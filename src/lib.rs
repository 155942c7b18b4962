pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, Command};

pub use adapters::{FileSessionStore, RestAuthProvider, RestNoteStore, ServiceClient};
pub use app::{NotesApp, RestNotesApp};
pub use config::{AppConfig, Overrides};
pub use crate::core::{board::NoteBoard, drag::DragSession, notes::NotesService, session::SessionManager};
pub use utils::error::{NotesError, Result};
