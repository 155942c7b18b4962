pub mod board;
pub mod drag;
pub mod notes;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::domain::model::{
    AuthEvent, NewNote, Note, NoteChanges, PositionUpdate, Session, SignUpOutcome, User,
};
pub use crate::domain::ports::{AuthProvider, ConfigProvider, NoteStore, SessionStore};
pub use crate::utils::error::Result;
