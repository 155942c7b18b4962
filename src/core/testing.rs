use crate::core::{
    AuthProvider, NewNote, Note, NoteChanges, NoteStore, Session, SessionStore, SignUpOutcome,
    User,
};
use crate::utils::error::{NotesError, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct StoreState {
    rows: BTreeMap<i64, Note>,
    next_id: i64,
    failing_id: Option<i64>,
}

/// 記憶體版的資料表，行為比照託管服務
#[derive(Clone, Default)]
pub struct MemoryNoteStore {
    state: Arc<Mutex<StoreState>>,
    calls: Arc<AtomicUsize>,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, id: i64, title: &str, content: &str, position: i64, user_id: Option<&str>) {
        let mut state = self.state.lock().unwrap();
        state.next_id = state.next_id.max(id);
        state.rows.insert(
            id,
            Note {
                id,
                title: title.to_string(),
                content: content.to_string(),
                position,
                user_id: user_id.map(str::to_string),
            },
        );
    }

    pub fn get(&self, id: i64) -> Option<Note> {
        self.state.lock().unwrap().rows.get(&id).cloned()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn fail_on_update_or_delete_of(&self, id: i64) {
        self.state.lock().unwrap().failing_id = Some(id);
    }

    fn check_failure(state: &StoreState, id: i64) -> Result<()> {
        if state.failing_id == Some(id) {
            return Err(NotesError::ServiceError {
                status: 500,
                message: format!("row {} is locked", id),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl NoteStore for MemoryNoteStore {
    async fn list(&self, owner: Option<&str>) -> Result<Vec<Note>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let state = self.state.lock().unwrap();
        let mut notes: Vec<Note> = state
            .rows
            .values()
            .filter(|note| owner.is_none() || note.user_id.as_deref() == owner)
            .cloned()
            .collect();
        notes.sort_by_key(|note| note.position);
        Ok(notes)
    }

    async fn insert(&self, note: NewNote) -> Result<Note> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let row = Note {
            id: state.next_id,
            title: note.title,
            content: note.content,
            position: note.position,
            user_id: note.user_id,
        };
        state.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: i64, changes: NoteChanges) -> Result<Note> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();
        Self::check_failure(&state, id)?;
        let row = state.rows.get_mut(&id).ok_or(NotesError::NoteNotFound(id))?;
        if let Some(title) = changes.title {
            row.title = title;
        }
        if let Some(content) = changes.content {
            row.content = content;
        }
        if let Some(position) = changes.position {
            row.position = position;
        }
        Ok(row.clone())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock().unwrap();
        Self::check_failure(&state, id)?;
        state.rows.remove(&id);
        Ok(())
    }
}

pub fn session_for(user_id: &str, email: &str) -> Session {
    Session {
        access_token: format!("token-{}", user_id),
        refresh_token: Some("refresh".to_string()),
        token_type: "bearer".to_string(),
        expires_at: None,
        user: User {
            id: user_id.to_string(),
            email: Some(email.to_string()),
        },
    }
}

/// 固定帳號 ada@example.com / secret 的驗證服務
#[derive(Clone, Default)]
pub struct MockAuthProvider {
    pub confirm_email_on_sign_up: bool,
    pub fail_sign_out: bool,
    sign_outs: Arc<AtomicUsize>,
}

impl MockAuthProvider {
    /// 註冊後需先確認信箱
    pub fn confirming() -> Self {
        Self {
            confirm_email_on_sign_up: true,
            ..Self::default()
        }
    }

    pub fn failing_sign_out() -> Self {
        Self {
            fail_sign_out: true,
            ..Self::default()
        }
    }

    pub fn sign_outs(&self) -> usize {
        self.sign_outs.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthProvider for MockAuthProvider {
    async fn sign_up(&self, email: &str, _password: &str) -> Result<SignUpOutcome> {
        let session = session_for("new-user", email);
        if self.confirm_email_on_sign_up {
            Ok(SignUpOutcome::ConfirmationPending(session.user))
        } else {
            Ok(SignUpOutcome::SignedIn(session))
        }
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session> {
        if email == "ada@example.com" && password == "secret" {
            Ok(session_for("u1", email))
        } else {
            Err(NotesError::AuthError {
                message: "Invalid login credentials".to_string(),
            })
        }
    }

    async fn sign_out(&self, _session: &Session) -> Result<()> {
        self.sign_outs.fetch_add(1, Ordering::SeqCst);
        if self.fail_sign_out {
            return Err(NotesError::ServiceError {
                status: 503,
                message: "unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MemorySessionStore {
    session: Arc<Mutex<Option<Session>>>,
}

impl MemorySessionStore {
    pub fn with_session(session: Session) -> Self {
        Self {
            session: Arc::new(Mutex::new(Some(session))),
        }
    }

    pub fn stored(&self) -> Option<Session> {
        self.session.lock().unwrap().clone()
    }
}

impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<Session>> {
        Ok(self.stored())
    }

    async fn save(&self, session: &Session) -> Result<()> {
        *self.session.lock().unwrap() = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.session.lock().unwrap() = None;
        Ok(())
    }
}
