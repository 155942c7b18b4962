pub mod render;

use crate::adapters::{FileSessionStore, RestAuthProvider, RestNoteStore, ServiceClient};
use crate::core::notes::NotesService;
use crate::core::session::SessionManager;
use crate::core::{
    AuthEvent, AuthProvider, ConfigProvider, Note, NoteStore, Session, SessionStore,
};
use crate::utils::error::{NotesError, Result};
use tokio::sync::watch;

/// 筆記清單加上登入狀態，對應一個使用者介面
pub struct NotesApp<S: NoteStore, A: AuthProvider, K: SessionStore> {
    notes: NotesService<S>,
    session: SessionManager<A, K>,
    session_changes: watch::Receiver<Option<Session>>,
}

pub type RestNotesApp = NotesApp<RestNoteStore, RestAuthProvider, FileSessionStore>;

impl RestNotesApp {
    /// 先還原保存的 session，再以該使用者的 token 建立資料存取
    pub async fn connect<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = ServiceClient::from_config(config)?;
        let session = SessionManager::new(
            RestAuthProvider::new(client.clone()),
            FileSessionStore::new(config.session_path()),
        );

        let restored = session.restore().await?;
        let token = restored.as_ref().map(|s| s.access_token.clone());
        let store = RestNoteStore::new(client.with_access_token(token));

        Ok(Self::new(NotesService::new(store), session))
    }
}

impl<S: NoteStore, A: AuthProvider, K: SessionStore> NotesApp<S, A, K> {
    pub fn new(notes: NotesService<S>, session: SessionManager<A, K>) -> Self {
        let mut session_changes = session.subscribe();
        session_changes.mark_changed();
        Self {
            notes,
            session,
            session_changes,
        }
    }

    pub fn session(&self) -> &SessionManager<A, K> {
        &self.session
    }

    pub fn notes(&self) -> &NotesService<S> {
        &self.notes
    }

    /// session 變動時把清單切換到新的擁有者
    fn sync_owner(&mut self) {
        if self.session_changes.has_changed().unwrap_or(false) {
            let owner = self
                .session_changes
                .borrow_and_update()
                .as_ref()
                .map(|s| s.user.id.clone());
            tracing::debug!("Session changed, owner is now {:?}", owner);
            self.notes.set_owner(owner);
        }
    }

    pub async fn list(&mut self) -> Result<&[Note]> {
        self.sync_owner();
        self.notes.fetch_notes().await
    }

    pub async fn add(&mut self, title: &str, content: &str) -> Result<Note> {
        self.sync_owner();
        self.notes.fetch_notes().await?;
        self.notes.add_note(title, content).await.cloned()
    }

    /// 未給的欄位沿用原值
    pub async fn edit(
        &mut self,
        id: i64,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<Note> {
        if title.is_none() && content.is_none() {
            return Err(NotesError::ValidationError {
                message: "Nothing to change, pass --title and/or --content".to_string(),
            });
        }

        self.sync_owner();
        self.notes.fetch_notes().await?;
        let current = self
            .notes
            .board()
            .get(id)
            .cloned()
            .ok_or(NotesError::NoteNotFound(id))?;

        let title = title.unwrap_or(current.title.as_str());
        let content = content.unwrap_or(current.content.as_str());
        self.notes.edit_note(id, title, content).await.cloned()
    }

    pub async fn delete(&mut self, id: i64) -> Result<Note> {
        self.sync_owner();
        self.notes.fetch_notes().await?;
        self.notes.delete_note(id).await
    }

    /// 以 1 起算的顯示位置移動筆記，並寫回整份順序
    pub async fn move_to(&mut self, from: usize, to: usize) -> Result<usize> {
        self.sync_owner();
        self.notes.fetch_notes().await?;

        let len = self.notes.notes().len();
        if from == 0 || to == 0 || from > len || to > len {
            return Err(NotesError::ValidationError {
                message: format!("Positions must be between 1 and {}", len),
            });
        }
        if from == to {
            return Ok(0);
        }

        self.notes.move_note(from - 1, to - 1);
        self.notes.persist_order().await
    }

    pub async fn sign_up(&mut self, email: &str, password: &str) -> Result<AuthEvent> {
        let event = self.session.sign_up(email, password).await?;
        self.sync_owner();
        Ok(event)
    }

    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<AuthEvent> {
        let event = self.session.sign_in(email, password).await?;
        self.sync_owner();
        Ok(event)
    }

    pub async fn sign_out(&mut self) -> Result<AuthEvent> {
        let event = self.session.sign_out().await?;
        self.sync_owner();
        Ok(event)
    }
}
