use crate::domain::model::{NewNote, Note, NoteChanges, Session, SignUpOutcome};
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait NoteStore: Send + Sync {
    /// 依 position 遞增排序；`owner` 為 None 時不過濾
    async fn list(&self, owner: Option<&str>) -> Result<Vec<Note>>;
    async fn insert(&self, note: NewNote) -> Result<Note>;
    async fn update(&self, id: i64, changes: NoteChanges) -> Result<Note>;
    async fn delete(&self, id: i64) -> Result<()>;
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome>;
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session>;
    async fn sign_out(&self, session: &Session) -> Result<()>;
}

pub trait SessionStore: Send + Sync {
    fn load(&self) -> impl std::future::Future<Output = Result<Option<Session>>> + Send;
    fn save(&self, session: &Session) -> impl std::future::Future<Output = Result<()>> + Send;
    fn clear(&self) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn service_url(&self) -> &str;
    fn anon_key(&self) -> &str;
    fn session_path(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
}
