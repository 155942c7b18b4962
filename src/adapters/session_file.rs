use crate::core::{Session, SessionStore};
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

const SESSION_FILE: &str = "session.json";

/// 把 session 存成目錄下的 JSON 檔
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    base_path: PathBuf,
}

impl FileSessionStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn file_path(&self) -> PathBuf {
        Path::new(&self.base_path).join(SESSION_FILE)
    }
}

impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<Session>> {
        let path = self.file_path();
        if !path.exists() {
            return Ok(None);
        }

        let data = fs::read(&path)?;
        match serde_json::from_slice(&data) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!("Ignoring unreadable session file {}: {}", path.display(), e);
                Ok(None)
            }
        }
    }

    async fn save(&self, session: &Session) -> Result<()> {
        let path = self.file_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = serde_json::to_vec_pretty(session)?;
        write_private(&path, &data)?;
        tracing::debug!("Session saved to {}", path.display());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        let path = self.file_path();
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

/// token 檔只給擁有者讀寫
#[cfg(unix)]
fn write_private(path: &Path, data: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // 既有檔案不受 mode() 影響
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    file.write_all(data)
}

#[cfg(not(unix))]
fn write_private(path: &Path, data: &[u8]) -> std::io::Result<()> {
    fs::write(path, data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::User;
    use tempfile::TempDir;

    fn session() -> Session {
        Session {
            access_token: "token".to_string(),
            refresh_token: Some("refresh".to_string()),
            token_type: "bearer".to_string(),
            expires_at: None,
            user: User {
                id: "u1".to_string(),
                email: Some("ada@example.com".to_string()),
            },
        }
    }

    #[tokio::test]
    async fn test_save_load_and_clear() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path().join("nested"));

        assert!(store.load().await.unwrap().is_none());

        store.save(&session()).await.unwrap();
        assert!(store.file_path().exists());
        assert_eq!(store.load().await.unwrap(), Some(session()));

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_file_is_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());
        std::fs::write(store.file_path(), b"{ not json").unwrap();

        assert!(store.load().await.unwrap().is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let store = FileSessionStore::new(temp_dir.path());
        std::fs::write(store.file_path(), b"{}").unwrap();
        std::fs::set_permissions(store.file_path(), std::fs::Permissions::from_mode(0o644))
            .unwrap();

        store.save(&session()).await.unwrap();

        let mode = std::fs::metadata(store.file_path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0);
        assert_eq!(store.load().await.unwrap(), Some(session()));
    }
}
