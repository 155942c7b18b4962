use crate::core::{AuthEvent, AuthProvider, Session, SessionStore, SignUpOutcome};
use crate::utils::error::{NotesError, Result};
use crate::utils::validation::validate_email;
use tokio::sync::watch;

/// 管理登入狀態，並透過 watch channel 通知 session 變化
pub struct SessionManager<A: AuthProvider, K: SessionStore> {
    auth: A,
    store: K,
    sender: watch::Sender<Option<Session>>,
}

impl<A: AuthProvider, K: SessionStore> SessionManager<A, K> {
    pub fn new(auth: A, store: K) -> Self {
        let (sender, _) = watch::channel(None);
        Self {
            auth,
            store,
            sender,
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.sender.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.sender.subscribe()
    }

    pub fn require_session(&self) -> Result<Session> {
        self.current().ok_or(NotesError::NotSignedIn)
    }

    /// 讀回上次保存的 session，過期的直接清掉
    pub async fn restore(&self) -> Result<Option<Session>> {
        let session = match self.store.load().await? {
            Some(session) if session.is_expired() => {
                tracing::info!("Stored session has expired, signing out locally");
                self.store.clear().await?;
                None
            }
            other => other,
        };

        if let Some(session) = &session {
            tracing::debug!("Restored session for user {}", session.user.id);
        }
        self.publish(session.clone());
        Ok(session)
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthEvent> {
        check_credentials(email, password)?;

        match self.auth.sign_up(email, password).await? {
            SignUpOutcome::SignedIn(session) => {
                self.store.save(&session).await?;
                tracing::info!("Signed up and signed in as {}", email);
                self.publish(Some(session));
                Ok(AuthEvent::SignedIn)
            }
            SignUpOutcome::ConfirmationPending(user) => {
                tracing::info!("Signed up user {}, waiting for email confirmation", user.id);
                Ok(AuthEvent::SignedUp)
            }
        }
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthEvent> {
        check_credentials(email, password)?;

        let session = self.auth.sign_in_with_password(email, password).await?;
        self.store.save(&session).await?;
        tracing::info!("Signed in as {}", email);
        self.publish(Some(session));
        Ok(AuthEvent::SignedIn)
    }

    /// 服務端登出失敗只記錄，本地 session 一律清除
    pub async fn sign_out(&self) -> Result<AuthEvent> {
        if let Some(session) = self.current() {
            if let Err(e) = self.auth.sign_out(&session).await {
                tracing::warn!("Remote sign out failed: {}", e);
            }
        }

        self.store.clear().await?;
        tracing::info!("Signed out");
        self.publish(None);
        Ok(AuthEvent::SignedOut)
    }

    fn publish(&self, session: Option<Session>) {
        self.sender.send_replace(session);
    }
}

fn check_credentials(email: &str, password: &str) -> Result<()> {
    validate_email(email)?;
    if password.is_empty() {
        return Err(NotesError::ValidationError {
            message: "Password cannot be empty".to_string(),
        });
    }
    Ok(())
}
