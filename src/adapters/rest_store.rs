use crate::adapters::http::{check_status, ServiceClient};
use crate::core::{NewNote, Note, NoteChanges, NoteStore};
use crate::utils::error::{NotesError, Result};
use async_trait::async_trait;
use reqwest::Method;

const NOTES_TABLE: &str = "rest/v1/notes";

/// 透過 REST 查詢介面存取 notes 資料表
#[derive(Debug, Clone)]
pub struct RestNoteStore {
    client: ServiceClient,
}

impl RestNoteStore {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    fn id_filter(id: i64) -> [(&'static str, String); 1] {
        [("id", format!("eq.{}", id))]
    }

    async fn first_row(response: reqwest::Response, id: Option<i64>) -> Result<Note> {
        let rows: Vec<Note> = check_status(response).await?.json().await?;
        match (rows.into_iter().next(), id) {
            (Some(note), _) => Ok(note),
            (None, Some(id)) => Err(NotesError::NoteNotFound(id)),
            (None, None) => Err(NotesError::ServiceError {
                status: 200,
                message: "Insert returned no rows".to_string(),
            }),
        }
    }
}

#[async_trait]
impl NoteStore for RestNoteStore {
    async fn list(&self, owner: Option<&str>) -> Result<Vec<Note>> {
        let url = self.client.endpoint(NOTES_TABLE)?;
        let mut query = vec![
            ("select", "*".to_string()),
            ("order", "position.asc".to_string()),
        ];
        if let Some(owner) = owner {
            query.push(("user_id", format!("eq.{}", owner)));
        }

        tracing::debug!("Making API request to: {}", url);
        let response = self
            .client
            .request(Method::GET, url)
            .query(&query)
            .send()
            .await?;

        tracing::debug!("API response status: {}", response.status());
        let notes = check_status(response).await?.json().await?;
        Ok(notes)
    }

    async fn insert(&self, note: NewNote) -> Result<Note> {
        let url = self.client.endpoint(NOTES_TABLE)?;
        let response = self
            .client
            .request(Method::POST, url)
            .header("Prefer", "return=representation")
            .json(&[note])
            .send()
            .await?;

        Self::first_row(response, None).await
    }

    async fn update(&self, id: i64, changes: NoteChanges) -> Result<Note> {
        if changes.is_empty() {
            return Err(NotesError::ValidationError {
                message: format!("Nothing to update for note {}", id),
            });
        }

        let url = self.client.endpoint(NOTES_TABLE)?;
        let response = self
            .client
            .request(Method::PATCH, url)
            .query(&Self::id_filter(id))
            .header("Prefer", "return=representation")
            .json(&changes)
            .send()
            .await?;

        Self::first_row(response, Some(id)).await
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let url = self.client.endpoint(NOTES_TABLE)?;
        let response = self
            .client
            .request(Method::DELETE, url)
            .query(&Self::id_filter(id))
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }
}
