use crate::core::board::NoteBoard;
use crate::core::drag::{DragSession, HoverGeometry};
use crate::core::{NewNote, Note, NoteChanges, NoteStore};
use crate::utils::error::{NotesError, Result};

/// 筆記清單的狀態與服務呼叫
pub struct NotesService<S: NoteStore> {
    store: S,
    board: NoteBoard,
    owner: Option<String>,
}

impl<S: NoteStore> NotesService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            board: NoteBoard::new(),
            owner: None,
        }
    }

    pub fn with_owner(mut self, owner: Option<String>) -> Self {
        self.owner = owner;
        self
    }

    /// 登入狀態改變時切換擁有者，並清空本地清單
    pub fn set_owner(&mut self, owner: Option<String>) {
        if self.owner != owner {
            self.board = NoteBoard::new();
        }
        self.owner = owner;
    }

    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn notes(&self) -> &[Note] {
        self.board.notes()
    }

    pub fn board(&self) -> &NoteBoard {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut NoteBoard {
        &mut self.board
    }

    pub async fn fetch_notes(&mut self) -> Result<&[Note]> {
        let notes = self.store.list(self.owner.as_deref()).await.inspect_err(|e| {
            tracing::error!("Error fetching notes: {}", e);
        })?;

        tracing::debug!("Fetched {} notes", notes.len());
        self.board = NoteBoard::from_notes(notes);
        Ok(self.board.notes())
    }

    pub async fn add_note(&mut self, title: &str, content: &str) -> Result<&Note> {
        if title.trim().is_empty() || content.trim().is_empty() {
            return Err(NotesError::ValidationError {
                message: "Please fill in both title and content".to_string(),
            });
        }

        let new_note = NewNote {
            title: title.to_string(),
            content: content.to_string(),
            position: self.board.next_position(),
            user_id: self.owner.clone(),
        };

        let note = self.store.insert(new_note).await.inspect_err(|e| {
            tracing::error!("Error adding note: {}", e);
        })?;

        tracing::info!("Added note {}", note.id);
        self.board.push(note);
        let index = self.board.len() - 1;
        Ok(&self.board.notes()[index])
    }

    pub async fn edit_note(&mut self, id: i64, title: &str, content: &str) -> Result<&Note> {
        if self.board.get(id).is_none() {
            return Err(NotesError::NoteNotFound(id));
        }

        let updated = self
            .store
            .update(id, NoteChanges::text(title, content))
            .await
            .inspect_err(|e| {
                tracing::error!("Error updating note {}: {}", id, e);
            })?;

        self.board.replace(updated);
        self.board.get(id).ok_or(NotesError::NoteNotFound(id))
    }

    pub async fn delete_note(&mut self, id: i64) -> Result<Note> {
        if self.board.get(id).is_none() {
            return Err(NotesError::NoteNotFound(id));
        }

        self.store.delete(id).await.inspect_err(|e| {
            tracing::error!("Error deleting note {}: {}", id, e);
        })?;

        tracing::info!("Deleted note {}", id);
        self.board.remove(id).ok_or(NotesError::NoteNotFound(id))
    }

    /// 只改本地順序，呼叫 `persist_order` 才會寫回
    pub fn move_note(&mut self, drag_index: usize, hover_index: usize) -> bool {
        self.board.move_note(drag_index, hover_index)
    }

    pub fn drag_hover(&mut self, drag: &mut DragSession, hover_index: usize, geometry: HoverGeometry) -> bool {
        drag.hover(&mut self.board, hover_index, geometry)
    }

    /// 放開後才寫回，懸停中的移動只影響本地
    pub async fn finish_drag(&mut self, drag: DragSession, did_drop: bool) -> Result<bool> {
        if !drag.end(did_drop) {
            return Ok(false);
        }
        self.persist_order().await?;
        Ok(true)
    }

    /// 逐筆更新 position。沒有批次或交易，第一個失敗就中止，
    /// 已寫入的資料列不會回復，本地順序也保持不變
    pub async fn persist_order(&mut self) -> Result<usize> {
        let updates = self.board.reindex();
        let total = updates.len();

        for (written, update) in updates.into_iter().enumerate() {
            if let Err(e) = self
                .store
                .update(update.id, NoteChanges::position(update.position))
                .await
            {
                tracing::error!(
                    "Error updating note positions: {} ({} of {} written)",
                    e,
                    written,
                    total
                );
                return Err(e);
            }
        }

        tracing::debug!("Persisted order of {} notes", total);
        Ok(total)
    }
}
