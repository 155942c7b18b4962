use crate::core::{Note, PositionUpdate};

/// 本地端的筆記排列，所有修改都先在這裡套用再送到服務
#[derive(Debug, Clone, Default)]
pub struct NoteBoard {
    notes: Vec<Note>,
}

impl NoteBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// 依 position 穩定排序，同值保留服務回傳順序
    pub fn from_notes(mut notes: Vec<Note>) -> Self {
        notes.sort_by_key(|note| note.position);
        Self { notes }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn index_of(&self, id: i64) -> Option<usize> {
        self.notes.iter().position(|note| note.id == id)
    }

    pub fn next_position(&self) -> i64 {
        self.notes
            .iter()
            .map(|note| note.position)
            .max()
            .map(|max| max + 1)
            .unwrap_or(0)
    }

    pub fn push(&mut self, note: Note) {
        self.notes.push(note);
    }

    /// 以伺服器回傳的資料取代同 id 的筆記，找不到時回傳 false
    pub fn replace(&mut self, note: Note) -> bool {
        match self.notes.iter_mut().find(|existing| existing.id == note.id) {
            Some(existing) => {
                *existing = note;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: i64) -> Option<Note> {
        let index = self.index_of(id)?;
        Some(self.notes.remove(index))
    }

    /// 拖曳移動：從 `drag_index` 取出後插入 `hover_index`
    pub fn move_note(&mut self, drag_index: usize, hover_index: usize) -> bool {
        if drag_index == hover_index
            || drag_index >= self.notes.len()
            || hover_index >= self.notes.len()
        {
            return false;
        }

        let dragged = self.notes.remove(drag_index);
        self.notes.insert(hover_index, dragged);
        tracing::debug!("Moved note from index {} to {}", drag_index, hover_index);
        true
    }

    /// 依目前顯示順序把 position 全部重寫為 0..n
    pub fn reindex(&mut self) -> Vec<PositionUpdate> {
        self.notes
            .iter_mut()
            .enumerate()
            .map(|(index, note)| {
                note.position = index as i64;
                PositionUpdate {
                    id: note.id,
                    position: note.position,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: i64, position: i64) -> Note {
        Note {
            id,
            title: format!("Note {}", id),
            content: String::new(),
            position,
            user_id: None,
        }
    }

    fn ids(board: &NoteBoard) -> Vec<i64> {
        board.notes().iter().map(|n| n.id).collect()
    }

    #[test]
    fn test_from_notes_sorts_by_position() {
        let board = NoteBoard::from_notes(vec![note(1, 2), note(2, 0), note(3, 1), note(4, 1)]);
        assert_eq!(ids(&board), vec![2, 3, 4, 1]);
    }

    #[test]
    fn test_move_note_downwards_and_upwards() {
        let mut board = NoteBoard::from_notes(vec![note(1, 0), note(2, 1), note(3, 2), note(4, 3)]);

        assert!(board.move_note(0, 2));
        assert_eq!(ids(&board), vec![2, 3, 1, 4]);

        assert!(board.move_note(3, 0));
        assert_eq!(ids(&board), vec![4, 2, 3, 1]);
    }

    #[test]
    fn test_move_note_ignores_same_and_out_of_range() {
        let mut board = NoteBoard::from_notes(vec![note(1, 0), note(2, 1)]);
        assert!(!board.move_note(1, 1));
        assert!(!board.move_note(0, 5));
        assert!(!board.move_note(7, 0));
        assert_eq!(ids(&board), vec![1, 2]);
    }

    #[test]
    fn test_reindex_rewrites_all_positions() {
        let mut board = NoteBoard::from_notes(vec![note(10, 5), note(11, 9), note(12, 40)]);
        board.move_note(2, 0);

        let updates = board.reindex();
        assert_eq!(
            updates,
            vec![
                PositionUpdate { id: 12, position: 0 },
                PositionUpdate { id: 10, position: 1 },
                PositionUpdate { id: 11, position: 2 },
            ]
        );
        let positions: Vec<i64> = board.notes().iter().map(|n| n.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
    }

    #[test]
    fn test_next_position() {
        assert_eq!(NoteBoard::new().next_position(), 0);
        let board = NoteBoard::from_notes(vec![note(1, 3), note(2, 7)]);
        assert_eq!(board.next_position(), 8);
    }

    #[test]
    fn test_replace_and_remove() {
        let mut board = NoteBoard::from_notes(vec![note(1, 0), note(2, 1)]);

        let mut edited = note(2, 1);
        edited.title = "Edited".to_string();
        assert!(board.replace(edited));
        assert_eq!(board.get(2).map(|n| n.title.as_str()), Some("Edited"));
        assert!(!board.replace(note(9, 0)));

        assert_eq!(board.remove(1).map(|n| n.id), Some(1));
        assert!(board.remove(1).is_none());
        assert_eq!(board.len(), 1);
    }
}
