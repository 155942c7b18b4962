use crate::core::Note;

/// 以卡片形式輸出一則筆記，前面是 1 起算的顯示位置
pub fn note_card(slot: usize, note: &Note) -> String {
    let mut out = format!("[{}] #{}", slot, note.id);
    if !note.title.is_empty() {
        out.push(' ');
        out.push_str(&note.title);
    }
    for line in note.content.lines() {
        out.push_str("\n    ");
        out.push_str(line);
    }
    out
}

pub fn note_list(notes: &[Note]) -> String {
    if notes.is_empty() {
        return "No notes yet".to_string();
    }

    notes
        .iter()
        .enumerate()
        .map(|(index, note)| note_card(index + 1, note))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(title: &str, content: &str) -> Note {
        Note {
            id: 7,
            title: title.to_string(),
            content: content.to_string(),
            position: 0,
            user_id: None,
        }
    }

    #[test]
    fn test_card_keeps_line_breaks() {
        let card = note_card(2, &note("Groceries", "milk\n\neggs"));
        assert_eq!(card, "[2] #7 Groceries\n    milk\n    \n    eggs");
    }

    #[test]
    fn test_card_without_title() {
        assert_eq!(note_card(1, &note("", "body")), "[1] #7\n    body");
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(note_list(&[]), "No notes yet");
    }
}
