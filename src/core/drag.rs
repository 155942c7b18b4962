use crate::core::board::NoteBoard;

/// 被懸停卡片的位置與游標的 y 座標（皆為畫面座標）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoverGeometry {
    pub top: f64,
    pub bottom: f64,
    pub pointer_y: Option<f64>,
}

impl HoverGeometry {
    fn middle_offset(&self) -> f64 {
        (self.bottom - self.top) / 2.0
    }
}

/// 進行中的拖曳。`index` 隨每次移動更新，避免每次都重新搜尋
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    note_id: i64,
    index: usize,
    moved: bool,
}

impl DragSession {
    pub fn begin(note_id: i64, index: usize) -> Self {
        Self {
            note_id,
            index,
            moved: false,
        }
    }

    pub fn note_id(&self) -> i64 {
        self.note_id
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn has_moved(&self) -> bool {
        self.moved
    }

    /// 游標越過被懸停卡片的一半高度才移動：
    /// 往下拖要在中線以下，往上拖要在中線以上
    pub fn hover(&mut self, board: &mut NoteBoard, hover_index: usize, geometry: HoverGeometry) -> bool {
        let drag_index = self.index;
        if drag_index == hover_index {
            return false;
        }

        let Some(pointer_y) = geometry.pointer_y else {
            return false;
        };

        let hover_middle_y = geometry.middle_offset();
        let hover_client_y = pointer_y - geometry.top;

        if drag_index < hover_index && hover_client_y < hover_middle_y {
            return false;
        }
        if drag_index > hover_index && hover_client_y > hover_middle_y {
            return false;
        }

        if !board.move_note(drag_index, hover_index) {
            return false;
        }

        self.index = hover_index;
        self.moved = true;
        true
    }

    /// 結束拖曳，回傳是否需要把新順序寫回服務
    pub fn end(self, did_drop: bool) -> bool {
        did_drop && self.moved
    }
}
