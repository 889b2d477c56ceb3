use crate::buffer::Buffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Up,
    Down,
    Left,
    Right,
    /// Toggle between the end of the indentation and column 0.
    LineStart,
    LineEnd,
    PageUp,
    PageDown,
}

impl Buffer {
    /// Move the cursor. `height` is the full terminal height, used for paging.
    ///
    /// The column is clamped to the focused line's length afterwards.
    pub fn move_cursor(&mut self, movement: CursorMove, height: usize) {
        let len = self.len();
        let page = height.saturating_sub(2);

        match movement {
            CursorMove::Up => {
                if self.cursor_row > 1 {
                    self.cursor_row -= 1;
                }
            }
            CursorMove::Down => {
                if self.cursor_row < len {
                    self.cursor_row += 1;
                }
            }
            CursorMove::Left => {
                if self.cursor_x != 0 {
                    self.cursor_x -= 1;
                } else if self.cursor_row > 1 {
                    self.cursor_row -= 1;
                    self.cursor_x = self.focused_line().len();
                }
            }
            CursorMove::Right => {
                let line_len = self.focused_line().len();
                if self.cursor_x < line_len {
                    self.cursor_x += 1;
                } else if self.cursor_row != len {
                    self.cursor_x = 0;
                    self.cursor_row += 1;
                }
            }
            CursorMove::LineStart => {
                let indent = self.focused_line().indent_length();
                self.cursor_x = if self.cursor_x != indent { indent } else { 0 };
            }
            CursorMove::LineEnd => {
                self.cursor_x = self.focused_line().len();
            }
            CursorMove::PageUp => {
                if height > self.cursor_row {
                    self.cursor_row = 1;
                } else {
                    self.cursor_row = self.cursor_row.saturating_sub(page).max(1);
                }
            }
            CursorMove::PageDown => {
                self.cursor_row += page;
                self.offset_y += height;
                if self.cursor_row > len {
                    self.cursor_row = len.saturating_sub(1).max(1);
                }
            }
        }

        let line_len = self.focused_line().len();
        if self.cursor_x > line_len {
            self.cursor_x = line_len;
        }
    }
}
