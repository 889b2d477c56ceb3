//! Viewport offsets derived from the cursor each frame.

use crate::buffer::Buffer;

/// Size of the text area in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSize {
    pub width: usize,
    pub rows: usize,
}

impl ViewSize {
    pub fn new(width: usize, rows: usize) -> Self {
        Self { width, rows }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Scroll {
    pub cursor_dx: usize,
    pub offset_x: usize,
    pub offset_y: usize,
}

/// Offsets that keep the cursor visible, starting from the buffer's current ones.
///
/// Pure: the buffer is not touched. Use [`Buffer::apply_scroll`] to keep them.
pub fn scroll(buffer: &Buffer, size: ViewSize) -> Scroll {
    let rows = size.rows.max(1);
    let width = size.width.max(1);
    let (mut offset_x, mut offset_y) = buffer.offsets();
    let row = buffer.cursor().1 - 1;
    let cursor_dx = buffer.cursor_dx();

    if row < offset_y {
        offset_y = row;
    }
    if row >= offset_y + rows {
        offset_y = row + 1 - rows;
    }

    if cursor_dx < offset_x {
        offset_x = cursor_dx;
    }
    if cursor_dx >= offset_x + width {
        offset_x = cursor_dx + 1 - width;
    }

    Scroll {
        cursor_dx,
        offset_x,
        offset_y,
    }
}

impl Buffer {
    pub fn apply_scroll(&mut self, scroll: Scroll) {
        self.offset_x = scroll.offset_x;
        self.offset_y = scroll.offset_y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::Environment;
    use std::sync::Arc;

    fn numbered(count: usize) -> Buffer {
        let lines: Vec<String> = (0..count).map(|i| format!("line {}", i)).collect();
        Buffer::from_lines("t.txt", lines, Arc::new(Environment::default()))
    }

    #[test]
    fn test_cursor_in_view_keeps_offsets() {
        let b = numbered(10);
        let s = scroll(&b, ViewSize::new(80, 5));
        assert_eq!(s, Scroll::default());
    }

    #[test]
    fn test_scrolls_down_to_cursor() {
        let mut b = numbered(50);
        b.set_cursor(0, 12);
        let s = scroll(&b, ViewSize::new(80, 5));
        assert_eq!(s.offset_y, 7);
        b.apply_scroll(s);
        assert_eq!(b.offsets(), (0, 7));

        // Moving back into view leaves the offset alone.
        b.set_cursor(0, 9);
        assert_eq!(scroll(&b, ViewSize::new(80, 5)).offset_y, 7);

        b.set_cursor(0, 3);
        assert_eq!(scroll(&b, ViewSize::new(80, 5)).offset_y, 2);
    }

    #[test]
    fn test_horizontal_scroll_uses_display_column() {
        let env = Arc::new(Environment::default());
        let mut b = Buffer::from_lines("t.txt", ["\t\tabcdef"], env);
        b.set_cursor(3, 1);
        let s = scroll(&b, ViewSize::new(6, 5));
        assert_eq!(s.cursor_dx, 9);
        assert_eq!(s.offset_x, 4);

        b.apply_scroll(s);
        b.set_cursor(0, 1);
        let s = scroll(&b, ViewSize::new(6, 5));
        assert_eq!(s.offset_x, 0);
    }

    #[test]
    fn test_scroll_is_pure() {
        let mut b = numbered(50);
        b.set_cursor(0, 40);
        let _ = scroll(&b, ViewSize::new(80, 10));
        assert_eq!(b.offsets(), (0, 0));
    }
}
