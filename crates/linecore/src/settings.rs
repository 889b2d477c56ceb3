/// Session-wide editing settings. Shared read-only by every line and buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Width of a tab stop in columns. Always at least 1.
    pub tab_width: usize,
    /// Insert `tab_width` spaces instead of a literal tab.
    pub soft_tabs: bool,
    /// Tokenize lines for highlighting.
    pub highlighting: bool,
}

impl Settings {
    pub fn new(tab_width: usize, soft_tabs: bool, highlighting: bool) -> Self {
        Self {
            tab_width: tab_width.max(1),
            soft_tabs,
            highlighting,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tab_width: 4,
            soft_tabs: false,
            highlighting: true,
        }
    }
}
