use crate::language::Language;
use crate::settings::Settings;
use crate::token::{self, TokenClass};

/// One rendered character and its token class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub token: TokenClass,
}

/// What a line needs from its owner to rebuild its display cells.
#[derive(Debug, Clone, Copy)]
pub struct LineContext<'a> {
    pub tab_width: usize,
    pub soft_tabs: bool,
    /// `None` when highlighting is off or the file type has no language.
    pub language: Option<&'a Language>,
}

impl<'a> LineContext<'a> {
    pub fn new(settings: &Settings, language: Option<&'a Language>) -> Self {
        Self {
            tab_width: settings.tab_width.max(1),
            soft_tabs: settings.soft_tabs,
            language: if settings.highlighting { language } else { None },
        }
    }
}

/// A single logical line: raw text plus derived display cells.
///
/// Columns passed to and returned from a `Line` count chars, not bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    text: String,
    cells: Vec<Cell>,
}

impl Line {
    pub fn new(text: impl Into<String>, ctx: &LineContext) -> Self {
        let mut line = Self {
            text: text.into(),
            cells: Vec::new(),
        };
        line.recompute(ctx);
        line
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the raw text in chars.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn display_len(&self) -> usize {
        self.cells.len()
    }

    pub fn display_text(&self) -> String {
        self.cells.iter().map(|c| c.ch).collect()
    }

    pub fn tokens(&self) -> impl Iterator<Item = TokenClass> + '_ {
        self.cells.iter().map(|c| c.token)
    }

    /// Insert `c` before char column `at` and return how many chars went in.
    ///
    /// With soft tabs a tab becomes `tab_width` spaces. Returns 0 and leaves the
    /// line alone when `at` is past the end.
    pub fn insert_rune(&mut self, at: usize, c: char, ctx: &LineContext) -> usize {
        let Some(offset) = self.byte_offset(at) else {
            return 0;
        };

        let inserted = if c == '\t' && ctx.soft_tabs {
            self.text.insert_str(offset, &" ".repeat(ctx.tab_width));
            ctx.tab_width
        } else {
            self.text.insert(offset, c);
            1
        };

        self.recompute(ctx);
        inserted
    }

    /// Remove the char at column `at`. Out of range is a no-op.
    pub fn delete_rune(&mut self, at: usize, ctx: &LineContext) -> bool {
        if at >= self.len() {
            return false;
        }
        if let Some(offset) = self.byte_offset(at) {
            self.text.remove(offset);
            self.recompute(ctx);
            return true;
        }
        false
    }

    pub fn append_str(&mut self, s: &str, ctx: &LineContext) {
        self.text.push_str(s);
        self.recompute(ctx);
    }

    /// Drop everything from column `at` on.
    pub fn truncate(&mut self, at: usize, ctx: &LineContext) {
        if let Some(offset) = self.byte_offset(at) {
            self.text.truncate(offset);
            self.recompute(ctx);
        }
    }

    /// Text from column `start` to the end of the line.
    pub fn tail(&self, start: usize) -> &str {
        match self.byte_offset(start) {
            Some(offset) => &self.text[offset..],
            None => "",
        }
    }

    /// Text before column `end`.
    pub fn head(&self, end: usize) -> &str {
        match self.byte_offset(end) {
            Some(offset) => &self.text[..offset],
            None => &self.text,
        }
    }

    /// Rebuild the display cells: expand tabs to the next tab stop, then
    /// tokenize the whole display text.
    pub fn recompute(&mut self, ctx: &LineContext) {
        let tab_width = ctx.tab_width.max(1);
        let mut display: Vec<char> = Vec::with_capacity(self.text.len());
        for c in self.text.chars() {
            if c == '\t' {
                let stop = tab_width - display.len() % tab_width;
                display.extend(std::iter::repeat(' ').take(stop));
            } else {
                display.push(c);
            }
        }

        let tokens = match ctx.language {
            Some(language) => token::tokenize(&display, language),
            None => vec![TokenClass::Text; display.len()],
        };

        self.cells = display
            .into_iter()
            .zip(tokens)
            .map(|(ch, token)| Cell { ch, token })
            .collect();
    }

    /// Display column of raw column `x`, accounting for tab stops.
    pub fn adjusted_display_column(&self, x: usize, tab_width: usize) -> usize {
        let tab_width = tab_width.max(1);
        let mut delta = 0;
        for c in self.text.chars().take(x) {
            if c == '\t' {
                delta += (tab_width - 1) - (delta % tab_width);
            }
            delta += 1;
        }
        delta
    }

    /// Number of leading spaces and tabs.
    pub fn indent_length(&self) -> usize {
        self.text
            .chars()
            .take_while(|c| *c == ' ' || *c == '\t')
            .count()
    }

    fn byte_offset(&self, at: usize) -> Option<usize> {
        if at == 0 {
            return Some(0);
        }
        match self.text.char_indices().nth(at) {
            Some((offset, _)) => Some(offset),
            None if at == self.len() => Some(self.text.len()),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filetype::FileType;
    use crate::language::LanguageRegistry;

    fn plain(tab_width: usize, soft_tabs: bool) -> LineContext<'static> {
        LineContext {
            tab_width,
            soft_tabs,
            language: None,
        }
    }

    #[test]
    fn test_tab_expansion_to_tab_stops() {
        let ctx = plain(4, false);
        let line = Line::new("a\tb\t\tc", &ctx);
        assert_eq!(line.display_text(), "a   b       c");
        assert_eq!(line.display_len(), line.cells().len());
    }

    #[test]
    fn test_adjusted_column_matches_display() {
        let ctx = plain(4, false);
        for text in ["", "\t", "ab\tc", "\t\tx", "abcd\t", "x\ty\tz\t"] {
            let line = Line::new(text, &ctx);
            assert_eq!(
                line.adjusted_display_column(line.len(), 4),
                line.display_len(),
                "mismatch for {:?}",
                text
            );
        }
    }

    #[test]
    fn test_adjusted_column_mid_line() {
        let ctx = plain(8, false);
        let line = Line::new("ab\tcd", &ctx);
        assert_eq!(line.adjusted_display_column(0, 8), 0);
        assert_eq!(line.adjusted_display_column(2, 8), 2);
        assert_eq!(line.adjusted_display_column(3, 8), 8);
        assert_eq!(line.adjusted_display_column(4, 8), 9);
    }

    #[test]
    fn test_insert_rune() {
        let ctx = plain(4, false);
        let mut line = Line::new("ac", &ctx);
        assert_eq!(line.insert_rune(1, 'b', &ctx), 1);
        assert_eq!(line.text(), "abc");
        assert_eq!(line.insert_rune(3, 'd', &ctx), 1);
        assert_eq!(line.text(), "abcd");
        assert_eq!(line.insert_rune(9, 'z', &ctx), 0);
        assert_eq!(line.text(), "abcd");
    }

    #[test]
    fn test_insert_soft_tab() {
        let ctx = plain(4, true);
        let mut line = Line::new("", &ctx);
        assert_eq!(line.insert_rune(0, '\t', &ctx), 4);
        assert_eq!(line.text(), "    ");
    }

    #[test]
    fn test_insert_hard_tab() {
        let ctx = plain(4, false);
        let mut line = Line::new("x", &ctx);
        assert_eq!(line.insert_rune(0, '\t', &ctx), 1);
        assert_eq!(line.text(), "\tx");
        assert_eq!(line.display_text(), "    x");
    }

    #[test]
    fn test_delete_rune_bounds() {
        let ctx = plain(4, false);
        let mut line = Line::new("abc", &ctx);
        assert!(!line.delete_rune(3, &ctx));
        assert_eq!(line.text(), "abc");
        assert!(line.delete_rune(1, &ctx));
        assert_eq!(line.text(), "ac");
    }

    #[test]
    fn test_multibyte_columns() {
        let ctx = plain(4, false);
        let mut line = Line::new("héllo", &ctx);
        assert_eq!(line.len(), 5);
        line.delete_rune(1, &ctx);
        assert_eq!(line.text(), "hllo");
        line.insert_rune(1, 'e', &ctx);
        assert_eq!(line.text(), "hello");
        assert_eq!(Line::new("日本語", &ctx).tail(1), "本語");
        assert_eq!(Line::new("日本語", &ctx).head(2), "日本");
    }

    #[test]
    fn test_append_and_truncate() {
        let ctx = plain(4, false);
        let mut line = Line::new("foo", &ctx);
        line.append_str("bar", &ctx);
        assert_eq!(line.text(), "foobar");
        line.truncate(3, &ctx);
        assert_eq!(line.text(), "foo");
        assert_eq!(line.display_text(), "foo");
    }

    #[test]
    fn test_indent_length() {
        let ctx = plain(4, false);
        assert_eq!(Line::new("", &ctx).indent_length(), 0);
        assert_eq!(Line::new("x", &ctx).indent_length(), 0);
        assert_eq!(Line::new("  \t x", &ctx).indent_length(), 4);
        assert_eq!(Line::new("   ", &ctx).indent_length(), 3);
    }

    #[test]
    fn test_highlighting_follows_context() {
        let registry = LanguageRegistry::builtin();
        let settings = Settings::default();
        let ctx = LineContext::new(&settings, registry.get(FileType::C));
        let line = Line::new("\tint x;", &ctx);
        let tokens: Vec<TokenClass> = line.tokens().collect();
        assert_eq!(tokens.len(), line.display_len());
        assert!(tokens[4..7].iter().all(|t| *t == TokenClass::Keyword));

        let off = Settings {
            highlighting: false,
            ..settings
        };
        let ctx = LineContext::new(&off, registry.get(FileType::C));
        let line = Line::new("\tint x;", &ctx);
        assert!(line.tokens().all(|t| t == TokenClass::Text));
    }
}
