use anyhow::{Context, Result};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::filetype::FileType;
use crate::language::LanguageRegistry;
use crate::line::{Line, LineContext};
use crate::settings::Settings;
use crate::storage::Storage;

/// Printable ASCII plus space and tab.
pub fn is_insertable(c: char) -> bool {
    c == '\t' || c == ' ' || c.is_ascii_graphic()
}

/// Read-only state shared by every buffer of a session.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    pub settings: Settings,
    pub languages: LanguageRegistry,
}

impl Environment {
    pub fn new(settings: Settings, languages: LanguageRegistry) -> Self {
        Self {
            settings,
            languages,
        }
    }

    pub fn line_context(&self, file_type: FileType) -> LineContext<'_> {
        LineContext::new(&self.settings, self.languages.get(file_type))
    }
}

/// An ordered, never-empty sequence of lines with a cursor and viewport.
///
/// `cursor_row` is 1-based, `cursor_x` is a char column into the focused
/// line's raw text.
#[derive(Debug, Clone)]
pub struct Buffer {
    env: Arc<Environment>,
    path: PathBuf,
    file_type: FileType,
    pub(crate) lines: Vec<Line>,
    dirty: bool,
    read_only: bool,
    pub(crate) cursor_x: usize,
    pub(crate) cursor_row: usize,
    pub(crate) offset_x: usize,
    pub(crate) offset_y: usize,
}

impl Buffer {
    /// A buffer holding `lines`, or a single empty line if there are none.
    pub fn from_lines<I, S>(path: impl Into<PathBuf>, lines: I, env: Arc<Environment>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let path = path.into();
        let file_type = FileType::infer(&path);
        let mut built: Vec<Line> = {
            let ctx = env.line_context(file_type);
            lines.into_iter().map(|text| Line::new(text, &ctx)).collect()
        };
        if built.is_empty() {
            built.push(Line::new("", &env.line_context(file_type)));
        }

        Self {
            env,
            path,
            file_type,
            lines: built,
            dirty: false,
            read_only: false,
            cursor_x: 0,
            cursor_row: 1,
            offset_x: 0,
            offset_y: 0,
        }
    }

    pub fn from_text(path: impl Into<PathBuf>, text: &str, env: Arc<Environment>) -> Self {
        Self::from_lines(path, text.lines(), env)
    }

    pub fn empty(path: impl Into<PathBuf>, env: Arc<Environment>) -> Self {
        Self::from_lines(path, std::iter::empty::<String>(), env)
    }

    /// Load `path` through `storage`. A file that does not exist yields an
    /// empty buffer; any other read failure is an error.
    pub fn open(path: impl Into<PathBuf>, env: Arc<Environment>, storage: &impl Storage) -> Result<Self> {
        let path = path.into();
        match storage.read_to_string(&path) {
            Ok(text) => {
                let buffer = Self::from_text(path, &text, env);
                log::info!(
                    "Loaded {} ({} lines, {})",
                    buffer.path.display(),
                    buffer.len(),
                    buffer.file_type
                );
                Ok(buffer)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("{} does not exist, starting empty", path.display());
                Ok(Self::empty(path, env))
            }
            Err(e) => Err(e).with_context(|| format!("{}", path.display())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// `(cursor_x, cursor_row)`.
    pub fn cursor(&self) -> (usize, usize) {
        (self.cursor_x, self.cursor_row)
    }

    /// Place the cursor, clamped to the buffer's lines.
    pub fn set_cursor(&mut self, x: usize, row: usize) {
        self.cursor_row = row.clamp(1, self.len());
        self.cursor_x = x.min(self.focused_line().len());
    }

    /// Display column of the cursor, with tabs expanded.
    pub fn cursor_dx(&self) -> usize {
        self.focused_line()
            .adjusted_display_column(self.cursor_x, self.env.settings.tab_width)
    }

    /// `(offset_x, offset_y)` of the viewport.
    pub fn offsets(&self) -> (usize, usize) {
        (self.offset_x, self.offset_y)
    }

    /// The line under the cursor. `cursor_row` is kept in `[1, len]` by the
    /// cursor operations.
    pub fn focused_line(&self) -> &Line {
        &self.lines[self.cursor_row - 1]
    }

    pub fn insert_line(&mut self, i: usize, text: &str) {
        if self.read_only {
            log::debug!("insert_line ignored on read-only {}", self.path.display());
            return;
        }
        if i > self.lines.len() {
            return;
        }

        let line = Line::new(text, &self.env.line_context(self.file_type));
        self.lines.insert(i, line);
        self.dirty = true;
    }

    pub fn remove_line(&mut self, i: usize) {
        if self.read_only {
            log::debug!("remove_line ignored on read-only {}", self.path.display());
            return;
        }
        if i >= self.lines.len() {
            return;
        }

        self.lines.remove(i);
        if self.lines.is_empty() {
            self.lines.push(Line::new("", &self.env.line_context(self.file_type)));
        }
        self.cursor_row = self.cursor_row.min(self.lines.len());
        self.cursor_x = self.cursor_x.min(self.focused_line().len());
        self.dirty = true;
    }

    /// Split the focused line at the cursor (Enter).
    ///
    /// The new line starts with the focused line's indentation. At column 0 an
    /// empty line is opened above instead.
    pub fn break_line(&mut self) {
        if self.read_only {
            return;
        }

        let ctx = self.env.line_context(self.file_type);
        let row = self.cursor_row - 1;
        if self.cursor_x == 0 {
            self.lines.insert(row, Line::new("", &ctx));
        } else {
            let focused = &self.lines[row];
            let indent = focused.indent_length();
            let x = self.cursor_x.min(focused.len());
            let below = format!("{}{}", focused.head(indent), focused.tail(x));

            self.lines[row].truncate(x, &ctx);
            self.lines.insert(row + 1, Line::new(below, &ctx));
            self.cursor_x = indent;
        }

        self.cursor_row += 1;
        self.dirty = true;
    }

    /// Insert `c` at the cursor and advance past it. Returns whether anything
    /// was inserted.
    pub fn insert_rune(&mut self, c: char) -> bool {
        if self.read_only || !is_insertable(c) {
            return false;
        }

        let ctx = self.env.line_context(self.file_type);
        let inserted = self.lines[self.cursor_row - 1].insert_rune(self.cursor_x, c, &ctx);
        if inserted == 0 {
            return false;
        }

        self.cursor_x += inserted;
        self.dirty = true;
        true
    }

    /// Delete the rune left of the cursor (Backspace), joining with the
    /// previous line at column 0.
    pub fn delete_rune(&mut self) {
        if self.read_only {
            return;
        }
        if self.cursor_x == 0 && self.cursor_row == 1 {
            return;
        }

        let ctx = self.env.line_context(self.file_type);
        let row = self.cursor_row - 1;
        if self.cursor_x > 0 {
            self.lines[row].delete_rune(self.cursor_x - 1, &ctx);
            self.cursor_x -= 1;
        } else {
            let moved = self.lines.remove(row);
            let previous = &mut self.lines[row - 1];
            self.cursor_x = previous.len();
            previous.append_str(moved.text(), &ctx);
            self.cursor_row -= 1;
        }

        self.dirty = true;
    }

    /// Contents as written to disk: every line followed by `\n`.
    pub fn contents(&self) -> String {
        let mut text = String::new();
        for line in &self.lines {
            text.push_str(line.text());
            text.push('\n');
        }
        text
    }

    /// Save to `path` through `storage`. On success the buffer adopts `path`,
    /// re-infers its file type and becomes clean.
    pub fn write(&mut self, path: impl Into<PathBuf>, storage: &impl Storage) -> Result<()> {
        let path = path.into();
        storage
            .write(&path, self.contents().as_bytes())
            .with_context(|| format!("{}", path.display()))?;

        let file_type = FileType::infer(&path);
        if file_type != self.file_type {
            self.file_type = file_type;
            let ctx = self.env.line_context(file_type);
            for line in &mut self.lines {
                line.recompute(&ctx);
            }
        }
        log::info!("Wrote {} lines to {}", self.lines.len(), path.display());
        self.path = path;
        self.dirty = false;
        Ok(())
    }
}
