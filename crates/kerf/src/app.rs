use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use linecore::{scroll, Buffer, CursorMove, DiskStorage, Environment, LanguageRegistry, Storage, ViewSize};
use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::file_manager::FileManager;
use crate::help::{help_lines, HELP_BUFFER_NAME};
use crate::prompt::{ConfirmPrompt, Confirmation, Prompt, PromptOutcome};
use crate::status_manager::StatusManager;

/// Name of the scratch buffer opened when no file is given.
pub const UNTITLED: &str = "Untitled";

/// Who receives key input: the focused buffer, or an active prompt.
#[derive(Debug, Clone)]
pub enum Mode {
    Edit,
    Open(Prompt),
    Save { prompt: Prompt, close_after: bool },
    ConfirmClose(ConfirmPrompt),
}

/// The open buffers, the focused one, and whatever prompt is in progress.
pub struct App<S: Storage = DiskStorage> {
    pub config: Config,
    pub status: StatusManager,
    env: Arc<Environment>,
    buffers: Vec<Buffer>,
    focus: usize,
    mode: Mode,
    saved_cursor: Option<(usize, usize)>,
    file_manager: FileManager<S>,
    width: u16,
    height: u16,
    should_quit: bool,
}

impl App<DiskStorage> {
    pub fn new(config: Config) -> Self {
        Self::with_storage(config, DiskStorage)
    }
}

impl<S: Storage> App<S> {
    pub fn with_storage(config: Config, storage: S) -> Self {
        let env = Arc::new(Environment::new(
            config.settings(),
            LanguageRegistry::builtin(),
        ));
        let status = StatusManager::new(config.status_timeout());

        Self {
            config,
            status,
            env,
            buffers: Vec::new(),
            focus: 0,
            mode: Mode::Edit,
            saved_cursor: None,
            file_manager: FileManager::with_storage(storage),
            width: 80,
            height: 24,
            should_quit: false,
        }
    }

    /// Open one buffer per path. Paths that fail to load are reported and
    /// skipped. With nothing opened, an empty `Untitled` buffer is used.
    pub fn open_files<P: AsRef<Path>>(&mut self, paths: &[P]) {
        for path in paths {
            self.read(path.as_ref());
        }

        if self.buffers.is_empty() {
            log::info!("No file opened, starting with an empty buffer");
            self.buffers
                .push(Buffer::empty(UNTITLED, Arc::clone(&self.env)));
        }
        self.focus = 0;
    }

    fn read(&mut self, path: &Path) -> bool {
        match self.file_manager.open(path, Arc::clone(&self.env)) {
            Ok(opened) => {
                if opened.read_only {
                    self.status
                        .set_warning(format!("Warning: {} is read-only.", path.display()));
                }
                self.buffers.push(opened.buffer);
                log::debug!("Buffer count is now {}", self.buffers.len());
                true
            }
            Err(e) => {
                self.status.set_error(format!("Error: {}", e));
                false
            }
        }
    }

    pub fn buffers(&self) -> &[Buffer] {
        &self.buffers
    }

    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    pub fn focus_index(&self) -> usize {
        self.focus
    }

    pub fn focused(&self) -> Option<&Buffer> {
        self.buffers.get(self.focus)
    }

    pub fn file_manager(&self) -> &FileManager<S> {
        &self.file_manager
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn is_prompt_active(&self) -> bool {
        !matches!(self.mode, Mode::Edit)
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Record the terminal size. Paging and scrolling use it.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Keep the cursor inside the text area, which is the terminal minus the
    /// title and status rows. Skipped while a prompt is active.
    pub fn scroll_view(&mut self) {
        if self.is_prompt_active() {
            return;
        }
        let size = ViewSize::new(
            self.width as usize,
            self.height.saturating_sub(2) as usize,
        );
        if let Some(buffer) = self.buffers.get_mut(self.focus) {
            let s = scroll(buffer, size);
            buffer.apply_scroll(s);
        }
    }

    pub fn update_status(&mut self) {
        self.status.update();
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match std::mem::replace(&mut self.mode, Mode::Edit) {
            Mode::Edit => self.handle_edit_key(key),
            Mode::Open(mut prompt) => match prompt.handle_key(key) {
                Some(outcome) => {
                    self.leave_prompt();
                    self.finish_open(outcome);
                }
                None => self.mode = Mode::Open(prompt),
            },
            Mode::Save {
                mut prompt,
                close_after,
            } => match prompt.handle_key(key) {
                Some(outcome) => {
                    self.leave_prompt();
                    self.finish_save(outcome, close_after);
                }
                None => self.mode = Mode::Save { prompt, close_after },
            },
            Mode::ConfirmClose(confirm) => match confirm.handle_key(key) {
                Some(answer) => {
                    self.leave_prompt();
                    self.finish_close(answer);
                }
                None => self.mode = Mode::ConfirmClose(confirm),
            },
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('r') if ctrl => self.begin_open(),
            KeyCode::Char('o') if ctrl => self.begin_save(false),
            KeyCode::Char('w') if ctrl => self.close_focused(),
            KeyCode::Char('p') if ctrl => self.next_buffer(),
            KeyCode::Char('l') if ctrl => self.prev_buffer(),
            KeyCode::Char('h') if ctrl => self.show_help(),
            KeyCode::F(1) => self.show_help(),
            KeyCode::Char('a') if ctrl => self.move_cursor(CursorMove::LineStart),
            KeyCode::Char('e') if ctrl => self.move_cursor(CursorMove::LineEnd),
            KeyCode::Up => self.move_cursor(CursorMove::Up),
            KeyCode::Down => self.move_cursor(CursorMove::Down),
            KeyCode::Left => self.move_cursor(CursorMove::Left),
            KeyCode::Right => self.move_cursor(CursorMove::Right),
            KeyCode::Home => self.move_cursor(CursorMove::LineStart),
            KeyCode::End => self.move_cursor(CursorMove::LineEnd),
            KeyCode::PageUp => self.move_cursor(CursorMove::PageUp),
            KeyCode::PageDown => self.move_cursor(CursorMove::PageDown),
            _ => {
                let Some(buffer) = self.buffers.get_mut(self.focus) else {
                    return;
                };
                match key.code {
                    KeyCode::Backspace => buffer.delete_rune(),
                    KeyCode::Enter => buffer.break_line(),
                    KeyCode::Tab => {
                        buffer.insert_rune('\t');
                    }
                    KeyCode::Char(c)
                        if !key
                            .modifiers
                            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
                    {
                        buffer.insert_rune(c);
                    }
                    _ => {}
                }
            }
        }
    }

    fn move_cursor(&mut self, movement: CursorMove) {
        let height = self.height as usize;
        if let Some(buffer) = self.buffers.get_mut(self.focus) {
            buffer.move_cursor(movement, height);
        }
    }

    fn enter_prompt(&mut self, mode: Mode) {
        self.saved_cursor = self.focused().map(Buffer::cursor);
        self.mode = mode;
    }

    fn leave_prompt(&mut self) {
        self.mode = Mode::Edit;
        if let (Some((x, row)), Some(buffer)) =
            (self.saved_cursor.take(), self.buffers.get_mut(self.focus))
        {
            buffer.set_cursor(x, row);
        }
    }

    pub fn begin_open(&mut self) {
        self.enter_prompt(Mode::Open(Prompt::new("Open file: ", "")));
    }

    fn finish_open(&mut self, outcome: PromptOutcome) {
        let path = match outcome {
            PromptOutcome::Cancelled => {
                self.status.set_info("User cancelled operation.");
                return;
            }
            PromptOutcome::Answered(path) if path.trim().is_empty() => {
                self.status.set_warning("No file name given.");
                return;
            }
            PromptOutcome::Answered(path) => path,
        };

        if self.read(Path::new(&path)) {
            self.focus = self.buffers.len() - 1;
            log::debug!("Focused buffer {} ({})", self.focus + 1, path);
        }
    }

    /// Ask where to save the focused buffer. With `close_after`, the buffer
    /// closes once the save succeeds.
    pub fn begin_save(&mut self, close_after: bool) {
        let Some(buffer) = self.focused() else {
            return;
        };
        if buffer.is_read_only() {
            self.status
                .set_warning("Warning: Read-only buffers cannot be saved.");
            return;
        }

        let answer = buffer.path().display().to_string();
        self.enter_prompt(Mode::Save {
            prompt: Prompt::new("Save: ", &answer),
            close_after,
        });
    }

    fn finish_save(&mut self, outcome: PromptOutcome, close_after: bool) {
        let path = match outcome {
            PromptOutcome::Cancelled => {
                self.status.set_info("Save cancelled.");
                return;
            }
            PromptOutcome::Answered(path) if path.trim().is_empty() => {
                self.status.set_warning("No file name given.");
                return;
            }
            PromptOutcome::Answered(path) => path,
        };

        let Some(buffer) = self.buffers.get_mut(self.focus) else {
            return;
        };
        match self.file_manager.save(buffer, path) {
            Ok(message) => {
                self.status.set_success(message);
                if close_after {
                    self.remove_focused();
                }
            }
            Err(e) => self.status.set_error(format!("Error: {}", e)),
        }
    }

    /// Close the focused buffer, asking first when it has unsaved changes.
    pub fn close_focused(&mut self) {
        let Some(buffer) = self.focused() else {
            return;
        };
        if buffer.is_dirty() {
            self.enter_prompt(Mode::ConfirmClose(ConfirmPrompt::new(
                "Save changes? [Y/N]: ",
            )));
        } else {
            self.remove_focused();
        }
    }

    fn finish_close(&mut self, answer: Confirmation) {
        match answer {
            Confirmation::Yes => self.begin_save(true),
            Confirmation::No => self.remove_focused(),
            Confirmation::Cancelled => {}
        }
    }

    fn remove_focused(&mut self) {
        if self.focus >= self.buffers.len() {
            return;
        }
        let buffer = self.buffers.remove(self.focus);
        log::debug!("Closed buffer {}", buffer.path().display());

        if self.buffers.is_empty() {
            log::info!("Last buffer closed");
            self.quit();
        } else if self.focus >= self.buffers.len() {
            self.focus = self.buffers.len() - 1;
        }
    }

    pub fn next_buffer(&mut self) {
        if self.focus + 1 < self.buffers.len() {
            self.focus += 1;
        }
    }

    pub fn prev_buffer(&mut self) {
        if self.focus > 0 {
            self.focus -= 1;
        }
    }

    /// Open the read-only help buffer and focus it.
    pub fn show_help(&mut self) {
        let mut buffer = Buffer::from_lines(HELP_BUFFER_NAME, help_lines(), Arc::clone(&self.env));
        buffer.set_read_only(true);
        self.buffers.push(buffer);
        self.focus = self.buffers.len() - 1;
    }
}
