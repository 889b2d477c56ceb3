//! Single-line prompts shown in the status bar.
//!
//! A prompt takes over key input until it is answered or cancelled. Cancelling
//! is its own outcome, so an empty answer and an aborted prompt never look
//! alike.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use linecore::is_insertable;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    Answered(String),
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Yes,
    No,
    Cancelled,
}

fn is_cancel(key: &KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// A question with an editable answer.
#[derive(Debug, Clone)]
pub struct Prompt {
    question: String,
    answer: Vec<char>,
    cursor: usize,
}

impl Prompt {
    /// Ask `question`, with `answer` pre-filled and the cursor after it.
    pub fn new(question: impl Into<String>, answer: &str) -> Self {
        let answer: Vec<char> = answer.chars().collect();
        Self {
            question: question.into(),
            cursor: answer.len(),
            answer,
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> String {
        self.answer.iter().collect()
    }

    /// Cursor position within the answer, in chars.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Feed one key. Returns the outcome once the prompt is finished.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<PromptOutcome> {
        if is_cancel(&key) {
            return Some(PromptOutcome::Cancelled);
        }

        match key.code {
            KeyCode::Enter => return Some(PromptOutcome::Answered(self.answer())),
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => {
                if self.cursor < self.answer.len() {
                    self.cursor += 1;
                }
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.answer.remove(self.cursor);
                }
            }
            KeyCode::Char(c)
                if is_insertable(c)
                    && !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.answer.insert(self.cursor, c);
                self.cursor += 1;
            }
            _ => {}
        }
        None
    }
}

/// A yes/no question answered by a single key.
#[derive(Debug, Clone)]
pub struct ConfirmPrompt {
    question: String,
}

impl ConfirmPrompt {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    /// `y`/`Y` and `n`/`N` answer, Esc and Ctrl+C cancel, anything else is ignored.
    pub fn handle_key(&self, key: KeyEvent) -> Option<Confirmation> {
        if is_cancel(&key) {
            return Some(Confirmation::Cancelled);
        }

        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(Confirmation::Yes),
            KeyCode::Char('n') | KeyCode::Char('N') => Some(Confirmation::No),
            _ => None,
        }
    }
}
