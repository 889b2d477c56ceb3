// Kerf library exports

pub mod app;
pub mod config;
pub mod file_manager;
pub mod help;
pub mod prompt;
pub mod status_manager;
pub mod ui;

pub use app::{App, Mode};
pub use config::Config;
pub use file_manager::FileManager;
pub use prompt::{Confirmation, PromptOutcome};
pub use status_manager::StatusManager;
