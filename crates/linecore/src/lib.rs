pub mod buffer;
pub mod cursor;
pub mod filetype;
pub mod language;
pub mod line;
pub mod settings;
pub mod storage;
pub mod token;
pub mod viewport;


pub use buffer::{is_insertable, Buffer, Environment};
pub use cursor::CursorMove;
pub use filetype::FileType;
pub use language::{Language, LanguageRegistry};
pub use line::{Cell, Line, LineContext};
pub use settings::Settings;
pub use storage::{DiskStorage, MemoryStorage, Storage};
pub use token::{tokenize, TokenClass};
pub use viewport::{scroll, Scroll, ViewSize};
