use anyhow::{anyhow, Result};
use linecore::{Buffer, DiskStorage, Environment, Storage};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Loads and saves buffers through a [`Storage`] and turns failures into
/// messages fit for the status bar.
#[derive(Debug, Default)]
pub struct FileManager<S: Storage = DiskStorage> {
    storage: S,
}

/// A freshly loaded buffer and whether its file refused writes.
#[derive(Debug)]
pub struct Opened {
    pub buffer: Buffer,
    pub read_only: bool,
}

impl FileManager<DiskStorage> {
    pub fn new() -> Self {
        Self {
            storage: DiskStorage,
        }
    }
}

impl<S: Storage> FileManager<S> {
    pub fn with_storage(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Load `path` into a new buffer. A missing file opens as an empty one.
    pub fn open(&self, path: impl Into<PathBuf>, env: Arc<Environment>) -> Result<Opened> {
        let path = path.into();
        let mut buffer = Buffer::open(&path, env, &self.storage).map_err(|e| {
            log::error!("Failed to open {}: {:#}", path.display(), e);
            anyhow!(describe_error(&e, &path, Action::Read))
        })?;

        let read_only = self.storage.is_read_only(&path);
        if read_only {
            buffer.set_read_only(true);
        }

        log::info!(
            "Opened {} ({} lines, {})",
            path.display(),
            buffer.len(),
            buffer.file_type()
        );
        Ok(Opened { buffer, read_only })
    }

    /// Write `buffer` to `path` and return the confirmation message.
    pub fn save(&self, buffer: &mut Buffer, path: impl Into<PathBuf>) -> Result<String> {
        let path = path.into();
        if buffer.is_read_only() {
            return Err(anyhow!("Read-only buffers cannot be saved."));
        }

        buffer.write(&path, &self.storage).map_err(|e| {
            log::error!("Failed to save {}: {:#}", path.display(), e);
            anyhow!(describe_error(&e, &path, Action::Write))
        })?;

        Ok(format!("File saved successfully. ({})", path.display()))
    }
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Read,
    Write,
}

fn describe_error(err: &anyhow::Error, path: &Path, action: Action) -> String {
    let io_err = err.chain().find_map(|e| e.downcast_ref::<io::Error>());
    let Some(io_err) = io_err else {
        return format!("{:#}", err);
    };

    match (io_err.kind(), action) {
        (io::ErrorKind::PermissionDenied, Action::Read) => {
            format!("Permission denied reading {}", path.display())
        }
        (io::ErrorKind::PermissionDenied, Action::Write) => {
            format!("Permission denied writing {}", path.display())
        }
        (io::ErrorKind::InvalidData, _) => {
            format!("{} is not valid UTF-8", path.display())
        }
        (io::ErrorKind::NotFound, Action::Write) => {
            format!("Directory does not exist for {}", path.display())
        }
        (io::ErrorKind::WriteZero, _) => {
            format!("Disk may be full, could not write {}", path.display())
        }
        _ => format!("{}: {}", path.display(), io_err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use linecore::{FileType, LanguageRegistry, MemoryStorage, Settings};
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn env() -> Arc<Environment> {
        Arc::new(Environment::new(Settings::default(), LanguageRegistry::builtin()))
    }

    #[test]
    fn test_open_and_save_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "Hello World\nTest content\n").unwrap();

        let fm = FileManager::new();
        let opened = fm.open(temp_file.path(), env()).unwrap();
        assert!(!opened.read_only);

        let mut buffer = opened.buffer;
        assert_eq!(buffer.len(), 2);
        buffer.insert_rune('!');
        assert!(buffer.is_dirty());

        let message = fm.save(&mut buffer, temp_file.path()).unwrap();
        assert!(message.starts_with("File saved successfully."));
        assert!(!buffer.is_dirty());

        let written = std::fs::read_to_string(temp_file.path()).unwrap();
        assert_eq!(written, "!Hello World\nTest content\n");
    }

    #[test]
    fn test_open_missing_file_is_new_buffer() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("new.go");

        let opened = FileManager::new().open(&path, env()).unwrap();
        assert_eq!(opened.buffer.len(), 1);
        assert_eq!(opened.buffer.file_type(), FileType::Go);
        assert!(!opened.buffer.is_dirty());
    }

    #[test]
    fn test_open_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let err = FileManager::new().open(temp_dir.path(), env()).unwrap_err();
        assert!(err.to_string().contains(&temp_dir.path().display().to_string()));
    }

    #[test]
    fn test_save_as_new_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out.c");

        let fm = FileManager::new();
        let mut buffer = Buffer::from_lines("Untitled", ["int x;"], env());
        fm.save(&mut buffer, &path).unwrap();

        assert_eq!(buffer.path(), path.as_path());
        assert_eq!(buffer.file_type(), FileType::C);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "int x;\n");
    }

    #[test]
    fn test_save_into_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("out.txt");

        let mut buffer = Buffer::from_lines("Untitled", ["x"], env());
        buffer.insert_rune('y');
        let err = FileManager::new().save(&mut buffer, &path).unwrap_err();

        assert!(err.to_string().starts_with("Directory does not exist"));
        assert!(buffer.is_dirty());
        assert_eq!(buffer.path(), Path::new("Untitled"));
    }

    #[test]
    fn test_invalid_utf8_message() {
        let storage = MemoryStorage::new();
        storage.insert("bin.dat", vec![0xff, 0x00, 0xfe]);
        let err = FileManager::with_storage(storage)
            .open("bin.dat", env())
            .unwrap_err();
        assert_eq!(err.to_string(), "bin.dat is not valid UTF-8");
    }

    #[test]
    fn test_read_only_file_opens_read_only() {
        let storage = MemoryStorage::read_only();
        storage.insert("locked.txt", "keep\n");
        let fm = FileManager::with_storage(storage);

        let opened = fm.open("locked.txt", env()).unwrap();
        assert!(opened.read_only);

        let mut buffer = opened.buffer;
        assert!(buffer.is_read_only());
        let err = fm.save(&mut buffer, "locked.txt").unwrap_err();
        assert_eq!(err.to_string(), "Read-only buffers cannot be saved.");
    }

    #[test]
    fn test_permission_denied_on_write() {
        let fm = FileManager::with_storage(MemoryStorage::read_only());
        let mut buffer = Buffer::from_lines("a.txt", ["x"], env());
        let err = fm.save(&mut buffer, "a.txt").unwrap_err();
        assert_eq!(err.to_string(), "Permission denied writing a.txt");
    }
}
