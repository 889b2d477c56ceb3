use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    Makefile,
    CMake,
    Go,
    GoModule,
    C,
    Cpp,
    Markdown,
    Plaintext,
    Unknown,
}

impl FileType {
    /// Infer a file type from the final component of `path`.
    ///
    /// Whole names like `Makefile` are matched before the extension.
    pub fn infer(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => return FileType::Unknown,
        };

        match name {
            "Makefile" => return FileType::Makefile,
            "CMakeLists.txt" => return FileType::CMake,
            _ => {}
        }

        match Path::new(name).extension().and_then(|e| e.to_str()) {
            Some("go") => FileType::Go,
            Some("mod") => FileType::GoModule,
            Some("c") | Some("h") => FileType::C,
            Some("cpp") | Some("cc") | Some("hpp") => FileType::Cpp,
            Some("md") => FileType::Markdown,
            Some("txt") => FileType::Plaintext,
            _ => FileType::Unknown,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FileType::Makefile => "Makefile",
            FileType::CMake => "CMake",
            FileType::Go => "Go",
            FileType::GoModule => "Go Module",
            FileType::C => "C",
            FileType::Cpp => "C++",
            FileType::Markdown => "Markdown",
            FileType::Plaintext => "Plaintext",
            FileType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
