//! Language definitions consumed by the tokenizer, and the registry that maps
//! a [`FileType`] to the definition used for its lines.

use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::Arc;

use crate::filetype::FileType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    pub name: String,
    /// Checked in order; the first keyword matching at a position wins.
    pub keywords: Vec<String>,
    pub single_line_comment: String,
    /// Recorded for completeness. The per-line tokenizer does not consult
    /// these, so a line inside a block comment is not recognised as one.
    pub multi_line_comment: Option<(String, String)>,
}

impl Language {
    pub fn new(name: &str, keywords: &[&str], single_line_comment: &str) -> Self {
        Self {
            name: name.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            single_line_comment: single_line_comment.to_string(),
            multi_line_comment: None,
        }
    }

    pub fn with_block_comment(mut self, start: &str, end: &str) -> Self {
        self.multi_line_comment = Some((start.to_string(), end.to_string()));
        self
    }
}

lazy_static! {
    static ref C_LANGUAGE: Arc<Language> = Arc::new(
        Language::new(
            "C",
            &[
                "#define", "#include", "NULL", "auto", "break", "case", "char", "const",
                "continue", "default", "do", "double", "else", "enum", "extern", "float",
                "for", "goto", "if", "int", "long", "register", "return", "short",
                "signed", "sizeof", "static", "struct", "switch", "typedef", "union",
                "unsigned", "void", "volatile", "while",
            ],
            "//",
        )
        .with_block_comment("/*", "*/")
    );
    static ref GO_LANGUAGE: Arc<Language> = Arc::new(
        Language::new(
            "Go",
            &[
                "append", "bool", "break", "byte", "cap", "case", "chan", "close",
                "complex", "complex128", "complex64", "const", "continue", "copy",
                "default", "defer", "delete", "else", "error", "fallthrough", "false",
                "float32", "float64", "for", "func", "go", "goto", "if", "imag",
                "import", "int", "int16", "int32", "int64", "int8", "interface", "len",
                "make", "map", "new", "nil", "package", "panic", "range", "real",
                "recover", "return", "rune", "select", "string", "struct", "switch",
                "true", "type", "uint", "uint16", "uint32", "uint64", "uint8", "uintptr",
                "var",
            ],
            "//",
        )
        .with_block_comment("/*", "*/")
    );
}

/// Mapping from file type to language definition, populated once per session.
#[derive(Debug, Clone, Default)]
pub struct LanguageRegistry {
    languages: HashMap<FileType, Arc<Language>>,
}

impl LanguageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in C, C++ and Go definitions.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(FileType::C, Arc::clone(&C_LANGUAGE));
        registry.register(FileType::Cpp, Arc::clone(&C_LANGUAGE));
        registry.register(FileType::Go, Arc::clone(&GO_LANGUAGE));
        registry
    }

    pub fn register(&mut self, file_type: FileType, language: Arc<Language>) {
        log::debug!("Registering {} highlighting for {}", language.name, file_type);
        self.languages.insert(file_type, language);
    }

    pub fn get(&self, file_type: FileType) -> Option<&Language> {
        self.languages.get(&file_type).map(|l| l.as_ref())
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry() {
        let registry = LanguageRegistry::builtin();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get(FileType::C).unwrap().name, "C");
        assert_eq!(registry.get(FileType::Cpp).unwrap().name, "C");
        assert_eq!(registry.get(FileType::Go).unwrap().name, "Go");
        assert!(registry.get(FileType::Markdown).is_none());
        assert!(registry.get(FileType::Unknown).is_none());
    }

    #[test]
    fn test_block_comment_markers_recorded() {
        let registry = LanguageRegistry::builtin();
        let c = registry.get(FileType::C).unwrap();
        assert_eq!(
            c.multi_line_comment,
            Some(("/*".to_string(), "*/".to_string()))
        );
        assert_eq!(c.single_line_comment, "//");
    }

    #[test]
    fn test_register_custom_language() {
        let mut registry = LanguageRegistry::new();
        assert!(registry.is_empty());
        registry.register(
            FileType::Makefile,
            Arc::new(Language::new("Make", &["ifeq", "endif"], "#")),
        );
        let make = registry.get(FileType::Makefile).unwrap();
        assert_eq!(make.keywords, vec!["ifeq", "endif"]);
    }
}
