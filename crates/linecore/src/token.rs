//! Single-pass, per-line lexical classification.
//!
//! The scan runs over a line's display text and yields one [`TokenClass`] per
//! display character. No state survives from one line to the next.

use crate::language::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TokenClass {
    #[default]
    Text,
    Keyword,
    Number,
    String,
    Comment,
}

pub fn is_separator(c: char) -> bool {
    matches!(
        c,
        ' ' | ',' | '.' | ';' | '(' | ')' | '[' | ']' | '+' | '-' | '/' | '*' | '=' | '%'
    )
}

/// Classify every character of `text` against `language`.
///
/// The result always has exactly `text.len()` entries.
pub fn tokenize(text: &[char], language: &Language) -> Vec<TokenClass> {
    let length = text.len();
    let mut tokens = vec![TokenClass::Text; length];

    let comment: Vec<char> = language.single_line_comment.chars().collect();
    let mut inside_string = false;
    let mut after_separator = true;

    for i in 0..length {
        let c = text[i];
        let previous = if i > 0 { tokens[i - 1] } else { TokenClass::Text };

        // Only a double quote closes a string, whichever quote opened it.
        if inside_string {
            tokens[i] = TokenClass::String;
            inside_string = c != '"';
            continue;
        }

        if !comment.is_empty() && text[i..].starts_with(&comment) {
            tokens[i..].fill(TokenClass::Comment);
            break;
        }

        if c == '"' || c == '\'' {
            tokens[i] = TokenClass::String;
            inside_string = true;
            continue;
        }

        let is_digit = c.is_ascii_digit();
        let after_number = previous == TokenClass::Number;
        if (is_digit && (after_separator || after_number)) || (c == '.' && after_number) {
            tokens[i] = TokenClass::Number;
            continue;
        }

        if after_separator {
            if let Some(len) = language
                .keywords
                .iter()
                .find_map(|keyword| keyword_at(text, i, keyword))
            {
                tokens[i..i + len].fill(TokenClass::Keyword);
            }
        }

        after_separator = is_separator(c);
    }

    tokens
}

/// Length of `keyword` if it starts at `start` and is followed by a separator
/// or the end of the line.
fn keyword_at(text: &[char], start: usize, keyword: &str) -> Option<usize> {
    let len = keyword.chars().count();
    if len == 0 || start + len > text.len() {
        return None;
    }

    if !text[start..start + len].iter().copied().eq(keyword.chars()) {
        return None;
    }

    match text.get(start + len) {
        Some(&next) if !is_separator(next) => None,
        _ => Some(len),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filetype::FileType;
    use crate::language::LanguageRegistry;

    fn classes(line: &str, file_type: FileType) -> Vec<TokenClass> {
        let registry = LanguageRegistry::builtin();
        let chars: Vec<char> = line.chars().collect();
        tokenize(&chars, registry.get(file_type).unwrap())
    }

    #[test]
    fn test_length_matches_input() {
        for line in ["", "x", "int main(void) {", "\"open", "// all comment"] {
            assert_eq!(classes(line, FileType::C).len(), line.chars().count());
        }
    }

    #[test]
    fn test_number_then_comment() {
        let tokens = classes("x = 5 // done", FileType::C);
        assert!(tokens[..4].iter().all(|t| *t == TokenClass::Text));
        assert_eq!(tokens[4], TokenClass::Number);
        assert_eq!(tokens[5], TokenClass::Text);
        assert!(tokens[6..].iter().all(|t| *t == TokenClass::Comment));
    }

    #[test]
    fn test_keyword_needs_separator() {
        let tokens = classes("if (a)", FileType::C);
        assert_eq!(&tokens[..2], &[TokenClass::Keyword, TokenClass::Keyword]);
        assert_eq!(tokens[4], TokenClass::Text);

        // `iffy` starts with `if` but is not a keyword.
        let tokens = classes("iffy", FileType::C);
        assert!(tokens.iter().all(|t| *t == TokenClass::Text));
    }

    #[test]
    fn test_keyword_at_end_of_line() {
        let tokens = classes("x = NULL", FileType::C);
        assert!(tokens[4..].iter().all(|t| *t == TokenClass::Keyword));
    }

    #[test]
    fn test_unterminated_string_runs_to_end() {
        let tokens = classes("s = \"abc // not a comment", FileType::C);
        assert!(tokens[4..].iter().all(|t| *t == TokenClass::String));
    }

    #[test]
    fn test_single_quote_closed_only_by_double_quote() {
        let tokens = classes("'a' b\" c", FileType::C);
        // Everything from the opening quote through the double quote is a string.
        assert!(tokens[..6].iter().all(|t| *t == TokenClass::String));
        assert_eq!(tokens[7], TokenClass::Text);
    }

    #[test]
    fn test_decimal_number() {
        let tokens = classes("f = 12.5;", FileType::C);
        assert!(tokens[4..8].iter().all(|t| *t == TokenClass::Number));
        assert_eq!(tokens[8], TokenClass::Text);
    }

    #[test]
    fn test_digits_inside_identifier() {
        let tokens = classes("x1 = y2", FileType::C);
        assert!(tokens.iter().all(|t| *t == TokenClass::Text));
    }

    #[test]
    fn test_first_keyword_wins() {
        let language = Language::new("Test", &["int", "int64"], "//");
        let chars: Vec<char> = "int64 x".chars().collect();
        let tokens = tokenize(&chars, &language);
        // `int` is followed by `6`, so only `int64` matches here.
        assert!(tokens[..5].iter().all(|t| *t == TokenClass::Keyword));

        let language = Language::new("Test", &["for", "for"], "//");
        let chars: Vec<char> = "for x".chars().collect();
        let tokens = tokenize(&chars, &language);
        assert!(tokens[..3].iter().all(|t| *t == TokenClass::Keyword));
    }

    #[test]
    fn test_empty_comment_marker_never_matches() {
        let language = Language::new("Bare", &[], "");
        let chars: Vec<char> = "a b c".chars().collect();
        let tokens = tokenize(&chars, &language);
        assert!(tokens.iter().all(|t| *t == TokenClass::Text));
    }

    #[test]
    fn test_block_comment_not_recognised() {
        let tokens = classes("/* block */ int", FileType::C);
        assert_eq!(tokens[0], TokenClass::Text);
        assert!(tokens[12..].iter().all(|t| *t == TokenClass::Keyword));
    }

    #[test]
    fn test_separators() {
        for c in [' ', ',', '.', ';', '(', ')', '[', ']', '+', '-', '/', '*', '=', '%'] {
            assert!(is_separator(c), "{:?} should separate", c);
        }
        for c in ['a', '_', '{', '}', '"', '\t', '<'] {
            assert!(!is_separator(c), "{:?} should not separate", c);
        }
    }
}
