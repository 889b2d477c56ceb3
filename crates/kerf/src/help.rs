pub const PROGRAM_NAME: &str = "Kerf";
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Name of the read-only help buffer.
pub const HELP_BUFFER_NAME: &str = "Help.txt";

pub fn help_lines() -> Vec<String> {
    let mut lines = vec![format!("{} {}", PROGRAM_NAME, VERSION), String::new()];
    lines.extend(
        [
            "1.  Usage",
            "",
            "    $ kerf <files>",
            "",
            "    Each file opens in its own buffer. Files that do not exist yet open",
            "    empty and are created on the first save.",
            "",
            "2.  Shortcuts",
            "",
            "      - Ctrl+R: Open buffer",
            "      - Ctrl+O: Save buffer",
            "      - Ctrl+W: Close buffer (the editor exits after the last one)",
            "      - Ctrl+P: Next buffer",
            "      - Ctrl+L: Previous buffer",
            "      - Ctrl+A: Toggle between indentation and line start",
            "      - Ctrl+E: Line end",
            "      - Ctrl+H: Show help",
            "",
            "    In a prompt, Enter answers and Esc or Ctrl+C cancels.",
            "",
            "3.  Configuration",
            "",
            "    Preferences live in 'config.json' in the kerf config directory, or in",
            "    the file named by KERF_CONFIG_PATH. The file is created with defaults",
            "    the first time kerf starts.",
        ]
        .iter()
        .map(|s| s.to_string()),
    );
    lines
}
