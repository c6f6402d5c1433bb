use std::path::Path;

use anyhow::{Context, Result};

/// Read a local feed file for the dry-run commands, returning (filename, text).
/// Bytes that are not valid UTF-8 are replaced, matching what the server does
/// with uploaded content.
pub fn read_feed(path: &Path) -> Result<(String, String)> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let filename = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("feed.csv")
        .to_string();
    Ok((filename, String::from_utf8_lossy(&bytes).into_owned()))
}

/// Human-readable separator name for reports, since a tab is invisible in
/// terminal output.
pub fn separator_label(separator: char) -> String {
    match separator {
        ',' => "comma (,)".to_string(),
        ';' => "semicolon (;)".to_string(),
        '\t' => "tab (\\t)".to_string(),
        other => other.to_string(),
    }
}

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_feed_returns_filename_and_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventory_2024-03-01.csv");
        std::fs::write(&path, "a;b\n1;2\n").unwrap();

        let (filename, text) = read_feed(&path).unwrap();
        assert_eq!(filename, "inventory_2024-03-01.csv");
        assert_eq!(text, "a;b\n1;2\n");
    }

    #[test]
    fn read_feed_missing_file_names_the_path() {
        let err = read_feed(Path::new("/nonexistent/feed.csv")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/feed.csv"));
    }

    #[test]
    fn separator_labels() {
        assert_eq!(separator_label(','), "comma (,)");
        assert_eq!(separator_label(';'), "semicolon (;)");
        assert_eq!(separator_label('\t'), "tab (\\t)");
        assert_eq!(separator_label('|'), "|");
    }

    #[test]
    fn truncate_string_short() {
        assert_eq!(truncate_string("hello", 10), "hello");
        assert_eq!(truncate_string("", 5), "");
    }

    #[test]
    fn truncate_string_exact() {
        assert_eq!(truncate_string("hello", 5), "hello");
    }

    #[test]
    fn truncate_string_long() {
        assert_eq!(truncate_string("hello world", 8), "hello...");
        assert_eq!(truncate_string("ab", 2), "ab");
        // max_len=2: 2-3=0 chars before "..."
        assert_eq!(truncate_string("abc", 2), "...");
    }

    #[test]
    fn truncate_string_very_short_max() {
        assert_eq!(truncate_string("hello", 0), "...");
        assert_eq!(truncate_string("hi", 1), "...");
    }
}
