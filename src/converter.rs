use std::path::PathBuf;

use crate::detect::Format;
use crate::error::Result;

/// Options forwarded to the converter on every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    pub indent: u32,
    pub dasherize: bool,
    /// Emit the `:prop value` property syntax. Only honored for Sass output.
    pub old_syntax: bool,
    /// Appended to the child's `PATH` so the converter can be found.
    pub extra_path: Option<PathBuf>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            dasherize: false,
            old_syntax: false,
            extra_path: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Request {
    pub source_text: String,
    pub format: Format,
    pub options: ConvertOptions,
}

/// A successful conversion. Failures are reported as errors instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub exit_code: i32,
    pub output_text: String,
    /// Whatever the converter printed on stderr, usually deprecation warnings.
    pub error_text: String,
}

pub trait Converter {
    fn convert(&self, request: &Request) -> Result<Conversion>;
    fn program(&self) -> &str;
}

/// Rewrites `\r\n` and lone `\r` line endings to `\n`.
///
/// sass-convert ignores `--unix-newlines` on Windows.
pub fn normalize_newlines(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\r' {
            if chars.peek() == Some(&'\n') {
                chars.next();
            }
            out.push('\n');
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::unix("a\nb\n", "a\nb\n")]
    #[case::windows("a\r\nb\r\n", "a\nb\n")]
    #[case::mixed("a\r\nb\nc\r\n", "a\nb\nc\n")]
    #[case::classic_mac("a\rb\r", "a\nb\n")]
    #[case::blank_lines("a\r\n\r\n\nb", "a\n\n\nb")]
    #[case::empty("", "")]
    fn test_normalize_newlines(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_newlines(input), expected);
    }

    #[rstest]
    fn test_default_options() {
        let options = ConvertOptions::default();
        assert_eq!(options.indent, 2);
        assert!(!options.dasherize);
        assert!(!options.old_syntax);
        assert_eq!(options.extra_path, None);
    }
}
