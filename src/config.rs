use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::converter::ConvertOptions;
use crate::error::{Error, Result};
use crate::process::SassConvert;

/// Looked up in the working directory when no config file is given.
pub const DEFAULT_FILE_NAME: &str = ".sass-beautify.toml";

/// Settings read from a TOML file such as:
///
/// ```toml
/// indent = 4
/// dasherize = true
/// old = false
/// path = "/usr/local/opt/ruby/bin"
/// command = ["bundle", "exec", "sass-convert"]
/// timeout = 30
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub indent: u32,
    pub dasherize: bool,
    #[serde(alias = "old_syntax")]
    pub old: bool,
    pub path: Option<PathBuf>,
    pub command: Vec<String>,
    /// Seconds before the converter is killed. Unlimited when unset.
    pub timeout: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        let options = ConvertOptions::default();
        Self {
            indent: options.indent,
            dasherize: options.dasherize,
            old: options.old_syntax,
            path: options.extra_path,
            command: vec!["sass-convert".to_string()],
            timeout: None,
        }
    }
}

impl Settings {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Loads `explicit` if given, else [`DEFAULT_FILE_NAME`] from `dir` if it
    /// exists, else the defaults.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidate = dir.join(DEFAULT_FILE_NAME);
        if candidate.is_file() {
            tracing::debug!(path = %candidate.display(), "using config file");
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    pub fn options(&self) -> ConvertOptions {
        ConvertOptions {
            indent: self.indent,
            dasherize: self.dasherize,
            old_syntax: self.old,
            // An empty string in the file means "not set".
            extra_path: self
                .path
                .clone()
                .filter(|p| !p.as_os_str().is_empty()),
        }
    }

    pub fn converter(&self) -> Result<SassConvert> {
        Ok(SassConvert::new(self.command.clone())?
            .with_timeout(self.timeout.map(Duration::from_secs)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::Converter;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_empty_file_is_defaults() {
        assert_eq!(Settings::from_toml_str("").unwrap(), Settings::default());
    }

    #[rstest]
    fn test_full_file() {
        let settings = Settings::from_toml_str(
            r#"
indent = 4
dasherize = true
old = true
path = "/usr/local/opt/ruby/bin"
command = ["bundle", "exec", "sass-convert"]
timeout = 30
"#,
        )
        .unwrap();

        assert_eq!(
            settings.options(),
            ConvertOptions {
                indent: 4,
                dasherize: true,
                old_syntax: true,
                extra_path: Some(PathBuf::from("/usr/local/opt/ruby/bin")),
            }
        );
        assert_eq!(settings.command, vec!["bundle", "exec", "sass-convert"]);
        assert_eq!(settings.timeout, Some(30));
        assert_eq!(settings.converter().unwrap().program(), "bundle");
    }

    #[rstest]
    #[case::old("old = true")]
    #[case::old_syntax("old_syntax = true")]
    fn test_old_alias(#[case] input: &str) {
        assert!(Settings::from_toml_str(input).unwrap().options().old_syntax);
    }

    #[rstest]
    fn test_empty_path_is_unset() {
        let settings = Settings::from_toml_str(r#"path = """#).unwrap();
        assert_eq!(settings.options().extra_path, None);
    }

    #[rstest]
    #[case::unknown_key("colour = true")]
    #[case::wrong_type("indent = \"four\"")]
    #[case::negative_indent("indent = -2")]
    fn test_invalid(#[case] input: &str) {
        assert!(matches!(
            Settings::from_toml_str(input),
            Err(Error::Config(_))
        ));
    }

    #[rstest]
    fn test_empty_command() {
        let settings = Settings::from_toml_str("command = []").unwrap();
        assert!(matches!(settings.converter(), Err(Error::Config(_))));
    }

    #[rstest]
    fn test_discover() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            Settings::discover(None, dir.path()).unwrap(),
            Settings::default()
        );

        std::fs::write(dir.path().join(DEFAULT_FILE_NAME), "indent = 8").unwrap();
        assert_eq!(Settings::discover(None, dir.path()).unwrap().indent, 8);

        let explicit = dir.path().join("other.toml");
        std::fs::write(&explicit, "indent = 3").unwrap();
        assert_eq!(
            Settings::discover(Some(&explicit), dir.path()).unwrap().indent,
            3
        );
    }

    #[rstest]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            Settings::discover(Some(&missing), dir.path()),
            Err(Error::Config(_))
        ));
    }
}
