use std::path::Path;
use std::str::FromStr;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Sass,
    Scss,
}

impl Format {
    /// Infers the syntax from a document's file path.
    ///
    /// A document without a path has not been saved yet, so there is nothing
    /// to infer from.
    pub fn from_path(path: Option<&Path>) -> Result<Self> {
        let path = path.ok_or(Error::NoFileAssociation)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        ext.parse()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sass => "sass",
            Self::Scss => "scss",
        }
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sass" => Ok(Self::Sass),
            "scss" => Ok(Self::Scss),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::sass("style.sass", Format::Sass)]
    #[case::scss("style.scss", Format::Scss)]
    #[case::uppercase("STYLE.SCSS", Format::Scss)]
    #[case::nested("assets/css/_partial.sass", Format::Sass)]
    fn test_from_path(#[case] path: &str, #[case] expected: Format) {
        assert_eq!(Format::from_path(Some(Path::new(path))).unwrap(), expected);
    }

    #[rstest]
    #[case::css("style.css", "css")]
    #[case::no_extension("Makefile", "")]
    #[case::less("theme.less", "less")]
    fn test_unsupported(#[case] path: &str, #[case] ext: &str) {
        match Format::from_path(Some(Path::new(path))) {
            Err(Error::UnsupportedFormat(found)) => assert_eq!(found, ext),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }

    #[rstest]
    fn test_no_path() {
        assert!(matches!(
            Format::from_path(None),
            Err(Error::NoFileAssociation)
        ));
    }

    #[rstest]
    fn test_display_round_trips_through_parse() {
        assert_eq!("sass".parse::<Format>().unwrap(), Format::Sass);
        assert_eq!(Format::Scss.to_string(), "scss");
    }
}
