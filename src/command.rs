use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::converter::ConvertOptions;
use crate::detect::Format;
use crate::error::{Error, Result};

/// Arguments asking sass-convert to rewrite `format` into itself from stdin.
pub fn arguments(format: Format, options: &ConvertOptions) -> Vec<String> {
    let mut args = vec![
        "--unix-newlines".to_string(),
        "--stdin".to_string(),
        "--indent".to_string(),
        options.indent.to_string(),
        "--from".to_string(),
        format.to_string(),
        "--to".to_string(),
        format.to_string(),
    ];

    if options.dasherize {
        args.push("--dasherize".to_string());
    }

    if options.old_syntax && format == Format::Sass {
        args.push("--old".to_string());
    }

    args
}

/// Splits a configured command into the program to spawn and its leading
/// arguments.
///
/// On Windows the converter is usually a `.bat` shim, which only resolves
/// through the shell.
pub fn program_and_args(command: &[String]) -> Result<(String, Vec<String>)> {
    let (program, rest) = command
        .split_first()
        .ok_or_else(|| Error::Config("command must name a program".to_string()))?;

    if cfg!(windows) {
        let mut args = vec!["/C".to_string(), program.clone()];
        args.extend(rest.iter().cloned());
        Ok(("cmd".to_string(), args))
    } else {
        Ok((program.clone(), rest.to_vec()))
    }
}

/// `base` with `extra` appended as the last entry, joined with the
/// platform's path-list separator.
pub fn search_path(base: Option<OsString>, extra: &Path) -> Result<OsString> {
    let mut paths: Vec<PathBuf> = base
        .as_deref()
        .map(|base| std::env::split_paths(base).collect())
        .unwrap_or_default();
    paths.push(extra.to_path_buf());
    Ok(std::env::join_paths(paths)?)
}
