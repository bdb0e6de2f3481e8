use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use sass_beautify::buffer::{FileBuffer, StdinBuffer};
use sass_beautify::config::Settings;
use sass_beautify::detect::Format;

#[derive(Parser, Debug)]
#[command(name = "sass-beautify")]
#[command(version, about = "Beautify Sass and SCSS stylesheets with sass-convert")]
struct Args {
    /// Stylesheets to beautify in place (reads stdin, writes stdout if not provided)
    files: Vec<PathBuf>,

    /// Treat input as this syntax instead of going by the file extension
    #[arg(short, long)]
    format: Option<FormatArg>,

    /// Settings file (defaults to .sass-beautify.toml in the working directory)
    #[arg(short, long, env = "SASS_BEAUTIFY_CONFIG")]
    config: Option<PathBuf>,

    /// Spaces per indentation level
    #[arg(long)]
    indent: Option<u32>,

    /// Convert underscores to dashes in identifiers
    #[arg(long, overrides_with = "no_dasherize")]
    dasherize: bool,

    /// Keep underscores, even if the settings file enables --dasherize
    #[arg(long, overrides_with = "dasherize")]
    no_dasherize: bool,

    /// Emit the old-style ":prop value" property syntax (Sass only)
    #[arg(long, overrides_with = "no_old")]
    old: bool,

    /// Emit "prop: value", even if the settings file enables --old
    #[arg(long, overrides_with = "old")]
    no_old: bool,

    /// Directory appended to PATH when looking for the converter
    #[arg(long)]
    path: Option<PathBuf>,

    /// Converter command, repeat for leading arguments (e.g. --command bundle --command exec --command sass-convert)
    #[arg(long = "command", value_name = "ARG")]
    command: Vec<String>,

    /// Kill the converter after this many seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Show more log output (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum FormatArg {
    Sass,
    Scss,
}

impl From<FormatArg> for Format {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Sass => Format::Sass,
            FormatArg::Scss => Format::Scss,
        }
    }
}

impl Args {
    fn settings(&self) -> miette::Result<Settings> {
        let cwd = std::env::current_dir().into_diagnostic()?;
        let mut settings = Settings::discover(self.config.as_deref(), &cwd)
            .map_err(|e| miette::miette!("{e}"))?;
        self.apply(&mut settings);
        Ok(settings)
    }

    /// Flags given on the command line win over the settings file.
    fn apply(&self, settings: &mut Settings) {
        if let Some(indent) = self.indent {
            settings.indent = indent;
        }
        if let Some(dasherize) = toggle(self.dasherize, self.no_dasherize) {
            settings.dasherize = dasherize;
        }
        if let Some(old) = toggle(self.old, self.no_old) {
            settings.old = old;
        }
        if let Some(path) = &self.path {
            settings.path = Some(path.clone());
        }
        if !self.command.is_empty() {
            settings.command = self.command.clone();
        }
        if self.timeout.is_some() {
            settings.timeout = self.timeout;
        }
    }
}

fn toggle(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "sass_beautify=info",
        1 => "sass_beautify=debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

fn main() -> miette::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let settings = args.settings()?;
    let options = settings.options();
    let converter = settings.converter().map_err(|e| miette::miette!("{e}"))?;
    let forced = args.format.map(Format::from);

    if args.files.is_empty() {
        // stdin mode
        if io::stdin().is_terminal() {
            return Err(miette::miette!(
                "No input file specified and stdin is a terminal.\nUsage: sass-beautify <FILE>... or pipe data to stdin with --format"
            ));
        }

        let mut buffer = StdinBuffer::read(io::stdin().lock(), io::stdout().lock())
            .map_err(|e| miette::miette!("{e}"))?;
        sass_beautify::beautify(&mut buffer, &converter, &options, forced)
            .map_err(|e| miette::miette!("{e}"))?;
    } else {
        for path in &args.files {
            let mut buffer = FileBuffer::open(path)
                .map_err(|e| miette::miette!("{e}\n\nFile: {}", path.display()))?;
            let outcome = sass_beautify::beautify(&mut buffer, &converter, &options, forced)
                .map_err(|e| miette::miette!("{e}\n\nFile: {}", path.display()))?;
            if !outcome.changed {
                tracing::debug!(path = %path.display(), "already beautified");
            }
        }
    }

    Ok(())
}
