use crate::buffer::Buffer;
use crate::converter::{ConvertOptions, Converter, Request};
use crate::detect::Format;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub format: Format,
    /// Whether the converter changed the text at all.
    pub changed: bool,
}

/// Runs `buffer` through `converter` and, only if that succeeds, replaces and
/// saves its contents.
///
/// The syntax comes from the buffer's file extension unless `forced` is
/// given. On any error the buffer is left as it was.
pub fn beautify(
    buffer: &mut dyn Buffer,
    converter: &dyn Converter,
    options: &ConvertOptions,
    forced: Option<Format>,
) -> Result<Outcome> {
    let format = match forced {
        Some(format) => format,
        None => Format::from_path(buffer.file_path())?,
    };

    let request = Request {
        source_text: buffer.text().to_string(),
        format,
        options: options.clone(),
    };

    let conversion = converter.convert(&request)?;
    let changed = conversion.output_text != request.source_text;

    buffer.replace_and_persist(conversion.output_text)?;

    match buffer.file_path() {
        Some(path) => tracing::info!("Successfully beautified {}", path.display()),
        None => tracing::info!("Successfully beautified <stdin>"),
    }

    Ok(Outcome { format, changed })
}
