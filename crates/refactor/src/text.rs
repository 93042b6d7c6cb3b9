//! Line model shared by the analyzer and the rewriters
//!
//! Sources are handled as Latin-1: every byte maps to exactly one `char`, so
//! decoding and re-encoding an untouched file gives back the same bytes.
//! Lines keep their terminators and are split at the first comment marker,
//! the comment part being carried through verbatim.

use hdlrefactor_core::error::{Error, Result, ResultExt};
use std::path::Path;

/// End-of-line comment marker of VHDL sources
pub const HDL_COMMENT: &str = "--";

/// End-of-line comment marker of simulator configuration scripts
pub const SCRIPT_COMMENT: &str = "#";

pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// Encode text with one byte per character
///
/// Fails when a character lies outside Latin-1, which can only happen when a
/// rename introduced it.
pub fn encode_latin1(text: &str, file: &Path) -> Result<Vec<u8>> {
    text.chars()
        .map(|c| {
            u8::try_from(c).map_err(|_| {
                Error::encoding(
                    file.display().to_string(),
                    format!("character {c:?} cannot be written as a single byte"),
                )
            })
        })
        .collect()
}

/// Read a whole source file
pub fn read_source(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).context(format!("Failed to read {}", path.display()))?;
    Ok(decode_latin1(&bytes))
}

/// Write a whole source file, replacing its previous content
pub fn write_source(path: &Path, text: &str) -> Result<()> {
    let bytes = encode_latin1(text, path)?;
    std::fs::write(path, bytes).context(format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Split text into lines, each keeping its terminator
pub fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.split_inclusive('\n')
}

/// Split a line into its code and its comment at the first `marker`
///
/// The comment part starts with the marker itself and includes the line
/// terminator, so `code + comment == line`.
pub fn split_comment<'a>(line: &'a str, marker: &str) -> (&'a str, &'a str) {
    match line.find(marker) {
        Some(index) => line.split_at(index),
        None => (line, ""),
    }
}
