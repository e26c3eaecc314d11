//! File reading and text encodings for the CLI.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use base64::{engine::general_purpose, Engine as _};

/// Column width of base64 output.
pub const BASE64_LINE_WIDTH: usize = 60;

/// Decodes base64 text, ignoring line breaks.
pub fn decode_base64(text: &str) -> Result<Vec<u8>> {
    let cleaned: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
    general_purpose::STANDARD
        .decode(cleaned.trim())
        .context("decode base64")
}

/// Reads a base64 file into raw bytes.
pub fn read_base64_file(path: &Path) -> Result<Vec<u8>> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    decode_base64(&text).with_context(|| format!("parse {}", path.display()))
}

/// Encodes bytes as base64 wrapped at [`BASE64_LINE_WIDTH`] columns, with a
/// trailing newline.
pub fn encode_base64_wrapped(data: &[u8]) -> String {
    let encoded = general_purpose::STANDARD.encode(data);
    let mut out = String::with_capacity(encoded.len() + encoded.len() / BASE64_LINE_WIDTH + 1);
    // Base64 output is ASCII, so byte chunks are valid char boundaries.
    for line in encoded.as_bytes().chunks(BASE64_LINE_WIDTH) {
        out.extend(line.iter().map(|&b| b as char));
        out.push('\n');
    }
    out
}

/// Reads a file of hex strings, one per line, skipping blank lines.
///
/// Returns each decoded line with its 1-based line number.
pub fn read_hex_lines(path: &Path) -> Result<Vec<(usize, Vec<u8>)>> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            let bytes = hex::decode(line.trim())
                .with_context(|| format!("{}:{}: decode hex", path.display(), idx + 1))?;
            Ok((idx + 1, bytes))
        })
        .collect()
}
