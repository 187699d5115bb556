//! Text input for the CLI: integer lists, hex byte strings, and config tables.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::Context;
use bdi_core::ConfigTable;

/// Parse a decimal or `0x`-prefixed hexadecimal unsigned integer.
pub fn parse_int(text: &str) -> anyhow::Result<u64> {
    let text = text.trim();
    let (digits, radix) = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => (hex, 16),
        None => (text, 10),
    };
    // `from_str_radix` tolerates a leading '+'.
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        anyhow::bail!("'{}' is not an unsigned integer", text);
    }
    u64::from_str_radix(digits, radix).with_context(|| format!("'{}' is not an unsigned integer", text))
}

/// One integer per line; blank lines are skipped.
pub fn parse_values(text: &str) -> anyhow::Result<Vec<u64>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| parse_int(line).with_context(|| format!("line {}", i + 1)))
        .collect()
}

/// Read integers from `path`, or from stdin when `path` is "-".
pub fn read_values(path: &Path) -> anyhow::Result<Vec<u64>> {
    let text = if path.to_str() == Some("-") {
        let mut buf = String::new();
        io::stdin().lock().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("reading input file {:?}", path))?
    };
    let values = parse_values(&text).with_context(|| format!("parsing {:?}", path))?;
    if values.is_empty() {
        anyhow::bail!("{:?} contains no values", path);
    }
    Ok(values)
}

/// Decode a hex string such as "c04039c0000838". Whitespace and a leading
/// `0x` are ignored.
pub fn parse_hex(text: &str) -> anyhow::Result<Vec<u8>> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = compact.strip_prefix("0x").unwrap_or(&compact);
    hex::decode(digits).with_context(|| format!("'{}' is not a hex byte string", text.trim()))
}

pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// The standard table, or one read from a JSON file.
pub fn load_table(path: Option<&Path>) -> anyhow::Result<ConfigTable> {
    let Some(path) = path else {
        return Ok(ConfigTable::standard());
    };
    let text = fs::read_to_string(path).with_context(|| format!("reading config table {:?}", path))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config table {:?}", path))
}
