//! Reading command inputs from files or stdin.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

/// Read a file, or stdin when `path` is `-`.
pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))
    }
}

/// Accept a raw hex argument directly, or `-` to read it from stdin.
pub fn read_hex_arg(arg: &str) -> Result<String> {
    let value = if arg == "-" {
        read_input(Path::new("-"))?
    } else {
        arg.to_string()
    };
    Ok(value.trim().to_string())
}

/// Decode an optionally `0x`-prefixed hex argument.
pub fn decode_hex(arg: &str) -> Result<Vec<u8>> {
    let digits = arg.strip_prefix("0x").unwrap_or(arg);
    hex::decode(digits).with_context(|| format!("Invalid hex string '{}'", arg))
}
