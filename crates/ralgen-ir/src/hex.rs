//! Hexadecimal cell normalization and SystemVerilog literal rendering.
//!
//! Addresses, offsets and reset values arrive as hexadecimal-formatted
//! cells (`0x` prefix optional), are normalized to `u64` internally, and
//! are re-rendered as `'h…` literals on output.

use crate::error::IrError;

/// Parse a hexadecimal cell value into an unsigned integer.
pub fn parse_hex(text: &str) -> Result<u64, IrError> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    if digits.is_empty() {
        return Err(IrError::MalformedHex {
            text: text.to_string(),
        });
    }
    u64::from_str_radix(digits, 16).map_err(|_| IrError::MalformedHex {
        text: text.to_string(),
    })
}

/// Render a value as a SystemVerilog hexadecimal literal.
pub fn sv_hex(value: u64) -> String {
    format!("'h{value:x}")
}
