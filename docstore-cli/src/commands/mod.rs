pub mod inspect;
pub mod lineage;
pub mod wire;

use crate::error::{CliError, CliResult};
use docstore_bucket::BucketId;

/// Parse a `u64` given as `0x`-prefixed hex or decimal.
pub fn parse_u64(input: &str) -> CliResult<u64> {
    let s = input.trim().replace('_', "");
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => s.parse::<u64>(),
    };
    parsed.map_err(|e| CliError::Input(format!("invalid number '{input}': {e}")))
}

/// Parse a raw bucket id, validated like a wire field.
pub fn parse_bucket(input: &str) -> CliResult<BucketId> {
    Ok(BucketId::from_raw(parse_u64(input)?)?)
}
