use super::parse_bucket;
use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::output;
use docstore_bucket::wire::{self, WIRE_SIZE};

/// `docstore encode <BUCKET>`
pub fn run_encode(bucket: &str, format: OutputFormat) -> CliResult<()> {
    let bytes = wire::encode(parse_bucket(bucket)?);
    output::print_value(&to_hex(&bytes), format)
}

/// `docstore decode <HEX>`
pub fn run_decode(input: &str, format: OutputFormat) -> CliResult<()> {
    let id = wire::decode(from_hex(input)?)?;
    output::print_bucket(id, format)
}

fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

fn from_hex(input: &str) -> CliResult<[u8; WIRE_SIZE]> {
    let s = input.trim();
    let bytes = hex::decode(s).map_err(|e| CliError::Input(format!("invalid hex '{s}': {e}")))?;
    let have = bytes.len();
    bytes.try_into().map_err(|_| {
        CliError::Input(format!(
            "wire form must be {} bytes ({} hex digits), got {have} bytes",
            WIRE_SIZE,
            WIRE_SIZE * 2
        ))
    })
}
