use super::{parse_bucket, parse_u64};
use crate::cli::OutputFormat;
use crate::error::CliResult;
use crate::output;
use docstore_bucket::{location_key, BucketId};

/// `docstore key <HASH> [--used-bits N]`
pub fn run_key(hash: &str, used_bits: u32, format: OutputFormat) -> CliResult<()> {
    let hash = parse_u64(hash)?;
    let key = location_key(hash, used_bits)?;
    let id = BucketId::from_key(key)?;
    tracing::info!(hash = %output::hex64(hash), used_bits, bucket = %id, "mapped location hash");
    output::print_bucket(id, format)
}

/// `docstore new <USED_BITS> <LOCATION>`
pub fn run_new(used_bits: u32, location: &str, format: OutputFormat) -> CliResult<()> {
    let id = BucketId::new(used_bits, parse_u64(location)?)?;
    output::print_bucket(id, format)
}

/// `docstore show <BUCKET>`
pub fn run_show(bucket: &str, format: OutputFormat) -> CliResult<()> {
    output::print_bucket(parse_bucket(bucket)?, format)
}
