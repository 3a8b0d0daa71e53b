use super::parse_bucket;
use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::output;
use docstore_bucket::{BucketId, MAX_USED_BITS};

/// `docstore contains <A> <B>`
pub fn run_contains(a: &str, b: &str, format: OutputFormat) -> CliResult<()> {
    let a = parse_bucket(a)?;
    let b = parse_bucket(b)?;
    output::print_bool(a.contains(b), format)
}

/// `docstore split <BUCKET>`
pub fn run_split(bucket: &str, format: OutputFormat) -> CliResult<()> {
    let id = parse_bucket(bucket)?;
    let (zero, one) = id.children().ok_or_else(|| {
        CliError::Usage(format!(
            "{id} is already at the maximum depth of {MAX_USED_BITS} bits"
        ))
    })?;
    output::print_bucket_list(&[zero, one], format)
}

/// `docstore lineage <BUCKET>`
pub fn run_lineage(bucket: &str, format: OutputFormat) -> CliResult<()> {
    let chain: Vec<BucketId> = parse_bucket(bucket)?.ancestors().collect();
    output::print_bucket_list(&chain, format)
}
