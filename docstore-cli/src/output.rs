use crate::cli::OutputFormat;
use crate::error::CliResult;
use docstore_bucket::BucketId;
use serde::Serialize;

/// Field breakdown of one bucket id.
#[derive(Debug, Clone, Serialize)]
pub struct BucketReport {
    pub bucket: String,
    pub raw: String,
    pub used_bits: u32,
    pub location: String,
    pub key: String,
    pub mix_hash: String,
}

impl From<BucketId> for BucketReport {
    fn from(id: BucketId) -> Self {
        Self {
            bucket: id.to_string(),
            raw: hex64(id.raw()),
            used_bits: id.used_bits(),
            location: hex64(id.location()),
            key: hex64(id.to_key()),
            mix_hash: hex64(id.mix_hash()),
        }
    }
}

pub fn hex64(v: u64) -> String {
    format!("0x{v:016x}")
}

/// Print a single bucket in the chosen format.
pub fn print_bucket(id: BucketId, format: OutputFormat) -> CliResult<()> {
    let report = BucketReport::from(id);
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => {
            println!("Bucket:    {}", report.bucket);
            println!("Used bits: {}", report.used_bits);
            println!("Location:  {}", report.location);
            println!("Key:       {}", report.key);
            println!("Mix hash:  {}", report.mix_hash);
        }
    }
    Ok(())
}

/// Print a list of buckets, one per line in text mode.
pub fn print_bucket_list(ids: &[BucketId], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => {
            let reports: Vec<BucketReport> = ids.iter().copied().map(BucketReport::from).collect();
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        OutputFormat::Text => {
            for id in ids {
                println!("{id}  used_bits={}", id.used_bits());
            }
        }
    }
    Ok(())
}

/// Print a boolean answer.
pub fn print_bool(value: bool, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&value)?),
        OutputFormat::Text => println!("{value}"),
    }
    Ok(())
}

/// Print a bare string value.
pub fn print_value(value: &str, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(value)?),
        OutputFormat::Text => println!("{value}"),
    }
    Ok(())
}
