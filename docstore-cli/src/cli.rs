use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docstore", about = "Docstore bucket id inspector", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output (also respects NO_COLOR env var)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (overrides the config file)
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Map a document location hash to its bucket
    Key {
        /// Location hash (0x-prefixed hex or decimal)
        hash: String,

        /// Precision to embed; defaults to [bucket].default_used_bits
        #[arg(long, short = 'u')]
        used_bits: Option<u32>,
    },

    /// Build a bucket from a precision and a raw location word
    New {
        /// Number of significant location bits
        used_bits: u32,

        /// Raw location word (0x-prefixed hex or decimal)
        location: String,
    },

    /// Show the fields of a bucket id
    Show {
        /// Raw bucket id (0x-prefixed hex or decimal)
        bucket: String,
    },

    /// Test whether bucket A contains bucket B
    Contains {
        /// Candidate ancestor
        a: String,

        /// Candidate descendant
        b: String,
    },

    /// Show both children of a split
    Split {
        /// Raw bucket id
        bucket: String,
    },

    /// List a bucket and its ancestors up to the root
    Lineage {
        /// Raw bucket id
        bucket: String,
    },

    /// Encode a bucket id in its 8-byte wire form (hex)
    Encode {
        /// Raw bucket id
        bucket: String,
    },

    /// Decode a bucket id from its 8-byte wire form (hex)
    Decode {
        /// 16 hex digits, native byte order
        hex: String,
    },
}
