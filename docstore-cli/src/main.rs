mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use cli::{Cli, Commands};
use error::exit_with_error;

fn init_tracing(cli: &Cli) {
    // --quiet → "off"; --verbose → RUST_LOG or "info"; default → "off" so
    // log lines never interleave with command output.
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("off")
    } else if cli.verbose {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())
    } else {
        tracing_subscriber::EnvFilter::new("off")
    };

    let ansi = !(cli.no_color || std::env::var_os("NO_COLOR").is_some());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(ansi)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    if cli.no_color || std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }

    init_tracing(&cli);
    docstore_bucket::mask::initialize();

    if let Err(e) = run(cli) {
        exit_with_error(e);
    }
}

fn run(cli: Cli) -> error::CliResult<()> {
    let config = config::load_config(cli.config.as_deref())?;
    let format = cli.format.unwrap_or(config.output.format);

    match cli.command {
        Commands::Key { hash, used_bits } => commands::inspect::run_key(
            &hash,
            used_bits.unwrap_or(config.bucket.default_used_bits),
            format,
        ),
        Commands::New {
            used_bits,
            location,
        } => commands::inspect::run_new(used_bits, &location, format),
        Commands::Show { bucket } => commands::inspect::run_show(&bucket, format),
        Commands::Contains { a, b } => commands::lineage::run_contains(&a, &b, format),
        Commands::Split { bucket } => commands::lineage::run_split(&bucket, format),
        Commands::Lineage { bucket } => commands::lineage::run_lineage(&bucket, format),
        Commands::Encode { bucket } => commands::wire::run_encode(&bucket, format),
        Commands::Decode { hex } => commands::wire::run_decode(&hex, format),
    }
}
