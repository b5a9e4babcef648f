//! enumsync — generate TypeScript enums from enum declarations in other
//! languages' source files.
//!
//! Two modes:
//!
//! - **config mode** (default): `enumsync -c enumsync.toml` runs every job in
//!   the configuration and writes one file per enum, plus `index.ts`.
//! - **stdin mode**: `enumsync --stdin --name Color < Color.java` prints one
//!   generated file to stdout.

use anyhow::{Context, Result};
use clap::Parser;
use enumsync::config::Config;
use enumsync::generate::{self, BatchOptions};
use enumsync::job::ParseJob;
use enumsync::matcher::{Builtin, PatternExtractor, PatternMatcher};
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "enumsync",
    about = "Generate TypeScript enums from enum declarations in other languages"
)]
struct Cli {
    /// Configuration file
    #[arg(short = 'c', long, default_value = "enumsync.toml")]
    config: PathBuf,

    /// Output directory, overriding `output` from the configuration
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Do not write the index file even when configured
    #[arg(long)]
    no_index: bool,

    /// Read one source file from stdin and print the generated enum
    #[arg(long)]
    stdin: bool,

    /// Enum name (stdin mode)
    #[arg(long, required_if_eq("stdin", "true"))]
    name: Option<String>,

    /// Built-in line matcher (stdin mode)
    #[arg(short = 'm', long, default_value = "name-with-quoted-comment")]
    matcher: String,

    /// Regex with (?P<name>...) and optional value/comment/extra groups,
    /// used instead of --matcher (stdin mode)
    #[arg(long)]
    pattern: Option<String>,

    /// Description enum name (stdin mode)
    #[arg(long)]
    description_name: Option<String>,

    /// Regex whose first group extracts a description from the `extra`
    /// capture (stdin mode)
    #[arg(long)]
    description_pattern: Option<String>,

    /// Leading doc comment (stdin mode)
    #[arg(long)]
    comment: Option<String>,

    /// Reject duplicate member names
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    if cli.stdin {
        return stdin_mode(&cli);
    }

    config_mode(&cli)
}

/// Logging is off unless `ENUMSYNC_LOG` or `RUST_LOG` is set. Output goes to
/// stderr so stdin mode's stdout stays clean.
fn init_tracing() {
    let filter = match std::env::var("ENUMSYNC_LOG") {
        Ok(val) => EnvFilter::builder().parse_lossy(val),
        Err(_) if std::env::var("RUST_LOG").is_ok() => EnvFilter::from_default_env(),
        Err(_) => return,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// stdin mode: one source file in, one generated file out.
fn stdin_mode(cli: &Cli) -> Result<()> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;

    let name = cli.name.as_deref().context("--name is required with --stdin")?;
    let mut job = match &cli.pattern {
        Some(pattern) => ParseJob::new("<stdin>", "-", name, PatternMatcher::new(pattern)?),
        None => {
            let builtin: Builtin = cli.matcher.parse()?;
            ParseJob::new("<stdin>", "-", name, builtin)
        }
    };
    job.description_enum_name = cli.description_name.clone();
    job.leading_comment = cli.comment.clone();
    if let Some(pattern) = &cli.description_pattern {
        job = job.with_extractor(PatternExtractor::new(pattern)?);
    }

    let options = BatchOptions {
        strict: cli.strict,
        ..BatchOptions::default()
    };
    print!("{}", generate::render_job(&job, &input, &options)?);
    Ok(())
}

/// config mode: run every configured job, then the index.
fn config_mode(cli: &Cli) -> Result<()> {
    let config = Config::load(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    let jobs = config.jobs()?;
    let mut options = config.batch_options()?;
    options.strict |= cli.strict;
    let output_dir = cli.output.clone().unwrap_or_else(|| config.output.clone());

    if jobs.is_empty() {
        eprintln!("warning: no jobs in {}", cli.config.display());
    }

    let report = |status: &enumsync::status::Status| println!("{}", status);
    generate::generate(&jobs, &output_dir, &options, report)?;

    if config.index && !cli.no_index {
        generate::generate_index(
            &jobs,
            config.extra_enums.as_slice(),
            &output_dir,
            &options.extension,
            report,
        )?;
    }

    Ok(())
}
