use std::path::PathBuf;

use clap::Parser;

/// Convert MySQL CREATE TABLE statements to DBML.
///
/// Reads from stdin when no input file is given and writes to stdout when no
/// output file is given, so it composes in a pipeline.
#[derive(Parser)]
#[command(name = "ddl2dbml", version)]
pub struct Cli {
    /// Input SQL file containing CREATE TABLE statements (defaults to stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output DBML file path (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Name the schema, emitting a DBML Project block
    #[arg(long)]
    pub project: Option<String>,

    /// Emit the parsed schema as JSON instead of DBML
    #[arg(long)]
    pub json: bool,

    /// Maximum input size in MiB
    #[arg(long, default_value_t = 10)]
    pub max_input_mb: usize,

    /// Enable verbose (debug-level) logging
    #[arg(short, long)]
    pub verbose: bool,
}
