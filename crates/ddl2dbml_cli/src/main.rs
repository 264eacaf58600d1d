//! Command-line front end: read SQL, validate it, parse it, and render DBML
//! (or a JSON dump of the schema model).

mod cli;
mod io;
mod validate;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, warn};

use ddl2dbml_parser::parse_document;

fn main() {
    let args = cli::Cli::parse();
    setup_logging(args.verbose);
    if let Err(err) = run(&args) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(args: &cli::Cli) -> anyhow::Result<()> {
    let sql = match &args.input {
        Some(path) => {
            debug!(path = %path.display(), "reading input file");
            io::read_file(path)?
        }
        None => {
            debug!("reading from stdin");
            io::read_stdin()?
        }
    };

    validate::check_sql_input(&sql, args.max_input_mb * 1024 * 1024)?;

    let (mut schema, errors) = parse_document(&sql);
    if !errors.is_empty() {
        for err in &errors {
            warn!(%err, "skipped statement");
        }
        let total = schema.tables.len() + errors.len();
        eprintln!("parsed {} of {total} CREATE TABLE statements", schema.tables.len());
    }
    schema.name = args.project.clone();

    let mut output = if args.json {
        serde_json::to_string_pretty(&schema).context("serializing schema")?
    } else {
        ddl2dbml_dbml::generate(&schema)
    };
    if !output.ends_with('\n') {
        output.push('\n');
    }

    match &args.output {
        Some(path) => {
            io::write_file(path, &output)?;
            debug!(path = %path.display(), "wrote output file");
        }
        None => io::write_stdout(&output)?,
    }
    Ok(())
}

/// Initializes tracing to stderr. RUST_LOG overrides the default level, which
/// is debug with --verbose and info otherwise.
fn setup_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
