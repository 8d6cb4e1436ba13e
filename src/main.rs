use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};

use datatable_ssp::infra::config::{default_db_path, load_table};
use datatable_ssp::infra::import::csv::import_csv;
use datatable_ssp::{DataTableService, RawParams, SqliteDataSource, XssSanitizer};

/// CLI entry point wrapper.
#[derive(Parser, Debug)]
#[command(name = "datatable-ssp")]
struct Args {
    /// SQLite database; defaults to the per-user data directory.
    #[arg(long, global = true, env = "DATATABLE_DB")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a CSV file into a new table.
    Import(ImportArgs),
    /// Answer one table request and print the JSON response.
    Query(QueryArgs),
}

#[derive(Parser, Debug)]
struct ImportArgs {
    #[arg(long)]
    table: String,

    csv: PathBuf,
}

#[derive(Parser, Debug)]
struct QueryArgs {
    /// JSON table configuration.
    #[arg(long)]
    config: PathBuf,

    /// Request parameter as `key=value`, e.g. `search[value]=ann`.
    #[arg(short = 'p', long = "param", value_parser = parse_param)]
    params: Vec<(String, String)>,
}

fn parse_param(text: &str) -> Result<(String, String)> {
    let (key, value) = text
        .split_once('=')
        .ok_or_else(|| anyhow!("expected key=value, got {text:?}"))?;
    Ok((key.to_string(), value.to_string()))
}

fn main() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let args = Args::parse();
    let db_path = match args.db {
        Some(path) => path,
        None => default_db_path()?,
    };

    match args.cmd {
        Command::Import(import) => {
            import_csv(&db_path, &import.table, &import.csv)?;
        }
        Command::Query(query) => {
            let table = load_table(&query.config)
                .with_context(|| format!("invalid table config: {}", query.config.display()))?;
            let service = DataTableService::new(
                Arc::new(SqliteDataSource::new(db_path)),
                Arc::new(XssSanitizer),
            );
            let raw: RawParams = query.params.into_iter().collect();
            let body = service.respond_json(&table, &raw)?;
            println!("{body}");
        }
    }

    Ok(())
}
