use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use maro_db_core::{Database, DdlConfig, IdentifierCase, TableDefinition};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Interactive shell for registering table definitions in a catalog file.
#[derive(Debug, Parser)]
#[command(name = "maro_db_cli", version)]
struct Args {
    /// Catalog snapshot to load on start and write on `save`.
    #[arg(long, default_value = "./catalog.json")]
    catalog: PathBuf,

    /// JSON file with DDL options.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Fold table and column names to lowercase.
    #[arg(long)]
    case_insensitive: bool,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => DdlConfig::load(path)?,
        None => DdlConfig::default(),
    };
    if args.case_insensitive {
        config.identifier_case = IdentifierCase::Insensitive;
    }

    let db = Database::open(&args.catalog, config)
        .with_context(|| format!("opening catalog {}", args.catalog.display()))?;
    info!(
        catalog = %args.catalog.display(),
        tables = db.table_count(),
        case = ?db.config().identifier_case,
        self_reference = db.config().allow_self_reference,
        "catalog opened"
    );

    println!("maro_db_cli (type 'help' or 'exit')");

    loop {
        print!("ddl> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            break;
        }

        if let Err(err) = run_command(&db, input) {
            warn!(command = input, "command failed: {err:#}");
            println!("{err:#}");
        }
    }
    Ok(())
}

fn run_command(db: &Database, input: &str) -> Result<()> {
    let (cmd, rest) = input.split_once(' ').unwrap_or((input, ""));
    let rest = rest.trim();
    match cmd.to_lowercase().as_str() {
        "help" => {
            println!("Commands:");
            println!("  create <json>  -> create one table from a JSON definition");
            println!("  batch <file>   -> create tables from a JSON array, all or nothing");
            println!("  tables         -> list tables");
            println!("  show <table>   -> print a table definition");
            println!("  save           -> write the catalog file");
            println!("  exit|quit      -> quit");
        }
        "create" => {
            let definition: TableDefinition =
                serde_json::from_str(rest).context("bad table definition JSON")?;
            let name = db.create_table(definition)?;
            println!("created table {name}");
        }
        "batch" => {
            let raw = fs::read_to_string(rest).with_context(|| format!("reading {rest}"))?;
            let definitions: Vec<TableDefinition> =
                serde_json::from_str(&raw).context("bad batch JSON")?;
            let names = db.create_tables(definitions)?;
            println!("created {} tables: {}", names.len(), names.join(", "));
        }
        "tables" => {
            for name in db.table_names() {
                println!("{name}");
            }
        }
        "show" => {
            let table = db
                .table(rest)
                .with_context(|| format!("Table '{rest}' does not exist"))?;
            println!("{}", serde_json::to_string_pretty(&table)?);
        }
        "save" => {
            db.save()?;
            info!(tables = db.table_count(), "catalog saved");
            println!("saved {} tables", db.table_count());
        }
        other => anyhow::bail!("Unknown command '{other}'. Type 'help'"),
    }
    Ok(())
}
