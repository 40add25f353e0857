//! oxide-dialect CLI
//!
//! Translates hand-written SQL for a vendor and generates DDL and literal
//! inserts from JSON schema documents.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use oxide_dialect_cli::commands::{describe, find_type, load_schema, load_values, read_sql};
use oxide_dialect_core::{Dialect, Vendor};

/// SQL dialect translation for Oracle and PostgreSQL.
#[derive(Parser)]
#[command(name = "oxide-dialect")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Target vendor (oracle or postgresql).
    #[arg(long, env = "OXIDE_DIALECT_VENDOR", default_value = "oracle")]
    vendor: Vendor,

    /// JSON schema document describing the types.
    #[arg(short, long, env = "OXIDE_DIALECT_SCHEMA")]
    schema: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a statement for the vendor.
    Rewrite {
        /// SQL file (stdin if omitted or `-`).
        file: Option<PathBuf>,
    },

    /// Apply an offset and limit to a query.
    Limit {
        /// SQL file (stdin if omitted or `-`).
        file: Option<PathBuf>,

        /// Number of rows to skip.
        #[arg(short, long)]
        offset: Option<u64>,

        /// Maximum number of rows to return.
        #[arg(short, long)]
        limit: Option<u64>,
    },

    /// Print the `create table` script for a type.
    CreateTable {
        /// Type name in the schema document.
        #[arg(short = 't', long = "type")]
        type_name: String,

        /// Emit the script on a single line.
        #[arg(long)]
        compact: bool,
    },

    /// Print a literal `insert` for one record.
    Insert {
        /// Type name in the schema document.
        #[arg(short = 't', long = "type")]
        type_name: String,

        /// JSON object of field values (defaults for every field if omitted).
        #[arg(long)]
        values: Option<PathBuf>,

        /// Emit the statement on a single line.
        #[arg(long)]
        compact: bool,
    },

    /// Show the vendor facts of the dialect.
    Info,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let dialect = Dialect::new(cli.vendor)?;
    let schema_path = cli.schema.as_deref();

    match cli.command {
        Commands::Rewrite { file } => {
            let sql = read_sql(file.as_deref())?;
            println!("{}", dialect.rewrite(sql.trim_end())?);
        }

        Commands::Limit {
            file,
            offset,
            limit,
        } => {
            let sql = read_sql(file.as_deref())?;
            if limit.is_none() {
                info!("No limit given, query left unchanged.");
            }
            println!("{}", dialect.limit(sql.trim_end(), offset, limit));
        }

        Commands::CreateTable { type_name, compact } => {
            let schema = load_schema(schema_path)?;
            let ty = find_type(&schema, &type_name)?;
            println!("{}", dialect.build_create_table(ty, &schema, compact)?);
        }

        Commands::Insert {
            type_name,
            values,
            compact,
        } => {
            let schema = load_schema(schema_path)?;
            let ty = find_type(&schema, &type_name)?;
            let values = load_values(ty, values.as_deref())?;
            println!("{}", dialect.build_insert_literal(ty, &values, compact));
        }

        Commands::Info => {
            println!("{}", describe(&dialect));
        }
    }

    Ok(())
}
