//! gridquery CLI - Translate data table requests offline
//!
//! Usage:
//!   gridquery plan --request <req.json> --schema <schema.json> [--params <p.json>] [--entity <name>] [--dialect <dialect>]
//!   gridquery sql  --request <req.json> --schema <schema.json> [--params <p.json>] [--entity <name>] [--dialect <dialect>]
//!
//! Examples:
//!   gridquery plan --request req.json --schema schema.json --entity users
//!   RUST_LOG=gridquery=debug gridquery sql --request req.json --schema schema.json --dialect tsql

use clap::{Args, Parser, Subcommand, ValueEnum};
use gridquery::config::{LogFormat, LoggingSettings, Settings};
use gridquery::metadata::{EntityRef, StaticSchema};
use gridquery::query::QueryParams;
use gridquery::request::RequestConfig;
use gridquery::sql::{select_sql, Dialect};
use gridquery::translation::{plan, TranslateOptions};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "gridquery")]
#[command(about = "gridquery - Translate data table requests into query specifications")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the finalized query specification as JSON
    Plan(PlanArgs),

    /// Print the SQL for the finalized query
    Sql(PlanArgs),
}

#[derive(Args)]
struct PlanArgs {
    /// Data table request (JSON)
    #[arg(short, long)]
    request: PathBuf,

    /// Schema file: entity -> column -> {"type": ...}
    #[arg(short, long)]
    schema: Option<PathBuf>,

    /// Base query parameters (JSON)
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// Root entity (defaults to the first entity in the schema)
    #[arg(short, long)]
    entity: Option<String>,

    /// SQL dialect, overriding the schema and config file
    #[arg(short, long)]
    dialect: Option<DialectArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum DialectArg {
    Postgres,
    Mysql,
    Tsql,
    Duckdb,
    Bigquery,
    Snowflake,
    Databricks,
    Redshift,
    Sqlite,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Postgres => Dialect::Postgres,
            DialectArg::Mysql => Dialect::MySql,
            DialectArg::Tsql => Dialect::TSql,
            DialectArg::Duckdb => Dialect::DuckDb,
            DialectArg::Bigquery => Dialect::BigQuery,
            DialectArg::Snowflake => Dialect::Snowflake,
            DialectArg::Databricks => Dialect::Databricks,
            DialectArg::Redshift => Dialect::Redshift,
            DialectArg::Sqlite => Dialect::Sqlite,
        }
    }
}

/// What to print once the query is planned.
#[derive(Clone, Copy)]
enum Output {
    Json,
    Sql,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match Settings::load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&settings.logging);

    let (args, output) = match cli.command {
        Commands::Plan(args) => (args, Output::Json),
        Commands::Sql(args) => (args, Output::Sql),
    };

    match cmd_plan(&settings, args, output).await {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(logging: &LoggingSettings) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let registry = tracing_subscriber::registry().with(filter);

    match logging.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}

async fn cmd_plan(
    settings: &Settings,
    args: PlanArgs,
    output: Output,
) -> Result<String, Box<dyn std::error::Error>> {
    let schema_path = match args.schema {
        Some(path) => path,
        None => settings
            .schema_path()?
            .ok_or("no schema given: pass --schema or set [translation] schema")?,
    };
    let schema = StaticSchema::from_file(&schema_path)?;

    let request: RequestConfig = read_json(&args.request)?;
    let params: QueryParams = match &args.params {
        Some(path) => read_json(path)?,
        None => QueryParams::default(),
    };

    let entity = match args.entity {
        Some(name) => EntityRef::new(name),
        None => schema
            .entity_names()
            .next()
            .map(EntityRef::from)
            .ok_or("schema describes no entities")?,
    };

    let mut options: TranslateOptions = settings.translate_options();
    if let Some(dialect) = args.dialect {
        options.dialect = Some(dialect.into());
    }
    let dialect = options.dialect.unwrap_or(schema.dialect());

    tracing::info!(entity = %entity, dialect = %dialect, "Translating request");
    let query = plan(&schema, &entity, &request, params, &options).await?;

    Ok(match output {
        Output::Json => serde_json::to_string_pretty(&query)?,
        Output::Sql => select_sql(&entity, &query, dialect),
    })
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    Ok(serde_json::from_str(&content)
        .map_err(|e| format!("failed to parse {}: {}", path.display(), e))?)
}
