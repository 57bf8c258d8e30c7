use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use clients_info::config::{ClientsInfoConfig, StorageKind};
use clients_info::contract::{ClientPatch, ClientsApi, NewClient, CLIENT_SCHEMA};
use clients_info::ClientsInfo;
use mimalloc::MiMalloc;
use runtime::{AppConfig, CliArgs, DatabaseConfig};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use uuid::Uuid;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Clientbook - validated client contact records
#[derive(Parser)]
#[command(name = "clientbook")]
#[command(about = "Clientbook - validated client contact records")]
#[command(version, arg_required_else_help = true)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print current configuration and exit
    #[arg(long, global = true)]
    print_config: bool,

    /// Log verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Keep records in memory instead of the configured database
    #[arg(long, global = true)]
    memory: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check configuration
    Check,
    /// Print the client schema metadata as JSON
    Schema,
    #[command(flatten)]
    Records(RecordCommands),
}

/// Commands that need the clients module started.
#[derive(Subcommand)]
enum RecordCommands {
    /// Validate and store a new client
    Create(CreateArgs),
    /// Show a client
    Get { id: Uuid },
    /// Update some fields of a client
    Update(UpdateArgs),
    /// Delete a client
    Delete { id: Uuid },
    /// Print the number of stored clients
    Count,
    /// List clients ordered by creation time
    List {
        #[arg(long)]
        limit: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
    },
}

#[derive(Args)]
struct CreateArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
    #[arg(long)]
    location: String,
}

#[derive(Args)]
struct UpdateArgs {
    id: Uuid,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    location: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        verbose: cli.verbose,
        memory: cli.memory,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.clone().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.home_dir));
    tracing::info!("Clientbook starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command {
        Some(Commands::Check) => check_config(&config, &args),
        Some(Commands::Schema) => print_json(&CLIENT_SCHEMA),
        Some(Commands::Records(command)) => {
            let api = start_clients_module(&config, &args).await?;
            run_command(api.as_ref(), command).await
        }
        None => Err(anyhow!("no command given, see --help")),
    }
}

async fn run_command(api: &dyn ClientsApi, command: RecordCommands) -> Result<()> {
    match command {
        RecordCommands::Create(a) => {
            let client = api
                .create_client(NewClient {
                    name: a.name,
                    email: a.email,
                    phone: a.phone,
                    location: a.location,
                })
                .await?;
            print_json(&client)
        }
        RecordCommands::Get { id } => print_json(&api.get_client(id).await?),
        RecordCommands::Update(a) => {
            let patch = ClientPatch {
                name: a.name,
                email: a.email,
                phone: a.phone,
                location: a.location,
            };
            print_json(&api.update_client(a.id, patch).await?)
        }
        RecordCommands::Delete { id } => {
            api.delete_client(id).await?;
            print_json(&serde_json::json!({ "deleted": id }))
        }
        RecordCommands::Count => {
            let total = api.count_clients().await?;
            print_json(&serde_json::json!({ "total": total }))
        }
        RecordCommands::List { limit, offset } => {
            print_json(&api.list_clients(limit, offset).await?)
        }
    }
}

/// Explicit one-time startup of the clients module: choose storage,
/// connect, register the schema, hand back the API.
async fn start_clients_module(config: &AppConfig, args: &CliArgs) -> Result<Arc<dyn ClientsApi>> {
    let module_cfg = clients_module_config(config, args)?;

    let db = match module_cfg.storage {
        StorageKind::Memory => None,
        StorageKind::Database => {
            let db_config = config
                .database
                .as_ref()
                .ok_or_else(|| anyhow!("database storage selected but no database configured"))?;
            Some(connect_database(db_config, Path::new(&config.home_dir)).await?)
        }
    };

    let module = ClientsInfo::new();
    module.init(&module_cfg, db).await?;
    module.api()
}

async fn connect_database(db_config: &DatabaseConfig, base_dir: &Path) -> Result<DatabaseConnection> {
    let dsn = db_config.url.trim();
    if dsn.is_empty() {
        return Err(anyhow!("Database URL not configured"));
    }
    ensure_sqlite(dsn)?;
    let dsn = absolutize_sqlite_dsn(dsn, base_dir, true)?;

    let mut opts = ConnectOptions::new(dsn.clone());
    opts.max_connections(db_config.max_conns.unwrap_or(10))
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(false);
    if dsn == "sqlite::memory:" {
        // Each in-memory connection is a separate database.
        opts.max_connections(1).min_connections(1);
    }
    let busy_timeout = Duration::from_millis(u64::from(db_config.busy_timeout_ms.unwrap_or(5000)));
    opts.map_sqlx_sqlite_opts(move |o| o.busy_timeout(busy_timeout));

    tracing::info!("Connecting to database: {}", dsn);
    Database::connect(opts)
        .await
        .with_context(|| format!("cannot connect to {dsn}"))
}

/// Only SQLite drivers are compiled in.
fn ensure_sqlite(dsn: &str) -> Result<()> {
    if dsn.eq_ignore_ascii_case("sqlite::memory:") || dsn.eq_ignore_ascii_case("sqlite://:memory:")
    {
        return Ok(());
    }
    let url = Url::parse(dsn).map_err(|e| anyhow!("Invalid database DSN '{}': {}", dsn, e))?;
    match url.scheme() {
        "sqlite" | "sqlite3" => Ok(()),
        other => Err(anyhow!("Unsupported database type: {}", other)),
    }
}

/// Expand a sqlite DSN into an absolute-path DSN using a base directory.
/// - Keeps in-memory DSNs as "sqlite::memory:".
/// - Adds `mode=rwc` so a missing database file is created.
/// - Normalizes backslashes into forward slashes (important on Windows).
fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path, create_dirs: bool) -> Result<String> {
    if dsn.eq_ignore_ascii_case("sqlite::memory:") || dsn.eq_ignore_ascii_case("sqlite://:memory:")
    {
        return Ok("sqlite::memory:".to_string());
    }
    let db_path = dsn
        .strip_prefix("sqlite://")
        .or_else(|| dsn.strip_prefix("sqlite3://"))
        .ok_or_else(|| anyhow!("DSN must start with sqlite:// (got: {})", dsn))?;

    let (path_str, query) = match db_path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (db_path, None),
    };

    let mut p = PathBuf::from(path_str);
    if p.as_os_str().is_empty() {
        return Err(anyhow!("Empty SQLite path in DSN"));
    }
    if p.is_relative() {
        p = base_dir.join(p);
    }

    if let Some(dir) = p.parent() {
        if create_dirs {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("cannot create {}", dir.display()))?;
        }
    }

    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    match query {
        Some(q) if q.contains("mode=") => {
            out.push('?');
            out.push_str(q);
        }
        Some(q) => {
            out.push('?');
            out.push_str(q);
            out.push_str("&mode=rwc");
        }
        None => out.push_str("?mode=rwc"),
    }
    Ok(out)
}

/// The module's section of the config, with `--memory` applied.
fn clients_module_config(config: &AppConfig, args: &CliArgs) -> Result<ClientsInfoConfig> {
    let mut module_cfg: ClientsInfoConfig = config.module_config(ClientsInfo::NAME)?;
    if args.memory {
        module_cfg.storage = StorageKind::Memory;
    }
    Ok(module_cfg)
}

fn check_config(config: &AppConfig, args: &CliArgs) -> Result<()> {
    tracing::info!("Checking configuration...");

    let module_cfg = clients_module_config(config, args)?;
    if module_cfg.storage == StorageKind::Database {
        let db = config
            .database
            .as_ref()
            .ok_or_else(|| anyhow!("database storage selected but no database configured"))?;
        ensure_sqlite(db.url.trim())?;
    }

    println!("Configuration check passed");
    println!("{}", config.to_yaml()?);
    Ok(())
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
