use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{
    AnswerService, AppConfig, AppServices, Clock, ConfigError, SessionStore, UploadService,
};
use storage::repository::Storage;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    Config(ConfigError),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<ConfigError> for ArgsError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn clock(&self) -> Clock {
        self.services.clock()
    }

    fn store(&self) -> Arc<SessionStore> {
        self.services.store()
    }

    fn uploads(&self) -> Arc<UploadService> {
        self.services.uploads()
    }

    fn answers(&self) -> Arc<AnswerService> {
        self.services.answers()
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!(
        "  cargo run -p app -- [--api-url <url>] [--timeout <secs>] [--db <sqlite_url|memory>] [--session <name>]"
    );
    eprintln!("  cargo run -p app -- [--db <sqlite_url>] --list-sessions");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api-url {}", services::config::DEFAULT_API_URL);
    eprintln!("  --timeout {}", services::config::DEFAULT_TIMEOUT_SECS);
    eprintln!("  --db {}", services::config::DEFAULT_DB_URL);
    eprintln!("  --session <new key per launch>");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  STUDY_API_URL, STUDY_API_TIMEOUT_SECS, STUDY_DB_URL, STUDY_SESSION, RUST_LOG");
}

enum Parsed {
    Run(AppConfig),
    ListSessions(AppConfig),
    Help,
}

fn parse_args(
    mut config: AppConfig,
    args: &mut impl Iterator<Item = String>,
) -> Result<Parsed, ArgsError> {
    let mut list_only = false;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--api-url" => {
                let value = require_value(args, "--api-url")?;
                config.set_api_base_url(&value)?;
            }
            "--timeout" => {
                let value = require_value(args, "--timeout")?;
                config.set_timeout_secs(&value)?;
            }
            "--db" => {
                let value = require_value(args, "--db")?;
                if value.trim().is_empty() {
                    return Err(ArgsError::InvalidDbUrl { raw: value });
                }
                config.db_url = value;
            }
            "--session" => {
                let value = require_value(args, "--session")?;
                config.set_session_name(&value)?;
            }
            "--list-sessions" => list_only = true,
            "--help" | "-h" => return Ok(Parsed::Help),
            _ => return Err(ArgsError::UnknownArg(arg)),
        }
    }
    if list_only {
        Ok(Parsed::ListSessions(config))
    } else {
        Ok(Parsed::Run(config))
    }
}

fn is_memory(db_url: &str) -> bool {
    db_url == "memory"
}

fn normalize_sqlite_url(raw: &str) -> String {
    if is_memory(raw) || raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw.to_string();
    }

    let trimmed = raw.trim();
    let path_str = trimmed.strip_prefix("sqlite:").unwrap_or(trimmed);
    let path = std::path::Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

async fn open_storage(db_url: &str) -> Result<Storage, Box<dyn std::error::Error>> {
    if is_memory(db_url) {
        log::info!("using in-memory storage; progress will not survive a restart");
        return Ok(Storage::in_memory());
    }
    prepare_sqlite_file(db_url)?;
    let storage = Storage::sqlite(db_url).await?;
    log::info!("opened {db_url}");
    Ok(storage)
}

async fn list_sessions(storage: &Storage) -> Result<(), Box<dyn std::error::Error>> {
    let keys = storage.session_keys().await?;
    if keys.is_empty() {
        println!("no saved sessions");
    }
    for key in keys {
        println!("{key}");
    }
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let config = match parse_args(AppConfig::from_env()?, &mut args) {
        Ok(Parsed::Run(config)) => config,
        Ok(Parsed::ListSessions(config)) => {
            let storage = open_storage(&normalize_sqlite_url(&config.db_url)).await?;
            return list_sessions(&storage).await;
        }
        Ok(Parsed::Help) => {
            print_usage();
            return Ok(());
        }
        Err(err) => {
            eprintln!("{err}");
            print_usage();
            return Err(err.into());
        }
    };
    let db_url = normalize_sqlite_url(&config.db_url);

    // Open + migrate storage at startup. Keep this in the binary glue so core/services stay pure.
    let storage = open_storage(&db_url).await?;
    let clock = Clock::default_clock();
    let services = AppServices::open(&config, &storage, clock).await?;
    log::info!("session key {}", services.store().key());

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp { services });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Brainifi")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
