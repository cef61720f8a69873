use std::io;
use std::process::ExitCode;

use anyhow::Context;
use configs::{AppConfig, LogFormat};
use dotenvy::dotenv;
use service::file::{CustomerRepository, MovieRepository, TheaterRepository};
use service::{CustomerService, MovieService, TheaterService, WriteMode};
use tracing::{error, info};
use uuid::Uuid;

fn init_logging(cfg: Option<&AppConfig>) {
    let (level, format) = cfg.map_or(("warn", LogFormat::Compact), |c| (c.logging.level.as_str(), c.logging.format));
    match format {
        LogFormat::Compact => common::utils::logging::init_logging_default(level),
        LogFormat::Json => common::utils::logging::init_logging_json(level),
    }
    info!(service = "cinema", event = "logger_init", "tracing subscriber initialized");
}

fn run(cfg: &AppConfig) -> anyhow::Result<()> {
    let storage = &cfg.storage;
    common::env::ensure_data_dir(&storage.data_dir())?;
    let mode = if storage.atomic_writes { WriteMode::AtomicReplace } else { WriteMode::Rewrite };

    let customers = CustomerRepository::open(storage.customers_path(), mode).context("loading customers")?;
    let movies = MovieRepository::open(storage.movies_path(), mode).context("loading movies")?;
    let theaters = TheaterRepository::open(storage.theaters_path(), mode).context("loading theaters")?;

    let stdin = io::stdin();
    let mut app = console::CinemaConsole::new(
        stdin.lock(),
        io::stdout(),
        CustomerService::new(customers),
        MovieService::new(movies),
        TheaterService::new(theaters),
    );
    app.run()?;
    Ok(())
}

fn main() -> ExitCode {
    // .env first so CONFIG_PATH and RUST_LOG apply
    dotenv().ok();
    let loaded = AppConfig::load_and_validate();
    init_logging(loaded.as_ref().ok());

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(service = "cinema", event = "panic", %service_id, pid, message = %info, "unhandled panic occurred");
    }));

    let cfg = match loaded {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(service = "cinema", event = "config_invalid", error = %e, "failed to load configuration");
            eprintln!("configuration error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    info!(
        service = "cinema",
        event = "start",
        %service_id,
        pid,
        version,
        data_dir = %cfg.storage.data_dir().display(),
        atomic_writes = cfg.storage.atomic_writes,
        "cinema console starting"
    );

    match run(&cfg) {
        Ok(()) => {
            info!(service = "cinema", event = "stop", %service_id, pid, "cinema console stopped normally");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "cinema", event = "run_failed", error = %e, "cinema console failed");
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
