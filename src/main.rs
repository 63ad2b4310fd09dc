//! Staff Registry - HTTP backend for employee, department and customer records.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use staff_registry as app;

use app::api::{self, AppState};
use app::config::{AppConfig, ConfigLoadResult};
use app::db;

/// HTTP backend for employee, department and customer records.
#[derive(Parser)]
#[command(name = "staff-registry", version)]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    /// Path to the config file
    #[arg(long, value_name = "PATH", conflicts_with = "dev")]
    config: Option<PathBuf>,

    /// Keep records in memory instead of PostgreSQL
    #[arg(long)]
    in_memory: bool,

    /// Override the listen port
    #[arg(long)]
    port: Option<u16>,

    /// Write a config file with default values to the config path and exit
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Determine config path based on mode
    let config_path = match (&cli.config, cli.dev) {
        (Some(path), _) => path.clone(),
        (None, true) => PathBuf::from("config.toml"),
        (None, false) => AppConfig::default_path(),
    };

    if cli.init_config {
        AppConfig::default()
            .save(&config_path)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        println!("Wrote default config to {}", config_path.display());
        return Ok(());
    }

    let (mut config, missing) = match AppConfig::try_load(&config_path) {
        ConfigLoadResult::Loaded(config) => (config, false),
        ConfigLoadResult::Missing => (AppConfig::default(), true),
        ConfigLoadResult::Invalid(e) => {
            return Err(e).with_context(|| format!("Invalid config file {}", config_path.display()));
        }
    };
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let _log_guard = app::logging::init(&config.logging);

    tracing::info!("Staff Registry starting...");
    if missing {
        tracing::warn!("Config {:?} not found, using defaults", config_path);
    } else {
        tracing::info!("Config path: {:?}", config_path);
    }

    let state = if cli.in_memory {
        tracing::info!("Using in-memory storage");
        AppState::in_memory()
    } else {
        let conn = db::connect(&config.database)
            .await
            .context("Failed to connect to database")?;
        db::ping(&conn).await.context("Database ping failed")?;

        if let Ok(version) = db::server_version(&conn).await {
            tracing::info!("PostgreSQL: {}", version);
        }
        if config.database.auto_create_schema {
            db::schema::create_schema(&conn)
                .await
                .context("Failed to create database schema")?;
        }
        if let Ok(counts) = db::table_counts(&conn).await {
            tracing::info!(
                "Tables: {} departments, {} employees, {} customers",
                counts.departments,
                counts.employees,
                counts.customers
            );
        }

        AppState::postgres(conn)
    };

    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    tracing::info!("Listening on http://{}", address);

    axum::serve(listener, api::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Staff Registry stopped");
    Ok(())
}

/// Resolve when Ctrl-C is received.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
