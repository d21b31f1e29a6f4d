//! Pricewatch CLI, REST API and Telegram bot entry point.
//!
//! Binary name: `pricewatch`
//!
//! Parses CLI arguments, loads configuration, opens the database and then
//! dispatches to the requested front end or operator command.

mod cli;
mod http;
mod state;
mod telegram;

use clap::Parser;
use clap_complete::generate;

use pricewatch_infra::config::load_config;
use pricewatch_infra::sqlite::pool::DatabasePool;
use pricewatch_observe::tracing_setup::{init_tracing, shutdown_tracing};
use pricewatch_types::config::PricewatchConfig;
use pricewatch_types::error::ConfigError;
use pricewatch_types::product::ProductSnapshot;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Shell completions don't need configuration or a database
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "pricewatch", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(cli.config.as_deref())?;

    let long_running = matches!(cli.command, Commands::Serve { .. } | Commands::Bot);
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 if long_running => "info",
        0 => "warn",
        1 => "info,pricewatch=debug",
        _ => "trace",
    };
    init_tracing(config.logging.otel, config.logging.file.as_deref(), filter)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli, config).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli, config: PricewatchConfig) -> anyhow::Result<()> {
    if let Commands::InitDb = cli.command {
        let pool = DatabasePool::open(&config.database).await?;
        pool.close().await;
        if !cli.quiet {
            println!(
                "  {} Database schema ready at {}",
                console::style("✓").green().bold(),
                console::style(&config.database.url).cyan()
            );
        }
        return Ok(());
    }

    let state = AppState::init(&config.database).await?;

    match cli.command {
        Commands::Serve { port, host } => {
            let host = host.unwrap_or(config.http.host);
            let port = port.unwrap_or(config.http.port);
            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            if !cli.quiet {
                println!(
                    "  {} Pricewatch API listening on {}",
                    console::style("⚡").bold(),
                    console::style(format!("http://{addr}")).cyan()
                );
                println!("  {}", console::style("Press Ctrl+C to stop").dim());
            }
            tracing::info!(%addr, "REST service started");

            let router = http::router::build_router(state.clone());
            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            tracing::info!("REST service stopped");
        }

        Commands::Bot => {
            let token = config.telegram.bot_token.as_ref().ok_or_else(|| {
                ConfigError::Missing("telegram.bot_token (set BOT_TOKEN)".to_string())
            })?;
            telegram::run(state.clone(), token).await?;
        }

        Commands::Add { user, url } => {
            cli::product::add_product(&state, &user, &url, cli.json).await?;
        }

        Commands::List { user } => {
            cli::product::list_products(&state, &user, cli.json).await?;
        }

        Commands::Remove { user, product_id } => {
            cli::product::remove_product(&state, &user, product_id, cli.json).await?;
        }

        Commands::History { user, product_id } => {
            cli::product::price_history(&state, &user, product_id, cli.json).await?;
        }

        Commands::Record {
            product_id,
            price,
            name,
            description,
            rating,
        } => {
            let snapshot = ProductSnapshot {
                name,
                description,
                price: Some(price),
                rating,
            };
            cli::product::record_price(&state, product_id, snapshot, cli.json).await?;
        }

        Commands::InitDb | Commands::Completions { .. } => unreachable!("handled above"),
    }

    state.db_pool.close().await;
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
