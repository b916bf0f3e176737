use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use kosha_config::Config;
use tokio::signal;
use tokio::task::JoinError;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod controller;
mod events;
mod io;
mod profile;
mod render;
mod state;

#[cfg(test)]
mod tests;

use self::cli::Cli;
use self::controller::AppController;
use self::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = profile::load_config(cli.config.clone())?;
    init_tracing(&config);

    if cli.list {
        println!("{}", render::render_sources(&kosha_lang_sanskrit::catalog()));
        return Ok(ExitCode::SUCCESS);
    }

    let state = Arc::new(AppState::new(config)?);

    match cli.query() {
        Some(query) => lookup_once(&state, &cli, &query).await,
        None => {
            run_session(state).await;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Logs go to stderr, answers to stdout
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

async fn lookup_once(state: &AppState, cli: &Cli, query: &str) -> anyhow::Result<ExitCode> {
    let preference = cli.source.as_deref();
    if let Some(source) = preference
        && state.kosha.registry().resolve_preference(source).is_none()
    {
        tracing::warn!("Unknown dictionary {source:?}, using the default order");
    }

    let result = match events::lookup(state, query, preference, cli.all, false).await {
        Ok(result) => result,
        Err(e) => {
            eprintln!("{}", render::render_error(&e));
            return Ok(ExitCode::FAILURE);
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", render::render_selection(&result));
    }

    Ok(ExitCode::SUCCESS)
}

async fn run_session(state: Arc<AppState>) {
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks();
    let mut interrupted = false;

    tokio::select! {
        result = signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!("Failed to listen for ctrl+c: {e}");
            }
            tracing::info!("Shutdown requested");
            interrupted = true;
        }
        _ = controller.finished() => {}
        Some(result) = tasks.join_next() => log_task_exit(result),
    }

    controller.shutdown();
    while let Some(result) = tasks.join_next().await {
        log_task_exit(result);
    }

    // a pending stdin read would hold the runtime open until the next newline
    if interrupted {
        std::process::exit(0);
    }
}

fn log_task_exit(result: Result<anyhow::Result<()>, JoinError>) {
    match result {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!("task exited: {e:#}"),
        Err(e) => tracing::error!("task panicked: {e}"),
    }
}
