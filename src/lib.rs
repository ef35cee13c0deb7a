pub mod api;
pub mod cli;
pub mod clients;
pub mod config;
pub mod constants;
pub mod db;
pub mod entities;
pub mod models;
pub mod scheduler;
pub mod services;
pub mod state;
pub mod storage;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, ConfigCommands, EpisodeCommands, VideoCommands};
pub use config::Config;
use state::SharedState;

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::load()?;

    let prometheus_handle = if config.observability.metrics_enabled {
        use metrics_exporter_prometheus::PrometheusBuilder;
        let builder = PrometheusBuilder::new();
        let handle = builder
            .install_recorder()
            .context("Failed to install Prometheus recorder")?;
        Some(handle)
    } else {
        None
    };

    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    let fmt_layer = tracing_subscriber::fmt::layer();

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer);

    if config.observability.loki_enabled {
        let url = url::Url::parse(&config.observability.loki_url).context("Invalid Loki URL")?;

        let mut builder = tracing_loki::builder();
        for (key, value) in &config.observability.loki_labels {
            builder = builder.label(key.clone(), value.clone())?;
        }
        let (layer, task) = builder.build_url(url)?;

        tokio::spawn(task);

        registry.with(layer).init();
        info!(
            "Loki logging initialized at {}",
            config.observability.loki_url
        );
    } else {
        registry.init();
    }

    let cli = Cli::parse();
    let json = cli.json;

    match cli.command {
        Some(Commands::Serve) => run_daemon(config, prometheus_handle).await,

        Some(Commands::Episode { command }) => match command {
            EpisodeCommands::List { series, status } => {
                cli::cmd_episode_list(&config, series.as_deref(), status.as_deref(), json).await
            }
            EpisodeCommands::Show { id } => cli::cmd_episode_show(&config, &id, json).await,
            EpisodeCommands::Create {
                series,
                number,
                title,
                premise,
                publish_date,
            } => {
                cli::cmd_episode_create(
                    &config,
                    &series,
                    number,
                    &title,
                    premise.as_deref(),
                    publish_date.as_deref(),
                    json,
                )
                .await
            }
            EpisodeCommands::Delete { id } => cli::cmd_episode_delete(&config, &id, json).await,
            EpisodeCommands::Status { id, status } => {
                cli::cmd_episode_status(&config, &id, &status, json).await
            }
            EpisodeCommands::GenerateScript { id } => {
                cli::cmd_episode_generate_script(&config, &id, json).await
            }
            EpisodeCommands::GenerateCuts { id, formats } => {
                cli::cmd_episode_generate_cuts(&config, &id, formats, json).await
            }
            EpisodeCommands::GenerateAssets { id } => {
                cli::cmd_episode_generate_assets(&config, &id, json).await
            }
            EpisodeCommands::Publish { id, external_id } => {
                cli::cmd_episode_publish(&config, &id, external_id.as_deref(), json).await
            }
        },

        Some(Commands::Video { command }) => match command {
            VideoCommands::Render {
                provider,
                episode_id,
                cut,
                prompt,
                seconds,
                aspect,
                avatar,
                script_text,
                model,
                input_reference,
            } => {
                cli::cmd_video_render(
                    &config,
                    &provider,
                    &episode_id,
                    cut,
                    prompt,
                    seconds.as_deref(),
                    aspect.as_deref(),
                    avatar.as_deref(),
                    script_text,
                    model,
                    input_reference,
                    json,
                )
                .await
            }
            VideoCommands::Status { job_id } => cli::cmd_video_status(&config, &job_id, json).await,
            VideoCommands::Wait {
                job_id,
                poll_seconds,
                timeout_seconds,
            } => {
                cli::cmd_video_wait(&config, &job_id, poll_seconds, timeout_seconds, json).await
            }
            VideoCommands::List { episode_id, kind } => {
                cli::cmd_video_list(&config, &episode_id, kind.as_deref(), json).await
            }
        },

        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => cli::cmd_config_show(&config, json).await,
            ConfigCommands::Validate => cli::cmd_config_validate(&config).await,
            ConfigCommands::Init => cli::cmd_config_init().await,
        },

        None => run_daemon(config, prometheus_handle).await,
    }
}

async fn run_daemon(
    config: Config,
    prometheus_handle: Option<metrics_exporter_prometheus::PrometheusHandle>,
) -> anyhow::Result<()> {
    info!(
        "Studio v{} starting in daemon mode...",
        env!("CARGO_PKG_VERSION")
    );

    config.validate()?;

    let shared = Arc::new(SharedState::new(config.clone()).await?);

    scheduler::start(shared.status.clone(), config.pipeline.clone());

    let server_handle: Option<tokio::task::JoinHandle<()>> = if config.server.enabled {
        let port = config.server.port;
        info!("Starting Web API on port {}", port);

        let api_state = api::create_app_state(shared, prometheus_handle);
        let app = api::router(api_state).await;
        let addr = format!("0.0.0.0:{}", port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        Some(tokio::spawn(async move {
            info!("Web server running at http://0.0.0.0:{}", port);
            if let Err(e) = axum::serve(listener, app).await {
                error!("Web server error: {}", e);
            }
        }))
    } else {
        None
    };

    info!("Daemon running. Press Ctrl+C to stop.");

    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received");
        }
        Err(e) => {
            error!("Error listening for shutdown: {}", e);
        }
    }

    if let Some(handle) = server_handle {
        handle.abort();
    }
    info!("Daemon stopped");

    Ok(())
}
