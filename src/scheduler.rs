//! Background pipeline loop: polls in-flight renders and reaps stale ones.

use std::sync::Arc;

use tokio::time::{Duration, interval};
use tracing::{debug, error, info};

use crate::config::PipelineConfig;
use crate::services::StatusService;

pub fn start(status: Arc<StatusService>, config: PipelineConfig) {
    if !config.enabled {
        info!("Pipeline scheduler disabled");
        return;
    }

    info!(
        "Pipeline scheduler started (poll every {}s, stale after {}m)",
        config.poll_interval_seconds, config.stale_after_minutes
    );

    tokio::spawn(async move {
        let mut ticker = interval(Duration::from_secs(config.poll_interval_seconds.max(1)));
        // The first tick fires immediately; skip it so startup is quiet.
        ticker.tick().await;

        loop {
            ticker.tick().await;

            match status.poll_processing().await {
                Ok(advanced) if advanced > 0 => {
                    debug!("Poll sweep advanced {} render(s)", advanced);
                }
                Ok(_) => {}
                Err(e) => error!("Poll sweep failed: {}", e),
            }

            if let Err(e) = status.sweep_stale(config.stale_after_minutes).await {
                error!("Stale sweep failed: {}", e);
            }
        }
    });
}
