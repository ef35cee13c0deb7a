//! Video command handlers: render submission, status polls, and the
//! blocking wait loop.

use anyhow::{anyhow, bail};

use crate::api::AssetDto;
use crate::config::Config;
use crate::models::{
    AspectRatio, AssetKind, AvatarRef, Provider, RenderPhase, SoraDuration, VideoStatusReport,
};
use crate::services::{HeyGenRenderRequest, SoraRenderRequest};
use crate::state::SharedState;

use super::output::{print_json, short_id};

#[allow(clippy::too_many_arguments)]
pub async fn cmd_video_render(
    config: &Config,
    provider: &str,
    episode_id: &str,
    cut_id: Option<String>,
    prompt: Option<String>,
    seconds: Option<&str>,
    aspect: Option<&str>,
    avatar: Option<&str>,
    script_text: Option<String>,
    model: Option<String>,
    input_reference: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let provider: Provider = provider.parse().map_err(|e: String| anyhow!(e))?;
    let aspect = match aspect {
        Some(raw) => raw.parse::<AspectRatio>().map_err(|e| anyhow!(e))?,
        None => AspectRatio::default(),
    };

    let state = SharedState::new(config.clone()).await?;

    let receipt = match provider {
        Provider::Sora => {
            let duration = match seconds {
                Some(raw) => raw.parse::<SoraDuration>().map_err(|e| anyhow!(e))?,
                None => SoraDuration::default(),
            };
            state
                .renders
                .render_sora(SoraRenderRequest {
                    episode_id: episode_id.to_string(),
                    cut_id,
                    prompt,
                    duration,
                    aspect,
                    model,
                    input_reference,
                })
                .await?
        }
        Provider::Heygen => {
            let avatar = match avatar {
                Some(raw) => Some(raw.parse::<AvatarRef>().map_err(|e| anyhow!(e))?),
                None => None,
            };
            state
                .renders
                .render_heygen(HeyGenRenderRequest {
                    episode_id: episode_id.to_string(),
                    cut_id,
                    script_text,
                    avatar,
                    aspect,
                })
                .await?
        }
    };

    if json {
        return print_json(&receipt);
    }

    println!("Submitted {} render", receipt.provider);
    println!("  Job:   {}", receipt.video_id);
    println!("  Asset: {}", receipt.asset_id);
    println!("Check progress with: studio {}", receipt.poll_hint);
    Ok(())
}

pub async fn cmd_video_status(config: &Config, job_id: &str, json: bool) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;
    let report = state.status.check(job_id).await?;

    if json {
        return print_json(&report);
    }

    print_report(job_id, &report);
    Ok(())
}

/// Poll until the job leaves PROCESSING or the timeout expires. Exits
/// non-zero on a failed render so scripts can chain on the result.
pub async fn cmd_video_wait(
    config: &Config,
    job_id: &str,
    poll_seconds: Option<u64>,
    timeout_seconds: Option<u64>,
    json: bool,
) -> anyhow::Result<()> {
    let poll = poll_seconds
        .unwrap_or(config.pipeline.wait_poll_seconds)
        .max(1);
    let timeout = timeout_seconds.unwrap_or(config.pipeline.wait_timeout_seconds);

    let state = SharedState::new(config.clone()).await?;
    let started = std::time::Instant::now();

    loop {
        let report = state.status.check(job_id).await?;

        match report.status {
            RenderPhase::Processing => {
                if !json {
                    println!(
                        "{} still processing ({}s elapsed)",
                        job_id,
                        started.elapsed().as_secs()
                    );
                }
            }
            RenderPhase::Completed => {
                if json {
                    return print_json(&report);
                }
                print_report(job_id, &report);
                return Ok(());
            }
            RenderPhase::Failed => {
                if json {
                    print_json(&report)?;
                } else {
                    print_report(job_id, &report);
                }
                bail!(
                    "Render {} failed: {}",
                    job_id,
                    report.error.as_deref().unwrap_or("unknown error")
                );
            }
        }

        if started.elapsed().as_secs() >= timeout {
            bail!("Timed out after {}s waiting for job {}", timeout, job_id);
        }
        tokio::time::sleep(std::time::Duration::from_secs(poll)).await;
    }
}

pub async fn cmd_video_list(
    config: &Config,
    episode_id: &str,
    kind: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let kind = match kind {
        Some(raw) => Some(raw.parse::<AssetKind>().map_err(|e| anyhow!(e))?),
        None => None,
    };

    let state = SharedState::new(config.clone()).await?;
    let detail = state.episodes.detail(episode_id).await?;
    let assets: Vec<_> = detail
        .assets
        .into_iter()
        .filter(|a| kind.is_none_or(|k| a.kind == k.as_str()))
        .collect();

    if json {
        let dtos: Vec<AssetDto> = assets.into_iter().map(AssetDto::from).collect();
        return print_json(&dtos);
    }

    if assets.is_empty() {
        println!("No video assets for episode {}", episode_id);
        return Ok(());
    }

    println!("Assets for {} ({} total)", episode_id, assets.len());
    println!("{:-<70}", "");
    for a in &assets {
        println!(
            "{} {} [{}] {} {}",
            short_id(&a.id),
            a.kind,
            a.status,
            a.provider_job_id.as_deref().unwrap_or("-"),
            a.url.as_deref().or(a.error.as_deref()).unwrap_or("")
        );
    }
    Ok(())
}

fn print_report(job_id: &str, report: &VideoStatusReport) {
    println!("{}: {}", job_id, report.status);
    if let Some(url) = &report.video_url {
        println!("  Video: {}", url);
    }
    if let Some(error) = &report.error {
        println!("  Error: {}", error);
    }
    if let Some(code) = &report.error_code {
        println!("  Code:  {}", code);
    }
}
