//! Episode command handlers.

use anyhow::anyhow;

use crate::api::{AssetDto, CutDto, EpisodeDetailDto, EpisodeDto, ScriptDto};
use crate::config::Config;
use crate::models::{AssetPromptOutcome, CutOutcome, EpisodeStatus};
use crate::state::SharedState;

use super::output::{print_json, short_id};

pub async fn cmd_episode_list(
    config: &Config,
    series: Option<&str>,
    status: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;
    let episodes = state.episodes.list(series, status).await?;

    if json {
        let dtos: Vec<EpisodeDto> = episodes.into_iter().map(EpisodeDto::from).collect();
        return print_json(&dtos);
    }

    if episodes.is_empty() {
        println!("No episodes found.");
        println!();
        println!("Create one with: studio episode create --series \"...\" --number 1 --title \"...\"");
        return Ok(());
    }

    println!("Episodes ({} total)", episodes.len());
    println!("{:-<70}", "");

    for ep in episodes {
        println!("{} {} #{} - {}", short_id(&ep.id), ep.series, ep.episode_number, ep.title);
        println!("  ID: {} | Status: {}", ep.id, ep.status);
    }

    Ok(())
}

pub async fn cmd_episode_show(config: &Config, id: &str, json: bool) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;
    let detail = state.episodes.detail(id).await?;

    if json {
        let dto = EpisodeDetailDto {
            episode: detail.episode.into(),
            scripts: detail.scripts.into_iter().map(ScriptDto::from).collect(),
            cuts: detail.cuts.into_iter().map(CutDto::from).collect(),
            assets: detail.assets.into_iter().map(AssetDto::from).collect(),
        };
        return print_json(&dto);
    }

    let ep = &detail.episode;
    println!("{} #{} - {}", ep.series, ep.episode_number, ep.title);
    println!("{:-<70}", "");
    println!("ID: {}", ep.id);
    println!("Status: {}", ep.status);
    if let Some(premise) = &ep.premise {
        println!("Premise: {}", premise);
    }
    if let Some(target) = &ep.publish_date_target {
        println!("Target date: {}", target);
    }
    if let Some(published) = &ep.published_at {
        println!("Published: {}", published);
    }
    if let Some(external) = &ep.external_video_id {
        println!("External video: {}", external);
    }

    println!();
    println!("Scripts ({})", detail.scripts.len());
    for s in &detail.scripts {
        let marker = if s.canonical { "*" } else { " " };
        println!(
            " {} v{} ({} chars) {}",
            marker,
            s.version,
            s.content.chars().count(),
            s.model.as_deref().unwrap_or("-")
        );
    }

    println!();
    println!("Cuts ({})", detail.cuts.len());
    for c in &detail.cuts {
        println!(
            "  {} [{}] {}s {}",
            c.format,
            c.status,
            c.duration_target,
            c.video_url.as_deref().unwrap_or("")
        );
    }

    println!();
    println!("Assets ({})", detail.assets.len());
    for a in &detail.assets {
        println!(
            "  {} {} [{}] {}",
            short_id(&a.id),
            a.kind,
            a.status,
            a.url.as_deref().or(a.error.as_deref()).unwrap_or("")
        );
    }

    Ok(())
}

pub async fn cmd_episode_create(
    config: &Config,
    series: &str,
    number: i32,
    title: &str,
    premise: Option<&str>,
    publish_date: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;
    let episode = state
        .episodes
        .create(series, number, title, premise, publish_date)
        .await?;

    if json {
        return print_json(&EpisodeDto::from(episode));
    }

    println!("Created episode {} ({} #{})", episode.id, episode.series, episode.episode_number);
    println!("Next: studio episode generate-script {}", episode.id);
    Ok(())
}

pub async fn cmd_episode_delete(config: &Config, id: &str, json: bool) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;
    state.episodes.delete(id).await?;

    if json {
        return print_json(&serde_json::json!({ "deleted": id }));
    }
    println!("Deleted episode {}", id);
    Ok(())
}

pub async fn cmd_episode_status(
    config: &Config,
    id: &str,
    status: &str,
    json: bool,
) -> anyhow::Result<()> {
    let status: EpisodeStatus = status.parse().map_err(|e: String| anyhow!(e))?;
    let state = SharedState::new(config.clone()).await?;
    let episode = state.episodes.update_status(id, status).await?;

    if json {
        return print_json(&EpisodeDto::from(episode));
    }
    println!("Episode {} is now {}", id, episode.status);
    Ok(())
}

pub async fn cmd_episode_generate_script(
    config: &Config,
    id: &str,
    json: bool,
) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;
    println!("Generating script for episode {}...", id);
    let script = state.generation.generate_script(id).await?;

    if json {
        return print_json(&ScriptDto::from(script));
    }

    println!(
        "Script v{} generated ({} chars, model {})",
        script.version,
        script.content.chars().count(),
        script.model.as_deref().unwrap_or("-")
    );
    Ok(())
}

pub async fn cmd_episode_generate_cuts(
    config: &Config,
    id: &str,
    formats: Option<Vec<String>>,
    json: bool,
) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;
    let outcomes = state.generation.generate_cuts(id, formats).await?;

    if json {
        return print_json(&outcomes);
    }

    for outcome in &outcomes {
        match outcome {
            CutOutcome::Created {
                format,
                cut_id,
                duration_target,
                ..
            } => println!("✓ {} ({}s) -> cut {}", format, duration_target, short_id(cut_id)),
            CutOutcome::Skipped { format, reason } => println!("- {} skipped: {}", format, reason),
            CutOutcome::Failed { format, error } => println!("✗ {} failed: {}", format, error),
        }
    }
    Ok(())
}

pub async fn cmd_episode_generate_assets(
    config: &Config,
    id: &str,
    json: bool,
) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;
    let outcomes = state.generation.generate_asset_prompts(id).await?;

    if json {
        return print_json(&outcomes);
    }

    for outcome in &outcomes {
        match outcome {
            AssetPromptOutcome::Created { kind, asset_ids } => {
                println!("✓ {} prompt(s): {}", kind, asset_ids.len());
            }
            AssetPromptOutcome::ParseFailed { kind, error } => {
                println!("✗ {} output did not parse: {}", kind, error);
            }
            AssetPromptOutcome::ModelFailed { kind, error } => {
                println!("✗ {} generation failed: {}", kind, error);
            }
        }
    }
    Ok(())
}

pub async fn cmd_episode_publish(
    config: &Config,
    id: &str,
    external_id: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let state = SharedState::new(config.clone()).await?;
    let episode = state.episodes.publish(id, external_id).await?;

    if json {
        return print_json(&EpisodeDto::from(episode));
    }
    println!("Published episode {}", id);
    Ok(())
}
