use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use super::{
    ApiError, ApiResponse, AppState, AssetDto, CreateEpisodeRequest, CutDto, EpisodeDetailDto,
    EpisodeDto, GenerateCutsRequest, ListEpisodesQuery, PublishEpisodeRequest, ScriptDto,
};
use crate::models::{AssetPromptOutcome, CutOutcome};

pub async fn list_episodes(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListEpisodesQuery>,
) -> Result<Json<ApiResponse<Vec<EpisodeDto>>>, ApiError> {
    let episodes = state
        .shared
        .episodes
        .list(query.series.as_deref(), query.status.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(
        episodes.into_iter().map(EpisodeDto::from).collect(),
    )))
}

pub async fn create_episode(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateEpisodeRequest>,
) -> Result<Json<ApiResponse<EpisodeDto>>, ApiError> {
    let episode = state
        .shared
        .episodes
        .create(
            &body.series,
            body.episode_number,
            &body.title,
            body.premise.as_deref(),
            body.publish_date_target.as_deref(),
        )
        .await?;
    Ok(Json(ApiResponse::success(episode.into())))
}

pub async fn get_episode(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<EpisodeDetailDto>>, ApiError> {
    let detail = state.shared.episodes.detail(&id).await?;
    Ok(Json(ApiResponse::success(EpisodeDetailDto {
        episode: detail.episode.into(),
        scripts: detail.scripts.into_iter().map(ScriptDto::from).collect(),
        cuts: detail.cuts.into_iter().map(CutDto::from).collect(),
        assets: detail.assets.into_iter().map(AssetDto::from).collect(),
    })))
}

pub async fn delete_episode(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.shared.episodes.delete(&id).await?;
    Ok(Json(ApiResponse::success(())))
}

pub async fn publish_episode(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Option<Json<PublishEpisodeRequest>>,
) -> Result<Json<ApiResponse<EpisodeDto>>, ApiError> {
    let body = body.map(|Json(b)| b).unwrap_or_default();
    let episode = state
        .shared
        .episodes
        .publish(&id, body.external_video_id.as_deref())
        .await?;
    Ok(Json(ApiResponse::success(episode.into())))
}

pub async fn generate_script(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ScriptDto>>, ApiError> {
    let script = state.shared.generation.generate_script(&id).await?;
    Ok(Json(ApiResponse::success(script.into())))
}

pub async fn generate_cuts(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<GenerateCutsRequest>,
) -> Result<Json<ApiResponse<Vec<CutOutcome>>>, ApiError> {
    let outcomes = state
        .shared
        .generation
        .generate_cuts(&id, body.formats)
        .await?;
    Ok(Json(ApiResponse::success(outcomes)))
}

pub async fn list_cuts(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<CutDto>>>, ApiError> {
    state.shared.episodes.get(&id).await?;
    let cuts = state.shared.store.list_cuts(&id).await?;
    Ok(Json(ApiResponse::success(
        cuts.into_iter().map(CutDto::from).collect(),
    )))
}

pub async fn generate_asset_prompts(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<AssetPromptOutcome>>>, ApiError> {
    let outcomes = state.shared.generation.generate_asset_prompts(&id).await?;
    Ok(Json(ApiResponse::success(outcomes)))
}

pub async fn list_assets(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<AssetDto>>>, ApiError> {
    state.shared.episodes.get(&id).await?;
    let assets = state.shared.store.list_assets(&id).await?;
    Ok(Json(ApiResponse::success(
        assets.into_iter().map(AssetDto::from).collect(),
    )))
}
