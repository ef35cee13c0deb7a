use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, HeyGenRenderBody, SoraRenderBody};
use crate::models::{AspectRatio, AvatarRef, RenderReceipt, SoraDuration, VideoStatusReport};
use crate::services::{HeyGenRenderRequest, SoraRenderRequest};

fn parse_aspect(raw: Option<&str>) -> Result<AspectRatio, ApiError> {
    match raw {
        Some(s) => s.parse().map_err(ApiError::validation),
        None => Ok(AspectRatio::default()),
    }
}

pub async fn render_sora(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SoraRenderBody>,
) -> Result<Json<ApiResponse<RenderReceipt>>, ApiError> {
    let duration: SoraDuration = match body.seconds.as_deref() {
        Some(s) => s.parse().map_err(ApiError::validation)?,
        None => SoraDuration::default(),
    };
    let aspect = parse_aspect(body.aspect.as_deref())?;

    let receipt = state
        .shared
        .renders
        .render_sora(SoraRenderRequest {
            episode_id: body.episode_id,
            cut_id: body.cut_id,
            prompt: body.prompt,
            duration,
            aspect,
            model: body.model,
            input_reference: body.input_reference,
        })
        .await?;
    Ok(Json(ApiResponse::success(receipt)))
}

pub async fn render_heygen(
    State(state): State<Arc<AppState>>,
    Json(body): Json<HeyGenRenderBody>,
) -> Result<Json<ApiResponse<RenderReceipt>>, ApiError> {
    let aspect = parse_aspect(body.aspect.as_deref())?;
    let avatar = match body.avatar.as_deref() {
        Some(raw) => Some(raw.parse::<AvatarRef>().map_err(ApiError::validation)?),
        None => None,
    };

    let receipt = state
        .shared
        .renders
        .render_heygen(HeyGenRenderRequest {
            episode_id: body.episode_id,
            cut_id: body.cut_id,
            script_text: body.script_text,
            avatar,
            aspect,
        })
        .await?;
    Ok(Json(ApiResponse::success(receipt)))
}

pub async fn video_status(
    State(state): State<Arc<AppState>>,
    Path(job_id): Path<String>,
) -> Result<Json<ApiResponse<VideoStatusReport>>, ApiError> {
    let report = state.shared.status.check(&job_id).await?;
    Ok(Json(ApiResponse::success(report)))
}
