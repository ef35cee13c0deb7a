use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use studio::config::Config;
use tower::ServiceExt;

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.sora.api_key = "test-key".to_string();
    config.heygen.api_key = "test-key".to_string();
    config.llm.api_key = "test-key".to_string();

    let state = studio::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    studio::api::router(state).await
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn create_episode(app: &Router, title: &str, number: i32) -> String {
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/episodes",
            serde_json::json!({
                "series": "Quota Files",
                "episode_number": number,
                "title": title,
                "premise": "Why quotas fail"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    json["data"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let app = spawn_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["status"], "ok");
    assert!(json["data"]["version"].is_string());
}

#[tokio::test]
async fn test_episode_crud() {
    let app = spawn_app().await;

    let id = create_episode(&app, "The Quota Trap", 1).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/episodes")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["title"], "The Quota Trap");
    assert_eq!(json["data"][0]["status"], "DRAFT");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/episodes/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["episode"]["id"], id.as_str());
    assert_eq!(json["data"]["scripts"].as_array().unwrap().len(), 0);
    assert_eq!(json["data"]["cuts"].as_array().unwrap().len(), 0);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/episodes/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/episodes/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_create_episode_validation() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/episodes",
            serde_json::json!({
                "series": "Quota Files",
                "episode_number": 1,
                "title": "   "
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/episodes",
            serde_json::json!({
                "series": "Quota Files",
                "episode_number": 0,
                "title": "Zeroth"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_rejects_unknown_status_filter() {
    let app = spawn_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/episodes?status=NOT_A_STATUS")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_publish_requires_script() {
    let app = spawn_app().await;
    let id = create_episode(&app, "Unscripted", 1).await;

    let response = app
        .oneshot(post_json(
            &format!("/api/episodes/{}/publish", id),
            serde_json::json!({}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("no script"));
}

#[tokio::test]
async fn test_render_rejects_bad_duration() {
    let app = spawn_app().await;
    let id = create_episode(&app, "Durations", 1).await;

    let response = app
        .oneshot(post_json(
            "/api/video/render/sora",
            serde_json::json!({
                "episode_id": id,
                "prompt": "noir alley",
                "seconds": "7"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("4, 8, 12"));
}

#[tokio::test]
async fn test_render_unknown_episode() {
    let app = spawn_app().await;

    let response = app
        .oneshot(post_json(
            "/api/video/render/sora",
            serde_json::json!({
                "episode_id": "no-such-episode",
                "prompt": "noir alley"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_video_status_unknown_job_is_not_found() {
    let app = spawn_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/video/status/no-such-job")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("no-such-job"));
}

#[tokio::test]
async fn test_create_accepts_publish_date_target() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/episodes",
            serde_json::json!({
                "series": "Quota Files",
                "episode_number": 3,
                "title": "Dated",
                "publish_date_target": "2026-10-01T00:00:00Z"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(
        json["data"]["publish_date_target"],
        "2026-10-01T00:00:00Z"
    );
    assert!(json["data"]["external_video_id"].is_null());
}

#[tokio::test]
async fn test_system_config_redacts_secrets() {
    let app = spawn_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/system/config")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;

    // Keys are cleared before serialization; empty keys are skipped
    // entirely by the config serializer.
    assert!(json["data"]["sora"].get("api_key").is_none());
    assert!(json["data"]["heygen"].get("api_key").is_none());
    assert!(json["data"]["llm"].get("api_key").is_none());
    assert_eq!(json["data"]["server"]["port"], 7180);
}

#[tokio::test]
async fn test_metrics_endpoint_disabled_without_recorder() {
    let app = spawn_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
