use crate::core::scoring::{
    compare_snapshots, score_against_choreography, CHOREOGRAPHY_POLICY, SNAPSHOT_POLICY,
};
use crate::core::visibility::{average_visibility, extract_landmarks};
use crate::core::{SessionId, SnapshotSlot, Storage};
use crate::domain::model::is_blank;
use crate::http::response::ApiError;
use crate::http::AppState;
use crate::utils::error::ServiceError;
use axum::body::Bytes;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::HeaderMap;
use axum::Json;
use serde_json::{json, Value};

pub const SESSION_HEADER: &str = "x-session-id";

type ApiResult = Result<Json<Value>, ApiError>;

/// 沒帶 `X-Session-Id` 的請求共用 default session
pub fn session_id(headers: &HeaderMap) -> SessionId {
    headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(SessionId::new)
        .unwrap_or_default()
}

fn parse_json(body: &[u8]) -> Result<Value, ServiceError> {
    Ok(serde_json::from_slice(body)?)
}

pub async fn health_check<S: Storage + 'static>(State(state): State<AppState<S>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": state.service.name()
    }))
}

pub async fn upload_file<S: Storage + 'static>(
    State(state): State<AppState<S>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult {
    let mut multipart = match multipart {
        Ok(multipart) => multipart,
        Err(rejection) => {
            tracing::debug!("Upload without multipart body: {}", rejection);
            return Err(ServiceError::bad_request("No file provided").into());
        }
    };

    while let Some(field) = multipart.next_field().await.map_err(ServiceError::from)? {
        if field.name() != Some("file") {
            continue;
        }
        // 沒有 filename 的 `file` 是一般表單欄位，不算上傳檔案
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };

        let file_name = state
            .upload
            .check_file_name(&file_name)?
            .to_string();
        let data = field.bytes().await.map_err(ServiceError::from)?;
        tracing::info!("📥 Received upload {} ({} bytes)", file_name, data.len());

        let processed = state.upload.process(&file_name, &data).await?;
        return Ok(Json(json!({
            "message": "File processed successfully",
            "output": processed.output
        })));
    }

    Err(ServiceError::bad_request("No file provided").into())
}

pub async fn receive_coordinates<S: Storage + 'static>(
    State(_state): State<AppState<S>>,
    body: Bytes,
) -> ApiResult {
    let detailed = |error: ServiceError| ApiError::detailed("An error occurred", error);

    if body.is_empty() {
        return Err(ServiceError::bad_request("No data provided").into());
    }

    let data = parse_json(&body).map_err(detailed)?;
    let landmarks = extract_landmarks(&data).map_err(detailed)?;
    tracing::debug!("Received landmarks: {}", data["landmarks"]);

    let avg_visibility = average_visibility(&landmarks).map_err(detailed)?;
    tracing::info!(
        "👁️ Average visibility over {} landmarks: {}",
        landmarks.len(),
        avg_visibility
    );

    Ok(Json(json!({
        "message": "Coordinates received successfully!",
        "avg_visibility": avg_visibility
    })))
}

async fn store_snapshot<S: Storage + 'static>(
    state: AppState<S>,
    headers: &HeaderMap,
    body: &[u8],
    slot: SnapshotSlot,
) -> ApiResult {
    let session = session_id(headers);
    let snapshot = parse_json(body)?;
    state.snapshots.put(&session, slot, snapshot).await?;
    tracing::info!("{} positions received (session: {}).", slot.label(), session.as_str());

    Ok(Json(json!({
        "message": format!("{} positions received.", slot.label())
    })))
}

pub async fn receive_user_positions<S: Storage + 'static>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult {
    store_snapshot(state, &headers, &body, SnapshotSlot::User).await
}

pub async fn receive_model_positions<S: Storage + 'static>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult {
    store_snapshot(state, &headers, &body, SnapshotSlot::Model).await
}

pub async fn calculate_score<S: Storage + 'static>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
) -> ApiResult {
    let session = session_id(&headers);
    // 一次讀出整組快照，避免 user/model 來自不同時間點
    let pair = state.snapshots.pair(&session).await?;

    let user = pair
        .slot(SnapshotSlot::User)
        .filter(|snapshot| !is_blank(snapshot))
        .ok_or_else(|| ServiceError::bad_request("User positions not available."))?;
    let model = pair
        .slot(SnapshotSlot::Model)
        .filter(|snapshot| !is_blank(snapshot))
        .ok_or_else(|| ServiceError::bad_request("Model positions not available."))?;

    let score = compare_snapshots(user, model, &SNAPSHOT_POLICY)?;
    for result in &score.results {
        tracing::debug!(
            "{}: distance={:?} points={}",
            result.bone,
            result.distance,
            result.points
        );
    }
    tracing::info!(
        "🎯 Session {} scored {} points ({} policy)",
        session.as_str(),
        score.total_points,
        SNAPSHOT_POLICY.name
    );

    Ok(Json(json!({ "total_points": score.total_points })))
}

pub async fn receive_positions<S: Storage + 'static>(
    State(state): State<AppState<S>>,
    body: Bytes,
) -> ApiResult {
    let payload = parse_json(&body)?;
    tracing::debug!("Received bone positions: {}", payload);

    let result = score_against_choreography(&payload, &state.choreography, &CHOREOGRAPHY_POLICY)?;
    for (bone, comparison) in &result.results {
        tracing::debug!(
            "{}: distance={:?} points={}",
            bone,
            comparison.distance,
            comparison.points
        );
    }
    tracing::info!(
        "🎯 Scored {} bones against choreography: {} points",
        result.results.len(),
        result.total_points
    );

    Ok(Json(json!({
        "message": "Bone positions processed successfully!",
        "results": result.results,
        "total_points": result.total_points
    })))
}
