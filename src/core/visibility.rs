use crate::domain::model::{is_blank, Landmark};
use crate::utils::error::{Result, ServiceError};
use serde::Deserialize;
use serde_json::Value;

/// 驗證 `/coordinates` 請求並取出 landmarks。
/// 空 body → 400；body 結構錯誤 → 計算錯誤（500）
pub fn extract_landmarks(body: &Value) -> Result<Vec<Landmark>> {
    if is_blank(body) {
        return Err(ServiceError::bad_request("No data provided"));
    }

    let object = body
        .as_object()
        .ok_or_else(|| ServiceError::computation("request body must be a JSON object"))?;

    let raw = match object.get("landmarks") {
        Some(value) if !is_blank(value) => value,
        _ => return Err(ServiceError::bad_request("No landmarks provided")),
    };

    let entries = raw
        .as_array()
        .ok_or_else(|| ServiceError::computation("`landmarks` must be an array"))?;

    entries
        .iter()
        .map(|entry| Landmark::deserialize(entry).map_err(|e| ServiceError::computation(e.to_string())))
        .collect()
}

pub fn average_visibility(landmarks: &[Landmark]) -> Result<f64> {
    if landmarks.is_empty() {
        return Err(ServiceError::bad_request("No landmarks provided"));
    }
    let sum: f64 = landmarks.iter().map(|l| l.visibility).sum();
    Ok(sum / landmarks.len() as f64)
}
