//! Prediction handler

use axum::{body::Bytes, extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::features::FeatureVector;
use crate::{AppError, AppResult, AppState};

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub prediction: String,
    pub probability: String,
}

/// Classify a partial feature map.
///
/// The body is parsed regardless of Content-Type. Unreadable JSON is a 500,
/// a body that is not an object or a non-numeric field is a 400.
pub async fn predict(State(state): State<AppState>, body: Bytes) -> AppResult<Json<PredictResponse>> {
    let model = state.model.as_deref().ok_or(AppError::ModelUnavailable)?;

    let value: Value = serde_json::from_slice(&body)?;
    let input = value
        .as_object()
        .ok_or_else(|| AppError::ValidationError("Request body must be a JSON object".to_string()))?;

    let vector = FeatureVector::from_partial(input, &state.config.required_inputs)?;
    let prediction = model.predict(&vector)?;

    tracing::debug!(
        "Prediction: {} ({:.4})",
        prediction.label.as_raw(),
        prediction.probability
    );

    Ok(Json(PredictResponse {
        prediction: prediction.label.display_text().to_string(),
        probability: prediction.probability_percent(),
    }))
}
