use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;
use serde_json::Value;

use crate::analysis::classifier::PredictionResult;
use crate::errors::AppError;
use crate::state::AppState;

pub const MISSING_TEXT: &str = "Missing 'text' field";

#[derive(Debug, Serialize)]
pub struct TopMatch {
    pub category: String,
    /// Rounded to 4 decimal places.
    pub probability: f64,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub predicted_category: String,
    pub top_matches: Vec<TopMatch>,
    pub status: &'static str,
}

impl From<PredictionResult> for AnalyzeResponse {
    fn from(result: PredictionResult) -> Self {
        Self {
            predicted_category: result.predicted_category,
            top_matches: result
                .top_matches
                .into_iter()
                .map(|m| TopMatch {
                    category: m.category,
                    probability: round4(m.probability),
                })
                .collect(),
            status: "success",
        }
    }
}

/// POST /analyze (also mounted at /api/analyze)
pub async fn handle_analyze(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let text = extract_text(payload)?;
    let prediction = state.classifier.classify(&text)?;
    Ok(Json(prediction.into()))
}

/// Only the presence of `text` is checked here. A body that is not a JSON object
/// counts as missing text; a `text` that is present but not a string fails as an
/// inference error, like any other input the pipeline cannot take.
fn extract_text(payload: Result<Json<Value>, JsonRejection>) -> Result<String, AppError> {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(JsonRejection::BytesRejection(rejection)) => {
            return Err(AppError::Rejected {
                status: rejection.status(),
                message: rejection.body_text(),
            })
        }
        Err(_) => return Err(AppError::Validation(MISSING_TEXT.to_string())),
    };

    match body.get("text") {
        None => Err(AppError::Validation(MISSING_TEXT.to_string())),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(other) => Err(AppError::Inference(format!(
            "expected 'text' to be a string, got {}",
            json_kind(other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
