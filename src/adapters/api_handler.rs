//! REST API handlers for the generation and anonymization endpoints.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::adapters::anonymizer::DataAnonymizer;
use crate::adapters::postprocess;
use crate::adapters::schema_repository::SchemaRepository;
use crate::adapters::skeleton_merger::SkeletonMerger;
use crate::adapters::value_provider::ValueProvider;
use crate::config::Settings;

/// Shared application state for API handlers
#[derive(Clone)]
pub struct ApiState {
    pub settings: Arc<RwLock<Settings>>,
}

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub skeleton: Option<Value>,
    /// Schema document; the legacy wire name "swagger" is accepted too.
    #[serde(alias = "swagger")]
    pub schema: Option<Value>,
    #[serde(default)]
    pub options: GenerateOptions,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerateOptions {
    pub seed: Option<u64>,
    pub count: Option<usize>,
    pub locale: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DataRequest {
    pub data: Option<Value>,
}

#[derive(Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<GenerateMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMetadata {
    pub generated_at: String,
    pub item_count: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnonymizeResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub processed_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensitive_fields: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_fields: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/generate - fill a skeleton with synthetic data
pub async fn generate(
    State(state): State<ApiState>,
    Json(request): Json<GenerateRequest>,
) -> impl IntoResponse {
    let Some(skeleton) = request.skeleton else {
        return (
            StatusCode::BAD_REQUEST,
            Json(GenerateResponse {
                success: false,
                data: None,
                metadata: None,
                error: Some("Missing required field: skeleton".to_string()),
            }),
        );
    };

    let default_locale = state.settings.read().await.generator.locale.clone();
    let locale = request.options.locale.as_deref().unwrap_or(&default_locale);

    let mut provider = ValueProvider::with_locale(locale);
    if let Some(seed) = request.options.seed {
        provider.set_seed(seed);
    }

    let repository = request.schema.as_ref().map(SchemaRepository::from_document);
    let merger = SkeletonMerger::new();
    let mut data = merger.fill(&skeleton, repository.as_ref(), &mut provider);

    if let Some(count) = request.options.count {
        data = apply_count(
            data,
            count,
            &skeleton,
            repository.as_ref(),
            &merger,
            &mut provider,
        );
    }

    let item_count = item_count(&data);
    (
        StatusCode::OK,
        Json(GenerateResponse {
            success: true,
            data: Some(data),
            metadata: Some(GenerateMetadata {
                generated_at: Utc::now().to_rfc3339(),
                item_count,
            }),
            error: None,
        }),
    )
}

/// POST /api/anonymize - replace sensitive values in an existing document
pub async fn anonymize(Json(request): Json<DataRequest>) -> impl IntoResponse {
    let Some(data) = request.data else {
        return (
            StatusCode::BAD_REQUEST,
            Json(AnonymizeResponse {
                success: false,
                data: None,
                processed_at: None,
                error: Some("Missing required field: data".to_string()),
            }),
        );
    };

    let mut anonymizer = DataAnonymizer::new();
    let anonymized = anonymizer.anonymize(&data);

    (
        StatusCode::OK,
        Json(AnonymizeResponse {
            success: true,
            data: Some(anonymized),
            processed_at: Some(Utc::now().to_rfc3339()),
            error: None,
        }),
    )
}

/// POST /api/analyze - report which fields look sensitive
pub async fn analyze(Json(request): Json<DataRequest>) -> impl IntoResponse {
    let Some(data) = request.data else {
        return (
            StatusCode::BAD_REQUEST,
            Json(AnalyzeResponse {
                success: false,
                sensitive_fields: None,
                total_fields: None,
                error: Some("Missing required field: data".to_string()),
            }),
        );
    };

    let anonymizer = DataAnonymizer::new();
    let fields = anonymizer.sensitive_fields(&data);

    (
        StatusCode::OK,
        Json(AnalyzeResponse {
            success: true,
            total_fields: Some(fields.len()),
            sensitive_fields: Some(fields),
            error: None,
        }),
    )
}

/// Apply the requested item count to a fill result. List-shaped results are
/// re-filled per item so every item is unique; object results get their
/// non-empty lists replicated from the first element.
fn apply_count(
    result: Value,
    count: usize,
    skeleton: &Value,
    repository: Option<&SchemaRepository>,
    merger: &SkeletonMerger,
    provider: &mut ValueProvider,
) -> Value {
    if let Value::Array(items) = &result {
        if !items.is_empty() {
            let refilled = (0..count)
                .map(|_| merger.fill(skeleton, repository, provider))
                .collect();
            return Value::Array(refilled);
        }
        return result;
    }

    if result.is_object() {
        return postprocess::replicate_list_lengths(&result, count);
    }

    result
}

fn item_count(data: &Value) -> usize {
    match data {
        Value::Array(items) => items.len(),
        Value::Object(map) => map
            .values()
            .find_map(|value| value.as_array().map(Vec::len))
            .unwrap_or(1),
        _ => 1,
    }
}
