//! # Proteus - Schema-Aware Mock Data Generator
//!
//! Proteus fills caller-supplied JSON "skeletons" with realistic synthetic
//! values, optionally constrained by an OpenAPI-like schema, while preserving
//! every field the caller already populated.
//!
//! ## Features
//!
//! - **Skeleton filling**: empty fields (null, blank strings, empty
//!   lists/objects, "@" sentinels) mark generation points; everything else is
//!   kept verbatim
//! - **Schema constraints**: `components.schemas` / `definitions` documents
//!   drive types, bounds, enums, patterns and nested shapes
//! - **Name heuristics**: field names pick realistic categories (emails,
//!   phone numbers, addresses, dates) and infer types when no schema applies
//! - **Deterministic seeding**: one seeded provider per session reproduces
//!   output byte for byte
//! - **Anonymization**: keyword-driven substitution over existing documents
//! - **HTTP API and CLI**: thin boundaries over the same engine
//!
//! ## Quick Start
//!
//! ```rust
//! use proteus::adapters::skeleton_merger::SkeletonMerger;
//! use proteus::adapters::value_provider::ValueProvider;
//! use serde_json::json;
//!
//! let mut provider = ValueProvider::new();
//! provider.set_seed(42);
//!
//! let merger = SkeletonMerger::new();
//! let skeleton = json!({"user": {"email": "", "age": null}});
//! let filled = merger.fill(&skeleton, None, &mut provider);
//!
//! assert!(filled["user"]["email"].is_string());
//! assert!(filled["user"]["age"].is_i64());
//! ```
//!
//! ## Architecture
//!
//! - **Domain**: constraint sets, field types, violations
//! - **Adapters**: the value provider, schema repository and skeleton merger,
//!   plus the anonymizer and HTTP handlers
//! - **Config**: configuration management

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;

use crate::adapters::api_handler::{self, ApiState};
use crate::adapters::health_handler::HealthHandler;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Creates the Axum application router with all endpoints configured.
///
/// # Arguments
///
/// * `settings` - Shared application settings
///
/// # Returns
///
/// Configured Axum Router
pub fn create_app(settings: Arc<RwLock<crate::config::Settings>>) -> Router {
    let health_handler = Arc::new(HealthHandler::new());

    let api_state = ApiState { settings };

    let api_router = Router::new()
        .route("/api/generate", post(api_handler::generate))
        .route("/api/anonymize", post(api_handler::anonymize))
        .route("/api/analyze", post(api_handler::analyze))
        .with_state(api_state);

    let router = Router::new()
        .route(
            "/health",
            get({
                let handler = health_handler.clone();
                move || {
                    let h = handler.clone();
                    async move { h.health().await }
                }
            }),
        )
        .route(
            "/health/live",
            get({
                let handler = health_handler.clone();
                move || {
                    let h = handler.clone();
                    async move { h.live().await }
                }
            }),
        )
        .merge(api_router);

    router.layer(
        tower_http::cors::CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any),
    )
}
