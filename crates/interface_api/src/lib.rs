//! HTTP API Layer
//!
//! This crate provides the REST API for policy records using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: policy listing, lookup and creation, plus health probes
//! - **Middleware**: request ids, tracing, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! The router only knows the [`PolicyPort`] trait; the server binary wires
//! in the PostgreSQL adapter and tests wire in the in-memory one.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let app = create_router(Arc::new(PostgresPolicyAdapter::new(pool)), &config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::{
    http::HeaderName,
    middleware as axum_middleware,
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use domain_policy::{PolicyPort, PolicyService};

use crate::config::ApiConfig;
use crate::handlers::{health, policy};
use crate::middleware::{audit_middleware, REQUEST_ID_HEADER};

/// Application state shared across handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub policies: PolicyService,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `port` - Policy store the handlers read and write through
/// * `config` - API configuration; its `api_prefix` is where policy routes mount
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(port: Arc<dyn PolicyPort>, config: &ApiConfig) -> Router {
    let state = AppState {
        policies: PolicyService::new(port),
    };

    // Public routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let api_routes = Router::new()
        .route("/status", get(health::status))
        .route(
            "/policies",
            get(policy::list_policies).post(policy::create_policy),
        )
        .route("/policies/:policy_number", get(policy::get_policy))
        .layer(axum_middleware::from_fn(audit_middleware));

    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .merge(public_routes)
        .nest(&config.api_prefix, api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::new(request_id)),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
