//! Policy handlers

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use tracing::info;
use validator::Validate;

use domain_policy::Policy;

use crate::dto::policy::*;
use crate::{error::ApiError, AppState};

/// Lists policies matching the query, one page at a time
pub async fn list_policies(
    State(state): State<AppState>,
    params: Result<Query<PolicyListParams>, QueryRejection>,
) -> Result<Json<PolicyListResponse>, ApiError> {
    let Query(params) = params?;
    let (filter, page) = params.into_query()?;

    let page = state.policies.search(&filter, page).await;
    Ok(Json(page.into()))
}

/// Gets a policy by its number
pub async fn get_policy(
    State(state): State<AppState>,
    Path(policy_number): Path<String>,
) -> Result<Json<PolicyResponse>, ApiError> {
    state
        .policies
        .find_by_number(&policy_number)
        .await?
        .map(|policy| Json(policy.into()))
        .ok_or_else(|| ApiError::NotFound(format!("Policy with number {policy_number} not found")))
}

/// Creates a policy
pub async fn create_policy(
    State(state): State<AppState>,
    request: Result<Json<CreatePolicyRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<PolicyResponse>), ApiError> {
    let Json(request) = request?;
    request.validate()?;

    let created = state.policies.create(Policy::from(request)).await?;
    info!(policy_number = %created.policy_number, "Policy created");

    Ok((StatusCode::CREATED, Json(created.into())))
}
