//! HTTP contract tests against the in-memory policy port

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use domain_policy::ports::mock::MockPolicyPort;
use domain_policy::{Address, Person, Policy, PolicyType};
use interface_api::config::ApiConfig;
use interface_api::create_router;
use interface_api::dto::policy::{PolicyListResponse, PolicyResponse};
use interface_api::error::ErrorResponse;

fn holder(id_number: &str) -> Person {
    Person {
        id_number: id_number.to_string(),
        first_name: "Ana".to_string(),
        last_name: "Costa".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1985, 4, 12).unwrap(),
        email: "ana.costa@example.com".to_string(),
        phone: "+351 910 000 000".to_string(),
        address: Address::new("Rua Augusta 1", "Lisboa", "1100-048", "PT"),
    }
}

fn stored_policy(number: &str, policy_type: PolicyType, minutes: i64) -> Policy {
    let effective = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut policy = Policy::new(
        number,
        policy_type,
        effective,
        effective + Duration::days(365),
        holder(&format!("ID-{number}")),
    );
    policy.created_at = effective + Duration::minutes(minutes);
    policy
}

async fn server_with(port: Arc<MockPolicyPort>) -> TestServer {
    let app = create_router(port, &ApiConfig::default());
    TestServer::new(app).unwrap()
}

async fn seeded_server() -> (TestServer, Arc<MockPolicyPort>) {
    let port = Arc::new(
        MockPolicyPort::with_policies(vec![
            stored_policy("AUTO-1", PolicyType::Auto, 1),
            stored_policy("HOME-1", PolicyType::Home, 2),
            stored_policy("AUTO-2", PolicyType::Auto, 3),
            stored_policy("HOME-2", PolicyType::Home, 4),
            stored_policy("AUTO-3", PolicyType::Auto, 5),
        ])
        .await,
    );
    (server_with(port.clone()).await, port)
}

fn create_body(number: &str) -> Value {
    json!({
        "policy_number": number,
        "type": "HOME",
        "effective_date": "2024-06-01T00:00:00Z",
        "expiration_date": "2025-06-01T00:00:00Z",
        "policyholder": {
            "id_number": "12345678",
            "first_name": "Rui",
            "last_name": "Silva",
            "date_of_birth": "1979-11-02",
            "email": "rui.silva@example.com",
            "phone": "+351 920 000 000",
            "address": {
                "street": "Avenida da Liberdade 10",
                "city": "Lisboa",
                "zip_code": "1250-096",
                "country": "PT"
            }
        },
        "coverages": [
            {
                "type": "FIRE",
                "description": "Fire and smoke damage",
                "limit": "250000.00",
                "deductible": "500.00",
                "exclusions": ["arson"]
            },
            {
                "type": "FLOOD",
                "description": "Flood damage",
                "deductible": "1000.00"
            }
        ],
        "premium": {
            "amount": "420.50",
            "frequency": "MONTHLY",
            "method": "BANK_TRANSFER"
        }
    })
}

#[tokio::test]
async fn test_filtered_page_reports_total_count() {
    let (server, _) = seeded_server().await;

    let response = server
        .get("/api/v1/policies")
        .add_query_param("policy-type", "AUTO")
        .add_query_param("page", 1)
        .add_query_param("page-size", 2)
        .await;

    response.assert_status_ok();
    let body: PolicyListResponse = response.json();
    assert_eq!(body.total_count, 3);
    let numbers: Vec<_> = body.policies.iter().map(|p| p.policy_number.as_str()).collect();
    assert_eq!(numbers, ["AUTO-3", "AUTO-2"]);
}

#[tokio::test]
async fn test_last_page_holds_the_remainder() {
    let (server, _) = seeded_server().await;

    let response = server
        .get("/api/v1/policies")
        .add_query_param("policy-type", "AUTO")
        .add_query_param("page", 2)
        .add_query_param("page-size", 2)
        .await;

    let body: PolicyListResponse = response.json();
    assert_eq!(body.total_count, 3);
    assert_eq!(body.policies.len(), 1);
    assert_eq!(body.policies[0].policy_number, "AUTO-1");
}

#[tokio::test]
async fn test_non_positive_paging_falls_back_to_defaults() {
    let (server, _) = seeded_server().await;

    let response = server
        .get("/api/v1/policies")
        .add_query_param("page", 0)
        .add_query_param("page-size", -5)
        .await;

    let body: PolicyListResponse = response.json();
    assert_eq!(body.total_count, 5);
    assert_eq!(body.policies.len(), 5);
}

#[tokio::test]
async fn test_date_filter_accepts_plain_dates() {
    let (server, _) = seeded_server().await;

    let response = server
        .get("/api/v1/policies")
        .add_query_param("effective-date-from", "2024-01-01")
        .add_query_param("effective-date-to", "2024-01-01")
        .await;

    let body: PolicyListResponse = response.json();
    assert_eq!(body.total_count, 5);

    let response = server
        .get("/api/v1/policies")
        .add_query_param("effective-date-from", "2024-01-02")
        .await;

    let body: PolicyListResponse = response.json();
    assert_eq!(body.total_count, 0);
}

#[tokio::test]
async fn test_bad_query_parameters_are_rejected() {
    let (server, _) = seeded_server().await;

    server
        .get("/api/v1/policies")
        .add_query_param("expiration-date-from", "soon")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    server
        .get("/api/v1/policies")
        .add_query_param("page", "first")
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    server
        .get("/api/v1/policies")
        .add_query_param("policy-type", "SPACESHIP")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_listing_degrades_to_empty_page_when_store_is_down() {
    let (server, port) = seeded_server().await;
    port.set_unavailable(true);

    let response = server.get("/api/v1/policies").await;

    response.assert_status_ok();
    let body: PolicyListResponse = response.json();
    assert_eq!(body.total_count, 0);
    assert!(body.policies.is_empty());
}

#[tokio::test]
async fn test_get_policy_by_number() {
    let (server, _) = seeded_server().await;

    let response = server.get("/api/v1/policies/HOME-2").await;

    response.assert_status_ok();
    let body: PolicyResponse = response.json();
    assert_eq!(body.policy_number, "HOME-2");
    assert_eq!(body.policy_type, PolicyType::Home);
    assert_eq!(body.policyholder.id_number, "ID-HOME-2");
}

#[tokio::test]
async fn test_unknown_policy_is_not_found() {
    let (server, _) = seeded_server().await;

    let response = server.get("/api/v1/policies/DOES-NOT-EXIST").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: ErrorResponse = response.json();
    assert_eq!(body.detail, "Policy with number DOES-NOT-EXIST not found");
}

#[tokio::test]
async fn test_lookup_failure_is_internal_error() {
    let (server, port) = seeded_server().await;
    port.set_unavailable(true);

    let response = server.get("/api/v1/policies/HOME-2").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: ErrorResponse = response.json();
    assert_eq!(body.detail, "Internal server error");
}

#[tokio::test]
async fn test_create_then_duplicate_conflicts() {
    let port = Arc::new(MockPolicyPort::new());
    let server = server_with(port.clone()).await;

    let response = server.post("/api/v1/policies").json(&create_body("POL-1")).await;

    response.assert_status(StatusCode::CREATED);
    let created: PolicyResponse = response.json();
    assert_eq!(created.policy_number, "POL-1");
    assert_eq!(created.coverages.len(), 2);
    assert_eq!(created.coverages[0].coverage_type, "FIRE");
    assert_eq!(created.coverages[1].limit, None);
    assert_eq!(created.premium.as_ref().map(|p| p.amount), Some(dec!(420.50)));

    server
        .post("/api/v1/policies")
        .json(&create_body("POL-1"))
        .await
        .assert_status(StatusCode::CONFLICT);

    assert_eq!(port.len().await, 1);

    let fetched: PolicyResponse = server.get("/api/v1/policies/POL-1").await.json();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_invalid_bodies_are_unprocessable() {
    let server = server_with(Arc::new(MockPolicyPort::new())).await;

    let mut bad_email = create_body("POL-2");
    bad_email["policyholder"]["email"] = json!("not-an-email");
    server
        .post("/api/v1/policies")
        .json(&bad_email)
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let mut zero_premium = create_body("POL-3");
    zero_premium["premium"]["amount"] = json!("0");
    server
        .post("/api/v1/policies")
        .json(&zero_premium)
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let mut inverted = create_body("POL-4");
    inverted["expiration_date"] = json!("2024-01-01T00:00:00Z");
    server
        .post("/api/v1/policies")
        .json(&inverted)
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    let mut missing_holder = create_body("POL-5");
    missing_holder
        .as_object_mut()
        .unwrap()
        .remove("policyholder");
    server
        .post("/api/v1/policies")
        .json(&missing_holder)
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_status_and_health_probes() {
    let (server, port) = seeded_server().await;

    let status: Value = server.get("/api/v1/status").await.json();
    assert_eq!(status, json!({ "msg": "OK" }));

    server.get("/health").await.assert_status_ok();
    server.get("/health/ready").await.assert_status_ok();

    port.set_unavailable(true);
    server
        .get("/health/ready")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_responses_carry_a_request_id() {
    let (server, _) = seeded_server().await;

    let response = server.get("/api/v1/status").await;

    assert!(response.headers().get("x-request-id").is_some());
}

#[tokio::test]
async fn test_policy_routes_mount_under_configured_prefix() {
    let port = Arc::new(
        MockPolicyPort::with_policies(vec![stored_policy("AUTO-1", PolicyType::Auto, 1)]).await,
    );
    let config = ApiConfig {
        api_prefix: "/records".to_string(),
        ..ApiConfig::default()
    };
    let server = TestServer::new(create_router(port, &config)).unwrap();

    server.get("/records/policies/AUTO-1").await.assert_status_ok();
    server
        .get("/api/v1/policies/AUTO-1")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server.get("/health").await.assert_status_ok();
}
