mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn create_returns_record_without_credential_hash() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/users", server.base_url))
        .json(&json!({
            "name": "Create Case",
            "email": "create-case@example.com",
            "secret": "s3cret-enough"
        }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::CREATED);

    let body = res.json::<Value>().await?;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "Create Case");
    assert_eq!(body["data"]["email"], "create-case@example.com");
    assert!(body["data"]["id"].as_i64().is_some());
    assert!(body["data"].get("password_hash").is_none());
    assert!(body["data"].get("secret").is_none());
    Ok(())
}

#[tokio::test]
async fn invalid_payload_reports_every_offending_field_at_once() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/users", server.base_url))
        .json(&json!({ "name": "", "email": "not-an-email", "secret": "short" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], true);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    let field_errors = body["field_errors"]
        .as_object()
        .expect("field_errors object");
    assert!(field_errors.contains_key("name"));
    assert!(field_errors.contains_key("email"));
    assert!(field_errors.contains_key("secret"));
    Ok(())
}

#[tokio::test]
async fn missing_fields_are_validation_errors_not_framework_rejections() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/users", server.base_url))
        .json(&json!({}))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert_eq!(body["field_errors"].as_object().map(|m| m.len()), Some(3));
    Ok(())
}

#[tokio::test]
async fn duplicate_email_is_a_distinct_client_error() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let payload = json!({
        "name": "First Claim",
        "email": "duplicate-case@example.com",
        "secret": "s3cret-enough"
    });

    let res = client
        .post(format!("{}/users", server.base_url))
        .json(&payload)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .post(format!("{}/users", server.base_url))
        .json(&payload)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body = res.json::<Value>().await?;
    assert_eq!(body["error"], true);
    assert_eq!(body["code"], "DUPLICATE_EMAIL");
    Ok(())
}

#[tokio::test]
async fn protected_routes_reject_missing_or_garbage_tokens() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // No Authorization header at all
    for url in [
        format!("{}/users", server.base_url),
        format!("{}/users/1", server.base_url),
        format!("{}/auth/whoami", server.base_url),
    ] {
        let res = client.get(&url).send().await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "GET {}", url);
        let body = res.json::<Value>().await?;
        assert_eq!(body["code"], "UNAUTHORIZED");
    }

    // Garbage bearer token
    let res = client
        .get(format!("{}/users", server.base_url))
        .bearer_auth("garbage.token.value")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Wrong scheme
    let res = client
        .get(format!("{}/users", server.base_url))
        .header("Authorization", "Basic dXNlcjpwYXNz")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    // Writes are guarded too
    let res = client
        .delete(format!("{}/users/1", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
