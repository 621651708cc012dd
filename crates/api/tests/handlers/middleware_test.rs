use axum::{http::StatusCode, response::IntoResponse};
use eyre::eyre;
use meets_api::middleware::{
    auth::{IdentityProvider, RemoteIdentityProvider},
    error_handling::AppError,
};
use meets_core::{errors::MeetError, models::identity::Role};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

#[rstest]
#[case(MeetError::Validation("bad".into()), StatusCode::BAD_REQUEST)]
#[case(MeetError::Conflict("taken".into()), StatusCode::CONFLICT)]
#[case(MeetError::Authentication("no token".into()), StatusCode::UNAUTHORIZED)]
#[case(MeetError::Authorization("not yours".into()), StatusCode::FORBIDDEN)]
#[case(MeetError::NotFound("gone".into()), StatusCode::NOT_FOUND)]
#[case(MeetError::Timeout("slow".into()), StatusCode::SERVICE_UNAVAILABLE)]
#[case(MeetError::Infrastructure(eyre!("db down")), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_error_status_mapping(#[case] err: MeetError, #[case] expected: StatusCode) {
    assert_eq!(AppError(err).into_response().status(), expected);
}

#[tokio::test]
async fn test_remote_identity_provider_resolves_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .and(header("authorization", "Bearer good-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ID": "12",
            "Uuid": "doc-7",
            "Email": "doc@example.com",
            "Roles": ["Doctor", "Programmer"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = RemoteIdentityProvider::new(format!("{}/", server.uri()), "Programmer");
    let user = provider.authenticate("good-token").await.unwrap();

    assert_eq!(user.id, "12");
    assert_eq!(user.uuid, "doc-7");
    assert_eq!(user.roles, vec![Role::Member, Role::Elevated]);
    assert!(user.is_elevated());
}

#[tokio::test]
async fn test_role_names_must_match_exactly() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ID": "13",
            "Uuid": "pat-1",
            "Roles": ["programmer", "PROGRAMMER", "Patient"]
        })))
        .mount(&server)
        .await;

    let provider = RemoteIdentityProvider::new(server.uri(), "Programmer");
    let user = provider.authenticate("token").await.unwrap();

    assert_eq!(user.roles, vec![Role::Member, Role::Member, Role::Member]);
    assert!(!user.is_elevated());
}

#[tokio::test]
async fn test_remote_identity_provider_rejects_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let provider = RemoteIdentityProvider::new(server.uri(), "Programmer");
    let err = provider.authenticate("expired").await.unwrap_err();

    assert_eq!(err.to_string(), "invalid token, status: 401");
}
