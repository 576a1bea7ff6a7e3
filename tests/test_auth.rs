use mal_api::MalClient;

use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn token_body() -> serde_json::Value {
    json!({
        "token_type": "Bearer",
        "expires_in": 2_678_400,
        "access_token": "access-abc",
        "refresh_token": "refresh-def",
    })
}

#[tokio::test]
async fn test_exchange_code_posts_form_and_decodes_tokens() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("client_id=test-client-id"))
        .and(body_string_contains("code=the-code"))
        .and(body_string_contains("code_verifier=the-verifier"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = MalClient::from_client_id("test-client-id")
        .unwrap()
        .with_token_url(format!("{}/oauth2/token", server.uri()));

    let tokens = client
        .exchange_code("the-code", "the-verifier", None)
        .await
        .unwrap();

    assert_eq!(tokens.token_type, "Bearer");
    assert_eq!(tokens.expires_in, 2_678_400);
    assert_eq!(tokens.access_token, "access-abc");
    assert_eq!(tokens.refresh_token, "refresh-def");
}

#[tokio::test]
async fn test_refresh_token_posts_form_and_decodes_tokens() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth2/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=old-refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = MalClient::from_client_id("test-client-id")
        .unwrap()
        .with_token_url(format!("{}/oauth2/token", server.uri()));

    let tokens = client.refresh_token("old-refresh").await.unwrap();

    assert_eq!(tokens.access_token, "access-abc");
    assert_eq!(tokens.refresh_token, "refresh-def");
}
