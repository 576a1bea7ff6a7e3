use mal_api::auth::Auth;
use mal_api::fields::{AnimeListStatusFields, UserInfoFields};
use mal_api::pagination::{wrap_paged, PagedResponse, Paging};
use mal_api::requests::anime::{AnimeListQuery, UserAnimeListQuery, WatchStatus};
use mal_api::requests::forum::ForumTopicDetailQuery;
use mal_api::requests::Error;
use mal_api::MalClient;

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client() -> MalClient {
    MalClient::from_client_id("test-client-id").unwrap()
}

fn raw_page(
    data: Vec<&str>,
    previous: Option<String>,
    next: Option<String>,
) -> PagedResponse<Vec<String>> {
    PagedResponse {
        data: data.into_iter().map(str::to_owned).collect(),
        paging: Paging { previous, next },
    }
}

#[tokio::test]
async fn test_cursor_fetch_walks_to_the_next_page() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page2"))
        .and(header("X-MAL-CLIENT-ID", "test-client-id"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": ["y"], "paging": {}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let page = wrap_paged(
        raw_page(vec!["x"], None, Some(format!("{}/page2", server.uri()))),
        |data| data,
        Auth::ClientId("test-client-id".to_owned()),
    );

    assert_eq!(page.data, vec!["x".to_owned()]);
    assert!(page.previous.is_none());

    let next = page.next.as_ref().expect("next cursor should be present");
    let second = next.fetch(&client()).await.unwrap();

    assert_eq!(second.data, vec!["y".to_owned()]);
    assert!(second.previous.is_none());
    assert!(second.next.is_none());
}

#[tokio::test]
async fn test_cursor_fetch_surfaces_api_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"error": "not_found", "message": "gone"})),
        )
        .mount(&server)
        .await;

    let page = wrap_paged(
        raw_page(vec!["x"], None, Some(format!("{}/gone", server.uri()))),
        |data| data,
        Auth::ClientId("test-client-id".to_owned()),
    );

    let err = page.next.unwrap().fetch(&client()).await.unwrap_err();

    match err {
        Error::Api {
            status,
            error,
            message,
        } => {
            assert_eq!(status, 404);
            assert_eq!(error, "not_found");
            assert_eq!(message, "gone");
        }
        other => panic!("expected Error::Api, got {other:?}"),
    }
}

#[tokio::test]
async fn test_cursor_fetch_transport_failure_falls_back() {
    // nothing listens here, the connection is refused before any response
    let page = wrap_paged(
        raw_page(vec!["x"], None, Some("http://127.0.0.1:1/next".to_owned())),
        |data| data,
        Auth::ClientId("test-client-id".to_owned()),
    );

    let err = page.next.unwrap().fetch(&client()).await.unwrap_err();

    match err {
        Error::Api {
            status,
            error,
            message,
        } => {
            assert_eq!(status, 500);
            assert_eq!(error, "unknown");
            assert_eq!(message, "error with no response");
        }
        other => panic!("expected the fallback Error::Api, got {other:?}"),
    }
}

#[tokio::test]
async fn test_concurrent_cursor_fetches_are_independent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": ["y"], "paging": {}})),
        )
        .expect(2)
        .mount(&server)
        .await;

    let page = wrap_paged(
        raw_page(vec!["x"], None, Some(format!("{}/page2", server.uri()))),
        |data| data,
        Auth::ClientId("test-client-id".to_owned()),
    );

    let client = client();
    let cursor = page.next.unwrap();

    let (first, second) = tokio::join!(cursor.fetch(&client), cursor.fetch(&client));

    assert_eq!(first.unwrap().data, vec!["y".to_owned()]);
    assert_eq!(second.unwrap().data, vec!["y".to_owned()]);
}

#[tokio::test]
async fn test_search_anime_unwraps_nodes_and_pages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/anime"))
        .and(query_param("q", "chainsaw"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"node": {"id": 1, "title": "a"}},
                {"node": {"id": 2, "title": "b"}}
            ],
            "paging": {"next": format!("{}/anime-page2", server.uri())}
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/anime-page2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"node": {"id": 3, "title": "c"}}],
            "paging": {"previous": format!("{}/anime", server.uri())}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client().with_base_url(server.uri());

    let query = AnimeListQuery::builder().q("chainsaw").build();
    let page = client.search_anime(&query).await.unwrap();

    let titles: Vec<_> = page.data.iter().map(|anime| anime.title.as_str()).collect();
    assert_eq!(titles, ["a", "b"]);
    assert!(page.previous.is_none());

    let second = page.next.unwrap().fetch(&client).await.unwrap();

    assert_eq!(second.data[0].id, 3);
    assert!(second.previous.is_some());
    assert!(second.next.is_none());
}

#[tokio::test]
async fn test_search_anime_surfaces_auth_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/anime"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"error": "unauthorized", "message": "invalid token"})),
        )
        .mount(&server)
        .await;

    let client = client().with_base_url(server.uri());

    let err = client
        .search_anime(&AnimeListQuery::default())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Api { status: 401, .. }));
}

#[tokio::test]
async fn test_user_anime_list_keeps_list_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/@me/animelist"))
        .and(query_param("fields", "list_status{status,score}"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "node": {"id": 1, "title": "a"},
                "list_status": {"status": "watching", "score": 8}
            }],
            "paging": {}
        })))
        .mount(&server)
        .await;

    let client = client().with_base_url(server.uri());

    let query = UserAnimeListQuery::builder()
        .fields(
            mal_api::fields::UserAnimeListFields::builder()
                .list_status(
                    AnimeListStatusFields::builder()
                        .status(true)
                        .score(true)
                        .build(),
                )
                .build(),
        )
        .build();

    let page = client.get_user_anime_list("@me", &query).await.unwrap();

    let entry = &page.data[0];
    assert_eq!(entry.node.title, "a");

    let list_status = entry.list_status.as_ref().unwrap();
    assert_eq!(list_status.status, Some(WatchStatus::Watching));
    assert_eq!(list_status.score, Some(8));
}

#[tokio::test]
async fn test_forum_topic_detail_pages_over_a_single_object() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/forum/topic/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "title": "season finale",
                "posts": [{
                    "id": 7,
                    "number": 1,
                    "created_at": "2021-01-01T00:00:00+00:00",
                    "created_by": {"id": 3, "name": "someone"},
                    "body": "first",
                    "signature": null
                }]
            },
            "paging": {"next": format!("{}/forum/topic/42?offset=100", server.uri())}
        })))
        .mount(&server)
        .await;

    let client = client().with_base_url(server.uri());

    let page = client
        .get_forum_topic_detail(42, &ForumTopicDetailQuery::default())
        .await
        .unwrap();

    assert_eq!(page.data.title, "season finale");
    assert_eq!(page.data.posts.len(), 1);
    assert_eq!(page.data.posts[0].created_by.name.as_deref(), Some("someone"));
    assert!(page.next.is_some());
    assert!(page.previous.is_none());
}

#[tokio::test]
async fn test_bearer_token_is_sent_as_authorization_header() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/@me"))
        .and(query_param("fields", "name"))
        .and(header("Authorization", "Bearer the-access-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42,
            "name": "someone"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client()
        .with_base_url(server.uri())
        .with_token("the-access-token");

    let info = client
        .get_user_info(&UserInfoFields::builder().name(true).build())
        .await
        .unwrap();

    assert_eq!(info.id, 42);
    assert_eq!(info.name, "someone");
}
