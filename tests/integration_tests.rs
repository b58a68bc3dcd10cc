//! Integration tests using mock HTTP server
//!
//! Tests the full end-to-end flow: YAML config → client → reqwest transport
//! → paginated, token-refreshing requests → mapped records

use async_trait::async_trait;
use lms_client::auth::{AccessTokenListener, INVALID_ACCESS_TOKEN};
use lms_client::{CallOptions, ClientConfig, Credentials, Error, LmsClient, Operation};
use serde_json::json;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Helpers
// ============================================================================

fn credentials(host: &str, access_token: &str) -> Credentials {
    Credentials::new(host, "client-1", "secret-1", access_token, "refresh-1")
}

fn link(base: &str, page: u32, total: u32) -> String {
    let mut links = vec![format!("<{base}?page={page}&per_page=1>; rel=\"current\"")];
    if page < total {
        links.push(format!(
            "<{base}?page={}&per_page=1>; rel=\"next\"",
            page + 1
        ));
    }
    if page > 1 {
        links.push(format!(
            "<{base}?page={}&per_page=1>; rel=\"prev\"",
            page - 1
        ));
    }
    links.push(format!("<{base}?page=1&per_page=1>; rel=\"first\""));
    links.push(format!("<{base}?page={total}&per_page=1>; rel=\"last\""));
    links.join(",")
}

fn expired() -> ResponseTemplate {
    ResponseTemplate::new(401)
        .insert_header("Status", "401 Unauthorized")
        .set_body_json(json!({"errors": [{"message": INVALID_ACCESS_TOKEN}]}))
}

#[derive(Default)]
struct TokenStore {
    tokens: Mutex<Vec<String>>,
}

#[async_trait]
impl AccessTokenListener for TokenStore {
    async fn on_refresh(&self, access_token: &str) -> anyhow::Result<()> {
        self.tokens.lock().unwrap().push(access_token.to_string());
        Ok(())
    }
}

async fn mount_exam_pages(server: &MockServer, token: &str) {
    let base = format!("{}/api/v1/courses/4/quizzes", server.uri());
    for page in 1..=3u32 {
        Mock::given(method("GET"))
            .and(path("/api/v1/courses/4/quizzes"))
            .and(query_param("page", page.to_string()))
            .and(header("Authorization", format!("Bearer {token}").as_str()))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Link", link(&base, page, 3).as_str())
                    .set_body_json(json!([{"id": page, "title": format!("Quiz {page}")}])),
            )
            .expect(1)
            .mount(server)
            .await;
    }
}

// ============================================================================
// Pagination
// ============================================================================

#[tokio::test]
async fn test_collects_every_page() {
    let server = MockServer::start().await;
    mount_exam_pages(&server, "access-1").await;

    let client = LmsClient::from_config(ClientConfig::default()).unwrap();
    let options = CallOptions::new(credentials(&server.uri(), "access-1"))
        .page(1)
        .per_page(1)
        .param("courseId", 4);

    let exams = client.course_exams(&options, None).await.unwrap();

    let ids: Vec<_> = exams.iter().map(|e| e["id"].clone()).collect();
    assert_eq!(ids, vec![json!(1), json!(2), json!(3)]);
}

#[tokio::test]
async fn test_cursor_navigation() {
    let server = MockServer::start().await;
    let base = format!("{}/api/v1/courses/4/quizzes", server.uri());
    for page in 1..=3u32 {
        Mock::given(method("GET"))
            .and(path("/api/v1/courses/4/quizzes"))
            .and(query_param("page", page.to_string()))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("Link", link(&base, page, 3).as_str())
                    .set_body_json(json!([{"id": page}])),
            )
            .mount(&server)
            .await;
    }

    let client = LmsClient::from_config(ClientConfig::default()).unwrap();
    let options = CallOptions::new(credentials(&server.uri(), "access-1"))
        .page(1)
        .per_page(1)
        .param("courseId", 4);

    let mut cursor = client
        .list(Operation::CourseExams, &options, None)
        .await
        .unwrap();
    assert_eq!(cursor.size().unwrap(), 3);

    // First next() hands out the page already fetched
    assert_eq!(cursor.next().await.unwrap().results, json!([{"id": 1}]));
    assert_eq!(cursor.next().await.unwrap().results, json!([{"id": 2}]));
    assert_eq!(cursor.size().unwrap(), 2);

    assert_eq!(cursor.last().await.unwrap().results, json!([{"id": 3}]));
    assert!(!cursor.has_next());
    assert!(matches!(
        cursor.next().await.unwrap_err(),
        Error::NoSuchPage { .. }
    ));

    assert_eq!(cursor.first().await.unwrap().results, json!([{"id": 1}]));
    assert!(matches!(
        cursor.prev().await.unwrap_err(),
        Error::NoSuchPage { .. }
    ));
}

// ============================================================================
// Token refresh
// ============================================================================

#[tokio::test]
async fn test_refresh_mid_collection() {
    let server = MockServer::start().await;
    let base = format!("{}/api/v1/courses/4/quizzes", server.uri());

    Mock::given(method("GET"))
        .and(path("/api/v1/courses/4/quizzes"))
        .and(query_param("page", "1"))
        .and(header("Authorization", "Bearer stale"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Link", link(&base, 1, 2).as_str())
                .set_body_json(json!([{"id": 1}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/courses/4/quizzes"))
        .and(query_param("page", "2"))
        .and(header("Authorization", "Bearer stale"))
        .respond_with(expired())
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/login/oauth2/token"))
        .and(query_param("client_id", "client-1"))
        .and(query_param("client_secret", "secret-1"))
        .and(query_param("refresh_token", "refresh-1"))
        .and(query_param("grant_type", "refresh_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "fresh"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/courses/4/quizzes"))
        .and(query_param("page", "2"))
        .and(header("Authorization", "Bearer fresh"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Link", link(&base, 2, 2).as_str())
                .set_body_json(json!([{"id": 2}])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = LmsClient::from_config(ClientConfig::default()).unwrap();
    let options = CallOptions::new(credentials(&server.uri(), "stale"))
        .page(1)
        .per_page(1)
        .param("courseId", 4);
    let store = Arc::new(TokenStore::default());

    let exams = client
        .course_exams(&options, Some(store.clone()))
        .await
        .unwrap();

    assert_eq!(exams, vec![json!({"id": 1}), json!({"id": 2})]);
    assert_eq!(*store.tokens.lock().unwrap(), vec!["fresh".to_string()]);
}

#[tokio::test]
async fn test_failed_refresh_is_fatal() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/courses/4"))
        .respond_with(expired())
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/login/oauth2/token"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "invalid_grant"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = LmsClient::from_config(ClientConfig::default()).unwrap();
    let options = CallOptions::new(credentials(&server.uri(), "stale")).param("courseId", 4);

    let err = client.get_course_details(&options, None).await.unwrap_err();
    assert!(matches!(err, Error::TokenRefresh { .. }));
}

#[tokio::test]
async fn test_other_failures_are_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/courses/4"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"errors": [{"message": "The specified resource does not exist."}]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = LmsClient::from_config(ClientConfig::default()).unwrap();
    let options = CallOptions::new(credentials(&server.uri(), "access-1")).param("courseId", 4);

    let err = client.get_course_details(&options, None).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(!err.is_unauthorized());
}

// ============================================================================
// Enrollments
// ============================================================================

#[tokio::test]
async fn test_course_enrollments_end_to_end() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/courses/4/enrollments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"user_id": 1, "course_id": 4, "enrollment_state": "active",
             "role": "StudentEnrollment", "user": {"id": 1, "name": "Grace Hopper"}}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/courses/4/users"))
        .and(query_param("include[]", "email"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Grace Hopper", "email": "grace@example.com"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::from_yaml_str("http:\n  timeout_secs: 5\n").unwrap();
    let client = LmsClient::from_config(config).unwrap();
    let options = CallOptions::new(credentials(&server.uri(), "access-1")).param("courseId", 4);

    let enrollments = client.course_enrollments(&options, None).await.unwrap();

    assert_eq!(
        enrollments,
        vec![json!({
            "firstName": "Grace",
            "lastName": "Hopper",
            "userId": 1,
            "courseId": 4,
            "emailAddress": "grace@example.com",
            "enrollmentState": "active",
            "role": "StudentEnrollment",
            "rootAccountId": null,
            "sisUserId": null
        })]
    );
}
