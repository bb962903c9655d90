//! ApiClient tests against a wiremock server.

use console_client::query::{OrderItem, PageResult, SearchItem};
use console_client::{ApiClient, ClientConfig, ClientError};
use serde::Deserialize;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct User {
    id: String,
    username: String,
    dept_id: Option<String>,
}

fn test_token() -> String {
    "test-auth-token".to_string()
}

fn client_for(server: &MockServer) -> ApiClient {
    let config = ClientConfig::default()
        .with_base_url(format!("{}/api", server.uri()))
        .with_token(test_token());
    ApiClient::new(config).unwrap()
}

#[tokio::test]
async fn test_page_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/user/page"))
        .and(header("Authorization", format!("Bearer {}", test_token())))
        .and(body_json(json!({
            "pageNumber": 1,
            "pageSize": 20,
            "keyword": "adm",
            "searchFields": ["username"],
            "items": [{"field": "status", "op": "eq", "val": 1}],
            "orders": [{"column": "createTime", "asc": false}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "message": "ok",
            "data": {
                "pageNumber": 1,
                "pageSize": 20,
                "totalRow": 1,
                "totalPage": 1,
                "records": [{"id": "1", "username": "admin", "deptId": null}]
            }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let request = client
        .search_request()
        .with_item(SearchItem::eq("status", 1))
        .with_keyword("adm", ["username"])
        .with_order(OrderItem::desc("createTime"));

    let page: PageResult<User> = client.page("/user/page", &request).await.unwrap();
    assert_eq!(page.total_row, 1);
    assert_eq!(
        page.records,
        vec![User {
            id: "1".to_string(),
            username: "admin".to_string(),
            dept_id: None,
        }]
    );
    assert!(!page.has_next());
}

#[tokio::test]
async fn test_list_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/dept/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "data": [{"id": "1", "username": "a", "deptId": "9"}]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let users: Vec<User> = client
        .list("dept/list", &client.search_request())
        .await
        .unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].dept_id.as_deref(), Some("9"));
}

#[tokio::test]
async fn test_get_with_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/dict/items"))
        .and(query_param("type", "sys_user_status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 0,
            "data": ["enabled", "disabled"]
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let items: Vec<String> = client
        .get("/dict/items", &[("type", "sys_user_status")])
        .await
        .unwrap();
    assert_eq!(items, vec!["enabled", "disabled"]);
}

#[tokio::test]
async fn test_envelope_error_code() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/dept/5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 1001,
            "data": null,
            "message": "department has children"
        })))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .delete::<()>("/dept/5")
        .await
        .unwrap_err();
    match err {
        ClientError::Api { code, message } => {
            assert_eq!(code, 1001);
            assert_eq!(message, "department has children");
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_put_and_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/user"))
        .and(body_json(json!({"id": "1", "nickname": "Admin"})))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;

    let err = client_for(&mock_server)
        .put::<_, ()>("/user", &json!({"id": "1", "nickname": "Admin"}))
        .await
        .unwrap_err();
    assert!(err.is_retryable());
    assert_eq!(err.error_code(), "HTTP");
}

#[tokio::test]
async fn test_invalid_request_not_sent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let request = client.search_request().with_keyword("adm", Vec::<String>::new());
    let err = client
        .page::<User>("/user/page", &request)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Query(_)));
}
