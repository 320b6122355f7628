use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{Local, NaiveDate};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use taskdesk::api::ApiClient;
use taskdesk::error::ErrorCode;
use taskdesk::models::due_date::utc_instant;
use taskdesk::models::{
    LoginRequest, NewReminder, PasswordChange, Priority, RegisterRequest, Role, SortDirection,
    SortField, TaskDraft, TaskQuery, TaskStatus,
};
use taskdesk::session::Session;

// ─── helpers ───────────────────────────────────────────────────────

fn token_for(username: &str) -> String {
    let payload = URL_SAFE_NO_PAD.encode(json!({ "sub": username }).to_string());
    format!("eyJhbGciOiJIUzI1NiJ9.{payload}.signature")
}

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let client = ApiClient::new(
        &format!("{}/api", server.uri()),
        Session::with_token(token_for("alice")),
    )
    .unwrap();
    (server, client)
}

fn page_body(ids: &[i64], number: u32, total_elements: u64, total_pages: u32) -> serde_json::Value {
    let content: Vec<_> = ids
        .iter()
        .map(|id| json!({ "id": id, "title": format!("task {id}"), "status": "PENDING", "priority": "LOW" }))
        .collect();
    json!({
        "content": content,
        "number": number,
        "size": 5,
        "totalElements": total_elements,
        "totalPages": total_pages
    })
}

// ─── 1. task listing ───────────────────────────────────────────────

#[tokio::test]
async fn test_list_tasks_sends_paging_filters_and_username() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .and(query_param("page", "0"))
        .and(query_param("size", "5"))
        .and(query_param("sortBy", "createdAt"))
        .and(query_param("sortDir", "desc"))
        .and(query_param("status", "COMPLETED"))
        .and(query_param("username", "alice"))
        .and(header("Authorization", format!("Bearer {}", token_for("alice")).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[1, 2], 0, 2, 1)))
        .expect(1)
        .mount(&server)
        .await;

    let query = TaskQuery {
        status: Some(TaskStatus::Completed),
        ..TaskQuery::default()
    };
    let page = client.list_tasks(&query).await.unwrap();
    assert_eq!(page.content.len(), 2);
    assert_eq!(page.total_elements, 2);
}

#[tokio::test]
async fn test_list_tasks_omits_all_filters() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[], 0, 0, 0)))
        .mount(&server)
        .await;

    client.list_tasks(&TaskQuery::default()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap_or_default().to_string();
    assert!(!query.contains("status="), "{query}");
    assert!(!query.contains("priority="), "{query}");
}

#[tokio::test]
async fn test_username_param_can_be_disabled() {
    let (server, client) = setup().await;
    let client = client.with_username_param(false);
    Mock::given(method("GET"))
        .and(path("/api/tasks/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    client.all_tasks().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].url.query().is_none());
}

#[tokio::test]
async fn test_due_dates_in_both_wire_shapes() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "title": "iso", "status": "PENDING", "priority": "HIGH", "dueDate": "2024-06-15T10:30:00" },
            { "id": 2, "title": "tuple", "status": "IN_PROGRESS", "priority": "LOW", "dueDate": [2024, 6, 15, 10, 30] },
            { "id": 3, "title": "none", "status": "COMPLETED", "priority": "MEDIUM", "dueDate": null }
        ])))
        .mount(&server)
        .await;

    let tasks = client.all_tasks().await.unwrap();
    let expected = NaiveDate::from_ymd_opt(2024, 6, 15)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap();
    assert_eq!(tasks[0].due_date, Some(expected));
    assert_eq!(tasks[1].due_date, Some(expected));
    assert_eq!(tasks[2].due_date, None);
    assert_eq!(tasks[1].status, TaskStatus::InProgress);
}

#[tokio::test]
async fn test_tasks_between_formats_range() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/calendar"))
        .and(query_param("start", "2024-02-01T00:00:00"))
        .and(query_param("end", "2024-02-29T23:59:59"))
        .and(query_param("username", "alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let start = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap().and_hms_opt(23, 59, 59).unwrap();
    assert!(client.tasks_between(start, end).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_and_admin_paging() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/search"))
        .and(query_param("keyword", "report"))
        .and(query_param("page", "1"))
        .and(query_param("size", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[7], 1, 11, 2)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/admin/all"))
        .and(query_param("sortBy", "priority"))
        .and(query_param("sortDir", "asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_body(&[1], 0, 1, 1)))
        .expect(1)
        .mount(&server)
        .await;

    let found = client.search_tasks("report", 1, 10).await.unwrap();
    assert_eq!(found.number, 1);
    assert_eq!(found.content[0].id, 7);

    let all = client
        .admin_tasks(0, 10, SortField::Priority, SortDirection::Asc)
        .await
        .unwrap();
    assert_eq!(all.total_pages, 1);
}

// ─── 2. task mutations ─────────────────────────────────────────────

#[tokio::test]
async fn test_create_sends_draft_and_returns_task() {
    let (server, client) = setup().await;
    Mock::given(method("POST"))
        .and(path("/api/tasks"))
        .and(body_json(json!({
            "title": "Write report",
            "description": null,
            "priority": "HIGH",
            "dueDate": "2024-06-01T09:00:00"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": 42, "title": "Write report", "status": "PENDING", "priority": "HIGH",
            "dueDate": "2024-06-01T09:00:00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut draft = TaskDraft::new("Write report");
    draft.priority = Priority::High;
    draft.due_date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(9, 0, 0);
    let task = client.create_task(&draft).await.unwrap();
    assert_eq!(task.id, 42);
    assert_eq!(task.priority, Priority::High);
}

#[tokio::test]
async fn test_blank_title_is_rejected_before_sending() {
    let (server, client) = setup().await;
    let e = client.create_task(&TaskDraft::new("   ")).await.unwrap_err();
    assert_eq!(e.code, ErrorCode::ValidationError);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_status_archive_and_delete() {
    let (server, client) = setup().await;
    Mock::given(method("PUT"))
        .and(path("/api/tasks/5/status"))
        .and(query_param("status", "IN_PROGRESS"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 5, "title": "t", "status": "IN_PROGRESS", "priority": "LOW"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/tasks/5/archive"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/tasks/5"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let task = client.update_task_status(5, TaskStatus::InProgress).await.unwrap();
    assert_eq!(task.status, TaskStatus::InProgress);
    client.archive_task(5).await.unwrap();
    client.delete_task(5).await.unwrap();
}

// ─── 3. failures ───────────────────────────────────────────────────

#[tokio::test]
async fn test_unauthorized_and_not_found() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/overdue"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/99"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Task not found"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/admin/users"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let e = client.overdue_tasks().await.unwrap_err();
    assert_eq!(e.code, ErrorCode::Unauthorized);

    let e = client.get_task(99).await.unwrap_err();
    assert_eq!(e.code, ErrorCode::NotFound);
    assert!(e.message.contains("Task not found"));

    let e = client.users().await.unwrap_err();
    assert_eq!(e.code, ErrorCode::Unauthorized);
}

#[tokio::test]
async fn test_server_error_and_bad_body() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/archived"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/tasks/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let e = client.archived_tasks().await.unwrap_err();
    assert_eq!(e.code, ErrorCode::HttpError);

    let e = client.get_task(1).await.unwrap_err();
    assert_eq!(e.code, ErrorCode::DecodeError);
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    // Nothing listens on the discard port.
    let client = ApiClient::new("http://127.0.0.1:9/api", Session::in_memory()).unwrap();
    let e = client.all_tasks().await.unwrap_err();
    assert_eq!(e.code, ErrorCode::TransportError);
}

// ─── 4. session ────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_stores_token_for_later_requests() {
    let server = MockServer::start().await;
    let dir = TempDir::new().unwrap();
    let session = Session::file(dir.path().join("session.json"));
    let client = ApiClient::new(&format!("{}/api", server.uri()), session.clone()).unwrap();

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "username": "bob", "password": "secret1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": token_for("bob"),
            "username": "bob",
            "role": "USER"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users/me"))
        .and(header("Authorization", format!("Bearer {}", token_for("bob")).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 3, "username": "bob", "email": "bob@example.com", "role": "USER"
        })))
        .expect(1)
        .mount(&server)
        .await;

    // No token yet: nothing sent.
    assert!(session.token().is_none());

    client
        .login(&LoginRequest {
            username: "bob".into(),
            password: "secret1".into(),
        })
        .await
        .unwrap();
    assert_eq!(session.current_username().as_deref(), Some("bob"));

    // A second client over the same file sees the token too.
    let other = ApiClient::new(
        &format!("{}/api", server.uri()),
        Session::file(dir.path().join("session.json")),
    )
    .unwrap();
    let me = other.current_user().await.unwrap();
    assert_eq!(me.username, "bob");

    client.logout().unwrap();
    assert!(session.token().is_none());
}

#[tokio::test]
async fn test_requests_without_token_have_no_auth_header() {
    let server = MockServer::start().await;
    let client = ApiClient::new(&format!("{}/api", server.uri()), Session::in_memory()).unwrap();
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User registered"))
        .mount(&server)
        .await;

    let request = RegisterRequest {
        username: "carol".into(),
        email: "carol@example.com".into(),
        password: "secret1".into(),
    };
    client.register(&request).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_failed_login_keeps_previous_token() {
    let server = MockServer::start().await;
    let session = Session::with_token("old-token");
    let client = ApiClient::new(&format!("{}/api", server.uri()), session.clone()).unwrap();
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Bad credentials"))
        .mount(&server)
        .await;

    let e = client
        .login(&LoginRequest {
            username: "bob".into(),
            password: "wrong".into(),
        })
        .await
        .unwrap_err();
    assert_eq!(e.code, ErrorCode::Unauthorized);
    assert_eq!(session.token().as_deref(), Some("old-token"));
}

// ─── 5. profile / admin / reminders ────────────────────────────────

#[tokio::test]
async fn test_password_change_and_role_update() {
    let (server, client) = setup().await;
    Mock::given(method("PUT"))
        .and(path("/api/users/me/password"))
        .and(body_json(json!({ "currentPassword": "old-pass", "newPassword": "new-pass" })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/api/admin/users/8/role"))
        .and(query_param("role", "ADMIN"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let change = PasswordChange::confirmed("old-pass".into(), "new-pass".into(), "new-pass").unwrap();
    client.change_password(&change).await.unwrap();
    client.update_user_role(8, Role::Admin).await.unwrap();
}

#[tokio::test]
async fn test_reminders() {
    let (server, client) = setup().await;
    let eight_am = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(8, 0, 0).unwrap();
    let sent_as = utc_instant::from_local_in(eight_am, &Local);
    assert!(sent_as.ends_with(".000Z"));
    Mock::given(method("POST"))
        .and(path("/api/reminders"))
        .and(body_json(json!({ "taskId": 4, "reminderTime": sent_as })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 11, "taskId": 4, "reminderTime": [2024, 6, 1, 8, 0], "sent": false
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/reminders/task/4"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 11, "taskId": 4, "reminderTime": "2024-06-01T08:00:00", "sent": true }
        ])))
        .mount(&server)
        .await;

    let created = client
        .create_reminder(&NewReminder {
            task_id: 4,
            reminder_time: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(8, 0, 0),
        })
        .await
        .unwrap();
    assert_eq!(created.id, 11);
    assert_eq!(created.reminder_time, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(8, 0, 0));

    let reminders = client.reminders_for_task(4).await.unwrap();
    assert!(reminders[0].sent);

    let e = client
        .create_reminder(&NewReminder {
            task_id: 4,
            reminder_time: None,
        })
        .await
        .unwrap_err();
    assert_eq!(e.code, ErrorCode::ValidationError);
}
