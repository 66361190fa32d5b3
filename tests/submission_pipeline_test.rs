use anyhow::Result;
use chrono::{Duration, SecondsFormat, TimeZone, Utc};
use contact_intake::core::report::render_dashboard;
use contact_intake::{
    AdminDashboard, AdminStats, Field, FormController, FormStatus, RestSubmissionStore,
    SubmissionClient,
};
use httpmock::prelude::*;
use httpmock::Method::HEAD;

const TABLE_PATH: &str = "/rest/v1/contact_submissions";

fn row(id: u32, name: &str, created_at: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "name": name,
        "email": format!("{}@example.com", name.to_lowercase()),
        "company": null,
        "service": "Mobile App Development",
        "budget": "$25,000 - $50,000",
        "message": "We need an app for our field technicians.",
        "created_at": created_at
    })
}

fn client_for(server: &MockServer) -> SubmissionClient<RestSubmissionStore> {
    SubmissionClient::new(RestSubmissionStore::new(
        &server.base_url(),
        "anon-key",
        "contact_submissions",
    ))
}

#[tokio::test]
async fn test_valid_form_inserts_once_then_resets() -> Result<()> {
    let server = MockServer::start();
    let insert_mock = server.mock(|when, then| {
        when.method(POST)
            .path(TABLE_PATH)
            .body_contains("\"email\":\"jane@x.com\"")
            .body_contains("\"company\":null")
            .body_contains("\"budget\":null");
        then.status(201).json_body(serde_json::json!([{
            "id": 1,
            "name": "Jane Doe",
            "email": "jane@x.com",
            "company": null,
            "service": "Website Development",
            "budget": null,
            "message": "Please build me a ten-page site.",
            "created_at": "2026-10-18T09:30:00.000+00:00"
        }]));
    });

    let mut form = FormController::new(client_for(&server))
        .with_success_display(std::time::Duration::from_millis(10));
    form.set_field(Field::Name, "Jane Doe");
    form.set_field(Field::Email, "jane@x.com");
    form.set_field(Field::Service, "Website Development");
    form.set_field(Field::Message, "Please build me a ten-page site.");

    assert_eq!(form.submit().await, &FormStatus::Success);
    insert_mock.assert_hits(1);
    assert_eq!(form.last_submission().and_then(|s| s.id.as_deref()), Some("1"));

    form.finish_success().await;
    assert_eq!(form.status(), &FormStatus::Idle);
    assert!(form.fields().is_empty());
    insert_mock.assert_hits(1);
    Ok(())
}

#[tokio::test]
async fn test_invalid_form_makes_no_request() -> Result<()> {
    let server = MockServer::start();
    let insert_mock = server.mock(|when, then| {
        when.method(POST).path(TABLE_PATH);
        then.status(201).json_body(serde_json::json!([]));
    });

    let mut form = FormController::new(client_for(&server));
    form.set_field(Field::Name, "Jane Doe");
    form.set_field(Field::Email, "jane-at-x.com");
    form.set_field(Field::Service, "Website Development");
    form.set_field(Field::Message, "Hi there");

    assert_eq!(form.submit().await, &FormStatus::Idle);
    assert_eq!(form.errors().len(), 2);
    insert_mock.assert_hits(0);
    Ok(())
}

#[tokio::test]
async fn test_store_rejection_surfaces_submit_error() -> Result<()> {
    let server = MockServer::start();
    let insert_mock = server.mock(|when, then| {
        when.method(POST).path(TABLE_PATH);
        then.status(403).json_body(serde_json::json!({
            "code": "42501",
            "message": "new row violates row-level security policy"
        }));
    });

    let mut form = FormController::new(client_for(&server));
    form.set_field(Field::Name, "Jane Doe");
    form.set_field(Field::Email, "jane@x.com");
    form.set_field(Field::Service, "Other");
    form.set_field(Field::Message, "Please call me back about pricing.");

    assert_eq!(form.submit().await, &FormStatus::Error);
    assert_eq!(form.submit_error(), Some("Failed to submit form"));
    assert_eq!(form.fields().name, "Jane Doe");
    insert_mock.assert_hits(1);
    Ok(())
}

#[tokio::test]
async fn test_dashboard_counts_from_listed_rows() -> Result<()> {
    let now = Utc.with_ymd_and_hms(2026, 10, 18, 15, 0, 0).unwrap();
    let stamp = |ago: Duration| (now - ago).to_rfc3339_opts(SecondsFormat::Millis, true);

    let server = MockServer::start();
    let list_mock = server.mock(|when, then| {
        when.method(GET)
            .path(TABLE_PATH)
            .query_param("order", "created_at.desc");
        then.status(200).json_body(serde_json::json!([
            row(4, "Dana", &stamp(Duration::hours(1))),
            row(3, "Chen", &stamp(Duration::days(2))),
            row(2, "Bola", &stamp(Duration::days(10))),
            row(1, "Ari", &stamp(Duration::days(40))),
        ]));
    });
    let count_mock = server.mock(|when, then| {
        when.method(HEAD).path(TABLE_PATH);
        then.status(200).header("Content-Range", "0-3/4");
    });

    let view = AdminDashboard::new(client_for(&server)).load(&now).await;

    list_mock.assert();
    count_mock.assert();
    assert_eq!(view.error, None);
    assert_eq!(
        view.stats,
        AdminStats {
            total: 4,
            today: 1,
            this_week: 2,
            this_month: 3,
        }
    );
    assert_eq!(view.stored_count, Some(4));
    assert_eq!(view.submissions[0].name, "Dana");
    Ok(())
}

#[tokio::test]
async fn test_dashboard_list_failure_renders_zeroes() -> Result<()> {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(TABLE_PATH);
        then.status(500).body("upstream connect error");
    });
    server.mock(|when, then| {
        when.method(HEAD).path(TABLE_PATH);
        then.status(200).header("Content-Range", "*/12");
    });

    let view = AdminDashboard::new(client_for(&server)).load(&Utc::now()).await;

    assert_eq!(view.error.as_deref(), Some("Failed to fetch submissions"));
    assert_eq!(view.stats, AdminStats::default());
    assert!(view.submissions.is_empty());

    let text = render_dashboard(&view, &Utc);
    assert!(text.contains("! Failed to fetch submissions"));
    assert!(text.contains("Total Submissions: 0"));
    Ok(())
}

#[tokio::test]
async fn test_unreachable_store_reports_transport_error() -> Result<()> {
    // Nothing listens on port 9 (discard) in the test environment.
    let client = SubmissionClient::new(RestSubmissionStore::new(
        "http://127.0.0.1:9",
        "anon-key",
        "contact_submissions",
    ));

    let err = client.list_all().await.unwrap_err();
    assert!(err.message.starts_with("API request failed"), "{}", err.message);
    Ok(())
}
