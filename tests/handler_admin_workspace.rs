mod common;

use axum::http::{StatusCode, header};
use axum_test::TestServer;

async fn session(server: &TestServer) -> axum::http::HeaderValue {
    common::cookie_header("admin_session", &common::login(server).await)
}

#[tokio::test]
async fn test_added_skill_shows_notice_once() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state);
    let cookie = session(&server).await;

    let response = server
        .post("/admin/skills")
        .add_header(header::COOKIE, cookie.clone())
        .form(&[
            ("name", "Zig"),
            ("category", "Backend"),
            ("proficiency", "40"),
            ("learning", "on"),
        ])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), "/admin/skills");

    let html = server
        .get("/admin/skills")
        .add_header(header::COOKIE, cookie.clone())
        .await
        .text();
    assert!(html.contains("Zig"));
    assert!(html.contains("Skill added"));

    let again = server
        .get("/admin/skills")
        .add_header(header::COOKIE, cookie)
        .await
        .text();
    assert!(again.contains("Zig"));
    assert!(!again.contains("Skill added"));
}

#[tokio::test]
async fn test_malformed_proficiency_becomes_error_notice() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state);
    let cookie = session(&server).await;

    server
        .post("/admin/skills")
        .add_header(header::COOKIE, cookie.clone())
        .form(&[("name", "Zig"), ("category", "Backend"), ("proficiency", "lots")])
        .await
        .assert_status(StatusCode::SEE_OTHER);

    let html = server
        .get("/admin/skills")
        .add_header(header::COOKIE, cookie)
        .await
        .text();
    assert!(html.contains("Proficiency must be between 0 and 100"));
    assert!(html.contains("notice error"));
}

#[tokio::test]
async fn test_edits_are_isolated_per_session() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state.clone());
    let first = session(&server).await;
    let second = session(&server).await;

    server
        .post("/admin/content/text")
        .add_header(header::COOKIE, first.clone())
        .form(&[
            ("domain", "cs"),
            ("tagline", "Edited tagline for review"),
            ("about", "Edited about"),
        ])
        .await
        .assert_status(StatusCode::SEE_OTHER);

    let mine = server
        .get("/admin/content?domain=cs")
        .add_header(header::COOKIE, first)
        .await
        .text();
    let theirs = server
        .get("/admin/content?domain=cs")
        .add_header(header::COOKIE, second)
        .await
        .text();

    assert!(mine.contains("Edited tagline for review"));
    assert!(!theirs.contains("Edited tagline for review"));
    assert_eq!(state.workspaces.count(), 2);

    let public = server.get("/").await.text();
    assert!(!public.contains("Edited tagline for review"));
}

#[tokio::test]
async fn test_message_status_change() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state);
    let cookie = session(&server).await;

    server
        .post("/admin/messages/1/status")
        .add_header(header::COOKIE, cookie.clone())
        .form(&[("status", "archived")])
        .await
        .assert_status(StatusCode::SEE_OTHER);

    let html = server
        .get("/admin/messages?status=archived")
        .add_header(header::COOKIE, cookie)
        .await
        .text();
    assert!(html.contains("Sarah Johnson"));
    assert!(html.contains("Message marked archived"));
}

#[tokio::test]
async fn test_unknown_message_reports_error() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state);
    let cookie = session(&server).await;

    server
        .post("/admin/messages/999/delete")
        .add_header(header::COOKIE, cookie.clone())
        .await
        .assert_status(StatusCode::SEE_OTHER);

    let html = server
        .get("/admin/messages")
        .add_header(header::COOKIE, cookie)
        .await
        .text();
    assert!(html.contains("notice error"));
}

#[tokio::test]
async fn test_default_landing_is_site_wide() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state);
    let cookie = session(&server).await;

    server
        .post("/admin/landing")
        .add_header(header::COOKIE, cookie.clone())
        .form(&[("domain", "mechanical")])
        .await
        .assert_status(StatusCode::SEE_OTHER);

    let json = server.get("/api/domain").await.json::<serde_json::Value>();
    assert_eq!(json["default_landing"], "mechanical");
    assert_eq!(json["domain"], "mechanical");

    server
        .post("/admin/landing/reset")
        .add_header(header::COOKIE, cookie)
        .await;

    let json = server.get("/api/domain").await.json::<serde_json::Value>();
    assert_eq!(json["default_landing"], "cs");
}

#[tokio::test]
async fn test_analytics_report_ranges() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state);
    let cookie = session(&server).await;

    for range in ["24h", "7d", "30d", "90d", "bogus"] {
        server
            .get(&format!("/admin/analytics?range={range}"))
            .add_header(header::COOKIE, cookie.clone())
            .await
            .assert_status_ok();
    }
}

#[tokio::test]
async fn test_settings_edit_save_and_reset() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state);
    let cookie = session(&server).await;

    let html = server
        .get("/admin/settings")
        .add_header(header::COOKIE, cookie.clone())
        .await
        .text();
    assert!(html.contains("System health"));
    assert!(html.contains("Healthy"));
    assert!(html.contains("value=\"30\""));

    let response = server
        .post("/admin/settings/backup")
        .add_header(header::COOKIE, cookie.clone())
        .form(&[("frequency", "weekly"), ("retention_days", "90")])
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), "/admin/settings");

    let html = server
        .get("/admin/settings")
        .add_header(header::COOKIE, cookie.clone())
        .await
        .text();
    assert!(html.contains("Backup settings updated"));
    assert!(html.contains("<option value=\"weekly\" selected>"));
    assert!(html.contains("value=\"90\""));
    assert!(!html.contains("name=\"auto_backup\" checked"));

    server
        .post("/admin/settings/save")
        .add_header(header::COOKIE, cookie.clone())
        .await
        .assert_status(StatusCode::SEE_OTHER);
    let html = server
        .get("/admin/settings")
        .add_header(header::COOKIE, cookie.clone())
        .await
        .text();
    assert!(html.contains("Settings saved"));
    assert!(html.contains("<option value=\"weekly\" selected>"));

    server
        .post("/admin/settings/reset")
        .add_header(header::COOKIE, cookie.clone())
        .await;
    let html = server
        .get("/admin/settings")
        .add_header(header::COOKIE, cookie)
        .await
        .text();
    assert!(html.contains("<option value=\"daily\" selected>"));
}

#[tokio::test]
async fn test_invalid_security_settings_become_error_notice() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state);
    let cookie = session(&server).await;

    server
        .post("/admin/settings/security")
        .add_header(header::COOKIE, cookie.clone())
        .form(&[("session_timeout_minutes", "30"), ("ip_allowlist", "home-office")])
        .await
        .assert_status(StatusCode::SEE_OTHER);

    let html = server
        .get("/admin/settings")
        .add_header(header::COOKIE, cookie)
        .await
        .text();
    assert!(html.contains("is not an IP address"));
    assert!(html.contains("name=\"login_notifications\" checked"));
}
