mod common;

use axum::http::{StatusCode, header};
use portfolio_site::domain::content_store::ContentStore;
use portfolio_site::domain::entities::PortfolioDomain;

#[tokio::test]
async fn test_portfolio_renders_default_domain() {
    let (state, mut rx) = common::create_test_state();
    let server = common::test_server(state.clone());

    let response = server.get("/").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("data-domain=\"cs\""));
    assert!(html.contains("/resume/cs"));
    assert!(html.contains(&ContentStore::builtin().personal().name));
    assert!(!common::page_view_id(&html).is_empty());

    assert_eq!(state.page_views.open_count(), 1);
    assert_eq!(
        common::actions(&common::drain_events(&mut rx)),
        vec!["page_view"]
    );
}

#[tokio::test]
async fn test_portfolio_follows_domain_cookie() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state);

    let html = server
        .get("/")
        .add_header(
            header::COOKIE,
            common::cookie_header("portfolio-domain", "mechanical"),
        )
        .await
        .text();

    assert!(html.contains("data-domain=\"mechanical\""));
    assert!(html.contains("/resume/mechanical"));
    assert!(html.contains("Patents"));
}

#[tokio::test]
async fn test_each_page_load_gets_its_own_view() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state.clone());

    let first = common::page_view_id(&server.get("/").await.text());
    let second = common::page_view_id(&server.get("/").await.text());

    assert_ne!(first, second);
    assert_eq!(state.page_views.open_count(), 2);
}

#[tokio::test]
async fn test_default_landing_applies_without_cookie() {
    let (state, _rx) = common::create_test_state();
    state
        .domain_selector
        .set_default_landing(PortfolioDomain::Mechanical)
        .unwrap();
    let server = common::test_server(state);

    let html = server.get("/").await.text();

    assert!(html.contains("data-domain=\"mechanical\""));
}

#[tokio::test]
async fn test_contact_valid_submission() {
    let (state, mut rx) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/contact")
        .form(&[
            ("name", "Jordan Lee"),
            ("email", "jordan@example.com"),
            ("subject", "Hello"),
            ("message", "Interested in working together."),
        ])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), "/?contact=sent#contact");
    assert_eq!(
        common::actions(&common::drain_events(&mut rx)),
        vec!["contact_form_submit"]
    );
}

#[tokio::test]
async fn test_contact_invalid_submission_is_not_tracked() {
    let (state, mut rx) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/contact")
        .form(&[
            ("name", "Jordan Lee"),
            ("email", "not-an-email"),
            ("message", "Hi"),
        ])
        .await;

    assert_eq!(common::location(&response), "/?contact=invalid#contact");
    assert!(common::drain_events(&mut rx).is_empty());
}

#[tokio::test]
async fn test_contact_outcome_is_shown() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state);

    let html = server.get("/?contact=sent").await.text();

    assert!(html.contains("Thanks for reaching out"));
}

#[tokio::test]
async fn test_banner_shown_until_consent_is_recorded() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state);

    let html = server.get("/").await.text();
    assert!(html.contains("consent-banner"));
    assert!(html.contains("/static/portfolio.js"));

    let html = server
        .get("/")
        .add_header(
            header::COOKIE,
            common::cookie_header("cookie-consent", "necessary|analytics"),
        )
        .await
        .text();
    assert!(!html.contains("consent-banner"));
    assert!(html.contains("/static/portfolio.js"));
}

#[tokio::test]
async fn test_consent_choice_sets_cookie_for_a_year() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/consent")
        .form(&[("choice", "custom"), ("analytics", "on"), ("return_to", "/")])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(common::location(&response), "/");
    assert_eq!(
        common::set_cookie_value(&response, "cookie-consent").as_deref(),
        Some("necessary|analytics")
    );
    let raw = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(raw.contains("Max-Age=31536000"));
}

#[tokio::test]
async fn test_consent_redirect_stays_on_site() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state);

    let response = server
        .post("/consent")
        .form(&[("choice", "all"), ("return_to", "/\\evil.example.com")])
        .await;

    assert_eq!(common::location(&response), "/");
}

#[tokio::test]
async fn test_declined_analytics_skips_tracking() {
    let (state, mut rx) = common::create_test_state();
    let server = common::test_server(state.clone());

    let html = server
        .get("/")
        .add_header(header::COOKIE, common::cookie_header("cookie-consent", "necessary"))
        .await
        .text();

    assert!(!html.contains("consent-banner"));
    assert!(!html.contains("/static/portfolio.js"));
    assert!(common::page_view_id(&html).is_empty());
    assert_eq!(state.page_views.open_count(), 0);
    assert!(common::drain_events(&mut rx).is_empty());
}

#[tokio::test]
async fn test_unknown_consent_choice_is_rejected() {
    let (state, _rx) = common::create_test_state();
    let server = common::test_server(state);

    let response = server.post("/consent").form(&[("choice", "maybe")]).await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert!(common::set_cookie_value(&response, "cookie-consent").is_none());
}
