//! Pagination and error handling of the member sources against mock APIs.

use license_monitor::config::{CalendlyConfig, OktaConfig};
use license_monitor::{CalendlySource, MemberSource, MonitorError, OktaSource};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ORG_URL: &str = "https://api.calendly.com/organizations/ORG1";

fn calendly_config(server: &MockServer) -> CalendlyConfig {
    CalendlyConfig {
        api_token: "cal-token".to_string(),
        org_url: ORG_URL.to_string(),
        api_base_url: server.uri(),
    }
}

fn okta_config(server: &MockServer) -> OktaConfig {
    OktaConfig {
        api_token: "okta-token".to_string(),
        base_url: format!("{}/api/v1/", server.uri()),
        group_id: "00g1".to_string(),
    }
}

fn calendly_page(emails: &[&str], next_page: Option<String>) -> serde_json::Value {
    let collection: Vec<_> = emails
        .iter()
        .map(|e| json!({ "role": "user", "user": { "email": e, "name": "Someone" } }))
        .collect();
    json!({
        "collection": collection,
        "pagination": { "count": emails.len(), "next_page": next_page }
    })
}

fn okta_page(members: &[(&str, &str)]) -> serde_json::Value {
    members
        .iter()
        .enumerate()
        .map(|(i, (email, status))| {
            json!({ "id": format!("00u{i}"), "status": status, "profile": { "email": email } })
        })
        .collect()
}

#[tokio::test]
async fn test_calendly_follows_next_page_across_three_pages() {
    let server = MockServer::start().await;
    let next = |token: &str| {
        Some(format!(
            "{}/organization_memberships?organization={ORG_URL}&page_token={token}",
            server.uri()
        ))
    };

    Mock::given(method("GET"))
        .and(path("/organization_memberships"))
        .and(query_param("organization", ORG_URL))
        .and(query_param_is_missing("page_token"))
        .and(header("Authorization", "Bearer cal-token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(calendly_page(&["A@x.com", "b@x.com"], next("p2"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/organization_memberships"))
        .and(query_param("page_token", "p2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(calendly_page(&["c@x.com"], next("p3"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/organization_memberships"))
        .and(query_param("page_token", "p3"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(calendly_page(&["a@X.com", "d@x.com"], None)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let source = CalendlySource::new(&calendly_config(&server)).unwrap();
    let emails = source.fetch_emails().await.unwrap();

    let expected: Vec<&str> = vec!["a@x.com", "b@x.com", "c@x.com", "d@x.com"];
    assert_eq!(emails.iter().map(String::as_str).collect::<Vec<_>>(), expected);
}

#[tokio::test]
async fn test_calendly_empty_next_page_ends_pagination() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organization_memberships"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(calendly_page(&["only@x.com"], Some(String::new()))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let source = CalendlySource::new(&calendly_config(&server)).unwrap();
    assert_eq!(source.fetch_emails().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_calendly_error_status_aborts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organization_memberships"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthenticated"))
        .mount(&server)
        .await;

    let source = CalendlySource::new(&calendly_config(&server)).unwrap();
    match source.fetch_emails().await {
        Err(MonitorError::Api {
            source_name,
            status,
            message,
        }) => {
            assert_eq!(source_name, "calendly");
            assert_eq!(status, 401);
            assert_eq!(message, "Unauthenticated");
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_calendly_missing_email_aborts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/organization_memberships"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "collection": [{ "user": { "name": "No Email" } }],
            "pagination": { "next_page": null }
        })))
        .mount(&server)
        .await;

    let source = CalendlySource::new(&calendly_config(&server)).unwrap();
    assert!(matches!(
        source.fetch_emails().await,
        Err(MonitorError::Serialization(_))
    ));
}

#[tokio::test]
async fn test_okta_follows_link_header_across_three_pages() {
    let server = MockServer::start().await;
    let users_url = format!("{}/api/v1/groups/00g1/users", server.uri());

    Mock::given(method("GET"))
        .and(path("/api/v1/groups/00g1/users"))
        .and(query_param_is_missing("after"))
        .and(header("Authorization", "SSWS okta-token"))
        .and(header("Accept", "application/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header(
                    "Link",
                    format!(r#"<{users_url}>; rel="self", <{users_url}?after=u2>; rel="next""#)
                        .as_str(),
                )
                .set_body_json(okta_page(&[("A@x.com", "ACTIVE"), ("b@x.com", "SUSPENDED")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/groups/00g1/users"))
        .and(query_param("after", "u2"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Link", format!(r#"<{users_url}?after=u3>; rel="next""#).as_str())
                .set_body_json(okta_page(&[("c@x.com", "ACTIVE")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/groups/00g1/users"))
        .and(query_param("after", "u3"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Link", format!(r#"<{users_url}?after=u3>; rel="self""#).as_str())
                .set_body_json(okta_page(&[("a@x.com", "SUSPENDED"), ("e@x.com", "ACTIVE")])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let source = OktaSource::new(&okta_config(&server)).unwrap();
    let members = source.fetch_members().await.unwrap();

    assert_eq!(
        members.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["a@x.com", "b@x.com", "c@x.com", "e@x.com"]
    );
    // The later record for a duplicate email wins.
    assert_eq!(members["a@x.com"].status, "SUSPENDED");
    assert_eq!(members["b@x.com"].status, "SUSPENDED");
    assert_eq!(members["c@x.com"].id, "00u0");
}

#[tokio::test]
async fn test_okta_error_status_aborts() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/groups/00g1/users"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_string("Not found: Resource not found: 00g1 (UserGroup)"),
        )
        .mount(&server)
        .await;

    let source = OktaSource::new(&okta_config(&server)).unwrap();
    assert!(matches!(
        source.fetch_emails().await,
        Err(MonitorError::Api {
            source_name: "okta",
            status: 404,
            ..
        })
    ));
}
