//! End-to-end flow against a mock portal: login, badge polling, profile
//! scraping and recurring-event creation over one cookie-backed session.

use mockito::Matcher;
use pforte_core::api::notifications;
use pforte_core::calendar::{self, EventDraft};
use pforte_core::scrape::profile;
use pforte_core::{Config, EndType, IntervalType, PortalSession, RecurrenceSpec, Weekday};

const LOGIN_PAGE: &str = r#"
<html><body>
  <form id="login-form" method="post" action="/login">
    <input type="hidden" name="formtoken" value="tok-login">
  </form>
</body></html>
"#;

const DASHBOARD: &str = r#"
<html><body><a id="logout" href="/logout">Abmelden</a></body></html>
"#;

fn config_for(server: &mockito::ServerGuard) -> Config {
    Config {
        base_url: server.url(),
        ..Config::default()
    }
}

async fn mock_login(server: &mut mockito::ServerGuard) {
    server
        .mock("GET", "/login")
        .with_body(LOGIN_PAGE)
        .create_async()
        .await;
    server
        .mock("POST", "/login")
        .with_header("set-cookie", "PORTALSESSID=s-1; Path=/; HttpOnly")
        .with_body(DASHBOARD)
        .create_async()
        .await;
}

#[tokio::test]
async fn session_cookie_carries_across_calls() {
    let mut server = mockito::Server::new_async().await;
    mock_login(&mut server).await;

    let badges = server
        .mock("GET", "/api/notifications/badges")
        .match_header("cookie", Matcher::Regex("PORTALSESSID=s-1".to_string()))
        .with_body(r#"{"mail": 2, "calendar": 1}"#)
        .create_async()
        .await;

    let session = PortalSession::login(&config_for(&server), "anna.m", "geheim")
        .await
        .unwrap();
    let counts = notifications::badges(&session).await.unwrap();
    assert_eq!(counts.mail, 2);
    assert_eq!(counts.total(), 3);
    badges.assert_async().await;
}

#[tokio::test]
async fn profile_sections_are_fetched_and_joined() {
    let mut server = mockito::Server::new_async().await;
    mock_login(&mut server).await;

    server
        .mock("GET", "/profile")
        .with_body(
            r#"<div id="profile"><h1 class="profile-name">Anna Muster</h1>
               <span class="profile-login">anna.m</span></div>"#,
        )
        .create_async()
        .await;
    server
        .mock("GET", "/profile/contact")
        .with_body(
            r#"<table id="contact-data">
               <tr><th>E-Mail</th><td>anna@schule.example</td></tr></table>"#,
        )
        .create_async()
        .await;
    server
        .mock("GET", "/profile/roles")
        .with_body(r#"<ul id="role-list"><li>Lehrkraft</li></ul>"#)
        .create_async()
        .await;

    let session = PortalSession::login(&config_for(&server), "anna.m", "geheim")
        .await
        .unwrap();
    let profile = profile::fetch(&session).await.unwrap();
    assert_eq!(profile.display_name, "Anna Muster");
    assert_eq!(profile.contact.email.as_deref(), Some("anna@schule.example"));
    assert_eq!(profile.roles, vec!["Lehrkraft".to_string()]);
}

#[tokio::test]
async fn recurring_event_form_reaches_the_portal_intact() {
    let mut server = mockito::Server::new_async().await;
    mock_login(&mut server).await;

    server
        .mock("GET", "/calendar/add")
        .with_body(
            r#"<form id="event-form">
               <input type="hidden" name="formtoken" value="tok-event"></form>"#,
        )
        .create_async()
        .await;
    let submit = server
        .mock("POST", "/calendar/add")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("formtoken".into(), "tok-event".into()),
            Matcher::UrlEncoded("subject".into(), "Sprechstunde".into()),
            Matcher::UrlEncoded("startDate".into(), "20.12.2024".into()),
            Matcher::UrlEncoded("intervalType".into(), "WEEKLY".into()),
            Matcher::UrlEncoded("recurrenceDays".into(), "MON,WED".into()),
            Matcher::UrlEncoded("endType".into(), "COUNT".into()),
            Matcher::UrlEncoded("endInterval".into(), "12".into()),
            Matcher::UrlEncoded("triggerType0".into(), "15M".into()),
            Matcher::UrlEncoded("triggerBefore0".into(), "1".into()),
            Matcher::UrlEncoded("triggerDate0".into(), "20.12.2024 09:00".into()),
        ]))
        .with_body(r#"<div id="calendar">ok</div>"#)
        .create_async()
        .await;

    let session = PortalSession::login(&config_for(&server), "anna.m", "geheim")
        .await
        .unwrap();
    let draft = EventDraft {
        subject: "Sprechstunde".to_string(),
        calendar: "c-own".to_string(),
        location: None,
        description: None,
        start: chrono::NaiveDate::from_ymd_opt(2024, 12, 20)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap(),
        end: chrono::NaiveDate::from_ymd_opt(2024, 12, 20)
            .unwrap()
            .and_hms_opt(11, 0, 0)
            .unwrap(),
        whole_day: false,
        recurrence: Some(RecurrenceSpec {
            interval_type: IntervalType::Weekly,
            interval: Some(1),
            weekly_days: vec![Weekday::Mon, Weekday::Wed],
            end_type: EndType::Count,
            end_count: Some(12),
            ..Default::default()
        }),
        alarms: vec!["15M".to_string()],
    };
    calendar::create_event(&session, &draft).await.unwrap();
    submit.assert_async().await;
}

#[tokio::test]
async fn invalid_recurrence_never_hits_the_network() {
    let mut server = mockito::Server::new_async().await;
    mock_login(&mut server).await;

    // No /calendar/add mocks: a request would fail the test with a 501.
    let session = PortalSession::login(&config_for(&server), "anna.m", "geheim")
        .await
        .unwrap();
    let draft = EventDraft {
        subject: "kaputt".to_string(),
        calendar: "c-own".to_string(),
        location: None,
        description: None,
        start: chrono::NaiveDate::from_ymd_opt(2024, 12, 20)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap(),
        end: chrono::NaiveDate::from_ymd_opt(2024, 12, 20)
            .unwrap()
            .and_hms_opt(11, 0, 0)
            .unwrap(),
        whole_day: false,
        recurrence: Some(RecurrenceSpec {
            interval_type: IntervalType::Monthly,
            interval: Some(1),
            ..Default::default()
        }),
        alarms: Vec::new(),
    };
    let err = calendar::create_event(&session, &draft).await.unwrap_err();
    assert!(matches!(
        err,
        pforte_core::PortalError::Validation(pforte_core::ValidationError::MissingField {
            field: "monthlyKind",
            ..
        })
    ));
}
