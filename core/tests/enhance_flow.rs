mod common;

use common::{snapshot_json, test_config};
use mockito::{Matcher, Server};
use taskpage_core::api::{
    load_snapshot, PageEnhancer, PageReport, ALERT_SHOW_CLASS, LABEL_MARK_COMPLETE,
    LABEL_MARK_INCOMPLETE, STRIKE_CLASS,
};
use taskpage_core::diag;
use taskpage_core::page::AlertHandle;

#[tokio::test]
async fn activation_round_trip_updates_row_and_label() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/task/1/toggle/")
        .match_header("x-csrftoken", "tok")
        .match_header("content-type", "application/json")
        .with_status(200)
        .with_body(r#"{"status":"success","completed":true}"#)
        .create_async()
        .await;

    let page = load_snapshot(&snapshot_json(Some("tok"))).expect("snapshot");
    let mut enhancer =
        PageEnhancer::attach(&page, &test_config(&server.url()), None).expect("attach");

    assert!(enhancer.activate("1"));
    enhancer.wait_idle().await;

    let control = page.control("1").expect("task 1");
    assert!(control.row().has_class(STRIKE_CLASS));
    assert_eq!(control.label(), LABEL_MARK_INCOMPLETE);

    // The untouched row stays as rendered.
    let other = page.control("2").expect("task 2");
    assert!(other.row().has_class(STRIKE_CLASS));
    assert_eq!(other.label(), LABEL_MARK_INCOMPLETE);
}

#[tokio::test]
async fn alerts_present_at_attach_are_dismissed() {
    let server = Server::new_async().await;
    let page = load_snapshot(&snapshot_json(None)).expect("snapshot");
    let mut enhancer =
        PageEnhancer::attach(&page, &test_config(&server.url()), None).expect("attach");

    enhancer.wait_idle().await;

    let alert = &page.alerts()[0];
    assert!(!alert.has_class(ALERT_SHOW_CLASS));
    assert!(!alert.is_attached());
}

#[tokio::test]
async fn token_less_page_still_sends_the_request() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/task/1/toggle/")
        .match_header("x-csrftoken", Matcher::Missing)
        .with_status(200)
        .with_body(r#"{"status":"success","completed":true}"#)
        .create_async()
        .await;

    let page = load_snapshot(&snapshot_json(None)).expect("snapshot");
    let mut enhancer =
        PageEnhancer::attach(&page, &test_config(&server.url()), None).expect("attach");

    assert!(enhancer.activate("1"));
    enhancer.wait_idle().await;

    assert!(page.control("1").expect("task 1").row().has_class(STRIKE_CLASS));
}

#[tokio::test]
async fn rejected_request_reaches_the_diag_sink_only() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/task/1/toggle/")
        .with_status(403)
        .with_body("<html>CSRF verification failed</html>")
        .create_async()
        .await;

    let (diag, mut rx) = diag::channel(8);
    let page = load_snapshot(&snapshot_json(None)).expect("snapshot");
    let mut enhancer =
        PageEnhancer::attach(&page, &test_config(&server.url()), Some(diag)).expect("attach");

    assert!(enhancer.activate("1"));
    enhancer.wait_idle().await;

    let control = page.control("1").expect("task 1");
    assert!(!control.row().has_class(STRIKE_CLASS));
    assert_eq!(control.label(), LABEL_MARK_COMPLETE);

    let event = rx.try_recv().expect("one diag event");
    assert_eq!(event.kind, "toggle.failure");
    assert_eq!(event.task_id.as_deref(), Some("1"));
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn late_registered_elements_participate() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/task/7/toggle/")
        .with_status(200)
        .with_body(r#"{"status":"success","completed":true}"#)
        .create_async()
        .await;

    let page = load_snapshot(&snapshot_json(None)).expect("snapshot");
    let mut enhancer =
        PageEnhancer::attach(&page, &test_config(&server.url()), None).expect("attach");

    let extra = load_snapshot(r#"{"tasks": [{"task_id": "7"}]}"#).expect("snapshot");
    let control = extra.control("7").expect("task 7").clone();
    enhancer.register_control(control.clone());

    let alert = AlertHandle::new(["alert", ALERT_SHOW_CLASS]);
    enhancer.register_alert(alert.clone());

    assert!(enhancer.activate("7"));
    enhancer.wait_idle().await;

    assert!(control.row().has_class(STRIKE_CLASS));
    assert!(!alert.is_attached());
}

#[tokio::test]
async fn report_counts_remaining_alerts() {
    let server = Server::new_async().await;
    let page = load_snapshot(&snapshot_json(None)).expect("snapshot");
    let report = PageReport::from_page(&page);
    assert_eq!(report.alerts_remaining, 1);
    assert_eq!(report.tasks.len(), 2);

    let mut enhancer =
        PageEnhancer::attach(&page, &test_config(&server.url()), None).expect("attach");
    enhancer.wait_idle().await;

    let report = PageReport::from_page(&page);
    assert_eq!(report.alerts_remaining, 0);
}
