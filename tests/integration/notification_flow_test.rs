//! Integration tests for the create → assign → update → dispatch flow.

use std::time::Duration;

use tokio::sync::watch;

use incidenthub_core::config::NotificationsConfig;
use incidenthub_entity::incident::{Incident, IncidentPriority, IncidentStatus};

use crate::helpers::TestEngine;

#[tokio::test]
async fn test_create_then_assign_sends_one_digest_per_user() {
    let app = TestEngine::new();
    let creator = app.directory.add("creator@example.com");
    let assignee = app.directory.add("assignee@example.com");
    let service = app.engine.service();

    let mut incident = Incident::new("Mail server down", IncidentPriority::High, creator);
    service.notify_on_create(&incident).await;

    incident.assigned_to = Some(assignee);
    service.notify_on_assign(&incident, None).await;
    assert_eq!(app.engine.pending(), 2);

    let report = app.engine.flush().await;
    assert_eq!(report.drained, 2);
    assert_eq!(report.groups, 2);
    assert_eq!(report.sent, 2);
    assert_eq!(app.channel.calls(), 2);

    let delivered = app.channel.delivered();
    assert_eq!(delivered[0].0, "creator@example.com");
    assert_eq!(delivered[0].1.text_body.lines().next(), Some("- created: Mail server down"));
    assert_eq!(delivered[1].0, "assignee@example.com");
    assert_eq!(delivered[1].1.text_body.lines().next(), Some("- assigned: Mail server down"));
    assert_eq!(
        delivered[1].1.subject,
        "[IncidentHub] Incident notifications (high)"
    );
}

#[tokio::test]
async fn test_repeated_create_is_deduplicated() {
    let app = TestEngine::new();
    let creator = app.directory.add("creator@example.com");
    let service = app.engine.service();

    let incident = Incident::new("Printer jam", IncidentPriority::Low, creator);
    service.notify_on_create(&incident).await;
    service.notify_on_create(&incident).await;

    assert_eq!(app.engine.pending(), 1);
    assert_eq!(app.engine.metrics().deduplicated, 1);
}

#[tokio::test]
async fn test_digest_folds_several_incidents_of_same_priority() {
    let app = TestEngine::new();
    let creator = app.directory.add("creator@example.com");
    let service = app.engine.service();

    let first = Incident::new("DB latency", IncidentPriority::Medium, creator);
    let second = Incident::new("Cache misses", IncidentPriority::Medium, creator);
    let third = Incident::new("Site down", IncidentPriority::High, creator);
    service.notify_on_create(&first).await;
    service.notify_on_create(&second).await;
    service.notify_on_create(&third).await;

    let report = app.engine.flush().await;
    assert_eq!(report.groups, 2);

    let delivered = app.channel.delivered();
    assert_eq!(
        delivered[0].1.subject,
        "[IncidentHub] Incident notifications (medium)"
    );
    assert!(delivered[0].1.text_body.starts_with(
        "- created: DB latency\n- created: Cache misses\n"
    ));
    assert_eq!(
        delivered[1].1.subject,
        "[IncidentHub] Incident notifications (high)"
    );
}

#[tokio::test]
async fn test_status_update_notifies_both_stakeholders_once() {
    let app = TestEngine::new();
    let creator = app.directory.add("creator@example.com");
    let assignee = app.directory.add("assignee@example.com");
    let service = app.engine.service();

    let mut incident = Incident::new("VPN flapping", IncidentPriority::Medium, creator);
    incident.assigned_to = Some(assignee);

    incident.status = IncidentStatus::InProgress;
    service.notify_on_update(&incident).await;
    incident.status = IncidentStatus::Closed;
    service.notify_on_update(&incident).await;

    assert_eq!(app.engine.pending(), 2);
    let report = app.engine.flush().await;
    assert_eq!(report.sent, 2);
}

#[tokio::test]
async fn test_rejected_recipient_does_not_block_others() {
    let app = TestEngine::new();
    let creator = app.directory.add("creator@example.com");
    let assignee = app.directory.add("bounce@example.com");
    let service = app.engine.service();
    app.channel.reject("bounce@example.com");

    let mut incident = Incident::new("Outage", IncidentPriority::High, creator);
    incident.assigned_to = Some(assignee);
    service.notify_on_create(&incident).await;

    let report = app.engine.flush().await;
    assert_eq!(report.sent, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(app.engine.pending(), 0);

    let metrics = app.engine.metrics();
    assert_eq!(metrics.sent, 1);
    assert_eq!(metrics.failed, 1);
}

#[tokio::test]
async fn test_directory_outage_is_swallowed() {
    let app = TestEngine::new();
    let creator = app.directory.add("creator@example.com");
    app.directory.set_unavailable(true);

    let incident = Incident::new("Power loss", IncidentPriority::High, creator);
    app.engine.service().notify_on_create(&incident).await;

    assert_eq!(app.engine.pending(), 0);
    assert_eq!(app.engine.metrics().lookup_errors, 1);

    let report = app.engine.flush().await;
    assert!(report.is_empty());
    assert_eq!(app.channel.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_background_loop_flushes_on_interval_and_shutdown() {
    let app = TestEngine::with_config(NotificationsConfig {
        flush_interval_seconds: 5,
        ..NotificationsConfig::default()
    });
    let creator = app.directory.add("creator@example.com");
    let service = app.engine.service();

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let handle = app.engine.start(shutdown_rx);

    let first = Incident::new("Queue backlog", IncidentPriority::Low, creator);
    service.notify_on_create(&first).await;
    tokio::time::sleep(Duration::from_secs(6)).await;
    assert_eq!(app.channel.calls(), 1);

    let second = Incident::new("Late arrival", IncidentPriority::Low, creator);
    service.notify_on_create(&second).await;
    shutdown_tx.send(true).unwrap();
    handle.await.unwrap();

    assert_eq!(app.channel.calls(), 2);
    assert_eq!(app.engine.pending(), 0);
}
