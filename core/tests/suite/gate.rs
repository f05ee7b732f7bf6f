//! One outstanding request at a time, and completions that no longer match
//! the current state are discarded.
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]


use muster_core::Intent;
use muster_core::SessionEvent;
use muster_protocol::DomainSessionId;
use muster_protocol::Notice;

use super::fakes::FakeDirectory;
use super::fakes::connect;
use super::fakes::drain_events;
use super::fakes::fireteam;
use super::fakes::host_and_join;
use super::fakes::wait_for_event;

const HOST: DomainSessionId = DomainSessionId(1);
const JOINER: DomainSessionId = DomainSessionId(2);

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn intents_during_an_outstanding_request_are_dropped() {
    let directory = FakeDirectory::new(fireteam(), 4);
    let mut host = connect(&directory, HOST, "hank").await;
    host.handle.submit(Intent::Host).await.unwrap();
    wait_for_event(&mut host.events, |e| {
        matches!(e, SessionEvent::SessionEntered { .. })
    })
    .await;
    drain_events(&mut host.events).await;

    let release = directory.hold_next_request();
    host.handle
        .submit(Intent::SelectRole {
            role: "Point".to_string(),
        })
        .await
        .unwrap();
    // Lands while the first request is parked; dropped, not queued.
    host.handle
        .submit(Intent::SelectRole {
            role: "Cover".to_string(),
        })
        .await
        .unwrap();
    release.send(()).unwrap();

    let drained = drain_events(&mut host.events).await;
    let availability: Vec<_> = drained
        .iter()
        .filter_map(|e| match e {
            SessionEvent::AvailabilityChanged { roles } => Some(roles),
            _ => None,
        })
        .collect();
    assert_eq!(availability.len(), 1, "events: {drained:?}");
    assert_eq!(availability[0]["Point"], Some("hank".to_string()));
    assert_eq!(availability[0]["Cover"], None);

    // The gate is free again: a re-issued intent goes through.
    host.handle
        .submit(Intent::SelectRole {
            role: "Cover".to_string(),
        })
        .await
        .unwrap();
    wait_for_event(&mut host.events, |e| {
        matches!(
            e,
            SessionEvent::AvailabilityChanged { roles }
                if roles["Cover"] == Some("hank".to_string())
        )
    })
    .await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn completion_after_removal_is_discarded_and_the_gate_released() {
    let directory = FakeDirectory::new(fireteam(), 4);
    let (_host, mut joiner) = host_and_join(&directory, HOST, JOINER).await;
    drain_events(&mut joiner.events).await;

    let release = directory.hold_next_request();
    joiner
        .handle
        .submit(Intent::SelectRole {
            role: "Point".to_string(),
        })
        .await
        .unwrap();

    // While the request is parked the directory drops the member; the pushed
    // listing must still be reconciled.
    directory.drop_member(HOST, JOINER);
    wait_for_event(&mut joiner.events, |e| {
        e == &SessionEvent::Notice(Notice::RemovedFromSession)
    })
    .await;

    // The parked request now completes against a session the member is no
    // longer in; its outcome must not resurrect any team state.
    release.send(()).unwrap();
    let drained = drain_events(&mut joiner.events).await;
    assert!(
        !drained.iter().any(|e| matches!(
            e,
            SessionEvent::RoleSelectionReverted { .. } | SessionEvent::Notice(_)
        )),
        "stale completion leaked: {drained:?}"
    );

    // And the gate is free: a refresh goes through.
    joiner.handle.submit(Intent::Refresh).await.unwrap();
    wait_for_event(&mut joiner.events, |e| {
        matches!(e, SessionEvent::SessionListUpdated { .. })
    })
    .await;
}
