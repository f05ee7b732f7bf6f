#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;

use muster_core::Intent;
use muster_core::Mode;
use muster_core::SessionEvent;
use muster_protocol::DomainSessionId;
use muster_protocol::Notice;

use super::fakes::FakeDirectory;
use super::fakes::connect;
use super::fakes::fireteam;
use super::fakes::wait_for_event;

const HOST: DomainSessionId = DomainSessionId(1);
const JOINER: DomainSessionId = DomainSessionId(2);

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn hosting_enters_the_team_list() {
    let directory = FakeDirectory::new(fireteam(), 4);
    let mut host = connect(&directory, HOST, "hank").await;

    host.handle.submit(Intent::Host).await.unwrap();

    let entered = wait_for_event(&mut host.events, |e| {
        matches!(e, SessionEvent::SessionEntered { .. })
    })
    .await;
    let SessionEvent::SessionEntered {
        snapshot,
        is_host,
        availability,
        ..
    } = entered
    else {
        unreachable!();
    };
    assert!(is_host);
    assert_eq!(snapshot.session_name, "hank's session");
    assert_eq!(snapshot.host.username, "hank");
    // Only playable slots appear in the availability index.
    assert_eq!(
        availability.keys().collect::<Vec<_>>(),
        vec!["Cover", "Point"]
    );

    wait_for_event(&mut host.events, |e| {
        e == &SessionEvent::ModeChanged {
            mode: Mode::TeamList,
        }
    })
    .await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn joining_a_selected_session() {
    let directory = FakeDirectory::new(fireteam(), 4);
    let mut host = connect(&directory, HOST, "hank").await;
    host.handle.submit(Intent::Host).await.unwrap();
    wait_for_event(&mut host.events, |e| {
        matches!(e, SessionEvent::SessionEntered { .. })
    })
    .await;

    let mut joiner = connect(&directory, JOINER, "jo").await;

    joiner
        .handle
        .submit(Intent::SelectSession {
            session: Some(HOST),
        })
        .await
        .unwrap();
    wait_for_event(&mut joiner.events, |e| {
        e == &SessionEvent::SelectionChanged {
            selected: Some(HOST),
        }
    })
    .await;

    joiner.handle.submit(Intent::Join).await.unwrap();
    let entered = wait_for_event(&mut joiner.events, |e| {
        matches!(e, SessionEvent::SessionEntered { .. })
    })
    .await;
    assert_matches!(
        entered,
        SessionEvent::SessionEntered { is_host: false, .. }
    );

    // The host learns of the newcomer through the next push.
    let joined = wait_for_event(&mut host.events, |e| {
        matches!(e, SessionEvent::MemberJoined { .. })
    })
    .await;
    assert_matches!(
        joined,
        SessionEvent::MemberJoined { member } if member.username == "jo"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn selection_is_cleared_when_the_session_vanishes() {
    let directory = FakeDirectory::new(fireteam(), 4);
    let mut host = connect(&directory, HOST, "hank").await;
    host.handle.submit(Intent::Host).await.unwrap();
    wait_for_event(&mut host.events, |e| {
        matches!(e, SessionEvent::SessionEntered { .. })
    })
    .await;

    let mut browser = connect(&directory, JOINER, "jo").await;
    browser
        .handle
        .submit(Intent::SelectSession {
            session: Some(HOST),
        })
        .await
        .unwrap();
    wait_for_event(&mut browser.events, |e| {
        e == &SessionEvent::SelectionChanged {
            selected: Some(HOST),
        }
    })
    .await;

    directory.drop_session(HOST);
    wait_for_event(&mut browser.events, |e| {
        e == &SessionEvent::SelectionChanged { selected: None }
    })
    .await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn vanished_session_removes_the_joiner_but_not_the_host() {
    let directory = FakeDirectory::new(fireteam(), 4);
    let mut host = connect(&directory, HOST, "hank").await;
    host.handle.submit(Intent::Host).await.unwrap();
    wait_for_event(&mut host.events, |e| {
        matches!(e, SessionEvent::SessionEntered { .. })
    })
    .await;

    let mut joiner = connect(&directory, JOINER, "jo").await;
    joiner
        .handle
        .submit(Intent::SelectSession {
            session: Some(HOST),
        })
        .await
        .unwrap();
    joiner.handle.submit(Intent::Join).await.unwrap();
    wait_for_event(&mut joiner.events, |e| {
        matches!(e, SessionEvent::SessionEntered { .. })
    })
    .await;

    // The directory forgets the session entirely, e.g. a restart.
    directory.drop_session(HOST);

    wait_for_event(&mut joiner.events, |e| {
        e == &SessionEvent::Notice(Notice::RemovedFromSession)
    })
    .await;

    // The host saw the empty listing but keeps its team list open.
    wait_for_event(&mut host.events, |e| {
        matches!(e, SessionEvent::SessionListUpdated { sessions } if sessions.is_empty())
    })
    .await;
    let drained = super::fakes::drain_events(&mut host.events).await;
    assert!(
        !drained
            .iter()
            .any(|e| matches!(e, SessionEvent::ModeChanged { .. })),
        "host must not be ejected: {drained:?}"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn leaving_returns_to_the_session_list() {
    let directory = FakeDirectory::new(fireteam(), 4);
    let mut host = connect(&directory, HOST, "hank").await;
    host.handle.submit(Intent::Host).await.unwrap();
    wait_for_event(&mut host.events, |e| {
        matches!(e, SessionEvent::SessionEntered { .. })
    })
    .await;

    let mut joiner = connect(&directory, JOINER, "jo").await;
    joiner
        .handle
        .submit(Intent::SelectSession {
            session: Some(HOST),
        })
        .await
        .unwrap();
    joiner.handle.submit(Intent::Join).await.unwrap();
    wait_for_event(&mut joiner.events, |e| {
        matches!(e, SessionEvent::SessionEntered { .. })
    })
    .await;

    joiner.handle.submit(Intent::Leave).await.unwrap();
    wait_for_event(&mut joiner.events, |e| {
        e == &SessionEvent::ModeChanged {
            mode: Mode::SessionList,
        }
    })
    .await;

    let left = wait_for_event(&mut host.events, |e| {
        matches!(e, SessionEvent::MemberLeft { .. })
    })
    .await;
    assert_eq!(left, SessionEvent::MemberLeft { id: JOINER });
}
