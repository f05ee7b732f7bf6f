//! Submission and event vocabulary of the session coordinator.
//!
//! Intents flow in through [`crate::coordinator::CoordinatorHandle::submit`];
//! events flow out on the receiver returned from
//! [`crate::coordinator::SessionCoordinator::spawn`]. The front end renders
//! events and never touches coordinator state directly.

use std::sync::Arc;

use muster_protocol::DomainSessionId;
use muster_protocol::Notice;
use muster_protocol::SessionMember;
use muster_protocol::SessionSnapshot;
use muster_protocol::Team;

use crate::availability::RoleAvailability;

/// The two screens the coordinator drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Browsing the directory's list of joinable sessions.
    SessionList,
    /// Inside a session, staffing roles.
    TeamList,
}

/// A user intent. Intents that would issue a request while another is
/// outstanding are dropped silently; the user re-issues them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Re-fetch the session list.
    Refresh,
    /// Highlight a session in the list (or clear the highlight).
    SelectSession { session: Option<DomainSessionId> },
    /// Host a new session.
    Host,
    /// Join the currently selected session.
    Join,
    /// Leave the joined session.
    Leave,
    /// Claim a role, or release it when the caller already holds it.
    SelectRole { role: String },
    /// Host only: start the session once every member is assigned.
    Start,
    /// Host only: ask to remove a member. Produces a confirmation request;
    /// nothing is sent until [`Intent::ConfirmKick`].
    Kick { member: DomainSessionId },
    ConfirmKick { accept: bool },
    /// Host only: ask to rename the session. Blank or unchanged names revert
    /// immediately; otherwise a confirmation request is produced.
    Rename { name: String },
    ConfirmRename { accept: bool },
    /// Stop the coordinator task.
    Shutdown,
}

/// State changes observed by the front end.
///
/// Member-level deltas are deliberately fine-grained: a directory push never
/// produces a rebuild-the-world event for an already-joined session, so the
/// UI keeps its expansion and selection state across periodic updates.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The session list presentation changed (fetch result or push).
    SessionListUpdated { sessions: Vec<SessionSnapshot> },
    /// The highlighted session changed, or was cleared because it vanished.
    SelectionChanged { selected: Option<DomainSessionId> },
    ModeChanged { mode: Mode },
    /// Entering a session (hosted or joined): the one-time structural build.
    /// The `structure` handle stays identical across every later update to
    /// this session.
    SessionEntered {
        snapshot: SessionSnapshot,
        structure: Arc<Team>,
        is_host: bool,
        availability: RoleAvailability,
    },
    SessionRenamed { name: String },
    /// A rename was denied, failed, or never qualified; the displayed name
    /// reverts to the last confirmed value.
    NameReverted { name: String },
    MemberJoined { member: SessionMember },
    MemberLeft { id: DomainSessionId },
    MemberUpdated { member: SessionMember },
    AvailabilityChanged { roles: RoleAvailability },
    /// A role request failed; the local selection rolls back to the last
    /// confirmed role.
    RoleSelectionReverted { role: Option<String> },
    StartEnabled { enabled: bool },
    /// The session started; the coordinator freezes further mutation while
    /// the caller transitions to the launch flow.
    SessionStarted,
    KickConfirmationRequested { member: SessionMember },
    RenameConfirmationRequested { name: String },
    Notice(Notice),
}
