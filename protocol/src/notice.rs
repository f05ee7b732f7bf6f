//! User-facing notices emitted by the coordination engine.
//!
//! The engine does not render anything; it reports these as data and the
//! embedding front end decides how to show them.

use serde::Deserialize;
use serde::Serialize;

/// A message for the local user. Every failure path in the engine ends in one
/// of these and a return to the last consistent state; none are fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notice {
    /// The joined session disappeared from a directory push: the host closed
    /// it or this member was kicked. Not a request failure.
    RemovedFromSession,
    /// Reminder to the host that every member holds a role and the session
    /// can be started. Rate-limited by the reconciler.
    StartReminder,
    /// The directory service refused a request (role already taken, rename
    /// denied, session vanished mid-request, ...).
    Rejected { action: String, reason: String },
    /// A request never completed. Local state stays at the last confirmed
    /// snapshot.
    TransportFailed { action: String },
}

impl Notice {
    /// Default display text. Front ends can substitute their own copy.
    pub fn text(&self) -> String {
        match self {
            Notice::RemovedFromSession => {
                "The session is no longer available. The host may have closed the session. \
                 Try to join or host a new session."
                    .to_string()
            }
            Notice::StartReminder => {
                "All joined users are assigned to roles. Start the session to begin.".to_string()
            }
            Notice::Rejected { action, reason } => format!("{action} failed: {reason}"),
            Notice::TransportFailed { action } => {
                format!("{action} failed: the request could not be completed")
            }
        }
    }
}
