//! The client-facing contract of the remote session directory service.
//!
//! The directory accepts coordination requests and, out of band, pushes the
//! full set of active sessions to every connected client. Transport framing
//! and serialization are the implementor's concern; the engine only sees
//! these methods plus an [`mpsc`] receiver of pushed listings.
//!
//! None of the request methods retry internally. Retry policy belongs to the
//! caller, and the coordinator applies none: every failure is terminal for
//! the triggering request.

use async_trait::async_trait;
use thiserror::Error;

use muster_protocol::DomainSessionId;
use muster_protocol::SessionListing;
use muster_protocol::SessionSnapshot;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// The directory understood the request and refused it, e.g. the role is
    /// already taken or the session vanished mid-request.
    #[error("{reason}")]
    Rejected { reason: String },

    /// The request never completed. No partial application is possible; the
    /// caller's state stays at its last confirmed snapshot.
    #[error("transport failure: {message}")]
    Transport { message: String },
}

impl DirectoryError {
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}

pub type DirectoryResult<T> = std::result::Result<T, DirectoryError>;

/// One method per coordination intent. Host-only operations take the host's
/// own id as `host`; the directory enforces authority server-side and the
/// coordinator additionally refuses to send them for non-hosts.
#[async_trait]
pub trait SessionDirectory: Send + Sync {
    async fn fetch_sessions(&self, caller: DomainSessionId) -> DirectoryResult<SessionListing>;

    /// Creates a session with `caller` as host and returns its snapshot.
    async fn host_session(&self, caller: DomainSessionId) -> DirectoryResult<SessionSnapshot>;

    /// Joins the session hosted by `host` and returns its snapshot.
    async fn join_session(
        &self,
        caller: DomainSessionId,
        host: DomainSessionId,
    ) -> DirectoryResult<SessionSnapshot>;

    /// Leaves the session hosted by `host` and returns the refreshed listing.
    async fn leave_session(
        &self,
        caller: DomainSessionId,
        host: DomainSessionId,
    ) -> DirectoryResult<SessionListing>;

    async fn assign_role(
        &self,
        caller: DomainSessionId,
        host: DomainSessionId,
        role: &str,
    ) -> DirectoryResult<()>;

    async fn unassign_role(
        &self,
        caller: DomainSessionId,
        host: DomainSessionId,
        role: &str,
    ) -> DirectoryResult<()>;

    async fn kick_member(
        &self,
        host: DomainSessionId,
        target: DomainSessionId,
    ) -> DirectoryResult<()>;

    async fn rename_session(&self, host: DomainSessionId, name: &str) -> DirectoryResult<()>;

    async fn start_session(&self, host: DomainSessionId) -> DirectoryResult<()>;
}
