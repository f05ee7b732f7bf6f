//! Session snapshots and membership.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::team::Team;

/// Identifies one participant's domain session. The directory service assigns
/// these; a hosted session is identified by its host's id.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DomainSessionId(pub i32);

impl fmt::Display for DomainSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One participant in a session, host or joiner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMember {
    pub id: DomainSessionId,
    pub username: String,
    /// The playable slot this member currently holds, if any.
    pub assigned_role: Option<String>,
}

impl SessionMember {
    pub fn new(id: DomainSessionId, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            assigned_role: None,
        }
    }

    pub fn is_assigned(&self) -> bool {
        self.assigned_role.is_some()
    }
}

/// A complete, point-in-time description of one hosted session.
///
/// Snapshots are replaced wholesale on every directory push; nothing mutates
/// one in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_name: String,
    /// Opaque reference to the course content this session will run. Passed
    /// through unmodified.
    pub course_ref: String,
    pub host: SessionMember,
    /// Joined members keyed by domain session id. Never contains the host.
    pub joined: BTreeMap<DomainSessionId, SessionMember>,
    pub team_structure: Team,
    pub capacity: u32,
}

/// An unordered collection of all currently active sessions, as pushed by the
/// directory service.
pub type SessionListing = Vec<SessionSnapshot>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("host {id} also appears in the joined member set")]
    HostInJoinedSet { id: DomainSessionId },
    #[error("occupancy {occupancy} exceeds capacity {capacity}")]
    OverCapacity { occupancy: u32, capacity: u32 },
}

impl SessionSnapshot {
    /// The identity key for this session: the host's domain session id.
    pub fn session_id(&self) -> DomainSessionId {
        self.host.id
    }

    /// Total occupancy, counting the host.
    pub fn occupancy(&self) -> u32 {
        1 + self.joined.len() as u32
    }

    /// Look up a member (host or joiner) by id.
    pub fn member(&self, id: DomainSessionId) -> Option<&SessionMember> {
        if self.host.id == id {
            Some(&self.host)
        } else {
            self.joined.get(&id)
        }
    }

    pub fn contains_member(&self, id: DomainSessionId) -> bool {
        self.member(id).is_some()
    }

    /// Whether the host and every joined member holds a role. Gates the
    /// host's start affordance.
    pub fn all_roles_assigned(&self) -> bool {
        self.host.is_assigned() && self.joined.values().all(SessionMember::is_assigned)
    }

    /// Check the structural invariants the directory service is expected to
    /// uphold. Snapshots arriving over the push channel are validated before
    /// reconciliation so a misbehaving directory cannot corrupt local state.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.joined.contains_key(&self.host.id) {
            return Err(SnapshotError::HostInJoinedSet { id: self.host.id });
        }
        if self.occupancy() > self.capacity {
            return Err(SnapshotError::OverCapacity {
                occupancy: self.occupancy(),
                capacity: self.capacity,
            });
        }
        Ok(())
    }
}
