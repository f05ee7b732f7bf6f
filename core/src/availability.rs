//! Derived role-availability state.
//!
//! The index is strictly derived from a snapshot and recomputed whole each
//! time; nothing mutates it incrementally.

use std::collections::BTreeMap;

use muster_protocol::SessionSnapshot;

/// Role name mapped to the username holding it, or `None` when available.
pub type RoleAvailability = BTreeMap<String, Option<String>>;

/// How a single role should be presented to a particular user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleSlot {
    /// Held by the user asking.
    Held,
    /// Free to claim.
    Available,
    /// Held by someone else.
    TakenBy(String),
}

/// Walk host and joined members and mark every claimed role with its holder;
/// every other declared playable role maps to `None`.
///
/// Assignments naming a role that the team structure does not declare as
/// playable are ignored. Duplicate role names across teams collapse to one
/// key, and when two members somehow claim the same name the later writer
/// (host first, then joiners in id order) wins.
pub fn rebuild(snapshot: &SessionSnapshot) -> RoleAvailability {
    let mut index: RoleAvailability = snapshot
        .team_structure
        .playable_roles()
        .into_iter()
        .map(|role| (role, None))
        .collect();

    let members = std::iter::once(&snapshot.host).chain(snapshot.joined.values());
    for member in members {
        if let Some(role) = &member.assigned_role
            && let Some(holder) = index.get_mut(role)
        {
            *holder = Some(member.username.clone());
        }
    }

    index
}

/// Classify one role for the given user.
pub fn classify(index: &RoleAvailability, role: &str, username: &str) -> RoleSlot {
    match index.get(role).and_then(|holder| holder.as_deref()) {
        Some(holder) if holder == username => RoleSlot::Held,
        Some(holder) => RoleSlot::TakenBy(holder.to_string()),
        None => RoleSlot::Available,
    }
}
