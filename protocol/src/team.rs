//! The static tree of teams and role slots available within a session.
//!
//! The tree is built by the directory service when a session is hosted and
//! never changes shape afterwards; only the assignment of usernames to slot
//! names changes over the life of a session.

use serde::Deserialize;
use serde::Serialize;

/// A named group of units. May contain nested teams and member slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub units: Vec<TeamUnit>,
}

/// One node beneath a [`Team`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TeamUnit {
    Team(Team),
    Slot(MemberSlot),
}

/// A named, assignable position within the team structure. Unplayable slots
/// exist in authored content (AI-driven or observer positions) but are never
/// offered to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSlot {
    pub name: String,
    pub playable: bool,
}

impl Team {
    /// Whether any descendant slot is playable. Teams without a playable
    /// descendant are hidden from users entirely.
    pub fn has_playable_slot(&self) -> bool {
        self.units.iter().any(|unit| match unit {
            TeamUnit::Team(team) => team.has_playable_slot(),
            TeamUnit::Slot(slot) => slot.playable,
        })
    }

    /// Names of all playable slots, depth-first in authored order.
    pub fn playable_roles(&self) -> Vec<String> {
        let mut roles = Vec::new();
        self.collect_playable(&mut roles);
        roles
    }

    fn collect_playable(&self, roles: &mut Vec<String>) {
        for unit in &self.units {
            match unit {
                TeamUnit::Team(team) => team.collect_playable(roles),
                TeamUnit::Slot(slot) => {
                    if slot.playable {
                        roles.push(slot.name.clone());
                    }
                }
            }
        }
    }

    /// Whether `role` names a playable slot somewhere in this tree.
    pub fn is_playable_role(&self, role: &str) -> bool {
        self.units.iter().any(|unit| match unit {
            TeamUnit::Team(team) => team.is_playable_role(role),
            TeamUnit::Slot(slot) => slot.playable && slot.name == role,
        })
    }
}
