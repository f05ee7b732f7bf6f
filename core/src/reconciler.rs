//! Incremental reconciliation of pushed session listings against the local
//! view of the joined session.
//!
//! The directory pushes the complete set of active sessions periodically and
//! on membership changes. The reconciler merges each push into the joined
//! session's view without tearing it down: the team structure is materialized
//! exactly once when the session is entered and shared by handle afterwards,
//! and member changes are reported as id-keyed deltas so the front end keeps
//! its selection and expansion state across updates.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

use muster_protocol::DomainSessionId;
use muster_protocol::Notice;
use muster_protocol::SessionSnapshot;
use muster_protocol::Team;

use crate::availability;
use crate::availability::RoleAvailability;
use crate::events::SessionEvent;

/// The materialized view of the joined session.
///
/// `snapshot` is replaced wholesale on every accepted update; `structure` is
/// built once from the first snapshot and never rebuilt, which is what keeps
/// downstream view state stable.
pub(crate) struct JoinedView {
    pub(crate) snapshot: SessionSnapshot,
    pub(crate) structure: Arc<Team>,
    pub(crate) availability: RoleAvailability,
}

impl JoinedView {
    /// The one-time structural build for a newly entered session.
    pub(crate) fn build(snapshot: SessionSnapshot) -> Self {
        let structure = Arc::new(snapshot.team_structure.clone());
        let availability = availability::rebuild(&snapshot);
        Self {
            snapshot,
            structure,
            availability,
        }
    }

    /// The role the local member currently holds, per the last confirmed
    /// snapshot.
    pub(crate) fn local_role(&self, local_id: DomainSessionId) -> Option<String> {
        self.snapshot
            .member(local_id)
            .and_then(|member| member.assigned_role.clone())
    }
}

/// Everything the coordinator tracks while in the team-list screen. Dropped
/// wholesale when the local member leaves or is removed.
pub(crate) struct TeamListState {
    pub(crate) view: JoinedView,
    pub(crate) is_host: bool,
    /// Whether the start affordance is currently offered to the host.
    pub(crate) start_enabled: bool,
    /// Set while a start request is outstanding; blocks re-enabling the
    /// affordance independent of the request gate.
    pub(crate) start_in_flight: bool,
    /// Set once the session has started; all further mutation is refused.
    pub(crate) frozen: bool,
}

impl TeamListState {
    pub(crate) fn enter(snapshot: SessionSnapshot, is_host: bool) -> Self {
        Self {
            view: JoinedView::build(snapshot),
            is_host,
            start_enabled: false,
            start_in_flight: false,
            frozen: false,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ReconcileOutcome {
    /// The joined session was found and its view updated in place.
    Updated,
    /// The push omitted the session but the local member hosts it; a host
    /// only leaves via an explicit leave or start, so a stale or partial
    /// push must not eject it.
    Unchanged,
    /// The local member is no longer part of the session: it vanished from
    /// the push, or the member was kicked out of a still-listed session.
    Removed,
}

pub(crate) struct Reconciler {
    reminder_interval: Duration,
    last_reminder: Option<Instant>,
}

impl Reconciler {
    pub(crate) fn new(reminder_interval: Duration) -> Self {
        Self {
            reminder_interval,
            last_reminder: None,
        }
    }

    /// Merge one pushed listing into the joined-session state.
    ///
    /// On [`ReconcileOutcome::Removed`] the caller owns the transition back
    /// to the session list; this function has already emitted nothing for
    /// that case.
    pub(crate) fn reconcile(
        &mut self,
        team: &mut TeamListState,
        local_id: DomainSessionId,
        listing: &[SessionSnapshot],
        now: Instant,
        events: &mut Vec<SessionEvent>,
    ) -> ReconcileOutcome {
        let session_id = team.view.snapshot.session_id();
        let Some(update) = listing.iter().find(|s| s.session_id() == session_id) else {
            if team.is_host {
                debug!(%session_id, "push omitted our hosted session; ignoring");
                return ReconcileOutcome::Unchanged;
            }
            return ReconcileOutcome::Removed;
        };

        if !team.is_host && !update.contains_member(local_id) {
            return ReconcileOutcome::Removed;
        }

        self.apply_update(team, update, now, events);
        ReconcileOutcome::Updated
    }

    /// Field-level update of an already-known session. Never rebuilds the
    /// team structure.
    fn apply_update(
        &mut self,
        team: &mut TeamListState,
        update: &SessionSnapshot,
        now: Instant,
        events: &mut Vec<SessionEvent>,
    ) {
        let old = &team.view.snapshot;

        if update.session_name != old.session_name {
            events.push(SessionEvent::SessionRenamed {
                name: update.session_name.clone(),
            });
        }

        if update.host != old.host {
            events.push(SessionEvent::MemberUpdated {
                member: update.host.clone(),
            });
        }

        for (id, member) in &update.joined {
            match old.joined.get(id) {
                None => events.push(SessionEvent::MemberJoined {
                    member: member.clone(),
                }),
                Some(prev) if prev != member => events.push(SessionEvent::MemberUpdated {
                    member: member.clone(),
                }),
                Some(_) => {}
            }
        }
        for id in old.joined.keys() {
            if !update.joined.contains_key(id) {
                events.push(SessionEvent::MemberLeft { id: *id });
            }
        }

        let index = availability::rebuild(update);
        if index != team.view.availability {
            team.view.availability = index.clone();
            events.push(SessionEvent::AvailabilityChanged { roles: index });
        }

        // Replace the snapshot; the structure handle is deliberately left
        // alone so it stays identical across updates.
        team.view.snapshot = update.clone();

        self.update_start_affordance(team, now, events);
    }

    /// Recompute the host's start affordance from the current snapshot and
    /// emit the rate-limited reminder while every member is assigned.
    pub(crate) fn update_start_affordance(
        &mut self,
        team: &mut TeamListState,
        now: Instant,
        events: &mut Vec<SessionEvent>,
    ) {
        if !team.is_host || team.frozen || team.start_in_flight {
            return;
        }

        let all_assigned = team.view.snapshot.all_roles_assigned();
        if all_assigned != team.start_enabled {
            team.start_enabled = all_assigned;
            events.push(SessionEvent::StartEnabled {
                enabled: all_assigned,
            });
        }

        if all_assigned && self.reminder_due(now) {
            self.last_reminder = Some(now);
            events.push(SessionEvent::Notice(Notice::StartReminder));
        }
    }

    fn reminder_due(&self, now: Instant) -> bool {
        match self.last_reminder {
            None => true,
            Some(last) => now.duration_since(last) >= self.reminder_interval,
        }
    }
}
