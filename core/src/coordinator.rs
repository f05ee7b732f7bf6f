//! The session coordinator: the externally visible state machine driving the
//! request gate, directory client, and reconciler together.
//!
//! All mutable state lives inside one spawned task. Front ends submit
//! [`Intent`]s through a [`CoordinatorHandle`] and observe [`SessionEvent`]s
//! on the receiver returned from [`SessionCoordinator::spawn`]; nothing else
//! reaches the state. Directory requests are dispatched onto separate tasks
//! so pushed listings keep being reconciled while a request is in flight;
//! completions come back through an internal channel and are validated
//! against current state before being applied.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::debug;
use tracing::info;
use tracing::warn;

use muster_protocol::DomainSessionId;
use muster_protocol::Notice;
use muster_protocol::SessionListing;
use muster_protocol::SessionMember;
use muster_protocol::SessionSnapshot;

use crate::availability;
use crate::config::CoordinatorConfig;
use crate::directory::DirectoryError;
use crate::directory::DirectoryResult;
use crate::directory::SessionDirectory;
use crate::error::CoordinatorError;
use crate::error::Result;
use crate::events::Intent;
use crate::events::Mode;
use crate::events::SessionEvent;
use crate::gate::RequestGate;
use crate::reconciler::ReconcileOutcome;
use crate::reconciler::Reconciler;
use crate::reconciler::TeamListState;

/// Cheap, cloneable handle for submitting intents to the coordinator task.
#[derive(Clone)]
pub struct CoordinatorHandle {
    intent_tx: mpsc::Sender<Intent>,
}

impl CoordinatorHandle {
    pub async fn submit(&self, intent: Intent) -> Result<()> {
        self.intent_tx
            .send(intent)
            .await
            .map_err(|_| CoordinatorError::CoordinatorGone)
    }
}

/// A destructive action awaiting the user's confirmation. Nothing is sent to
/// the directory until the matching confirm intent arrives.
enum PendingConfirm {
    Kick(SessionMember),
    Rename(String),
}

/// Completion of a dispatched directory request, reported back to the loop by
/// the request task.
enum RequestOutcome {
    Fetch(DirectoryResult<SessionListing>),
    Host(DirectoryResult<SessionSnapshot>),
    Join(DirectoryResult<SessionSnapshot>),
    Leave(DirectoryResult<SessionListing>),
    Assign {
        role: String,
        result: DirectoryResult<()>,
    },
    Unassign {
        result: DirectoryResult<()>,
    },
    Kick {
        target: DomainSessionId,
        result: DirectoryResult<()>,
    },
    Rename {
        name: String,
        result: DirectoryResult<()>,
    },
    Start(DirectoryResult<()>),
}

pub struct SessionCoordinator {
    /// The caller's own domain session id, set once and immutable.
    local_id: DomainSessionId,
    directory: Arc<dyn SessionDirectory>,
    gate: RequestGate,
    reconciler: Reconciler,
    mode: Mode,
    /// Highlighted session in the list. Meaningful only in
    /// [`Mode::SessionList`].
    selected: Option<DomainSessionId>,
    /// Last known session listing, for presentation and selection pruning.
    sessions: SessionListing,
    /// Set iff in [`Mode::TeamList`].
    team: Option<TeamListState>,
    pending_confirm: Option<PendingConfirm>,
    event_tx: mpsc::UnboundedSender<SessionEvent>,
    outcome_tx: mpsc::UnboundedSender<RequestOutcome>,
}

impl SessionCoordinator {
    /// Spawn the coordinator task. `push_rx` is the subscription to the
    /// directory's out-of-band listing pushes; the coordinator owns it for
    /// its lifetime and the caller tears the subscription down by dropping
    /// the handle and sending [`Intent::Shutdown`] or closing the channel.
    pub fn spawn(
        local_id: DomainSessionId,
        directory: Arc<dyn SessionDirectory>,
        push_rx: mpsc::UnboundedReceiver<SessionListing>,
        config: CoordinatorConfig,
    ) -> (CoordinatorHandle, mpsc::UnboundedReceiver<SessionEvent>) {
        let (intent_tx, intent_rx) = mpsc::channel(config.intent_buffer);
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (outcome_tx, outcome_rx) = mpsc::unbounded_channel();

        let coordinator = Self {
            local_id,
            directory,
            gate: RequestGate::new(),
            reconciler: Reconciler::new(config.start_reminder_interval),
            mode: Mode::SessionList,
            selected: None,
            sessions: Vec::new(),
            team: None,
            pending_confirm: None,
            event_tx,
            outcome_tx,
        };
        tokio::spawn(coordinator.run(intent_rx, outcome_rx, push_rx));

        (CoordinatorHandle { intent_tx }, event_rx)
    }

    async fn run(
        mut self,
        mut intent_rx: mpsc::Receiver<Intent>,
        mut outcome_rx: mpsc::UnboundedReceiver<RequestOutcome>,
        mut push_rx: mpsc::UnboundedReceiver<SessionListing>,
    ) {
        info!(local_id = %self.local_id, "session coordinator started");

        // Kick off the initial listing fetch so the caller sees the lobby
        // without submitting anything.
        self.handle_intent(Intent::Refresh);

        loop {
            tokio::select! {
                Some(outcome) = outcome_rx.recv() => self.handle_outcome(outcome),
                Some(listing) = push_rx.recv() => self.handle_push(listing),
                intent = intent_rx.recv() => match intent {
                    None | Some(Intent::Shutdown) => break,
                    Some(intent) => self.handle_intent(intent),
                },
                else => break,
            }
        }

        debug!("session coordinator stopped");
    }

    fn emit(&self, event: SessionEvent) {
        // The receiver going away just means nobody is watching anymore.
        let _ = self.event_tx.send(event);
    }

    fn emit_all(&self, events: Vec<SessionEvent>) {
        for event in events {
            self.emit(event);
        }
    }

    fn set_selected(&mut self, selected: Option<DomainSessionId>) {
        if self.selected != selected {
            self.selected = selected;
            self.emit(SessionEvent::SelectionChanged { selected });
        }
    }

    fn session_frozen(&self) -> bool {
        self.team.as_ref().is_some_and(|team| team.frozen)
    }

    /// The joined session's identity, when joined.
    fn joined_session_id(&self) -> Option<DomainSessionId> {
        self.team.as_ref().map(|team| team.view.snapshot.session_id())
    }

    fn validate_listing(listing: SessionListing) -> SessionListing {
        listing
            .into_iter()
            .filter(|snapshot| match snapshot.validate() {
                Ok(()) => true,
                Err(err) => {
                    warn!(session_id = %snapshot.session_id(), %err, "dropping invalid snapshot");
                    false
                }
            })
            .collect()
    }

    fn apply_listing(&mut self, listing: SessionListing) {
        self.sessions = listing.clone();
        self.emit(SessionEvent::SessionListUpdated { sessions: listing });
        if self.mode == Mode::SessionList {
            let still_present = self
                .selected
                .is_some_and(|id| self.sessions.iter().any(|s| s.session_id() == id));
            if !still_present {
                self.set_selected(None);
            }
        }
    }

    fn notice_for(action: &str, err: &DirectoryError) -> Notice {
        match err {
            DirectoryError::Rejected { reason } => Notice::Rejected {
                action: action.to_string(),
                reason: reason.clone(),
            },
            DirectoryError::Transport { .. } => Notice::TransportFailed {
                action: action.to_string(),
            },
        }
    }

    // ---------------------------------------------------------------------
    // Intents
    // ---------------------------------------------------------------------

    fn handle_intent(&mut self, intent: Intent) {
        debug!(?intent, "intent received");

        if self.session_frozen() {
            debug!("session started; dropping intent");
            return;
        }

        match intent {
            Intent::Refresh => self.intent_refresh(),
            Intent::SelectSession { session } => self.intent_select_session(session),
            Intent::Host => self.intent_host(),
            Intent::Join => self.intent_join(),
            Intent::Leave => self.intent_leave(),
            Intent::SelectRole { role } => self.intent_select_role(role),
            Intent::Start => self.intent_start(),
            Intent::Kick { member } => self.intent_kick(member),
            Intent::ConfirmKick { accept } => self.intent_confirm_kick(accept),
            Intent::Rename { name } => self.intent_rename(name),
            Intent::ConfirmRename { accept } => self.intent_confirm_rename(accept),
            // Handled by the run loop before we get here.
            Intent::Shutdown => {}
        }
    }

    fn intent_refresh(&mut self) {
        if self.mode != Mode::SessionList {
            debug!("refresh outside the session list; ignoring");
            return;
        }
        if !self.gate.try_acquire() {
            debug!("request in flight; dropping refresh");
            return;
        }
        self.set_selected(None);

        let directory = Arc::clone(&self.directory);
        let outcome_tx = self.outcome_tx.clone();
        let caller = self.local_id;
        tokio::spawn(async move {
            let result = directory.fetch_sessions(caller).await;
            let _ = outcome_tx.send(RequestOutcome::Fetch(result));
        });
    }

    fn intent_select_session(&mut self, session: Option<DomainSessionId>) {
        if self.mode != Mode::SessionList {
            debug!("selection outside the session list; ignoring");
            return;
        }
        if let Some(id) = session
            && !self.sessions.iter().any(|s| s.session_id() == id)
        {
            debug!(%id, "selected session is not in the current listing; ignoring");
            return;
        }
        self.set_selected(session);
    }

    fn intent_host(&mut self) {
        if self.mode != Mode::SessionList || self.team.is_some() {
            debug!("host intent while already in a session; ignoring");
            return;
        }
        if !self.gate.try_acquire() {
            debug!("request in flight; dropping host intent");
            return;
        }

        let directory = Arc::clone(&self.directory);
        let outcome_tx = self.outcome_tx.clone();
        let caller = self.local_id;
        tokio::spawn(async move {
            let result = directory.host_session(caller).await;
            let _ = outcome_tx.send(RequestOutcome::Host(result));
        });
    }

    fn intent_join(&mut self) {
        if self.mode != Mode::SessionList || self.team.is_some() {
            debug!("join intent while already in a session; ignoring");
            return;
        }
        let Some(target) = self.selected else {
            debug!("join intent without a selected session; ignoring");
            return;
        };
        if !self.gate.try_acquire() {
            debug!("request in flight; dropping join intent");
            return;
        }

        let directory = Arc::clone(&self.directory);
        let outcome_tx = self.outcome_tx.clone();
        let caller = self.local_id;
        tokio::spawn(async move {
            let result = directory.join_session(caller, target).await;
            let _ = outcome_tx.send(RequestOutcome::Join(result));
        });
    }

    fn intent_leave(&mut self) {
        let Some(host_id) = self.joined_session_id() else {
            debug!("leave intent without a joined session; ignoring");
            return;
        };
        if !self.gate.try_acquire() {
            debug!("request in flight; dropping leave intent");
            return;
        }

        let directory = Arc::clone(&self.directory);
        let outcome_tx = self.outcome_tx.clone();
        let caller = self.local_id;
        tokio::spawn(async move {
            let result = directory.leave_session(caller, host_id).await;
            let _ = outcome_tx.send(RequestOutcome::Leave(result));
        });
    }

    fn intent_select_role(&mut self, role: String) {
        let Some(team) = &self.team else {
            debug!("role intent without a joined session; ignoring");
            return;
        };

        // Re-selecting the held role releases it; anything else claims it,
        // but only when it is actually free.
        let releasing = team.view.local_role(self.local_id).as_deref() == Some(role.as_str());
        if !releasing {
            match team.view.availability.get(&role) {
                None => {
                    debug!(%role, "unknown role; ignoring");
                    return;
                }
                Some(Some(holder)) => {
                    debug!(%role, %holder, "role already taken; ignoring");
                    return;
                }
                Some(None) => {}
            }
        }
        if !self.gate.try_acquire() {
            debug!("request in flight; dropping role intent");
            return;
        }

        let host_id = team.view.snapshot.session_id();
        let directory = Arc::clone(&self.directory);
        let outcome_tx = self.outcome_tx.clone();
        let caller = self.local_id;
        tokio::spawn(async move {
            let outcome = if releasing {
                let result = directory.unassign_role(caller, host_id, &role).await;
                RequestOutcome::Unassign { result }
            } else {
                let result = directory.assign_role(caller, host_id, &role).await;
                RequestOutcome::Assign { role, result }
            };
            let _ = outcome_tx.send(outcome);
        });
    }

    fn intent_start(&mut self) {
        let Some(team) = self.team.as_mut() else {
            debug!("start intent without a joined session; ignoring");
            return;
        };
        if !team.is_host {
            debug!("start intent from a non-host; ignoring");
            return;
        }
        if !team.start_enabled || team.start_in_flight {
            debug!("start intent while not startable; ignoring");
            return;
        }
        if !self.gate.try_acquire() {
            debug!("request in flight; dropping start intent");
            return;
        }

        // Disable the affordance right away so a second click does nothing,
        // independent of the request gate.
        team.start_in_flight = true;
        team.start_enabled = false;
        let host_id = team.view.snapshot.session_id();
        self.emit(SessionEvent::StartEnabled { enabled: false });

        let directory = Arc::clone(&self.directory);
        let outcome_tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = directory.start_session(host_id).await;
            let _ = outcome_tx.send(RequestOutcome::Start(result));
        });
    }

    fn intent_kick(&mut self, member: DomainSessionId) {
        let Some(team) = &self.team else {
            debug!("kick intent without a joined session; ignoring");
            return;
        };
        if !team.is_host {
            debug!("kick intent from a non-host; ignoring");
            return;
        }
        let Some(target) = team.view.snapshot.joined.get(&member).cloned() else {
            debug!(%member, "kick target is not a joined member; ignoring");
            return;
        };

        if self.pending_confirm.is_some() {
            debug!("replacing a previous unconfirmed action");
        }
        self.pending_confirm = Some(PendingConfirm::Kick(target.clone()));
        self.emit(SessionEvent::KickConfirmationRequested { member: target });
    }

    fn intent_confirm_kick(&mut self, accept: bool) {
        let member = match self.pending_confirm.take() {
            Some(PendingConfirm::Kick(member)) => member,
            other => {
                self.pending_confirm = other;
                debug!("no kick awaiting confirmation; ignoring");
                return;
            }
        };
        if !accept {
            debug!(target = %member.id, "kick declined");
            return;
        }
        let Some(team) = &self.team else {
            debug!("kick confirmed after leaving the session; ignoring");
            return;
        };
        if !self.gate.try_acquire() {
            debug!("request in flight; dropping confirmed kick");
            return;
        }

        let host_id = team.view.snapshot.session_id();
        let target = member.id;
        let directory = Arc::clone(&self.directory);
        let outcome_tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = directory.kick_member(host_id, target).await;
            let _ = outcome_tx.send(RequestOutcome::Kick { target, result });
        });
    }

    fn intent_rename(&mut self, name: String) {
        let Some(team) = &self.team else {
            debug!("rename intent without a joined session; ignoring");
            return;
        };
        if !team.is_host {
            debug!("rename intent from a non-host; ignoring");
            return;
        }

        let current = team.view.snapshot.session_name.clone();
        let name = name.trim().to_string();
        if name.is_empty() || name == current {
            self.emit(SessionEvent::NameReverted { name: current });
            return;
        }

        if self.pending_confirm.is_some() {
            debug!("replacing a previous unconfirmed action");
        }
        self.pending_confirm = Some(PendingConfirm::Rename(name.clone()));
        self.emit(SessionEvent::RenameConfirmationRequested { name });
    }

    fn intent_confirm_rename(&mut self, accept: bool) {
        let name = match self.pending_confirm.take() {
            Some(PendingConfirm::Rename(name)) => name,
            other => {
                self.pending_confirm = other;
                debug!("no rename awaiting confirmation; ignoring");
                return;
            }
        };
        let Some(team) = &self.team else {
            debug!("rename confirmed after leaving the session; ignoring");
            return;
        };
        let current = team.view.snapshot.session_name.clone();
        if !accept {
            self.emit(SessionEvent::NameReverted { name: current });
            return;
        }
        if !self.gate.try_acquire() {
            debug!("request in flight; dropping confirmed rename");
            self.emit(SessionEvent::NameReverted { name: current });
            return;
        }

        let host_id = team.view.snapshot.session_id();
        let directory = Arc::clone(&self.directory);
        let outcome_tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let result = directory.rename_session(host_id, &name).await;
            let _ = outcome_tx.send(RequestOutcome::Rename { name, result });
        });
    }

    // ---------------------------------------------------------------------
    // Request completions
    // ---------------------------------------------------------------------

    fn handle_outcome(&mut self, outcome: RequestOutcome) {
        // Every dispatch acquired the gate; release it before anything else
        // so no completion path can leave it held.
        self.gate.release();

        match outcome {
            RequestOutcome::Fetch(result) => self.outcome_fetch(result),
            RequestOutcome::Host(result) => self.outcome_host(result),
            RequestOutcome::Join(result) => self.outcome_join(result),
            RequestOutcome::Leave(result) => self.outcome_leave(result),
            RequestOutcome::Assign { role, result } => self.outcome_role(Some(role), result),
            RequestOutcome::Unassign { result } => self.outcome_role(None, result),
            RequestOutcome::Kick { target, result } => self.outcome_kick(target, result),
            RequestOutcome::Rename { name, result } => self.outcome_rename(name, result),
            RequestOutcome::Start(result) => self.outcome_start(result),
        }
    }

    fn outcome_fetch(&mut self, result: DirectoryResult<SessionListing>) {
        match result {
            Ok(listing) => self.apply_listing(Self::validate_listing(listing)),
            Err(err) => {
                warn!(%err, "session listing fetch failed");
                self.apply_listing(Vec::new());
                self.emit(SessionEvent::Notice(Self::notice_for("Refresh sessions", &err)));
            }
        }
    }

    fn outcome_host(&mut self, result: DirectoryResult<SessionSnapshot>) {
        if self.team.is_some() || self.mode != Mode::SessionList {
            warn!("discarding stale host completion");
            return;
        }
        match result {
            Ok(snapshot) => {
                if let Err(err) = snapshot.validate() {
                    warn!(%err, "directory returned an invalid hosted session");
                    self.emit(SessionEvent::Notice(Notice::Rejected {
                        action: "Host session".to_string(),
                        reason: err.to_string(),
                    }));
                    return;
                }
                if snapshot.host.id != self.local_id {
                    warn!(host = %snapshot.host.id, "hosted session does not name us as host; discarding");
                    return;
                }
                info!(session_id = %snapshot.session_id(), "hosting session");
                self.enter_session(snapshot, true);
            }
            Err(err) => {
                warn!(%err, "host request failed");
                self.emit(SessionEvent::Notice(Self::notice_for("Host session", &err)));
            }
        }
    }

    fn outcome_join(&mut self, result: DirectoryResult<SessionSnapshot>) {
        if self.team.is_some() || self.mode != Mode::SessionList {
            warn!("discarding stale join completion");
            return;
        }
        match result {
            Ok(snapshot) => {
                if let Err(err) = snapshot.validate() {
                    warn!(%err, "directory returned an invalid joined session");
                    self.emit(SessionEvent::Notice(Notice::Rejected {
                        action: "Join session".to_string(),
                        reason: err.to_string(),
                    }));
                    return;
                }
                if !snapshot.contains_member(self.local_id) {
                    warn!(session_id = %snapshot.session_id(), "joined session does not contain us; discarding");
                    return;
                }
                info!(session_id = %snapshot.session_id(), "joined session");
                self.enter_session(snapshot, false);
            }
            Err(err) => {
                warn!(%err, "join request failed");
                self.emit(SessionEvent::Notice(Self::notice_for("Join session", &err)));
            }
        }
    }

    fn enter_session(&mut self, snapshot: SessionSnapshot, is_host: bool) {
        self.set_selected(None);
        let team = TeamListState::enter(snapshot, is_host);
        self.emit(SessionEvent::SessionEntered {
            snapshot: team.view.snapshot.clone(),
            structure: Arc::clone(&team.view.structure),
            is_host,
            availability: team.view.availability.clone(),
        });
        self.team = Some(team);
        self.mode = Mode::TeamList;
        self.emit(SessionEvent::ModeChanged {
            mode: Mode::TeamList,
        });
    }

    fn outcome_leave(&mut self, result: DirectoryResult<SessionListing>) {
        if self.team.is_none() {
            warn!("discarding stale leave completion");
            return;
        }
        match result {
            Ok(listing) => {
                info!("left session");
                self.team = None;
                self.mode = Mode::SessionList;
                self.emit(SessionEvent::ModeChanged {
                    mode: Mode::SessionList,
                });
                self.apply_listing(Self::validate_listing(listing));
            }
            Err(err) => {
                warn!(%err, "leave request failed");
                self.emit(SessionEvent::Notice(Self::notice_for("Leave session", &err)));
            }
        }
    }

    /// Completion of an assign (`Some(role)`) or unassign (`None`) request.
    fn outcome_role(&mut self, assigned: Option<String>, result: DirectoryResult<()>) {
        let Some(team) = self.team.as_mut() else {
            warn!("discarding stale role completion");
            return;
        };
        match result {
            Ok(()) => {
                // Confirmed by the directory: apply to the local snapshot
                // now rather than waiting for the next push.
                debug!(role = ?assigned, "role change confirmed");
                let local_id = self.local_id;
                let snapshot = &mut team.view.snapshot;
                if snapshot.host.id == local_id {
                    snapshot.host.assigned_role = assigned;
                } else if let Some(member) = snapshot.joined.get_mut(&local_id) {
                    member.assigned_role = assigned;
                } else {
                    warn!("local member missing from joined session");
                    return;
                }

                let mut events = Vec::new();
                let index = availability::rebuild(&team.view.snapshot);
                if index != team.view.availability {
                    team.view.availability = index.clone();
                    events.push(SessionEvent::AvailabilityChanged { roles: index });
                }
                self.reconciler
                    .update_start_affordance(team, Instant::now(), &mut events);
                self.emit_all(events);
            }
            Err(err) => {
                // No optimistic mutation was applied, so rolling back means
                // re-announcing the last confirmed role.
                let action = if assigned.is_some() {
                    "Assign role"
                } else {
                    "Unassign role"
                };
                warn!(%err, "{action} request failed");
                let confirmed = team.view.local_role(self.local_id);
                self.emit(SessionEvent::RoleSelectionReverted { role: confirmed });
                self.emit(SessionEvent::Notice(Self::notice_for(action, &err)));
            }
        }
    }

    fn outcome_kick(&mut self, target: DomainSessionId, result: DirectoryResult<()>) {
        if self.team.is_none() {
            warn!("discarding stale kick completion");
            return;
        }
        match result {
            // The member's departure arrives with the next push.
            Ok(()) => debug!(%target, "kick confirmed"),
            Err(err) => {
                warn!(%err, "kick request failed");
                self.emit(SessionEvent::Notice(Self::notice_for("Kick member", &err)));
            }
        }
    }

    fn outcome_rename(&mut self, name: String, result: DirectoryResult<()>) {
        let Some(team) = self.team.as_mut() else {
            warn!("discarding stale rename completion");
            return;
        };
        match result {
            Ok(()) => {
                team.view.snapshot.session_name = name.clone();
                self.emit(SessionEvent::SessionRenamed { name });
            }
            Err(err) => {
                warn!(%err, "rename request failed");
                let current = team.view.snapshot.session_name.clone();
                self.emit(SessionEvent::NameReverted { name: current });
                self.emit(SessionEvent::Notice(Self::notice_for("Rename session", &err)));
            }
        }
    }

    fn outcome_start(&mut self, result: DirectoryResult<()>) {
        let Some(team) = self.team.as_mut() else {
            warn!("discarding stale start completion");
            return;
        };
        team.start_in_flight = false;
        match result {
            Ok(()) => {
                info!("session started");
                team.frozen = true;
                self.emit(SessionEvent::SessionStarted);
            }
            Err(err) => {
                warn!(%err, "start request failed");
                let mut events = Vec::new();
                self.reconciler
                    .update_start_affordance(team, Instant::now(), &mut events);
                self.emit_all(events);
                self.emit(SessionEvent::Notice(Self::notice_for("Start session", &err)));
            }
        }
    }

    // ---------------------------------------------------------------------
    // Pushed listings
    // ---------------------------------------------------------------------

    fn handle_push(&mut self, listing: SessionListing) {
        let listing = Self::validate_listing(listing);
        debug!(sessions = listing.len(), "directory push received");
        self.apply_listing(listing);

        let Some(team) = self.team.as_mut() else {
            return;
        };

        let mut events = Vec::new();
        let outcome = self.reconciler.reconcile(
            team,
            self.local_id,
            &self.sessions,
            Instant::now(),
            &mut events,
        );
        self.emit_all(events);

        if outcome == ReconcileOutcome::Removed {
            info!("removed from session");
            self.team = None;
            self.pending_confirm = None;
            self.mode = Mode::SessionList;
            self.emit(SessionEvent::ModeChanged {
                mode: Mode::SessionList,
            });
            self.emit(SessionEvent::Notice(Notice::RemovedFromSession));
        }
    }
}
