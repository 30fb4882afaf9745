//! Recognizer registry: ownership, arbitration, and notification.
//!
//! DESIGN
//! ======
//! One `Registry` per window controller. It owns every recognizer the
//! controller creates (an arena indexed by [`RecognizerId`], in registration
//! order), the [`DependencyGraph`] between them, the click failure timers,
//! and an outbox of [`GestureChange`] snapshots the owner drains after each
//! event.
//!
//! All state changes go through [`Registry::request_transition`]. Entry into
//! `Began`/`Recognized` is arbitrated against every other recognizer on the
//! same target:
//!
//! 1. A peer that has already recognized (and that this recognizer waits on,
//!    or is not simultaneous with) fails the request outright.
//! 2. A peer still `Possible` that this recognizer waits on defers the
//!    request. The deferred state is retried, within the same call, when
//!    that peer fails.
//! 3. Otherwise every `Possible` peer that waits on this recognizer, or is
//!    not simultaneous with it, is forced to `Failed`, and the request
//!    commits.
//!
//! Peers are always visited in registration order, which makes the tie-break
//! deterministic when two recognizers become eligible on the same event.
//!
//! Listener callbacks receive a snapshot, never the registry itself, so they
//! cannot feed input back in while a transition is in flight.

#[cfg(test)]
#[path = "registry_test.rs"]
mod registry_test;

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::{debug, trace};

use crate::event::{GestureEvent, InputEvent, MousePhase, TouchPhase};
use crate::geo::Point;
use crate::graph::DependencyGraph;
use crate::recognizer::{
    Gesture, GestureDetail, GestureKind, HookCx, RecognizerCore, TargetId, TimerCommand,
};
use crate::state::GestureState;
use crate::touch::Touch;

// =============================================================================
// HANDLES
// =============================================================================

/// Handle of a recognizer within its registry. Ordered by registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RecognizerId(pub usize);

impl fmt::Display for RecognizerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handle of a registered state listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

/// Handle of a registered gesture callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CallbackId(u64);

// =============================================================================
// ERRORS
// =============================================================================

/// Misuse of the registry API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GestureError {
    #[error("unknown recognizer {0}")]
    UnknownRecognizer(RecognizerId),
    #[error("unknown gesture listener {0:?}")]
    UnknownListener(ListenerId),
    #[error("recognizer {0} cannot be related to itself")]
    SelfRelation(RecognizerId),
    #[error("touch index {index} out of range ({count} active)")]
    TouchIndexOutOfRange { index: usize, count: usize },
}

/// Why a requested transition did not happen.
///
/// None of these are faults: a recognizer losing arbitration is the normal
/// way competing gestures are resolved.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArbitrationFailure {
    /// A peer already recognized; this recognizer was moved to `Failed`.
    #[error("prevented by recognizer {by}")]
    Prevented { by: RecognizerId },
    /// Waiting for a peer to fail; the request is retried when it does.
    #[error("deferred until recognizer {waiting_on} fails")]
    Deferred { waiting_on: RecognizerId },
    /// Forcing peers to fail cascaded into this recognizer failing first.
    #[error("preempted while failing competing recognizers")]
    Preempted,
    #[error("illegal transition {from} -> {to}")]
    IllegalTransition { from: GestureState, to: GestureState },
    #[error(transparent)]
    Registry(#[from] GestureError),
}

// =============================================================================
// NOTIFICATIONS
// =============================================================================

/// Snapshot of a recognizer taken at an externally observable transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GestureChange {
    pub recognizer: RecognizerId,
    pub kind: GestureKind,
    pub target: TargetId,
    pub state: GestureState,
    pub client: Point,
    pub translation: Point,
    pub detail: GestureDetail,
}

/// Receives `gesture_state_changed` notifications from one recognizer.
pub trait GestureListener {
    fn gesture_state_changed(&mut self, change: &GestureChange);
}

impl<F> GestureListener for F
where
    F: FnMut(&GestureChange),
{
    fn gesture_state_changed(&mut self, change: &GestureChange) {
        self(change);
    }
}

type GestureCallback = Box<dyn FnMut(&GestureChange)>;

// =============================================================================
// REGISTRY
// =============================================================================

struct Entry {
    core: RecognizerCore,
    gesture: Box<dyn Gesture>,
    listeners: Vec<(ListenerId, Box<dyn GestureListener>)>,
    callbacks: Vec<(CallbackId, GestureCallback)>,
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("core", &self.core)
            .field("gesture", &self.gesture)
            .field("listeners", &self.listeners.len())
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

/// Owner of a controller's recognizers and the relations between them.
#[derive(Debug, Default)]
pub struct Registry {
    entries: Vec<Option<Entry>>,
    graph: DependencyGraph,
    /// Failure deadline per recognizer, host clock milliseconds.
    timers: BTreeMap<RecognizerId, f64>,
    changes: Vec<GestureChange>,
    next_handle: u64,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Membership ---

    /// Add a recognizer observing `target`.
    pub fn register<G>(&mut self, target: TargetId, gesture: G) -> RecognizerId
    where
        G: Gesture + 'static,
    {
        let id = RecognizerId(self.entries.len());
        debug!(recognizer = %id, kind = %gesture.kind(), target = target.0, "recognizer registered");
        self.entries.push(Some(Entry {
            core: RecognizerCore::new(target),
            gesture: Box::new(gesture),
            listeners: Vec::new(),
            callbacks: Vec::new(),
        }));
        id
    }

    /// Remove a recognizer along with its relations, listeners and timer.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::UnknownRecognizer`] if `id` is not registered.
    pub fn unregister(&mut self, id: RecognizerId) -> Result<(), GestureError> {
        self.entry(id)?;
        if let Some(slot) = self.entries.get_mut(id.0) {
            *slot = None;
        }
        self.graph.remove(id);
        self.timers.remove(&id);
        debug!(recognizer = %id, "recognizer unregistered");
        Ok(())
    }

    /// Registered recognizers, in registration order.
    #[must_use]
    pub fn ids(&self) -> Vec<RecognizerId> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_some())
            .map(|(i, _)| RecognizerId(i))
            .collect()
    }

    /// Registered recognizers observing `target`, in registration order.
    #[must_use]
    pub fn ids_for_target(&self, target: TargetId) -> Vec<RecognizerId> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.as_ref().is_some_and(|e| e.core.target() == target))
            .map(|(i, _)| RecognizerId(i))
            .collect()
    }

    // --- Queries ---

    /// # Errors
    ///
    /// Returns [`GestureError::UnknownRecognizer`] if `id` is not registered.
    pub fn core(&self, id: RecognizerId) -> Result<&RecognizerCore, GestureError> {
        Ok(&self.entry(id)?.core)
    }

    /// # Errors
    ///
    /// Returns [`GestureError::UnknownRecognizer`] if `id` is not registered.
    pub fn state(&self, id: RecognizerId) -> Result<GestureState, GestureError> {
        Ok(self.entry(id)?.core.state)
    }

    /// # Errors
    ///
    /// Returns [`GestureError::UnknownRecognizer`] if `id` is not registered.
    pub fn kind(&self, id: RecognizerId) -> Result<GestureKind, GestureError> {
        Ok(self.entry(id)?.gesture.kind())
    }

    /// # Errors
    ///
    /// Returns [`GestureError::UnknownRecognizer`] if `id` is not registered.
    pub fn detail(&self, id: RecognizerId) -> Result<GestureDetail, GestureError> {
        Ok(self.entry(id)?.gesture.detail())
    }

    /// # Errors
    ///
    /// Returns [`GestureError::UnknownRecognizer`] if `id` is not registered.
    pub fn set_enabled(&mut self, id: RecognizerId, enabled: bool) -> Result<(), GestureError> {
        self.entry_mut(id)?.core.set_enabled(enabled);
        Ok(())
    }

    /// Pending failure deadline of `id`, if a timer is armed.
    #[must_use]
    pub fn timer_deadline(&self, id: RecognizerId) -> Option<f64> {
        self.timers.get(&id).copied()
    }

    // --- Relations ---

    /// Allow `a` and `b` to be active at the same time (both directions).
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::UnknownRecognizer`] for an unregistered id and
    /// [`GestureError::SelfRelation`] if `a == b`.
    pub fn recognize_simultaneously_with(&mut self, a: RecognizerId, b: RecognizerId) -> Result<(), GestureError> {
        self.check_pair(a, b)?;
        self.graph.add_simultaneous(a, b);
        Ok(())
    }

    #[must_use]
    pub fn can_recognize_simultaneously_with(&self, a: RecognizerId, b: RecognizerId) -> bool {
        self.graph.can_recognize_with(a, b)
    }

    /// Make `dependent` wait until `prerequisite` fails before it recognizes.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::UnknownRecognizer`] for an unregistered id and
    /// [`GestureError::SelfRelation`] if both ids are the same.
    pub fn require_recognizer_to_fail(
        &mut self,
        dependent: RecognizerId,
        prerequisite: RecognizerId,
    ) -> Result<(), GestureError> {
        self.check_pair(dependent, prerequisite)?;
        self.graph.add_failure_requirement(dependent, prerequisite);
        Ok(())
    }

    #[must_use]
    pub fn requires_recognizer_to_fail(&self, dependent: RecognizerId, prerequisite: RecognizerId) -> bool {
        self.graph.requires_failure_of(dependent, prerequisite)
    }

    /// Whether `dependent` waits on `prerequisite` (the inverse edge).
    #[must_use]
    pub fn required_to_fail_by_recognizer(&self, prerequisite: RecognizerId, dependent: RecognizerId) -> bool {
        self.graph.dependents_of(prerequisite).contains(&dependent)
    }

    fn check_pair(&self, a: RecognizerId, b: RecognizerId) -> Result<(), GestureError> {
        self.entry(a)?;
        self.entry(b)?;
        if a == b {
            return Err(GestureError::SelfRelation(a));
        }
        Ok(())
    }

    // --- Listeners and callbacks ---

    /// # Errors
    ///
    /// Returns [`GestureError::UnknownRecognizer`] if `id` is not registered.
    pub fn add_listener<L>(&mut self, id: RecognizerId, listener: L) -> Result<ListenerId, GestureError>
    where
        L: GestureListener + 'static,
    {
        let handle = ListenerId(self.next_handle());
        self.entry_mut(id)?.listeners.push((handle, Box::new(listener)));
        Ok(handle)
    }

    /// Returns whether the listener was registered. Removing an unknown
    /// listener has no effect.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::UnknownRecognizer`] if `id` is not registered.
    pub fn remove_listener(&mut self, id: RecognizerId, listener: ListenerId) -> Result<bool, GestureError> {
        let listeners = &mut self.entry_mut(id)?.listeners;
        let before = listeners.len();
        listeners.retain(|(handle, _)| *handle != listener);
        Ok(listeners.len() != before)
    }

    /// Add a callback run after the listeners on every observable transition.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::UnknownRecognizer`] if `id` is not registered.
    pub fn add_gesture_callback<F>(&mut self, id: RecognizerId, callback: F) -> Result<CallbackId, GestureError>
    where
        F: FnMut(&GestureChange) + 'static,
    {
        let handle = CallbackId(self.next_handle());
        self.entry_mut(id)?.callbacks.push((handle, Box::new(callback)));
        Ok(handle)
    }

    /// # Errors
    ///
    /// Returns [`GestureError::UnknownRecognizer`] if `id` is not registered.
    pub fn remove_gesture_callback(&mut self, id: RecognizerId, callback: CallbackId) -> Result<bool, GestureError> {
        let callbacks = &mut self.entry_mut(id)?.callbacks;
        let before = callbacks.len();
        callbacks.retain(|(handle, _)| *handle != callback);
        Ok(callbacks.len() != before)
    }

    /// Drain the snapshots of every observable transition since the last call.
    pub fn take_changes(&mut self) -> Vec<GestureChange> {
        std::mem::take(&mut self.changes)
    }

    fn next_handle(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }

    // --- Input ---

    /// Deliver one event to every recognizer observing `target`.
    ///
    /// Expired timers fire first, at the event's timestamp. Returns whether
    /// any enabled recognizer received the event.
    ///
    /// # Errors
    ///
    /// Propagates [`GestureError`] from a recognizer's handlers; recognizers
    /// later in registration order do not see the event in that case.
    pub fn dispatch(&mut self, target: TargetId, event: &GestureEvent) -> Result<bool, GestureError> {
        self.advance_clock(event.time_ms);
        let mut handled = false;
        for id in self.ids_for_target(target) {
            handled |= self.handle_event(id, event)?;
        }
        Ok(handled)
    }

    /// Deliver one event to a single recognizer.
    ///
    /// Returns `false` when the recognizer ignored the event because it is
    /// disabled, or because the event was already consumed while it is idle.
    ///
    /// # Errors
    ///
    /// Returns [`GestureError::UnknownRecognizer`] if `id` is not registered.
    pub fn handle_event(&mut self, id: RecognizerId, event: &GestureEvent) -> Result<bool, GestureError> {
        let core = &self.entry(id)?.core;
        if !core.enabled() {
            return Ok(false);
        }
        if event.default_prevented && core.state == GestureState::Possible {
            return Ok(false);
        }

        let now = event.time_ms;
        match &event.input {
            InputEvent::Mouse(mouse) => match mouse.phase {
                MousePhase::Down => {
                    if self.entry_mut(id)?.core.begin_mouse(mouse) {
                        self.run_hook(id, now, |g, cx| g.mouse_down(cx, mouse.button))?;
                    }
                }
                MousePhase::Move => {
                    if self.entry_mut(id)?.core.move_mouse(mouse.point) {
                        self.run_hook(id, now, |g, cx| g.mouse_move(cx))?;
                    }
                }
                MousePhase::Up => {
                    if self.entry_mut(id)?.core.end_mouse(mouse.button) {
                        self.run_hook(id, now, |g, cx| g.mouse_up(cx, mouse.button))?;
                        if self.entry(id)?.core.mouse_button_mask() == 0 {
                            self.reset_if_events_ended(id)?;
                        }
                    }
                }
            },
            // Moves update every changed contact before any hook runs, so hooks
            // see the whole batch.
            InputEvent::Touch(touches) if touches.phase == TouchPhase::Move => {
                let core = &mut self.entry_mut(id)?.core;
                let moved: Vec<Touch> = touches
                    .touches
                    .iter()
                    .filter_map(|input| core.move_touch(input.identifier, input.point))
                    .collect();
                for touch in &moved {
                    self.run_hook(id, now, |g, cx| g.touch_move(cx, touch))?;
                }
            }
            InputEvent::Touch(touches) => {
                for input in &touches.touches {
                    let core = &mut self.entry_mut(id)?.core;
                    match touches.phase {
                        TouchPhase::Start => {
                            if let Some(touch) = core.begin_touch(input.identifier, input.point) {
                                self.run_hook(id, now, |g, cx| g.touch_start(cx, &touch))?;
                            }
                        }
                        TouchPhase::Move => {}
                        TouchPhase::Cancel => {
                            if let Some(touch) = core.end_touch(input.identifier) {
                                self.run_hook(id, now, |g, cx| g.touch_cancel(cx, &touch))?;
                                self.reset_if_events_ended(id)?;
                            }
                        }
                        TouchPhase::End => {
                            if let Some(touch) = core.end_touch(input.identifier) {
                                self.run_hook(id, now, |g, cx| g.touch_end(cx, &touch))?;
                                self.reset_if_events_ended(id)?;
                            }
                        }
                    }
                }
            }
            InputEvent::Wheel(_) => {}
        }
        Ok(true)
    }

    /// Fire every failure timer whose deadline is at or before `now_ms`.
    pub fn advance_clock(&mut self, now_ms: f64) {
        let mut expired: Vec<(f64, RecognizerId)> = self
            .timers
            .iter()
            .filter(|&(_, &deadline)| deadline <= now_ms)
            .map(|(&id, &deadline)| (deadline, id))
            .collect();
        expired.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));

        for (deadline, id) in expired {
            self.timers.remove(&id);
            if self.state_of(id) == GestureState::Possible {
                debug!(recognizer = %id, deadline, "failure timer expired");
                if let Err(failure) = self.request_transition(id, GestureState::Failed) {
                    trace!(recognizer = %id, %failure, "timer failure not applied");
                }
            }
        }
    }

    fn run_hook<F>(&mut self, id: RecognizerId, now_ms: f64, hook: F) -> Result<(), GestureError>
    where
        F: FnOnce(&mut dyn Gesture, &mut HookCx<'_>),
    {
        let entry = self.entry_mut(id)?;
        let mut cx = HookCx::new(&mut entry.core, now_ms);
        hook(entry.gesture.as_mut(), &mut cx);
        let (requested, timer) = cx.finish();

        match timer {
            Some(TimerCommand::FailAfter { delay_ms }) => {
                self.timers.insert(id, now_ms + delay_ms);
            }
            Some(TimerCommand::Cancel) => {
                self.timers.remove(&id);
            }
            None => {}
        }

        if let Some(state) = requested {
            match self.request_transition(id, state) {
                Ok(()) => {}
                Err(ArbitrationFailure::Registry(e)) => return Err(e),
                Err(failure) => trace!(recognizer = %id, requested = %state, %failure, "transition not taken"),
            }
        }
        Ok(())
    }

    // --- State machine ---

    /// Request that `id` move to `state`, running arbitration and notifying
    /// listeners as the transition requires.
    ///
    /// Any previously deferred request of `id` is discarded first.
    ///
    /// # Errors
    ///
    /// Returns the [`ArbitrationFailure`] explaining why the state did not
    /// change to `state`.
    pub fn request_transition(&mut self, id: RecognizerId, state: GestureState) -> Result<(), ArbitrationFailure> {
        let from = {
            let core = &mut self.entry_mut(id)?.core;
            core.next_state = None;
            core.state
        };
        if !from.can_transition_to(state) {
            return Err(ArbitrationFailure::IllegalTransition { from, to: state });
        }

        match state {
            GestureState::Failed => self.fail(id)?,
            GestureState::Began | GestureState::Recognized => {
                self.arbitrate(id, state)?;
                self.commit(id, state)?;
                let entry = self.entry_mut(id)?;
                entry.gesture.prepare_to_recognize(&entry.core);
                self.notify(id)?;
                if state == GestureState::Recognized {
                    self.reset_if_events_ended(id)?;
                }
            }
            GestureState::Changed => {
                self.commit(id, state)?;
                self.notify(id)?;
            }
            GestureState::Cancelled | GestureState::Ended => {
                self.commit(id, state)?;
                self.notify(id)?;
                self.reset_if_events_ended(id)?;
            }
            GestureState::Possible => return Err(ArbitrationFailure::IllegalTransition { from, to: state }),
        }
        Ok(())
    }

    fn arbitrate(&mut self, id: RecognizerId, requested: GestureState) -> Result<(), ArbitrationFailure> {
        let target = self.entry(id)?.core.target();
        let peers: Vec<RecognizerId> = self.ids_for_target(target).into_iter().filter(|&p| p != id).collect();

        let prevented_by = peers.iter().copied().find(|&p| {
            self.state_of(p).has_recognized()
                && (self.graph.requires_failure_of(id, p) || !self.graph.can_recognize_with(id, p))
        });
        if let Some(by) = prevented_by {
            debug!(recognizer = %id, by = %by, "recognition prevented");
            self.fail(id)?;
            return Err(ArbitrationFailure::Prevented { by });
        }

        let waiting_on = peers
            .iter()
            .copied()
            .find(|&p| self.state_of(p) == GestureState::Possible && self.graph.requires_failure_of(id, p));
        if let Some(waiting_on) = waiting_on {
            debug!(recognizer = %id, waiting_on = %waiting_on, requested = %requested, "transition deferred");
            self.entry_mut(id)?.core.next_state = Some(requested);
            return Err(ArbitrationFailure::Deferred { waiting_on });
        }

        for peer in peers {
            let preventable = self.state_of(peer) == GestureState::Possible
                && (self.graph.requires_failure_of(peer, id) || !self.graph.can_recognize_with(id, peer));
            if preventable {
                debug!(recognizer = %peer, by = %id, "forcing competing recognizer to fail");
                if let Err(failure) = self.request_transition(peer, GestureState::Failed) {
                    trace!(recognizer = %peer, %failure, "forced failure not applied");
                }
            }
        }

        if self.state_of(id) != GestureState::Possible {
            return Err(ArbitrationFailure::Preempted);
        }
        Ok(())
    }

    /// Move to `Failed`, resume dependents waiting on this failure, then
    /// reset if input has ended.
    fn fail(&mut self, id: RecognizerId) -> Result<(), GestureError> {
        self.commit(id, GestureState::Failed)?;

        for dependent in self.graph.dependents_of(id) {
            let pending = self
                .entries
                .get(dependent.0)
                .and_then(Option::as_ref)
                .filter(|e| !e.core.input_ended())
                .and_then(|e| e.core.next_state);
            if let Some(next) = pending {
                debug!(recognizer = %dependent, after = %id, requested = %next, "resuming deferred transition");
                if let Err(failure) = self.request_transition(dependent, next) {
                    trace!(recognizer = %dependent, %failure, "deferred transition not taken");
                }
            }
        }

        self.reset_if_events_ended(id)
    }

    fn commit(&mut self, id: RecognizerId, state: GestureState) -> Result<(), GestureError> {
        let entry = self.entry_mut(id)?;
        let from = entry.core.state;
        entry.core.state = state;
        debug!(recognizer = %id, kind = %entry.gesture.kind(), %from, to = %state, "gesture transition");
        Ok(())
    }

    fn notify(&mut self, id: RecognizerId) -> Result<(), GestureError> {
        let entry = self.entry_mut(id)?;
        let change = GestureChange {
            recognizer: id,
            kind: entry.gesture.kind(),
            target: entry.core.target(),
            state: entry.core.state,
            client: entry.core.client(),
            translation: entry.core.translation(),
            detail: entry.gesture.detail(),
        };
        for (_, listener) in &mut entry.listeners {
            listener.gesture_state_changed(&change);
        }
        for (_, callback) in &mut entry.callbacks {
            callback(&change);
        }
        self.changes.push(change);
        Ok(())
    }

    fn reset_if_events_ended(&mut self, id: RecognizerId) -> Result<(), GestureError> {
        let entry = self.entry_mut(id)?;
        if !entry.core.input_ended() {
            return Ok(());
        }
        entry.core.next_state = None;
        if entry.core.state != GestureState::Possible {
            trace!(recognizer = %id, from = %entry.core.state, "recognizer reset");
            entry.core.reset();
            entry.gesture.reset();
            self.timers.remove(&id);
        }
        Ok(())
    }

    // --- Entry access ---

    fn entry(&self, id: RecognizerId) -> Result<&Entry, GestureError> {
        self.entries
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(GestureError::UnknownRecognizer(id))
    }

    fn entry_mut(&mut self, id: RecognizerId) -> Result<&mut Entry, GestureError> {
        self.entries
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(GestureError::UnknownRecognizer(id))
    }

    /// State of `id`; unregistered recognizers read as `Failed`.
    fn state_of(&self, id: RecognizerId) -> GestureState {
        self.entry(id).map_or(GestureState::Failed, |e| e.core.state)
    }
}
