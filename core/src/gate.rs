//! Serialization of outbound coordination requests.

/// Allows at most one coordination request to be in flight at a time.
///
/// A second intent arriving while a request is outstanding is dropped, not
/// queued. The coordinator task is the gate's only owner, so a plain flag is
/// enough; the value here is that every dispatch site has to go through
/// [`RequestGate::try_acquire`] and every completion path through
/// [`RequestGate::release`].
#[derive(Debug, Default)]
pub struct RequestGate {
    in_flight: bool,
}

impl RequestGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a request outstanding. Returns false, leaving the gate
    /// untouched, if one already is.
    pub fn try_acquire(&mut self) -> bool {
        if self.in_flight {
            return false;
        }
        self.in_flight = true;
        true
    }

    /// Clears the outstanding request. Must be called exactly once per
    /// successful acquire, on success and failure paths alike.
    pub fn release(&mut self) {
        debug_assert!(self.in_flight, "release without an outstanding request");
        self.in_flight = false;
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight
    }
}
