//! "Last request wins" bookkeeping for view data.
//!
//! Every fetch takes a [`RequestTicket`] before it suspends. When it completes, the result is
//! kept only if no newer ticket was issued in the meantime, so a slow early response can never
//! overwrite what a later one already put on screen.

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

impl RequestTicket {
    pub fn seq(self) -> u64 {
        self.0
    }
}

/// Monotonic ticket source for one slot of view state.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    issued: u64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> RequestTicket {
        self.issued += 1;
        RequestTicket(self.issued)
    }

    /// True when `ticket` is the most recently issued one.
    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.issued
    }
}

/// A value slot fed by sequenced requests.
#[derive(Debug)]
pub struct Latest<T> {
    sequencer: RequestSequencer,
    applied: Option<RequestTicket>,
    value: Option<T>,
}

impl<T> Default for Latest<T> {
    fn default() -> Self {
        Self {
            sequencer: RequestSequencer::new(),
            applied: None,
            value: None,
        }
    }
}

impl<T> Latest<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the ticket for a request about to be sent. Supersedes every earlier ticket.
    pub fn begin(&mut self) -> RequestTicket {
        self.sequencer.issue()
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        self.sequencer.is_current(ticket)
            && self.applied.map_or(true, |applied| ticket >= applied)
    }

    /// Stores `value` if `ticket` is still current. Returns whether it was applied.
    pub fn complete(&mut self, ticket: RequestTicket, value: T) -> bool {
        if !self.is_current(ticket) {
            debug!(
                "Discarding stale response #{} (latest issued #{})",
                ticket.0, self.sequencer.issued
            );
            return false;
        }
        self.applied = Some(ticket);
        self.value = Some(value);
        true
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.value.as_mut()
    }

    /// Drops the stored value. Outstanding tickets stay valid.
    pub fn clear(&mut self) {
        self.value = None;
    }
}
