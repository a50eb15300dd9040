//! Debounce bookkeeping for handlers scheduled on the host's event queue.
//!
//! The host owns the actual timer; this tracks which scheduled call is the
//! latest, so that superseded calls are dropped when their timer fires and
//! only the last one within the quiet window runs.

/// Identifies one scheduled call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug, Default)]
pub struct Debouncer {
    generation: u64,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new scheduled call, superseding any earlier one.
    pub fn schedule(&mut self) -> Ticket {
        self.generation += 1;
        Ticket(self.generation)
    }

    /// True while `ticket` is still the latest scheduled call; only then
    /// should the handler body run.
    pub fn should_fire(&self, ticket: Ticket) -> bool {
        ticket.0 == self.generation
    }

    /// Invalidate every outstanding ticket.
    pub fn cancel(&mut self) {
        self.generation += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_latest_ticket_fires() {
        let mut debouncer = Debouncer::new();
        let first = debouncer.schedule();
        let second = debouncer.schedule();
        assert!(!debouncer.should_fire(first));
        assert!(debouncer.should_fire(second));
    }

    #[test]
    fn test_cancel_invalidates_pending() {
        let mut debouncer = Debouncer::new();
        let ticket = debouncer.schedule();
        debouncer.cancel();
        assert!(!debouncer.should_fire(ticket));
    }
}
