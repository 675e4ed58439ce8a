//! Debounced recompute gate for criteria mutations.
//!
//! This module defines [`DebounceGate`], the generation-counted gate that
//! collapses bursts of criteria mutations into a single filter recompute.
//! The gate never owns a timer: it hands the runtime a [`DebounceTicket`]
//! describing when to call back, and validates the ticket's generation when
//! the callback arrives. Arming again before the quiet period elapses
//! invalidates every outstanding ticket, so only the newest one can fire.
//!
//! # Protocol
//!
//! 1. A criteria mutation arrives; the handler calls [`DebounceGate::arm`]
//! 2. The runtime schedules a timer for `ticket.delay` carrying
//!    `ticket.generation`
//! 3. When the timer fires, the runtime delivers the generation back and the
//!    handler calls [`DebounceGate::try_fire`]
//! 4. Only the latest generation is accepted; stale timers are ignored
//! 5. On screen teardown the handler calls [`DebounceGate::cancel`] so no
//!    leaked timer can trigger a recompute after disposal

use std::time::Duration;

/// Default quiet period between the last criteria mutation and the recompute.
const DEFAULT_QUIET_PERIOD_MS: u64 = 300;

/// A scheduled-recompute handle issued by [`DebounceGate::arm`].
///
/// The runtime schedules a timer for `delay` and echoes `generation` back
/// when it fires. Tickets are plain data; dropping one without scheduling it
/// is harmless.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct DebounceTicket {
    /// Generation this ticket belongs to.
    pub generation: u64,

    /// How long the runtime should wait before delivering the tick.
    pub delay: Duration,
}

/// Generation-counted debounce gate.
///
/// Every [`arm`](Self::arm) bumps the generation, implicitly invalidating all
/// previously issued tickets. [`try_fire`](Self::try_fire) accepts the newest
/// generation exactly once, so N rapid mutations inside one quiet window
/// produce exactly one recompute.
///
/// # Examples
///
/// ```
/// use keja::app::debounce::DebounceGate;
///
/// let mut gate = DebounceGate::default();
/// let stale = gate.arm();
/// let fresh = gate.arm();
///
/// assert!(!gate.try_fire(stale.generation));
/// assert!(gate.try_fire(fresh.generation));
/// ```
#[derive(Debug)]
pub struct DebounceGate {
    /// Newest issued generation; tickets below it are stale.
    generation: u64,

    /// Quiet period copied into every issued ticket.
    quiet_period: Duration,
}

impl Default for DebounceGate {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_QUIET_PERIOD_MS))
    }
}

impl DebounceGate {
    /// Creates a gate with the given quiet period.
    #[must_use]
    pub const fn new(quiet_period: Duration) -> Self {
        Self {
            generation: 0,
            quiet_period,
        }
    }

    /// Arms the gate, invalidating any pending recompute.
    ///
    /// Returns a ticket the runtime should schedule. Every call bumps the
    /// generation, so the previously issued ticket (if any) becomes stale.
    pub fn arm(&mut self) -> DebounceTicket {
        self.generation += 1;

        tracing::trace!(generation = self.generation, "debounce armed");

        DebounceTicket {
            generation: self.generation,
            delay: self.quiet_period,
        }
    }

    /// Attempts to fire the recompute for a delivered ticket generation.
    ///
    /// Accepts only the newest generation, and consumes it: a successful fire
    /// invalidates the generation so the same ticket cannot fire twice.
    /// Returns `true` when the caller should run the filter recompute.
    pub fn try_fire(&mut self, generation: u64) -> bool {
        if generation == self.generation {
            // Consume the generation so a duplicate delivery is a no-op.
            self.generation += 1;
            tracing::trace!(generation, "debounce fired");
            true
        } else {
            tracing::trace!(
                generation,
                newest = self.generation,
                "stale debounce tick ignored"
            );
            false
        }
    }

    /// Invalidates every outstanding ticket.
    ///
    /// Called on screen teardown so a timer that outlives the screen cannot
    /// trigger a recompute against disposed state.
    pub fn cancel(&mut self) {
        self.generation += 1;
        tracing::trace!(generation = self.generation, "debounce cancelled");
    }

    /// Returns the configured quiet period.
    #[must_use]
    pub const fn quiet_period(&self) -> Duration {
        self.quiet_period
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_newest_ticket_fires() {
        let mut gate = DebounceGate::default();

        let first = gate.arm();
        let second = gate.arm();
        let third = gate.arm();

        assert!(!gate.try_fire(first.generation));
        assert!(!gate.try_fire(second.generation));
        assert!(gate.try_fire(third.generation));
    }

    #[test]
    fn fire_consumes_the_generation() {
        let mut gate = DebounceGate::default();
        let ticket = gate.arm();

        assert!(gate.try_fire(ticket.generation));
        assert!(!gate.try_fire(ticket.generation));
    }

    #[test]
    fn cancel_invalidates_outstanding_tickets() {
        let mut gate = DebounceGate::default();
        let ticket = gate.arm();
        gate.cancel();

        assert!(!gate.try_fire(ticket.generation));
    }

    #[test]
    fn rearming_after_fire_issues_a_live_ticket() {
        let mut gate = DebounceGate::default();
        let first = gate.arm();
        assert!(gate.try_fire(first.generation));

        let second = gate.arm();
        assert!(gate.try_fire(second.generation));
    }

    #[test]
    fn tickets_carry_the_configured_quiet_period() {
        let mut gate = DebounceGate::new(Duration::from_millis(150));
        let ticket = gate.arm();
        assert_eq!(ticket.delay, Duration::from_millis(150));
        assert_eq!(gate.quiet_period(), Duration::from_millis(150));
    }
}
