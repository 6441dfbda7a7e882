//! Optimistic favorite state with rollback and superseding.
//!
//! The backend has no readable favorite field in the search flow, so favorite
//! flags live entirely in this session-local overlay. A toggle flips the
//! visible flag immediately and records a pending mutation; the remote call
//! settles later. Settlement is keyed by a monotonically increasing ticket so
//! that a second toggle on the same isbn supersedes the first: the first
//! call's completion no longer matches the stored ticket and is dropped
//! without applying its commit or rollback.
//!
//! Generation changes (a new search or refresh) clear the overlay wholesale —
//! item identity is scoped to the result set that produced it, so neither
//! flags nor pending rollbacks survive into the next generation.

use std::collections::HashMap;

/// A favorite mutation that has been applied optimistically but not settled.
///
/// `previous` is the visible flag at apply time, which is what a rollback
/// restores. When a toggle supersedes an earlier pending toggle, `previous`
/// is the superseded toggle's optimistic value, not the value before the
/// whole exchange started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMutation {
    /// Settlement key; only the completion carrying this ticket may resolve
    /// the mutation.
    pub ticket: u64,

    /// Visible flag at apply time, restored on rollback.
    pub previous: bool,

    /// Search generation active when the toggle happened.
    pub generation: u64,
}

/// What a toggle produced: the value to request remotely and the ticket the
/// completion must present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleReceipt {
    /// The flag value the remote call should establish.
    pub desired: bool,

    /// Settlement key for this mutation.
    pub ticket: u64,
}

/// Outcome of applying a settlement to the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// The mutation succeeded; the optimistic flag stands.
    Committed,

    /// The mutation failed; the visible flag was restored to `restored`.
    RolledBack {
        /// Flag value after the rollback.
        restored: bool,
    },

    /// The completion's ticket no longer matches the active pending mutation
    /// (a later toggle superseded it, or the overlay was reset). No visible
    /// effect.
    Superseded,
}

/// Session-local favorite flags plus their in-flight mutations.
///
/// Owned by the search session; the host reads flags only through
/// [`is_favorite`](FavoriteOverlay::is_favorite) and mutates only through
/// [`toggle`](FavoriteOverlay::toggle) and
/// [`settle`](FavoriteOverlay::settle).
#[derive(Debug, Clone, Default)]
pub struct FavoriteOverlay {
    /// Visible overrides. Absence means the default, not favorited.
    flags: HashMap<u64, bool>,

    /// At most one pending mutation per isbn; a newer toggle overwrites.
    pending: HashMap<u64, PendingMutation>,

    /// Ticket source, shared across all isbns.
    next_ticket: u64,
}

impl FavoriteOverlay {
    /// Creates an empty overlay.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current visible favorite flag for `isbn`.
    #[must_use]
    pub fn is_favorite(&self, isbn: u64) -> bool {
        self.flags.get(&isbn).copied().unwrap_or(false)
    }

    /// True while a mutation for `isbn` awaits settlement.
    #[must_use]
    pub fn is_pending(&self, isbn: u64) -> bool {
        self.pending.contains_key(&isbn)
    }

    /// Flips the visible flag for `isbn` and records the pending mutation.
    ///
    /// If a mutation for `isbn` is already pending it is superseded: its
    /// record is overwritten and its eventual completion will fail the ticket
    /// check in [`settle`](Self::settle). The new mutation's rollback point is
    /// the visible value right now, i.e. the superseded toggle's optimistic
    /// value.
    ///
    /// Returns the value to request remotely and the settlement ticket.
    pub fn toggle(&mut self, isbn: u64, generation: u64) -> ToggleReceipt {
        let previous = self.is_favorite(isbn);
        let desired = !previous;

        self.next_ticket += 1;
        let ticket = self.next_ticket;

        self.set_flag(isbn, desired);
        let superseded = self
            .pending
            .insert(
                isbn,
                PendingMutation {
                    ticket,
                    previous,
                    generation,
                },
            )
            .is_some();

        tracing::debug!(
            isbn,
            desired,
            ticket,
            generation,
            superseded,
            "favorite toggled optimistically"
        );

        ToggleReceipt { desired, ticket }
    }

    /// Resolves the pending mutation for `isbn`, if `ticket` still names it.
    ///
    /// On success the optimistic flag stands. On failure the flag reverts to
    /// the recorded rollback point. A ticket that no longer matches — because
    /// a later toggle superseded it or a generation change reset the overlay —
    /// settles as [`Settlement::Superseded`] and changes nothing.
    pub fn settle(&mut self, isbn: u64, ticket: u64, succeeded: bool) -> Settlement {
        match self.pending.get(&isbn) {
            Some(active) if active.ticket == ticket => {
                let previous = active.previous;
                self.pending.remove(&isbn);
                if succeeded {
                    tracing::debug!(isbn, ticket, "favorite mutation committed");
                    Settlement::Committed
                } else {
                    self.set_flag(isbn, previous);
                    tracing::debug!(isbn, ticket, restored = previous, "favorite mutation rolled back");
                    Settlement::RolledBack { restored: previous }
                }
            }
            _ => {
                tracing::debug!(isbn, ticket, "favorite settlement superseded, dropping");
                Settlement::Superseded
            }
        }
    }

    /// Drops all flags and pending mutations.
    ///
    /// Called on every generation change. Pending mutations are discarded
    /// without rollback side effects; their completions will settle as
    /// superseded.
    pub fn reset(&mut self) {
        if !self.flags.is_empty() || !self.pending.is_empty() {
            tracing::debug!(
                flags = self.flags.len(),
                pending = self.pending.len(),
                "favorite overlay reset"
            );
        }
        self.flags.clear();
        self.pending.clear();
    }

    /// Stores an override, keeping the map to true overrides only.
    fn set_flag(&mut self, isbn: u64, value: bool) {
        if value {
            self.flags.insert(isbn, true);
        } else {
            self.flags.remove(&isbn);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ISBN: u64 = 9_791_158_391_409;

    #[test]
    fn toggle_applies_optimistically() {
        let mut overlay = FavoriteOverlay::new();
        assert!(!overlay.is_favorite(ISBN));

        let receipt = overlay.toggle(ISBN, 1);
        assert!(receipt.desired);
        assert!(overlay.is_favorite(ISBN));
        assert!(overlay.is_pending(ISBN));
    }

    #[test]
    fn commit_keeps_the_flipped_flag() {
        let mut overlay = FavoriteOverlay::new();
        let receipt = overlay.toggle(ISBN, 1);

        assert_eq!(overlay.settle(ISBN, receipt.ticket, true), Settlement::Committed);
        assert!(overlay.is_favorite(ISBN));
        assert!(!overlay.is_pending(ISBN));
    }

    #[test]
    fn failure_rolls_back_to_previous() {
        let mut overlay = FavoriteOverlay::new();
        let receipt = overlay.toggle(ISBN, 1);

        assert_eq!(
            overlay.settle(ISBN, receipt.ticket, false),
            Settlement::RolledBack { restored: false }
        );
        assert!(!overlay.is_favorite(ISBN));
    }

    #[test]
    fn second_toggle_supersedes_the_first() {
        let mut overlay = FavoriteOverlay::new();
        let first = overlay.toggle(ISBN, 1); // false -> true
        let second = overlay.toggle(ISBN, 1); // true -> false

        assert!(!second.desired);
        assert!(!overlay.is_favorite(ISBN));

        // First completion arrives late; whichever way it went, it must not
        // touch the visible flag.
        assert_eq!(overlay.settle(ISBN, first.ticket, false), Settlement::Superseded);
        assert!(!overlay.is_favorite(ISBN));

        // Second completion still settles normally. Its rollback point is the
        // first toggle's optimistic value.
        assert_eq!(
            overlay.settle(ISBN, second.ticket, false),
            Settlement::RolledBack { restored: true }
        );
        assert!(overlay.is_favorite(ISBN));
    }

    #[test]
    fn reset_discards_pending_without_rollback() {
        let mut overlay = FavoriteOverlay::new();
        let receipt = overlay.toggle(ISBN, 1);
        overlay.reset();

        assert!(!overlay.is_favorite(ISBN));
        assert!(!overlay.is_pending(ISBN));
        assert_eq!(overlay.settle(ISBN, receipt.ticket, false), Settlement::Superseded);
        assert!(!overlay.is_favorite(ISBN));
    }

    #[test]
    fn isbns_settle_independently() {
        let mut overlay = FavoriteOverlay::new();
        let a = overlay.toggle(1, 1);
        let b = overlay.toggle(2, 1);

        assert_eq!(overlay.settle(2, b.ticket, false), Settlement::RolledBack { restored: false });
        assert!(overlay.is_favorite(1));
        assert!(!overlay.is_favorite(2));
        assert_eq!(overlay.settle(1, a.ticket, true), Settlement::Committed);
        assert!(overlay.is_favorite(1));
    }

    proptest! {
        // However many toggles pile up before anything settles, only the last
        // receipt can resolve the mutation, and a rollback restores exactly
        // the visible value recorded when that last toggle was applied.
        #[test]
        fn only_the_last_ticket_settles(toggles in 1usize..8, last_succeeds in any::<bool>()) {
            let mut overlay = FavoriteOverlay::new();
            let receipts: Vec<ToggleReceipt> =
                (0..toggles).map(|_| overlay.toggle(ISBN, 1)).collect();

            let last = receipts[receipts.len() - 1];
            let visible_after_last = last.desired;
            let rollback_point = !visible_after_last;

            for stale in &receipts[..receipts.len() - 1] {
                prop_assert_eq!(overlay.settle(ISBN, stale.ticket, true), Settlement::Superseded);
                prop_assert_eq!(overlay.is_favorite(ISBN), visible_after_last);
            }

            let settlement = overlay.settle(ISBN, last.ticket, last_succeeds);
            if last_succeeds {
                prop_assert_eq!(settlement, Settlement::Committed);
                prop_assert_eq!(overlay.is_favorite(ISBN), last.desired);
            } else {
                prop_assert_eq!(settlement, Settlement::RolledBack { restored: rollback_point });
                prop_assert_eq!(overlay.is_favorite(ISBN), rollback_point);
            }
            prop_assert!(!overlay.is_pending(ISBN));
        }
    }
}
