//! Session status state machine.
//!
//! One search session moves through a small set of states:
//!
//! - `Idle → Loading → {Loaded, Error}` for the first page of a search
//! - `Loaded → LoadingMore → {Loaded, Error}` for follow-up pages
//! - `Error → LoadingMore` when more results were available before a
//!   next-page fetch failed — scrolling again is the retry
//! - any state `→ Loading` on a new submission or refresh — a generation bump
//!   always restarts from `Loading`, so errors never stick across searches
//!
//! There is no terminal state; the session is reused for the lifetime of the
//! screen that owns it.

/// Fetch status of the current search generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// No search has been submitted yet.
    #[default]
    Idle,

    /// The first page of the current generation is in flight.
    Loading,

    /// A follow-up page is in flight; earlier pages stay visible.
    LoadingMore,

    /// The most recent fetch of this generation succeeded.
    Loaded,

    /// The most recent fetch of this generation failed. Pages fetched before
    /// the failure are retained but not shown until the user retries.
    Error,
}

impl SessionStatus {
    /// True while any page fetch is outstanding.
    ///
    /// Used to reject re-entrant fetch triggers: at most one page fetch per
    /// generation is in flight at any time.
    #[must_use]
    pub fn is_fetching(self) -> bool {
        matches!(self, Self::Loading | Self::LoadingMore)
    }
}
