//! Actions representing side effects to be executed by the host.
//!
//! This module defines the [`Action`] type, the imperative commands produced
//! by the event handler after processing user input or async completions.
//! Actions bridge pure state transformations and effectful operations: the
//! core never performs I/O itself, it only describes what should happen next.
//!
//! Transport actions ([`Action::FetchPage`], [`Action::SetFavorite`],
//! [`Action::FetchDetail`]) are consumed by
//! [`TransportDriver`](crate::transport::TransportDriver), which runs the
//! remote call and feeds the completion back as an event. View-level actions
//! ([`Action::ShowNotice`]) are the host's to render and never re-enter the
//! core.

/// Commands representing side effects to be executed by the host runtime.
///
/// Every action that starts a remote call carries the tag (`generation` or
/// `ticket`) that its completion event must present; the core uses the tag,
/// not request order, to decide whether the completion still matters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Fetch one page of search results.
    FetchPage {
        /// Normalized search term.
        term: String,
        /// 1-based page to request.
        page_number: u32,
        /// Page length to request; also the end-of-results threshold.
        page_size: u32,
        /// Generation the completion must carry to be applied.
        generation: u64,
    },

    /// Persist a favorite flag remotely.
    SetFavorite {
        /// Book to update.
        isbn: u64,
        /// Flag value to establish.
        desired: bool,
        /// Settlement ticket; a superseding toggle invalidates it.
        ticket: u64,
        /// Generation the completion must carry to be applied.
        generation: u64,
    },

    /// Fetch the detail record for a single book.
    FetchDetail {
        /// Book to look up.
        isbn: u64,
        /// Epoch of the requesting [`DetailLookup`](crate::app::DetailLookup).
        epoch: u64,
    },

    /// Show a transient, toast-level notice.
    ///
    /// Emitted when a favorite mutation rolls back. Never session state: the
    /// result list stays up and the session status is untouched.
    ShowNotice {
        /// Human-readable message for the host to display.
        message: String,
    },
}
