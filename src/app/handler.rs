//! Event handling and state transition logic.
//!
//! This module implements the event handler that processes user intents and
//! transport completions, translating them into session mutations and action
//! sequences. It is the single entry point through which a host drives the
//! search screen.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow:
//!
//! 1. Events arrive from the host UI or the transport driver
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur via [`SearchSession`] methods
//! 4. Actions are collected and returned for execution
//!
//! Completions re-enter here in whatever order they resolve, not the order
//! their requests were issued. That is why every completion carries a tag
//! (generation or ticket) and why the session compares tags instead of
//! assuming ordering.
//!
//! # Event Types
//!
//! - **User intents**: `SearchSubmitted`, `RefreshRequested`, `EndReached`,
//!   `FavoriteToggled`
//! - **Transport completions**: `PageFetched`, `FavoriteSettled`,
//!   `DetailFetched`

use crate::app::actions::Action;
use crate::app::state::SearchSession;
use crate::domain::{Book, BookPage, Result};

/// Events triggered by user input or transport completions.
///
/// Named in past tense: each variant records something that happened, not
/// something to do. The handler processes them sequentially on one logical
/// event loop, so state transitions are deterministic for a given event
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The user pressed search with the given raw input.
    SearchSubmitted {
        /// Unnormalized text from the input field.
        input: String,
    },

    /// The user pulled to refresh the current result list.
    RefreshRequested,

    /// The list scrolled to its end (infinite-scroll trigger).
    EndReached,

    /// The user tapped the favorite toggle on a result row.
    FavoriteToggled {
        /// Book whose flag to flip.
        isbn: u64,
    },

    /// A page fetch resolved.
    PageFetched {
        /// Generation the fetch was issued under.
        generation: u64,
        /// Page number the fetch answered.
        page_number: u32,
        /// The page, or the transport failure.
        outcome: Result<BookPage>,
    },

    /// A favorite mutation resolved.
    FavoriteSettled {
        /// Book the mutation targeted.
        isbn: u64,
        /// Settlement ticket issued at toggle time.
        ticket: u64,
        /// Generation active at toggle time.
        generation: u64,
        /// The committed value, or the transport failure.
        outcome: Result<bool>,
    },

    /// A detail fetch resolved.
    ///
    /// Belongs to a [`DetailLookup`](crate::app::DetailLookup), not to the
    /// search session; hosts route it there. The search handler ignores it.
    DetailFetched {
        /// Epoch of the requesting lookup.
        epoch: u64,
        /// The record, or the transport failure.
        outcome: Result<Book>,
    },
}

/// Processes an event, mutates session state, and returns actions to execute.
///
/// Returns `(should_render, actions)`: whether visible state changed, and the
/// side effects the host must run (transport calls for the driver, notices
/// for the host itself). The actions vector may be empty — stale completions
/// and rejected re-entrant triggers produce nothing.
///
/// # Errors
///
/// Returns [`BookscoutError::EmptyQuery`](crate::BookscoutError::EmptyQuery)
/// when a submission or refresh carries no usable term; the caller surfaces a
/// prompt and session state is guaranteed untouched.
pub fn handle_event(session: &mut SearchSession, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = %discriminant_name(event)).entered();

    match event {
        Event::SearchSubmitted { input } => {
            let action = session.start_search(input)?;
            Ok((true, vec![action]))
        }
        Event::RefreshRequested => {
            let action = session.refresh()?;
            Ok((true, vec![action]))
        }
        Event::EndReached => match session.next_page_request() {
            Some(action) => Ok((true, vec![action])),
            None => Ok((false, vec![])),
        },
        Event::FavoriteToggled { isbn } => {
            let action = session.toggle_favorite(*isbn);
            Ok((true, vec![action]))
        }
        Event::PageFetched {
            generation,
            page_number,
            outcome,
        } => {
            let changed = session.apply_page_fetched(*generation, *page_number, outcome.clone());
            Ok((changed, vec![]))
        }
        Event::FavoriteSettled {
            isbn,
            ticket,
            generation,
            outcome,
        } => {
            let (changed, notice) =
                session.apply_favorite_settled(*isbn, *ticket, *generation, outcome);
            Ok((changed, notice.into_iter().collect()))
        }
        Event::DetailFetched { epoch, .. } => {
            tracing::trace!(epoch, "detail completion reached search handler, ignoring");
            Ok((false, vec![]))
        }
    }
}

fn discriminant_name(event: &Event) -> &'static str {
    match event {
        Event::SearchSubmitted { .. } => "SearchSubmitted",
        Event::RefreshRequested => "RefreshRequested",
        Event::EndReached => "EndReached",
        Event::FavoriteToggled { .. } => "FavoriteToggled",
        Event::PageFetched { .. } => "PageFetched",
        Event::FavoriteSettled { .. } => "FavoriteSettled",
        Event::DetailFetched { .. } => "DetailFetched",
    }
}
