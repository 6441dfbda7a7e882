//! Action execution against the transport.
//!
//! This module bridges the synchronous core and the asynchronous backend. The
//! host hands transport actions to [`TransportDriver::dispatch`]; the driver
//! spawns one tokio task per action, runs the single transport call, and
//! posts the completion back over an unbounded channel as an [`Event`] for
//! the host's event loop to feed into the handler.
//!
//! The driver never interprets results. In particular it does not try to
//! decide staleness: completions are delivered in whatever order the calls
//! resolve, and the core discards the ones whose generation, ticket, or epoch
//! no longer matches. Cancelling an obsolete call at the transport level is
//! unnecessary — its completion is cheap to drop.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::app::{Action, Event};
use crate::transport::BookTransport;

/// Executes transport actions and feeds completions back as events.
///
/// Create one per event loop with [`TransportDriver::new`]; the receiver half
/// of the returned channel is the host's source of completion events.
pub struct TransportDriver {
    transport: Arc<dyn BookTransport>,
    events: mpsc::UnboundedSender<Event>,
}

impl TransportDriver {
    /// Creates a driver around `transport` plus the channel its completions
    /// arrive on.
    #[must_use]
    pub fn new(transport: Arc<dyn BookTransport>) -> (Self, mpsc::UnboundedReceiver<Event>) {
        let (events, receiver) = mpsc::unbounded_channel();
        (Self { transport, events }, receiver)
    }

    /// Executes one action.
    ///
    /// Transport actions spawn a task that performs exactly one call and
    /// posts exactly one completion event. View-level actions
    /// ([`Action::ShowNotice`]) are not the driver's to execute and are
    /// ignored with a trace log.
    ///
    /// Must be called within a tokio runtime context.
    pub fn dispatch(&self, action: &Action) {
        match action {
            Action::FetchPage {
                term,
                page_number,
                page_size,
                generation,
            } => {
                let transport = Arc::clone(&self.transport);
                let events = self.events.clone();
                let term = term.clone();
                let (page_number, page_size, generation) = (*page_number, *page_size, *generation);
                tokio::spawn(async move {
                    let outcome = transport.fetch_page(&term, page_number, page_size).await;
                    let event = Event::PageFetched {
                        generation,
                        page_number,
                        outcome,
                    };
                    if events.send(event).is_err() {
                        tracing::debug!(generation, page_number, "event loop gone, dropping page completion");
                    }
                });
            }
            Action::SetFavorite {
                isbn,
                desired,
                ticket,
                generation,
            } => {
                let transport = Arc::clone(&self.transport);
                let events = self.events.clone();
                let (isbn, desired, ticket, generation) = (*isbn, *desired, *ticket, *generation);
                tokio::spawn(async move {
                    let outcome = transport.set_favorite(isbn, desired).await;
                    let event = Event::FavoriteSettled {
                        isbn,
                        ticket,
                        generation,
                        outcome,
                    };
                    if events.send(event).is_err() {
                        tracing::debug!(isbn, ticket, "event loop gone, dropping favorite completion");
                    }
                });
            }
            Action::FetchDetail { isbn, epoch } => {
                let transport = Arc::clone(&self.transport);
                let events = self.events.clone();
                let (isbn, epoch) = (*isbn, *epoch);
                tokio::spawn(async move {
                    let outcome = transport.fetch_detail(isbn).await;
                    let event = Event::DetailFetched { epoch, outcome };
                    if events.send(event).is_err() {
                        tracing::debug!(isbn, epoch, "event loop gone, dropping detail completion");
                    }
                });
            }
            Action::ShowNotice { .. } => {
                tracing::trace!("notice action left to the host");
            }
        }
    }

    /// Executes a batch of actions in order.
    pub fn dispatch_all<'a>(&self, actions: impl IntoIterator<Item = &'a Action>) {
        for action in actions {
            self.dispatch(action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use async_trait::async_trait;
    use tokio::sync::{oneshot, Mutex};

    use crate::app::{handle_event, DetailLookup, SearchSession};
    use crate::domain::{Book, BookPage, BookscoutError, Result};
    use crate::SearchConfig;

    fn book(isbn: u64, title: &str) -> Book {
        Book {
            isbn,
            title: title.to_string(),
            author: "author".to_string(),
            image: String::new(),
            description: String::new(),
            publisher: String::new(),
        }
    }

    fn page_of(titles: &[(u64, &str)], page_number: u32, requested_size: u32) -> BookPage {
        BookPage {
            books: titles.iter().map(|(i, t)| book(*i, t)).collect(),
            page_number,
            requested_size,
            total: titles.len() as u32,
        }
    }

    /// Transport whose page fetches block until the test releases them, keyed
    /// by search term. Favorite mutations fail; detail fetches block keyed by
    /// isbn.
    #[derive(Default)]
    struct GatedTransport {
        pages: Mutex<HashMap<String, oneshot::Receiver<Result<BookPage>>>>,
        details: Mutex<HashMap<u64, oneshot::Receiver<Result<Book>>>>,
    }

    impl GatedTransport {
        async fn gate_page(&self, term: &str) -> oneshot::Sender<Result<BookPage>> {
            let (tx, rx) = oneshot::channel();
            self.pages.lock().await.insert(term.to_string(), rx);
            tx
        }

        async fn gate_detail(&self, isbn: u64) -> oneshot::Sender<Result<Book>> {
            let (tx, rx) = oneshot::channel();
            self.details.lock().await.insert(isbn, rx);
            tx
        }
    }

    #[async_trait]
    impl BookTransport for GatedTransport {
        async fn fetch_page(&self, term: &str, _page: u32, _size: u32) -> Result<BookPage> {
            let gate = self
                .pages
                .lock()
                .await
                .remove(term)
                .expect("no gate registered for term");
            gate.await.expect("gate dropped")
        }

        async fn set_favorite(&self, _isbn: u64, _desired: bool) -> Result<bool> {
            Err(BookscoutError::Network("favorites are down".to_string()))
        }

        async fn fetch_detail(&self, isbn: u64) -> Result<Book> {
            let gate = self
                .details
                .lock()
                .await
                .remove(&isbn)
                .expect("no gate registered for isbn");
            gate.await.expect("gate dropped")
        }
    }

    // A newer search's page resolves before the older search's page. The late
    // completion must be discarded and the final state must reflect only the
    // newer generation.
    #[tokio::test]
    async fn out_of_order_completions_resolve_to_the_newest_generation() {
        let transport = Arc::new(GatedTransport::default());
        let release_old = transport.gate_page("dune").await;
        let release_new = transport.gate_page("arrakis").await;

        let (driver, mut events) = TransportDriver::new(Arc::clone(&transport) as Arc<dyn BookTransport>);
        let mut session = SearchSession::new(SearchConfig { page_size: 20 });

        let (_, actions) = handle_event(
            &mut session,
            &Event::SearchSubmitted {
                input: "dune".to_string(),
            },
        )
        .unwrap();
        driver.dispatch_all(&actions);

        let (_, actions) = handle_event(
            &mut session,
            &Event::SearchSubmitted {
                input: "arrakis".to_string(),
            },
        )
        .unwrap();
        driver.dispatch_all(&actions);

        release_new
            .send(Ok(page_of(&[(1, "Arrakis Atlas")], 1, 20)))
            .unwrap();
        let event = events.recv().await.unwrap();
        let (changed, _) = handle_event(&mut session, &event).unwrap();
        assert!(changed);

        release_old
            .send(Ok(page_of(&[(2, "Dune"), (3, "Dune Messiah")], 1, 20)))
            .unwrap();
        let event = events.recv().await.unwrap();
        let (changed, _) = handle_event(&mut session, &event).unwrap();
        assert!(!changed);

        let titles: Vec<&str> = session.item_list().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Arrakis Atlas"]);
    }

    // Optimistic toggle, remote failure: flag reverts, a notice action comes
    // out, session status is untouched.
    #[tokio::test]
    async fn failed_favorite_mutation_rolls_back_with_a_notice() {
        let transport = Arc::new(GatedTransport::default());
        let release = transport.gate_page("dune").await;

        let (driver, mut events) = TransportDriver::new(Arc::clone(&transport) as Arc<dyn BookTransport>);
        let mut session = SearchSession::new(SearchConfig { page_size: 20 });

        let (_, actions) = handle_event(
            &mut session,
            &Event::SearchSubmitted {
                input: "dune".to_string(),
            },
        )
        .unwrap();
        driver.dispatch_all(&actions);
        release.send(Ok(page_of(&[(123, "Dune")], 1, 20))).unwrap();
        let event = events.recv().await.unwrap();
        handle_event(&mut session, &event).unwrap();

        let (_, actions) =
            handle_event(&mut session, &Event::FavoriteToggled { isbn: 123 }).unwrap();
        assert!(session.favorites().is_favorite(123));
        driver.dispatch_all(&actions);

        let event = events.recv().await.unwrap();
        let status_before = session.status();
        let (changed, actions) = handle_event(&mut session, &event).unwrap();

        assert!(changed);
        assert!(matches!(&actions[..], [Action::ShowNotice { .. }]));
        assert!(!session.favorites().is_favorite(123));
        assert_eq!(session.status(), status_before);
    }

    #[tokio::test]
    async fn superseded_detail_fetch_is_ignored_on_arrival() {
        let transport = Arc::new(GatedTransport::default());
        let release_first = transport.gate_detail(1).await;
        let release_second = transport.gate_detail(2).await;

        let (driver, mut events) = TransportDriver::new(Arc::clone(&transport) as Arc<dyn BookTransport>);
        let mut lookup = DetailLookup::new();

        driver.dispatch(&lookup.request(1));
        driver.dispatch(&lookup.request(2));

        release_second.send(Ok(book(2, "Children of Dune"))).unwrap();
        let Event::DetailFetched { epoch, outcome } = events.recv().await.unwrap() else {
            panic!("expected DetailFetched");
        };
        assert!(lookup.settle(epoch, outcome));

        release_first.send(Ok(book(1, "Dune"))).unwrap();
        let Event::DetailFetched { epoch, outcome } = events.recv().await.unwrap() else {
            panic!("expected DetailFetched");
        };
        assert!(!lookup.settle(epoch, outcome));

        let crate::app::DetailStatus::Loaded(loaded) = lookup.status() else {
            panic!("expected Loaded");
        };
        assert_eq!(loaded.isbn, 2);
    }

    #[tokio::test]
    async fn notice_actions_never_reach_the_transport() {
        let transport = Arc::new(GatedTransport::default());
        let (driver, mut events) = TransportDriver::new(transport as Arc<dyn BookTransport>);

        driver.dispatch(&Action::ShowNotice {
            message: "nope".to_string(),
        });

        tokio::task::yield_now().await;
        assert!(events.try_recv().is_err());
    }
}
