//! Optimistic favorite mutation coordination.
//!
//! Favorite flags are session-local UI state, not server truth: the search
//! backend never reports them back. This layer applies toggles optimistically,
//! reconciles or rolls them back when the remote call settles, and lets newer
//! toggles supersede in-flight ones per isbn.

pub mod overlay;

pub use overlay::{FavoriteOverlay, PendingMutation, Settlement, ToggleReceipt};
