//! Screen projection layer.
//!
//! Rendering itself is a host concern; this crate only computes what to
//! render. The module follows a declarative model:
//!
//! ```text
//! SearchSession → compute_viewmodel → SearchViewModel → host renderer
//! ```
//!
//! View models are immutable snapshots. The host recomputes one whenever the
//! event handler reports a state change and renders it however it likes.

pub mod viewmodel;

pub use viewmodel::{DetailViewModel, DisplayBook, SearchViewModel};
