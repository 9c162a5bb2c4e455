//! Word-swap navigation header for a bilingual static site.
//!
//! The header shows one pinned word for the current page and a pile of
//! links to the others. Clicking a pile word hops it into the pinned slot
//! while the next page is fetched and swapped in behind it.

pub mod config;
pub mod dom;
pub mod header;
pub mod language;
pub mod net;
pub mod render;
pub mod session;
pub mod store;
pub mod transition;

pub use config::WordplayConfig;
pub use language::Language;
pub use session::{Session, SessionError};
pub use transition::coordinator::{ClickOutcome, CoordinatorEvent, TransitionCoordinator};
