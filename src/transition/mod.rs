pub mod adapter;
pub mod coordinator;
pub mod interaction;
pub mod lock;

pub use adapter::{ContentFade, DirectNavigation, Lifecycle, NavigationError, PageTransitionAdapter};
pub use coordinator::{ClickOutcome, CoordinatorEvent, IgnoreReason, Phase, TransitionCoordinator};
