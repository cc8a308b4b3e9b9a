//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `PageState` / `ItemState`: how each listing page and product link ended
//! - `SeenLinks`: product links already dispatched in this run
//! - `StopSignal`: the manual interruption flag

mod page_state;
mod seen_links;
mod stop_signal;

// Re-export main types
pub use page_state::{ItemState, PageState};
pub use seen_links::SeenLinks;
pub use stop_signal::{Interrupt, StopSignal};
