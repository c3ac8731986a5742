//! Folder navigation state.

pub mod history;
pub mod requests;

pub use history::NavigationHistory;
pub use requests::{FetchTicket, RequestTracker};
