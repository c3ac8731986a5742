//! Request generations for folder-contents fetches.
//!
//! Every fetch gets a ticket from one monotonically increasing counter.
//! A response may only be applied while its ticket is still the latest
//! one issued for its folder; anything older is a late, out-of-order
//! arrival and is dropped.

use std::collections::HashMap;

use serde::Serialize;

/// Identifies one issued folder-contents request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FetchTicket {
    slug: String,
    generation: u64,
}

impl FetchTicket {
    pub fn slug(&self) -> &str {
        &self.slug
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Tracks the latest ticket per folder slug.
#[derive(Debug, Default)]
pub struct RequestTracker {
    next_generation: u64,
    latest: HashMap<String, u64>,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for `slug`, superseding any earlier one.
    pub fn issue(&mut self, slug: &str) -> FetchTicket {
        self.next_generation += 1;
        self.latest.insert(slug.to_string(), self.next_generation);
        FetchTicket {
            slug: slug.to_string(),
            generation: self.next_generation,
        }
    }

    /// Whether `ticket` is the most recent one for its slug.
    pub fn is_latest(&self, ticket: &FetchTicket) -> bool {
        self.latest.get(&ticket.slug) == Some(&ticket.generation)
    }

    /// Discard every outstanding ticket for `slug`. Returns whether one
    /// was outstanding.
    pub fn cancel(&mut self, slug: &str) -> bool {
        self.latest.remove(slug).is_some()
    }

    /// Number of folders with an outstanding ticket.
    pub fn pending(&self) -> usize {
        self.latest.len()
    }
}
