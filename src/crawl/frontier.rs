// src/crawl/frontier.rs
// =============================================================================
// The three pieces of per-run state the crawl loop threads through:
//
// - Frontier: URLs waiting to be fetched (FIFO = breadth-first)
// - VisitedSet: every URL ever claimed this run (never shrinks)
// - PhoneNumberSet: every canonical number found this run
//
// They are plain owned values. The engine creates them when a crawl starts
// and drops them when it ends, so nothing leaks from one run to the next.
// =============================================================================

use std::collections::{BTreeSet, HashSet, VecDeque};
use url::Url;

// Queue of URLs waiting to be fetched
#[derive(Debug, Default)]
pub struct Frontier {
    queue: VecDeque<Url>,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, url: Url) {
        self.queue.push_back(url);
    }

    pub fn pop(&mut self) -> Option<Url> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

// URLs already claimed by this run
//
// A URL is claimed when it's enqueued, not when it's fetched. That way the
// same link found on five pages only ever sits in the frontier once.
#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: HashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    // Marks the URL as visited
    //
    // Returns true if it wasn't visited before (the caller should enqueue
    // it), false if it was already claimed.
    pub fn claim(&mut self, url: &Url) -> bool {
        self.urls.insert(url.as_str().to_string())
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }
}

// Canonical phone numbers collected across the whole run
#[derive(Debug, Default)]
pub struct PhoneNumberSet {
    numbers: BTreeSet<String>,
}

impl PhoneNumberSet {
    pub fn new() -> Self {
        Self::default()
    }

    // Adds a page's numbers; returns how many were new
    pub fn merge(&mut self, numbers: impl IntoIterator<Item = String>) -> usize {
        let before = self.numbers.len();
        self.numbers.extend(numbers);
        self.numbers.len() - before
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    // Consumes the set, keeping at most `limit` numbers
    pub fn into_capped_vec(self, limit: usize) -> Vec<String> {
        self.numbers.into_iter().take(limit).collect()
    }
}
