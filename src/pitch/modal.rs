use lineup_protocol::PlayerRecord;
use serde::Serialize;

/// What the per-slot player editor is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ModalMode {
    Closed,
    Searching,
    Bound,
}

/// Status line under the search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SearchHint {
    /// Nothing typed yet.
    Idle,
    /// Too short to search.
    TypeMore,
    /// Waiting out the debounce window.
    Waiting,
    Loading,
    NoPlayersFound,
    Results(usize),
}

/// Transient state of the open player editor. Exists only while the modal
/// is open.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditingSession {
    pub(crate) target: usize,
    pub(crate) query: String,
    pub(crate) results: Vec<PlayerRecord>,
    pub(crate) is_loading: bool,
    pub(crate) awaiting: bool,
    pub(crate) generation: u64,
}

impl EditingSession {
    pub(crate) fn new(target: usize, generation: u64) -> Self {
        Self {
            target,
            generation,
            ..Default::default()
        }
    }

    pub fn target(&self) -> usize {
        self.target
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[PlayerRecord] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Generation of the latest query issued in this session.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn hint(&self, min_query_len: usize) -> SearchHint {
        let len = query_len(&self.query);
        if len == 0 {
            SearchHint::Idle
        } else if len < min_query_len {
            SearchHint::TypeMore
        } else if self.is_loading {
            SearchHint::Loading
        } else if self.awaiting {
            SearchHint::Waiting
        } else if self.results.is_empty() {
            SearchHint::NoPlayersFound
        } else {
            SearchHint::Results(self.results.len())
        }
    }

    pub(crate) fn reset_search(&mut self) {
        self.query.clear();
        self.results.clear();
        self.is_loading = false;
        self.awaiting = false;
    }
}

/// Length of a query in characters, whitespace included.
pub fn query_len(query: &str) -> usize {
    query.chars().count()
}
