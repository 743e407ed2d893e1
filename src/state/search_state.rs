use crate::constants::{MAX_RESULTS, PAGE_STEP};
use crate::models::Track;

/// Identifies one search request; only the latest ticket's response is applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub generation: u64,
    pub keyword: String,
    pub offset: u32,
}

/// Search screen state: query box, current page, results and status
#[derive(Debug, Default)]
pub struct SearchState {
    /// Text box content (edited by the view)
    pub keyword: String,

    // Page on screen (3 fields)
    active_keyword: String,
    offset: u32,
    results: Vec<Track>,

    // Status (2 fields)
    has_searched: bool,
    message: Option<String>,

    // Request bookkeeping (2 fields)
    generation: u64,
    pending: Option<u64>,
}

impl SearchState {
    /// New search for the text box keyword, starting from the first page
    ///
    /// Blank keywords are ignored.
    pub fn begin_search(&mut self) -> Option<SearchTicket> {
        let keyword = self.keyword.trim();
        if keyword.is_empty() {
            return None;
        }
        self.active_keyword = keyword.to_string();
        self.offset = 0;
        Some(self.issue())
    }

    /// Next page of the last submitted search (no upper bound)
    pub fn begin_next_page(&mut self) -> Option<SearchTicket> {
        if !self.has_searched || self.active_keyword.is_empty() {
            return None;
        }
        self.offset += PAGE_STEP;
        Some(self.issue())
    }

    /// Previous page; unavailable on the first page
    pub fn begin_previous_page(&mut self) -> Option<SearchTicket> {
        if !self.previous_enabled() || self.active_keyword.is_empty() {
            return None;
        }
        self.offset = self.offset.saturating_sub(PAGE_STEP);
        Some(self.issue())
    }

    fn issue(&mut self) -> SearchTicket {
        self.generation += 1;
        self.pending = Some(self.generation);
        self.results.clear();
        self.message = None;
        SearchTicket {
            generation: self.generation,
            keyword: self.active_keyword.clone(),
            offset: self.offset,
        }
    }

    /// Apply a response; returns false (and changes nothing) for superseded tickets
    pub fn apply(&mut self, ticket: &SearchTicket, result: Result<Vec<Track>, String>) -> bool {
        if self.pending != Some(ticket.generation) {
            log::debug!(
                "[Search] Dropping stale response #{} (latest #{})",
                ticket.generation,
                self.generation
            );
            return false;
        }
        self.pending = None;
        self.has_searched = true;

        match result {
            Ok(mut tracks) => {
                tracks.truncate(MAX_RESULTS);
                self.results = tracks;
            }
            Err(message) => {
                self.results.clear();
                self.message = Some(message);
            }
        }
        true
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    /// Drop the status message only if it is still `message`
    pub fn clear_message_if(&mut self, message: &str) {
        if self.message.as_deref() == Some(message) {
            self.message = None;
        }
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    pub fn results(&self) -> &[Track] {
        &self.results
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn has_searched(&self) -> bool {
        self.has_searched
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    pub fn previous_enabled(&self) -> bool {
        self.offset > 0
    }

    pub fn previous_label(&self) -> String {
        format!("Previous Page: {}", self.offset / PAGE_STEP)
    }

    pub fn next_label(&self) -> String {
        format!("Next Page: {}", self.offset / PAGE_STEP + 2)
    }

    /// Pagination shows only once a search has produced rows
    pub fn show_pagination(&self) -> bool {
        self.has_searched && !self.results.is_empty()
    }

    /// Initial prompt until the first search completes
    pub fn show_prompt(&self) -> bool {
        !self.has_searched
    }
}
