//! The search-then-select flow every panel runs through.
//!
//! ```text
//! Idle -> Searching -> Results -> DetailLoading -> Detail
//!   ^                     ^                          |
//!   |                     +---------- back ----------+
//!   +-------------------- reset ---------------------+
//! ```
//!
//! Each search or selection that is started takes a ticket with a
//! monotonically increasing sequence number. Only the most recent ticket of
//! each kind may complete; anything older is discarded, so a slow response
//! to an abandoned request can never overwrite newer state.

use std::{fmt, future::Future, mem};

use tracing::{debug, warn};

use crate::{
    DomainQuery, DomainResult, LocationCandidate, NetworkError,
    provider::{FeatureFetcher, FeatureKind, LocationResolver},
};

/// Inline message shown under the search form when geocoding fails.
pub const SEARCH_FAILED: &str = "Failed to fetch locations.";

/// Which panel the dashboard is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanelKind {
    /// Location lookup only; the detail is the candidate itself.
    Geocoding,
    Feature(FeatureKind),
}

impl PanelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PanelKind::Geocoding => "geocoding",
            PanelKind::Feature(kind) => kind.as_str(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            PanelKind::Geocoding => "Geocoding",
            PanelKind::Feature(kind) => kind.title(),
        }
    }

    /// Navigation order.
    pub fn all() -> Vec<PanelKind> {
        let mut panels = vec![PanelKind::Geocoding];
        panels.extend(FeatureKind::all().iter().copied().map(PanelKind::Feature));
        panels
    }
}

impl Default for PanelKind {
    fn default() -> Self {
        PanelKind::Feature(FeatureKind::Marine)
    }
}

impl fmt::Display for PanelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl TryFrom<&str> for PanelKind {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "geocoding" | "search" => Ok(PanelKind::Geocoding),
            _ => FeatureKind::try_from(value).map(PanelKind::Feature),
        }
    }
}

/// Outcome of a detail fetch. A failed fetch is kept as `Unavailable` so the
/// detail view always has something to render.
#[derive(Debug, Clone, PartialEq)]
pub enum Detail<T> {
    Loaded(T),
    Unavailable { reason: String },
}

impl<T> Detail<T> {
    pub fn loaded(&self) -> Option<&T> {
        match self {
            Detail::Loaded(value) => Some(value),
            Detail::Unavailable { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelState<T> {
    Idle {
        error: Option<String>,
    },
    Searching {
        query: String,
    },
    Results {
        candidates: Vec<LocationCandidate>,
    },
    DetailLoading {
        candidates: Vec<LocationCandidate>,
        selected: LocationCandidate,
    },
    Detail {
        candidates: Vec<LocationCandidate>,
        selected: LocationCandidate,
        detail: Detail<T>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectTicket(u64);

/// One panel's search-then-select state, generic over the detail payload.
#[derive(Debug, Clone)]
pub struct Workflow<T> {
    state: PanelState<T>,
    last_seq: u64,
    pending_search: Option<u64>,
    pending_select: Option<u64>,
}

impl<T> Default for Workflow<T> {
    fn default() -> Self {
        Self {
            state: PanelState::Idle { error: None },
            last_seq: 0,
            pending_search: None,
            pending_select: None,
        }
    }
}

impl<T> Workflow<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PanelState<T> {
        &self.state
    }

    pub fn candidates(&self) -> &[LocationCandidate] {
        match &self.state {
            PanelState::Results { candidates }
            | PanelState::DetailLoading { candidates, .. }
            | PanelState::Detail { candidates, .. } => candidates,
            PanelState::Idle { .. } | PanelState::Searching { .. } => &[],
        }
    }

    pub fn selected(&self) -> Option<&LocationCandidate> {
        match &self.state {
            PanelState::DetailLoading { selected, .. } | PanelState::Detail { selected, .. } => {
                Some(selected)
            }
            _ => None,
        }
    }

    pub fn detail(&self) -> Option<&Detail<T>> {
        match &self.state {
            PanelState::Detail { detail, .. } => Some(detail),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            PanelState::Idle { error } => error.as_deref(),
            _ => None,
        }
    }

    /// True while a search or detail fetch is outstanding.
    pub fn is_loading(&self) -> bool {
        self.pending_search.is_some() || self.pending_select.is_some()
    }

    fn next_seq(&mut self) -> u64 {
        self.last_seq += 1;
        self.last_seq
    }

    /// Start a search. A blank query is ignored and returns `None`.
    ///
    /// Supersedes any outstanding search or detail fetch.
    pub fn begin_search(&mut self, query: &str) -> Option<SearchTicket> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        let seq = self.next_seq();
        self.pending_search = Some(seq);
        self.pending_select = None;
        self.state = PanelState::Searching { query: query.to_string() };
        Some(SearchTicket(seq))
    }

    /// Apply a search result. Returns `false` if the ticket was superseded.
    pub fn finish_search(
        &mut self,
        ticket: SearchTicket,
        result: Result<Vec<LocationCandidate>, NetworkError>,
    ) -> bool {
        if self.pending_search != Some(ticket.0) {
            debug!(seq = ticket.0, "Discarding stale search result");
            return false;
        }
        self.pending_search = None;

        self.state = match result {
            Ok(candidates) => PanelState::Results { candidates },
            Err(err) => {
                warn!(error = %err, "Location search failed");
                PanelState::Idle { error: Some(SEARCH_FAILED.to_string()) }
            }
        };
        true
    }

    /// Start loading the detail for `candidate`.
    ///
    /// Only possible once a result list exists; returns `None` otherwise.
    /// Supersedes any outstanding detail fetch.
    pub fn begin_select(&mut self, candidate: LocationCandidate) -> Option<SelectTicket> {
        let candidates = match &mut self.state {
            PanelState::Results { candidates }
            | PanelState::DetailLoading { candidates, .. }
            | PanelState::Detail { candidates, .. } => mem::take(candidates),
            PanelState::Idle { .. } | PanelState::Searching { .. } => return None,
        };

        let seq = self.next_seq();
        self.pending_select = Some(seq);
        self.state = PanelState::DetailLoading { candidates, selected: candidate };
        Some(SelectTicket(seq))
    }

    /// Apply a detail fetch result. Returns `false` if the ticket was superseded.
    pub fn finish_select(&mut self, ticket: SelectTicket, result: Result<T, NetworkError>) -> bool {
        if self.pending_select != Some(ticket.0) {
            debug!(seq = ticket.0, "Discarding stale detail result");
            return false;
        }
        self.pending_select = None;

        let detail = match result {
            Ok(value) => Detail::Loaded(value),
            Err(err) => {
                warn!(error = %err, "Detail fetch failed");
                Detail::Unavailable { reason: err.reason() }
            }
        };

        let state = mem::replace(&mut self.state, PanelState::Idle { error: None });
        self.state = match state {
            PanelState::DetailLoading { candidates, selected } => {
                PanelState::Detail { candidates, selected, detail }
            }
            // A pending ticket always belongs to DetailLoading.
            other => other,
        };
        true
    }

    /// Return to an empty search form, dropping candidates, detail and
    /// anything still in flight.
    pub fn reset(&mut self) {
        self.state = PanelState::Idle { error: None };
        self.pending_search = None;
        self.pending_select = None;
    }

    /// Leave the detail view but keep the candidate list.
    pub fn back(&mut self) -> bool {
        let state = mem::replace(&mut self.state, PanelState::Idle { error: None });
        match state {
            PanelState::DetailLoading { candidates, .. } | PanelState::Detail { candidates, .. } => {
                self.pending_select = None;
                self.state = PanelState::Results { candidates };
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    /// Search and wait for the result. A blank query does not call the resolver.
    pub async fn submit<R>(&mut self, resolver: &R, query: &str) -> bool
    where
        R: LocationResolver + ?Sized,
    {
        let Some(ticket) = self.begin_search(query) else {
            return false;
        };
        let result = resolver.search(query.trim()).await;
        self.finish_search(ticket, result)
    }

    /// Select `candidate` and load its detail with `fetch`.
    pub async fn select_with<F, Fut>(&mut self, candidate: LocationCandidate, fetch: F) -> bool
    where
        F: FnOnce(LocationCandidate) -> Fut,
        Fut: Future<Output = Result<T, NetworkError>>,
    {
        let Some(ticket) = self.begin_select(candidate.clone()) else {
            return false;
        };
        let result = fetch(candidate).await;
        self.finish_select(ticket, result)
    }
}

impl Workflow<DomainResult> {
    /// Select `candidate` and fetch the `kind` data for its coordinates.
    pub async fn select<F>(
        &mut self,
        fetcher: &F,
        kind: FeatureKind,
        candidate: LocationCandidate,
    ) -> bool
    where
        F: FeatureFetcher + ?Sized,
    {
        self.select_with(candidate, |c| async move {
            fetcher.fetch(&DomainQuery::for_candidate(kind, &c)).await
        })
        .await
    }
}

impl Workflow<LocationCandidate> {
    /// The geocoding panel's detail is the candidate itself.
    pub fn select_candidate(&mut self, candidate: LocationCandidate) -> bool {
        match self.begin_select(candidate.clone()) {
            Some(ticket) => self.finish_select(ticket, Ok(candidate)),
            None => false,
        }
    }
}
