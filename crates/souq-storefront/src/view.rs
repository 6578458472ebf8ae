//! View state for catalog screens.
//!
//! Fetches are never cancelled. Instead every fetch is tagged with the
//! generation current when it began, and a result is applied only if no
//! newer fetch has begun since. A late answer for a category the shopper
//! already left is dropped.

use crate::StorefrontError;
use souq_commerce::catalog::ProductFilter;
use souq_commerce::{CategoryId, StoreId};

/// What a catalog screen asked for; kept so the shopper can retry it.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogRequest {
    Categories,
    Stores,
    Products {
        category_id: CategoryId,
        store: Option<StoreId>,
    },
    Search(ProductFilter),
}

/// Proof that a fetch was started; hand it back with the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
}

/// Displayed data plus the in-flight and error state of one screen.
#[derive(Debug, Clone)]
pub struct CatalogView<T> {
    generation: u64,
    request: Option<CatalogRequest>,
    data: Option<T>,
    error: Option<StorefrontError>,
    loading: bool,
}

impl<T> Default for CatalogView<T> {
    fn default() -> Self {
        Self {
            generation: 0,
            request: None,
            data: None,
            error: None,
            loading: false,
        }
    }
}

impl<T> CatalogView<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fetch for `request`, superseding any fetch in flight.
    pub fn begin(&mut self, request: CatalogRequest) -> FetchTicket {
        self.generation = self.generation.wrapping_add(1);
        self.request = Some(request);
        self.loading = true;
        FetchTicket {
            generation: self.generation,
        }
    }

    pub fn is_current(&self, ticket: FetchTicket) -> bool {
        ticket.generation == self.generation
    }

    /// Apply a fetch result if its ticket is still current.
    ///
    /// Returns `false` (and changes nothing) for a stale ticket. A failure
    /// records the error but keeps whatever data was displayed before.
    pub fn apply(&mut self, ticket: FetchTicket, result: Result<T, StorefrontError>) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(
                stale = ticket.generation,
                current = self.generation,
                "discarding stale catalog result"
            );
            return false;
        }
        self.loading = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(err) => {
                tracing::warn!(error = %err, request = ?self.request, "catalog fetch failed");
                self.error = Some(err);
            }
        }
        true
    }

    /// The request to re-issue after a failure, if the last fetch failed.
    pub fn retry_request(&self) -> Option<CatalogRequest> {
        match (&self.error, self.loading) {
            (Some(err), false) if err.is_retryable() => self.request.clone(),
            _ => None,
        }
    }

    pub fn request(&self) -> Option<&CatalogRequest> {
        self.request.as_ref()
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error(&self) -> Option<&StorefrontError> {
        self.error.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}
