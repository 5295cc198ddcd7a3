//! The Scopus search endpoint (`/search/scopus`).

use std::fmt;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::client::{unwrap_envelope, ScopusClient};
use crate::error::Result;
use crate::models::SearchResults;

pub(crate) const SEARCH_ENVELOPE: &str = "search-results";

/// Response view levels supported by the search endpoint. `Complete` needs
/// an entitled subscriber key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchView {
    #[default]
    Standard,
    Complete,
}

impl SearchView {
    /// The wire value for the `view` query parameter.
    pub fn as_api_str(&self) -> &'static str {
        match self {
            Self::Standard => "STANDARD",
            Self::Complete => "COMPLETE",
        }
    }
}

impl fmt::Display for SearchView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_api_str())
    }
}

impl ScopusClient {
    /// Search the Scopus database in the standard view.
    ///
    /// Uses Scopus query syntax: `TITLE-ABS-KEY(optical tweezers)`,
    /// `AUTH(suresh) AND PUBYEAR > 2001`, etc.
    pub async fn search(&self, query: &str) -> Result<SearchResults> {
        self.search_with_options(query, SearchView::Standard, None)
            .await
    }

    /// Search with control over the view level and an optional year range
    /// filter such as `2010-2015`.
    #[instrument(skip(self), fields(query = %query))]
    pub async fn search_with_options(
        &self,
        query: &str,
        view: SearchView,
        date_range: Option<&str>,
    ) -> Result<SearchResults> {
        let results = SearchResults::new(self.search_envelope(query, view, date_range).await?);
        debug!(total_results = ?results.total_results(), "search completed");
        Ok(results)
    }

    /// Search and return the raw `search-results` body.
    pub async fn search_raw(
        &self,
        query: &str,
        view: SearchView,
        date_range: Option<&str>,
    ) -> Result<Value> {
        self.search_envelope(query, view, date_range).await
    }

    async fn search_envelope(
        &self,
        query: &str,
        view: SearchView,
        date_range: Option<&str>,
    ) -> Result<Value> {
        let mut params = vec![("query", query), ("view", view.as_api_str())];
        if let Some(range) = date_range {
            params.push(("date", range));
        }

        let body = self.get(&["search", "scopus"], &params).await?;
        unwrap_envelope(body, SEARCH_ENVELOPE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_api_strings() {
        assert_eq!(SearchView::Standard.as_api_str(), "STANDARD");
        assert_eq!(SearchView::Complete.as_api_str(), "COMPLETE");
        assert_eq!(SearchView::default(), SearchView::Standard);
        assert_eq!(SearchView::Complete.to_string(), "COMPLETE");
    }
}
