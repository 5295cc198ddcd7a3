//! Document identifiers accepted by the Scopus retrieval endpoints.

use std::fmt;

use crate::error::{Result, ScopusError};

/// A document identifier, tagged with its namespace.
///
/// Scopus routes retrievals by identifier kind (`/abstract/doi/{id}`,
/// `/article/pii/{id}`, ...), so the kind travels with the value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    /// Digital Object Identifier, e.g. `10.1016/S0021-9290(01)00201-9`.
    Doi(String),
    /// Scopus electronic ID, e.g. `2-s2.0-0034963968`.
    Eid(String),
    /// Publisher Item Identifier.
    Pii(String),
    /// PubMed ID.
    PubmedId(String),
}

impl Identifier {
    pub fn doi(value: impl Into<String>) -> Self {
        Self::Doi(value.into())
    }

    pub fn eid(value: impl Into<String>) -> Self {
        Self::Eid(value.into())
    }

    pub fn pii(value: impl Into<String>) -> Self {
        Self::Pii(value.into())
    }

    pub fn pubmed_id(value: impl Into<String>) -> Self {
        Self::PubmedId(value.into())
    }

    /// The path segment Scopus uses for this identifier kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Doi(_) => "doi",
            Self::Eid(_) => "eid",
            Self::Pii(_) => "pii",
            Self::PubmedId(_) => "pubmed_id",
        }
    }

    /// The identifier value itself.
    pub fn value(&self) -> &str {
        match self {
            Self::Doi(v) | Self::Eid(v) | Self::Pii(v) | Self::PubmedId(v) => v,
        }
    }

    /// Request path segments under a resource root, e.g.
    /// `["abstract", "doi", "10.1016", "S0021..."]`. The value
    /// contributes one segment per '/'-separated piece.
    pub(crate) fn path_segments<'a>(&'a self, resource: &'a str) -> Result<Vec<&'a str>> {
        let value = self.value().trim();
        if value.is_empty() {
            return Err(ScopusError::EmptyIdentifier);
        }
        let mut segments = vec![resource, self.kind()];
        segments.extend(value.split('/'));
        Ok(segments)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.value())
    }
}
