//! Reference-list retrieval, layered on abstract retrieval.
//!
//! Scopus has no standalone bibliography resource; references ride inside
//! the abstract response under `item.bibrecord.tail.bibliography`.

use serde_json::Value;
use tracing::instrument;

use crate::client::ScopusClient;
use crate::error::Result;
use crate::ident::Identifier;
use crate::models::{raw_reference_list, reference_list, Reference};

impl ScopusClient {
    /// Fetch the reference list of a document.
    ///
    /// `Ok(None)` means the response carries no bibliography section at
    /// all; [`crate::ScopusError::NoReferences`] means the bibliography is
    /// present but declares zero references.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn references_by(&self, id: &Identifier) -> Result<Option<Vec<Reference>>> {
        let body = self.abstract_envelope(id).await?;
        reference_list(&body)
    }

    /// Fetch the raw reference array, shaped as Scopus sent it.
    pub async fn references_raw_by(&self, id: &Identifier) -> Result<Option<Value>> {
        let body = self.abstract_envelope(id).await?;
        raw_reference_list(&body)
    }
}
