//! Abstract retrieval endpoints (`/abstract/{kind}/{id}`).

use serde_json::Value;
use tracing::instrument;

use crate::client::{unwrap_envelope, ScopusClient};
use crate::error::Result;
use crate::ident::Identifier;
use crate::models::{reference_list, Entry, Reference};
use crate::record::resolve_path;

pub(crate) const ABSTRACT_ENVELOPE: &str = "abstracts-retrieval-response";

/// Entry and reference list composed from a single abstract retrieval.
#[derive(Debug, Clone)]
pub struct FullRecord {
    /// The bibliographic entry.
    pub entry: Entry,
    /// Indexed references, empty when the document carries none.
    pub references: Vec<Reference>,
}

impl ScopusClient {
    /// Fetch the abstract text of a document, or `None` when the record
    /// has no abstract.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn abstract_by(&self, id: &Identifier) -> Result<Option<String>> {
        let body = self.abstract_envelope(id).await?;
        Ok(resolve_path(&body, &["coredata", "dc:description"])
            .and_then(Value::as_str)
            .map(str::to_owned))
    }

    /// Fetch a typed bibliographic entry for a document.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn entry_by(&self, id: &Identifier) -> Result<Entry> {
        Ok(Entry::new(self.abstract_envelope(id).await?))
    }

    /// Fetch entry and references together from one request.
    ///
    /// Reports [`crate::ScopusError::NoReferences`] when the document's
    /// bibliography declares zero references; a document with no
    /// bibliography section at all yields an empty reference list.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn full_record_by(&self, id: &Identifier) -> Result<FullRecord> {
        let body = self.abstract_envelope(id).await?;
        let references = reference_list(&body)?.unwrap_or_default();
        Ok(FullRecord {
            entry: Entry::new(body),
            references,
        })
    }

    /// Fetch the raw `abstracts-retrieval-response` body.
    pub async fn abstract_raw_by(&self, id: &Identifier) -> Result<Value> {
        self.abstract_envelope(id).await
    }

    /// GET the abstract resource in FULL view and strip the envelope.
    pub(crate) async fn abstract_envelope(&self, id: &Identifier) -> Result<Value> {
        let segments = id.path_segments("abstract")?;
        let body = self.get(&segments, &[("view", "FULL")]).await?;
        unwrap_envelope(body, ABSTRACT_ENVELOPE)
    }
}
