//! Full-text article retrieval endpoints (`/article/{kind}/{id}`).

use serde_json::Value;
use tracing::instrument;

use crate::client::ScopusClient;
use crate::error::{Result, ScopusError};
use crate::ident::Identifier;
use crate::models::Entry;

pub(crate) const ARTICLE_ENVELOPE: &str = "full-text-retrieval-response";

impl ScopusClient {
    /// Fetch the full-text record of a document.
    ///
    /// Returns `Ok(None)` when the response carries no full-text payload,
    /// and [`ScopusError::AccessLimited`] when Scopus refuses the body for
    /// entitlement reasons.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn article_by(&self, id: &Identifier) -> Result<Option<Entry>> {
        Ok(self.article_envelope(id).await?.map(Entry::new))
    }

    /// Fetch the raw `full-text-retrieval-response` body, if any.
    pub async fn article_raw_by(&self, id: &Identifier) -> Result<Option<Value>> {
        self.article_envelope(id).await
    }

    async fn article_envelope(&self, id: &Identifier) -> Result<Option<Value>> {
        let segments = id.path_segments("article")?;
        let mut body = match self.get(&segments, &[]).await {
            Ok(body) => body,
            // Scopus signals unentitled full text with a plain 400.
            Err(ScopusError::Api { status: 400, .. }) => {
                return Err(ScopusError::AccessLimited)
            }
            Err(e) => return Err(e),
        };
        Ok(body
            .get_mut(ARTICLE_ENVELOPE)
            .map(Value::take)
            .filter(|v| !v.is_null()))
    }
}
