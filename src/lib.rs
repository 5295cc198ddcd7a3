//! # scopus-client
//!
//! A Rust client for the Elsevier Scopus Content APIs.
//!
//! Provides:
//! - **Retrieval**: abstract, full-text article, and reference-list lookups
//!   by DOI, EID, PII, or PubMed ID
//! - **Search**: the Scopus search endpoint with view levels and date ranges
//! - **Lazy models**: responses stay raw JSON; fields resolve on read, with
//!   vendor keys renamed and list-or-object values normalized
//!
//! ## Quick Start
//!
//! ```no_run
//! # async fn example() -> scopus_client::error::Result<()> {
//! use scopus_client::{Identifier, ScopusClient};
//!
//! // Create client from SCOPUS_API_KEY (or ELSEVIER_API_KEY) environment variable
//! let client = ScopusClient::from_env()?;
//!
//! // Fetch an abstract by DOI
//! let doi = Identifier::doi("10.1016/S0021-9290(01)00201-9");
//! if let Some(text) = client.abstract_by(&doi).await? {
//!     println!("{}", text);
//! }
//!
//! // Search for documents
//! let results = client.search("TITLE-ABS-KEY(red blood cell mechanics)").await?;
//! println!("total matches: {}", results.total_results().unwrap_or(0));
//! for entry in results.entries() {
//!     println!("{} - {:?}", entry.title().unwrap_or_default(), entry.doi());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Field Access
//!
//! Typed accessors cover the common fields; everything a model declares is
//! reachable by name, with absent fields reading as `None` rather than
//! failing:
//!
//! ```no_run
//! # async fn example() -> scopus_client::error::Result<()> {
//! # let client = scopus_client::ScopusClient::from_env()?;
//! let entry = client
//!     .entry_by(&scopus_client::Identifier::eid("2-s2.0-0035235370"))
//!     .await?;
//! println!("{:?}", entry.get("cover_date")?);
//! println!("known fields: {:?}", entry.field_names());
//! # Ok(())
//! # }
//! ```

pub mod abstracts;
pub mod articles;
pub mod bibliography;
pub mod client;
pub mod error;
pub mod ident;
pub mod models;
pub mod record;
pub mod search;

// Re-export key types at the crate root.
pub use abstracts::FullRecord;
pub use client::ScopusClient;
pub use error::ScopusError;
pub use ident::Identifier;
pub use models::{Entry, EntryLinks, PageLinks, Reference, SearchEntry, SearchResults};
pub use search::SearchView;
