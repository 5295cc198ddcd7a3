//! Typed views over Scopus response documents.
//!
//! Each model pairs a raw response body with a [`FieldTable`] describing
//! which keys it exposes, which friendly names map to vendor-prefixed keys,
//! and which values get normalized on read. Typed accessors cover the
//! common fields; [`Entry::get`] and friends reach everything the table
//! declares.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Result, ScopusError};
use crate::record::{
    as_count, coerce_to_list, present, resolve_path, scalar_string, FieldTable, Record,
};

static ENTRY_TABLE: FieldTable = FieldTable {
    model: "Entry",
    declared: &["coredata", "originalText"],
    renamed: &[
        ("doi", &["coredata", "prism:doi"]),
        ("eid", &["coredata", "eid"]),
        ("pii", &["coredata", "pii"]),
        ("title", &["coredata", "dc:title"]),
        ("publication", &["coredata", "prism:publicationName"]),
        ("aggregation_type", &["coredata", "prism:aggregationType"]),
        ("issn", &["coredata", "prism:issn"]),
        ("volume", &["coredata", "prism:volume"]),
        ("issue", &["coredata", "prism:issueIdentifier"]),
        ("pages", &["coredata", "prism:pageRange"]),
        ("cover_date", &["coredata", "prism:coverDate"]),
        ("abstract", &["coredata", "dc:description"]),
        ("authors", &["coredata", "dc:creator"]),
        ("links", &["coredata", "link"]),
        ("original_text", &["originalText"]),
    ],
    transforms: &[
        ("dc:creator", authors_transform),
        ("link", entry_links_transform),
    ],
};

static REFERENCE_TABLE: FieldTable = FieldTable {
    model: "Reference",
    declared: &["@id", "ref-fulltext", "ref-info"],
    renamed: &[
        ("id", &["@id"]),
        ("fulltext", &["ref-fulltext"]),
        ("info", &["ref-info"]),
        ("authors", &["ref-info", "ref-authors", "author"]),
        ("title", &["ref-info", "ref-title", "ref-titletext"]),
        ("volume", &["ref-info", "ref-volisspag", "voliss", "@volume"]),
        ("issue", &["ref-info", "ref-volisspag", "voliss", "@issue"]),
        ("pages", &["ref-info", "ref-volisspag", "pagerange"]),
        ("date", &["ref-info", "ref-publicationyear", "@first"]),
        ("publication", &["ref-info", "ref-sourcetitle"]),
    ],
    transforms: &[
        ("author", authors_transform),
        ("pagerange", page_range_transform),
    ],
};

static SEARCH_ENTRY_TABLE: FieldTable = FieldTable {
    model: "SearchEntry",
    declared: &[
        "eid",
        "link",
        "author",
        "affiliation",
        "subtype",
        "subtypeDescription",
    ],
    renamed: &[
        ("identifier", &["dc:identifier"]),
        ("pubmed_id", &["pubmed-id"]),
        ("doi", &["prism:doi"]),
        ("title", &["dc:title"]),
        ("creator", &["dc:creator"]),
        ("publication", &["prism:publicationName"]),
        ("aggregation_type", &["prism:aggregationType"]),
        ("issn", &["prism:issn"]),
        ("volume", &["prism:volume"]),
        ("issue", &["prism:issueIdentifier"]),
        ("pages", &["prism:pageRange"]),
        ("cover_date", &["prism:coverDate"]),
        ("cover_display_date", &["prism:coverDisplayDate"]),
        ("description", &["dc:description"]),
        ("cited_by_count", &["citedby-count"]),
        ("subtype_description", &["subtypeDescription"]),
        ("source_id", &["source-id"]),
        ("url", &["prism:url"]),
        ("authors", &["author"]),
        ("links", &["link"]),
    ],
    transforms: &[
        ("author", authors_transform),
        ("link", entry_links_transform),
    ],
};

static SEARCH_RESULTS_TABLE: FieldTable = FieldTable {
    model: "SearchResults",
    declared: &["entry", "link"],
    renamed: &[
        ("total_results", &["opensearch:totalResults"]),
        ("start_index", &["opensearch:startIndex"]),
        ("items_per_page", &["opensearch:itemsPerPage"]),
        ("query", &["opensearch:Query", "@searchTerms"]),
        ("entries", &["entry"]),
        ("links", &["link"]),
    ],
    transforms: &[("link", page_links_transform)],
};

/// A bibliographic entry from abstract or full-text retrieval.
#[derive(Debug, Clone)]
pub struct Entry {
    record: Record,
}

impl Entry {
    /// Wrap a raw `abstracts-retrieval-response` or
    /// `full-text-retrieval-response` body.
    pub fn new(document: Value) -> Self {
        Self {
            record: Record::new(document, &ENTRY_TABLE),
        }
    }

    pub fn doi(&self) -> Option<String> {
        self.record.text_field("doi")
    }

    pub fn eid(&self) -> Option<String> {
        self.record.text_field("eid")
    }

    pub fn pii(&self) -> Option<String> {
        self.record.text_field("pii")
    }

    pub fn title(&self) -> Option<String> {
        self.record.text_field("title")
    }

    pub fn publication(&self) -> Option<String> {
        self.record.text_field("publication")
    }

    pub fn aggregation_type(&self) -> Option<String> {
        self.record.text_field("aggregation_type")
    }

    pub fn issn(&self) -> Option<String> {
        self.record.text_field("issn")
    }

    pub fn volume(&self) -> Option<String> {
        self.record.text_field("volume")
    }

    pub fn issue(&self) -> Option<String> {
        self.record.text_field("issue")
    }

    pub fn pages(&self) -> Option<String> {
        self.record.text_field("pages")
    }

    pub fn cover_date(&self) -> Option<String> {
        self.record.text_field("cover_date")
    }

    /// The abstract text (`dc:description`).
    pub fn abstract_text(&self) -> Option<String> {
        self.record.text_field("abstract")
    }

    /// Author display names, in document order.
    pub fn authors(&self) -> Vec<String> {
        self.record
            .resolved("authors")
            .map(author_names)
            .unwrap_or_default()
    }

    /// Navigation links, flattened by relation.
    pub fn links(&self) -> EntryLinks {
        self.record
            .resolved("links")
            .map(EntryLinks::from_value)
            .unwrap_or_default()
    }

    /// Full article body, when the document came from full-text retrieval
    /// and Scopus delivered it as plain text. Structured bodies remain
    /// reachable through `get("original_text")`.
    pub fn original_text(&self) -> Option<String> {
        self.record
            .resolved("original_text")
            .and_then(Value::as_str)
            .map(str::to_owned)
    }

    /// Read any declared or renamed field by name.
    pub fn get(&self, name: &str) -> Result<Option<Value>> {
        self.record.get(name)
    }

    /// Field names usable with [`Entry::get`].
    pub fn field_names(&self) -> Vec<&'static str> {
        self.record.field_names()
    }

    /// The raw response body.
    pub fn raw(&self) -> &Value {
        self.record.raw()
    }

    pub fn into_raw(self) -> Value {
        self.record.into_raw()
    }
}

/// One entry of a document's reference list.
#[derive(Debug, Clone)]
pub struct Reference {
    record: Record,
}

impl Reference {
    /// Wrap one element of the bibliography's `reference` array.
    pub fn new(document: Value) -> Self {
        Self {
            record: Record::new(document, &REFERENCE_TABLE),
        }
    }

    pub fn id(&self) -> Option<String> {
        self.record.text_field("id")
    }

    pub fn title(&self) -> Option<String> {
        self.record.text_field("title")
    }

    pub fn publication(&self) -> Option<String> {
        self.record.text_field("publication")
    }

    pub fn volume(&self) -> Option<String> {
        self.record.text_field("volume")
    }

    pub fn issue(&self) -> Option<String> {
        self.record.text_field("issue")
    }

    /// Publication year, as given by `ref-publicationyear`.
    pub fn date(&self) -> Option<String> {
        self.record.text_field("date")
    }

    /// Free-text rendering of the citation, when Scopus provides one.
    pub fn fulltext(&self) -> Option<String> {
        self.record.text_field("fulltext")
    }

    /// Page range joined as `first-last`.
    pub fn pages(&self) -> Option<String> {
        self.record.resolved("pages").and_then(page_range)
    }

    pub fn authors(&self) -> Vec<String> {
        self.record
            .resolved("authors")
            .map(author_names)
            .unwrap_or_default()
    }

    /// Read any declared or renamed field by name.
    pub fn get(&self, name: &str) -> Result<Option<Value>> {
        self.record.get(name)
    }

    /// Field names usable with [`Reference::get`].
    pub fn field_names(&self) -> Vec<&'static str> {
        self.record.field_names()
    }

    /// The raw reference element.
    pub fn raw(&self) -> &Value {
        self.record.raw()
    }

    pub fn into_raw(self) -> Value {
        self.record.into_raw()
    }
}

/// One hit from the Scopus search endpoint.
#[derive(Debug, Clone)]
pub struct SearchEntry {
    record: Record,
}

impl SearchEntry {
    /// Wrap one element of the `search-results` entry array.
    pub fn new(document: Value) -> Self {
        Self {
            record: Record::new(document, &SEARCH_ENTRY_TABLE),
        }
    }

    pub fn eid(&self) -> Option<String> {
        self.record.text_field("eid")
    }

    /// The `dc:identifier` value, e.g. `SCOPUS_ID:85059373952`.
    pub fn identifier(&self) -> Option<String> {
        self.record.text_field("identifier")
    }

    pub fn pubmed_id(&self) -> Option<String> {
        self.record.text_field("pubmed_id")
    }

    pub fn doi(&self) -> Option<String> {
        self.record.text_field("doi")
    }

    pub fn title(&self) -> Option<String> {
        self.record.text_field("title")
    }

    /// First-listed author (`dc:creator`).
    pub fn creator(&self) -> Option<String> {
        self.record.text_field("creator")
    }

    pub fn publication(&self) -> Option<String> {
        self.record.text_field("publication")
    }

    pub fn aggregation_type(&self) -> Option<String> {
        self.record.text_field("aggregation_type")
    }

    pub fn issn(&self) -> Option<String> {
        self.record.text_field("issn")
    }

    pub fn volume(&self) -> Option<String> {
        self.record.text_field("volume")
    }

    pub fn issue(&self) -> Option<String> {
        self.record.text_field("issue")
    }

    pub fn pages(&self) -> Option<String> {
        self.record.text_field("pages")
    }

    pub fn cover_date(&self) -> Option<String> {
        self.record.text_field("cover_date")
    }

    pub fn description(&self) -> Option<String> {
        self.record.text_field("description")
    }

    pub fn cited_by_count(&self) -> Option<u64> {
        self.record.count_field("cited_by_count")
    }

    /// Document type label (`subtypeDescription`), e.g. `Review`.
    pub fn subtype_description(&self) -> Option<String> {
        self.record.text_field("subtype_description")
    }

    pub fn source_id(&self) -> Option<String> {
        self.record.text_field("source_id")
    }

    pub fn url(&self) -> Option<String> {
        self.record.text_field("url")
    }

    /// Author display names, in document order.
    pub fn authors(&self) -> Vec<String> {
        self.record
            .resolved("authors")
            .map(author_names)
            .unwrap_or_default()
    }

    /// Navigation links, flattened by relation.
    pub fn links(&self) -> EntryLinks {
        self.record
            .resolved("links")
            .map(EntryLinks::from_value)
            .unwrap_or_default()
    }

    /// Read any declared or renamed field by name.
    pub fn get(&self, name: &str) -> Result<Option<Value>> {
        self.record.get(name)
    }

    /// Field names usable with [`SearchEntry::get`].
    pub fn field_names(&self) -> Vec<&'static str> {
        self.record.field_names()
    }

    /// The raw entry document.
    pub fn raw(&self) -> &Value {
        self.record.raw()
    }

    pub fn into_raw(self) -> Value {
        self.record.into_raw()
    }
}

/// One page of Scopus search results.
#[derive(Debug, Clone)]
pub struct SearchResults {
    record: Record,
}

impl SearchResults {
    /// Wrap a raw `search-results` body.
    pub fn new(document: Value) -> Self {
        Self {
            record: Record::new(document, &SEARCH_RESULTS_TABLE),
        }
    }

    /// Total number of matches across all pages.
    pub fn total_results(&self) -> Option<u64> {
        self.record.count_field("total_results")
    }

    pub fn start_index(&self) -> Option<u64> {
        self.record.count_field("start_index")
    }

    pub fn items_per_page(&self) -> Option<u64> {
        self.record.count_field("items_per_page")
    }

    /// The query string echoed back by the server.
    pub fn query(&self) -> Option<String> {
        self.record.text_field("query")
    }

    /// Entries on this page.
    pub fn entries(&self) -> Vec<SearchEntry> {
        self.record
            .resolved("entries")
            .map(|value| {
                coerce_to_list(value)
                    .into_iter()
                    .cloned()
                    .map(SearchEntry::new)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Pagination links, flattened by relation.
    pub fn links(&self) -> PageLinks {
        self.record
            .resolved("links")
            .map(PageLinks::from_value)
            .unwrap_or_default()
    }

    /// Read any declared or renamed field by name.
    pub fn get(&self, name: &str) -> Result<Option<Value>> {
        self.record.get(name)
    }

    /// Field names usable with [`SearchResults::get`].
    pub fn field_names(&self) -> Vec<&'static str> {
        self.record.field_names()
    }

    /// The raw `search-results` body.
    pub fn raw(&self) -> &Value {
        self.record.raw()
    }

    pub fn into_raw(self) -> Value {
        self.record.into_raw()
    }
}

/// Navigation links attached to an entry or search hit, keyed by relation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EntryLinks {
    /// Canonical API URL of the record.
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    /// Author and affiliation view.
    #[serde(rename = "author-affiliation", skip_serializing_if = "Option::is_none")]
    pub author_affiliation: Option<String>,
    /// Human-facing Scopus record page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scopus: Option<String>,
    /// Scopus cited-by page.
    #[serde(rename = "scopus-citedby", skip_serializing_if = "Option::is_none")]
    pub scopus_cited_by: Option<String>,
}

impl EntryLinks {
    /// Flatten a `link` value. Retrieval bodies tag relations with `@rel`,
    /// search entries with `@ref`; both spellings of the cited-by relation
    /// appear in the wild.
    pub(crate) fn from_value(value: &Value) -> Self {
        let mut links = Self::default();
        for item in coerce_to_list(value) {
            let Some(href) = present(item.get("@href")).and_then(Value::as_str) else {
                continue;
            };
            match link_relation(item) {
                Some("self") => links.self_link = Some(href.to_string()),
                Some("author-affiliation") => links.author_affiliation = Some(href.to_string()),
                Some("scopus") => links.scopus = Some(href.to_string()),
                Some("scopus-citedby") | Some("scopus-cited-by") => {
                    links.scopus_cited_by = Some(href.to_string())
                }
                _ => {}
            }
        }
        links
    }

    fn into_value(self) -> Value {
        let mut map = Map::new();
        if let Some(url) = self.self_link {
            map.insert("self".to_string(), Value::String(url));
        }
        if let Some(url) = self.author_affiliation {
            map.insert("author-affiliation".to_string(), Value::String(url));
        }
        if let Some(url) = self.scopus {
            map.insert("scopus".to_string(), Value::String(url));
        }
        if let Some(url) = self.scopus_cited_by {
            map.insert("scopus-citedby".to_string(), Value::String(url));
        }
        Value::Object(map)
    }
}

/// Pagination links on a search results page, keyed by relation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageLinks {
    /// This page.
    #[serde(rename = "self", skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
    /// First page of the result set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<String>,
    /// Next page, absent on the last page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    /// Last page of the result set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<String>,
}

impl PageLinks {
    pub(crate) fn from_value(value: &Value) -> Self {
        let mut links = Self::default();
        for item in coerce_to_list(value) {
            let Some(href) = present(item.get("@href")).and_then(Value::as_str) else {
                continue;
            };
            match link_relation(item) {
                Some("self") => links.self_link = Some(href.to_string()),
                Some("first") => links.first = Some(href.to_string()),
                Some("next") => links.next = Some(href.to_string()),
                Some("last") => links.last = Some(href.to_string()),
                _ => {}
            }
        }
        links
    }

    fn into_value(self) -> Value {
        let mut map = Map::new();
        if let Some(url) = self.self_link {
            map.insert("self".to_string(), Value::String(url));
        }
        if let Some(url) = self.first {
            map.insert("first".to_string(), Value::String(url));
        }
        if let Some(url) = self.next {
            map.insert("next".to_string(), Value::String(url));
        }
        if let Some(url) = self.last {
            map.insert("last".to_string(), Value::String(url));
        }
        Value::Object(map)
    }
}

fn link_relation(item: &Value) -> Option<&str> {
    present(item.get("@ref"))
        .or_else(|| present(item.get("@rel")))
        .and_then(Value::as_str)
}

/// Key path from a retrieval body to the bibliography container.
pub(crate) const REFERENCE_PATH: [&str; 4] = ["item", "bibrecord", "tail", "bibliography"];

/// Locate the reference list inside a retrieval body.
///
/// Absent levels resolve to `Ok(None)`. A bibliography whose `@refcount`
/// is zero reports [`ScopusError::NoReferences`] instead; Scopus emits that
/// shape for documents whose references were never indexed.
fn reference_container(document: &Value) -> Result<Option<&Value>> {
    let Some(bibliography) = resolve_path(document, &REFERENCE_PATH) else {
        return Ok(None);
    };
    if let Some(0) = present(bibliography.get("@refcount")).and_then(as_count) {
        return Err(ScopusError::NoReferences);
    }
    Ok(present(bibliography.get("reference")))
}

pub(crate) fn reference_list(document: &Value) -> Result<Option<Vec<Reference>>> {
    Ok(reference_container(document)?.map(|refs| {
        coerce_to_list(refs)
            .into_iter()
            .cloned()
            .map(Reference::new)
            .collect()
    }))
}

pub(crate) fn raw_reference_list(document: &Value) -> Result<Option<Value>> {
    Ok(reference_container(document)?.cloned())
}

/// Normalize an author value (single object or list) to display names.
pub(crate) fn author_names(value: &Value) -> Vec<String> {
    coerce_to_list(value)
        .into_iter()
        .filter_map(author_name)
        .collect()
}

/// One author element to a display name. Abstract coredata wraps names as
/// `{"$": "..."}`, references use `ce:indexed-name` or surname parts, and
/// search entries use `authname` or surname parts.
fn author_name(author: &Value) -> Option<String> {
    if let Some(name) = author.as_str() {
        return Some(name.to_string());
    }
    for key in ["ce:indexed-name", "authname", "$"] {
        if let Some(name) = present(author.get(key)).and_then(Value::as_str) {
            return Some(name.to_string());
        }
    }
    let part = |keys: [&str; 2]| {
        keys.iter()
            .find_map(|key| present(author.get(key)).and_then(Value::as_str))
    };
    let surname = part(["ce:surname", "surname"])?;
    match part(["ce:initials", "initials"]) {
        Some(initials) => Some(format!("{surname} {initials}")),
        None => Some(surname.to_string()),
    }
}

/// Join a `pagerange` element (`@first`/`@last`) into `first-last`.
fn page_range(value: &Value) -> Option<String> {
    let range = coerce_to_list(value).into_iter().next()?;
    let first = present(range.get("@first")).and_then(scalar_string)?;
    Some(match present(range.get("@last")).and_then(scalar_string) {
        Some(last) => format!("{first}-{last}"),
        None => first,
    })
}

fn authors_transform(value: &Value) -> Value {
    Value::Array(author_names(value).into_iter().map(Value::String).collect())
}

fn entry_links_transform(value: &Value) -> Value {
    EntryLinks::from_value(value).into_value()
}

fn page_links_transform(value: &Value) -> Value {
    PageLinks::from_value(value).into_value()
}

fn page_range_transform(value: &Value) -> Value {
    match page_range(value) {
        Some(range) => Value::String(range),
        None => Value::Null,
    }
}
