//! Read-only access to the testimonial content repository.
//!
//! The host owns the records; this crate only queries them. The
//! [`ContentStore`] trait captures the three facilities the render path
//! needs — the published record list, per-record metadata lookup, and
//! attachment-id resolution — and [`MemoryStore`] provides the in-memory
//! implementation used by the CLI and the tests.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;

/// Meta key holding the raw client name ("Name, Title", optionally wrapped
/// in an anchor tag).
pub const META_CLIENT_NAME: &str = "client_name";
/// Meta key holding the raw company name.
pub const META_COMPANY_NAME: &str = "company_name";
/// Meta key holding the company website URL.
pub const META_COMPANY_WEBSITE: &str = "company_website";
/// Meta key holding the star rating, 1–5.
pub const META_STAR_RATING: &str = "star_rating";
/// Meta key holding the attachment id of the author thumbnail.
pub const META_THUMBNAIL_ID: &str = "_thumbnail_id";

/// Enrichment meta: explicit author profile URL, wins over the URL embedded
/// in the client-name markup.
pub const META_AUTHOR_URL: &str = "_jsonld_author_url";
/// Enrichment meta: overrides the auto-derived author description.
pub const META_AUTHOR_DESCRIPTION: &str = "_jsonld_author_description";
/// Enrichment meta: author sameAs URLs, newline- or comma-separated.
pub const META_AUTHOR_SAMEAS: &str = "_jsonld_author_sameas";
/// Enrichment meta: company sameAs URLs, newline- or comma-separated.
pub const META_ORG_SAMEAS: &str = "_jsonld_org_sameas";
/// Enrichment meta: description attached to the reviewed organization.
pub const META_REVIEWED_DESCRIPTION: &str = "_jsonld_reviewed_description";

/// One customer testimonial as stored by the content repository.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TestimonialRecord {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub published: NaiveDate,
    #[serde(default = "publish_status")]
    pub status: String,
}

fn publish_status() -> String {
    "publish".to_string()
}

impl TestimonialRecord {
    /// Whether the record participates in rendering at all.
    pub fn is_published(&self) -> bool {
        self.status == "publish"
    }
}

/// Read-only view of the testimonial records and their metadata.
pub trait ContentStore {
    /// All published testimonial records, ordered by publish date
    /// ascending.
    fn published_testimonials(&self) -> Vec<TestimonialRecord>;

    /// Looks up a single metadata value for a record. Absent and empty
    /// values are both `None`.
    fn meta(&self, record_id: u64, key: &str) -> Option<String>;

    /// Resolves a media attachment id to its URL.
    fn attachment_url(&self, attachment_id: u64) -> Option<String>;
}

/// A testimonial record together with its metadata map, as held by
/// [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StoredTestimonial {
    #[serde(flatten)]
    pub record: TestimonialRecord,
    #[serde(default)]
    pub meta: BTreeMap<String, String>,
}

/// In-memory content store, deserialisable from a JSON fixture.
///
/// The fixture shape is a `testimonials` array (records with an inline
/// `meta` map) and an `attachments` id → URL map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MemoryStore {
    #[serde(default)]
    pub testimonials: Vec<StoredTestimonial>,
    #[serde(default)]
    pub attachments: BTreeMap<u64, String>,
}

impl ContentStore for MemoryStore {
    fn published_testimonials(&self) -> Vec<TestimonialRecord> {
        let mut records: Vec<TestimonialRecord> = self
            .testimonials
            .iter()
            .filter(|entry| entry.record.is_published())
            .map(|entry| entry.record.clone())
            .collect();
        records.sort_by_key(|record| (record.published, record.id));
        records
    }

    fn meta(&self, record_id: u64, key: &str) -> Option<String> {
        self.testimonials
            .iter()
            .find(|entry| entry.record.id == record_id)
            .and_then(|entry| entry.meta.get(key))
            .filter(|value| !value.is_empty())
            .cloned()
    }

    fn attachment_url(&self, attachment_id: u64) -> Option<String> {
        self.attachments.get(&attachment_id).cloned()
    }
}
