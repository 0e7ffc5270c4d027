//! Typed representation of the output document.
//!
//! The document is a schema.org `@context`/`@graph` object holding Review,
//! Organization, Service, and Person nodes. Organization and Person carry
//! the fixed identifiers [`ORG_ID`] and [`PERSON_ID`]; every other node
//! points at them through bare `{"@id": ...}` references, so the graph is
//! self-contained. Each struct serialises to exactly the wire shape —
//! optional fields disappear instead of becoming `null`.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::jsonld::lite::error::Result;

/// The `@context` of every emitted document.
pub const SCHEMA_CONTEXT: &str = "https://schema.org";
/// Fixed node identifier of the Organization entity.
pub const ORG_ID: &str = "#org";
/// Fixed node identifier of the Person entity.
pub const PERSON_ID: &str = "#person";
/// `additionalType` stamped onto every review author.
pub const ENTREPRENEUR_TYPE: &str = "https://schema.org/Entrepreneur";

/// Bare reference to another node declared in the same document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reference {
    #[serde(rename = "@id")]
    pub id: String,
}

impl Reference {
    /// Reference to the document's Organization node.
    pub fn organization() -> Self {
        Self { id: ORG_ID.to_string() }
    }

    /// Reference to the document's Person node.
    pub fn person() -> Self {
        Self { id: PERSON_ID.to_string() }
    }
}

/// The site Organization node, `@id` `#org`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Organization {
    #[serde(rename = "@type")]
    schema_type: &'static str,
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "sameAs", skip_serializing_if = "Vec::is_empty")]
    pub same_as: Vec<String>,
    pub founder: Reference,
    #[serde(rename = "foundingDate", skip_serializing_if = "Option::is_none")]
    pub founding_date: Option<String>,
    #[serde(rename = "contactPoint", skip_serializing_if = "Option::is_none")]
    pub contact_point: Option<ContactPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "aggregateRating", skip_serializing_if = "Option::is_none")]
    pub aggregate_rating: Option<AggregateRating>,
}

impl Organization {
    pub fn new() -> Self {
        Self {
            schema_type: "Organization",
            id: ORG_ID.to_string(),
            name: None,
            url: None,
            same_as: Vec::new(),
            founder: Reference::person(),
            founding_date: None,
            contact_point: None,
            description: None,
            aggregate_rating: None,
        }
    }
}

impl Default for Organization {
    fn default() -> Self {
        Self::new()
    }
}

/// Contact details attached to the Organization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactPoint {
    #[serde(rename = "@type")]
    schema_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "contactType", skip_serializing_if = "Option::is_none")]
    pub contact_type: Option<String>,
}

impl ContactPoint {
    pub fn new(email: Option<String>, contact_type: Option<String>) -> Self {
        Self { schema_type: "ContactPoint", email, contact_type }
    }
}

/// The site owner Person node, `@id` `#person`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Person {
    #[serde(rename = "@type")]
    schema_type: &'static str,
    #[serde(rename = "@id")]
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "jobTitle", skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(rename = "sameAs", skip_serializing_if = "Vec::is_empty")]
    pub same_as: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "alumniOf", skip_serializing_if = "Option::is_none")]
    pub alumni_of: Option<EducationalOrganization>,
    #[serde(rename = "worksFor")]
    pub works_for: Reference,
    #[serde(rename = "knowsAbout", skip_serializing_if = "Vec::is_empty")]
    pub knows_about: Vec<String>,
}

impl Person {
    pub fn new() -> Self {
        Self {
            schema_type: "Person",
            id: PERSON_ID.to_string(),
            name: None,
            description: None,
            job_title: None,
            same_as: Vec::new(),
            image: None,
            url: None,
            alumni_of: None,
            works_for: Reference::organization(),
            knows_about: Vec::new(),
        }
    }
}

impl Default for Person {
    fn default() -> Self {
        Self::new()
    }
}

/// The school the site owner is an alumnus of.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EducationalOrganization {
    #[serde(rename = "@type")]
    schema_type: &'static str,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl EducationalOrganization {
    pub fn new(name: String) -> Self {
        Self { schema_type: "EducationalOrganization", name, url: None }
    }
}

/// One Review node derived from a testimonial record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Review {
    #[serde(rename = "@type")]
    schema_type: &'static str,
    pub author: ReviewAuthor,
    #[serde(rename = "reviewBody")]
    pub review_body: String,
    #[serde(rename = "reviewRating", skip_serializing_if = "Option::is_none")]
    pub review_rating: Option<Rating>,
    #[serde(rename = "itemReviewed")]
    pub item_reviewed: ItemReviewed,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "datePublished")]
    pub date_published: String,
    #[serde(rename = "inLanguage")]
    pub in_language: &'static str,
    pub publisher: Reference,
}

impl Review {
    pub fn new(author: ReviewAuthor, review_body: String, date_published: String) -> Self {
        Self {
            schema_type: "Review",
            author,
            review_body,
            review_rating: None,
            item_reviewed: ItemReviewed::organization(),
            name: None,
            date_published,
            in_language: "en",
            publisher: Reference::organization(),
        }
    }
}

/// The Person node inlined as a review's author.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewAuthor {
    #[serde(rename = "@type")]
    schema_type: &'static str,
    pub name: String,
    #[serde(rename = "additionalType")]
    pub additional_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(rename = "worksFor", skip_serializing_if = "Option::is_none")]
    pub works_for: Option<AuthorEmployer>,
    #[serde(rename = "sameAs", skip_serializing_if = "Vec::is_empty")]
    pub same_as: Vec<String>,
}

impl ReviewAuthor {
    pub fn new(name: String) -> Self {
        Self {
            schema_type: "Person",
            name,
            additional_type: ENTREPRENEUR_TYPE,
            url: None,
            description: None,
            image: None,
            works_for: None,
            same_as: Vec::new(),
        }
    }
}

/// The Organization a review author works for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorEmployer {
    #[serde(rename = "@type")]
    schema_type: &'static str,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "sameAs", skip_serializing_if = "Vec::is_empty")]
    pub same_as: Vec<String>,
}

impl AuthorEmployer {
    pub fn new(name: String) -> Self {
        Self { schema_type: "Organization", name, url: None, same_as: Vec::new() }
    }
}

/// A single star rating on one review.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rating {
    #[serde(rename = "@type")]
    schema_type: &'static str,
    #[serde(rename = "ratingValue")]
    pub rating_value: i64,
    #[serde(rename = "bestRating")]
    pub best_rating: u8,
    #[serde(rename = "worstRating")]
    pub worst_rating: u8,
}

impl Rating {
    pub fn new(rating_value: i64) -> Self {
        Self { schema_type: "Rating", rating_value, best_rating: 5, worst_rating: 1 }
    }
}

/// The rating summary stamped onto the Organization when at least one
/// review carries a rating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateRating {
    #[serde(rename = "@type")]
    schema_type: &'static str,
    #[serde(rename = "ratingValue")]
    pub rating_value: f64,
    #[serde(rename = "reviewCount")]
    pub review_count: usize,
    #[serde(rename = "bestRating")]
    pub best_rating: u8,
    #[serde(rename = "worstRating")]
    pub worst_rating: u8,
}

impl AggregateRating {
    pub fn new(rating_value: f64, review_count: usize) -> Self {
        Self {
            schema_type: "AggregateRating",
            rating_value,
            review_count,
            best_rating: 5,
            worst_rating: 1,
        }
    }
}

/// What a review reviewed: the Organization, either as a bare reference or
/// inlined with a per-review context description.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ItemReviewed {
    Described(ReviewedOrganization),
    Ref(Reference),
}

impl ItemReviewed {
    /// Bare reference to the Organization node.
    pub fn organization() -> Self {
        Self::Ref(Reference::organization())
    }

    /// Inline Organization carrying a reviewed-context description.
    pub fn described(description: String) -> Self {
        Self::Described(ReviewedOrganization {
            schema_type: "Organization",
            id: ORG_ID.to_string(),
            description,
        })
    }
}

/// Inline `itemReviewed` object used when a context description is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewedOrganization {
    #[serde(rename = "@type")]
    schema_type: &'static str,
    #[serde(rename = "@id")]
    pub id: String,
    pub description: String,
}

/// One node of the output graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GraphNode {
    Review(Review),
    Organization(Organization),
    /// Service entries pass through from the stored JSON as-is.
    Service(Map<String, Value>),
    Person(Person),
}

/// The finished `@context`/`@graph` document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    #[serde(rename = "@context")]
    pub context: &'static str,
    #[serde(rename = "@graph")]
    pub graph: Vec<GraphNode>,
}

impl Document {
    pub fn new(graph: Vec<GraphNode>) -> Self {
        Self { context: SCHEMA_CONTEXT, graph }
    }

    /// Serialises the document with stable, human-readable formatting.
    /// Slashes and non-ASCII text are left unescaped.
    pub fn to_pretty_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
