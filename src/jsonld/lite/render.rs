//! Render orchestration.
//!
//! One pass per page render: decide whether the page qualifies, query the
//! published testimonials, assemble the graph, and wrap it in the script
//! block that goes into the page head. The pass owns all of its state —
//! nothing is cached between renders, so identical stored state always
//! yields byte-identical output.

use tracing::{debug, info, instrument};

use crate::jsonld::lite::build;
use crate::jsonld::lite::error::Result;
use crate::jsonld::lite::model::{AggregateRating, Document, GraphNode};
use crate::jsonld::lite::settings::{Settings, TargetMode};
use crate::jsonld::lite::store::ContentStore;

/// Identifies the page currently being rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageContext {
    /// Whether this is the site's designated front page.
    pub front_page: bool,
    /// Numeric id of the page, when it has one.
    pub page_id: Option<u64>,
}

/// Whether the configured targeting mode selects the given page.
pub fn should_emit(settings: &Settings, page: &PageContext) -> bool {
    match settings.target_mode {
        TargetMode::Homepage => page.front_page,
        TargetMode::All => true,
        TargetMode::Specific => page
            .page_id
            .is_some_and(|id| settings.target_page_id_list().contains(&id)),
        TargetMode::Unknown => false,
    }
}

/// Builds the full document graph from the stored state.
///
/// Reviews come first in record order, then the Organization (carrying the
/// aggregate rating when any review was rated), the Services, and the
/// Person.
#[instrument(level = "info", skip_all)]
pub fn build_document(settings: &Settings, content: &dyn ContentStore) -> Document {
    let records = content.published_testimonials();
    debug!(record_count = records.len(), "loaded published testimonials");

    let mut reviews = Vec::new();
    let mut rating_sum = 0i64;
    let mut rating_count = 0usize;
    for record in &records {
        let Some(review) = build::build_review(record, content) else {
            continue;
        };
        if let Some(rating) = &review.review_rating {
            rating_sum += rating.rating_value;
            rating_count += 1;
        }
        reviews.push(review);
    }

    let mut organization = build::build_organization(settings);
    if rating_count > 0 {
        let average = round_to_tenth(rating_sum as f64 / rating_count as f64);
        organization.aggregate_rating = Some(AggregateRating::new(average, rating_count));
    }

    let services = build::build_services(settings);
    let person = build::build_person(settings);

    info!(
        review_count = reviews.len(),
        rated = rating_count,
        service_count = services.len(),
        "document assembled"
    );

    let mut graph: Vec<GraphNode> = reviews.into_iter().map(GraphNode::Review).collect();
    graph.push(GraphNode::Organization(organization));
    graph.extend(services.into_iter().map(GraphNode::Service));
    graph.push(GraphNode::Person(person));

    Document::new(graph)
}

/// Renders the head snippet for one page, or `None` when the targeting
/// mode declines the page.
///
/// With `debug` set, the script block is preceded by a comment naming the
/// review count and average rating.
#[instrument(level = "info", skip_all, fields(front_page = page.front_page, page_id = ?page.page_id))]
pub fn head_snippet(
    settings: &Settings,
    content: &dyn ContentStore,
    page: &PageContext,
    debug: bool,
) -> Result<Option<String>> {
    if !should_emit(settings, page) {
        debug!(mode = ?settings.target_mode, "targeting declined the page");
        return Ok(None);
    }

    let document = build_document(settings, content);

    let mut snippet = String::new();
    if debug {
        snippet.push_str(&debug_comment(&document));
    }
    snippet.push_str("<script type=\"application/ld+json\">\n");
    snippet.push_str(&document.to_pretty_json()?);
    snippet.push_str("\n</script>\n");
    Ok(Some(snippet))
}

fn debug_comment(document: &Document) -> String {
    let review_count = document
        .graph
        .iter()
        .filter(|node| matches!(node, GraphNode::Review(_)))
        .count();
    let average = document
        .graph
        .iter()
        .find_map(|node| match node {
            GraphNode::Organization(org) => org
                .aggregate_rating
                .as_ref()
                .map(|rating| rating.rating_value.to_string()),
            _ => None,
        })
        .unwrap_or_else(|| "n/a".to_string());
    format!("<!-- jsonld-lite: {review_count} reviews, avg rating: {average} -->\n")
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
