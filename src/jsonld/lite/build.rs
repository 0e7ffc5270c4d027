//! Entity builders.
//!
//! Each function assembles one node kind of the output graph from the
//! stored settings or a testimonial record. Conditional fields follow one
//! rule throughout: an empty stored value means the field is absent from
//! the output, never `null`.

use serde_json::{Map, Value};

use crate::jsonld::lite::model::{
    AuthorEmployer, ContactPoint, EducationalOrganization, ItemReviewed, Organization, Person,
    Rating, Review, ReviewAuthor,
};
use crate::jsonld::lite::parse;
use crate::jsonld::lite::settings::Settings;
use crate::jsonld::lite::store::{self, ContentStore, TestimonialRecord};

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Builds the Organization node from the stored settings.
///
/// The aggregate rating is stamped on later by the orchestrator, once the
/// review set is known.
pub fn build_organization(settings: &Settings) -> Organization {
    let mut org = Organization::new();
    org.name = non_empty(&settings.org_name);
    org.url = non_empty(&settings.org_url);
    org.same_as = parse::parse_url_list(&settings.org_sameas);
    org.founding_date = non_empty(&settings.org_founding_date);

    let email = non_empty(&settings.org_contact_email);
    let contact_type = non_empty(&settings.org_contact_type);
    if email.is_some() || contact_type.is_some() {
        org.contact_point = Some(ContactPoint::new(email, contact_type));
    }

    org.description = non_empty(&settings.org_description);
    org
}

/// Builds the site-owner Person node from the stored settings.
pub fn build_person(settings: &Settings) -> Person {
    let mut person = Person::new();
    person.name = non_empty(&settings.person_name);
    person.description = non_empty(&settings.person_description);
    person.job_title = non_empty(&settings.person_job_title);
    person.same_as = parse::parse_url_list(&settings.person_sameas);
    person.image = non_empty(&settings.person_image);
    person.url = non_empty(&settings.person_url);

    if let Some(alumni_name) = non_empty(&settings.person_alumni_name) {
        let mut alumni = EducationalOrganization::new(alumni_name);
        alumni.url = non_empty(&settings.person_alumni_url);
        person.alumni_of = Some(alumni);
    }

    person.knows_about = parse::parse_line_list(&settings.person_knows_about);
    person
}

/// Builds one Review node from a testimonial record.
///
/// Returns `None` when the record has no usable client name — the record
/// is simply skipped, it is not an error.
pub fn build_review(record: &TestimonialRecord, content: &dyn ContentStore) -> Option<Review> {
    let client_name = content.meta(record.id, store::META_CLIENT_NAME).unwrap_or_default();
    let parsed = parse::parse_client_name(&client_name);
    if parsed.name.is_empty() {
        return None;
    }

    let company_raw = content.meta(record.id, store::META_COMPANY_NAME).unwrap_or_default();
    let company = parse::parse_company_name(&company_raw);

    let mut author = ReviewAuthor::new(parsed.name);

    // Explicit meta wins over the URL embedded in the client-name markup.
    author.url = content
        .meta(record.id, store::META_AUTHOR_URL)
        .or_else(|| non_empty(&parsed.url));

    author.description = content
        .meta(record.id, store::META_AUTHOR_DESCRIPTION)
        .or_else(|| derived_description(&parsed.title, &company));

    author.image = content
        .meta(record.id, store::META_THUMBNAIL_ID)
        .and_then(|thumbnail| thumbnail.trim().parse::<u64>().ok())
        .and_then(|attachment| content.attachment_url(attachment));

    if !company.is_empty() {
        let mut employer = AuthorEmployer::new(company);
        employer.url = content.meta(record.id, store::META_COMPANY_WEBSITE);
        employer.same_as = parse::parse_meta_url_list(
            &content.meta(record.id, store::META_ORG_SAMEAS).unwrap_or_default(),
        );
        author.works_for = Some(employer);
    }

    author.same_as = parse::parse_meta_url_list(
        &content.meta(record.id, store::META_AUTHOR_SAMEAS).unwrap_or_default(),
    );

    let body = parse::normalize_body(&record.body);
    let date_published = record.published.format("%Y-%m-%d").to_string();

    let mut review = Review::new(author, body, date_published);
    review.name = non_empty(&record.title);

    review.review_rating = content
        .meta(record.id, store::META_STAR_RATING)
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .filter(|stars| *stars != 0)
        .map(Rating::new);

    review.item_reviewed = match content.meta(record.id, store::META_REVIEWED_DESCRIPTION) {
        Some(description) => ItemReviewed::described(description),
        None => ItemReviewed::organization(),
    };

    Some(review)
}

/// Parses the stored services JSON into pass-through graph nodes.
///
/// Anything that is not a JSON array yields an empty list. Entries lacking
/// an `@type` key get `"Service"` injected; entries that are not objects
/// are dropped.
pub fn build_services(settings: &Settings) -> Vec<Map<String, Value>> {
    let Ok(Value::Array(entries)) = serde_json::from_str(&settings.services_json) else {
        return Vec::new();
    };

    entries
        .into_iter()
        .filter_map(|entry| match entry {
            Value::Object(mut service) => {
                service
                    .entry("@type")
                    .or_insert_with(|| Value::String("Service".to_string()));
                Some(service)
            }
            _ => None,
        })
        .collect()
}

/// The author description shown as the override field's placeholder and
/// used as the fallback when no override is stored.
pub fn auto_description(client_name: &str, company_name: &str) -> String {
    let parsed = parse::parse_client_name(client_name);
    let company = parse::parse_company_name(company_name);
    derived_description(&parsed.title, &company).unwrap_or_default()
}

fn derived_description(title: &str, company: &str) -> Option<String> {
    if !title.is_empty() && !company.is_empty() {
        Some(format!("{title} of {company}"))
    } else if !title.is_empty() {
        Some(title.to_string())
    } else {
        None
    }
}
