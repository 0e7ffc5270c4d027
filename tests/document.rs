use jsonld_lite::build;
use jsonld_lite::model::GraphNode;
use jsonld_lite::render::{self, PageContext};
use jsonld_lite::settings::{Settings, TargetMode};
use jsonld_lite::store::{ContentStore, MemoryStore};
use serde_json::{Value, json};

fn content(fixture: Value) -> MemoryStore {
    serde_json::from_value(fixture).expect("content fixture")
}

fn base_settings() -> Settings {
    Settings {
        org_name: "Acme Coaching".to_string(),
        org_url: "https://acme.example".to_string(),
        person_name: "Jo Founder".to_string(),
        ..Settings::default()
    }
}

fn document_json(settings: &Settings, store: &MemoryStore) -> Value {
    let document = render::build_document(settings, store);
    serde_json::to_value(&document).expect("document serialises")
}

fn rated_testimonial(id: u64, day: u32, stars: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Testimonial {id}"),
        "body": "Great work.",
        "published": format!("2024-03-{day:02}"),
        "meta": { "client_name": format!("Client {id}, Founder"), "star_rating": stars }
    })
}

#[test]
fn record_without_client_name_produces_no_review() {
    let store = content(json!({
        "testimonials": [
            {
                "id": 1,
                "title": "Kept",
                "body": "Great.",
                "published": "2024-01-02",
                "meta": { "client_name": "Jane Doe, Founder" }
            },
            {
                "id": 2,
                "title": "Skipped",
                "body": "Also great.",
                "published": "2024-01-03",
                "meta": { "company_name": "Acme" }
            }
        ]
    }));

    let graph = document_json(&base_settings(), &store);
    let nodes = graph["@graph"].as_array().expect("graph array");
    // One review, Organization, Person.
    assert_eq!(nodes.len(), 3);
    assert_eq!(nodes[0]["@type"], json!("Review"));
    assert_eq!(nodes[0]["author"]["name"], json!("Jane Doe"));
}

#[test]
fn aggregate_rating_averages_over_rated_reviews() {
    let store = content(json!({
        "testimonials": [
            rated_testimonial(1, 1, "5"),
            rated_testimonial(2, 2, "4"),
            rated_testimonial(3, 3, "3"),
        ]
    }));

    let graph = document_json(&base_settings(), &store);
    let org = &graph["@graph"][3];
    assert_eq!(org["@id"], json!("#org"));
    assert_eq!(org["aggregateRating"]["ratingValue"], json!(4.0));
    assert_eq!(org["aggregateRating"]["reviewCount"], json!(3));
    assert_eq!(org["aggregateRating"]["bestRating"], json!(5));
    assert_eq!(org["aggregateRating"]["worstRating"], json!(1));
}

#[test]
fn aggregate_rating_rounds_to_one_decimal() {
    let store = content(json!({
        "testimonials": [
            rated_testimonial(1, 1, "5"),
            rated_testimonial(2, 2, "4"),
            rated_testimonial(3, 3, "4"),
        ]
    }));

    let graph = document_json(&base_settings(), &store);
    assert_eq!(graph["@graph"][3]["aggregateRating"]["ratingValue"], json!(4.3));
}

#[test]
fn unrated_reviews_leave_no_aggregate_rating_key() {
    let store = content(json!({
        "testimonials": [{
            "id": 1,
            "title": "Unrated",
            "body": "Great.",
            "published": "2024-01-02",
            "meta": { "client_name": "Jane Doe, Founder", "star_rating": "0" }
        }]
    }));

    let graph = document_json(&base_settings(), &store);
    let org = &graph["@graph"][1];
    assert_eq!(org["@id"], json!("#org"));
    assert!(org.get("aggregateRating").is_none());
    // A zero rating also leaves the review itself unrated.
    assert!(graph["@graph"][0].get("reviewRating").is_none());
}

#[test]
fn review_carries_parsed_and_enriched_fields() {
    let store = content(json!({
        "testimonials": [{
            "id": 7,
            "title": "Transformative coaching",
            "body": "<p>First paragraph.</p>\r\n\r\n<p>Second paragraph.</p>",
            "published": "2024-05-01",
            "meta": {
                "client_name": "<a href=\"https://linkedin.com/in/jane\">Jane Doe</a>, Founder &amp; CEO",
                "company_name": "Juicebox (acquired in 2024)",
                "company_website": "https://juicebox.example",
                "star_rating": "5",
                "_thumbnail_id": "12",
                "_jsonld_org_sameas": "https://crunchbase.example/juicebox",
                "_jsonld_reviewed_description": "venture-backed founder coaching"
            }
        }],
        "attachments": { "12": "https://cdn.example/jane.jpg" }
    }));

    let graph = document_json(&base_settings(), &store);
    let review = &graph["@graph"][0];

    assert_eq!(review["@type"], json!("Review"));
    assert_eq!(review["name"], json!("Transformative coaching"));
    assert_eq!(review["datePublished"], json!("2024-05-01"));
    assert_eq!(review["inLanguage"], json!("en"));
    assert_eq!(review["reviewBody"], json!("First paragraph.\n\nSecond paragraph."));
    assert_eq!(review["reviewRating"]["ratingValue"], json!(5));
    assert_eq!(review["publisher"], json!({ "@id": "#org" }));
    assert_eq!(
        review["itemReviewed"],
        json!({
            "@type": "Organization",
            "@id": "#org",
            "description": "venture-backed founder coaching"
        })
    );

    let author = &review["author"];
    assert_eq!(author["@type"], json!("Person"));
    assert_eq!(author["name"], json!("Jane Doe"));
    assert_eq!(author["additionalType"], json!("https://schema.org/Entrepreneur"));
    assert_eq!(author["url"], json!("https://linkedin.com/in/jane"));
    assert_eq!(author["description"], json!("Founder & CEO of Juicebox"));
    assert_eq!(author["image"], json!("https://cdn.example/jane.jpg"));
    assert_eq!(author["worksFor"]["name"], json!("Juicebox"));
    assert_eq!(author["worksFor"]["url"], json!("https://juicebox.example"));
    assert_eq!(
        author["worksFor"]["sameAs"],
        json!(["https://crunchbase.example/juicebox"])
    );
}

#[test]
fn explicit_enrichment_meta_wins_over_derived_values() {
    let store = content(json!({
        "testimonials": [{
            "id": 1,
            "title": "Override",
            "body": "Great.",
            "published": "2024-01-02",
            "meta": {
                "client_name": "<a href=\"https://embedded.example\">Jane Doe</a>, Founder",
                "company_name": "Juicebox",
                "_jsonld_author_url": "https://override.example/jane",
                "_jsonld_author_description": "Serial founder"
            }
        }]
    }));

    let graph = document_json(&base_settings(), &store);
    let author = &graph["@graph"][0]["author"];
    assert_eq!(author["url"], json!("https://override.example/jane"));
    assert_eq!(author["description"], json!("Serial founder"));
}

#[test]
fn bare_title_without_company_becomes_author_description() {
    let store = content(json!({
        "testimonials": [{
            "id": 1,
            "title": "Bare title",
            "body": "Great.",
            "published": "2024-01-02",
            "meta": { "client_name": "Jane Doe, Founder" }
        }]
    }));

    let graph = document_json(&base_settings(), &store);
    let author = &graph["@graph"][0]["author"];
    assert_eq!(author["description"], json!("Founder"));
    assert!(author.get("worksFor").is_none());
}

#[test]
fn unresolvable_thumbnail_omits_author_image() {
    let store = content(json!({
        "testimonials": [{
            "id": 1,
            "title": "No image",
            "body": "Great.",
            "published": "2024-01-02",
            "meta": { "client_name": "Jane Doe, Founder", "_thumbnail_id": "99" }
        }]
    }));

    let graph = document_json(&base_settings(), &store);
    assert!(graph["@graph"][0]["author"].get("image").is_none());
}

#[test]
fn item_reviewed_defaults_to_bare_reference() {
    let store = content(json!({
        "testimonials": [{
            "id": 1,
            "title": "Plain",
            "body": "Great.",
            "published": "2024-01-02",
            "meta": { "client_name": "Jane Doe, Founder" }
        }]
    }));

    let graph = document_json(&base_settings(), &store);
    assert_eq!(graph["@graph"][0]["itemReviewed"], json!({ "@id": "#org" }));
}

#[test]
fn organization_contact_point_requires_email_or_type() {
    let mut settings = base_settings();
    let store = content(json!({ "testimonials": [] }));

    let graph = document_json(&settings, &store);
    assert!(graph["@graph"][0].get("contactPoint").is_none());

    settings.org_contact_email = "hello@acme.example".to_string();
    let graph = document_json(&settings, &store);
    assert_eq!(
        graph["@graph"][0]["contactPoint"],
        json!({ "@type": "ContactPoint", "email": "hello@acme.example" })
    );
}

#[test]
fn person_node_carries_alumni_and_employer_reference() {
    let mut settings = base_settings();
    settings.person_alumni_name = "State University".to_string();
    settings.person_alumni_url = "https://state.example".to_string();
    settings.person_knows_about = "founder coaching\nfundraising".to_string();
    let store = content(json!({ "testimonials": [] }));

    let graph = document_json(&settings, &store);
    let person = &graph["@graph"][1];
    assert_eq!(person["@id"], json!("#person"));
    assert_eq!(person["worksFor"], json!({ "@id": "#org" }));
    assert_eq!(
        person["alumniOf"],
        json!({
            "@type": "EducationalOrganization",
            "name": "State University",
            "url": "https://state.example"
        })
    );
    assert_eq!(person["knowsAbout"], json!(["founder coaching", "fundraising"]));
}

#[test]
fn organization_references_person_as_founder() {
    let store = content(json!({ "testimonials": [] }));
    let graph = document_json(&base_settings(), &store);
    assert_eq!(graph["@graph"][0]["founder"], json!({ "@id": "#person" }));
}

#[test]
fn services_get_default_type_injected() {
    let mut settings = base_settings();
    settings.services_json = json!([
        { "name": "Founder Coaching" },
        { "@type": "FinancialService", "name": "Advisory" }
    ])
    .to_string();
    let store = content(json!({ "testimonials": [] }));

    let graph = document_json(&settings, &store);
    let nodes = graph["@graph"].as_array().expect("graph array");
    // Organization, two services, Person.
    assert_eq!(nodes.len(), 4);
    assert_eq!(nodes[1]["@type"], json!("Service"));
    assert_eq!(nodes[1]["name"], json!("Founder Coaching"));
    assert_eq!(nodes[2]["@type"], json!("FinancialService"));
}

#[test]
fn malformed_services_json_yields_no_service_nodes() {
    let mut settings = base_settings();
    settings.services_json = "not json".to_string();
    let store = content(json!({ "testimonials": [] }));

    let graph = document_json(&settings, &store);
    assert_eq!(graph["@graph"].as_array().expect("graph array").len(), 2);
}

#[test]
fn store_filters_unpublished_and_orders_by_date() {
    let store = content(json!({
        "testimonials": [
            {
                "id": 3,
                "title": "Later",
                "body": "x",
                "published": "2024-06-01",
                "meta": { "client_name": "Later Client" }
            },
            {
                "id": 1,
                "title": "Draft",
                "body": "x",
                "published": "2024-01-01",
                "status": "draft",
                "meta": { "client_name": "Draft Client" }
            },
            {
                "id": 2,
                "title": "Earlier",
                "body": "x",
                "published": "2024-02-01",
                "meta": { "client_name": "Earlier Client" }
            }
        ]
    }));

    let records = store.published_testimonials();
    assert_eq!(
        records.iter().map(|record| record.id).collect::<Vec<_>>(),
        vec![2, 3]
    );

    let graph = document_json(&base_settings(), &store);
    assert_eq!(graph["@graph"][0]["author"]["name"], json!("Earlier Client"));
    assert_eq!(graph["@graph"][1]["author"]["name"], json!("Later Client"));
}

#[test]
fn building_twice_from_identical_state_is_byte_identical() {
    let settings = {
        let mut settings = base_settings();
        settings.services_json = json!([{ "name": "Coaching" }]).to_string();
        settings
    };
    let store = content(json!({
        "testimonials": [
            rated_testimonial(1, 1, "5"),
            rated_testimonial(2, 2, "4"),
        ]
    }));

    let first = render::build_document(&settings, &store)
        .to_pretty_json()
        .expect("first render");
    let second = render::build_document(&settings, &store)
        .to_pretty_json()
        .expect("second render");
    assert_eq!(first, second);
}

#[test]
fn targeting_modes_select_the_expected_pages() {
    let mut settings = base_settings();

    settings.target_mode = TargetMode::Homepage;
    assert!(render::should_emit(
        &settings,
        &PageContext { front_page: true, page_id: None }
    ));
    assert!(!render::should_emit(
        &settings,
        &PageContext { front_page: false, page_id: Some(4) }
    ));

    settings.target_mode = TargetMode::All;
    assert!(render::should_emit(&settings, &PageContext::default()));

    settings.target_mode = TargetMode::Specific;
    settings.target_page_ids = "4,9".to_string();
    assert!(render::should_emit(
        &settings,
        &PageContext { front_page: false, page_id: Some(9) }
    ));
    assert!(!render::should_emit(
        &settings,
        &PageContext { front_page: false, page_id: Some(5) }
    ));

    settings.target_mode = TargetMode::Unknown;
    assert!(!render::should_emit(
        &settings,
        &PageContext { front_page: true, page_id: Some(9) }
    ));
}

#[test]
fn unknown_stored_target_mode_never_emits() {
    let settings: Settings =
        serde_json::from_value(json!({ "target_mode": "everywhere" })).expect("settings parse");
    assert_eq!(settings.target_mode, TargetMode::Unknown);
    assert!(!render::should_emit(
        &settings,
        &PageContext { front_page: true, page_id: Some(1) }
    ));
}

#[test]
fn head_snippet_wraps_document_and_reports_debug_stats() {
    let store = content(json!({
        "testimonials": [rated_testimonial(1, 1, "5")]
    }));
    let settings = {
        let mut settings = base_settings();
        settings.target_mode = TargetMode::All;
        settings
    };

    let snippet = render::head_snippet(&settings, &store, &PageContext::default(), true)
        .expect("render succeeds")
        .expect("targeting accepts");
    assert!(snippet.starts_with("<!-- jsonld-lite: 1 reviews, avg rating: 5 -->\n"));
    assert!(snippet.contains("<script type=\"application/ld+json\">\n"));
    assert!(snippet.ends_with("\n</script>\n"));

    let plain = render::head_snippet(&settings, &store, &PageContext::default(), false)
        .expect("render succeeds")
        .expect("targeting accepts");
    assert!(!plain.starts_with("<!--"));

    let mut homepage_only = settings;
    homepage_only.target_mode = TargetMode::Homepage;
    let declined = render::head_snippet(&homepage_only, &store, &PageContext::default(), false)
        .expect("render succeeds");
    assert!(declined.is_none());
}

#[test]
fn sanitize_applies_save_time_coercions() {
    let raw = Settings {
        target_mode: TargetMode::Unknown,
        org_url: "not a url".to_string(),
        org_name: "<strong>Acme</strong> Coaching".to_string(),
        services_json: "{ \"not\": \"an array\" }".to_string(),
        ..Settings::default()
    };

    let clean = raw.sanitize();
    assert_eq!(clean.target_mode, TargetMode::Homepage);
    assert_eq!(clean.org_url, "");
    assert_eq!(clean.org_name, "Acme Coaching");
    assert_eq!(clean.services_json, "[]");
}

#[test]
fn sanitize_reencodes_valid_services_array() {
    let raw = Settings {
        services_json: "[{\"name\":\"Coaching\"}]".to_string(),
        ..Settings::default()
    };
    let clean = raw.sanitize();
    let value: Value = serde_json::from_str(&clean.services_json).expect("services parse");
    assert_eq!(value, json!([{ "name": "Coaching" }]));
    // Pretty-printed on save.
    assert!(clean.services_json.contains('\n'));
}

#[test]
fn auto_description_matches_review_fallback() {
    assert_eq!(
        build::auto_description("Jane Doe, Founder & CEO", "Juicebox (acquired in 2024)"),
        "Founder & CEO of Juicebox"
    );
    assert_eq!(build::auto_description("Jane Doe, Founder", ""), "Founder");
    assert_eq!(build::auto_description("Jane Doe", "Juicebox"), "");
}

#[test]
fn graph_nodes_keep_review_org_service_person_order() {
    let mut settings = base_settings();
    settings.services_json = json!([{ "name": "Coaching" }]).to_string();
    let store = content(json!({
        "testimonials": [rated_testimonial(1, 1, "5")]
    }));

    let document = render::build_document(&settings, &store);
    let kinds: Vec<&str> = document
        .graph
        .iter()
        .map(|node| match node {
            GraphNode::Review(_) => "review",
            GraphNode::Organization(_) => "organization",
            GraphNode::Service(_) => "service",
            GraphNode::Person(_) => "person",
        })
        .collect();
    assert_eq!(kinds, vec!["review", "organization", "service", "person"]);
}
