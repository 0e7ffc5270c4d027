//! Typed configuration backing the generator.
//!
//! The host stores these values as a flat string map; unset keys fall back
//! to the defaults baked into [`Settings::default`]. Raw input is coerced
//! once, at save time, through [`Settings::sanitize`] — the render path
//! reads the struct as-is and re-checks only the services JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::jsonld::lite::parse;

/// Selects which pages receive the generated document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetMode {
    /// Only the site's designated front page.
    #[default]
    Homepage,
    /// Every page.
    All,
    /// Only pages whose id appears in the configured allow-list.
    Specific,
    /// Any unrecognised stored value. Never emits.
    #[serde(other)]
    Unknown,
}

/// The full settings map, one field per stored key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub target_mode: TargetMode,
    /// Comma-separated page ids, used only in [`TargetMode::Specific`].
    pub target_page_ids: String,

    pub org_name: String,
    pub org_url: String,
    pub org_description: String,
    /// Newline-separated sameAs URLs.
    pub org_sameas: String,
    pub org_founding_date: String,
    pub org_contact_type: String,
    pub org_contact_email: String,

    pub person_name: String,
    pub person_description: String,
    pub person_job_title: String,
    pub person_image: String,
    pub person_url: String,
    /// Newline-separated sameAs URLs.
    pub person_sameas: String,
    pub person_alumni_name: String,
    pub person_alumni_url: String,
    /// Newline-separated knowsAbout topics.
    pub person_knows_about: String,

    /// A JSON array of Service objects, stored verbatim.
    pub services_json: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target_mode: TargetMode::default(),
            target_page_ids: String::new(),
            org_name: String::new(),
            org_url: String::new(),
            org_description: String::new(),
            org_sameas: String::new(),
            org_founding_date: String::new(),
            org_contact_type: String::new(),
            org_contact_email: String::new(),
            person_name: String::new(),
            person_description: String::new(),
            person_job_title: String::new(),
            person_image: String::new(),
            person_url: String::new(),
            person_sameas: String::new(),
            person_alumni_name: String::new(),
            person_alumni_url: String::new(),
            person_knows_about: String::new(),
            services_json: "[]".to_string(),
        }
    }
}

impl Settings {
    /// Applies the save-time coercions to raw form input.
    ///
    /// An unknown target mode falls back to [`TargetMode::Homepage`],
    /// URL-valued fields are cleared unless well formed, text fields lose
    /// their markup, and the services JSON is re-encoded pretty-printed or
    /// replaced with an empty array literal when it does not parse to an
    /// array. Invalid input is replaced, never rejected.
    pub fn sanitize(mut self) -> Self {
        if self.target_mode == TargetMode::Unknown {
            self.target_mode = TargetMode::Homepage;
        }

        for field in [
            &mut self.target_page_ids,
            &mut self.org_name,
            &mut self.org_description,
            &mut self.org_sameas,
            &mut self.org_founding_date,
            &mut self.org_contact_type,
            &mut self.org_contact_email,
            &mut self.person_name,
            &mut self.person_description,
            &mut self.person_job_title,
            &mut self.person_sameas,
            &mut self.person_alumni_name,
            &mut self.person_knows_about,
        ] {
            *field = parse::strip_all_tags(field);
        }

        for field in [
            &mut self.org_url,
            &mut self.person_image,
            &mut self.person_url,
            &mut self.person_alumni_url,
        ] {
            let trimmed = field.trim();
            *field = if parse::is_well_formed_url(trimmed) {
                trimmed.to_string()
            } else {
                String::new()
            };
        }

        self.services_json = match serde_json::from_str::<Value>(&self.services_json) {
            Ok(value @ Value::Array(_)) => {
                serde_json::to_string_pretty(&value).unwrap_or_else(|_| "[]".to_string())
            }
            _ => "[]".to_string(),
        };

        self
    }

    /// The parsed page-id allow-list. Entries that are not numeric are
    /// dropped.
    pub fn target_page_id_list(&self) -> Vec<u64> {
        self.target_page_ids
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .filter_map(|entry| entry.parse().ok())
            .collect()
    }
}
