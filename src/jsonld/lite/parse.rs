//! String field parsers.
//!
//! Stored settings and testimonial metadata arrive as loosely formatted
//! text: a client name may carry an embedded anchor tag, a company name a
//! trailing parenthetical, list fields one entry per line. The functions
//! here turn those raw strings into structured values. All of them are
//! pure, and none of them fail: unusable fragments are dropped rather than
//! reported.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

static ANCHOR_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<a\s[^>]*href=["']([^"']+)["'][^>]*>"#).expect("anchor href pattern")
});

static SCRIPT_STYLE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script[^>]*?>.*?</script>|<style[^>]*?>.*?</style>")
        .expect("script/style block pattern")
});

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern"));

static TRAILING_PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\([^()]*\)\s*$").expect("trailing parenthetical pattern"));

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#(?P<dec>[0-9]+)|#[xX](?P<hex>[0-9a-fA-F]+)|(?P<name>[a-zA-Z]+));")
        .expect("entity pattern")
});

/// A client-name field split into its parts.
///
/// `"Brianna Rader, Founder & CEO"` becomes name `Brianna Rader` and title
/// `Founder & CEO`; an anchor tag wrapped around the name contributes the
/// `url`. Fields that cannot be derived stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientName {
    pub name: String,
    pub title: String,
    pub url: String,
}

/// Parses a raw client-name value into name, title, and embedded URL.
///
/// The URL comes from the first anchor tag's `href`, matched
/// case-insensitively. Markup is then stripped, entities decoded, and the
/// remainder split on the first comma into a trimmed name and title.
pub fn parse_client_name(raw: &str) -> ClientName {
    let mut result = ClientName::default();
    if raw.is_empty() {
        return result;
    }

    if let Some(captures) = ANCHOR_HREF.captures(raw) {
        result.url = captures[1].to_string();
    }

    let text = decode_entities(&strip_all_tags(raw));
    match text.split_once(',') {
        Some((name, title)) => {
            result.name = name.trim().to_string();
            result.title = title.trim().to_string();
        }
        None => result.name = text.trim().to_string(),
    }
    result
}

/// Strips one trailing parenthetical from a company name.
///
/// `"Juicebox (acquired in 2024)"` becomes `"Juicebox"`. Only a
/// parenthetical at the very end is removed; embedded ones stay.
pub fn parse_company_name(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    let decoded = decode_entities(raw);
    TRAILING_PARENTHETICAL.replace(&decoded, "").trim().to_string()
}

/// Parses a newline-separated URL list, keeping only well-formed entries.
///
/// Order is preserved and duplicates are not removed.
pub fn parse_url_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && is_well_formed_url(line))
        .map(str::to_string)
        .collect()
}

/// Parses a newline-separated list of plain text items.
pub fn parse_line_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses a URL list from per-record metadata, where entries may be
/// separated by newlines or commas.
pub fn parse_meta_url_list(text: &str) -> Vec<String> {
    text.split(['\n', ','])
        .map(str::trim)
        .filter(|item| !item.is_empty() && is_well_formed_url(item))
        .map(str::to_string)
        .collect()
}

/// Whether a candidate string is an absolute URL with a host.
pub fn is_well_formed_url(candidate: &str) -> bool {
    Url::parse(candidate).map(|url| url.has_host()).unwrap_or(false)
}

/// Removes all markup from a string.
///
/// `<script>` and `<style>` blocks are dropped together with their content;
/// every remaining tag is removed and the result trimmed. Line breaks in
/// the text itself are preserved.
pub fn strip_all_tags(text: &str) -> String {
    let without_blocks = SCRIPT_STYLE_BLOCK.replace_all(text, "");
    TAG.replace_all(&without_blocks, "").trim().to_string()
}

/// Decodes the common named entities plus numeric character references.
///
/// Unknown names and out-of-range code points are left untouched.
pub fn decode_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |captures: &regex::Captures<'_>| {
            if let Some(dec) = captures.name("dec") {
                return decode_code_point(dec.as_str(), 10)
                    .unwrap_or_else(|| captures[0].to_string());
            }
            if let Some(hex) = captures.name("hex") {
                return decode_code_point(hex.as_str(), 16)
                    .unwrap_or_else(|| captures[0].to_string());
            }
            match &captures["name"] {
                "amp" => "&".to_string(),
                "lt" => "<".to_string(),
                "gt" => ">".to_string(),
                "quot" => "\"".to_string(),
                "apos" => "'".to_string(),
                "nbsp" => "\u{a0}".to_string(),
                _ => captures[0].to_string(),
            }
        })
        .into_owned()
}

fn decode_code_point(digits: &str, radix: u32) -> Option<String> {
    let code = u32::from_str_radix(digits, radix).ok()?;
    char::from_u32(code).map(|c| c.to_string())
}

/// Normalises a testimonial body for use as a review body.
///
/// All line-ending styles collapse to `\n`, markup is stripped, and the
/// result is trimmed. Paragraph breaks survive as newlines.
pub fn normalize_body(content: &str) -> String {
    let unified = content.replace("\r\n", "\n").replace('\r', "\n");
    strip_all_tags(&unified)
}
