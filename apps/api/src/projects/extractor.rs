//! Content Extractor: recovers a title and a short description from generated HTML.
//!
//! Best-effort pattern matching, not a parser. Each field resolves to
//! `Field::Found` or `Field::NotFound`; placeholders are applied in one place
//! (`ExtractedFields::resolve`). Extraction never fails.
//!
//! - title: first `<title>…</title>`
//! - description: first `<p>` directly after the first `<h1>…</h1>`, else the
//!   first `<p>` anywhere
//!
//! Matching is case-insensitive and spans newlines. Matches that are empty
//! after trimming are skipped. Unclosed tags simply do not match.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

static TITLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<title(?:\s[^>]*)?>(.*?)</title\s*>").expect("valid title regex")
});

static H1_THEN_P_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<h1(?:\s[^>]*)?>.*?</h1\s*>\s*<p(?:\s[^>]*)?>(.*?)</p\s*>")
        .expect("valid heading-paragraph regex")
});

static ANY_P_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<p(?:\s[^>]*)?>(.*?)</p\s*>").expect("valid paragraph regex")
});

/// Outcome of matching one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Found(String),
    NotFound,
}

impl Field {
    /// First match whose trimmed content is non-empty.
    fn from_capture(re: &Regex, haystack: &str) -> Self {
        re.captures_iter(haystack)
            .filter_map(|c| c.get(1))
            .map(|m| m.as_str().trim())
            .find(|text| !text.is_empty())
            .map_or(Field::NotFound, |text| Field::Found(text.to_string()))
    }

    /// First `Found` of `self` and `other`.
    fn or_else(self, other: impl FnOnce() -> Field) -> Field {
        match self {
            Field::Found(_) => self,
            Field::NotFound => other(),
        }
    }

    pub fn unwrap_or(self, default: &str) -> String {
        match self {
            Field::Found(text) => text,
            Field::NotFound => default.to_string(),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Field::Found(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFields {
    pub title: Field,
    pub description: Field,
}

impl ExtractedFields {
    pub fn resolve(self, placeholders: &Placeholders) -> ProjectMeta {
        ProjectMeta {
            title: self.title.unwrap_or(&placeholders.title),
            description: self.description.unwrap_or(&placeholders.description),
        }
    }
}

/// Title and description as delivered to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectMeta {
    pub title: String,
    pub description: String,
}

pub fn extract_fields(raw_html: &str) -> ExtractedFields {
    let title = Field::from_capture(&TITLE_RE, raw_html);
    let description = Field::from_capture(&H1_THEN_P_RE, raw_html)
        .or_else(|| Field::from_capture(&ANY_P_RE, raw_html));
    ExtractedFields { title, description }
}

/// `(title, description)` with the default (English) placeholders.
#[allow(dead_code)]
pub fn extract(raw_html: &str) -> (String, String) {
    let meta = extract_fields(raw_html).resolve(&Placeholders::english());
    (meta.title, meta.description)
}

// ────────────────────────────────────────────────────────────────────────────
// Placeholders
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholders {
    pub title: String,
    pub description: String,
}

impl Placeholders {
    pub fn english() -> Self {
        Self {
            title: "Generated project plan".to_string(),
            description: "Detailed project description.".to_string(),
        }
    }

    pub fn russian() -> Self {
        Self {
            title: "Сгенерированный план проекта".to_string(),
            description: "Подробное описание проекта.".to_string(),
        }
    }
}

/// Placeholder texts by language code. Built once at startup and shared
/// read-only; unknown languages get the English texts.
#[derive(Debug, Clone)]
pub struct PlaceholderTable {
    by_language: HashMap<String, Placeholders>,
    fallback: Placeholders,
}

impl PlaceholderTable {
    pub fn builtin() -> Self {
        let by_language = HashMap::from([
            ("en".to_string(), Placeholders::english()),
            ("ru".to_string(), Placeholders::russian()),
        ]);
        Self {
            by_language,
            fallback: Placeholders::english(),
        }
    }

    /// Accepts region-qualified codes (`ru-RU`, `en_US`).
    pub fn for_language(&self, language_code: &str) -> &Placeholders {
        let primary = language_code
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        self.by_language.get(&primary).unwrap_or(&self.fallback)
    }
}
