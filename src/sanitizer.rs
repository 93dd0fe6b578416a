//! Markup sanitization with a policy-driven allow list.
//!
//! Delegates the actual HTML parsing and cleaning to [`ammonia`]; this
//! module owns policy resolution (caller policy merged over safe
//! defaults) and normalizes the engine output back to a plain `String`.

use ammonia::Builder;
use serde::{Deserialize, Serialize};

/// Tags permitted when the caller does not supply an allow list.
const DEFAULT_ALLOWED_TAGS: &[&str] = &[
    "a", "abbr", "b", "blockquote", "br", "cite", "code", "dd", "del", "div", "dl", "dt", "em",
    "h1", "h2", "h3", "h4", "h5", "h6", "hr", "i", "img", "ins", "li", "ol", "p", "pre", "q",
    "small", "span", "strong", "sub", "sup", "table", "tbody", "td", "th", "thead", "tr", "ul",
];

/// Attributes permitted when the caller does not supply an allow list.
const DEFAULT_ALLOWED_ATTRIBUTES: &[&str] = &["alt", "class", "href", "id", "src", "title"];

/// URL schemes permitted on `href`/`src` by default.
const DEFAULT_URL_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

/// Tags that can never be allowed, whatever the caller policy says.
/// Their contents are deleted rather than unwrapped.
const ALWAYS_FORBIDDEN_TAGS: &[&str] = &["script", "style"];

/// Sanitization policy for markup-bearing input.
///
/// Every recognized option is enumerated here; there is no open-ended
/// passthrough to the underlying engine. Unset fields resolve to the
/// built-in safe defaults, so an empty policy still sanitizes — the
/// engine never runs wide open.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SanitizePolicy {
    /// Tags to allow. `None` resolves to the default allow list.
    pub allowed_tags: Option<Vec<String>>,

    /// Attributes to allow on any tag. `None` resolves to the default
    /// allow list.
    pub allowed_attributes: Option<Vec<String>>,

    /// Tags removed even if present in the allow list.
    pub forbidden_tags: Vec<String>,

    /// Attributes removed even if present in the allow list.
    pub forbidden_attributes: Vec<String>,

    /// Permit `data-*` attributes.
    pub allow_data_attributes: bool,

    /// URL schemes permitted on URL-valued attributes. `None` resolves
    /// to the default scheme list.
    pub allowed_url_schemes: Option<Vec<String>>,

    /// Strip HTML comments. Defaults to `true`.
    pub strip_comments: Option<bool>,

    /// Keep the text content of forbidden tags (unwrap the tag rather
    /// than deleting it with its contents). Defaults to `true`.
    /// Script-like containers are always deleted with their contents.
    pub keep_content: Option<bool>,

    /// When set, restricts `class` attributes to this list of class
    /// names on every allowed tag.
    pub allowed_classes: Option<Vec<String>>,
}

impl SanitizePolicy {
    /// Strict profile: minimal inline formatting, no attributes.
    pub fn strict() -> Self {
        Self {
            allowed_tags: Some(
                vec!["b", "br", "em", "i", "p", "strong"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
            ),
            allowed_attributes: Some(Vec::new()),
            ..Self::default()
        }
    }

    /// Permissive profile: the full default tag set plus data attributes.
    pub fn permissive() -> Self {
        Self {
            allow_data_attributes: true,
            ..Self::default()
        }
    }
}

/// Policy-resolved HTML sanitizer.
#[derive(Debug, Clone)]
pub struct Sanitizer {
    allowed_tags: Vec<String>,
    allowed_attributes: Vec<String>,
    attribute_prefixes: Vec<String>,
    url_schemes: Vec<String>,
    delete_content_tags: Vec<String>,
    allowed_classes: Option<Vec<String>>,
    strip_comments: bool,
}

impl Sanitizer {
    /// Resolve a caller policy over the safe defaults.
    pub fn new(policy: &SanitizePolicy) -> Self {
        let forbidden_tags: Vec<String> = policy
            .forbidden_tags
            .iter()
            .map(|t| t.to_ascii_lowercase())
            .collect();

        let mut allowed_tags: Vec<String> = policy
            .allowed_tags
            .clone()
            .unwrap_or_else(|| DEFAULT_ALLOWED_TAGS.iter().map(|s| s.to_string()).collect())
            .into_iter()
            .map(|t| t.to_ascii_lowercase())
            .collect();
        allowed_tags.retain(|t| {
            !forbidden_tags.contains(t) && !ALWAYS_FORBIDDEN_TAGS.contains(&t.as_str())
        });

        let forbidden_attributes: Vec<String> = policy
            .forbidden_attributes
            .iter()
            .map(|a| a.to_ascii_lowercase())
            .collect();

        let mut allowed_attributes: Vec<String> = policy
            .allowed_attributes
            .clone()
            .unwrap_or_else(|| {
                DEFAULT_ALLOWED_ATTRIBUTES
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            })
            .into_iter()
            .map(|a| a.to_ascii_lowercase())
            .collect();
        // Event-handler attributes are never allowed through.
        allowed_attributes.retain(|a| !forbidden_attributes.contains(a) && !a.starts_with("on"));

        let allowed_classes = policy.allowed_classes.clone();
        if allowed_classes.is_some() {
            // Class filtering replaces the generic class attribute.
            allowed_attributes.retain(|a| a != "class");
        }

        let mut delete_content_tags: Vec<String> = ALWAYS_FORBIDDEN_TAGS
            .iter()
            .map(|s| s.to_string())
            .collect();
        if !policy.keep_content.unwrap_or(true) {
            for tag in &forbidden_tags {
                if !delete_content_tags.contains(tag) {
                    delete_content_tags.push(tag.clone());
                }
            }
        }

        let attribute_prefixes = if policy.allow_data_attributes {
            vec!["data-".to_string()]
        } else {
            Vec::new()
        };

        let url_schemes = policy
            .allowed_url_schemes
            .clone()
            .unwrap_or_else(|| DEFAULT_URL_SCHEMES.iter().map(|s| s.to_string()).collect());

        Self {
            allowed_tags,
            allowed_attributes,
            attribute_prefixes,
            url_schemes,
            delete_content_tags,
            allowed_classes,
            strip_comments: policy.strip_comments.unwrap_or(true),
        }
    }

    /// Sanitize markup-bearing input.
    ///
    /// Malformed markup degrades to best-effort sanitized output; this
    /// never fails. The transform is idempotent for a fixed policy.
    pub fn clean(&self, input: &str) -> String {
        let mut builder = Builder::default();

        builder.tags(self.allowed_tags.iter().map(|s| s.as_str()).collect());
        builder.generic_attributes(self.allowed_attributes.iter().map(|s| s.as_str()).collect());
        builder.url_schemes(self.url_schemes.iter().map(|s| s.as_str()).collect());
        builder.clean_content_tags(self.delete_content_tags.iter().map(|s| s.as_str()).collect());
        builder.strip_comments(self.strip_comments);

        if !self.attribute_prefixes.is_empty() {
            builder.generic_attribute_prefixes(
                self.attribute_prefixes.iter().map(|s| s.as_str()).collect(),
            );
        }

        if let Some(classes) = &self.allowed_classes {
            builder.allowed_classes(
                self.allowed_tags
                    .iter()
                    .map(|tag| (tag.as_str(), classes.iter().map(|c| c.as_str()).collect()))
                    .collect(),
            );
        }

        builder.clean(input).to_string()
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new(&SanitizePolicy::default())
    }
}

/// Sanitize `input` under `policy` resolved over the safe defaults.
pub fn sanitize(input: &str, policy: &SanitizePolicy) -> String {
    Sanitizer::new(policy).clean(input)
}
