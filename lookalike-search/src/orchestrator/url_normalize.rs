//! Profile URL canonicalisation for result deduplication.
//!
//! The same account reaches us through APIs, the platform's own pages and
//! third-party mirrors, each spelling its URL slightly differently
//! (`twitter.com` vs `x.com`, `m.`/`mbasic.`/`www.` hosts, tracking
//! parameters, trailing slashes, handle capitalisation). This module maps
//! all of those onto one key.

use url::Url;

/// Query parameters that never identify an account.
const TRACKING_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "fbclid",
    "gclid",
    "ref",
    "refid",
    "__tn__",
    "__cft__",
    "eav",
    "paipv",
    "si",
    "s",
    "t",
    "feature",
];

/// Host aliases collapsed onto the platform's canonical host.
const HOST_ALIASES: &[(&str, &str)] = &[
    ("twitter.com", "x.com"),
    ("www.twitter.com", "x.com"),
    ("mobile.twitter.com", "x.com"),
    ("www.x.com", "x.com"),
    ("www.facebook.com", "facebook.com"),
    ("m.facebook.com", "facebook.com"),
    ("mbasic.facebook.com", "facebook.com"),
    ("web.facebook.com", "facebook.com"),
    ("www.youtube.com", "youtube.com"),
    ("m.youtube.com", "youtube.com"),
];

/// Path prefixes whose remainder is a case-sensitive identifier.
const CASE_SENSITIVE_PREFIXES: &[&str] = &["/channel/"];

/// Canonicalise a profile URL into a deduplication key.
///
/// Applies the following transformations:
///
/// 1. Force `https` and drop fragments and credentials.
/// 2. Collapse host aliases (`twitter.com` → `x.com`, `m.facebook.com` →
///    `facebook.com`, `www.youtube.com` → `youtube.com`).
/// 3. Strip tracking query parameters and sort the rest.
/// 4. Lowercase the path, except for case-sensitive identifiers such as
///    YouTube `/channel/UC…` IDs.
/// 5. Remove a trailing slash (unless the path is exactly `"/"`).
///
/// If the input cannot be parsed as an absolute URL, the trimmed,
/// lower-cased input is returned.
///
/// # Examples
///
/// ```
/// use lookalike_search::orchestrator::url_normalize::canonical_url;
///
/// let a = canonical_url("https://twitter.com/AcmeCorp/?s=20");
/// let b = canonical_url("https://x.com/acmecorp");
/// assert_eq!(a, b);
/// ```
pub fn canonical_url(raw: &str) -> String {
    let Ok(mut parsed) = Url::parse(raw.trim()) else {
        return raw.trim().to_lowercase();
    };
    if !matches!(parsed.scheme(), "http" | "https") {
        return raw.trim().to_lowercase();
    }

    parsed.set_fragment(None);
    let _ = parsed.set_username("");
    let _ = parsed.set_password(None);
    let _ = parsed.set_scheme("https");

    let alias = parsed.host_str().and_then(|host| {
        HOST_ALIASES
            .iter()
            .find(|(alias, _)| *alias == host)
            .map(|(_, canonical)| *canonical)
    });
    if let Some(canonical) = alias {
        let _ = parsed.set_host(Some(canonical));
    }

    let mut params: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(key, _)| !TRACKING_PARAMS.contains(&key.to_lowercase().as_str()))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    params.sort();
    if params.is_empty() {
        parsed.set_query(None);
    } else {
        parsed.query_pairs_mut().clear().extend_pairs(params);
    }

    let mut path = parsed.path().to_string();
    if !CASE_SENSITIVE_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
    {
        path = path.to_lowercase();
    }
    if path.len() > 1 && path.ends_with('/') {
        path.pop();
    }
    parsed.set_path(&path);

    parsed.to_string()
}
