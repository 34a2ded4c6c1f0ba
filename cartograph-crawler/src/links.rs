//! Pure link classification and URL normalization helpers. Nothing here
//! holds state, so every function is safe to call from any task.

use url::Url;

/// How a tag participates in the link graph, and which attribute carries
/// the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagClass {
    /// Navigable link, followed by the crawler.
    Link(&'static str),
    /// Static asset, recorded but never fetched.
    Asset(&'static str),
    Ignored,
}

/// Classify an HTML tag by name. An `<a>` is always a navigable link, a
/// `<link>` is always an asset, `<script>` and `<img>` are assets carried
/// by `src`.
pub fn classify_tag(name: &str) -> TagClass {
    match name.to_ascii_lowercase().as_str() {
        "a" => TagClass::Link("href"),
        "link" => TagClass::Asset("href"),
        "script" | "img" => TagClass::Asset("src"),
        _ => TagClass::Ignored,
    }
}

/// Resolve an attribute value to an absolute URL. Values already carrying
/// an `http:`/`https:` scheme are parsed verbatim; everything else is
/// resolved relative to `base`. Returns `None` for values that cannot name
/// a page (empty, bare fragment, `javascript:`, `mailto:`, `tel:`) or that
/// fail to parse.
pub fn resolve(value: &str, base: &Url) -> Option<Url> {
    if value.is_empty()
        || value.starts_with('#')
        || value.starts_with("javascript:")
        || value.starts_with("mailto:")
        || value.starts_with("tel:")
    {
        return None;
    }

    if value.starts_with("http:") || value.starts_with("https:") {
        Url::parse(value).ok()
    } else {
        base.join(value).ok()
    }
}

/// Hostname with a leading `www.` stripped, or `None` for host-less URLs.
pub fn hostname_of(url: &Url) -> Option<&str> {
    url.host_str()
        .map(|host| host.strip_prefix("www.").unwrap_or(host))
}

/// Whether `url` belongs to the target domain. `target_host` must already
/// be www.-stripped. Exact hostname equality only: subdomains are not
/// treated as internal.
pub fn is_internal(url: &Url, target_host: &str) -> bool {
    hostname_of(url) == Some(target_host)
}

/// Copy of `url` with query string and fragment removed. Scheme, host,
/// port and path are preserved verbatim. Idempotent.
pub fn canonicalize(url: &Url) -> Url {
    let mut canonical = url.clone();
    canonical.set_query(None);
    canonical.set_fragment(None);
    canonical
}
