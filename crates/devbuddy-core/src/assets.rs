//! Asset references embedded in note content.
//!
//! Notes point at pasted images and videos with markdown image syntax or
//! inline `<img>`/`<video>` tags. Only references that resolve inside the
//! owning notebook's `assets/` directory count; everything else (remote URLs,
//! other notebooks, traversal attempts) is ignored.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

static MARKDOWN_IMAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[[^\]]*\]\(([^)]+)\)").expect("Invalid regex"));

static HTML_MEDIA_SRC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<(?:img|video)[^>]*src=["']([^"']+)["'][^>]*>"#).expect("Invalid regex")
});

const FILE_SCHEME: &str = "file://";

/// Collect every asset path under `assets_dir` referenced by `content`.
#[must_use]
pub fn extract_asset_references(content: &str, assets_dir: &Path) -> BTreeSet<PathBuf> {
    let mut references = BTreeSet::new();
    if content.is_empty() {
        return references;
    }

    for captures in MARKDOWN_IMAGE.captures_iter(content) {
        let raw = captures[1].trim();
        let raw = raw
            .strip_prefix('<')
            .and_then(|inner| inner.strip_suffix('>'))
            .unwrap_or(raw);
        if let Some(path) = normalize_asset_reference(raw, assets_dir) {
            references.insert(path);
        }
    }

    for captures in HTML_MEDIA_SRC.captures_iter(content) {
        if let Some(path) = normalize_asset_reference(captures[1].trim(), assets_dir) {
            references.insert(path);
        }
    }

    references
}

/// Resolve one captured reference to a path inside `assets_dir`.
///
/// Strips a `file://` prefix and percent-decodes every escape, reserved ones
/// such as `%2F` included (keeping the raw text when decoding fails).
/// Containment is checked on the decoded path: `None` when it contains `..`
/// components or does not lie strictly inside `assets_dir`.
#[must_use]
pub fn normalize_asset_reference(raw: &str, assets_dir: &Path) -> Option<PathBuf> {
    if raw.is_empty() {
        return None;
    }
    let raw = raw.strip_prefix(FILE_SCHEME).unwrap_or(raw);
    let decoded = urlencoding::decode(raw)
        .map_or_else(|_| raw.to_string(), std::borrow::Cow::into_owned);
    let path = PathBuf::from(decoded);

    if path
        .components()
        .any(|component| matches!(component, Component::ParentDir))
    {
        return None;
    }
    if path == assets_dir || !path.starts_with(assets_dir) {
        return None;
    }
    Some(path)
}
