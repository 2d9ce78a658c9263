use anyhow::{Context, Result};
use indexmap::IndexMap;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use walkdir::WalkDir;

// First-match scans for the document dimensions. Unanchored: whichever
// width="…" appears earliest in the text wins.
static WIDTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)width="([0-9]+)""#).unwrap());
static HEIGHT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)height="([0-9]+)""#).unwrap());

// Every self-closing path element; group 1 is its raw attribute list.
static PATH_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<path ([^/]+?)/>").unwrap());

// name="value" pairs inside an attribute list. Names are letters and
// dashes; values run non-greedily to the next literal quote.
static ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)([a-zA-Z-]+)="(.+?)""#).unwrap());

/// Represents one extracted icon, ready for module rendering
#[derive(Debug, Clone)]
pub struct Icon {
    /// Registry key derived from the file path (e.g. "arrow_down" from "arrow-down.svg")
    pub name: String,
    /// Digits of the first width="…" attribute, if the source has one
    pub width: Option<String>,
    /// Digits of the first height="…" attribute, if the source has one
    pub height: Option<String>,
    /// One attribute map per <path/> element, in source order
    pub paths: Vec<IndexMap<String, String>>,
}

/// List every entry of the icon directory, in directory order.
///
/// Entries are not filtered by extension and not sorted; every entry is
/// assumed to be a readable icon file. Fails when the path is missing or
/// is not a directory.
pub fn scan_icon_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let meta = std::fs::metadata(dir)
        .with_context(|| format!("Failed to read icon directory {}", dir.display()))?;
    if !meta.is_dir() {
        anyhow::bail!("{} is not a directory", dir.display());
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry =
            entry.with_context(|| format!("Failed to read icon directory {}", dir.display()))?;
        files.push(entry.into_path());
    }

    Ok(files)
}

/// Extract one icon from an SVG file.
pub fn extract_icon(path: &Path, base: &Path) -> Result<Icon> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    Ok(icon_from_source(derive_icon_name(path, base), &text))
}

/// Derive the registry identifier for an icon from its file path.
///
/// Strips the base directory and the ".svg" suffix, folds separators and
/// dashes to underscores, lowercases, and drops anything outside
/// `[a-z0-9\-_]`. Two paths can normalize to the same name; the later one
/// wins when the modules are written.
fn derive_icon_name(path: &Path, base: &Path) -> String {
    let path_text = path.to_string_lossy();
    let base_text = base.to_string_lossy();

    let rel = path_text.strip_prefix(&*base_text).unwrap_or(&path_text);
    let rel = rel.strip_prefix('/').unwrap_or(rel);
    let rel = rel.strip_suffix(".svg").unwrap_or(rel);

    let mut name = rel.replace(['/', '-'], "_").to_lowercase();
    name.retain(|c| matches!(c, 'a'..='z' | '0'..='9' | '-' | '_'));
    name
}

/// Build an icon record from raw SVG text.
///
/// Width and height take the first match only. A file with no path
/// elements yields an empty sequence, and a missing dimension yields
/// `None`; neither is an error.
fn icon_from_source(name: String, text: &str) -> Icon {
    let mut paths = Vec::new();
    for caps in PATH_RE.captures_iter(text) {
        paths.push(extract_path_attrs(&caps[1]));
    }

    Icon {
        name,
        width: first_capture(&WIDTH_RE, text),
        height: first_capture(&HEIGHT_RE, text),
        paths,
    }
}

/// Parse one attribute-list substring into an ordered map. A duplicate
/// attribute name overwrites the earlier value but keeps its position.
fn extract_path_attrs(attrs_text: &str) -> IndexMap<String, String> {
    let mut attrs = IndexMap::new();
    for caps in ATTR_RE.captures_iter(attrs_text) {
        attrs.insert(caps[1].to_string(), caps[2].to_string());
    }
    attrs
}

fn first_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn icon(text: &str) -> Icon {
        icon_from_source("test".to_string(), text)
    }

    #[test]
    fn test_derive_icon_name() {
        let base = Path::new("/icons");
        assert_eq!(
            derive_icon_name(Path::new("/icons/arrow-down.svg"), base),
            "arrow_down"
        );
        assert_eq!(
            derive_icon_name(Path::new("/icons/social/FaceBook.svg"), base),
            "social_facebook"
        );
        assert_eq!(derive_icon_name(Path::new("/icons/Alert!.svg"), base), "alert");
        assert_eq!(derive_icon_name(Path::new("/icons/map pin.svg"), base), "mappin");
    }

    #[test]
    fn test_first_width_and_height_win() {
        let icon = icon(r#"<svg width="24" height="16"><rect width="99" height="99"/></svg>"#);
        assert_eq!(icon.width.as_deref(), Some("24"));
        assert_eq!(icon.height.as_deref(), Some("16"));
    }

    #[test]
    fn test_missing_dimensions_yield_none() {
        let icon = icon(r#"<svg><path d="M0 0"/></svg>"#);
        assert!(icon.width.is_none());
        assert!(icon.height.is_none());
    }

    #[test]
    fn test_dimension_digits_kept_verbatim() {
        let icon = icon(r#"<svg width="007" height="0160"></svg>"#);
        assert_eq!(icon.width.as_deref(), Some("007"));
        assert_eq!(icon.height.as_deref(), Some("0160"));
    }

    #[test]
    fn test_width_scan_is_unanchored() {
        let icon = icon(r#"<svg><path stroke-width="2" d="M0 0"/><rect width="24"/></svg>"#);
        assert_eq!(icon.width.as_deref(), Some("2"));
    }

    #[test]
    fn test_paths_kept_in_source_order() {
        let icon = icon(r#"<svg><path d="M0 0"/><path d="M1 1"/></svg>"#);
        assert_eq!(icon.paths.len(), 2);
        assert_eq!(icon.paths[0].get("d").map(String::as_str), Some("M0 0"));
        assert_eq!(icon.paths[1].get("d").map(String::as_str), Some("M1 1"));
    }

    #[test]
    fn test_duplicate_attribute_overwrites_in_place() {
        let icon = icon(r#"<svg><path stroke="red" d="M0 0" stroke="blue"/></svg>"#);
        let attrs: Vec<(&str, &str)> = icon.paths[0]
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(attrs, [("stroke", "blue"), ("d", "M0 0")]);
    }

    #[test]
    fn test_path_without_attributes_yields_empty_map() {
        let icon = icon("<svg><path  /></svg>");
        assert_eq!(icon.paths.len(), 1);
        assert!(icon.paths[0].is_empty());
    }

    #[test]
    fn test_file_without_paths_yields_empty_sequence() {
        let icon = icon(r#"<svg width="24" height="24"></svg>"#);
        assert!(icon.paths.is_empty());
    }

    #[test]
    fn test_scan_lists_every_entry_unfiltered() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.svg"), "<svg/>").unwrap();
        fs::write(dir.path().join("notes.txt"), "not an icon").unwrap();

        let files = scan_icon_dir(dir.path()).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_scan_fails_on_missing_directory() {
        assert!(scan_icon_dir(Path::new("/nonexistent/icons")).is_err());
    }

    #[test]
    fn test_scan_fails_when_input_is_a_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("icons.svg");
        fs::write(&file, "<svg/>").unwrap();

        assert!(scan_icon_dir(&file).is_err());
    }
}
