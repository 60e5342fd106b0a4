//! Pure path-mapping logic: any file under the static dir, plus `.html`
//! fallback.

use std::path::{Component, Path, PathBuf};

/// True when `rel` is made of plain path segments only, so a crafted URI
/// cannot climb out of the root it is joined to.
pub fn is_clean(rel: &str) -> bool {
    !rel.is_empty()
        && Path::new(rel)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

/// Given a request path, return the matching filesystem path under
/// `static_dir`, or `None` if nothing matches.
pub fn map_static_path(static_dir: &Path, uri: &str) -> Option<PathBuf> {
    let rel = uri.strip_prefix('/').unwrap_or(uri);

    // Root → index.html
    if rel.is_empty() {
        return Some(static_dir.join("index.html"));
    }

    if !is_clean(rel) {
        return None;
    }

    let candidate = static_dir.join(rel);
    if candidate.is_file() {
        return Some(candidate);
    }

    // Pretty URLs: try with ".html" appended.
    let html_candidate = static_dir.join(format!("{rel}.html"));
    if html_candidate.is_file() {
        return Some(html_candidate);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_maps_to_index() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            map_static_path(dir.path(), "/"),
            Some(dir.path().join("index.html"))
        );
    }

    #[test]
    fn exact_file_then_html_fallback() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("style.css"), "body{}").unwrap();
        std::fs::write(dir.path().join("gallery.html"), "<html>").unwrap();

        assert_eq!(
            map_static_path(dir.path(), "/style.css"),
            Some(dir.path().join("style.css"))
        );
        assert_eq!(
            map_static_path(dir.path(), "/gallery"),
            Some(dir.path().join("gallery.html"))
        );
        assert_eq!(map_static_path(dir.path(), "/missing"), None);
    }

    #[test]
    fn parent_components_are_refused() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(map_static_path(dir.path(), "/../secret"), None);
        assert_eq!(map_static_path(dir.path(), "/a/../../secret"), None);
        assert!(!is_clean("../x"));
        assert!(is_clean("a/b.css"));
    }
}
