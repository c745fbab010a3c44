//! Schemas for page frontmatter and per-folder `meta.json` descriptors.
//!
//! Both are validated with serde: a document that does not deserialize into
//! its schema is a [`SiteError::ContentValidation`] naming the offending file.

use crate::error::SiteError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::path::Path;

/// Frontmatter accepted on every documentation page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageFrontmatter {
    /// Page title, shown in the sidebar and the document `<title>`.
    pub title: String,
    /// Optional summary rendered under the title and in `<meta name="description">`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional icon name shown next to the sidebar entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Render the page full width without the table of contents.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full: Option<bool>,
    /// Keys outside the schema, kept for downstream consumers.
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl PageFrontmatter {
    /// Validates extracted frontmatter for the page at `path`.
    pub fn validate(value: JsonValue, path: &Path) -> Result<Self, SiteError> {
        serde_json::from_value(value)
            .map_err(|err| SiteError::content(format!("invalid frontmatter: {err}"), path))
    }

    /// Whether the page opts out of the table of contents.
    pub fn is_full(&self) -> bool {
        self.full.unwrap_or(false)
    }
}

/// Folder descriptor read from `meta.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaDescriptor {
    /// Display title of the folder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Explicit ordering of the folder's children.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<Vec<String>>,
    /// Optional folder description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Marks the folder as a sidebar root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<bool>,
    /// Whether the folder starts expanded in the sidebar.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_open: Option<bool>,
    /// Optional icon name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl MetaDescriptor {
    /// Parses and validates the raw contents of a `meta.json` file.
    pub fn parse(source: &str, path: &Path) -> Result<Self, SiteError> {
        let value: JsonValue = serde_json::from_str(source)
            .map_err(|err| SiteError::content(format!("invalid JSON: {err}"), path))?;
        if !value.is_object() {
            return Err(SiteError::content("meta descriptor must be an object", path));
        }
        serde_json::from_value(value)
            .map_err(|err| SiteError::content(format!("invalid meta descriptor: {err}"), path))
    }

    /// Whether the folder should be rendered expanded.
    pub fn is_default_open(&self) -> bool {
        self.default_open.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    fn path() -> PathBuf {
        PathBuf::from("content/docs/intro.mdx")
    }

    #[test]
    fn accepts_minimal_frontmatter() {
        let fm = PageFrontmatter::validate(json!({"title": "Intro"}), &path()).unwrap();
        assert_eq!(fm.title, "Intro");
        assert_eq!(fm.description, None);
        assert!(!fm.is_full());
    }

    #[test]
    fn keeps_unknown_keys() {
        let fm =
            PageFrontmatter::validate(json!({"title": "Intro", "sidebar_position": 2}), &path())
                .unwrap();
        assert_eq!(fm.extra.get("sidebar_position"), Some(&json!(2)));
    }

    #[test]
    fn rejects_missing_title() {
        let err = PageFrontmatter::validate(json!({"description": "x"}), &path()).unwrap_err();
        assert!(err.is_content());
        assert!(err.to_string().contains("title"), "{err}");
        assert!(err.to_string().contains("intro.mdx"), "{err}");
    }

    #[test]
    fn rejects_wrong_type() {
        let err =
            PageFrontmatter::validate(json!({"title": "x", "full": "yes"}), &path()).unwrap_err();
        assert!(err.is_content());
    }

    #[test]
    fn parses_meta_descriptor() {
        let meta = MetaDescriptor::parse(
            r#"{"title": "Quick Start", "pages": ["index", "..."], "defaultOpen": true}"#,
            &PathBuf::from("meta.json"),
        )
        .unwrap();
        assert_eq!(meta.title.as_deref(), Some("Quick Start"));
        assert_eq!(meta.pages.as_ref().map(Vec::len), Some(2));
        assert!(meta.is_default_open());
    }

    #[test]
    fn rejects_non_string_pages() {
        let err = MetaDescriptor::parse(r#"{"pages": [1, 2]}"#, &PathBuf::from("meta.json"))
            .unwrap_err();
        assert!(err.is_content());
    }

    #[test]
    fn rejects_non_object_meta() {
        let err = MetaDescriptor::parse("[]", &PathBuf::from("meta.json")).unwrap_err();
        assert!(err.to_string().contains("must be an object"));
    }
}
