//! Shared navigation options used by the docs layout chrome.

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

/// Renderable markup fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Markup {
    /// Plain text, escaped on render.
    Text(String),
    /// Image with explicit dimensions and inline style.
    Image {
        /// Image URL.
        src: String,
        /// Alt text.
        alt: String,
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
        /// Inline CSS.
        style: Option<String>,
    },
    /// Sequence of fragments rendered back to back.
    Fragment(Vec<Markup>),
}

impl Markup {
    /// Renders the fragment to HTML.
    pub fn render(&self) -> String {
        match self {
            Markup::Text(value) => text(value).into_owned(),
            Markup::Image {
                src,
                alt,
                width,
                height,
                style,
            } => {
                let style = style
                    .as_deref()
                    .map(|s| format!(r#" style="{}""#, attr(s)))
                    .unwrap_or_default();
                format!(
                    r#"<img src="{}" alt="{}" width="{width}" height="{height}"{style} />"#,
                    attr(src),
                    attr(alt)
                )
            }
            Markup::Fragment(parts) => parts.iter().map(Markup::render).collect(),
        }
    }
}

/// How a nav link decides whether it is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkActive {
    /// Active only on the exact URL.
    #[default]
    Url,
    /// Active on the URL and everything below it.
    NestedUrl,
    /// Never highlighted.
    None,
}

/// A top navigation link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    /// Link label.
    pub text: String,
    /// Target URL.
    pub url: String,
    /// Active-state matching.
    pub active: LinkActive,
}

impl NavLink {
    /// Whether the link should be highlighted on `current`.
    pub fn is_active(&self, current: &str) -> bool {
        match self.active {
            LinkActive::Url => current.trim_end_matches('/') == self.url.trim_end_matches('/'),
            LinkActive::NestedUrl => {
                let base = self.url.trim_end_matches('/');
                current == base || current.starts_with(&format!("{base}/"))
            }
            LinkActive::None => false,
        }
    }
}

/// Layout chrome options: nav title and links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavOptions {
    /// Title markup shown at the top-left of the nav bar.
    pub title: Markup,
    /// Ordered nav links.
    pub links: Vec<NavLink>,
}

impl NavOptions {
    /// Title HTML.
    pub fn render_title(&self) -> String {
        self.title.render()
    }

    /// Links HTML; the link matching `current` gets `data-active="true"`.
    pub fn render_links(&self, current: &str) -> String {
        self.links
            .iter()
            .map(|link| {
                let active = if link.is_active(current) {
                    r#" data-active="true""#
                } else {
                    ""
                };
                format!(
                    r#"<a href="{}" class="fd-nav-link"{active}>{}</a>"#,
                    attr(&link.url),
                    text(&link.text)
                )
            })
            .collect()
    }
}

/// Options shared by every layout: the Arch Network icon and name, no links.
pub fn base_options() -> NavOptions {
    NavOptions {
        title: Markup::Fragment(vec![
            Markup::Image {
                src: "/real-icon.png".to_string(),
                alt: "Arch Network Logo".to_string(),
                width: 24,
                height: 24,
                style: Some("margin-right: 8px".to_string()),
            },
            Markup::Text("Arch Network".to_string()),
        ]),
        links: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_options_are_deterministic() {
        assert_eq!(base_options(), base_options());
        assert!(base_options().links.is_empty());
    }

    #[test]
    fn title_renders_icon_then_name() {
        insta::assert_snapshot!(
            base_options().render_title(),
            @r#"<img src="/real-icon.png" alt="Arch Network Logo" width="24" height="24" style="margin-right: 8px" />Arch Network"#
        );
    }

    #[test]
    fn nested_links_match_children() {
        let link = NavLink {
            text: "Guides".to_string(),
            url: "/docs/guides".to_string(),
            active: LinkActive::NestedUrl,
        };
        assert!(link.is_active("/docs/guides"));
        assert!(link.is_active("/docs/guides/setup"));
        assert!(!link.is_active("/docs/guidesx"));

        let options = NavOptions {
            title: Markup::Text("x".to_string()),
            links: vec![link],
        };
        assert!(options.render_links("/docs/guides/a").contains(r#"data-active="true""#));
        assert!(!options.render_links("/docs").contains("data-active"));
    }
}
